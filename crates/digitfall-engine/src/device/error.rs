/// What the frame loop does after a surface error.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SurfaceErrorAction {
    /// Surface was reconfigured; the next frame may render.
    Reconfigured,
    /// Transient; drop this frame.
    SkipFrame,
    /// Out of memory; shut down.
    Fatal,
}
