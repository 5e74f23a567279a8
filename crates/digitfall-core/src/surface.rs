/// Per-frame drawing operations the rain needs from its host.
///
/// Coordinates are in logical pixels with the origin at the top-left. `x, y`
/// name the centre of the glyph or disc.
pub trait DrawSurface {
    /// Cover the whole surface with the background colour at `alpha`.
    /// Anything below `1.0` leaves a fading trail of the previous frame.
    fn fill_background(&mut self, alpha: f32);

    /// `symbol` is a single digit `0..=9`.
    fn draw_glyph(&mut self, symbol: u8, x: f32, y: f32, opacity: f32, emphasized: bool);

    fn draw_highlight_disc(&mut self, x: f32, y: f32, radius: f32);
}
