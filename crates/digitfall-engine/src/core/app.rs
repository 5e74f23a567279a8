use winit::event::WindowEvent;
use winit::window::WindowId;

use super::ctx::FrameCtx;
use crate::window::RuntimeCtx;

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application contract implemented by the wallpapers.
///
/// Frames are not continuous: the runtime only calls `on_frame` when the
/// app asked for one through [`RuntimeCtx::request_redraw`] or
/// [`RuntimeCtx::wake_at`], or when the platform needs the window repainted.
pub trait App {
    /// Called once a window has a GPU surface and is about to draw its first
    /// frame. `size` is the logical size.
    fn on_window_ready(&mut self, window_id: WindowId, size: (f32, f32), runtime: &mut RuntimeCtx) {
        let _ = (window_id, size, runtime);
    }

    /// Called for window events.
    fn on_window_event(&mut self, window_id: WindowId, event: &WindowEvent) -> AppControl {
        let _ = (window_id, event);
        AppControl::Continue
    }

    /// Called after the surface has been resized. `size` is the logical size.
    fn on_resize(&mut self, window_id: WindowId, size: (f32, f32), runtime: &mut RuntimeCtx) {
        let _ = (window_id, size, runtime);
    }

    /// Called when a scheduled wake-up for `window_id` is due, before any
    /// redraw it leads to.
    fn on_wake(&mut self, window_id: WindowId, runtime: &mut RuntimeCtx) {
        let _ = (window_id, runtime);
    }

    /// Called for a frame of `window_id`.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl;

    /// Called after the window has been destroyed.
    fn on_window_closed(&mut self, window_id: WindowId) {
        let _ = window_id;
    }
}
