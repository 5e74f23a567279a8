use std::time::Instant;

use digitfall_core::schedule::Host;
use digitfall_engine::window::RuntimeCtx;
use winit::window::WindowId;

/// Routes the views' frame and timer requests to one window of the runtime.
pub struct HostBridge<'a> {
    runtime: &'a mut RuntimeCtx,
    window: WindowId,
}

impl<'a> HostBridge<'a> {
    pub fn new(runtime: &'a mut RuntimeCtx, window: WindowId) -> Self {
        Self { runtime, window }
    }
}

impl Host for HostBridge<'_> {
    fn request_frame(&mut self) {
        self.runtime.request_redraw(self.window);
    }

    fn wake_at(&mut self, deadline: Instant) {
        self.runtime.wake_at(self.window, deadline);
    }
}
