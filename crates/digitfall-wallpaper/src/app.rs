use std::time::Instant;

use digitfall_engine::coords::Viewport;
use digitfall_engine::core::{App, AppControl, FrameCtx};
use digitfall_engine::text::FontSystem;
use digitfall_engine::window::RuntimeCtx;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::WindowId;

use crate::host::HostBridge;
use crate::views::View;

/// Drives one wallpaper view from the window lifecycle.
pub struct WallpaperApp {
    fonts: FontSystem,
    view: Box<dyn View>,
    mounted: Option<WindowId>,
}

impl WallpaperApp {
    pub fn new(fonts: FontSystem, view: Box<dyn View>) -> Self {
        Self { fonts, view, mounted: None }
    }
}

impl App for WallpaperApp {
    fn on_window_ready(&mut self, window_id: WindowId, size: (f32, f32), runtime: &mut RuntimeCtx) {
        if self.mounted.is_some() {
            return;
        }
        let mut host = HostBridge::new(runtime, window_id);
        self.view.mount(Viewport::new(size.0, size.1), Instant::now(), &mut host);
        self.mounted = Some(window_id);
    }

    fn on_window_event(&mut self, _window_id: WindowId, event: &WindowEvent) -> AppControl {
        match event {
            WindowEvent::KeyboardInput {
                event: KeyEvent { physical_key: PhysicalKey::Code(KeyCode::Escape), state: ElementState::Pressed, .. },
                ..
            } => {
                log::info!("escape pressed, exiting");
                AppControl::Exit
            }
            _ => AppControl::Continue,
        }
    }

    fn on_resize(&mut self, window_id: WindowId, size: (f32, f32), runtime: &mut RuntimeCtx) {
        if self.mounted != Some(window_id) {
            return;
        }
        let mut host = HostBridge::new(runtime, window_id);
        self.view.resize(Viewport::new(size.0, size.1), &mut host);
    }

    fn on_wake(&mut self, window_id: WindowId, runtime: &mut RuntimeCtx) {
        if self.mounted != Some(window_id) {
            return;
        }
        let mut host = HostBridge::new(runtime, window_id);
        self.view.wake(Instant::now(), &mut host);
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        if self.mounted != Some(ctx.window.id) {
            return AppControl::Continue;
        }
        self.view.frame(ctx, &self.fonts)
    }

    fn on_window_closed(&mut self, window_id: WindowId) {
        if self.mounted == Some(window_id) {
            self.view.unmount();
            self.mounted = None;
        }
    }
}
