use std::collections::HashMap;
use std::time::Instant;

use anyhow::{Context, Result};
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::{LogicalSize, PhysicalSize};
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Fullscreen, Window, WindowId};

use crate::core::{logical_size, App as CoreApp, AppControl, FrameCtx, WindowCtx};
use crate::device::{Gpu, GpuInit};
use crate::time::{FrameClock, FrameTime};

use super::schedule::{earliest, WindowSchedule};

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
    /// Borderless fullscreen on the current monitor.
    pub fullscreen: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "digitfall".to_string(),
            initial_size: LogicalSize::new(1280.0, 720.0),
            fullscreen: false,
        }
    }
}

/// Runtime context passed to the application.
///
/// Commands are buffered and applied after the current callback returns.
#[derive(Default)]
pub struct RuntimeCtx {
    commands: Vec<Command>,
}

impl RuntimeCtx {
    /// Asks for one more frame of `id` as soon as the platform allows.
    pub fn request_redraw(&mut self, id: WindowId) {
        self.commands.push(Command::RequestRedraw(id));
    }

    /// Asks for [`CoreApp::on_wake`] once `deadline` has passed.
    pub fn wake_at(&mut self, id: WindowId, deadline: Instant) {
        self.commands.push(Command::WakeAt(id, deadline));
    }

    pub fn exit(&mut self) {
        self.commands.push(Command::Exit);
    }

    pub fn exit_requested(&self) -> bool {
        self.commands.iter().any(|c| matches!(c, Command::Exit))
    }
}

#[derive(Debug)]
enum Command {
    RequestRedraw(WindowId),
    WakeAt(WindowId, Instant),
    Exit,
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    pub fn run<A>(initial: RuntimeConfig, gpu_init: GpuInit, app: A) -> Result<()>
    where
        A: 'static + CoreApp,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = AppState::new(initial, gpu_init, app);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        Ok(())
    }
}

#[self_referencing]
struct WindowEntry {
    clock: FrameClock,

    window: Window,

    /// `None` until a surface could be created for the window.
    #[borrows(window)]
    #[covariant]
    gpu: Option<Gpu<'this>>,
}

struct WindowSlot {
    entry: WindowEntry,
    schedule: WindowSchedule,
}

struct AppState<A>
where
    A: CoreApp + 'static,
{
    initial: RuntimeConfig,
    gpu_init: GpuInit,
    app: A,

    windows: HashMap<WindowId, WindowSlot>,
    exit_requested: bool,
}

impl<A> AppState<A>
where
    A: CoreApp + 'static,
{
    fn new(initial: RuntimeConfig, gpu_init: GpuInit, app: A) -> Self {
        Self {
            initial,
            gpu_init,
            app,
            windows: HashMap::new(),
            exit_requested: false,
        }
    }

    fn request_exit(&mut self) {
        self.exit_requested = true;
    }

    fn create_window_entry(&mut self, event_loop: &ActiveEventLoop, config: RuntimeConfig) -> Result<WindowId> {
        let mut attrs = Window::default_attributes()
            .with_title(config.title)
            .with_inner_size(config.initial_size);
        if config.fullscreen {
            attrs = attrs.with_fullscreen(Some(Fullscreen::Borderless(None)));
        }

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        let id = window.id();
        let entry = WindowEntryBuilder {
            clock: FrameClock::default(),
            window,
            gpu_builder: |_| None,
        }
        .build();

        self.windows.insert(id, WindowSlot { entry, schedule: WindowSchedule::default() });
        log::info!("window {id:?} created");
        Ok(id)
    }

    /// Brings up the GPU for `id` if it has none yet. On success the app is
    /// told the window is ready; on failure another attempt is scheduled.
    fn ensure_gpu(&mut self, event_loop: &ActiveEventLoop, id: WindowId) {
        let Some(slot) = self.windows.get_mut(&id) else { return };
        if slot.entry.borrow_gpu().is_some() {
            return;
        }

        let gpu_init = self.gpu_init.clone();
        let result = slot.entry.with_mut(|fields| -> Result<()> {
            let gpu = pollster::block_on(Gpu::new(fields.window, gpu_init))?;
            *fields.gpu = Some(gpu);
            Ok(())
        });

        match result {
            Ok(()) => {
                slot.schedule.gpu_ready();
                let size = slot.entry.with_window(|w| logical_size(w));
                slot.entry.with_window(|w| w.request_redraw());

                let mut runtime_ctx = RuntimeCtx::default();
                self.app.on_window_ready(id, size, &mut runtime_ctx);
                self.apply_commands(event_loop, runtime_ctx);
            }
            Err(e) => {
                let failures = slot.schedule.gpu_failed(Instant::now());
                if failures == 1 {
                    log::warn!("gpu unavailable for window {id:?}: {e:#}; retrying");
                } else {
                    log::debug!("gpu retry {failures} for window {id:?} failed: {e:#}");
                }
            }
        }
    }

    fn destroy_window_entry(&mut self, id: WindowId) {
        if self.windows.remove(&id).is_some() {
            log::info!("window {id:?} closed");
            self.app.on_window_closed(id);
        }
        if self.windows.is_empty() {
            self.request_exit();
        }
    }

    fn apply_commands(&mut self, event_loop: &ActiveEventLoop, mut ctx: RuntimeCtx) {
        for cmd in ctx.commands.drain(..) {
            match cmd {
                Command::RequestRedraw(id) => {
                    if let Some(slot) = self.windows.get(&id) {
                        slot.entry.with_window(|w| w.request_redraw());
                    }
                }
                Command::WakeAt(id, deadline) => {
                    if let Some(slot) = self.windows.get_mut(&id) {
                        slot.schedule.wake_at(deadline);
                    }
                }
                Command::Exit => self.request_exit(),
            }
        }

        if self.exit_requested {
            event_loop.exit();
        }
    }

    fn handle_resize(&mut self, event_loop: &ActiveEventLoop, id: WindowId, new_size: PhysicalSize<u32>) {
        let Some(slot) = self.windows.get_mut(&id) else { return };

        let has_gpu = slot.entry.with_gpu_mut(|gpu| match gpu {
            Some(gpu) => {
                gpu.resize(new_size);
                true
            }
            None => false,
        });
        if !has_gpu {
            // A window that had no area yet may be able to get a surface now.
            self.ensure_gpu(event_loop, id);
            return;
        }

        let size = slot.entry.with_window(|w| {
            w.request_redraw();
            logical_size(w)
        });
        log::debug!("window {id:?} resized to {}x{} (logical {size:?})", new_size.width, new_size.height);

        let mut runtime_ctx = RuntimeCtx::default();
        self.app.on_resize(id, size, &mut runtime_ctx);
        self.apply_commands(event_loop, runtime_ctx);
    }

    fn draw_frame(&mut self, event_loop: &ActiveEventLoop, id: WindowId) {
        let mut runtime_ctx = RuntimeCtx::default();
        let mut app_control = AppControl::Continue;

        // Split borrows to avoid `self` capture inside `ouroboros` closures.
        let (app, windows) = (&mut self.app, &mut self.windows);
        let Some(slot) = windows.get_mut(&id) else { return };

        slot.entry.with_mut(|fields| {
            let Some(gpu) = fields.gpu.as_mut() else { return };
            let size = gpu.size();
            if size.width == 0 || size.height == 0 {
                // Minimized; the next resize brings frames back.
                return;
            }

            let ft: FrameTime = fields.clock.tick();
            let mut ctx = FrameCtx {
                window: WindowCtx { id, window: fields.window },
                gpu,
                time: ft,
                runtime: &mut runtime_ctx,
            };
            app_control = app.on_frame(&mut ctx);
        });

        if app_control == AppControl::Exit {
            runtime_ctx.exit();
        }
        self.apply_commands(event_loop, runtime_ctx);
    }
}

impl<A> ApplicationHandler for AppState<A>
where
    A: CoreApp + 'static,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if !self.windows.is_empty() {
            return;
        }

        match self.create_window_entry(event_loop, self.initial.clone()) {
            Ok(id) => self.ensure_gpu(event_loop, id),
            Err(e) => {
                log::error!("failed to create initial window: {e:#}");
                self.request_exit();
                event_loop.exit();
            }
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        let now = Instant::now();
        let due: Vec<_> = self
            .windows
            .iter_mut()
            .map(|(id, slot)| (*id, slot.schedule.take_due(now)))
            .collect();

        for (id, due) in due {
            if due.gpu_retry {
                self.ensure_gpu(event_loop, id);
            }
            if due.wake {
                let mut runtime_ctx = RuntimeCtx::default();
                self.app.on_wake(id, &mut runtime_ctx);
                self.apply_commands(event_loop, runtime_ctx);
            }
        }

        if self.exit_requested {
            event_loop.exit();
            return;
        }

        // Nothing runs between deadlines unless a frame was requested.
        let flow = match earliest(self.windows.values().map(|s| &s.schedule)) {
            Some(deadline) => ControlFlow::WaitUntil(deadline),
            None => ControlFlow::Wait,
        };
        event_loop.set_control_flow(flow);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, window_id: WindowId, event: WindowEvent) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }
        if !self.windows.contains_key(&window_id) {
            return;
        }

        if self.app.on_window_event(window_id, &event) == AppControl::Exit {
            self.request_exit();
            event_loop.exit();
            return;
        }

        // Runtime-managed window lifecycle / resize / redraw handling.
        match &event {
            WindowEvent::CloseRequested | WindowEvent::Destroyed => {
                self.destroy_window_entry(window_id);
            }

            WindowEvent::Resized(new_size) => self.handle_resize(event_loop, window_id, *new_size),

            WindowEvent::ScaleFactorChanged { .. } => {
                let new_size = self.windows.get(&window_id).map(|s| s.entry.with_window(|w| w.inner_size()));
                if let Some(new_size) = new_size {
                    self.handle_resize(event_loop, window_id, new_size);
                }
            }

            WindowEvent::RedrawRequested => self.draw_frame(event_loop, window_id),

            _ => {}
        }

        if self.exit_requested {
            event_loop.exit();
        }
    }
}
