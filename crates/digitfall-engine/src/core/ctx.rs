use winit::window::{Window, WindowId};

use crate::coords::Viewport;
use crate::device::{Gpu, GpuFrame, SurfaceErrorAction};
use crate::paint::Color;
use crate::render::{RenderCtx, RenderTarget, RetainedCanvas};
use crate::time::FrameTime;
use crate::window::RuntimeCtx;

use super::app::AppControl;

/// Per-window handles and immutable window metadata.
pub struct WindowCtx<'a> {
    pub id: WindowId,
    pub window: &'a Window,
}

impl<'a> WindowCtx<'a> {
    /// Logical window size as `(width, height)`.
    pub fn logical_size(&self) -> (f32, f32) {
        logical_size(self.window)
    }

    pub fn scale_factor(&self) -> f32 {
        self.window.scale_factor() as f32
    }
}

pub(crate) fn logical_size(window: &Window) -> (f32, f32) {
    let logical: winit::dpi::LogicalSize<f64> = window.inner_size().to_logical(window.scale_factor());
    (logical.width as f32, logical.height as f32)
}

/// Per-frame context passed to `core::App::on_frame`.
///
/// Lifetimes:
/// - `'a` is the duration of the callback invocation
/// - `'w` is the window-borrow lifetime carried by `Gpu<'w>`
pub struct FrameCtx<'a, 'w> {
    pub window: WindowCtx<'a>,
    pub gpu: &'a mut Gpu<'w>,
    pub time: FrameTime,
    pub runtime: &'a mut RuntimeCtx,
}

impl<'a, 'w> FrameCtx<'a, 'w> {
    /// Clears the surface with `clear`, calls `draw` with a ready
    /// [`RenderCtx`] and [`RenderTarget`], then presents the frame.
    pub fn render<F>(&mut self, clear: Color, draw: F) -> AppControl
    where
        F: FnOnce(&RenderCtx<'_>, &mut RenderTarget<'_>),
    {
        let Some(mut frame) = self.acquire() else {
            return self.surface_status();
        };

        {
            let _rpass = frame.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("digitfall clear"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &frame.view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(clear.to_wgpu()),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });
        }

        let rctx = self.render_ctx();
        {
            let mut target = RenderTarget::new(&mut frame.encoder, &frame.view);
            draw(&rctx, &mut target);
        }

        self.present(frame);
        AppControl::Continue
    }

    /// Draws onto a canvas that keeps its contents across frames, copies it
    /// to the surface, then draws `overlay` on top of the copy.
    ///
    /// `retained` sees last frame's pixels (or black after a resize or
    /// [`RetainedCanvas::invalidate`]); `overlay` starts from this frame's
    /// canvas and leaves no trace in it.
    pub fn render_retained<R, O>(&mut self, canvas: &mut RetainedCanvas, retained: R, overlay: O) -> AppControl
    where
        R: FnOnce(&RenderCtx<'_>, &mut RenderTarget<'_>),
        O: FnOnce(&RenderCtx<'_>, &mut RenderTarget<'_>),
    {
        let Some(mut frame) = self.acquire() else {
            return self.surface_status();
        };

        if canvas.prepare(self.gpu.device(), self.gpu.surface_format(), self.gpu.size()) {
            canvas.clear(&mut frame.encoder);
        }

        let rctx = self.render_ctx();
        if let Some(canvas_view) = canvas.view() {
            let mut target = RenderTarget::new(&mut frame.encoder, canvas_view);
            retained(&rctx, &mut target);
        }

        canvas.blit(&mut frame.encoder, &frame.view);

        {
            let mut target = RenderTarget::new(&mut frame.encoder, &frame.view);
            overlay(&rctx, &mut target);
        }

        self.present(frame);
        AppControl::Continue
    }

    // ── private helpers ────────────────────────────────────────────────────

    fn render_ctx(&self) -> RenderCtx<'_> {
        let (w, h) = self.window.logical_size();
        RenderCtx::new(
            self.gpu.device(),
            self.gpu.queue(),
            self.gpu.surface_format(),
            Viewport::new(w, h),
            self.window.scale_factor(),
        )
    }

    /// `None` when this frame cannot be drawn; the reason is kept for
    /// [`Self::surface_status`].
    fn acquire(&mut self) -> Option<GpuFrame> {
        match self.gpu.begin_frame() {
            Ok(frame) => Some(frame),
            Err(err) => {
                if self.gpu.handle_surface_error(err) == SurfaceErrorAction::Fatal {
                    self.runtime.exit();
                } else {
                    // Try again soon rather than waiting on the next invalidation.
                    self.runtime.request_redraw(self.window.id);
                }
                None
            }
        }
    }

    fn surface_status(&self) -> AppControl {
        if self.runtime.exit_requested() { AppControl::Exit } else { AppControl::Continue }
    }

    fn present(&mut self, frame: GpuFrame) {
        self.window.window.pre_present_notify();
        self.gpu.submit(frame);
    }
}
