use std::time::Instant;

use digitfall_core::rain::{RainConfig, RainField};
use digitfall_core::schedule::Host;
use digitfall_core::ConfigError;
use digitfall_engine::coords::Viewport;
use digitfall_engine::core::{AppControl, FrameCtx};
use digitfall_engine::render::{LayerRenderer, RetainedCanvas};
use digitfall_engine::scene::DrawList;
use digitfall_engine::text::{FontId, FontSystem};
use rand::rngs::StdRng;

use super::overlay::ClockOverlay;
use super::painter::Painter;
use super::View;
use crate::host::HostBridge;
use crate::surface::{DigitMetrics, ListSurface, RainStyle};

/// Digit rain accumulated on a retained canvas, with an optional clock on top.
pub struct RainView {
    field: RainField<StdRng>,
    style: RainStyle,
    metrics: DigitMetrics,
    font: FontId,
    clock: Option<ClockOverlay>,

    canvas: RetainedCanvas,
    trail: DrawList,
    trail_layer: LayerRenderer,
    overlay: DrawList,
    overlay_layer: LayerRenderer,
}

impl RainView {
    pub fn new(
        config: RainConfig,
        style: RainStyle,
        rng: StdRng,
        fonts: &FontSystem,
        font: FontId,
        clock: Option<ClockOverlay>,
    ) -> Result<Self, ConfigError> {
        let metrics = DigitMetrics::measure(fonts, font, style.font_size);
        Ok(Self {
            field: RainField::new(config, rng)?,
            style,
            metrics,
            font,
            clock,
            canvas: RetainedCanvas::new(),
            trail: DrawList::new(),
            trail_layer: LayerRenderer::new(),
            overlay: DrawList::new(),
            overlay_layer: LayerRenderer::new(),
        })
    }
}

impl View for RainView {
    fn mount(&mut self, size: Viewport, now: Instant, host: &mut HostBridge<'_>) {
        self.field.mount(size.width, size.height, host);
        if let Some(clock) = self.clock.as_mut() {
            clock.mount(now, host);
        }
    }

    fn resize(&mut self, size: Viewport, host: &mut HostBridge<'_>) {
        self.field.resize(size.width, size.height);
        self.canvas.invalidate();
        host.request_frame();
    }

    fn wake(&mut self, now: Instant, host: &mut HostBridge<'_>) {
        if let Some(clock) = self.clock.as_mut() {
            clock.wake(now, host);
        }
    }

    fn frame(&mut self, ctx: &mut FrameCtx<'_, '_>, fonts: &FontSystem) -> AppControl {
        let stepped = {
            let mut host = HostBridge::new(&mut *ctx.runtime, ctx.window.id);
            self.field.advance(&mut host)
        };

        let (w, h) = ctx.window.logical_size();
        let vp = Viewport::new(w, h);

        // A repaint without a step only re-shows the canvas.
        self.trail.clear();
        if stepped {
            let mut surface = ListSurface::new(&mut self.trail, &self.style, &self.metrics, vp.rect());
            self.field.draw(&mut surface);
        }

        self.overlay.clear();
        if let Some(clock) = self.clock.as_ref() {
            clock.paint(&mut Painter::new(&mut self.overlay, fonts, self.font), vp);
        }

        let (trail, trail_layer) = (&self.trail, &mut self.trail_layer);
        let (overlay, overlay_layer) = (&self.overlay, &mut self.overlay_layer);
        ctx.render_retained(
            &mut self.canvas,
            |rctx, target| trail_layer.render(rctx, target, trail, fonts),
            |rctx, target| overlay_layer.render(rctx, target, overlay, fonts),
        )
    }

    fn unmount(&mut self) {
        self.field.unmount();
        if let Some(clock) = self.clock.as_mut() {
            clock.unmount();
        }
    }
}
