use std::time::{Duration, Instant};

use digitfall_core::clock::{ClockFeed, SystemClock, Tick};
use digitfall_core::schedule::Host;
use digitfall_engine::coords::Viewport;
use digitfall_engine::core::{AppControl, FrameCtx};
use digitfall_engine::paint::Color;
use digitfall_engine::render::LayerRenderer;
use digitfall_engine::scene::DrawList;
use digitfall_engine::text::{FontId, FontSystem};

use super::painter::Painter;
use super::pulse::Pulses;
use super::View;
use crate::host::HostBridge;

const PULSE: Duration = Duration::from_millis(500);

/// What a once-a-second clock wallpaper draws.
pub trait ClockFace {
    fn clear_color(&self) -> Color;

    /// Decoration that depends only on the viewport, drawn beneath the face.
    fn backdrop(&self, p: &mut Painter<'_>, vp: Viewport) {
        let _ = (p, vp);
    }

    fn paint(&self, p: &mut Painter<'_>, vp: Viewport, tick: &Tick, pulses: &Pulses, now: Instant);
}

/// Redraws a [`ClockFace`] on every clock tick, and every frame while a
/// change pulse is still fading.
pub struct ClockView<F> {
    face: F,
    feed: ClockFeed<SystemClock>,
    pulses: Pulses,
    font: FontId,

    backdrop: DrawList,
    backdrop_layer: LayerRenderer,
    face_list: DrawList,
    face_layer: LayerRenderer,
}

impl<F: ClockFace> ClockView<F> {
    pub fn new(face: F, font: FontId) -> Self {
        Self {
            face,
            feed: ClockFeed::new(SystemClock),
            pulses: Pulses::new(PULSE),
            font,
            backdrop: DrawList::new(),
            backdrop_layer: LayerRenderer::new(),
            face_list: DrawList::new(),
            face_layer: LayerRenderer::new(),
        }
    }
}

impl<F: ClockFace> View for ClockView<F> {
    fn mount(&mut self, _size: Viewport, now: Instant, host: &mut HostBridge<'_>) {
        let tick = self.feed.mount(now, host);
        self.pulses.trigger(&tick.changes, now);
        host.request_frame();
    }

    fn resize(&mut self, _size: Viewport, host: &mut HostBridge<'_>) {
        host.request_frame();
    }

    fn wake(&mut self, now: Instant, host: &mut HostBridge<'_>) {
        if let Some(tick) = self.feed.poll(now, host) {
            self.pulses.trigger(&tick.changes, now);
            host.request_frame();
        }
    }

    fn frame(&mut self, ctx: &mut FrameCtx<'_, '_>, fonts: &FontSystem) -> AppControl {
        let now = ctx.time.now;
        let (w, h) = ctx.window.logical_size();
        let vp = Viewport::new(w, h);

        self.backdrop.clear();
        self.face.backdrop(&mut Painter::new(&mut self.backdrop, fonts, self.font), vp);

        self.face_list.clear();
        if let Some(tick) = self.feed.latest() {
            let mut painter = Painter::new(&mut self.face_list, fonts, self.font);
            self.face.paint(&mut painter, vp, tick, &self.pulses, now);
        }

        if self.pulses.is_active(now) {
            ctx.runtime.request_redraw(ctx.window.id);
        }

        let (backdrop, backdrop_layer) = (&self.backdrop, &mut self.backdrop_layer);
        let (face, face_layer) = (&self.face_list, &mut self.face_layer);
        ctx.render(self.face.clear_color(), |rctx, target| {
            backdrop_layer.render(rctx, target, backdrop, fonts);
            face_layer.render(rctx, target, face, fonts);
        })
    }

    fn unmount(&mut self) {
        self.feed.unmount();
    }
}
