//! The five wallpapers.
//!
//! Rain variants accumulate on a retained canvas every frame; the clock
//! faces repaint once a second plus while a change pulse fades.

mod bars;
mod clock;
mod overlay;
mod painter;
mod palette;
mod pulse;
mod rain;
mod sliding;

use std::time::Instant;

use anyhow::Result;
use digitfall_core::rain::RainConfig;
use digitfall_engine::coords::Viewport;
use digitfall_engine::core::{AppControl, FrameCtx};
use digitfall_engine::text::{FontId, FontSystem};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::cli::Variant;
use crate::host::HostBridge;
use crate::surface::RainStyle;

use bars::BarsFace;
use clock::ClockView;
use overlay::ClockOverlay;
use rain::RainView;
use sliding::SlidingFace;

/// A wallpaper bound to one window.
///
/// `mount` starts its loops, `unmount` stops them; both are driven by the
/// window lifecycle. Sizes are logical pixels.
pub trait View {
    fn mount(&mut self, size: Viewport, now: Instant, host: &mut HostBridge<'_>);

    fn resize(&mut self, size: Viewport, host: &mut HostBridge<'_>);

    /// A wake-up the view asked for is due.
    fn wake(&mut self, now: Instant, host: &mut HostBridge<'_>);

    fn frame(&mut self, ctx: &mut FrameCtx<'_, '_>, fonts: &FontSystem) -> AppControl;

    fn unmount(&mut self);
}

/// Builds the view for `variant`, validating its rain preset.
pub fn build(variant: Variant, fonts: &FontSystem, font: FontId) -> Result<Box<dyn View>> {
    let rain = |config: RainConfig, style: RainStyle, clock: Option<ClockOverlay>| -> Result<Box<dyn View>> {
        let view = RainView::new(config, style, StdRng::from_os_rng(), fonts, font, clock)?;
        Ok(Box::new(view))
    };

    match variant {
        Variant::Rain => rain(RainConfig::rain(), RainStyle::grey(), None),
        Variant::Exact => rain(RainConfig::exact(), RainStyle::exact(), None),
        Variant::Matrix => rain(RainConfig::matrix(), RainStyle::green(), Some(ClockOverlay::new())),
        Variant::Sliding => Ok(Box::new(ClockView::new(SlidingFace, font))),
        Variant::Bars => Ok(Box::new(ClockView::new(BarsFace, font))),
    }
}
