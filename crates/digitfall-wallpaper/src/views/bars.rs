use std::time::Instant;

use digitfall_core::clock::Tick;
use digitfall_core::slider::SliderDigit;
use digitfall_engine::coords::{Rect, Vec2, Viewport};
use digitfall_engine::paint::Color;

use super::clock::ClockFace;
use super::painter::{corner_captions, Painter};
use super::palette::{green, slate, white};
use super::pulse::Pulses;

/// Bar heights at full scale, hour tens first.
const BAR_HEIGHTS: [f32; 6] = [192.0, 320.0, 256.0, 160.0, 384.0, 448.0];
const BAR_WIDTH: f32 = 56.0;
const GAP: f32 = 32.0;
const PADDING: f32 = 16.0;

const TIME_SIZE: f32 = 60.0;
const DATE_SIZE: f32 = 20.0;
const NUMBER_SIZE: f32 = 14.0;
const NUMBER_STEP: f32 = 28.0;
const DISC_RADIUS: f32 = 16.0;
const DISC_TEXT_SIZE: f32 = 18.0;

const HEADER_HEIGHT: f32 = 128.0;
const FOOTER_HEIGHT: f32 = 96.0;

/// One vertical bar per clock digit, bottom-aligned, under the time and date.
#[derive(Debug, Default)]
pub struct BarsFace;

#[derive(Debug, Clone, PartialEq)]
pub struct BarsLayout {
    pub header_top: f32,
    pub bars: [Rect; 6],
    /// Top of the separator row below the bars.
    pub separator_y: f32,
}

impl BarsLayout {
    /// Shrinks every bar by the same factor when the viewport is too short.
    pub fn new(vp: Viewport) -> Self {
        let tallest = BAR_HEIGHTS.iter().copied().fold(0.0, f32::max);
        let room = vp.height - HEADER_HEIGHT - FOOTER_HEIGHT - 48.0;
        let scale = (room / tallest).clamp(0.35, 1.0);

        let block = HEADER_HEIGHT + tallest * scale + FOOTER_HEIGHT;
        let header_top = ((vp.height - block) / 2.0).max(16.0);
        let baseline = header_top + HEADER_HEIGHT + tallest * scale;

        let total_w = 6.0 * BAR_WIDTH + 5.0 * GAP;
        let left = (vp.width - total_w) / 2.0;
        let bars = std::array::from_fn(|i| {
            let h = BAR_HEIGHTS[i] * scale;
            Rect::new(left + i as f32 * (BAR_WIDTH + GAP), baseline - h, BAR_WIDTH, h)
        });
        Self { header_top, bars, separator_y: baseline + 24.0 }
    }
}

impl ClockFace for BarsFace {
    fn clear_color(&self) -> Color {
        slate(900, 1.0)
    }

    /// Slate-800 band through the middle, standing in for the vertical gradient.
    fn backdrop(&self, p: &mut Painter<'_>, vp: Viewport) {
        p.fill_rect(Rect::new(0.0, vp.height * 0.25, vp.width, vp.height * 0.5), slate(800, 0.5));
    }

    fn paint(&self, p: &mut Painter<'_>, vp: Viewport, tick: &Tick, pulses: &Pulses, now: Instant) {
        let layout = BarsLayout::new(vp);
        let cx = vp.width / 2.0;
        let top = layout.header_top;

        p.text_centered(&tick.reading.hms(), TIME_SIZE, white(1.0), Vec2::new(cx, top + 36.0));
        p.text_centered(&tick.reading.long_date(), DATE_SIZE, slate(300, 1.0), Vec2::new(cx, top + 88.0));

        let sliders = SliderDigit::from_tick(&tick.digits, &tick.changes);
        for (i, slider) in sliders.iter().enumerate() {
            paint_bar(p, layout.bars[i], slider, pulses.level(i, now));
        }

        paint_separators(p, cx, layout.separator_y);

        let status_y = layout.separator_y + 40.0;
        let label = "LIVE WALLPAPER ACTIVE";
        let w = p.measure(label, NUMBER_SIZE).x;
        p.fill_circle(Vec2::new(cx - w / 2.0 - 12.0, status_y), 4.0, green(400, 1.0));
        p.text_centered(label, NUMBER_SIZE, slate(400, 1.0), Vec2::new(cx, status_y));

        let offset = format!("UTC_OFFSET: {}", tick.reading.offset_label());
        let timezone = format!("TIMEZONE: {}", tick.reading.timezone);
        let captions = [
            ["SYSTEM_TIME: SYNCHRONIZED", "REFRESH_RATE: 1000ms"],
            ["MODE: WALLPAPER", "STATUS: RUNNING"],
            [offset.as_str(), timezone.as_str()],
            ["ENHANCED_CLOCK", "DIGITFALL"],
        ];
        corner_captions(p, vp, &captions, 12.0, 16.0, slate(500, 1.0));
    }
}

/// Digits below the current value stack upwards from the disc, larger ones
/// downwards; numbers that would leave the bar are not drawn.
fn paint_bar(p: &mut Painter<'_>, bar: Rect, slider: &SliderDigit, pulse: f32) {
    p.fill_rect(bar, slate(500, 1.0));
    p.fill_rect(bar.inset(6.0), slate(400, 0.35));
    if pulse > 0.0 {
        p.fill_rect(bar, white(0.15 * pulse));
    }

    let inner = bar.inset(PADDING);
    let disc = inner.center();
    let visible = |y: f32| y - NUMBER_SIZE / 2.0 >= inner.origin.y && y + NUMBER_SIZE / 2.0 <= inner.max().y;
    let number = slate(300, 0.6);

    for n in 0..slider.value {
        let y = disc.y - DISC_RADIUS - (slider.value - n) as f32 * NUMBER_STEP + NUMBER_STEP / 2.0;
        if visible(y) {
            p.text_centered(&n.to_string(), NUMBER_SIZE, number, Vec2::new(disc.x, y));
        }
    }
    for n in slider.value + 1..=slider.max.get() {
        let y = disc.y + DISC_RADIUS + (n - slider.value) as f32 * NUMBER_STEP - NUMBER_STEP / 2.0;
        if visible(y) {
            p.text_centered(&n.to_string(), NUMBER_SIZE, number, Vec2::new(disc.x, y));
        }
    }

    let radius = DISC_RADIUS * (1.0 + 0.1 * pulse);
    if pulse > 0.0 {
        p.fill_circle(disc, radius + 8.0 * pulse, white(0.5 * pulse));
    }
    p.fill_circle(disc, radius, white(1.0));
    p.text_centered(&slider.value.to_string(), DISC_TEXT_SIZE, slate(800, 1.0), disc);
}

/// Two short lines per digit pair with a dot between pairs.
fn paint_separators(p: &mut Painter<'_>, cx: f32, y: f32) {
    const DOT: f32 = 8.0;
    let total = 6.0 * BAR_WIDTH + 2.0 * DOT + 7.0 * GAP;
    let mut x = cx - total / 2.0;
    for i in 0..6 {
        p.fill_rect(Rect::new(x, y, BAR_WIDTH, 2.0), slate(500, 1.0));
        x += BAR_WIDTH + GAP;
        if i == 1 || i == 3 {
            p.fill_circle(Vec2::new(x + DOT / 2.0, y + 1.0), DOT / 2.0, slate(400, 1.0));
            x += DOT + GAP;
        }
    }
}
