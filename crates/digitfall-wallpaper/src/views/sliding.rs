use std::time::Instant;

use digitfall_core::clock::{DigitSlot, Tick};
use digitfall_core::slider::SliderDigit;
use digitfall_engine::coords::{Rect, Vec2, Viewport};
use digitfall_engine::paint::Color;

use super::clock::ClockFace;
use super::painter::{corner_captions, Painter};
use super::palette::{digit_accent, indigo_900, purple_900, slate, white};
use super::pulse::Pulses;

const TITLE_SIZE: f32 = 18.0;
const TIME_SIZE: f32 = 56.0;
const DATE_SIZE: f32 = 18.0;
const LABEL_SIZE: f32 = 13.0;
const NUMBER_SIZE: f32 = 22.0;
const CURRENT_SIZE: f32 = 28.0;
const DISC_RADIUS: f32 = 32.0;

const HEADER_HEIGHT: f32 = 170.0;
const LABEL_HEIGHT: f32 = 24.0;
const PANEL_HEIGHT: f32 = 72.0;
const CELL_HEIGHT: f32 = LABEL_HEIGHT + PANEL_HEIGHT + 12.0 + 2.0 * DISC_RADIUS;
const GAP: f32 = 32.0;

/// One slider per clock digit, in a three-by-two grid under a header.
#[derive(Debug, Default)]
pub struct SlidingFace;

/// Where each part of the face goes for a viewport.
#[derive(Debug, Clone, PartialEq)]
pub struct SlidingLayout {
    pub header_top: f32,
    /// Number-line panel of each digit, hour tens first.
    pub panels: [Rect; 6],
}

impl SlidingLayout {
    pub fn new(vp: Viewport) -> Self {
        let block = HEADER_HEIGHT + 2.0 * CELL_HEIGHT + GAP;
        let header_top = ((vp.height - block) / 2.0).max(16.0);
        let grid_w = (vp.width - 128.0).clamp(0.0, 1080.0);
        let grid = Rect::new((vp.width - grid_w) / 2.0, header_top + HEADER_HEIGHT, grid_w, 2.0 * CELL_HEIGHT + GAP);
        let cols = grid.columns(3, GAP);

        let panels = std::array::from_fn(|i| {
            let col = cols.get(i % 3).copied().unwrap_or_default();
            let top = grid.origin.y + (i / 3) as f32 * (CELL_HEIGHT + GAP) + LABEL_HEIGHT;
            Rect::new(col.origin.x, top, col.size.x, PANEL_HEIGHT)
        });
        Self { header_top, panels }
    }
}

impl ClockFace for SlidingFace {
    fn clear_color(&self) -> Color {
        slate(900, 1.0)
    }

    /// Soft glows at 20%/50%, 80%/50% and 50%/20%, built from stacked
    /// translucent discs.
    fn backdrop(&self, p: &mut Painter<'_>, vp: Viewport) {
        let reach = vp.width.max(vp.height) * 0.4;
        let glows = [
            (Vec2::new(vp.width * 0.2, vp.height * 0.5), indigo_900(1.0)),
            (Vec2::new(vp.width * 0.8, vp.height * 0.5), purple_900(1.0)),
            (Vec2::new(vp.width * 0.5, vp.height * 0.2), indigo_900(1.0)),
        ];
        for (center, color) in glows {
            for step in 0..5 {
                let r = reach * (1.0 - step as f32 * 0.18);
                p.fill_circle(center, r, color.faded(0.12));
            }
        }
    }

    fn paint(&self, p: &mut Painter<'_>, vp: Viewport, tick: &Tick, pulses: &Pulses, now: Instant) {
        let layout = SlidingLayout::new(vp);
        let cx = vp.width / 2.0;
        let top = layout.header_top;

        p.text_centered("SLIDING TIME", TITLE_SIZE, slate(400, 1.0), Vec2::new(cx, top + 16.0));
        p.text_centered(&tick.reading.hms(), TIME_SIZE, white(1.0), Vec2::new(cx, top + 72.0));
        p.text_centered(&tick.reading.long_date(), DATE_SIZE, slate(300, 1.0), Vec2::new(cx, top + 124.0));

        let sliders = SliderDigit::from_tick(&tick.digits, &tick.changes);
        for (i, (slot, slider)) in DigitSlot::ALL.iter().zip(sliders).enumerate() {
            paint_slider(p, layout.panels[i], slot.label(), &slider, digit_accent(i), pulses.level(i, now));
        }

        let timezone = format!("TIMEZONE: {}", tick.reading.timezone);
        let captions = [
            ["SYSTEM: ONLINE", "MODE: SLIDING"],
            ["REFRESH: 1000ms", "STATUS: OPTIMAL"],
            [timezone.as_str(), "ENHANCED_INTERFACE"],
            ["", "SLIDING_BARS_ACTIVE"],
        ];
        corner_captions(p, vp, &captions, 12.0, 24.0, slate(400, 0.7));
    }
}

/// Label, number line with moving bar and indicator, then the current digit
/// in a disc below the panel.
fn paint_slider(p: &mut Painter<'_>, panel: Rect, label: &str, slider: &SliderDigit, accent: Color, pulse: f32) {
    p.text(label, LABEL_SIZE, slate(400, 1.0), Vec2::new(panel.origin.x + 4.0, panel.origin.y - LABEL_HEIGHT + 4.0));

    p.framed_rect(panel, slate(800, 0.5), slate(600, 0.3), 1.0);
    if pulse > 0.0 {
        p.fill_rect(panel.inset(1.0), accent.faded(0.2 * pulse));
    }

    let track = panel.inset(24.0);
    let slots = slider.max.get() as f32 + 1.0;
    let row_y = panel.origin.y + PANEL_HEIGHT / 2.0 - 4.0;
    for n in slider.candidates() {
        let x = track.origin.x + (n as f32 + 0.5) * track.size.x / slots;
        let text = n.to_string();
        if n == slider.value {
            p.text_centered(&text, CURRENT_SIZE, accent, Vec2::new(x, row_y));
        } else {
            p.text_centered(&text, NUMBER_SIZE, slate(500, 1.0), Vec2::new(x, row_y));
        }
    }

    // Both markers are centred on their fraction of the track, kept inside the panel.
    let at = |fraction: f32| track.origin.x + fraction.clamp(0.0, 1.0) * track.size.x;
    let bar_w = slider.bar_width() * track.size.x;
    let bar_x = (at(slider.position()) - bar_w / 2.0)
        .min(panel.max().x - 4.0 - bar_w)
        .max(panel.origin.x + 4.0);
    p.fill_rect(Rect::new(bar_x, panel.max().y - 12.0, bar_w, 4.0), accent);
    p.fill_rect(Rect::new(at(slider.indicator_center()) - 1.0, panel.origin.y, 2.0, PANEL_HEIGHT), accent.faded(0.8));

    let disc = Vec2::new(panel.center().x, panel.max().y + 12.0 + DISC_RADIUS);
    let radius = DISC_RADIUS * (1.0 + 0.1 * pulse);
    if pulse > 0.0 {
        p.fill_circle(disc, radius + 10.0 * pulse, accent.faded(0.3 * pulse));
    }
    p.fill_circle(disc, radius, accent);
    p.text_centered(&slider.value.to_string(), CURRENT_SIZE, white(1.0), disc);
}

#[cfg(test)]
mod tests {
    use digitfall_core::clock::{detect, ClockReading, TimeDigits};
    use digitfall_engine::scene::{DrawCmd, DrawList};
    use digitfall_engine::text::{FontId, FontSystem};

    use super::*;

    fn tick(h: u32, m: u32, s: u32) -> Tick {
        let digits = TimeDigits::from_hms(h, m, s);
        Tick {
            digits,
            changes: detect(&TimeDigits::from_hms(h, m, s.saturating_sub(1)), &digits),
            reading: ClockReading {
                hour: h,
                minute: m,
                second: s,
                weekday: "Friday".into(),
                date: "October 16, 2026".into(),
                timezone: "Europe/Paris".into(),
                utc_offset_minutes: 120,
            },
        }
    }

    #[test]
    fn panels_fit_and_do_not_overlap() {
        let vp = Viewport::new(1280.0, 720.0);
        let layout = SlidingLayout::new(vp);
        for (i, a) in layout.panels.iter().enumerate() {
            assert!(a.origin.x >= 0.0 && a.max().x <= vp.width);
            assert!(a.max().y + 12.0 + 2.0 * DISC_RADIUS <= vp.height);
            for b in &layout.panels[i + 1..] {
                let apart = a.max().x <= b.origin.x || b.max().x <= a.origin.x || a.max().y <= b.origin.y || b.max().y <= a.origin.y;
                assert!(apart, "{a:?} overlaps {b:?}");
            }
        }
    }

    #[test]
    fn second_row_holds_minutes_and_seconds() {
        let layout = SlidingLayout::new(Viewport::new(1280.0, 900.0));
        assert_eq!(layout.panels[0].origin.y, layout.panels[2].origin.y);
        assert!(layout.panels[3].origin.y > layout.panels[2].origin.y);
        assert!(layout.panels[1].origin.x > layout.panels[0].origin.x);
    }

    #[test]
    fn paints_every_candidate_and_the_header() {
        let fonts = FontSystem::new();
        let mut list = DrawList::new();
        let mut p = Painter::new(&mut list, &fonts, FontId::default());
        let t0 = Instant::now();
        SlidingFace.paint(&mut p, Viewport::new(1280.0, 720.0), &tick(21, 47, 38), &Pulses::new(Default::default()), t0);

        let texts: Vec<&str> = list
            .iter()
            .filter_map(|c| match c {
                DrawCmd::Text(t) => Some(t.text.as_str()),
                _ => None,
            })
            .collect();
        assert!(texts.contains(&"21:47:38"));
        assert!(texts.contains(&"Friday, October 16, 2026"));
        assert!(texts.contains(&"TIMEZONE: Europe/Paris"));
        assert!(texts.contains(&"HOUR TENS"));
        // Six number lines: 3 + 10 + 6 + 10 + 6 + 10 candidates, plus six disc digits.
        let digits = texts.iter().filter(|t| t.len() == 1 && t.chars().all(|c| c.is_ascii_digit())).count();
        assert_eq!(digits, 45 + 6);
    }

    #[test]
    fn changed_digit_gets_a_glow() {
        let fonts = FontSystem::new();
        let t0 = Instant::now();
        let tick = tick(10, 20, 31);
        let mut pulses = Pulses::new(std::time::Duration::from_millis(500));

        let count_circles = |pulses: &Pulses| {
            let mut list = DrawList::new();
            let mut p = Painter::new(&mut list, &fonts, FontId::default());
            SlidingFace.paint(&mut p, Viewport::new(1280.0, 720.0), &tick, pulses, t0);
            list.iter().filter(|c| matches!(c, DrawCmd::Circle(_))).count()
        };

        assert_eq!(count_circles(&pulses), 6);
        pulses.trigger(&tick.changes, t0);
        assert_eq!(count_circles(&pulses), 7);
    }
}
