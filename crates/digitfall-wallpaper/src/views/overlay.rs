use std::time::Instant;

use digitfall_core::clock::{ClockFeed, ClockReading, SystemClock};
use digitfall_engine::coords::{Rect, Vec2, Viewport};
use digitfall_engine::paint::Color;

use super::painter::{corner_captions, Captions, Painter};
use super::palette::green;
use crate::host::HostBridge;

const DIGIT_SIZE: f32 = 60.0;
const WEEKDAY_SIZE: f32 = 24.0;
const DATE_SIZE: f32 = 20.0;
const CAPTION_SIZE: f32 = 14.0;

const CAPTIONS: Captions<'static> = [
    ["MATRIX_SYSTEM_ONLINE", "STATUS: ACTIVE"],
    ["USER: NEO", "ACCESS: GRANTED"],
    ["REALITY.EXE", "LOADING..."],
    ["WAKE_UP_NEO", "FOLLOW_RABBIT"],
];

/// Digital clock drawn over the green rain, refreshed once a second.
#[derive(Debug)]
pub struct ClockOverlay {
    feed: ClockFeed<SystemClock>,
}

impl Default for ClockOverlay {
    fn default() -> Self {
        Self::new()
    }
}

impl ClockOverlay {
    pub fn new() -> Self {
        Self { feed: ClockFeed::new(SystemClock) }
    }

    pub fn mount(&mut self, now: Instant, host: &mut HostBridge<'_>) {
        self.feed.mount(now, host);
    }

    /// The rain redraws every frame, so a new tick only needs recording.
    pub fn wake(&mut self, now: Instant, host: &mut HostBridge<'_>) {
        self.feed.poll(now, host);
    }

    pub fn unmount(&mut self) {
        self.feed.unmount();
    }

    pub fn paint(&self, p: &mut Painter<'_>, vp: Viewport) {
        if let Some(tick) = self.feed.latest() {
            paint_clock(p, vp, &tick.reading);
        }
    }
}

/// `HH : MM : SS` in bordered panels, then weekday and date panels below,
/// all centred on the viewport; captions in the corners.
pub fn paint_clock(p: &mut Painter<'_>, vp: Viewport, reading: &ClockReading) {
    let text = green(400, 1.0);
    let border = green(500, 1.0);
    let fill = Color::BLACK.faded(0.8);

    let pairs = [reading.hour, reading.minute, reading.second].map(|v| format!("{v:02}"));
    let pad = Vec2::new(24.0, 16.0);
    let digit_w = p.measure("00", DIGIT_SIZE).x.max(DIGIT_SIZE * 1.2);
    let panel = Vec2::new(digit_w, DIGIT_SIZE * 1.2) + pad * 2.0;
    let colon_w = p.measure(":", DIGIT_SIZE).x.max(DIGIT_SIZE * 0.3) + 16.0;

    let total_w = 3.0 * panel.x + 2.0 * colon_w;
    let top = vp.height / 2.0 - panel.y;
    let mut x = (vp.width - total_w) / 2.0;
    for (i, pair) in pairs.iter().enumerate() {
        let rect = Rect::new(x, top, panel.x, panel.y);
        p.framed_rect(rect, fill, border, 2.0);
        p.text_centered(pair, DIGIT_SIZE, text, rect.center());
        x += panel.x;
        if i < 2 {
            p.text_centered(":", DIGIT_SIZE, text, Vec2::new(x + colon_w / 2.0, rect.center().y));
            x += colon_w;
        }
    }

    let mut y = top + panel.y + 32.0;
    for (label, size, fill_alpha) in [(&reading.weekday, WEEKDAY_SIZE, 0.6), (&reading.date, DATE_SIZE, 0.6)] {
        let w = p.measure(label, size).x.max(size * 6.0) + 2.0 * pad.x;
        let h = size * 1.2 + pad.y;
        let rect = Rect::new((vp.width - w) / 2.0, y, w, h);
        p.framed_rect(rect, Color::BLACK.faded(fill_alpha), green(500, 0.5), 1.0);
        p.text_centered(label, size, green(300, 1.0), rect.center());
        y += h + 12.0;
    }

    corner_captions(p, vp, &CAPTIONS, CAPTION_SIZE, 24.0, green(400, 0.6));
}

#[cfg(test)]
mod tests {
    use digitfall_engine::scene::{DrawCmd, DrawList};
    use digitfall_engine::text::{FontId, FontSystem};

    use super::*;

    fn reading() -> ClockReading {
        ClockReading {
            hour: 9,
            minute: 5,
            second: 7,
            weekday: "Friday".into(),
            date: "October 16, 2026".into(),
            timezone: "UTC".into(),
            utc_offset_minutes: 0,
        }
    }

    #[test]
    fn clock_text_is_zero_padded_and_complete() {
        let fonts = FontSystem::new();
        let mut list = DrawList::new();
        let mut p = Painter::new(&mut list, &fonts, FontId::default());
        paint_clock(&mut p, Viewport::new(1280.0, 720.0), &reading());

        let texts: Vec<&str> = list
            .iter()
            .filter_map(|c| match c {
                DrawCmd::Text(t) => Some(t.text.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(&texts[..5], &["09", ":", "05", ":", "07"]);
        assert!(texts.contains(&"Friday"));
        assert!(texts.contains(&"October 16, 2026"));
        assert!(texts.contains(&"WAKE_UP_NEO"));
    }

    #[test]
    fn panels_are_centred() {
        let fonts = FontSystem::new();
        let mut list = DrawList::new();
        let mut p = Painter::new(&mut list, &fonts, FontId::default());
        let vp = Viewport::new(1000.0, 600.0);
        paint_clock(&mut p, vp, &reading());

        let rects: Vec<Rect> = list
            .iter()
            .filter_map(|c| match c {
                DrawCmd::Rect(r) => Some(r.rect),
                _ => None,
            })
            .collect();
        // Outer frames of the three digit panels.
        let (first, last) = (rects[0], rects[4]);
        let left = first.origin.x;
        let right = vp.width - last.max().x;
        assert!((left - right).abs() < 1e-3);
    }
}
