//! Named colours shared by the clock faces.

use digitfall_engine::paint::Color;

/// Slate ramp, `shade` in `300..=900` steps of 100. Unknown shades read as 500.
pub fn slate(shade: u16, alpha: f32) -> Color {
    let (r, g, b) = match shade {
        300 => (203, 213, 225),
        400 => (148, 163, 184),
        600 => (71, 85, 105),
        700 => (51, 65, 85),
        800 => (30, 41, 59),
        900 => (15, 23, 42),
        _ => (100, 116, 139),
    };
    Color::from_srgb_u8(r, g, b, alpha)
}

pub fn white(alpha: f32) -> Color {
    Color::from_srgb_u8(255, 255, 255, alpha)
}

pub fn green(shade: u16, alpha: f32) -> Color {
    let (r, g, b) = match shade {
        300 => (134, 239, 172),
        400 => (74, 222, 128),
        _ => (34, 197, 94),
    };
    Color::from_srgb_u8(r, g, b, alpha)
}

/// Accent of each slider panel, hour tens first.
pub fn digit_accent(index: usize) -> Color {
    let (r, g, b) = match index {
        0 => (96, 165, 250),
        1 => (59, 130, 246),
        2 => (74, 222, 128),
        3 => (34, 197, 94),
        4 => (251, 146, 60),
        _ => (239, 68, 68),
    };
    Color::from_srgb_u8(r, g, b, 1.0)
}

pub fn indigo_900(alpha: f32) -> Color {
    Color::from_srgb_u8(49, 46, 129, alpha)
}

pub fn purple_900(alpha: f32) -> Color {
    Color::from_srgb_u8(88, 28, 135, alpha)
}
