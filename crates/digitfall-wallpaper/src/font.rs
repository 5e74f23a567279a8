use anyhow::Result;
use digitfall_engine::text::{FontId, FontSystem};

/// Monospace faces first so rain columns line up; proportional fallbacks after.
const FONT_PATHS: &[&str] = &[
    "/usr/share/fonts/TTF/DejaVuSansMono.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSansMono.ttf",
    "/usr/share/fonts/dejavu/DejaVuSansMono.ttf",
    "/usr/share/fonts/liberation/LiberationMono-Regular.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationMono-Regular.ttf",
    "/usr/share/fonts/noto/NotoSansMono-Regular.ttf",
    "/usr/share/fonts/truetype/noto/NotoSansMono-Regular.ttf",
    "/System/Library/Fonts/Menlo.ttc",
    "C:\\Windows\\Fonts\\consola.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
];

/// Loads the first readable, parseable font from `DIGITFALL_FONT` or the
/// usual system locations.
pub fn load_font(fonts: &mut FontSystem) -> Result<FontId> {
    let from_env = std::env::var("DIGITFALL_FONT").ok();
    let candidates = from_env.iter().map(String::as_str).chain(FONT_PATHS.iter().copied());

    for path in candidates {
        let Ok(bytes) = std::fs::read(path) else { continue };
        match fonts.load_font(&bytes) {
            Ok(id) => {
                log::info!("font: {path}");
                return Ok(id);
            }
            Err(e) => log::warn!("font {path}: {e}"),
        }
    }
    anyhow::bail!("no usable font found; set DIGITFALL_FONT to a .ttf file")
}
