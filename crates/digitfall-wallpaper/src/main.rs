mod app;
mod cli;
mod font;
mod host;
mod surface;
mod views;

use anyhow::{Context, Result};
use clap::Parser;
use digitfall_engine::device::GpuInit;
use digitfall_engine::logging::{init_logging, LoggingConfig};
use digitfall_engine::text::FontSystem;
use digitfall_engine::window::{Runtime, RuntimeConfig};
use winit::dpi::LogicalSize;

use crate::app::WallpaperApp;
use crate::cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(LoggingConfig::default());

    let mut fonts = FontSystem::new();
    let font = font::load_font(&mut fonts)?;
    let view = views::build(cli.variant, &fonts, font).with_context(|| format!("building {:?} view", cli.variant))?;
    log::info!("starting {:?} wallpaper", cli.variant);

    let (width, height) = cli.size;
    let config = RuntimeConfig {
        title: cli.variant.title().to_string(),
        initial_size: LogicalSize::new(width, height),
        fullscreen: cli.fullscreen,
    };
    Runtime::run(config, GpuInit::default(), WallpaperApp::new(fonts, view))
}
