use clap::{Parser, ValueEnum};

/// Which wallpaper to show.
#[derive(Debug, Copy, Clone, Eq, PartialEq, ValueEnum)]
pub enum Variant {
    /// Grey digit rain with fading trails.
    Rain,
    /// Six fixed columns of known digit sequences on black.
    Exact,
    /// Dense green rain behind a digital clock.
    Matrix,
    /// One slider per clock digit.
    Sliding,
    /// One vertical bar per clock digit.
    Bars,
}

impl Variant {
    pub fn title(self) -> &'static str {
        match self {
            Variant::Rain => "digitfall: rain",
            Variant::Exact => "digitfall: exact",
            Variant::Matrix => "digitfall: matrix",
            Variant::Sliding => "digitfall: sliding time",
            Variant::Bars => "digitfall: bars",
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "digitfall")]
#[command(about = "digitfall: live clock wallpapers")]
#[command(version)]
pub struct Cli {
    /// Wallpaper to run
    #[arg(long, value_enum, default_value_t = Variant::Rain)]
    pub variant: Variant,

    /// Initial window size in logical pixels, e.g. 1280x720
    #[arg(long, default_value = "1280x720", value_parser = parse_size)]
    pub size: (f64, f64),

    /// Borderless fullscreen instead of a window
    #[arg(long)]
    pub fullscreen: bool,
}

/// Parses `WIDTHxHEIGHT` with both sides positive.
pub fn parse_size(s: &str) -> Result<(f64, f64), String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got `{s}`"))?;
    let parse = |v: &str| -> Result<f64, String> {
        let n: f64 = v.trim().parse().map_err(|_| format!("`{v}` is not a number"))?;
        if n.is_finite() && n > 0.0 { Ok(n) } else { Err(format!("`{v}` must be positive")) }
    };
    Ok((parse(w)?, parse(h)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_sizes() {
        assert_eq!(parse_size("1280x720"), Ok((1280.0, 720.0)));
        assert_eq!(parse_size("800X600"), Ok((800.0, 600.0)));
    }

    #[test]
    fn rejects_bad_sizes() {
        assert!(parse_size("1280").is_err());
        assert!(parse_size("0x720").is_err());
        assert!(parse_size("wide x tall").is_err());
    }

    #[test]
    fn variant_flag() {
        let cli = Cli::try_parse_from(["digitfall", "--variant", "bars", "--size", "640x480"]).unwrap();
        assert_eq!(cli.variant, Variant::Bars);
        assert_eq!(cli.size, (640.0, 480.0));
        assert!(!cli.fullscreen);

        let cli = Cli::try_parse_from(["digitfall"]).unwrap();
        assert_eq!(cli.variant, Variant::Rain);
    }
}
