//! Command-line configuration shared by the two binaries.
//!
//! Every option has a default, so running a binary without arguments reproduces the
//! stock output for [`TARGET_URL`].

use std::path::PathBuf;

use clap::Args;
use image::Rgba;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::compose::Overlay;
use crate::helper::RasterStyle;
use crate::qrcode::{QrCodeEcc, QrSettings, Version, MAX_BORDER, MAX_BOX_SIZE};
use crate::TARGET_URL;

/// QR matrix options.
#[derive(Args, Debug, Clone)]
pub struct QrArgs {
    /// Text or URL to encode
    #[arg(long, default_value = TARGET_URL)]
    pub url: String,

    /// QR version (1-40); the minimum version unless --no-fit is given
    #[arg(long, default_value_t = 4, value_parser = parse_version)]
    pub qr_version: u8,

    /// Error correction level: L, M, Q or H
    #[arg(long, default_value = "H", value_parser = parse_ecc)]
    pub ecc: QrCodeEcc,

    /// Pixels per module
    #[arg(
        long,
        default_value_t = 10,
        value_parser = clap::value_parser!(u32).range(1..=i64::from(MAX_BOX_SIZE))
    )]
    pub box_size: u32,

    /// Quiet zone width in modules
    #[arg(
        long,
        default_value_t = 4,
        value_parser = clap::value_parser!(u32).range(0..=i64::from(MAX_BORDER))
    )]
    pub border: u32,

    /// Fail instead of growing the version when the data does not fit
    #[arg(long)]
    pub no_fit: bool,
}

impl QrArgs {
    pub fn settings(&self) -> QrSettings {
        QrSettings {
            version: Version::new(self.qr_version),
            ecc: self.ecc,
            box_size: self.box_size,
            border: self.border,
            fit: !self.no_fit,
        }
    }
}

/// Options of the PNG generator.
#[derive(Args, Debug, Clone)]
pub struct RasterArgs {
    /// Output PNG path
    #[arg(short, long, default_value = "images/qrcode-totoro.png")]
    pub output: PathBuf,

    /// Color of dark modules, as #rrggbb
    #[arg(long, default_value = "#2d3748", value_parser = parse_hex_color)]
    pub fill_color: Rgba<u8>,

    /// Color of light modules and the quiet zone, as #rrggbb
    #[arg(long, default_value = "#ffffff", value_parser = parse_hex_color)]
    pub back_color: Rgba<u8>,

    /// Figure side as a fraction of the QR code side
    #[arg(long, default_value_t = 0.28, value_parser = parse_ratio)]
    pub figure_ratio: f32,

    /// Render the bare QR code
    #[arg(long)]
    pub no_figure: bool,
}

impl RasterArgs {
    pub fn style(&self) -> RasterStyle {
        RasterStyle {
            fill: self.fill_color,
            back: self.back_color,
        }
    }

    pub fn overlay(&self) -> Overlay {
        Overlay {
            figure_ratio: self.figure_ratio,
            ..Overlay::default()
        }
    }
}

/// Options of the SVG generator.
#[derive(Args, Debug, Clone)]
pub struct VectorArgs {
    /// Output SVG path
    #[arg(short, long, default_value = "images/qrcode-3d.svg")]
    pub output: PathBuf,
}

fn parse_version(s: &str) -> Result<u8, String> {
    let ver: u8 = s.parse().map_err(|e| format!("{e}"))?;
    Version::checked(ver)
        .map(Version::value)
        .ok_or_else(|| format!("version must be between 1 and 40, got {ver}"))
}

fn parse_ecc(s: &str) -> Result<QrCodeEcc, String> {
    QrCodeEcc::from_letter(s).ok_or_else(|| format!("unknown error correction level `{s}`"))
}

fn parse_ratio(s: &str) -> Result<f32, String> {
    let ratio: f32 = s.parse().map_err(|e| format!("{e}"))?;
    if (0.0..=1.0).contains(&ratio) {
        Ok(ratio)
    } else {
        Err(format!("ratio must be between 0 and 1, got {ratio}"))
    }
}

/// Parses `#rrggbb` or `rrggbb` into an opaque color.
pub fn parse_hex_color(s: &str) -> Result<Rgba<u8>, String> {
    let hex = s.strip_prefix('#').unwrap_or(s);
    if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(format!("expected a color like #2d3748, got `{s}`"));
    }
    let channel = |i: usize| {
        u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| format!("invalid hex color `{s}`"))
    };
    Ok(Rgba([channel(0)?, channel(2)?, channel(4)?, 255]))
}

/// Installs the stderr log subscriber. `RUST_LOG` overrides the default filter.
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("warn,ysqrcode=info")),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser, Debug)]
    struct TestCli {
        #[command(flatten)]
        qr: QrArgs,
        #[command(flatten)]
        raster: RasterArgs,
    }

    #[test]
    fn test_defaults_match_stock_output() {
        let cli = TestCli::try_parse_from(["generate-qr"]).unwrap();

        assert_eq!(cli.qr.url, TARGET_URL);
        assert_eq!(cli.qr.settings(), QrSettings::default());
        assert_eq!(cli.raster.style(), RasterStyle::default());
        assert_eq!(cli.raster.overlay(), Overlay::default());
        assert_eq!(cli.raster.output, PathBuf::from("images/qrcode-totoro.png"));
        assert!(!cli.raster.no_figure);
    }

    #[test]
    fn test_overrides() {
        let cli = TestCli::try_parse_from([
            "generate-qr",
            "--url",
            "https://example.org/",
            "--qr-version",
            "6",
            "--ecc",
            "q",
            "--no-fit",
            "--fill-color",
            "000000",
            "--no-figure",
        ])
        .unwrap();
        let settings = cli.qr.settings();

        assert_eq!(settings.version, Version::new(6));
        assert_eq!(settings.ecc, QrCodeEcc::Quartile);
        assert!(!settings.fit);
        assert_eq!(cli.raster.fill_color, Rgba([0, 0, 0, 255]));
        assert!(cli.raster.no_figure);
    }

    #[test]
    fn test_accepts_limits() {
        let cli = TestCli::try_parse_from(["generate-qr", "--box-size", "100", "--border", "100"])
            .unwrap();
        assert_eq!(cli.qr.box_size, MAX_BOX_SIZE);
        assert_eq!(cli.qr.border, MAX_BORDER);
    }

    #[test]
    fn test_rejects_bad_values() {
        for args in [
            ["generate-qr", "--qr-version", "41"],
            ["generate-qr", "--qr-version", "0"],
            ["generate-qr", "--ecc", "x"],
            ["generate-qr", "--box-size", "0"],
            ["generate-qr", "--box-size", "101"],
            ["generate-qr", "--border", "101"],
            ["generate-qr", "--border", "2147483648"],
            ["generate-qr", "--figure-ratio", "1.5"],
            ["generate-qr", "--back-color", "#fff"],
        ] {
            assert!(TestCli::try_parse_from(args).is_err(), "{args:?}");
        }
    }

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#2d3748"), Ok(Rgba([0x2d, 0x37, 0x48, 255])));
        assert_eq!(parse_hex_color("FFFFFF"), Ok(Rgba([255, 255, 255, 255])));
        assert!(parse_hex_color("#zzzzzz").is_err());
        assert!(parse_hex_color("#ééé").is_err());
        assert!(parse_hex_color("#+1+2+3").is_err());
        assert!(parse_hex_color("-1-2-3").is_err());
    }
}
