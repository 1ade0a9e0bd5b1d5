//! Writes the decorated PNG QR code.

use anyhow::{Context, Result};
use clap::Parser;
use ysqrcode::config::{init_tracing, QrArgs, RasterArgs};
use ysqrcode::figure::Figure;
use ysqrcode::raster::{write_qr_with_figure, Decoration};

/// Generate a QR code with a figure in the center
#[derive(Parser, Debug)]
#[command(name = "generate-qr", version, about)]
struct Cli {
    #[command(flatten)]
    qr: QrArgs,

    #[command(flatten)]
    raster: RasterArgs,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let url = cli.qr.url.as_str();
    let output = &cli.raster.output;
    let figure = Figure::totoro();
    let decoration = (!cli.raster.no_figure).then(|| Decoration {
        figure: &figure,
        overlay: cli.raster.overlay(),
    });

    println!("Generating QR code for: {url}");
    write_qr_with_figure(url, &cli.qr.settings(), &cli.raster.style(), decoration, output)
        .with_context(|| format!("failed to generate {}", output.display()))?;
    println!("QR code saved to: {}", output.display());
    println!("Done!");
    println!("\nThe QR code links to: {url}");
    println!("After pushing to GitHub and enabling GitHub Pages, the QR code will work!");

    Ok(())
}
