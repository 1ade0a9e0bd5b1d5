//! Writes the path-only SVG QR code.

use anyhow::{Context, Result};
use clap::Parser;
use ysqrcode::config::{init_tracing, QrArgs, VectorArgs};
use ysqrcode::vector::write_qr_svg;

/// Generate a QR code as a single-path SVG for 3D extrusion
#[derive(Parser, Debug)]
#[command(name = "generate-qr-svg", version, about)]
struct Cli {
    #[command(flatten)]
    qr: QrArgs,

    #[command(flatten)]
    vector: VectorArgs,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let url = cli.qr.url.as_str();
    let output = &cli.vector.output;

    println!("Generating SVG QR code for: {url}");
    write_qr_svg(url, &cli.qr.settings(), output)
        .with_context(|| format!("failed to generate {}", output.display()))?;
    println!("SVG QR code saved to: {}", output.display());
    println!("Done!");
    println!("\nImport this SVG into Blender for 3D extrusion.");

    Ok(())
}
