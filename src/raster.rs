//! Raster generator: QR code as a PNG with the figure composited at the center.

use std::path::Path;

use image::RgbaImage;
use tracing::{debug, info};

use crate::compose::{self, Overlay};
use crate::error::Error;
use crate::figure::Figure;
use crate::helper::{self, RasterStyle};
use crate::qrcode::{QrMatrix, QrSettings};

/// The figure placed on top of the QR modules, and how large to make it.
#[derive(Clone, Copy, Debug)]
pub struct Decoration<'a> {
    pub figure: &'a Figure,
    pub overlay: Overlay,
}

/// Builds the raster QR code for `url` and composites the decoration on top of it. Without a
/// decoration the bare code is returned.
///
/// Pair a large figure ratio with a high error correction level: the figure erases every
/// module it covers.
pub fn generate_qr_with_figure(
    url: &str,
    settings: &QrSettings,
    style: &RasterStyle,
    decoration: Option<Decoration<'_>>,
) -> Result<RgbaImage, Error> {
    let qr = QrMatrix::encode(url, settings)?;
    let mut img = helper::to_image_buffer(&qr, settings.border, settings.box_size, style)?;
    debug!(
        version = qr.version().value(),
        width = img.width(),
        height = img.height(),
        "rasterized QR code"
    );

    if let Some(Decoration { figure, overlay }) = decoration {
        compose::composite(&mut img, figure, &overlay);
    }
    Ok(img)
}

/// Like [`generate_qr_with_figure`], then writes the result as PNG to `output`, creating
/// its parent directory if needed.
pub fn write_qr_with_figure(
    url: &str,
    settings: &QrSettings,
    style: &RasterStyle,
    decoration: Option<Decoration<'_>>,
    output: &Path,
) -> Result<RgbaImage, Error> {
    let img = generate_qr_with_figure(url, settings, style, decoration)?;
    helper::save_png(&img, output)?;
    info!(path = %output.display(), "saved PNG QR code");
    Ok(img)
}
