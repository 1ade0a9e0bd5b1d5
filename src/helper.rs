use crate::error::Error;
use crate::qrcode::{self, QrMatrix};

use image::{ImageBuffer, ImageFormat, Rgba, RgbaImage};
use std::fs;
use std::io::Cursor;
use std::path::Path;

/*---- Utilities ----*/

/// Colors for raster output.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RasterStyle {
	pub fill: Rgba<u8>,
	pub back: Rgba<u8>,
}

impl Default for RasterStyle {
	fn default() -> Self {
		Self {
			fill: Rgba([0x2d, 0x37, 0x48, 255]),
			back: Rgba([255, 255, 255, 255]),
		}
	}
}

// Returns a string of SVG code for an image depicting the given QR Code, with the
// given number of border modules. The whole symbol is a single path with one
// square subpath per dark module, so it imports as one shape. Physical size is
// given in millimetres at a tenth of the box size per module.
// The string always uses Unix newlines (\n), regardless of the platform.
// Fails with Error::InvalidSettings if the border is wider than qrcode::MAX_BORDER.
pub fn to_svg_string(qr: &QrMatrix, border: u32, box_size: u32) -> Result<String, Error> {
	let dimension = qrcode::module_side(qr.width(), border)?;
	let border = border as i32;
	let physical = dimension as f64 * f64::from(box_size) / 10.0;
	let mut result = String::new();
	result += "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n";
	result += &format!(
		"<svg xmlns=\"http://www.w3.org/2000/svg\" version=\"1.1\" width=\"{1}mm\" height=\"{1}mm\" viewBox=\"0 0 {0} {0}\" stroke=\"none\">\n",
		dimension, physical);
	result += "\t<path id=\"qr-path\" d=\"";
	let mut first = true;
	for y in 0 .. qr.width() {
		for x in 0 .. qr.width() {
			if qr.get_module(x, y) {
				if !first {
					result += " ";
				}
				first = false;
				result += &format!("M{},{}h1v1h-1z", x + border, y + border);
			}
		}
	}
	result += "\" fill=\"#000000\" fill-rule=\"nonzero\"/>\n";
	result += "</svg>\n";
	Ok(result)
}

/// Rasterizes a QR Code into an RGBA image buffer.
///
/// The image is `(width + 2 * border) * box_size` pixels square. Dark modules take the fill
/// color, the quiet zone and light modules take the back color.
///
/// # Errors
///
/// Returns `Error::InvalidSettings` if the border or box size is out of range, or the image
/// would exceed [`qrcode::MAX_RASTER_SIDE`] pixels.
///
/// # Example
///
/// ```
/// use ysqrcode::helper::{to_image_buffer, RasterStyle};
/// use ysqrcode::qrcode::{QrMatrix, QrSettings};
///
/// let qr = QrMatrix::encode("Hello, World!", &QrSettings::default()).unwrap();
/// let img = to_image_buffer(&qr, 4, 10, &RasterStyle::default()).unwrap();
/// assert_eq!(img.dimensions(), (410, 410));
/// ```
pub fn to_image_buffer(
	qr: &QrMatrix,
	border: u32,
	box_size: u32,
	style: &RasterStyle,
) -> Result<RgbaImage, Error> {
	let size = qrcode::raster_side(qr.width(), border, box_size)?;
	let border = border as i32;
	let mut img = ImageBuffer::new(size, size);

	for (x, y, pixel) in img.enumerate_pixels_mut() {
		let qr_x = (x / box_size) as i32 - border;
		let qr_y = (y / box_size) as i32 - border;
		*pixel = if qr.get_module(qr_x, qr_y) {
			style.fill
		} else {
			style.back
		};
	}

	Ok(img)
}

/// Encodes an image as PNG in memory.
///
/// # Errors
///
/// Returns an `Error::Image` if the encoder fails.
pub fn encode_png(img: &RgbaImage) -> Result<Vec<u8>, Error> {
	let mut buffer = Cursor::new(Vec::new());
	img.write_to(&mut buffer, ImageFormat::Png)?;
	Ok(buffer.into_inner())
}

/// Saves an image as PNG, creating the parent directory if it doesn't exist.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or the image cannot be written.
pub fn save_png(img: &RgbaImage, path: &Path) -> Result<(), Error> {
	ensure_parent_dir(path)?;
	img.save_with_format(path, ImageFormat::Png)?;
	Ok(())
}

/// Writes text to a file, creating the parent directory if it doesn't exist.
pub fn save_text(text: &str, path: &Path) -> Result<(), Error> {
	ensure_parent_dir(path)?;
	fs::write(path, text)?;
	Ok(())
}

fn ensure_parent_dir(path: &Path) -> Result<(), Error> {
	// Check if the directory exists, create it if it doesn't
	match path.parent() {
		Some(dir) if !dir.as_os_str().is_empty() && !dir.exists() => {
			fs::create_dir_all(dir).map_err(|source| Error::CreateDir {
				path: dir.to_path_buf(),
				source,
			})
		}
		_ => Ok(()),
	}
}
