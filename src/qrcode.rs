#![forbid(unsafe_code)]
//! QR matrix construction.
//!
//! Data encoding, Reed-Solomon error correction and mask selection are done by the
//! [`qrcode`](::qrcode) crate. This module pins down the parameters the generators use
//! (version, error correction level, box size, border) and exposes the finished symbol as a
//! plain boolean grid that the renderers in [`helper`](crate::helper) read from.

use ::qrcode::types::QrError;
use ::qrcode::{Color, EcLevel};
use tracing::debug;

use crate::error::Error;

/// A finished QR Code symbol, as a square grid of dark and light modules.
///
/// The grid does not include the quiet zone; renderers add the border themselves.
///
/// # Example
///
/// ```rust
/// use ysqrcode::qrcode::{QrMatrix, QrSettings};
///
/// let qr = QrMatrix::encode("https://example.org/", &QrSettings::default()).unwrap();
/// assert_eq!(qr.version().value(), 4);
/// assert_eq!(qr.width(), 33);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QrMatrix {
    /// Side length in modules, equal to version * 4 + 17.
    width: i32,
    /// Row-major, `true` for dark.
    modules: Vec<bool>,
    version: Version,
    ecc: QrCodeEcc,
}

impl QrMatrix {
    /// Encodes `data` into a QR code using the given settings.
    ///
    /// With `settings.fit` set, `settings.version` is a lower bound and the smallest version
    /// that can hold the data is used. Otherwise the version is pinned and data that does not
    /// fit is reported as [`Error::DataTooLong`].
    ///
    /// # Errors
    ///
    /// * [`Error::EmptyData`] if `data` is empty.
    /// * [`Error::InvalidSettings`] if the box size or border is out of range, or the rendered
    ///   raster would be wider than [`MAX_RASTER_SIDE`].
    /// * [`Error::DataTooLong`] if no allowed version can hold the data.
    /// * [`Error::Encode`] for any other encoder failure.
    pub fn encode(data: &str, settings: &QrSettings) -> Result<Self, Error> {
        if data.is_empty() {
            return Err(Error::EmptyData);
        }
        settings.validate()?;

        let maxversion = if settings.fit { Version::MAX } else { settings.version };
        for ver in settings.version.value()..=maxversion.value() {
            let version = Version::new(ver);
            match ::qrcode::QrCode::with_version(data, version.into(), settings.ecc.into()) {
                Ok(code) => {
                    debug!(
                        requested = settings.version.value(),
                        resolved = ver,
                        ecc = ?settings.ecc,
                        "encoded {} bytes",
                        data.len()
                    );
                    let qr = Self::from_code(&code, version, settings.ecc);
                    raster_side(qr.width(), settings.border, settings.box_size)?;
                    return Ok(qr);
                }
                Err(QrError::DataTooLong) => continue,
                Err(err) => return Err(Error::Encode(err)),
            }
        }
        Err(Error::DataTooLong { version: maxversion, ecc: settings.ecc })
    }

    fn from_code(code: &::qrcode::QrCode, version: Version, ecc: QrCodeEcc) -> Self {
        let modules = code.to_colors().into_iter().map(|c| c == Color::Dark).collect();
        Self {
            width: code.width() as i32,
            modules,
            version,
            ecc,
        }
    }

    /// Returns this QR Code's version number.
    pub fn version(&self) -> Version {
        self.version
    }

    /// Returns the width and height of this QR Code in modules, between 21 and 177.
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Returns this QR Code's error correction level.
    pub fn ecc(&self) -> QrCodeEcc {
        self.ecc
    }

    /// Returns the color of the module at the given coordinates.
    ///
    /// Returns `true` for dark modules and `false` for light modules. Coordinates outside the QR
    /// code's bounds return `false`, so callers can iterate over the border freely.
    ///
    /// # Arguments
    ///
    /// * `x` - X-coordinate (0 is left).
    /// * `y` - Y-coordinate (0 is top).
    pub fn get_module(&self, x: i32, y: i32) -> bool {
        let range = 0..self.width;
        range.contains(&x) && range.contains(&y) && self.modules[(y * self.width + x) as usize]
    }

    /// Number of dark modules in the symbol.
    pub fn dark_modules(&self) -> usize {
        self.modules.iter().filter(|&&dark| dark).count()
    }
}

/// Parameters for building and rendering a QR code.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QrSettings {
    /// Requested version. A lower bound when `fit` is set.
    pub version: Version,
    pub ecc: QrCodeEcc,
    /// Pixels per module in raster output.
    pub box_size: u32,
    /// Quiet zone width, in modules.
    pub border: u32,
    /// Grow the version until the data fits.
    pub fit: bool,
}

impl Default for QrSettings {
    fn default() -> Self {
        Self {
            version: Version::new(4),
            ecc: QrCodeEcc::High,
            box_size: 10,
            border: 4,
            fit: true,
        }
    }
}

impl QrSettings {
    fn validate(&self) -> Result<(), Error> {
        check_border(self.border)?;
        check_box_size(self.box_size)
    }

    /// Side of the rendered symbol including the border on both sides, in modules.
    pub fn dimension(&self, width: i32) -> u32 {
        (width.max(0) as u32).saturating_add(self.border.saturating_mul(2))
    }
}

/// Widest quiet zone accepted, in modules.
pub const MAX_BORDER: u32 = 100;

/// Largest module size accepted, in pixels.
pub const MAX_BOX_SIZE: u32 = 100;

/// Largest raster side accepted, in pixels.
pub const MAX_RASTER_SIDE: u32 = 16_384;

fn check_border(border: u32) -> Result<(), Error> {
    if border > MAX_BORDER {
        return Err(Error::InvalidSettings(format!(
            "border must be at most {MAX_BORDER} modules, got {border}"
        )));
    }
    Ok(())
}

fn check_box_size(box_size: u32) -> Result<(), Error> {
    if !(1..=MAX_BOX_SIZE).contains(&box_size) {
        return Err(Error::InvalidSettings(format!(
            "box size must be between 1 and {MAX_BOX_SIZE} pixels, got {box_size}"
        )));
    }
    Ok(())
}

/// Side of the symbol in modules, border included, for a symbol `width` modules wide.
///
/// # Errors
///
/// Returns [`Error::InvalidSettings`] if the border is wider than [`MAX_BORDER`].
pub fn module_side(width: i32, border: u32) -> Result<u32, Error> {
    check_border(border)?;
    let width = u32::try_from(width)
        .map_err(|_| Error::InvalidSettings(format!("negative symbol width {width}")))?;
    // Both terms are bounded, so this cannot overflow.
    Ok(width + 2 * border)
}

/// Side of the rendered raster in pixels, `(width + 2 * border) * box_size`.
///
/// # Errors
///
/// Returns [`Error::InvalidSettings`] if the border or box size is out of range, or the
/// result exceeds [`MAX_RASTER_SIDE`].
pub fn raster_side(width: i32, border: u32, box_size: u32) -> Result<u32, Error> {
    check_box_size(box_size)?;
    module_side(width, border)?
        .checked_mul(box_size)
        .filter(|&side| side <= MAX_RASTER_SIDE)
        .ok_or_else(|| {
            Error::InvalidSettings(format!(
                "raster would exceed {MAX_RASTER_SIDE} px (width {width}, border {border}, box size {box_size})"
            ))
        })
}

/// Error correction level for a QR code.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub enum QrCodeEcc {
    /// Tolerates ~7% erroneous codewords.
    Low,
    /// Tolerates ~15% erroneous codewords.
    Medium,
    /// Tolerates ~25% erroneous codewords.
    Quartile,
    /// Tolerates ~30% erroneous codewords.
    High,
}

impl QrCodeEcc {
    /// Parses the usual one-letter names (`L`, `M`, `Q`, `H`), case-insensitively.
    pub fn from_letter(s: &str) -> Option<Self> {
        use QrCodeEcc::*;
        match s.to_ascii_uppercase().as_str() {
            "L" | "LOW" => Some(Low),
            "M" | "MEDIUM" => Some(Medium),
            "Q" | "QUARTILE" => Some(Quartile),
            "H" | "HIGH" => Some(High),
            _ => None,
        }
    }
}

impl From<QrCodeEcc> for EcLevel {
    fn from(ecc: QrCodeEcc) -> Self {
        use QrCodeEcc::*;
        match ecc {
            Low => EcLevel::L,
            Medium => EcLevel::M,
            Quartile => EcLevel::Q,
            High => EcLevel::H,
        }
    }
}

/// A version number, which is an integer in the range 1 to 40 (inclusive).
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub struct Version(u8);

impl Version {
    /// The minimum version number supported in the QR Code Model 2 standard.
    pub const MIN: Version = Version(1);

    /// The maximum version number supported in the QR Code Model 2 standard.
    pub const MAX: Version = Version(40);

    /// Creates a version object from the given number.
    ///
    /// # Panics
    ///
    /// Panics if the number is outside the range [1, 40].
    pub const fn new(ver: u8) -> Self {
        assert!(
            Version::MIN.value() <= ver && ver <= Version::MAX.value(),
            "Version number out of range"
        );
        Self(ver)
    }

    /// Like [`Version::new`], but returns `None` for numbers outside [1, 40].
    pub fn checked(ver: u8) -> Option<Self> {
        (Version::MIN.value()..=Version::MAX.value()).contains(&ver).then_some(Self(ver))
    }

    /// Returns the value, which is in the range [1, 40].
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Side length of a symbol of this version, in modules.
    pub const fn side_len(self) -> i32 {
        (self.0 as i32) * 4 + 17
    }
}

impl From<Version> for ::qrcode::Version {
    fn from(ver: Version) -> Self {
        ::qrcode::Version::Normal(i16::from(ver.value()))
    }
}
