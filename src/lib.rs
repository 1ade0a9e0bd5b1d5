//! # ysqrcode
//!
//! Generates the YanShu Restaurant QR code in two forms:
//!
//! - a PNG with a small decorative figure pasted at the center on a white disc, and
//! - an SVG made of one path, ready to be extruded in a 3D tool.
//!
//! Matrix construction (encoding, error correction, masking) comes from the
//! [`qrcode`](::qrcode) crate. This crate fixes the parameters, rasterizes the modules with
//! [`image`], draws the figure with [`imageproc`] and writes the files.
//!
//! ## Scannability
//!
//! The figure erases the modules it covers. With the defaults (error correction level High,
//! figure side at 28% of the code side) the covered area stays well inside what the error
//! correction can restore.
//!
//! ## Example
//!
//! Build the decorated PNG in memory:
//!
//! ```rust
//! use ysqrcode::compose::Overlay;
//! use ysqrcode::figure::Figure;
//! use ysqrcode::helper::RasterStyle;
//! use ysqrcode::qrcode::QrSettings;
//! use ysqrcode::raster::{generate_qr_with_figure, Decoration};
//!
//! let figure = Figure::totoro();
//! let img = generate_qr_with_figure(
//!     "https://example.org/",
//!     &QrSettings::default(),
//!     &RasterStyle::default(),
//!     Some(Decoration { figure: &figure, overlay: Overlay::default() }),
//! )
//! .unwrap();
//! assert_eq!(img.dimensions(), (410, 410));
//! ```
//!
//! Or the SVG markup:
//!
//! ```rust
//! use ysqrcode::qrcode::QrSettings;
//! use ysqrcode::vector::generate_qr_svg;
//!
//! let svg = generate_qr_svg("https://example.org/", &QrSettings::default()).unwrap();
//! assert!(svg.contains("<path"));
//! ```
//!
//! ## Modules
//!
//! - [`qrcode`]: QR matrix construction and settings.
//! - [`helper`]: Rasterizing, SVG markup and file output.
//! - [`draw`], [`figure`], [`compose`]: The center decoration.
//! - [`raster`], [`vector`]: The two generators.
//! - [`config`]: Command-line options and logging setup for the binaries.

pub mod compose;
pub mod config;
pub mod draw;
pub mod error;
pub mod figure;
pub mod helper;
pub mod qrcode;
pub mod raster;
pub mod vector;

pub use error::Error;

/// The page both generators encode.
pub const TARGET_URL: &str = "https://whdeacc.github.io/ysqrcode/";
