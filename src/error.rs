use std::path::PathBuf;

use crate::qrcode::{QrCodeEcc, Version};

/// Errors produced while building or writing a QR code.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The data to encode was empty.
    #[error("refusing to encode empty data")]
    EmptyData,

    /// The data does not fit at the requested version and error correction level.
    #[error("data too long for version {} at {ecc:?} error correction", .version.value())]
    DataTooLong { version: Version, ecc: QrCodeEcc },

    /// Box size, border or the resulting raster size is out of range.
    #[error("invalid QR settings: {0}")]
    InvalidSettings(String),

    /// Any other failure reported by the QR encoder.
    #[error("QR encoding failed: {0}")]
    Encode(::qrcode::types::QrError),

    /// The parent directory of an output file could not be created.
    #[error("failed to create directory {}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Writing an output file failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// PNG encoding or writing failed.
    #[error(transparent)]
    Image(#[from] image::ImageError),
}
