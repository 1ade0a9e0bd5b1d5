//! Vector generator: the QR matrix as a single SVG path, for extrusion in a 3D tool.

use std::path::Path;

use tracing::{debug, info};

use crate::error::Error;
use crate::helper;
use crate::qrcode::{QrMatrix, QrSettings};

/// Returns SVG markup for the QR code of `url`. No decoration is applied.
pub fn generate_qr_svg(url: &str, settings: &QrSettings) -> Result<String, Error> {
    let qr = QrMatrix::encode(url, settings)?;
    debug!(
        version = qr.version().value(),
        dimension = settings.dimension(qr.width()),
        dark_modules = qr.dark_modules(),
        "building SVG path"
    );
    helper::to_svg_string(&qr, settings.border, settings.box_size)
}

/// Like [`generate_qr_svg`], then writes the markup to `output`, creating its parent
/// directory if needed.
pub fn write_qr_svg(url: &str, settings: &QrSettings, output: &Path) -> Result<String, Error> {
    let svg = generate_qr_svg(url, settings)?;
    helper::save_text(&svg, output)?;
    info!(path = %output.display(), bytes = svg.len(), "saved SVG QR code");
    Ok(svg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TARGET_URL;

    #[test]
    fn test_svg_is_well_formed() {
        let svg = generate_qr_svg(TARGET_URL, &QrSettings::default()).unwrap();
        let tree = usvg::Tree::from_str(&svg, &usvg::Options::default()).unwrap();
        assert!(!tree.root().children().is_empty());
    }

    #[test]
    fn test_subpaths_follow_matrix() {
        let settings = QrSettings::default();
        let qr = QrMatrix::encode(TARGET_URL, &settings).unwrap();
        let svg = generate_qr_svg(TARGET_URL, &settings).unwrap();

        // Version 5 with a border of 4 modules on each side.
        assert!(svg.contains("viewBox=\"0 0 45 45\""));
        assert_eq!(svg.matches("h1v1h-1z").count(), qr.dark_modules());
    }

    #[test]
    fn test_border_shifts_viewbox() {
        let settings = QrSettings { border: 0, ..QrSettings::default() };
        let svg = generate_qr_svg("https://example.org/", &settings).unwrap();
        assert!(svg.contains("viewBox=\"0 0 33 33\""));
        assert!(svg.contains("M0,0h1v1h-1z"));
    }

    #[test]
    fn test_empty_url_rejected() {
        let err = generate_qr_svg("", &QrSettings::default()).unwrap_err();
        assert!(matches!(err, Error::EmptyData));
    }

    #[test]
    fn test_write_is_idempotent() {
        let dir = std::env::temp_dir().join(format!("ysqrcode-vector-{}", std::process::id()));
        let path = dir.join("images").join("qrcode-3d.svg");
        let _ = std::fs::remove_dir_all(&dir);

        let first = write_qr_svg(TARGET_URL, &QrSettings::default(), &path).unwrap();
        let on_disk = std::fs::read_to_string(&path).unwrap();
        let second = write_qr_svg(TARGET_URL, &QrSettings::default(), &path).unwrap();

        assert_eq!(first, on_disk);
        assert_eq!(first, second);
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_unwritable_output_is_an_error() {
        let dir = std::env::temp_dir().join(format!("ysqrcode-vector-blocked-{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        let blocker = dir.join("images");
        std::fs::write(&blocker, b"").unwrap();

        let err = write_qr_svg(TARGET_URL, &QrSettings::default(), &blocker.join("out").join("qrcode-3d.svg"))
            .unwrap_err();
        assert!(matches!(err, Error::CreateDir { .. } | Error::Io(_)), "{err:?}");
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_huge_border_is_an_error() {
        let settings = QrSettings { border: u32::MAX / 2 + 1, ..QrSettings::default() };
        let err = generate_qr_svg(TARGET_URL, &settings).unwrap_err();
        assert!(matches!(err, Error::InvalidSettings(_)));
    }
}
