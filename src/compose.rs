//! Placing the decorative figure on top of a rendered QR code.

use image::imageops;
use image::{Rgba, RgbaImage};
use tracing::debug;

use crate::draw;
use crate::figure::Figure;

/// Sizing of the center overlay relative to the QR image.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Overlay {
    /// Figure side as a fraction of the QR image side. Keep it small enough for the error
    /// correction level to recover the covered modules.
    pub figure_ratio: f32,
    /// Backing circle diameter as a multiple of the figure side.
    pub backing_ratio: f32,
}

impl Default for Overlay {
    fn default() -> Self {
        Self {
            figure_ratio: 0.28,
            backing_ratio: 1.15,
        }
    }
}

impl Overlay {
    pub fn figure_size(&self, qr_side: u32) -> u32 {
        (qr_side as f32 * self.figure_ratio) as u32
    }

    pub fn backing_size(&self, figure_size: u32) -> u32 {
        (figure_size as f32 * self.backing_ratio) as u32
    }
}

/// A transparent square with an opaque white disc filling it.
pub fn backing_circle(size: u32) -> RgbaImage {
    let mut img = RgbaImage::from_pixel(size, size, Rgba([255, 255, 255, 0]));
    let side = size as f32;
    draw::fill_ellipse(&mut img, [0.0, 0.0, side, side], Rgba([255, 255, 255, 255]));
    img
}

/// Top-left offset that centers an `inner` square inside an `outer` rectangle.
pub fn centered((outer_w, outer_h): (u32, u32), inner: u32) -> (i64, i64) {
    (
        (i64::from(outer_w) - i64::from(inner)) / 2,
        (i64::from(outer_h) - i64::from(inner)) / 2,
    )
}

/// Pastes the backing circle and then the rendered figure at the center of `qr`.
///
/// Both layers are alpha blended, so only the disc of the backing covers QR modules.
pub fn composite(qr: &mut RgbaImage, figure: &Figure, overlay: &Overlay) {
    let figure_size = overlay.figure_size(qr.width().min(qr.height()));
    if figure_size == 0 {
        return;
    }
    let backing_size = overlay.backing_size(figure_size);

    let backing = backing_circle(backing_size);
    let art = figure.render(figure_size);

    let pos_backing = centered(qr.dimensions(), backing_size);
    let pos_figure = centered(qr.dimensions(), figure_size);
    debug!(figure_size, backing_size, ?pos_backing, ?pos_figure, "compositing figure");

    imageops::overlay(qr, &backing, pos_backing.0, pos_backing.1);
    imageops::overlay(qr, &art, pos_figure.0, pos_figure.1);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sizes_for_default_raster() {
        let overlay = Overlay::default();
        let figure = overlay.figure_size(410);

        assert_eq!(figure, 114);
        assert_eq!(overlay.backing_size(figure), 131);
        assert_eq!(centered((410, 410), 131), (139, 139));
        assert_eq!(centered((410, 410), 114), (148, 148));
    }

    #[test]
    fn test_backing_circle_alpha() {
        let img = backing_circle(100);

        assert_eq!(img.get_pixel(0, 0)[3], 0);
        assert_eq!(img.get_pixel(99, 99)[3], 0);
        assert_eq!(*img.get_pixel(50, 50), Rgba([255, 255, 255, 255]));
        assert_eq!(*img.get_pixel(50, 1), Rgba([255, 255, 255, 255]));
    }

    #[test]
    fn test_figure_fits_backing() {
        let overlay = Overlay::default();
        let figure = Figure::totoro();
        for size in [20, 75, 150, 300] {
            let backing = overlay.backing_size(size);
            let (ox, oy) = centered((backing, backing), size);
            let [x0, y0, x1, y1] = figure.bounds(size);

            assert!(ox as f32 + x0 >= 0.0 && oy as f32 + y0 >= 0.0, "size {size}");
            assert!(ox as f32 + x1 <= backing as f32, "size {size}");
            assert!(oy as f32 + y1 <= backing as f32, "size {size}");
        }
    }

    #[test]
    fn test_composite_keeps_corners() {
        let mut qr = RgbaImage::from_pixel(400, 400, Rgba([0, 0, 0, 255]));
        composite(&mut qr, &Figure::totoro(), &Overlay::default());

        // Outside the backing disc nothing changes.
        assert_eq!(*qr.get_pixel(0, 0), Rgba([0, 0, 0, 255]));
        assert_eq!(*qr.get_pixel(136, 136), Rgba([0, 0, 0, 255]));
        // Inside the disc, left of the figure square, the backing shows through.
        assert_eq!(*qr.get_pixel(140, 200), Rgba([255, 255, 255, 255]));
    }

    #[test]
    fn test_zero_ratio_is_noop() {
        let mut qr = RgbaImage::from_pixel(50, 50, Rgba([0, 0, 0, 255]));
        let before = qr.clone();
        let overlay = Overlay { figure_ratio: 0.0, ..Overlay::default() };
        composite(&mut qr, &Figure::totoro(), &overlay);
        assert_eq!(qr, before);
    }
}
