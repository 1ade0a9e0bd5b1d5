//! Filled and stroked primitives on RGBA canvases.
//!
//! Shapes are given in floating point pixel coordinates and rounded on the way to
//! [`imageproc::drawing`]. Ellipses take a bounding box `[x0, y0, x1, y1]`. Anything falling
//! outside the canvas is clipped.

use image::{Rgba, RgbaImage};
use imageproc::drawing::{draw_filled_ellipse_mut, draw_line_segment_mut, draw_polygon_mut};
use imageproc::point::Point;

/// Axis-aligned bounding box, `[x0, y0, x1, y1]`.
pub type Rect = [f32; 4];

/// Segments used to approximate an arc.
const ARC_STEPS: usize = 32;

/// Fills the ellipse inscribed in `bbox`.
pub fn fill_ellipse(img: &mut RgbaImage, bbox: Rect, color: Rgba<u8>) {
    let [x0, y0, x1, y1] = bbox;
    let center = (((x0 + x1) / 2.0).round() as i32, ((y0 + y1) / 2.0).round() as i32);
    let rx = ((x1 - x0) / 2.0).round() as i32;
    let ry = ((y1 - y0) / 2.0).round() as i32;
    if rx < 0 || ry < 0 {
        return;
    }
    draw_filled_ellipse_mut(img, center, rx, ry, color);
}

/// Fills the ellipse inscribed in `bbox` and strokes an outline of `width` pixels just
/// inside its edge. A zero width draws no outline.
pub fn outlined_ellipse(
    img: &mut RgbaImage,
    bbox: Rect,
    fill: Rgba<u8>,
    outline: Rgba<u8>,
    width: u32,
) {
    if width == 0 {
        fill_ellipse(img, bbox, fill);
        return;
    }
    let w = width as f32;
    let [x0, y0, x1, y1] = bbox;
    fill_ellipse(img, bbox, outline);
    fill_ellipse(img, [x0 + w, y0 + w, x1 - w, y1 - w], fill);
}

/// Fills a polygon. The outline is closed implicitly.
pub fn fill_polygon(img: &mut RgbaImage, points: &[(f32, f32)], color: Rgba<u8>) {
    let mut poly: Vec<Point<i32>> = points
        .iter()
        .map(|&(x, y)| Point::new(x.round() as i32, y.round() as i32))
        .collect();
    poly.dedup();
    // imageproc rejects an explicitly closed outline.
    while poly.len() > 1 && poly.first() == poly.last() {
        poly.pop();
    }
    match poly.len() {
        0 => {}
        1 => img_put(img, poly[0].x, poly[0].y, color),
        2 => draw_line_segment_mut(
            img,
            (poly[0].x as f32, poly[0].y as f32),
            (poly[1].x as f32, poly[1].y as f32),
            color,
        ),
        _ => draw_polygon_mut(img, &poly, color),
    }
}

/// Draws a straight line `width` pixels thick. Widths below 2 draw a 1-pixel line.
pub fn line(img: &mut RgbaImage, from: (f32, f32), to: (f32, f32), color: Rgba<u8>, width: u32) {
    let (dx, dy) = (to.0 - from.0, to.1 - from.1);
    let len = (dx * dx + dy * dy).sqrt();
    if width < 2 || len == 0.0 {
        draw_line_segment_mut(img, from, to, color);
        return;
    }
    let half = width as f32 / 2.0;
    let (nx, ny) = (-dy / len * half, dx / len * half);
    fill_polygon(
        img,
        &[
            (from.0 + nx, from.1 + ny),
            (to.0 + nx, to.1 + ny),
            (to.0 - nx, to.1 - ny),
            (from.0 - nx, from.1 - ny),
        ],
        color,
    );
}

/// Strokes the part of the ellipse inscribed in `bbox` between `start` and `end` degrees.
///
/// Angles start at 3 o'clock and grow clockwise on screen, so `0..180` is the lower half.
pub fn arc(img: &mut RgbaImage, bbox: Rect, start: f32, end: f32, color: Rgba<u8>, width: u32) {
    let [x0, y0, x1, y1] = bbox;
    let (cx, cy) = ((x0 + x1) / 2.0, (y0 + y1) / 2.0);
    let (rx, ry) = ((x1 - x0) / 2.0, (y1 - y0) / 2.0);
    let point = |deg: f32| {
        let t = deg.to_radians();
        (cx + rx * t.cos(), cy + ry * t.sin())
    };
    let step = (end - start) / ARC_STEPS as f32;
    for i in 0..ARC_STEPS {
        let a = start + step * i as f32;
        line(img, point(a), point(a + step), color, width);
    }
}

fn img_put(img: &mut RgbaImage, x: i32, y: i32, color: Rgba<u8>) {
    if x >= 0 && y >= 0 && (x as u32) < img.width() && (y as u32) < img.height() {
        img.put_pixel(x as u32, y as u32, color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
    const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);
    const BLUE: Rgba<u8> = Rgba([0, 0, 255, 255]);

    fn canvas() -> RgbaImage {
        RgbaImage::from_pixel(100, 100, WHITE)
    }

    #[test]
    fn test_fill_ellipse_stays_in_bbox() {
        let mut img = canvas();
        fill_ellipse(&mut img, [20.0, 30.0, 80.0, 70.0], RED);

        assert_eq!(*img.get_pixel(50, 50), RED);
        assert_eq!(*img.get_pixel(10, 50), WHITE);
        assert_eq!(*img.get_pixel(50, 20), WHITE);
        // Corners of the box are outside the ellipse.
        assert_eq!(*img.get_pixel(21, 31), WHITE);
    }

    #[test]
    fn test_outlined_ellipse() {
        let mut img = canvas();
        outlined_ellipse(&mut img, [10.0, 10.0, 90.0, 90.0], WHITE, BLUE, 4);

        assert_eq!(*img.get_pixel(50, 50), WHITE);
        assert_eq!(*img.get_pixel(50, 11), BLUE);
        assert_eq!(*img.get_pixel(11, 50), BLUE);
    }

    #[test]
    fn test_fill_polygon_triangle() {
        let mut img = canvas();
        fill_polygon(&mut img, &[(10.0, 10.0), (90.0, 10.0), (50.0, 90.0)], RED);

        assert_eq!(*img.get_pixel(50, 30), RED);
        assert_eq!(*img.get_pixel(15, 80), WHITE);
    }

    #[test]
    fn test_fill_polygon_degenerate() {
        let mut img = canvas();
        fill_polygon(&mut img, &[(5.2, 5.2), (5.0, 5.0), (4.9, 5.1)], RED);
        assert_eq!(*img.get_pixel(5, 5), RED);

        // Explicitly closed outlines are accepted.
        fill_polygon(&mut img, &[(60.0, 60.0), (80.0, 60.0), (70.0, 80.0), (60.0, 60.0)], BLUE);
        assert_eq!(*img.get_pixel(70, 65), BLUE);

        fill_polygon(&mut img, &[], BLUE);
    }

    #[test]
    fn test_thick_line() {
        let mut img = canvas();
        line(&mut img, (10.0, 50.0), (90.0, 50.0), RED, 6);

        assert_eq!(*img.get_pixel(50, 48), RED);
        assert_eq!(*img.get_pixel(50, 52), RED);
        assert_eq!(*img.get_pixel(50, 40), WHITE);
    }

    #[test]
    fn test_arc_lower_half() {
        let mut img = canvas();
        arc(&mut img, [20.0, 20.0, 80.0, 80.0], 0.0, 180.0, RED, 3);

        // Bottom of the circle is stroked, top is not.
        assert_eq!(*img.get_pixel(50, 79), RED);
        assert_eq!(*img.get_pixel(50, 21), WHITE);
    }

    #[test]
    fn test_clips_outside_canvas() {
        let mut img = canvas();
        fill_ellipse(&mut img, [-50.0, -50.0, 50.0, 50.0], RED);
        line(&mut img, (-10.0, -10.0), (200.0, 200.0), BLUE, 4);
        fill_polygon(&mut img, &[(-5.0, 99.0), (150.0, 99.0), (150.0, 150.0)], BLUE);

        assert_eq!(*img.get_pixel(0, 0), BLUE);
        assert_eq!(*img.get_pixel(99, 0), WHITE);
    }
}
