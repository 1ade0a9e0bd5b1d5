//! The decorative figure drawn at the center of the raster QR code.
//!
//! A [`Figure`] is a list of shapes laid out on a 150 × 150 design grid. Rendering scales every
//! coordinate (and every stroke width) by `size / 150`, so the same table serves any output
//! size. The geometry is an asset: swap the table and nothing else changes, as long as the
//! shapes stay inside the design grid.

use image::{Rgba, RgbaImage};

use crate::draw::{self, Rect};

/// Side of the design grid the shape coordinates are written against.
pub const DESIGN_SIZE: f32 = 150.0;

const BODY: Rgba<u8> = Rgba([140, 150, 160, 255]);
const BELLY: Rgba<u8> = Rgba([230, 230, 220, 255]);
const NOSE: Rgba<u8> = Rgba([60, 60, 60, 255]);
const EYE_WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
const EYE_BLACK: Rgba<u8> = Rgba([30, 30, 30, 255]);
const WHISKER: Rgba<u8> = Rgba([80, 80, 80, 255]);
const EAR_INNER: Rgba<u8> = Rgba([220, 180, 180, 255]);
const BACKGROUND: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// A single drawing step, in design units.
#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    Ellipse {
        bbox: Rect,
        fill: Rgba<u8>,
        /// Outline color and width, drawn inside the box.
        outline: Option<(Rgba<u8>, f32)>,
    },
    Polygon {
        points: Vec<(f32, f32)>,
        fill: Rgba<u8>,
    },
    Line {
        from: (f32, f32),
        to: (f32, f32),
        color: Rgba<u8>,
        width: f32,
    },
    Arc {
        bbox: Rect,
        start: f32,
        end: f32,
        color: Rgba<u8>,
        width: f32,
    },
}

impl Shape {
    fn draw(&self, img: &mut RgbaImage, s: f32) {
        match self {
            Shape::Ellipse { bbox, fill, outline: None } => {
                draw::fill_ellipse(img, scale_rect(bbox, s), *fill);
            }
            Shape::Ellipse { bbox, fill, outline: Some((color, width)) } => {
                draw::outlined_ellipse(img, scale_rect(bbox, s), *fill, *color, stroke(*width, s));
            }
            Shape::Polygon { points, fill } => {
                let scaled: Vec<_> = points.iter().map(|&p| scale_point(p, s)).collect();
                draw::fill_polygon(img, &scaled, *fill);
            }
            Shape::Line { from, to, color, width } => {
                draw::line(img, scale_point(*from, s), scale_point(*to, s), *color, stroke(*width, s));
            }
            Shape::Arc { bbox, start, end, color, width } => {
                draw::arc(img, scale_rect(bbox, s), *start, *end, *color, stroke(*width, s));
            }
        }
    }

    /// Extent of the shape once scaled by `s`, including half of any stroke.
    fn bounds(&self, s: f32) -> Rect {
        match self {
            Shape::Ellipse { bbox, .. } => scale_rect(bbox, s),
            Shape::Polygon { points, .. } => {
                points.iter().fold(EMPTY, |acc, &p| {
                    let (x, y) = scale_point(p, s);
                    union(acc, [x, y, x, y])
                })
            }
            Shape::Line { from, to, width, .. } => {
                let (a, b) = (scale_point(*from, s), scale_point(*to, s));
                let half = stroke(*width, s).max(1) as f32 / 2.0;
                [
                    a.0.min(b.0) - half,
                    a.1.min(b.1) - half,
                    a.0.max(b.0) + half,
                    a.1.max(b.1) + half,
                ]
            }
            Shape::Arc { bbox, width, .. } => {
                let half = stroke(*width, s).max(1) as f32 / 2.0;
                let [x0, y0, x1, y1] = scale_rect(bbox, s);
                [x0 - half, y0 - half, x1 + half, y1 + half]
            }
        }
    }
}

const EMPTY: Rect = [f32::INFINITY, f32::INFINITY, f32::NEG_INFINITY, f32::NEG_INFINITY];

fn union(a: Rect, b: Rect) -> Rect {
    [a[0].min(b[0]), a[1].min(b[1]), a[2].max(b[2]), a[3].max(b[3])]
}

fn scale_point((x, y): (f32, f32), s: f32) -> (f32, f32) {
    (x * s, y * s)
}

fn scale_rect(r: &Rect, s: f32) -> Rect {
    [r[0] * s, r[1] * s, r[2] * s, r[3] * s]
}

// Stroke widths truncate like the integer widths of the drawing surface.
fn stroke(width: f32, s: f32) -> u32 {
    (width * s) as u32
}

/// An ordered list of shapes on the design grid.
#[derive(Clone, Debug, PartialEq)]
pub struct Figure {
    shapes: Vec<Shape>,
}

impl Figure {
    pub fn new(shapes: Vec<Shape>) -> Self {
        Self { shapes }
    }

    /// The gray forest spirit: round body, pointed ears, cream belly with chevrons, big eyes,
    /// whiskers and a smile.
    pub fn totoro() -> Self {
        let mut shapes = vec![
            // Body
            ellipse([20.0, 25.0, 130.0, 140.0], BODY),
            // Ears
            polygon(&[(35.0, 35.0), (25.0, 5.0), (55.0, 25.0)], BODY),
            polygon(&[(115.0, 35.0), (125.0, 5.0), (95.0, 25.0)], BODY),
            polygon(&[(38.0, 30.0), (32.0, 12.0), (50.0, 25.0)], EAR_INNER),
            polygon(&[(112.0, 30.0), (118.0, 12.0), (100.0, 25.0)], EAR_INNER),
            // Belly
            ellipse([35.0, 55.0, 115.0, 130.0], BELLY),
        ];

        // Chevron markings, three rows of four.
        let (w, h) = (8.0, 6.0);
        for y in [70.0, 85.0, 100.0] {
            for x in [50.0, 65.0, 80.0, 95.0] {
                shapes.push(polygon(&[(x, y), (x + w / 2.0, y + h), (x + w, y)], BODY));
            }
        }

        for (eye, pupil, highlight) in [
            ([40.0, 40.0, 65.0, 65.0], [48.0, 45.0, 60.0, 58.0], [52.0, 48.0, 56.0, 52.0]),
            ([85.0, 40.0, 110.0, 65.0], [90.0, 45.0, 102.0, 58.0], [94.0, 48.0, 98.0, 52.0]),
        ] {
            shapes.push(Shape::Ellipse { bbox: eye, fill: EYE_WHITE, outline: Some((NOSE, 2.0)) });
            shapes.push(ellipse(pupil, EYE_BLACK));
            shapes.push(ellipse(highlight, EYE_WHITE));
        }

        shapes.push(ellipse([68.0, 55.0, 82.0, 68.0], NOSE));

        for (from, to) in [
            ((30.0, 55.0), (10.0, 50.0)),
            ((30.0, 62.0), (8.0, 62.0)),
            ((30.0, 69.0), (10.0, 74.0)),
            ((120.0, 55.0), (140.0, 50.0)),
            ((120.0, 62.0), (142.0, 62.0)),
            ((120.0, 69.0), (140.0, 74.0)),
        ] {
            shapes.push(Shape::Line { from, to, color: WHISKER, width: 2.0 });
        }

        // Smile
        shapes.push(Shape::Arc {
            bbox: [60.0, 60.0, 90.0, 80.0],
            start: 0.0,
            end: 180.0,
            color: NOSE,
            width: 2.0,
        });

        Self::new(shapes)
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    /// Draws the figure on an opaque white `size` × `size` canvas.
    pub fn render(&self, size: u32) -> RgbaImage {
        let mut img = RgbaImage::from_pixel(size, size, BACKGROUND);
        let s = size as f32 / DESIGN_SIZE;
        for shape in &self.shapes {
            shape.draw(&mut img, s);
        }
        img
    }

    /// Bounding box of everything the figure draws at `size`, `[x0, y0, x1, y1]`.
    pub fn bounds(&self, size: u32) -> Rect {
        let s = size as f32 / DESIGN_SIZE;
        self.shapes.iter().fold(EMPTY, |acc, shape| union(acc, shape.bounds(s)))
    }
}

impl Default for Figure {
    fn default() -> Self {
        Self::totoro()
    }
}

fn ellipse(bbox: Rect, fill: Rgba<u8>) -> Shape {
    Shape::Ellipse { bbox, fill, outline: None }
}

fn polygon(points: &[(f32, f32)], fill: Rgba<u8>) -> Shape {
    Shape::Polygon { points: points.to_vec(), fill }
}
