//! Planar geometry primitives for the acquisition core.
//!
//! Everything here is integer pixel space. Centroids come from polygon
//! moments; a degenerate contour (zero first-order moment) yields `None`
//! rather than a division.

use crate::frame::FrameBounds;

/// A pixel coordinate. Origin is the top-left corner of the frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned bounding box, clamped to frame bounds on construction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BoundingBox {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl BoundingBox {
    /// Clamp a raw detection box into the frame.
    ///
    /// Detector outputs may extend past the frame edge (the box center is
    /// predicted, not the corners). The clamped box always satisfies
    /// `0 <= x < width`, `0 <= y < height`, and fits inside the frame.
    pub fn clamped(x: i32, y: i32, width: i32, height: i32, bounds: FrameBounds) -> Self {
        let max_x = bounds.width.saturating_sub(1) as i32;
        let max_y = bounds.height.saturating_sub(1) as i32;
        let cx = x.clamp(0, max_x.max(0));
        let cy = y.clamp(0, max_y.max(0));
        let cw = width.max(0).min(bounds.width as i32 - cx).max(0) as u32;
        let ch = height.max(0).min(bounds.height as i32 - cy).max(0) as u32;
        Self {
            x: cx,
            y: cy,
            width: cw,
            height: ch,
        }
    }

    pub fn center(&self) -> Point {
        Point::new(
            self.x + (self.width / 2) as i32,
            self.y + (self.height / 2) as i32,
        )
    }

    pub fn area(&self) -> f64 {
        self.width as f64 * self.height as f64
    }
}

/// Tight bounding box of a contour, clamped to the frame.
pub fn bounding_rect(contour: &[Point], bounds: FrameBounds) -> BoundingBox {
    let Some(first) = contour.first() else {
        return BoundingBox::default();
    };
    let (mut min_x, mut min_y, mut max_x, mut max_y) = (first.x, first.y, first.x, first.y);
    for p in &contour[1..] {
        min_x = min_x.min(p.x);
        min_y = min_y.min(p.y);
        max_x = max_x.max(p.x);
        max_y = max_y.max(p.y);
    }
    BoundingBox::clamped(min_x, min_y, max_x - min_x + 1, max_y - min_y + 1, bounds)
}

/// Unsigned area of a closed polygon contour (shoelace formula).
pub fn contour_area(contour: &[Point]) -> f64 {
    signed_area(contour).abs()
}

/// Centroid of a closed polygon contour from its first-order moments.
///
/// Returns `None` when the zero-order moment vanishes (fewer than three
/// points, collinear points, or a zero-area loop). Callers drop such
/// candidates before they reach the selector.
pub fn contour_centroid(contour: &[Point]) -> Option<Point> {
    let m00 = signed_area(contour);
    if m00 == 0.0 {
        return None;
    }
    let mut m10 = 0.0f64;
    let mut m01 = 0.0f64;
    for i in 0..contour.len() {
        let a = contour[i];
        let b = contour[(i + 1) % contour.len()];
        let cross = (a.x as f64) * (b.y as f64) - (b.x as f64) * (a.y as f64);
        m10 += (a.x as f64 + b.x as f64) * cross;
        m01 += (a.y as f64 + b.y as f64) * cross;
    }
    let cx = m10 / (6.0 * m00);
    let cy = m01 / (6.0 * m00);
    Some(Point::new(cx as i32, cy as i32))
}

fn signed_area(contour: &[Point]) -> f64 {
    if contour.len() < 3 {
        return 0.0;
    }
    let mut acc = 0.0f64;
    for i in 0..contour.len() {
        let a = contour[i];
        let b = contour[(i + 1) % contour.len()];
        acc += (a.x as f64) * (b.y as f64) - (b.x as f64) * (a.y as f64);
    }
    acc / 2.0
}

/// Convenience: counter-clockwise rectangle contour.
pub fn rect_contour(x: i32, y: i32, width: i32, height: i32) -> Vec<Point> {
    vec![
        Point::new(x, y),
        Point::new(x, y + height),
        Point::new(x + width, y + height),
        Point::new(x + width, y),
    ]
}
