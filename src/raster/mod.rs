//! Incremental rasterization of lines and conics.
//!
//! Every generator here is a pull-based [`Iterator`] over [`PixelCoord`]s
//! with all of its state in explicit fields. Generators are `Clone`, so a
//! stream can be forked mid-way, and any prefix a consumer takes is a
//! correct prefix of the full shape. That is all a renderer needs for
//! progressive reveal.
//!
//! Available algorithms:
//! - [`DdaLine`]: digital differential analyzer over real endpoints
//! - [`BresenhamLine`]: integer decision-parameter line
//! - [`MidpointCircle`]: first-octant arc with 8-way symmetry
//! - [`MidpointEllipse`]: two-region arc with 4-way symmetry
//! - [`Polyline`]: consecutive line segments sharing their joints

mod circle;
mod ellipse;
mod line;
mod polyline;

pub use circle::MidpointCircle;
pub use ellipse::MidpointEllipse;
pub use line::{BresenhamLine, DdaLine};
pub use polyline::Polyline;

use std::iter::FusedIterator;

use crate::math::{PixelCoord, Point2D};

/// `center + offset` on one axis, saturating at the `i32` range.
fn offset(center: i32, delta: i64) -> i32 {
    (center as i64 + delta).clamp(i32::MIN as i64, i32::MAX as i64) as i32
}

/// The eight octant reflections of arc point `(x, y)` around `center`.
/// Reflections beyond the `i32` range saturate.
pub(crate) fn octant_points(center: PixelCoord, x: i64, y: i64) -> [PixelCoord; 8] {
    let at = |dx: i64, dy: i64| PixelCoord::new(offset(center.x, dx), offset(center.y, dy));
    [
        at(x, y),
        at(y, x),
        at(-y, x),
        at(-x, y),
        at(-x, -y),
        at(-y, -x),
        at(y, -x),
        at(x, -y),
    ]
}

/// The four quadrant reflections of arc point `(x, y)` around `center`.
pub(crate) fn quadrant_points(center: PixelCoord, x: i64, y: i64) -> [PixelCoord; 4] {
    let at = |dx: i64, dy: i64| PixelCoord::new(offset(center.x, dx), offset(center.y, dy));
    [at(x, y), at(-x, y), at(x, -y), at(-x, -y)]
}

/// Available line rasterization algorithms.
///
/// Use this enum to pick a line generator at runtime, e.g. from a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineAlgorithm {
    /// Floating-point increments, rounded per pixel.
    Dda,
    /// Integer decision parameter, no floating point per pixel.
    #[default]
    Bresenham,
}

impl std::fmt::Display for LineAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LineAlgorithm::Dda => write!(f, "DDA"),
            LineAlgorithm::Bresenham => write!(f, "Bresenham"),
        }
    }
}

/// Pixel stream of whichever line algorithm was selected.
#[derive(Debug, Clone)]
pub enum LinePixels {
    Dda(DdaLine),
    Bresenham(BresenhamLine),
}

impl Iterator for LinePixels {
    type Item = PixelCoord;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        match self {
            LinePixels::Dda(line) => line.next(),
            LinePixels::Bresenham(line) => line.next(),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self {
            LinePixels::Dda(line) => line.size_hint(),
            LinePixels::Bresenham(line) => line.size_hint(),
        }
    }
}

impl ExactSizeIterator for LinePixels {}
impl FusedIterator for LinePixels {}

/// Rasterizes `start -> end` with `algorithm`. Bresenham rounds the
/// endpoints to the nearest pixel first.
pub fn rasterize_line(algorithm: LineAlgorithm, start: Point2D, end: Point2D) -> LinePixels {
    match algorithm {
        LineAlgorithm::Dda => LinePixels::Dda(DdaLine::new(start, end)),
        LineAlgorithm::Bresenham => LinePixels::Bresenham(BresenhamLine::from_points(start, end)),
    }
}
