use std::iter::FusedIterator;

use super::octant_points;
use crate::error::{GeometryError, Result};
use crate::math::PixelCoord;

/// Midpoint circle generator.
///
/// Walks the first-octant arc from `(0, r)` while `x < y` and emits every
/// computed point as its eight octant reflections around the center, so the
/// stream is eight pixels per arc step.
#[derive(Debug, Clone)]
pub struct MidpointCircle {
    center: PixelCoord,
    x: i64,
    y: i64,
    p: i64,
    pending: [PixelCoord; 8],
    cursor: usize,
}

impl MidpointCircle {
    /// Returns `InvalidArgument` for a negative radius.
    pub fn new(center: PixelCoord, radius: i32) -> Result<Self> {
        if radius < 0 {
            return Err(GeometryError::invalid_argument(format!(
                "circle radius must be non-negative, got {radius}"
            )));
        }
        let r = radius as i64;
        log::debug!("midpoint circle at ({}, {}) r={}", center.x, center.y, r);
        Ok(Self {
            center,
            x: 0,
            y: r,
            p: 1 - r,
            pending: octant_points(center, 0, r),
            cursor: 0,
        })
    }

    /// Current decision parameter.
    pub fn decision(&self) -> i64 {
        self.p
    }

    /// Arc point `(x, y)` relative to the center whose reflections are
    /// currently being emitted.
    pub fn arc_point(&self) -> (i64, i64) {
        (self.x, self.y)
    }

    pub fn is_finished(&self) -> bool {
        self.cursor >= self.pending.len() && self.x >= self.y
    }

    fn advance(&mut self) {
        self.x += 1;
        if self.p < 0 {
            self.p += 2 * self.x + 1;
        } else {
            self.y -= 1;
            self.p += 2 * self.x - 2 * self.y + 1;
        }
        self.pending = octant_points(self.center, self.x, self.y);
        self.cursor = 0;
    }
}

impl Iterator for MidpointCircle {
    type Item = PixelCoord;

    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor >= self.pending.len() {
            if self.x >= self.y {
                return None;
            }
            self.advance();
        }
        let pixel = self.pending[self.cursor];
        self.cursor += 1;
        Some(pixel)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.pending.len() - self.cursor, None)
    }
}

impl FusedIterator for MidpointCircle {}
