use std::iter::FusedIterator;

use super::quadrant_points;
use crate::error::{GeometryError, Result};
use crate::math::PixelCoord;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Region {
    /// Slope magnitude below one: step x every iteration.
    One,
    /// Remaining arc: step y down to zero.
    Two,
    /// One radius is zero: walk the flat axis segment.
    Flat,
    Done,
}

/// Two-region midpoint ellipse generator.
///
/// Each arc point `(x, y)` is emitted as its four quadrant reflections
/// around the center. Squared radii and their products are kept in `i128`,
/// which holds every term for radii up to `i32::MAX`.
#[derive(Debug, Clone)]
pub struct MidpointEllipse {
    center: PixelCoord,
    rx: i64,
    ry: i64,
    rx2: i128,
    ry2: i128,
    x: i64,
    y: i64,
    d: f64,
    region: Region,
    pending: [PixelCoord; 4],
    cursor: usize,
}

impl MidpointEllipse {
    /// Returns `InvalidArgument` when either radius is negative.
    pub fn new(center: PixelCoord, rx: i32, ry: i32) -> Result<Self> {
        if rx < 0 || ry < 0 {
            return Err(GeometryError::invalid_argument(format!(
                "ellipse radii must be non-negative, got rx={rx} ry={ry}"
            )));
        }
        let (rx, ry) = (rx as i64, ry as i64);
        let (rx2, ry2) = (rx as i128 * rx as i128, ry as i128 * ry as i128);
        let region = if rx == 0 || ry == 0 {
            Region::Flat
        } else {
            Region::One
        };
        log::debug!(
            "midpoint ellipse at ({}, {}) rx={} ry={}",
            center.x,
            center.y,
            rx,
            ry
        );

        Ok(Self {
            center,
            rx,
            ry,
            rx2,
            ry2,
            x: 0,
            y: ry,
            d: ry2 as f64 - (rx2 * ry as i128) as f64 + 0.25 * rx2 as f64,
            region,
            pending: [center; 4],
            cursor: 4,
        })
    }

    /// Current decision variable.
    pub fn decision(&self) -> f64 {
        self.d
    }

    pub fn is_finished(&self) -> bool {
        self.region == Region::Done && self.cursor >= self.pending.len()
    }

    fn emit_current(&mut self) {
        self.pending = quadrant_points(self.center, self.x, self.y);
        self.cursor = 0;
    }

    fn enter_region_two(&mut self) {
        let (x, y) = (self.x as f64, self.y as f64);
        self.d = self.ry2 as f64 * (x + 0.5).powi(2) + self.rx2 as f64 * (y - 1.0).powi(2)
            - (self.rx2 * self.ry2) as f64;
        self.region = Region::Two;
        log::trace!("ellipse region 2 from ({}, {}) d={}", self.x, self.y, self.d);
    }

    /// Loads the next arc point into `pending`. Returns false once the arc
    /// is exhausted.
    fn step(&mut self) -> bool {
        loop {
            match self.region {
                Region::One => {
                    let (x, y) = (self.x as i128, self.y as i128);
                    if self.ry2 * x > self.rx2 * y {
                        self.enter_region_two();
                        continue;
                    }
                    self.emit_current();
                    self.x += 1;
                    let (x, y) = (self.x as i128, self.y as i128);
                    if self.d < 0.0 {
                        self.d += (self.ry2 * (2 * x + 1)) as f64;
                    } else {
                        self.y -= 1;
                        self.d += (self.ry2 * (2 * x + 1) - 2 * self.rx2 * (y - 1)) as f64;
                    }
                    return true;
                }
                Region::Two => {
                    if self.y < 0 {
                        self.region = Region::Done;
                        continue;
                    }
                    self.emit_current();
                    self.y -= 1;
                    let (x, y) = (self.x as i128, self.y as i128);
                    if self.d > 0.0 {
                        self.d += (self.rx2 * (1 - 2 * y)) as f64;
                    } else {
                        self.x += 1;
                        self.d += (self.ry2 * 2 * (x + 1) + self.rx2 * (1 - 2 * y)) as f64;
                    }
                    return true;
                }
                Region::Flat => {
                    // Walk from the vertex (0, ry) or (0, 0) out to (rx, 0).
                    if self.rx == 0 {
                        if self.y < 0 {
                            self.region = Region::Done;
                            continue;
                        }
                        self.emit_current();
                        self.y -= 1;
                    } else {
                        if self.x > self.rx {
                            self.region = Region::Done;
                            continue;
                        }
                        self.emit_current();
                        self.x += 1;
                    }
                    return true;
                }
                Region::Done => return false,
            }
        }
    }
}

impl Iterator for MidpointEllipse {
    type Item = PixelCoord;

    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor >= self.pending.len() && !self.step() {
            return None;
        }
        let pixel = self.pending[self.cursor];
        self.cursor += 1;
        Some(pixel)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.pending.len() - self.cursor, None)
    }
}

impl FusedIterator for MidpointEllipse {}
