//! Clipping against axis-aligned rectangular windows.
//!
//! Three algorithms share the [`ClipWindow`] type:
//!
//! - [`cohen_sutherland`]: outcode-driven endpoint relocation for segments.
//! - [`liang_barsky`]: parametric interval clipping for segments.
//! - [`sutherland_hodgman`]: half-plane by half-plane polygon clipping.
//!
//! Both line clippers return a [`LineClip`] and must agree on acceptance and
//! on the clipped endpoints for the same input. Every division in this
//! module is preceded by a check that excludes a zero divisor.

mod cohen_sutherland;
mod liang_barsky;
mod sutherland_hodgman;

pub use cohen_sutherland::cohen_sutherland;
pub use liang_barsky::{liang_barsky, liang_barsky_interval};
pub use sutherland_hodgman::{sutherland_hodgman, Polygon};

use std::ops::{BitAnd, BitOr, BitOrAssign};

use crate::error::{GeometryError, Result};
use crate::math::Point2D;

/// Axis-aligned clip rectangle with inclusive bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClipWindow {
    xmin: f64,
    ymin: f64,
    xmax: f64,
    ymax: f64,
}

impl ClipWindow {
    /// Returns `Configuration` when `xmin > xmax` or `ymin > ymax`.
    pub fn new(xmin: f64, ymin: f64, xmax: f64, ymax: f64) -> Result<Self> {
        // False for NaN bounds as well.
        let ordered = xmin <= xmax && ymin <= ymax;
        if !ordered {
            return Err(GeometryError::configuration(format!(
                "clip window needs xmin <= xmax and ymin <= ymax, got \
                 x: {xmin}..{xmax}, y: {ymin}..{ymax}"
            )));
        }
        Ok(Self {
            xmin,
            ymin,
            xmax,
            ymax,
        })
    }

    pub fn xmin(&self) -> f64 {
        self.xmin
    }

    pub fn ymin(&self) -> f64 {
        self.ymin
    }

    pub fn xmax(&self) -> f64 {
        self.xmax
    }

    pub fn ymax(&self) -> f64 {
        self.ymax
    }

    /// True when `p` lies inside or on the boundary.
    pub fn contains(&self, p: Point2D) -> bool {
        p.x >= self.xmin && p.x <= self.xmax && p.y >= self.ymin && p.y <= self.ymax
    }

    /// Classifies `p` against the four boundaries.
    pub fn outcode(&self, p: Point2D) -> Outcode {
        let mut code = Outcode::INSIDE;
        if p.x < self.xmin {
            code |= Outcode::LEFT;
        } else if p.x > self.xmax {
            code |= Outcode::RIGHT;
        }
        if p.y < self.ymin {
            code |= Outcode::BOTTOM;
        } else if p.y > self.ymax {
            code |= Outcode::TOP;
        }
        code
    }

    /// Nearest point of the window to `p`.
    pub fn clamp(&self, p: Point2D) -> Point2D {
        Point2D::new(
            p.x.clamp(self.xmin, self.xmax),
            p.y.clamp(self.ymin, self.ymax),
        )
    }

    /// Corners in counter-clockwise order starting at `(xmin, ymin)`.
    pub fn outline(&self) -> Polygon {
        Polygon::new(vec![
            Point2D::new(self.xmin, self.ymin),
            Point2D::new(self.xmax, self.ymin),
            Point2D::new(self.xmax, self.ymax),
            Point2D::new(self.xmin, self.ymax),
        ])
    }
}

/// 4-bit position of a point relative to a [`ClipWindow`]. Zero is inside.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Outcode(u8);

impl Outcode {
    pub const INSIDE: Self = Self(0);
    pub const LEFT: Self = Self(1);
    pub const RIGHT: Self = Self(2);
    pub const BOTTOM: Self = Self(4);
    pub const TOP: Self = Self(8);

    pub fn bits(self) -> u8 {
        self.0
    }

    pub fn is_inside(self) -> bool {
        self.0 == 0
    }

    /// True when every bit of `flag` is set in `self`.
    pub fn contains(self, flag: Self) -> bool {
        self.0 & flag.0 == flag.0 && flag.0 != 0
    }
}

impl BitOr for Outcode {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for Outcode {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for Outcode {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self::Output {
        Self(self.0 & rhs.0)
    }
}

/// A window boundary, i.e. one of the four clipping half-planes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipEdge {
    /// Keeps `x >= xmin`.
    Left,
    /// Keeps `x <= xmax`.
    Right,
    /// Keeps `y >= ymin`.
    Bottom,
    /// Keeps `y <= ymax`.
    Top,
}

impl ClipEdge {
    /// Order the polygon clipper visits the half-planes in.
    pub const ALL: [ClipEdge; 4] = [ClipEdge::Left, ClipEdge::Right, ClipEdge::Bottom, ClipEdge::Top];

    pub fn inside(self, window: &ClipWindow, p: Point2D) -> bool {
        match self {
            ClipEdge::Left => p.x >= window.xmin,
            ClipEdge::Right => p.x <= window.xmax,
            ClipEdge::Bottom => p.y >= window.ymin,
            ClipEdge::Top => p.y <= window.ymax,
        }
    }

    /// Where segment `a -> b` crosses this boundary line.
    ///
    /// Returns `None` when the segment is parallel to the boundary, so no
    /// caller ever divides by a zero delta.
    pub fn intersection(self, window: &ClipWindow, a: Point2D, b: Point2D) -> Option<Point2D> {
        match self {
            ClipEdge::Left | ClipEdge::Right => {
                let x_edge = if self == ClipEdge::Left {
                    window.xmin
                } else {
                    window.xmax
                };
                let dx = b.x - a.x;
                if dx == 0.0 {
                    return None;
                }
                Some(Point2D::new(x_edge, a.y + (b.y - a.y) * (x_edge - a.x) / dx))
            }
            ClipEdge::Bottom | ClipEdge::Top => {
                let y_edge = if self == ClipEdge::Bottom {
                    window.ymin
                } else {
                    window.ymax
                };
                let dy = b.y - a.y;
                if dy == 0.0 {
                    return None;
                }
                Some(Point2D::new(a.x + (b.x - a.x) * (y_edge - a.y) / dy, y_edge))
            }
        }
    }
}

/// An ordered pair of endpoints. May be degenerate.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Segment {
    pub p1: Point2D,
    pub p2: Point2D,
}

impl Segment {
    pub const fn new(p1: Point2D, p2: Point2D) -> Self {
        Self { p1, p2 }
    }

    pub fn is_degenerate(&self) -> bool {
        self.p1 == self.p2
    }

    pub fn reversed(&self) -> Self {
        Self::new(self.p2, self.p1)
    }
}

/// The part of a segment that survived clipping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClippedSegment {
    pub segment: Segment,
    /// The original `p1` was kept as is.
    pub start_kept: bool,
    /// The original `p2` was kept as is.
    pub end_kept: bool,
}

impl ClippedSegment {
    /// Both original endpoints survived.
    pub fn is_unchanged(&self) -> bool {
        self.start_kept && self.end_kept
    }
}

/// Outcome of clipping a segment against a window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LineClip {
    Accepted(ClippedSegment),
    Rejected,
}

impl LineClip {
    pub fn is_accepted(&self) -> bool {
        matches!(self, LineClip::Accepted(_))
    }

    pub fn segment(&self) -> Option<Segment> {
        match self {
            LineClip::Accepted(clipped) => Some(clipped.segment),
            LineClip::Rejected => None,
        }
    }
}

/// Available line clipping algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineClipAlgorithm {
    #[default]
    CohenSutherland,
    LiangBarsky,
}

impl LineClipAlgorithm {
    pub fn clip(self, segment: Segment, window: &ClipWindow) -> LineClip {
        match self {
            LineClipAlgorithm::CohenSutherland => cohen_sutherland(segment, window),
            LineClipAlgorithm::LiangBarsky => liang_barsky(segment, window),
        }
    }
}

impl std::fmt::Display for LineClipAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LineClipAlgorithm::CohenSutherland => write!(f, "Cohen-Sutherland"),
            LineClipAlgorithm::LiangBarsky => write!(f, "Liang-Barsky"),
        }
    }
}
