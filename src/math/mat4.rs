//! 4x4 homogeneous matrix for spatial affine transforms.
//!
//! See the [module docs](super) for the row-vector convention.

use std::ops::Mul;

use approx::{AbsDiffEq, RelativeEq};

use super::point::Point3D;
use crate::error::{GeometryError, Result};

/// Coordinate axis tag for rotations and shears.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }
}

/// Principal planes a spatial reflection can mirror across.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reflection3D {
    /// `z -> -z`
    XY,
    /// `x -> -x`
    YZ,
    /// `y -> -y`
    ZX,
}

/// Engineering views produced by orthographic projection.
///
/// Each view flattens the scene onto its own x/y plane with `z = 0`, so
/// [`Point3D::project_xy`] yields drawing coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrthoView {
    /// Looking down -Z with +Y up.
    Front,
    /// Looking down -Y with -Z up.
    Top,
    /// Looking down -X with +Y up.
    Side,
}

/// 4x4 affine matrix stored as `data[row][col]`, acting on row vectors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix3D {
    data: [[f64; 4]; 4],
}

impl Matrix3D {
    pub const fn new(data: [[f64; 4]; 4]) -> Self {
        Self { data }
    }

    pub const fn identity() -> Self {
        Self::new([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Translation lives in the last row.
    pub fn translation(tx: f64, ty: f64, tz: f64) -> Self {
        Self::new([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [tx, ty, tz, 1.0],
        ])
    }

    pub fn scaling(sx: f64, sy: f64, sz: f64) -> Self {
        Self::new([
            [sx, 0.0, 0.0, 0.0],
            [0.0, sy, 0.0, 0.0],
            [0.0, 0.0, sz, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    pub fn uniform_scaling(s: f64) -> Self {
        Self::scaling(s, s, s)
    }

    /// Right-handed rotation about `axis`, in radians.
    pub fn rotation(axis: Axis, angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        match axis {
            Axis::X => Self::new([
                [1.0, 0.0, 0.0, 0.0],
                [0.0, c, s, 0.0],
                [0.0, -s, c, 0.0],
                [0.0, 0.0, 0.0, 1.0],
            ]),
            Axis::Y => Self::new([
                [c, 0.0, -s, 0.0],
                [0.0, 1.0, 0.0, 0.0],
                [s, 0.0, c, 0.0],
                [0.0, 0.0, 0.0, 1.0],
            ]),
            Axis::Z => Self::new([
                [c, s, 0.0, 0.0],
                [-s, c, 0.0, 0.0],
                [0.0, 0.0, 1.0, 0.0],
                [0.0, 0.0, 0.0, 1.0],
            ]),
        }
    }

    pub fn rotation_degrees(axis: Axis, degrees: f64) -> Self {
        Self::rotation(axis, degrees.to_radians())
    }

    pub fn reflection(across: Reflection3D) -> Self {
        match across {
            Reflection3D::XY => Self::scaling(1.0, 1.0, -1.0),
            Reflection3D::YZ => Self::scaling(-1.0, 1.0, 1.0),
            Reflection3D::ZX => Self::scaling(1.0, -1.0, 1.0),
        }
    }

    /// Shear that adds `factor * source` to the `target` coordinate.
    ///
    /// Returns `InvalidArgument` when `target == source`.
    pub fn shear(target: Axis, source: Axis, factor: f64) -> Result<Self> {
        if target == source {
            return Err(GeometryError::invalid_argument(format!(
                "shear needs two distinct axes, got {target:?} twice"
            )));
        }
        let mut m = Self::identity();
        m.data[source.index()][target.index()] = factor;
        Ok(m)
    }

    /// Projection onto the drawing plane of `view`. Singular but affine.
    pub fn orthographic(view: OrthoView) -> Self {
        match view {
            OrthoView::Front => Self::new([
                [1.0, 0.0, 0.0, 0.0],
                [0.0, 1.0, 0.0, 0.0],
                [0.0, 0.0, 0.0, 0.0],
                [0.0, 0.0, 0.0, 1.0],
            ]),
            OrthoView::Top => Self::new([
                [1.0, 0.0, 0.0, 0.0],
                [0.0, 0.0, 0.0, 0.0],
                [0.0, -1.0, 0.0, 0.0],
                [0.0, 0.0, 0.0, 1.0],
            ]),
            OrthoView::Side => Self::new([
                [0.0, 0.0, 0.0, 0.0],
                [0.0, 1.0, 0.0, 0.0],
                [-1.0, 0.0, 0.0, 0.0],
                [0.0, 0.0, 0.0, 1.0],
            ]),
        }
    }

    /// Composes `self` followed by `next`. Same as `self * next`.
    pub fn then(self, next: Self) -> Self {
        self * next
    }

    /// Maps a single point: `[x, y, z, 1] * M`. No projective divide.
    pub fn transform_point(&self, p: Point3D) -> Point3D {
        let m = &self.data;
        Point3D::new(
            p.x * m[0][0] + p.y * m[1][0] + p.z * m[2][0] + m[3][0],
            p.x * m[0][1] + p.y * m[1][1] + p.z * m[2][1] + m[3][1],
            p.x * m[0][2] + p.y * m[1][2] + p.z * m[2][2] + m[3][2],
        )
    }

    /// Maps every point, preserving order and count.
    pub fn apply(&self, points: &[Point3D]) -> Vec<Point3D> {
        points.iter().map(|&p| self.transform_point(p)).collect()
    }

    /// True while the last column is `[0, 0, 0, 1]`.
    pub fn is_affine(&self) -> bool {
        self.data[0][3] == 0.0
            && self.data[1][3] == 0.0
            && self.data[2][3] == 0.0
            && self.data[3][3] == 1.0
    }

    /// Access element at [row][col].
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row][col]
    }
}

impl Default for Matrix3D {
    fn default() -> Self {
        Self::identity()
    }
}

/// Matrix multiplication: `A * B` applies A first, then B.
impl Mul<Matrix3D> for Matrix3D {
    type Output = Matrix3D;

    fn mul(self, rhs: Matrix3D) -> Self::Output {
        let mut result = [[0.0f64; 4]; 4];

        for (row, out) in result.iter_mut().enumerate() {
            for (col, cell) in out.iter_mut().enumerate() {
                *cell = self.data[row][0] * rhs.data[0][col]
                    + self.data[row][1] * rhs.data[1][col]
                    + self.data[row][2] * rhs.data[2][col]
                    + self.data[row][3] * rhs.data[3][col];
            }
        }

        Matrix3D::new(result)
    }
}

/// Row vector times matrix: `v * M`.
impl Mul<Matrix3D> for Point3D {
    type Output = Point3D;

    fn mul(self, rhs: Matrix3D) -> Self::Output {
        rhs.transform_point(self)
    }
}

impl AbsDiffEq for Matrix3D {
    type Epsilon = f64;

    fn default_epsilon() -> f64 {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
        self.data
            .iter()
            .flatten()
            .zip(other.data.iter().flatten())
            .all(|(a, b)| a.abs_diff_eq(b, epsilon))
    }
}

impl RelativeEq for Matrix3D {
    fn default_max_relative() -> f64 {
        f64::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: f64, max_relative: f64) -> bool {
        self.data
            .iter()
            .flatten()
            .zip(other.data.iter().flatten())
            .all(|(a, b)| a.relative_eq(b, epsilon, max_relative))
    }
}
