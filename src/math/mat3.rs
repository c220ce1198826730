//! 3x3 homogeneous matrix for planar affine transforms.
//!
//! See the [module docs](super) for the row-vector convention.

use std::ops::Mul;

use approx::{AbsDiffEq, RelativeEq};

use super::point::Point2D;

/// Principal lines a planar reflection can mirror across.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reflection2D {
    /// Mirror across the X axis: `y -> -y`.
    XAxis,
    /// Mirror across the Y axis: `x -> -x`.
    YAxis,
    /// Point reflection through the origin.
    Origin,
    /// Mirror across the line `y = x`.
    Diagonal,
}

/// 3x3 affine matrix stored as `data[row][col]`, acting on row vectors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix2D {
    data: [[f64; 3]; 3],
}

impl Matrix2D {
    pub const fn new(data: [[f64; 3]; 3]) -> Self {
        Self { data }
    }

    pub const fn identity() -> Self {
        Self::new([[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]])
    }

    /// Translation lives in the last row.
    pub fn translation(tx: f64, ty: f64) -> Self {
        Self::new([[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [tx, ty, 1.0]])
    }

    /// Counter-clockwise rotation about the origin, in radians.
    pub fn rotation(angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        Self::new([[c, s, 0.0], [-s, c, 0.0], [0.0, 0.0, 1.0]])
    }

    pub fn rotation_degrees(degrees: f64) -> Self {
        Self::rotation(degrees.to_radians())
    }

    pub fn scaling(sx: f64, sy: f64) -> Self {
        Self::new([[sx, 0.0, 0.0], [0.0, sy, 0.0], [0.0, 0.0, 1.0]])
    }

    pub fn uniform_scaling(s: f64) -> Self {
        Self::scaling(s, s)
    }

    pub fn reflection(across: Reflection2D) -> Self {
        match across {
            Reflection2D::XAxis => Self::scaling(1.0, -1.0),
            Reflection2D::YAxis => Self::scaling(-1.0, 1.0),
            Reflection2D::Origin => Self::scaling(-1.0, -1.0),
            Reflection2D::Diagonal => {
                Self::new([[0.0, 1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]])
            }
        }
    }

    /// Shear with `x' = x + shx * y` and `y' = y + shy * x`.
    pub fn shear(shx: f64, shy: f64) -> Self {
        Self::new([[1.0, shy, 0.0], [shx, 1.0, 0.0], [0.0, 0.0, 1.0]])
    }

    /// Composes `self` followed by `next`. Same as `self * next`.
    pub fn then(self, next: Self) -> Self {
        self * next
    }

    /// Maps a single point: `[x, y, 1] * M`.
    pub fn transform_point(&self, p: Point2D) -> Point2D {
        let m = &self.data;
        Point2D::new(
            p.x * m[0][0] + p.y * m[1][0] + m[2][0],
            p.x * m[0][1] + p.y * m[1][1] + m[2][1],
        )
    }

    /// Maps every point, preserving order and count.
    pub fn apply(&self, points: &[Point2D]) -> Vec<Point2D> {
        points.iter().map(|&p| self.transform_point(p)).collect()
    }

    /// True while the last column is `[0, 0, 1]`.
    pub fn is_affine(&self) -> bool {
        self.data[0][2] == 0.0 && self.data[1][2] == 0.0 && self.data[2][2] == 1.0
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row][col]
    }
}

impl Default for Matrix2D {
    fn default() -> Self {
        Self::identity()
    }
}

/// `A * B` applies A first, then B.
impl Mul<Matrix2D> for Matrix2D {
    type Output = Matrix2D;

    fn mul(self, rhs: Matrix2D) -> Self::Output {
        let mut result = [[0.0f64; 3]; 3];

        for (row, out) in result.iter_mut().enumerate() {
            for (col, cell) in out.iter_mut().enumerate() {
                *cell = self.data[row][0] * rhs.data[0][col]
                    + self.data[row][1] * rhs.data[1][col]
                    + self.data[row][2] * rhs.data[2][col];
            }
        }

        Matrix2D::new(result)
    }
}

/// Row vector times matrix: `v * M`.
impl Mul<Matrix2D> for Point2D {
    type Output = Point2D;

    fn mul(self, rhs: Matrix2D) -> Self::Output {
        rhs.transform_point(self)
    }
}

impl AbsDiffEq for Matrix2D {
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

impl RelativeEq for Matrix2D {
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

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    #[test]
    fn test_translation_in_last_row() {
        let m = Matrix2D::translation(3.0, -4.0);
        assert_eq!(m.get(2, 0), 3.0);
        assert_eq!(m.get(2, 1), -4.0);
        assert_eq!(Point2D::new(1.0, 1.0) * m, Point2D::new(4.0, -3.0));
    }

    #[test]
    fn test_rotation_is_counter_clockwise() {
        let p = Point2D::new(1.0, 0.0) * Matrix2D::rotation_degrees(90.0);
        assert_abs_diff_eq!(p, Point2D::new(0.0, 1.0), epsilon = 1e-12);
    }

    #[test]
    fn test_reflections() {
        let p = Point2D::new(2.0, 3.0);
        assert_eq!(p * Matrix2D::reflection(Reflection2D::XAxis), Point2D::new(2.0, -3.0));
        assert_eq!(p * Matrix2D::reflection(Reflection2D::YAxis), Point2D::new(-2.0, 3.0));
        assert_eq!(p * Matrix2D::reflection(Reflection2D::Origin), Point2D::new(-2.0, -3.0));
        assert_eq!(p * Matrix2D::reflection(Reflection2D::Diagonal), Point2D::new(3.0, 2.0));
    }

    #[test]
    fn test_shear() {
        let p = Point2D::new(2.0, 3.0) * Matrix2D::shear(0.5, 0.0);
        assert_eq!(p, Point2D::new(3.5, 3.0));
        let p = Point2D::new(2.0, 3.0) * Matrix2D::shear(0.0, 2.0);
        assert_eq!(p, Point2D::new(2.0, 7.0));
    }

    #[test]
    fn test_then_applies_left_operand_first() {
        // Scale then translate differs from translate then scale.
        let s = Matrix2D::uniform_scaling(2.0);
        let t = Matrix2D::translation(1.0, 0.0);
        let p = Point2D::new(1.0, 1.0);
        assert_eq!(p * s.then(t), Point2D::new(3.0, 2.0));
        assert_eq!(p * t.then(s), Point2D::new(4.0, 2.0));
    }

    #[test]
    fn test_builders_stay_affine() {
        for m in [
            Matrix2D::translation(1.0, 2.0),
            Matrix2D::rotation(0.3),
            Matrix2D::scaling(2.0, 0.5),
            Matrix2D::shear(0.4, 0.1),
            Matrix2D::reflection(Reflection2D::Diagonal),
        ] {
            assert!(m.is_affine());
        }
    }

    #[test]
    fn test_associativity() {
        let a = Matrix2D::rotation(0.7);
        let b = Matrix2D::translation(3.0, -1.5).then(Matrix2D::shear(0.2, 0.0));
        let c = Matrix2D::scaling(1.5, -2.0);
        assert_relative_eq!((a * b) * c, a * (b * c), epsilon = 1e-12);
    }

    #[test]
    fn test_apply_preserves_order_and_count() {
        let pts = [Point2D::new(0.0, 0.0), Point2D::new(1.0, 0.0), Point2D::new(0.0, 1.0)];
        let out = Matrix2D::translation(1.0, 1.0).apply(&pts);
        assert_eq!(
            out,
            vec![Point2D::new(1.0, 1.0), Point2D::new(2.0, 1.0), Point2D::new(1.0, 2.0)]
        );
        // Input untouched.
        assert_eq!(pts[1], Point2D::new(1.0, 0.0));
    }
}
