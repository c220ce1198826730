//! Composition and application of affine transforms.
//!
//! [`Transform2D`] and [`Transform3D`] are fluent builders that append
//! steps in application order, so
//!
//! ```
//! use pixlab::transform::Transform2D;
//!
//! let mut t = Transform2D::new();
//! t.translate(2.0, 0.0).rotate_degrees(90.0);
//! ```
//!
//! translates first and rotates second. Under the row-vector convention
//! (see [`crate::math`]) that is the product `T * R`.
//!
//! [`Transform`] and [`PointSet`] carry their dimension at runtime, for
//! callers that pick transforms dynamically (e.g. from key presses). Mixing
//! dimensions is reported as `InvalidArgument`.

use crate::error::{GeometryError, Result};
use crate::math::{
    Axis, Matrix2D, Matrix3D, OrthoView, Point2D, Point3D, Reflection2D, Reflection3D,
};

/// Fluent planar transform chain.
///
/// ```ignore
/// transform
///     .reflect(Reflection2D::XAxis)
///     .translate(1.2, 0.0)
///     .rotate_degrees(-45.0)
///     .shear(0.4, 0.0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Transform2D {
    matrix: Matrix2D,
}

impl Transform2D {
    /// Identity transform.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an arbitrary matrix as the next step.
    pub fn then(&mut self, next: Matrix2D) -> &mut Self {
        self.matrix = self.matrix * next;
        self
    }

    pub fn translate(&mut self, tx: f64, ty: f64) -> &mut Self {
        self.then(Matrix2D::translation(tx, ty))
    }

    /// Rotate counter-clockwise about the origin (radians).
    pub fn rotate(&mut self, angle: f64) -> &mut Self {
        self.then(Matrix2D::rotation(angle))
    }

    pub fn rotate_degrees(&mut self, degrees: f64) -> &mut Self {
        self.then(Matrix2D::rotation_degrees(degrees))
    }

    pub fn scale(&mut self, sx: f64, sy: f64) -> &mut Self {
        self.then(Matrix2D::scaling(sx, sy))
    }

    pub fn reflect(&mut self, across: Reflection2D) -> &mut Self {
        self.then(Matrix2D::reflection(across))
    }

    pub fn shear(&mut self, shx: f64, shy: f64) -> &mut Self {
        self.then(Matrix2D::shear(shx, shy))
    }

    /// The composite matrix.
    pub fn matrix(&self) -> Matrix2D {
        self.matrix
    }

    pub fn apply(&self, points: &[Point2D]) -> Vec<Point2D> {
        self.matrix.apply(points)
    }
}

/// Fluent spatial transform chain.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Transform3D {
    matrix: Matrix3D,
}

impl Transform3D {
    /// Identity transform.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an arbitrary matrix as the next step.
    pub fn then(&mut self, next: Matrix3D) -> &mut Self {
        self.matrix = self.matrix * next;
        self
    }

    pub fn translate(&mut self, tx: f64, ty: f64, tz: f64) -> &mut Self {
        self.then(Matrix3D::translation(tx, ty, tz))
    }

    pub fn rotate(&mut self, axis: Axis, angle: f64) -> &mut Self {
        self.then(Matrix3D::rotation(axis, angle))
    }

    pub fn rotate_degrees(&mut self, axis: Axis, degrees: f64) -> &mut Self {
        self.then(Matrix3D::rotation_degrees(axis, degrees))
    }

    pub fn scale(&mut self, sx: f64, sy: f64, sz: f64) -> &mut Self {
        self.then(Matrix3D::scaling(sx, sy, sz))
    }

    pub fn reflect(&mut self, across: Reflection3D) -> &mut Self {
        self.then(Matrix3D::reflection(across))
    }

    /// Fails, leaving the chain untouched, when `target == source`.
    pub fn shear(&mut self, target: Axis, source: Axis, factor: f64) -> Result<&mut Self> {
        let m = Matrix3D::shear(target, source, factor)?;
        Ok(self.then(m))
    }

    pub fn project(&mut self, view: OrthoView) -> &mut Self {
        self.then(Matrix3D::orthographic(view))
    }

    /// The composite matrix.
    pub fn matrix(&self) -> Matrix3D {
        self.matrix
    }

    pub fn apply(&self, points: &[Point3D]) -> Vec<Point3D> {
        self.matrix.apply(points)
    }
}

/// A matrix of either dimension.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Transform {
    Planar(Matrix2D),
    Spatial(Matrix3D),
}

impl Transform {
    /// Number of affine coordinates the matrix acts on (2 or 3).
    pub fn dimension(&self) -> usize {
        match self {
            Transform::Planar(_) => 2,
            Transform::Spatial(_) => 3,
        }
    }

    /// `self` followed by `next`. Both must have the same dimension.
    pub fn then(&self, next: &Transform) -> Result<Transform> {
        match (self, next) {
            (Transform::Planar(a), Transform::Planar(b)) => Ok(Transform::Planar(*a * *b)),
            (Transform::Spatial(a), Transform::Spatial(b)) => Ok(Transform::Spatial(*a * *b)),
            _ => Err(GeometryError::invalid_argument(format!(
                "cannot compose a {}D transform with a {}D transform",
                self.dimension(),
                next.dimension()
            ))),
        }
    }

    /// Maps every point through the matrix into a new set of the same
    /// length and order.
    pub fn apply(&self, points: &PointSet) -> Result<PointSet> {
        match (self, points) {
            (Transform::Planar(m), PointSet::Planar(pts)) => Ok(PointSet::Planar(m.apply(pts))),
            (Transform::Spatial(m), PointSet::Spatial(pts)) => Ok(PointSet::Spatial(m.apply(pts))),
            _ => Err(GeometryError::invalid_argument(format!(
                "cannot apply a {}D transform to {}D points",
                self.dimension(),
                points.dimension()
            ))),
        }
    }
}

impl From<Matrix2D> for Transform {
    fn from(m: Matrix2D) -> Self {
        Transform::Planar(m)
    }
}

impl From<Matrix3D> for Transform {
    fn from(m: Matrix3D) -> Self {
        Transform::Spatial(m)
    }
}

/// Ordered points of either dimension.
#[derive(Clone, Debug, PartialEq)]
pub enum PointSet {
    Planar(Vec<Point2D>),
    Spatial(Vec<Point3D>),
}

impl PointSet {
    pub fn dimension(&self) -> usize {
        match self {
            PointSet::Planar(_) => 2,
            PointSet::Spatial(_) => 3,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            PointSet::Planar(pts) => pts.len(),
            PointSet::Spatial(pts) => pts.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Composes `transforms` in application order: the first element applies
/// first. Fails on an empty list or mixed dimensions.
pub fn compose(transforms: &[Transform]) -> Result<Transform> {
    let (first, rest) = transforms
        .split_first()
        .ok_or_else(|| GeometryError::invalid_argument("cannot compose an empty transform list"))?;
    let composite = rest.iter().try_fold(*first, |acc, next| acc.then(next))?;
    log::debug!(
        "composed {} {}D transforms",
        transforms.len(),
        composite.dimension()
    );
    Ok(composite)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    #[test]
    fn test_default_is_identity() {
        assert_eq!(Transform2D::default().matrix(), Matrix2D::identity());
        assert_eq!(Transform3D::default().matrix(), Matrix3D::identity());
    }

    #[test]
    fn test_chain_applies_in_call_order() {
        let mut t = Transform2D::new();
        t.translate(2.0, 0.0).rotate_degrees(90.0);
        let out = t.apply(&[Point2D::new(1.0, 0.0)]);
        assert_abs_diff_eq!(out[0], Point2D::new(0.0, 3.0), epsilon = 1e-12);

        let mut t = Transform2D::new();
        t.rotate_degrees(90.0).translate(2.0, 0.0);
        let out = t.apply(&[Point2D::new(1.0, 0.0)]);
        assert_abs_diff_eq!(out[0], Point2D::new(2.0, 1.0), epsilon = 1e-12);
    }

    #[test]
    fn test_composite_chain() {
        // Reflect, translate, rotate, shear: each step feeds the next.
        let mut t = Transform2D::new();
        t.reflect(Reflection2D::XAxis)
            .translate(1.2, 0.0)
            .rotate_degrees(-45.0)
            .shear(0.4, 0.0);

        let p = Point2D::new(-0.8, -0.6);
        let mut expected = Point2D::new(-0.8, 0.6);
        expected = expected + Point2D::new(1.2, 0.0);
        let (s, c) = (-45.0f64).to_radians().sin_cos();
        expected = Point2D::new(expected.x * c - expected.y * s, expected.x * s + expected.y * c);
        expected = Point2D::new(expected.x + 0.4 * expected.y, expected.y);

        assert_relative_eq!(p * t.matrix(), expected, epsilon = 1e-12);
    }

    #[test]
    fn test_shear_failure_leaves_chain_untouched() {
        let mut t = Transform3D::new();
        t.translate(1.0, 0.0, 0.0);
        let before = t;
        assert!(t.shear(Axis::X, Axis::X, 1.0).is_err());
        assert_eq!(t, before);
    }

    #[test]
    fn test_3d_chain_with_projection() {
        let mut t = Transform3D::new();
        t.translate(4.0, 4.0, 0.0).project(OrthoView::Front);
        let out = t.apply(&[Point3D::new(0.0, 2.0, 5.0)]);
        assert_eq!(out, vec![Point3D::new(4.0, 6.0, 0.0)]);
    }

    #[test]
    fn test_mixed_dimensions_are_invalid() {
        let planar = Transform::from(Matrix2D::translation(1.0, 1.0));
        let spatial = Transform::from(Matrix3D::translation(1.0, 1.0, 1.0));

        assert!(matches!(
            planar.then(&spatial),
            Err(GeometryError::InvalidArgument { .. })
        ));
        assert!(matches!(
            spatial.apply(&PointSet::Planar(vec![Point2D::ORIGIN])),
            Err(GeometryError::InvalidArgument { .. })
        ));
        assert!(compose(&[planar, spatial]).is_err());
        assert!(compose(&[]).is_err());
    }

    #[test]
    fn test_dynamic_apply_preserves_order_and_count() {
        let t = compose(&[
            Matrix3D::scaling(2.0, 2.0, 2.0).into(),
            Matrix3D::translation(0.0, 0.0, -1.0).into(),
        ])
        .unwrap();
        let pts = PointSet::Spatial(vec![
            Point3D::new(0.0, 2.0, 0.0),
            Point3D::new(1.0, -1.0, 1.0),
        ]);
        let out = t.apply(&pts).unwrap();
        assert_eq!(out.len(), pts.len());
        assert_eq!(
            out,
            PointSet::Spatial(vec![
                Point3D::new(0.0, 4.0, -1.0),
                Point3D::new(2.0, -2.0, 1.0),
            ])
        );
    }

    #[test]
    fn test_compose_matches_manual_product() {
        let a = Matrix2D::rotation(0.3);
        let b = Matrix2D::shear(0.2, 0.1);
        let c = Matrix2D::translation(-4.0, 2.0);
        let Transform::Planar(m) = compose(&[a.into(), b.into(), c.into()]).unwrap() else {
            panic!("expected a planar transform");
        };
        assert_relative_eq!(m, a * b * c, epsilon = 1e-12);
    }
}
