//! Points and homogeneous affine matrices.
//!
//! # Convention
//! - Points are **row vectors** on the left: `v' = v * M`
//! - Translation is stored in the **last row**
//! - Transforms chain **left-to-right**: `A * B` applies A first, then B
//! - The last column is always `[0, .., 0, 1]`; nothing here performs a
//!   projective divide
//!
//! # Example
//! ```
//! use pixlab::math::{Matrix2D, Point2D};
//!
//! let m = Matrix2D::translation(2.0, 0.0) * Matrix2D::rotation_degrees(90.0);
//! let p = Point2D::new(1.0, 0.0) * m; // (3, 0) rotated a quarter turn
//! assert!((p.x - 0.0).abs() < 1e-12 && (p.y - 3.0).abs() < 1e-12);
//! ```

pub mod mat3;
pub mod mat4;
pub mod point;

pub use mat3::{Matrix2D, Reflection2D};
pub use mat4::{Axis, Matrix3D, OrthoView, Reflection3D};
pub use point::{PixelCoord, Point2D, Point3D};
