//! Graphics fundamentals on the CPU: incremental rasterization, clipping
//! against axis-aligned windows, and 2D/3D affine transforms.
//!
//! Every generator yields one pixel per pull, so a renderer can reveal a
//! shape progressively. Nothing here owns a window; the optional `window`
//! feature adds an SDL2 surface and the `pixlab` demo binary.
//!
//! # Quick Start
//!
//! ```
//! use pixlab::clip::{cohen_sutherland, ClipWindow, Segment};
//! use pixlab::math::{PixelCoord, Point2D};
//! use pixlab::raster::BresenhamLine;
//!
//! let window = ClipWindow::new(50.0, 50.0, 400.0, 300.0)?;
//! let segment = Segment::new(Point2D::new(20.0, 30.0), Point2D::new(450.0, 350.0));
//!
//! if let Some(clipped) = cohen_sutherland(segment, &window).segment() {
//!     let pixels: Vec<PixelCoord> = BresenhamLine::from_points(clipped.p1, clipped.p2).collect();
//!     assert!(!pixels.is_empty());
//! }
//! # Ok::<(), pixlab::GeometryError>(())
//! ```

pub mod canvas;
pub mod clip;
pub mod error;
pub mod logging;
pub mod math;
pub mod raster;
pub mod transform;
#[cfg(feature = "window")]
pub mod window;

pub use error::{GeometryError, Result};

/// Prelude module for convenient imports.
///
/// # Example
/// ```
/// use pixlab::prelude::*;
/// ```
pub mod prelude {
    // Math
    pub use crate::math::{
        Axis, Matrix2D, Matrix3D, OrthoView, PixelCoord, Point2D, Point3D, Reflection2D,
        Reflection3D,
    };

    // Rasterization
    pub use crate::raster::{
        rasterize_line, BresenhamLine, DdaLine, LineAlgorithm, MidpointCircle, MidpointEllipse,
        Polyline,
    };

    // Clipping
    pub use crate::clip::{
        cohen_sutherland, liang_barsky, sutherland_hodgman, ClipWindow, LineClip,
        LineClipAlgorithm, Polygon, Segment,
    };

    // Transforms
    pub use crate::transform::{compose, PointSet, Transform, Transform2D, Transform3D};

    // Output
    pub use crate::canvas::Canvas;

    pub use crate::error::{GeometryError, Result};
}
