//! Error type shared by the geometry core.
//!
//! Every operation in this crate is a pure computation, so the only failures
//! are bad inputs. Degenerate geometry (zero-length segments, empty polygons)
//! is never an error.

use std::fmt;

/// Errors produced when constructing or combining geometry.
#[derive(Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// A clip window whose minimum exceeds its maximum on some axis.
    Configuration { reason: String },
    /// A parameter outside the domain of the operation (negative radius,
    /// mismatched matrix dimensions, same-axis shear).
    InvalidArgument { reason: String },
}

impl GeometryError {
    pub(crate) fn configuration(reason: impl Into<String>) -> Self {
        let reason = reason.into();
        log::warn!("configuration error: {reason}");
        GeometryError::Configuration { reason }
    }

    pub(crate) fn invalid_argument(reason: impl Into<String>) -> Self {
        let reason = reason.into();
        log::warn!("invalid argument: {reason}");
        GeometryError::InvalidArgument { reason }
    }
}

impl fmt::Display for GeometryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeometryError::Configuration { reason } => write!(f, "configuration error: {reason}"),
            GeometryError::InvalidArgument { reason } => write!(f, "invalid argument: {reason}"),
        }
    }
}

impl std::error::Error for GeometryError {}

pub type Result<T> = std::result::Result<T, GeometryError>;
