//! Error types for lattice and world construction.

use core::fmt;

/// Errors raised when building lattices, surfaces or composite bodies.
///
/// All of these are rejected before any node is created. Numerical edge
/// cases during stepping are guarded locally and never surface here.
#[derive(Debug, Clone, PartialEq)]
pub enum SimError {
    /// Every axis needs at least two nodes.
    InvalidResolution { axis: char, value: usize },
    /// Extents must be positive and finite.
    InvalidExtent,
    /// Mass must be positive and finite.
    InvalidMass,
    /// Stiffness must be positive and finite.
    InvalidStiffness,
    /// The spring force clamp must be positive.
    InvalidForceLimit,
    /// Damping coefficients must be non-negative and finite.
    InvalidDamping,
    /// Sphere radius must be positive and finite.
    InvalidRadius,
    /// Plane normal must be non-zero and finite.
    InvalidNormal,
    /// Box min must be strictly below max on every axis.
    InvalidBounds,
    /// Node index is out of bounds.
    NodeOutOfBounds { index: usize, count: usize },
    /// Body index is out of bounds.
    BodyOutOfBounds { index: usize, count: usize },
    /// Surface index is out of bounds.
    SurfaceOutOfBounds { index: usize, count: usize },
    /// Axis index must be 0, 1 or 2.
    InvalidAxis { axis: usize },
    /// Two faces cannot be stitched because their node grids differ.
    MismatchedFaces,
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::InvalidResolution { axis, value } => {
                write!(f, "resolution along {} must be at least 2 (got {})", axis, value)
            }
            SimError::InvalidExtent => write!(f, "extents must be positive and finite"),
            SimError::InvalidMass => write!(f, "mass must be positive and finite"),
            SimError::InvalidStiffness => write!(f, "stiffness must be positive and finite"),
            SimError::InvalidForceLimit => write!(f, "force clamp must be positive"),
            SimError::InvalidDamping => write!(f, "damping must be non-negative and finite"),
            SimError::InvalidRadius => write!(f, "radius must be positive and finite"),
            SimError::InvalidNormal => write!(f, "plane normal must be non-zero"),
            SimError::InvalidBounds => write!(f, "box min must be below max on every axis"),
            SimError::NodeOutOfBounds { index, count } => {
                write!(f, "node index {} out of bounds (count: {})", index, count)
            }
            SimError::BodyOutOfBounds { index, count } => {
                write!(f, "body index {} out of bounds (count: {})", index, count)
            }
            SimError::SurfaceOutOfBounds { index, count } => {
                write!(f, "surface index {} out of bounds (count: {})", index, count)
            }
            SimError::InvalidAxis { axis } => write!(f, "axis must be 0, 1 or 2 (got {})", axis),
            SimError::MismatchedFaces => write!(f, "faces have different node grids"),
        }
    }
}

impl core::error::Error for SimError {}
