mod point;

pub use point::{are_collinear, are_distinct, distance, points_coincide};

/// 3D point type.
pub type Point3 = nalgebra::Point3<f64>;

/// 3D vector type.
pub type Vector3 = nalgebra::Vector3<f64>;

/// 4x4 transformation matrix.
pub type Matrix4 = nalgebra::Matrix4<f64>;

/// Tolerance for vector-level floating-point comparisons (lengths, sines).
pub const TOLERANCE: f64 = 1e-10;

/// Two points closer than this are the same point.
pub const POINT_TOLERANCE: f64 = 1e-4;

/// Default quantization step for edge keys, sized for millimetre models.
///
/// Coarser than [`POINT_TOLERANCE`]: edges reached through different
/// transform paths must land in the same bucket.
pub const DEFAULT_MESH_TOLERANCE: f64 = 0.01;
