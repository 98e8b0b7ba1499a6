use crate::error::{GeometryError, Result};
use crate::math::{Matrix4, Point3, Vector3, TOLERANCE};

/// A rigid or affine point transform backed by a 4x4 homogeneous matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    matrix: Matrix4,
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform {
    /// Wraps an arbitrary homogeneous matrix.
    #[must_use]
    pub fn new(matrix: Matrix4) -> Self {
        Self { matrix }
    }

    /// The transform that leaves every point in place.
    #[must_use]
    pub fn identity() -> Self {
        Self::new(Matrix4::identity())
    }

    /// Translation by a displacement vector.
    #[must_use]
    pub fn translation(displacement: &Vector3) -> Self {
        Self::new(Matrix4::new_translation(displacement))
    }

    /// Uniform scaling about the origin.
    #[must_use]
    pub fn scaling(factor: f64) -> Self {
        Self::new(Matrix4::new_scaling(factor))
    }

    /// Rotation by `angle` radians about an axis through `axis_origin`.
    ///
    /// # Errors
    ///
    /// Returns an error if the axis direction is zero-length.
    pub fn rotation(axis_origin: &Point3, axis_direction: &Vector3, angle: f64) -> Result<Self> {
        let len = axis_direction.norm();
        if len < TOLERANCE {
            return Err(GeometryError::ZeroVector.into());
        }
        let axis = axis_direction / len;

        // Translate to origin, rotate, translate back
        let t_neg = Matrix4::new_translation(&(-axis_origin.coords));
        let rot = rotation_matrix(&axis, angle);
        let t_pos = Matrix4::new_translation(&axis_origin.coords);
        Ok(Self::new(t_pos * rot * t_neg))
    }

    /// Composes two transforms: `self` is applied first, then `next`.
    #[must_use]
    pub fn then(&self, next: &Transform) -> Self {
        Self::new(next.matrix * self.matrix)
    }

    /// Returns the underlying matrix.
    #[must_use]
    pub fn matrix(&self) -> &Matrix4 {
        &self.matrix
    }

    /// Transforms a point (homogeneous coordinates, w = 1).
    #[must_use]
    pub fn apply(&self, point: &Point3) -> Point3 {
        let v = self.matrix * nalgebra::Vector4::new(point.x, point.y, point.z, 1.0);
        Point3::new(v.x, v.y, v.z)
    }
}

/// Builds a 4x4 rotation matrix around a unit axis by an angle (Rodrigues).
#[allow(clippy::many_single_char_names)]
fn rotation_matrix(axis: &Vector3, angle: f64) -> Matrix4 {
    let c = angle.cos();
    let s = angle.sin();
    let t = 1.0 - c;
    let (x, y, z) = (axis.x, axis.y, axis.z);

    #[allow(clippy::suspicious_operation_groupings)]
    Matrix4::new(
        t * x * x + c,     t * x * y - s * z, t * x * z + s * y, 0.0,
        t * x * y + s * z, t * y * y + c,     t * y * z - s * x, 0.0,
        t * x * z - s * y, t * y * z + s * x, t * z * z + c,     0.0,
        0.0,               0.0,               0.0,               1.0,
    )
}
