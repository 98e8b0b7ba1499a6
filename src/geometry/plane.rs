use crate::error::{GeometryError, Result};
use crate::math::{Point3, Vector3, TOLERANCE};

/// An infinite plane in 3D space, used as a mirror.
///
/// Defined by an origin point and a unit normal.
#[derive(Debug, Clone)]
pub struct Plane {
    origin: Point3,
    normal: Vector3,
}

impl Plane {
    /// Creates a plane from an origin and a normal vector.
    ///
    /// # Errors
    ///
    /// Returns an error if the normal vector is zero-length.
    pub fn from_normal(origin: Point3, normal: Vector3) -> Result<Self> {
        let len = normal.norm();
        if len < TOLERANCE {
            return Err(GeometryError::ZeroVector.into());
        }
        Ok(Self {
            origin,
            normal: normal / len,
        })
    }

    /// Creates a plane through an origin spanned by two in-plane directions.
    ///
    /// # Errors
    ///
    /// Returns an error if either direction is zero-length or the two
    /// are parallel.
    pub fn from_directions(origin: Point3, u_dir: Vector3, v_dir: Vector3) -> Result<Self> {
        if u_dir.norm() < TOLERANCE || v_dir.norm() < TOLERANCE {
            return Err(GeometryError::ZeroVector.into());
        }
        let normal = u_dir.normalize().cross(&v_dir.normalize());
        if normal.norm() < TOLERANCE {
            return Err(
                GeometryError::Degenerate("plane directions are parallel".into()).into(),
            );
        }
        Self::from_normal(origin, normal)
    }

    /// Returns the origin point of the plane.
    #[must_use]
    pub fn origin(&self) -> &Point3 {
        &self.origin
    }

    /// Returns the unit normal of the plane.
    #[must_use]
    pub fn normal(&self) -> &Vector3 {
        &self.normal
    }

    /// Signed distance from the plane, positive on the normal side.
    #[must_use]
    pub fn signed_distance(&self, point: &Point3) -> f64 {
        (point - self.origin).dot(&self.normal)
    }

    /// Reflects a point through the plane.
    #[must_use]
    pub fn mirror_point(&self, point: &Point3) -> Point3 {
        point - self.normal * (2.0 * self.signed_distance(point))
    }

    /// Reflects a direction through the plane (translation-free).
    #[must_use]
    pub fn mirror_direction(&self, dir: &Vector3) -> Vector3 {
        dir - self.normal * (2.0 * dir.dot(&self.normal))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn mirror_across_yz_plane() {
        let plane = Plane::from_normal(Point3::origin(), Vector3::x()).unwrap();
        let m = plane.mirror_point(&Point3::new(3.0, 1.0, -2.0));
        assert!((m - Point3::new(-3.0, 1.0, -2.0)).norm() < TOLERANCE);
    }

    #[test]
    fn mirror_across_offset_plane() {
        let plane = Plane::from_normal(Point3::new(0.0, 0.0, 5.0), Vector3::new(0.0, 0.0, 2.0))
            .unwrap();
        let m = plane.mirror_point(&Point3::new(1.0, 1.0, 1.0));
        assert!((m - Point3::new(1.0, 1.0, 9.0)).norm() < TOLERANCE);
        assert!((plane.signed_distance(&m) - 4.0).abs() < TOLERANCE);
    }

    #[test]
    fn mirror_direction_ignores_origin() {
        let plane = Plane::from_normal(Point3::new(7.0, 0.0, 0.0), Vector3::x()).unwrap();
        let d = plane.mirror_direction(&Vector3::new(1.0, 2.0, 0.0));
        assert!((d - Vector3::new(-1.0, 2.0, 0.0)).norm() < TOLERANCE);
    }

    #[test]
    fn from_directions_builds_normal() {
        let plane = Plane::from_directions(Point3::origin(), Vector3::x(), Vector3::y()).unwrap();
        assert!((plane.normal() - Vector3::z()).norm() < TOLERANCE);
    }

    #[test]
    fn zero_normal_rejected() {
        assert!(Plane::from_normal(Point3::origin(), Vector3::zeros()).is_err());
        assert!(Plane::from_directions(Point3::origin(), Vector3::x(), Vector3::x() * 3.0).is_err());
    }
}
