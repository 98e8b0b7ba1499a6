use crate::error::Result;
use crate::math::{Point3, Vector3};

use super::{circular_frame, close_chain, sample_sweep, ChainParams, Curve, CurveDomain};

/// A full circle in 3D space, the source of ring chains.
///
/// Defined by a center, radius, normal axis, and a reference direction
/// for the zero-angle. The parametric domain is `[0, 2*pi)` and the
/// curve is always closed.
///
/// `P(t) = center + radius * cos(t) * ref_dir + radius * sin(t) * binormal`
/// where `binormal = normal x ref_dir`.
#[derive(Debug, Clone)]
pub struct Circle {
    center: Point3,
    radius: f64,
    normal: Vector3,
    ref_dir: Vector3,
}

impl Circle {
    /// Creates a new circle.
    ///
    /// # Arguments
    ///
    /// * `center` - Center of the circle
    /// * `radius` - Radius (must be positive)
    /// * `normal` - Normal vector defining the circle plane
    /// * `ref_dir` - Reference direction for angle = 0 (must be perpendicular to normal)
    ///
    /// # Errors
    ///
    /// Returns an error if the radius is non-positive, the normal is zero-length,
    /// or the reference direction is not perpendicular to the normal.
    pub fn new(center: Point3, radius: f64, normal: Vector3, ref_dir: Vector3) -> Result<Self> {
        let (normal, ref_dir) = circular_frame(radius, &normal, &ref_dir)?;
        Ok(Self {
            center,
            radius,
            normal,
            ref_dir,
        })
    }

    /// A circle parallel to the XY plane at height `z`, starting on +X
    /// and running counter-clockwise seen from +Z.
    ///
    /// # Errors
    ///
    /// Returns an error if the radius is non-positive.
    pub fn horizontal(z: f64, radius: f64) -> Result<Self> {
        Self::new(Point3::new(0.0, 0.0, z), radius, Vector3::z(), Vector3::x())
    }

    /// Returns the center of the circle.
    #[must_use]
    pub fn center(&self) -> &Point3 {
        &self.center
    }

    /// Returns the radius of the circle.
    #[must_use]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Returns the normal vector of the circle plane.
    #[must_use]
    pub fn normal(&self) -> &Vector3 {
        &self.normal
    }

    fn binormal(&self) -> Vector3 {
        self.normal.cross(&self.ref_dir)
    }
}

impl Curve for Circle {
    fn evaluate(&self, t: f64) -> Result<Point3> {
        let binormal = self.binormal();
        Ok(self.center + self.ref_dir * (self.radius * t.cos()) + binormal * (self.radius * t.sin()))
    }

    fn domain(&self) -> CurveDomain {
        CurveDomain::new(0.0, std::f64::consts::TAU)
    }

    fn is_closed(&self) -> bool {
        true
    }

    fn approximate(&self, params: &ChainParams) -> Result<Vec<Point3>> {
        let mut chain = sample_sweep(
            &self.center,
            self.radius,
            &self.ref_dir,
            &self.binormal(),
            0.0,
            std::f64::consts::TAU,
            params,
        )?;
        close_chain(&mut chain);
        Ok(chain)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::{distance, TOLERANCE};
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn evaluate_at_pi_over_2() {
        let c = Circle::horizontal(1.0, 3.0).unwrap();
        let p = c.evaluate(FRAC_PI_2).unwrap();
        assert!((p - Point3::new(0.0, 3.0, 1.0)).norm() < 1e-9);
    }

    #[test]
    fn ring_is_closed_and_within_crown() {
        let c = Circle::horizontal(0.0, 4.0).unwrap();
        let params = ChainParams::default().with_crown(0.03);
        let ring = c.approximate(&params).unwrap();

        assert_eq!(ring.len(), 27);
        assert_eq!(ring.first(), ring.last());
        for pair in ring.windows(2) {
            let mid = nalgebra::center(&pair[0], &pair[1]);
            let crown = 4.0 - distance(&Point3::origin(), &mid);
            assert!(crown <= 0.03 + TOLERANCE);
        }
    }

    #[test]
    fn ring_runs_counter_clockwise() {
        let c = Circle::horizontal(0.0, 2.0).unwrap();
        let ring = c.approximate(&ChainParams::default()).unwrap();
        let turn = (ring[1] - ring[0]).cross(&(ring[2] - ring[1]));
        assert!(turn.z > 0.0);
    }

    #[test]
    fn invalid_radius() {
        assert!(Circle::horizontal(0.0, 0.0).is_err());
    }

    #[test]
    fn non_perpendicular_ref_dir() {
        let r = Circle::new(
            Point3::origin(),
            1.0,
            Vector3::z(),
            Vector3::new(1.0, 0.0, 1.0),
        );
        assert!(r.is_err());
    }
}
