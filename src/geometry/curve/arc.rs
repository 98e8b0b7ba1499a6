use crate::error::{GeometryError, Result};
use crate::math::{Point3, Vector3, TOLERANCE};

use super::{circular_frame, close_chain, sample_sweep, ChainParams, Curve, CurveDomain};

/// A circular arc in 3D space.
///
/// The parametric form sweeps from `start_angle` to `end_angle` (in
/// radians) around the normal axis. A negative sweep runs clockwise.
#[derive(Debug, Clone)]
pub struct Arc {
    center: Point3,
    radius: f64,
    normal: Vector3,
    ref_dir: Vector3,
    start_angle: f64,
    end_angle: f64,
}

impl Arc {
    /// Creates a new arc.
    ///
    /// # Errors
    ///
    /// Returns an error if the radius is non-positive, the normal is zero-length,
    /// the reference direction is not perpendicular to the normal, or the
    /// sweep is zero.
    pub fn new(
        center: Point3,
        radius: f64,
        normal: Vector3,
        ref_dir: Vector3,
        start_angle: f64,
        end_angle: f64,
    ) -> Result<Self> {
        let (normal, ref_dir) = circular_frame(radius, &normal, &ref_dir)?;
        if (end_angle - start_angle).abs() < TOLERANCE {
            return Err(GeometryError::Degenerate("arc sweep must be non-zero".into()).into());
        }
        Ok(Self {
            center,
            radius,
            normal,
            ref_dir,
            start_angle,
            end_angle,
        })
    }

    /// Returns the center of the arc.
    #[must_use]
    pub fn center(&self) -> &Point3 {
        &self.center
    }

    /// Returns the radius of the arc.
    #[must_use]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Signed sweep angle in radians.
    #[must_use]
    pub fn sweep(&self) -> f64 {
        self.end_angle - self.start_angle
    }

    fn binormal(&self) -> Vector3 {
        self.normal.cross(&self.ref_dir)
    }
}

impl Curve for Arc {
    fn evaluate(&self, t: f64) -> Result<Point3> {
        let binormal = self.binormal();
        Ok(self.center + self.ref_dir * (self.radius * t.cos()) + binormal * (self.radius * t.sin()))
    }

    fn domain(&self) -> CurveDomain {
        CurveDomain::new(self.start_angle, self.end_angle)
    }

    fn is_closed(&self) -> bool {
        (self.sweep().abs() - std::f64::consts::TAU).abs() < TOLERANCE
    }

    fn approximate(&self, params: &ChainParams) -> Result<Vec<Point3>> {
        let mut chain = sample_sweep(
            &self.center,
            self.radius,
            &self.ref_dir,
            &self.binormal(),
            self.start_angle,
            self.sweep(),
            params,
        )?;
        if self.is_closed() {
            close_chain(&mut chain);
        }
        Ok(chain)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::f64::consts::{FRAC_PI_2, PI};

    use approx::assert_relative_eq;

    use super::*;

    fn xy_arc(start: f64, end: f64) -> Arc {
        Arc::new(Point3::origin(), 2.0, Vector3::z(), Vector3::x(), start, end).unwrap()
    }

    #[test]
    fn approximate_hits_both_ends() {
        let arc = xy_arc(0.0, FRAC_PI_2);
        let chain = arc.approximate(&ChainParams::default()).unwrap();
        assert_relative_eq!(chain[0], Point3::new(2.0, 0.0, 0.0), epsilon = 1e-12);
        assert_relative_eq!(*chain.last().unwrap(), Point3::new(0.0, 2.0, 0.0), epsilon = 1e-12);
        assert!(!arc.is_closed());
    }

    #[test]
    fn negative_sweep_runs_clockwise() {
        let arc = xy_arc(PI, 0.0);
        let chain = arc.approximate(&ChainParams::default()).unwrap();
        assert!(chain[1].y > 0.0);
        assert!(chain[1].x < 0.0);
        assert_relative_eq!(*chain.last().unwrap(), Point3::new(2.0, 0.0, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn full_turn_repeats_first_point() {
        // Start off-axis so the raw end sample carries rounding error
        let arc = xy_arc(0.3, 0.3 + std::f64::consts::TAU);
        assert!(arc.is_closed());
        let chain = arc.approximate(&ChainParams::default()).unwrap();
        assert_eq!(chain.first(), chain.last());
    }

    #[test]
    fn zero_sweep_rejected() {
        assert!(Arc::new(Point3::origin(), 1.0, Vector3::z(), Vector3::x(), 1.0, 1.0).is_err());
    }
}
