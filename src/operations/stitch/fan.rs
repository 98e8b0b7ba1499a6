use tracing::debug;

use crate::error::{Result, StitchError};
use crate::math::{Point3, DEFAULT_MESH_TOLERANCE};
use crate::mesh::Mesh;

/// Caps a ring with a disk of facets meeting at an apex.
///
/// Each facet is `(apex, ring[i - 1], ring[i])`. A closed ring (first
/// point repeated at the end) produces a watertight cap.
pub struct FanAroundApex<'a> {
    ring: &'a [Point3],
    apex: Point3,
    tolerance: f64,
}

impl<'a> FanAroundApex<'a> {
    /// Creates a new `FanAroundApex` operation.
    #[must_use]
    pub fn new(ring: &'a [Point3], apex: Point3) -> Self {
        Self {
            ring,
            apex,
            tolerance: DEFAULT_MESH_TOLERANCE,
        }
    }

    /// Sets the edge tolerance of the produced mesh.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Executes the fan, returning the cap.
    ///
    /// # Errors
    ///
    /// Returns [`StitchError::TooFewPoints`] if the ring has fewer than two
    /// points, or a geometry error if the apex is in line with a ring
    /// segment.
    pub fn execute(&self) -> Result<Mesh> {
        if self.ring.len() < 2 {
            return Err(StitchError::TooFewPoints {
                chain: "ring",
                min: 2,
                actual: self.ring.len(),
            }
            .into());
        }
        debug!(ring = self.ring.len(), "fanning around apex");

        let mut cap = Mesh::with_tolerance(self.tolerance)?;
        for pair in self.ring.windows(2) {
            cap.add_points(self.apex, pair[0], pair[1])?;
        }
        Ok(cap)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::{ChainParams, Circle, Curve};
    use crate::math::Vector3;

    #[test]
    fn closed_ring_cap() {
        let ring = Circle::horizontal(0.0, 2.0)
            .unwrap()
            .approximate(&ChainParams::default().with_crown(0.05))
            .unwrap();
        let segments = ring.len() - 1;
        let cap = FanAroundApex::new(&ring, Point3::new(0.0, 0.0, 1.0))
            .execute()
            .unwrap();

        assert_eq!(cap.facet_count(), segments);
        // Only the rim is left open
        assert_eq!(cap.boundary_count(), segments);
        assert_eq!(cap.interior_count(), segments);
        assert!(cap.is_coherent(&Vector3::z()));
    }

    #[test]
    fn open_arc_fan() {
        let ring = [
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(-1.0, 0.0, 0.0),
        ];
        let cap = FanAroundApex::new(&ring, Point3::origin()).execute().unwrap();
        assert_eq!(cap.facet_count(), 2);
        assert_eq!(cap.boundary_count(), 4);
        assert_eq!(cap.interior_count(), 1);
    }

    #[test]
    fn apex_in_line_with_segment_fails() {
        let ring = [Point3::new(1.0, 0.0, 0.0), Point3::new(2.0, 0.0, 0.0)];
        assert!(FanAroundApex::new(&ring, Point3::origin()).execute().is_err());
    }

    #[test]
    fn lonely_point_rejected() {
        let ring = [Point3::new(1.0, 0.0, 0.0)];
        assert!(FanAroundApex::new(&ring, Point3::origin()).execute().is_err());
    }
}
