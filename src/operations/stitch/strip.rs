use tracing::debug;

use crate::error::{Result, StitchError};
use crate::math::{Point3, DEFAULT_MESH_TOLERANCE};
use crate::mesh::Mesh;

use super::QuadSplit;

/// Fills a strip between two roughly parallel chains, one quad per rung.
///
/// The sides differ in meaning: each quad is wound
/// `port[g] -> port[g-1] -> starboard[g-1] -> starboard[g]`, so swapping
/// the sides flips every normal. When one side has a single extra point,
/// the strip is closed with one wedge facet on the longer side.
pub struct StitchStrip<'a> {
    port: &'a [Point3],
    starboard: &'a [Point3],
    tolerance: f64,
}

impl<'a> StitchStrip<'a> {
    /// Creates a new `StitchStrip` operation.
    #[must_use]
    pub fn new(port: &'a [Point3], starboard: &'a [Point3]) -> Self {
        Self {
            port,
            starboard,
            tolerance: DEFAULT_MESH_TOLERANCE,
        }
    }

    /// Sets the edge tolerance of the produced mesh.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Executes the stitch, returning the strip.
    ///
    /// # Errors
    ///
    /// Returns [`StitchError::TooFewPoints`] if either side has fewer than
    /// two points, [`StitchError::StripSkew`] if the sides differ by more
    /// than one point, or a geometry/topology error from the facets.
    pub fn execute(&self) -> Result<Mesh> {
        let (port, starboard) = (self.port, self.starboard);
        for (chain, points) in [("port", port), ("starboard", starboard)] {
            if points.len() < 2 {
                return Err(StitchError::TooFewPoints {
                    chain,
                    min: 2,
                    actual: points.len(),
                }
                .into());
            }
        }
        if port.len().abs_diff(starboard.len()) > 1 {
            return Err(StitchError::StripSkew {
                port: port.len(),
                starboard: starboard.len(),
            }
            .into());
        }

        debug!(port = port.len(), starboard = starboard.len(), "stitching strip");

        let lesser = port.len().min(starboard.len());
        let mut strip = Mesh::with_tolerance(self.tolerance)?;
        for g in 1..lesser {
            let pair = QuadSplit::new(port[g], port[g - 1], starboard[g - 1], starboard[g])
                .with_tolerance(self.tolerance)
                .execute()?;
            strip.absorb(pair)?;
        }

        let last = lesser - 1;
        if starboard.len() > port.len() {
            strip.add_points(port[last], starboard[last], starboard[last + 1])?;
        } else if port.len() > starboard.len() {
            strip.add_points(port[last], starboard[last], port[last + 1])?;
        }

        Ok(strip)
    }
}
