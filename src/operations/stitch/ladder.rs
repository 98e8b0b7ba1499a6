use tracing::trace;

use crate::error::{Result, StitchError};
use crate::math::{distance, Point3, DEFAULT_MESH_TOLERANCE};
use crate::mesh::Mesh;

use super::QuadSplit;

/// Most opposite points a single rail pair can be laddered against.
pub const MAX_OPPOSITE_POINTS: usize = 6;

/// Stitches a two-point rail against an opposite chain of 2 to 6 points.
///
/// Winding follows `rail[0] -> opposite[0] -> opposite[1] -> rail[1]`.
///
/// - 2 opposite points: one quad split.
/// - 3 opposite points: a fixed fan of three facets.
/// - 4 to 6 opposite points: the widest gap in the opposite chain is
///   split as a quad with the rail, and the remaining opposite segments
///   are fanned to the nearer rail point. This keeps the widest span off a
///   single long, thin facet.
///
/// In every case the result has as many facets as opposite points.
pub struct LadderSegment<'a> {
    rail: &'a [Point3],
    opposite: &'a [Point3],
    tolerance: f64,
}

impl<'a> LadderSegment<'a> {
    /// Creates a new `LadderSegment` operation.
    #[must_use]
    pub fn new(rail: &'a [Point3], opposite: &'a [Point3]) -> Self {
        Self {
            rail,
            opposite,
            tolerance: DEFAULT_MESH_TOLERANCE,
        }
    }

    /// Sets the edge tolerance of the produced mesh.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Executes the stitch, returning a small mesh.
    ///
    /// # Errors
    ///
    /// Returns [`StitchError::RailLength`] if the rail is not exactly two
    /// points, [`StitchError::TooFewPoints`] if the opposite chain has
    /// fewer than two, [`StitchError::ChainImbalance`] if it has seven or
    /// more, or a geometry error for degenerate facets.
    pub fn execute(&self) -> Result<Mesh> {
        let [near, far] = *self.rail else {
            return Err(StitchError::RailLength {
                actual: self.rail.len(),
            }
            .into());
        };
        let oppo = self.opposite;
        trace!(opposite = oppo.len(), "ladder segment");

        match oppo.len() {
            0 | 1 => Err(StitchError::TooFewPoints {
                chain: "opposite",
                min: 2,
                actual: oppo.len(),
            }
            .into()),
            2 => QuadSplit::new(near, oppo[0], oppo[1], far)
                .with_tolerance(self.tolerance)
                .execute(),
            3 => {
                let mut patch = Mesh::with_tolerance(self.tolerance)?;
                patch.add_points(near, oppo[0], oppo[1])?;
                patch.add_points(near, oppo[1], far)?;
                patch.add_points(oppo[1], oppo[2], far)?;
                Ok(patch)
            }
            4..=MAX_OPPOSITE_POINTS => {
                let leap = find_largest_gap(oppo);
                let mut patch = QuadSplit::new(near, oppo[leap], oppo[leap + 1], far)
                    .with_tolerance(self.tolerance)
                    .execute()?;
                for pair in oppo[..=leap].windows(2) {
                    patch.add_points(near, pair[0], pair[1])?;
                }
                for pair in oppo[leap + 1..].windows(2) {
                    patch.add_points(far, pair[0], pair[1])?;
                }
                Ok(patch)
            }
            count => Err(StitchError::ChainImbalance {
                count,
                max: MAX_OPPOSITE_POINTS,
            }
            .into()),
        }
    }
}

/// Returns the lower index of the consecutive pair with the largest
/// separation. The first occurrence wins ties.
///
/// Chains shorter than two points have no gap and return 0.
#[must_use]
pub fn find_largest_gap(chain: &[Point3]) -> usize {
    let mut span = f64::NEG_INFINITY;
    let mut span_index = 0;
    for (i, pair) in chain.windows(2).enumerate() {
        let fresh = distance(&pair[0], &pair[1]);
        if fresh > span {
            span = fresh;
            span_index = i;
        }
    }
    span_index
}
