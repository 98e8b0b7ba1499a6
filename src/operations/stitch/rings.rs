use tracing::debug;

use crate::error::{Result, StitchError};
use crate::math::{Point3, DEFAULT_MESH_TOLERANCE};
use crate::mesh::Mesh;

use super::LadderSegment;

/// Stitches two rings (or open chains) of possibly different point counts.
///
/// Each inner segment is laddered against a proportional slice of the
/// outer chain. Slice ends are `round(g / inner_len * outer_len)`, except
/// the last, which is pinned to the final outer point so the band ends
/// where both chains end. Consecutive slices share their boundary point.
///
/// For closed rings, repeat the first point at the end of each chain. The
/// seam rung then appears twice and becomes an interior edge.
pub struct StitchRings<'a> {
    inner: &'a [Point3],
    outer: &'a [Point3],
    tolerance: f64,
}

impl<'a> StitchRings<'a> {
    /// Creates a new `StitchRings` operation. `outer` must have at least as
    /// many points as `inner`.
    #[must_use]
    pub fn new(inner: &'a [Point3], outer: &'a [Point3]) -> Self {
        Self {
            inner,
            outer,
            tolerance: DEFAULT_MESH_TOLERANCE,
        }
    }

    /// Sets the edge tolerance of the produced mesh.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Executes the stitch, returning the band between the two chains.
    ///
    /// # Errors
    ///
    /// Returns [`StitchError::TooFewPoints`] if either chain has fewer than
    /// three points, [`StitchError::OuterShorterThanInner`] if the outer
    /// chain is shorter, [`StitchError::ChainImbalance`] if a slice of the
    /// outer chain is too long for one ladder, or a geometry/topology error
    /// from the facets themselves.
    pub fn execute(&self) -> Result<Mesh> {
        let (inner, outer) = (self.inner, self.outer);
        for (chain, points) in [("inner", inner), ("outer", outer)] {
            if points.len() < 3 {
                return Err(StitchError::TooFewPoints {
                    chain,
                    min: 3,
                    actual: points.len(),
                }
                .into());
            }
        }
        if outer.len() < inner.len() {
            return Err(StitchError::OuterShorterThanInner {
                inner: inner.len(),
                outer: outer.len(),
            }
            .into());
        }

        debug!(inner = inner.len(), outer = outer.len(), "stitching rings");

        let mut band = Mesh::with_tolerance(self.tolerance)?;
        let mut outer_start = 0;
        for g in 1..inner.len() {
            // With outer_len >= inner_len, slice ends are strictly
            // increasing and the last free one is at most outer_len - 2.
            let outer_end = if g == inner.len() - 1 {
                outer.len() - 1
            } else {
                proportional_index(g, inner.len(), outer.len())
            };

            let card = LadderSegment::new(&inner[g - 1..=g], &outer[outer_start..=outer_end])
                .with_tolerance(self.tolerance)
                .execute()?;
            band.absorb(card)?;

            outer_start = outer_end;
        }

        Ok(band)
    }
}

/// Maps index `g` of a chain of `from_len` points onto a chain of `to_len`
/// points, rounding to the nearest index.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss
)]
fn proportional_index(g: usize, from_len: usize, to_len: usize) -> usize {
    (g as f64 / from_len as f64 * to_len as f64).round() as usize
}
