//! Point chain sources.
//!
//! Curves here exist only to feed ordered point chains to the stitching
//! operations. Each curve approximates itself with as few points as the
//! allowed crown (chordal deviation) permits.

mod arc;
mod circle;
mod line_seg;

pub use arc::Arc;
pub use circle::Circle;
pub use line_seg::LineSeg;

use crate::error::{GeometryError, Result};
use crate::math::{Point3, Vector3};

/// Parameter domain for a curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveDomain {
    /// Start of the parameter range.
    pub t_min: f64,
    /// End of the parameter range.
    pub t_max: f64,
}

impl CurveDomain {
    /// Creates a new curve domain.
    #[must_use]
    pub fn new(t_min: f64, t_max: f64) -> Self {
        Self { t_min, t_max }
    }
}

/// Parameters controlling chain approximation.
#[derive(Debug, Clone, Copy)]
pub struct ChainParams {
    /// Maximum allowed crown (chordal deviation from the true curve).
    pub crown: f64,
    /// Minimum number of segments per curve.
    pub min_segments: usize,
    /// Maximum number of segments per curve.
    pub max_segments: usize,
}

impl Default for ChainParams {
    fn default() -> Self {
        Self {
            crown: 0.01,
            min_segments: 4,
            max_segments: 256,
        }
    }
}

impl ChainParams {
    /// Returns params with a different crown, other limits unchanged.
    #[must_use]
    pub fn with_crown(mut self, crown: f64) -> Self {
        self.crown = crown;
        self
    }

    fn validate(&self) -> Result<()> {
        if !(self.crown.is_finite() && self.crown > 0.0) {
            return Err(GeometryError::ParameterOutOfRange {
                parameter: "crown",
                value: self.crown,
                min: 0.0,
                max: f64::INFINITY,
            }
            .into());
        }
        if self.min_segments == 0 || self.max_segments < self.min_segments {
            #[allow(clippy::cast_precision_loss)]
            return Err(GeometryError::ParameterOutOfRange {
                parameter: "max_segments",
                value: self.max_segments as f64,
                min: self.min_segments.max(1) as f64,
                max: f64::INFINITY,
            }
            .into());
        }
        Ok(())
    }
}

/// Trait for parametric curves that can be approximated by a point chain.
pub trait Curve {
    /// Evaluates the curve at parameter `t`, returning the 3D point.
    ///
    /// # Errors
    ///
    /// Returns an error if evaluation fails.
    fn evaluate(&self, t: f64) -> Result<Point3>;

    /// Returns the parameter domain of the curve.
    fn domain(&self) -> CurveDomain;

    /// Returns whether the curve is closed.
    fn is_closed(&self) -> bool;

    /// Approximates the curve with an ordered chain whose chords stay within
    /// `params.crown` of the true curve.
    ///
    /// The chain runs from the start of the domain to its end. A closed
    /// curve repeats its first point at the end.
    ///
    /// # Errors
    ///
    /// Returns an error if the parameters are invalid or evaluation fails.
    fn approximate(&self, params: &ChainParams) -> Result<Vec<Point3>>;
}

/// Number of chords needed to hold an angular sweep within the crown.
///
/// From the sagitta formula: `crown = r * (1 - cos(θ/2))`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn angular_segment_count(radius: f64, sweep: f64, params: &ChainParams) -> usize {
    if radius > params.crown {
        let max_swing = 2.0 * (1.0 - params.crown / radius).acos();
        let computed = (sweep.abs() / max_swing).ceil() as usize;
        computed.clamp(params.min_segments, params.max_segments)
    } else {
        params.min_segments
    }
}

/// Samples a circular sweep `center + r cos(t) ref_dir + r sin(t) binormal`
/// for `t` in `[start, start + sweep]`.
fn sample_sweep(
    center: &Point3,
    radius: f64,
    ref_dir: &Vector3,
    binormal: &Vector3,
    start: f64,
    sweep: f64,
    params: &ChainParams,
) -> Result<Vec<Point3>> {
    params.validate()?;
    let n = angular_segment_count(radius, sweep, params);
    #[allow(clippy::cast_precision_loss)]
    let step = sweep / n as f64;

    let chain = (0..=n)
        .map(|i| {
            #[allow(clippy::cast_precision_loss)]
            let t = start + step * i as f64;
            center + ref_dir * (radius * t.cos()) + binormal * (radius * t.sin())
        })
        .collect();
    Ok(chain)
}

/// Snaps the last point of a closed chain onto the first, so the seam edge
/// hashes identically at both ends.
fn close_chain(chain: &mut [Point3]) {
    if let (Some(first), Some(last)) = (chain.first().copied(), chain.last_mut()) {
        *last = first;
    }
}

/// Validates the shared circle/arc frame, returning unit `(normal, ref_dir)`.
fn circular_frame(radius: f64, normal: &Vector3, ref_dir: &Vector3) -> Result<(Vector3, Vector3)> {
    use crate::math::TOLERANCE;

    if radius < TOLERANCE {
        return Err(GeometryError::Degenerate("radius must be positive".into()).into());
    }
    let normal_len = normal.norm();
    let ref_len = ref_dir.norm();
    if normal_len < TOLERANCE || ref_len < TOLERANCE {
        return Err(GeometryError::ZeroVector.into());
    }
    let normal = normal / normal_len;
    let ref_dir = ref_dir / ref_len;
    if normal.dot(&ref_dir).abs() > TOLERANCE {
        return Err(GeometryError::Degenerate(
            "reference direction must be perpendicular to normal".into(),
        )
        .into());
    }
    Ok((normal, ref_dir))
}
