use crate::error::{GeometryError, Result};
use crate::math::{points_coincide, Point3};

use super::{ChainParams, Curve, CurveDomain};

/// A bounded straight segment, parametrized on `[0, 1]`.
///
/// `P(t) = start + t * (end - start)`.
#[derive(Debug, Clone)]
pub struct LineSeg {
    start: Point3,
    end: Point3,
}

impl LineSeg {
    /// Creates a new segment.
    ///
    /// # Errors
    ///
    /// Returns an error if the two ends coincide.
    pub fn new(start: Point3, end: Point3) -> Result<Self> {
        if points_coincide(&start, &end) {
            return Err(GeometryError::CoincidentVertices(start).into());
        }
        Ok(Self { start, end })
    }

    /// Returns the start point.
    #[must_use]
    pub fn start(&self) -> &Point3 {
        &self.start
    }

    /// Returns the end point.
    #[must_use]
    pub fn end(&self) -> &Point3 {
        &self.end
    }

    /// Returns the length of the segment.
    #[must_use]
    pub fn length(&self) -> f64 {
        (self.end - self.start).norm()
    }

    /// Evaluates the segment at each of the given parameters, in order.
    ///
    /// # Errors
    ///
    /// Returns an error if any parameter lies outside `[0, 1]`.
    pub fn points_at(&self, params: &[f64]) -> Result<Vec<Point3>> {
        params.iter().map(|&t| self.evaluate(t)).collect()
    }

    /// Splits the segment into `n` equal pieces, returning `n + 1` points.
    ///
    /// # Errors
    ///
    /// Returns an error if `n` is zero.
    pub fn divide(&self, n: usize) -> Result<Vec<Point3>> {
        if n == 0 {
            return Err(GeometryError::ParameterOutOfRange {
                parameter: "n",
                value: 0.0,
                min: 1.0,
                max: f64::INFINITY,
            }
            .into());
        }
        #[allow(clippy::cast_precision_loss)]
        let chain = (0..=n)
            .map(|i| self.start + (self.end - self.start) * (i as f64 / n as f64))
            .collect();
        Ok(chain)
    }
}

impl Curve for LineSeg {
    fn evaluate(&self, t: f64) -> Result<Point3> {
        if !(0.0..=1.0).contains(&t) {
            return Err(GeometryError::ParameterOutOfRange {
                parameter: "t",
                value: t,
                min: 0.0,
                max: 1.0,
            }
            .into());
        }
        Ok(self.start + (self.end - self.start) * t)
    }

    fn domain(&self) -> CurveDomain {
        CurveDomain::new(0.0, 1.0)
    }

    fn is_closed(&self) -> bool {
        false
    }

    /// A straight segment has no crown, so this is just its two ends.
    fn approximate(&self, _params: &ChainParams) -> Result<Vec<Point3>> {
        Ok(vec![self.start, self.end])
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn point_at_proportion() {
        let seg = LineSeg::new(Point3::new(1.0, 1.0, 1.0), Point3::new(5.0, 5.0, 5.0)).unwrap();
        let pts = seg.points_at(&[0.6]).unwrap();
        assert!(points_coincide(&pts[0], &Point3::new(3.4, 3.4, 3.4)));
    }

    #[test]
    fn out_of_range_parameter() {
        let seg = LineSeg::new(Point3::origin(), Point3::new(1.0, 0.0, 0.0)).unwrap();
        assert!(seg.evaluate(1.5).is_err());
        assert!(seg.points_at(&[0.0, -0.1]).is_err());
    }

    #[test]
    fn divide_includes_both_ends() {
        let seg = LineSeg::new(Point3::origin(), Point3::new(4.0, 0.0, 0.0)).unwrap();
        let chain = seg.divide(4).unwrap();
        assert_eq!(chain.len(), 5);
        assert!(points_coincide(&chain[1], &Point3::new(1.0, 0.0, 0.0)));
        assert!(points_coincide(&chain[4], seg.end()));
        assert!(seg.divide(0).is_err());
    }

    #[test]
    fn coincident_ends_rejected() {
        let p = Point3::new(2.5, 2.5, 2.5);
        assert!(LineSeg::new(p, p).is_err());
    }
}
