use super::{Point3, POINT_TOLERANCE, TOLERANCE};

/// Euclidean distance between two points.
#[must_use]
pub fn distance(a: &Point3, b: &Point3) -> f64 {
    (b - a).norm()
}

/// Point identity: true when the points are closer than [`POINT_TOLERANCE`].
///
/// Not transitive. A long chain of points each within tolerance of the
/// next can drift arbitrarily far.
#[must_use]
pub fn points_coincide(a: &Point3, b: &Point3) -> bool {
    distance(a, b) < POINT_TOLERANCE
}

/// Returns true when no two of the three points coincide.
#[must_use]
pub fn are_distinct(a: &Point3, b: &Point3, c: &Point3) -> bool {
    !points_coincide(a, b) && !points_coincide(a, c) && !points_coincide(b, c)
}

/// Returns true when `c` lies on the line through `a` and `b`.
///
/// Tests whether `c - a` is a scalar multiple of `b - a`. Callers should
/// check [`are_distinct`] first, coincident points are reported as collinear.
#[must_use]
pub fn are_collinear(a: &Point3, b: &Point3, c: &Point3) -> bool {
    let this_way = b - a;
    let that_way = c - a;
    let scale = this_way.norm() * that_way.norm();
    if scale < TOLERANCE {
        return true;
    }
    this_way.cross(&that_way).norm() / scale < TOLERANCE
}
