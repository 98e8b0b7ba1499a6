use std::hash::{Hash, Hasher};

use crate::math::Point3;

/// Quantized coordinates of one edge endpoint.
type Cell = [i64; 3];

/// Orientation-independent key for one triangle side.
///
/// Both endpoints are snapped to a grid of spacing `tolerance` and the two
/// grid cells are stored in lexicographic order. Equality and hashing look
/// only at the cells, so `EdgeKey::new(p, q, t) == EdgeKey::new(q, p, t)`
/// and endpoints that drift by less than half a grid step still collide.
///
/// The unquantized endpoints of the first recording are kept for export.
#[derive(Debug, Clone, Copy)]
pub struct EdgeKey {
    lo: Cell,
    hi: Cell,
    start: Point3,
    end: Point3,
}

impl EdgeKey {
    /// Builds the key for the side `start`-`end` at the given mesh tolerance.
    #[must_use]
    pub fn new(start: Point3, end: Point3, tolerance: f64) -> Self {
        let qa = quantize(&start, tolerance);
        let qb = quantize(&end, tolerance);
        let (lo, hi) = if qa <= qb { (qa, qb) } else { (qb, qa) };
        Self { lo, hi, start, end }
    }

    /// One endpoint, as first recorded.
    #[must_use]
    pub fn start(&self) -> &Point3 {
        &self.start
    }

    /// The other endpoint, as first recorded.
    #[must_use]
    pub fn end(&self) -> &Point3 {
        &self.end
    }

    /// Both endpoints.
    #[must_use]
    pub fn endpoints(&self) -> (Point3, Point3) {
        (self.start, self.end)
    }

    /// Whether both endpoints fall into the same grid cell.
    #[must_use]
    pub fn is_collapsed(&self) -> bool {
        self.lo == self.hi
    }
}

impl PartialEq for EdgeKey {
    fn eq(&self, other: &Self) -> bool {
        self.lo == other.lo && self.hi == other.hi
    }
}

impl Eq for EdgeKey {}

impl Hash for EdgeKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.lo.hash(state);
        self.hi.hash(state);
    }
}

/// Rounds each coordinate to the nearest multiple of `tolerance`.
#[allow(clippy::cast_possible_truncation)]
fn quantize(p: &Point3, tolerance: f64) -> Cell {
    [
        (p.x / tolerance).round() as i64,
        (p.y / tolerance).round() as i64,
        (p.z / tolerance).round() as i64,
    ]
}

/// How many facets use an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeKind {
    /// Used by exactly one facet.
    Boundary,
    /// Used by exactly two facets.
    Interior,
}

/// An edge as handed to a renderer: endpoints plus usage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeSegment {
    pub start: Point3,
    pub end: Point3,
    pub kind: EdgeKind,
}
