//! Triangle container with manifold edge bookkeeping.
//!
//! A [`Mesh`] owns its facets in insertion order and tracks every facet
//! side in one of two sets: boundary edges (used once) and interior edges
//! (used twice). No edge may ever be used a third time. Every mutation is
//! transactional: a rejected `add` or `absorb` leaves the mesh untouched.

mod edge;
mod export;
mod facet;

pub use edge::{EdgeKey, EdgeKind, EdgeSegment};
pub use export::TriangleMesh;
pub use facet::Facet;

use std::collections::{HashMap, HashSet};

use tracing::{debug, warn};

use crate::error::{GeometryError, Result, TopologyError};
use crate::math::{Point3, Vector3, DEFAULT_MESH_TOLERANCE, POINT_TOLERANCE};

/// An insertion-ordered set of facets plus their edge usage.
///
/// Invariant: `boundary_count() + 2 * interior_count() == 3 * facet_count()`.
///
/// Not synchronized. Build disjoint meshes on as many threads as you like,
/// then fold them into one owner with [`Mesh::absorb`].
#[derive(Debug)]
pub struct Mesh {
    facets: Vec<Facet>,
    boundary: HashSet<EdgeKey>,
    interior: HashSet<EdgeKey>,
    tolerance: f64,
}

impl Default for Mesh {
    fn default() -> Self {
        Self::new()
    }
}

impl Mesh {
    /// Creates an empty mesh with [`DEFAULT_MESH_TOLERANCE`].
    #[must_use]
    pub fn new() -> Self {
        Self {
            facets: Vec::new(),
            boundary: HashSet::new(),
            interior: HashSet::new(),
            tolerance: DEFAULT_MESH_TOLERANCE,
        }
    }

    /// Creates an empty mesh whose edge keys quantize at `tolerance`.
    ///
    /// # Errors
    ///
    /// Returns an error if `tolerance` is not finite or is finer than
    /// [`POINT_TOLERANCE`].
    pub fn with_tolerance(tolerance: f64) -> Result<Self> {
        if !tolerance.is_finite() || tolerance < POINT_TOLERANCE {
            return Err(GeometryError::ParameterOutOfRange {
                parameter: "mesh tolerance",
                value: tolerance,
                min: POINT_TOLERANCE,
                max: f64::INFINITY,
            }
            .into());
        }
        Ok(Self {
            tolerance,
            ..Self::new()
        })
    }

    /// Copies the mesh by re-adding every facet to a fresh mesh, so the
    /// edge sets are derived again instead of shared.
    ///
    /// # Errors
    ///
    /// Returns an error if re-adding a facet overflows an edge.
    pub fn rebuild(&self) -> Result<Self> {
        let mut copy = Self {
            tolerance: self.tolerance,
            ..Self::new()
        };
        for facet in &self.facets {
            copy.add(facet.clone())?;
        }
        Ok(copy)
    }

    /// Quantization step used for this mesh's edge keys.
    #[must_use]
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// The facets, in insertion order.
    #[must_use]
    pub fn facets(&self) -> &[Facet] {
        &self.facets
    }

    #[must_use]
    pub fn facet_count(&self) -> usize {
        self.facets.len()
    }

    /// Number of edges used by exactly one facet.
    #[must_use]
    pub fn boundary_count(&self) -> usize {
        self.boundary.len()
    }

    /// Number of edges used by exactly two facets.
    #[must_use]
    pub fn interior_count(&self) -> usize {
        self.interior.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.facets.is_empty()
    }

    /// A non-empty mesh with no boundary edges encloses a volume.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        !self.is_empty() && self.boundary.is_empty()
    }

    /// Builds the key this mesh uses for the side `start`-`end`.
    #[must_use]
    pub fn edge_key(&self, start: Point3, end: Point3) -> EdgeKey {
        EdgeKey::new(start, end, self.tolerance)
    }

    /// How many facets currently use the given edge (0, 1 or 2).
    #[must_use]
    pub fn edge_usage(&self, key: &EdgeKey) -> u8 {
        if self.interior.contains(key) {
            2
        } else if self.boundary.contains(key) {
            1
        } else {
            0
        }
    }

    /// Adds a validated facet, recording its three sides.
    ///
    /// # Errors
    ///
    /// Returns [`TopologyError::EdgeOverflow`] if any side is already used
    /// twice, or [`GeometryError::CollapsedEdge`] if a side is shorter than
    /// the mesh tolerance. The mesh is left unchanged in either case.
    pub fn add(&mut self, facet: Facet) -> Result<()> {
        let mut plan = EdgePlan::new(self);
        for (start, end) in facet.sides() {
            plan.record_edge(start, end)?;
        }
        let pending = plan.finish();
        self.commit(pending);
        self.facets.push(facet);
        Ok(())
    }

    /// Builds a facet from three points and adds it.
    ///
    /// # Errors
    ///
    /// Returns a geometry error for degenerate points, or an edge overflow.
    pub fn add_points(&mut self, a: Point3, b: Point3, c: Point3) -> Result<()> {
        self.add(Facet::new(a, b, c)?)
    }

    /// Merges another mesh into this one.
    ///
    /// Interior edges of `other` must be new to this mesh. Boundary edges
    /// of `other` are recorded like any facet side, so a boundary shared by
    /// both meshes becomes interior.
    ///
    /// # Errors
    ///
    /// Returns [`TopologyError::EdgeOverflow`] if the merge would use an
    /// edge a third time, or [`GeometryError::CollapsedEdge`] if an edge of
    /// `other` is shorter than this mesh's tolerance. Nothing is merged in
    /// either case.
    pub fn absorb(&mut self, other: Mesh) -> Result<()> {
        let mut plan = EdgePlan::new(self);
        let outcome = other
            .interior
            .iter()
            .try_for_each(|hinge| plan.record_mated_edge(*hinge.start(), *hinge.end()))
            .and_then(|()| {
                other
                    .boundary
                    .iter()
                    .try_for_each(|hinge| plan.record_edge(*hinge.start(), *hinge.end()))
            });
        if let Err(err) = outcome {
            warn!(facets = other.facet_count(), %err, "mesh merge rejected");
            return Err(err);
        }
        let pending = plan.finish();
        self.commit(pending);

        debug!(
            added = other.facets.len(),
            total = self.facets.len() + other.facets.len(),
            "absorbed mesh"
        );
        self.facets.extend(other.facets);
        Ok(())
    }

    /// True iff every facet normal has a strictly positive component along
    /// `guide`.
    #[must_use]
    pub fn is_coherent(&self, guide: &Vector3) -> bool {
        self.facets
            .iter()
            .all(|facet| facet.normal().is_ok_and(|n| n.dot(guide) > 0.0))
    }

    /// Endpoint pairs of the edges used once. Order is unspecified.
    #[must_use]
    pub fn boundary_edges(&self) -> Vec<(Point3, Point3)> {
        self.boundary.iter().map(EdgeKey::endpoints).collect()
    }

    /// Endpoint pairs of the edges used twice. Order is unspecified.
    #[must_use]
    pub fn interior_edges(&self) -> Vec<(Point3, Point3)> {
        self.interior.iter().map(EdgeKey::endpoints).collect()
    }

    /// Every edge with its usage, boundary edges first.
    #[must_use]
    pub fn edge_segments(&self) -> Vec<EdgeSegment> {
        let tag = |kind| {
            move |key: &EdgeKey| EdgeSegment {
                start: *key.start(),
                end: *key.end(),
                kind,
            }
        };
        self.boundary
            .iter()
            .map(tag(EdgeKind::Boundary))
            .chain(self.interior.iter().map(tag(EdgeKind::Interior)))
            .collect()
    }

    fn commit(&mut self, pending: HashMap<EdgeKey, u8>) {
        for (key, usage) in pending {
            if usage == 1 {
                self.boundary.insert(key);
            } else {
                let key = self.boundary.take(&key).unwrap_or(key);
                self.interior.insert(key);
            }
        }
    }
}

/// Staged edge updates for one `add` or `absorb`.
///
/// Usage counts are checked against the mesh plus everything staged so
/// far, and only written back once every edge has passed.
struct EdgePlan<'a> {
    mesh: &'a Mesh,
    pending: HashMap<EdgeKey, u8>,
}

impl<'a> EdgePlan<'a> {
    fn new(mesh: &'a Mesh) -> Self {
        Self {
            mesh,
            pending: HashMap::new(),
        }
    }

    /// Key for a side, rejecting sides whose ends share one grid cell.
    fn key(&self, start: Point3, end: Point3) -> Result<EdgeKey> {
        let key = self.mesh.edge_key(start, end);
        if key.is_collapsed() {
            return Err(GeometryError::CollapsedEdge {
                start,
                end,
                tolerance: self.mesh.tolerance,
            }
            .into());
        }
        Ok(key)
    }

    fn usage(&self, key: &EdgeKey) -> u8 {
        self.pending
            .get(key)
            .copied()
            .unwrap_or_else(|| self.mesh.edge_usage(key))
    }

    /// One more facet uses this edge: 0 -> boundary, 1 -> interior,
    /// 2 -> overflow.
    fn record_edge(&mut self, start: Point3, end: Point3) -> Result<()> {
        let key = self.key(start, end)?;
        let usage = self.usage(&key);
        if usage >= 2 {
            return Err(TopologyError::EdgeOverflow { start, end }.into());
        }
        self.pending.insert(key, usage + 1);
        Ok(())
    }

    /// An edge already shared by two facets elsewhere. It must be unknown
    /// here.
    fn record_mated_edge(&mut self, start: Point3, end: Point3) -> Result<()> {
        let key = self.key(start, end)?;
        if self.usage(&key) != 0 {
            return Err(TopologyError::EdgeOverflow { start, end }.into());
        }
        self.pending.insert(key, 2);
        Ok(())
    }

    fn finish(self) -> HashMap<EdgeKey, u8> {
        self.pending
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::WeftError;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    fn assert_counts(mesh: &Mesh) {
        assert_eq!(
            mesh.boundary_count() + 2 * mesh.interior_count(),
            3 * mesh.facet_count()
        );
    }

    /// Two triangles sharing the diagonal (0,0)-(1,1) of the unit square.
    fn unit_square() -> Mesh {
        let mut mesh = Mesh::new();
        mesh.add_points(p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0), p(1.0, 1.0, 0.0))
            .unwrap();
        mesh.add_points(p(1.0, 1.0, 0.0), p(0.0, 1.0, 0.0), p(0.0, 0.0, 0.0))
            .unwrap();
        mesh
    }

    fn is_overflow(r: &Result<()>) -> bool {
        matches!(
            r,
            Err(WeftError::Topology(TopologyError::EdgeOverflow { .. }))
        )
    }

    #[test]
    fn single_facet_is_all_boundary() {
        let mut mesh = Mesh::new();
        mesh.add_points(p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0), p(0.0, 1.0, 0.0))
            .unwrap();
        assert_eq!(mesh.facet_count(), 1);
        assert_eq!(mesh.boundary_count(), 3);
        assert_eq!(mesh.interior_count(), 0);
        assert!(!mesh.is_closed());
    }

    #[test]
    fn shared_side_becomes_interior() {
        let mesh = unit_square();
        assert_eq!(mesh.boundary_count(), 4);
        assert_eq!(mesh.interior_count(), 1);
        let key = mesh.edge_key(p(1.0, 1.0, 0.0), p(0.0, 0.0, 0.0));
        assert_eq!(mesh.edge_usage(&key), 2);
        assert_counts(&mesh);
    }

    #[test]
    fn third_use_overflows_and_leaves_mesh_untouched() {
        let mut mesh = unit_square();
        let r = mesh.add_points(p(0.0, 0.0, 0.0), p(1.0, 1.0, 0.0), p(0.5, 0.5, 1.0));
        assert!(is_overflow(&r));
        assert_eq!(mesh.facet_count(), 2);
        assert_eq!(mesh.boundary_count(), 4);
        assert_eq!(mesh.interior_count(), 1);
    }

    #[test]
    fn failed_add_does_not_commit_earlier_sides() {
        let mut mesh = unit_square();
        // First side (0,0,0)-(0,0,1) is new, second side closes on nothing,
        // third side is the already mated diagonal.
        let r = mesh.add_points(p(0.0, 0.0, 1.0), p(1.0, 1.0, 0.0), p(0.0, 0.0, 0.0));
        assert!(is_overflow(&r));
        let fresh = mesh.edge_key(p(0.0, 0.0, 1.0), p(1.0, 1.0, 0.0));
        assert_eq!(mesh.edge_usage(&fresh), 0);
        assert_counts(&mesh);
    }

    #[test]
    fn absorb_joins_shared_boundary() {
        let mut left = Mesh::new();
        left.add_points(p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0), p(0.0, 1.0, 0.0))
            .unwrap();
        let mut right = Mesh::new();
        right
            .add_points(p(1.0, 0.0, 0.0), p(1.0, 1.0, 0.0), p(0.0, 1.0, 0.0))
            .unwrap();

        left.absorb(right).unwrap();
        assert_eq!(left.facet_count(), 2);
        assert_eq!(left.boundary_count(), 4);
        assert_eq!(left.interior_count(), 1);
        assert_counts(&left);
    }

    #[test]
    fn absorb_rejects_reappearing_mated_edge() {
        let mut mesh = unit_square();
        let duplicate = unit_square();
        let r = mesh.absorb(duplicate);
        assert!(is_overflow(&r));
        assert_eq!(mesh.facet_count(), 2);
        assert_eq!(mesh.boundary_count(), 4);
        assert_eq!(mesh.interior_count(), 1);
    }

    #[test]
    fn absorb_is_atomic_when_boundary_overflows() {
        let mut mesh = unit_square();
        // One facet on the already mated diagonal, one far away

        let mut wing = Mesh::new();
        wing.add_points(p(0.0, 0.0, 0.0), p(1.0, 1.0, 0.0), p(0.5, 0.5, 1.0))
            .unwrap();
        wing.add_points(p(2.0, 0.0, 0.0), p(3.0, 0.0, 0.0), p(2.0, 1.0, 0.0))
            .unwrap();
        let r = mesh.absorb(wing);
        assert!(is_overflow(&r));
        assert_eq!(mesh.facet_count(), 2);
        let far = mesh.edge_key(p(2.0, 0.0, 0.0), p(3.0, 0.0, 0.0));
        assert_eq!(mesh.edge_usage(&far), 0);
    }

    #[test]
    fn rebuild_rederives_edges() {
        let mesh = unit_square();
        let copy = mesh.rebuild().unwrap();
        assert_eq!(copy.facets(), mesh.facets());
        assert_eq!(copy.boundary_count(), 4);
        assert_eq!(copy.interior_count(), 1);
        assert!((copy.tolerance() - mesh.tolerance()).abs() < f64::EPSILON);
    }

    #[test]
    fn tetrahedron_is_closed() {
        let o = p(0.0, 0.0, 0.0);
        let x = p(1.0, 0.0, 0.0);
        let y = p(0.0, 1.0, 0.0);
        let z = p(0.0, 0.0, 1.0);
        let mut mesh = Mesh::new();
        mesh.add_points(o, y, x).unwrap();
        mesh.add_points(o, x, z).unwrap();
        mesh.add_points(o, z, y).unwrap();
        mesh.add_points(x, y, z).unwrap();
        assert!(mesh.is_closed());
        assert_eq!(mesh.interior_count(), 6);
        assert_counts(&mesh);
    }

    #[test]
    fn coherence_against_guide() {
        let mesh = unit_square();
        assert!(mesh.is_coherent(&Vector3::z()));
        assert!(!mesh.is_coherent(&-Vector3::z()));
        assert!(!mesh.is_coherent(&Vector3::x()));
    }

    #[test]
    fn coarse_tolerance_merges_drifted_edges() {
        let mut mesh = Mesh::with_tolerance(0.1).unwrap();
        mesh.add_points(p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0), p(1.0, 1.0, 0.0))
            .unwrap();
        mesh.add_points(p(1.02, 0.99, 0.0), p(0.0, 1.0, 0.0), p(0.01, -0.02, 0.0))
            .unwrap();
        assert_eq!(mesh.interior_count(), 1);
    }

    #[test]
    fn side_inside_one_cell_rejected() {
        let mut mesh = unit_square();
        let r = mesh.add_points(p(3.0, 0.0, 0.0), p(3.002, 0.0, 0.0), p(3.0, 1.0, 0.0));
        assert!(matches!(
            r,
            Err(WeftError::Geometry(GeometryError::CollapsedEdge { .. }))
        ));
        assert_eq!(mesh.facet_count(), 2);
        assert_eq!(mesh.boundary_count(), 4);
        assert_eq!(mesh.interior_count(), 1);

        // The same facet is fine once the grid is fine enough
        let mut fine = Mesh::with_tolerance(POINT_TOLERANCE).unwrap();
        fine.add_points(p(3.0, 0.0, 0.0), p(3.002, 0.0, 0.0), p(3.0, 1.0, 0.0))
            .unwrap();
        assert_eq!(fine.boundary_count(), 3);
    }

    #[test]
    fn absorb_rejects_collapsed_side_from_finer_mesh() {
        let mut coarse = Mesh::with_tolerance(0.5).unwrap();
        let mut fine = Mesh::new();
        fine.add_points(p(0.0, 0.0, 0.0), p(0.1, 0.0, 0.0), p(0.0, 2.0, 0.0))
            .unwrap();
        let r = coarse.absorb(fine);
        assert!(matches!(
            r,
            Err(WeftError::Geometry(GeometryError::CollapsedEdge { .. }))
        ));
        assert!(coarse.is_empty());
    }

    #[test]
    fn tolerance_validated() {
        assert!(Mesh::with_tolerance(0.0).is_err());
        assert!(Mesh::with_tolerance(1e-6).is_err());
        assert!(Mesh::with_tolerance(f64::INFINITY).is_err());
        assert!(Mesh::with_tolerance(0.5).is_ok());
    }

    #[test]
    fn edge_segments_tag_usage() {
        let mesh = unit_square();
        let segments = mesh.edge_segments();
        assert_eq!(segments.len(), 5);
        let interior: Vec<_> = segments
            .iter()
            .filter(|s| s.kind == EdgeKind::Interior)
            .collect();
        assert_eq!(interior.len(), 1);
        assert_eq!(mesh.boundary_edges().len(), 4);
        assert_eq!(mesh.interior_edges().len(), 1);
    }
}
