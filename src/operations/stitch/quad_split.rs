use crate::error::Result;
use crate::math::{distance, Point3, DEFAULT_MESH_TOLERANCE};
use crate::mesh::{Facet, Mesh};

/// Splits a quad into two facets along its shorter diagonal.
///
/// Vertices are expected counter-clockwise around the quad seen from the
/// outward side. Equal diagonals split along `b-d`.
pub struct QuadSplit {
    corners: [Point3; 4],
    tolerance: f64,
}

impl QuadSplit {
    /// Creates a new `QuadSplit` operation over `a, b, c, d`.
    #[must_use]
    pub fn new(a: Point3, b: Point3, c: Point3, d: Point3) -> Self {
        Self {
            corners: [a, b, c, d],
            tolerance: DEFAULT_MESH_TOLERANCE,
        }
    }

    /// Sets the edge tolerance of the produced mesh.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Executes the split, returning a two-facet mesh.
    ///
    /// # Errors
    ///
    /// Returns a geometry error if either facet would be degenerate.
    pub fn execute(&self) -> Result<Mesh> {
        let mut mesh = Mesh::with_tolerance(self.tolerance)?;
        for facet in self.facets()? {
            mesh.add(facet)?;
        }
        Ok(mesh)
    }

    fn facets(&self) -> Result<[Facet; 2]> {
        let [a, b, c, d] = self.corners;
        if distance(&a, &c) < distance(&b, &d) {
            Ok([Facet::new(a, b, c)?, Facet::new(c, d, a)?])
        } else {
            Ok([Facet::new(b, c, d)?, Facet::new(d, a, b)?])
        }
    }
}
