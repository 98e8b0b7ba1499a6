use tracing::debug;

use crate::error::Result;
use crate::geometry::Plane;
use crate::mesh::Mesh;

/// Mirrors a mesh across a plane, producing a new mesh.
///
/// Every facet is reflected and rewound so its normal is the reflection
/// of the source normal. Edge usage is rebuilt from the reflected facets.
pub struct MirrorMesh<'a> {
    source: &'a Mesh,
    plane: Plane,
}

impl<'a> MirrorMesh<'a> {
    /// Creates a new `MirrorMesh` operation.
    #[must_use]
    pub fn new(source: &'a Mesh, plane: Plane) -> Self {
        Self { source, plane }
    }

    /// Executes the mirror, returning the reflected copy.
    ///
    /// # Errors
    ///
    /// Returns an error if a reflected facet is degenerate or its edges
    /// cannot be recorded.
    pub fn execute(&self) -> Result<Mesh> {
        let mut mirrored = Mesh::with_tolerance(self.source.tolerance())?;
        for facet in self.source.facets() {
            mirrored.add(facet.mirror_across(&self.plane)?)?;
        }
        debug!(facets = mirrored.facet_count(), "mirrored mesh");
        Ok(mirrored)
    }
}
