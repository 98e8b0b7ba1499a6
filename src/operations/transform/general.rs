use tracing::debug;

use crate::error::Result;
use crate::geometry::Transform;
use crate::math::Point3;
use crate::mesh::Mesh;

/// Applies a point map to every vertex of a mesh, producing a new mesh.
///
/// Each transformed facet is revalidated and added afresh, so edge usage
/// is derived from the new vertex positions rather than copied.
pub struct TransformMesh<'a, F> {
    source: &'a Mesh,
    map: F,
}

impl<'a, F> TransformMesh<'a, F>
where
    F: Fn(&Point3) -> Point3,
{
    /// Creates a new `TransformMesh` operation from any point map.
    #[must_use]
    pub fn new(source: &'a Mesh, map: F) -> Self {
        Self { source, map }
    }

    /// Executes the transform, returning the moved copy.
    ///
    /// # Errors
    ///
    /// Returns a geometry error if a facet collapses under the map, or an
    /// edge overflow if the map folds separate edges onto one another.
    pub fn execute(&self) -> Result<Mesh> {
        let mut moved = Mesh::with_tolerance(self.source.tolerance())?;
        for facet in self.source.facets() {
            moved.add(facet.map_vertices(&self.map)?)?;
        }
        debug!(facets = moved.facet_count(), "transformed mesh");
        Ok(moved)
    }
}

impl<'a> TransformMesh<'a, Box<dyn Fn(&Point3) -> Point3 + 'a>> {
    /// Creates a `TransformMesh` operation from a matrix transform.
    #[must_use]
    pub fn from_transform(source: &'a Mesh, transform: &'a Transform) -> Self {
        Self::new(source, Box::new(move |p: &Point3| transform.apply(p)))
    }
}
