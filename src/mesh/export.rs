use crate::error::Result;
use crate::math::{Point3, Vector3};

use super::Mesh;

/// Flat-shaded indexed triangles, ready for a renderer or file writer.
#[derive(Debug, Clone, Default)]
pub struct TriangleMesh {
    /// Vertex positions.
    pub vertices: Vec<Point3>,
    /// Per-vertex normals (each vertex carries its facet's normal).
    pub normals: Vec<Vector3>,
    /// Triangle indices (each triple defines a triangle).
    pub indices: Vec<[u32; 3]>,
}

impl TriangleMesh {
    /// Appends another mesh, offsetting its indices.
    #[allow(clippy::cast_possible_truncation)]
    pub fn merge(&mut self, other: &TriangleMesh) {
        let offset = self.vertices.len() as u32;
        self.vertices.extend_from_slice(&other.vertices);
        self.normals.extend_from_slice(&other.normals);
        self.indices.extend(
            other
                .indices
                .iter()
                .map(|[a, b, c]| [a + offset, b + offset, c + offset]),
        );
    }
}

impl Mesh {
    /// Exports the facets in insertion order, three unshared vertices per
    /// facet.
    ///
    /// # Errors
    ///
    /// Returns an error if a facet normal cannot be computed.
    #[allow(clippy::cast_possible_truncation)]
    pub fn to_triangle_mesh(&self) -> Result<TriangleMesh> {
        let n = self.facets.len();
        let mut out = TriangleMesh {
            vertices: Vec::with_capacity(3 * n),
            normals: Vec::with_capacity(3 * n),
            indices: Vec::with_capacity(n),
        };
        for facet in &self.facets {
            let normal = facet.normal()?;
            let base = out.vertices.len() as u32;
            out.vertices.extend_from_slice(&facet.vertices());
            out.normals.extend_from_slice(&[normal; 3]);
            out.indices.push([base, base + 1, base + 2]);
        }
        Ok(out)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn export_preserves_facet_order() {
        let mut mesh = Mesh::new();
        let a = Point3::new(0.0, 0.0, 0.0);
        let b = Point3::new(1.0, 0.0, 0.0);
        let c = Point3::new(1.0, 1.0, 0.0);
        let d = Point3::new(0.0, 1.0, 0.0);
        mesh.add_points(a, b, c).unwrap();
        mesh.add_points(c, d, a).unwrap();

        let tri = mesh.to_triangle_mesh().unwrap();
        assert_eq!(tri.vertices.len(), 6);
        assert_eq!(tri.indices, vec![[0, 1, 2], [3, 4, 5]]);
        assert_eq!(tri.vertices[3], c);
        assert!(tri.normals.iter().all(|n| (n - Vector3::z()).norm() < 1e-12));
    }

    #[test]
    fn merge_offsets_indices() {
        let mut mesh = Mesh::new();
        mesh.add_points(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        )
        .unwrap();
        let single = mesh.to_triangle_mesh().unwrap();
        let mut combined = single.clone();
        combined.merge(&single);
        assert_eq!(combined.indices, vec![[0, 1, 2], [3, 4, 5]]);
        assert_eq!(combined.normals.len(), 6);
    }
}
