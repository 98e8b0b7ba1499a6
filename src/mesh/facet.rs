use crate::error::{GeometryError, Result};
use crate::geometry::Plane;
use crate::math::{are_collinear, are_distinct, Point3, Vector3, TOLERANCE};

/// An oriented triangle. Vertex order encodes the outward normal.
///
/// Fields are private so that every facet has passed the construction
/// checks: three distinct, non-collinear vertices.
#[derive(Debug, Clone, PartialEq)]
pub struct Facet {
    a: Point3,
    b: Point3,
    c: Point3,
}

impl Facet {
    /// Creates a facet from three vertices.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::CoincidentVertices`] if any two vertices
    /// coincide, or [`GeometryError::CollinearVertices`] if all three lie
    /// on one line or are too thin to carry a normal.
    pub fn new(a: Point3, b: Point3, c: Point3) -> Result<Self> {
        if !are_distinct(&a, &b, &c) {
            return Err(GeometryError::CoincidentVertices(b).into());
        }
        if are_collinear(&a, &b, &c) || winding_cross(&a, &b, &c).norm() < TOLERANCE {
            return Err(GeometryError::CollinearVertices(b).into());
        }
        Ok(Self { a, b, c })
    }

    /// First vertex.
    #[must_use]
    pub fn a(&self) -> &Point3 {
        &self.a
    }

    /// Second vertex.
    #[must_use]
    pub fn b(&self) -> &Point3 {
        &self.b
    }

    /// Third vertex.
    #[must_use]
    pub fn c(&self) -> &Point3 {
        &self.c
    }

    /// The three vertices in winding order.
    #[must_use]
    pub fn vertices(&self) -> [Point3; 3] {
        [self.a, self.b, self.c]
    }

    /// The three sides in winding order: `a-b`, `b-c`, `c-a`.
    #[must_use]
    pub fn sides(&self) -> [(Point3, Point3); 3] {
        [(self.a, self.b), (self.b, self.c), (self.c, self.a)]
    }

    /// Unit normal, `cross(b - a, c - b)` normalized.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::ZeroVector`] if the vertices have become
    /// degenerate, which construction should rule out.
    pub fn normal(&self) -> Result<Vector3> {
        let up = winding_cross(&self.a, &self.b, &self.c);
        let len = up.norm();
        if len < TOLERANCE {
            return Err(GeometryError::ZeroVector.into());
        }
        Ok(up / len)
    }

    /// Swaps the second and third vertices, flipping the normal.
    pub fn reverse(&mut self) {
        std::mem::swap(&mut self.b, &mut self.c);
    }

    /// Reflects the facet through a plane.
    ///
    /// Reflection inverts handedness, so the candidate is built with the
    /// last two vertices swapped. The winding is then checked against the
    /// reflected source normal and flipped back if it disagrees.
    ///
    /// # Errors
    ///
    /// Returns an error if the reflected vertices are degenerate.
    pub fn mirror_across(&self, plane: &Plane) -> Result<Self> {
        let source_normal = self.normal()?;

        let fresh_a = plane.mirror_point(&self.a);
        let fresh_b = plane.mirror_point(&self.b);
        let fresh_c = plane.mirror_point(&self.c);

        let mut mirrored = Self::new(fresh_a, fresh_c, fresh_b)?;

        let expected = plane.mirror_direction(&source_normal);
        if mirrored.normal()?.dot(&expected) < 0.0 {
            mirrored.reverse();
        }
        Ok(mirrored)
    }

    /// Applies a point map to every vertex and revalidates the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the mapped vertices are degenerate.
    pub fn map_vertices<F>(&self, f: F) -> Result<Self>
    where
        F: Fn(&Point3) -> Point3,
    {
        Self::new(f(&self.a), f(&self.b), f(&self.c))
    }

    /// Area of the triangle.
    #[must_use]
    pub fn area(&self) -> f64 {
        0.5 * (self.b - self.a).cross(&(self.c - self.a)).norm()
    }
}

/// Unnormalized normal, `cross(b - a, c - b)`.
fn winding_cross(a: &Point3, b: &Point3, c: &Point3) -> Vector3 {
    (b - a).cross(&(c - b))
}
