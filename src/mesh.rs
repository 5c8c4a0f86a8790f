//! Triangle soup produced by extraction.

use crate::aabb::BoundingBox;
use crate::float_types::Real;
use crate::triangulated::Triangulated3D;
use nalgebra::Point3;

/// An ordered list of triangles, each given by its three corner positions.
///
/// Vertices are not shared between triangles.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mesh {
    pub triangles: Vec<[Point3<Real>; 3]>,
}

impl Mesh {
    pub const fn new() -> Self {
        Self {
            triangles: Vec::new(),
        }
    }

    /// Resolve indexed faces against `vertices`.
    ///
    /// Faces referring past the end of `vertices` are dropped.
    pub fn from_indexed(vertices: &[Point3<Real>], faces: &[[u32; 3]]) -> Self {
        let triangles: Vec<_> = faces
            .iter()
            .filter_map(|f| {
                Some([
                    *vertices.get(f[0] as usize)?,
                    *vertices.get(f[1] as usize)?,
                    *vertices.get(f[2] as usize)?,
                ])
            })
            .collect();
        if triangles.len() != faces.len() {
            tracing::warn!(
                dropped = faces.len() - triangles.len(),
                "faces referenced missing vertices"
            );
        }
        Self { triangles }
    }

    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Box around every vertex, `None` for an empty mesh.
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        BoundingBox::from_points(self.triangles.iter().flatten())
    }

    /// Enclosed volume by the divergence theorem.
    ///
    /// Positive when triangles wind counter-clockwise seen from outside.
    /// Only meaningful for closed surfaces.
    pub fn signed_volume(&self) -> Real {
        self.triangles
            .iter()
            .map(|[a, b, c]| a.coords.dot(&b.coords.cross(&c.coords)))
            .sum::<Real>()
            / 6.0
    }

    /// All corner positions, three per triangle.
    pub fn positions(&self) -> impl Iterator<Item = &Point3<Real>> + '_ {
        self.triangles.iter().flatten()
    }
}

impl Triangulated3D for Mesh {
    fn visit_triangles<F>(&self, f: F)
    where
        F: FnMut(&[Point3<Real>; 3]),
    {
        self.triangles.as_slice().visit_triangles(f);
    }

    fn triangle_count(&self) -> usize {
        self.len()
    }
}
