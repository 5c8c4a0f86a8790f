use crate::float_types::Real;
use nalgebra::{Point3, Vector3};

/// A triangulated 3D surface.
///
/// Anything that can present itself as a bunch of triangles in 3D
/// can automatically use all the triangle-based IO backends.
pub trait Triangulated3D {
    /// Call `f` for each triangle, in order.
    fn visit_triangles<F>(&self, f: F)
    where
        F: FnMut(&[Point3<Real>; 3]);

    /// Number of triangles `visit_triangles` will report.
    fn triangle_count(&self) -> usize {
        let mut n = 0;
        self.visit_triangles(|_| n += 1);
        n
    }
}

impl Triangulated3D for [[Point3<Real>; 3]] {
    fn visit_triangles<F>(&self, mut f: F)
    where
        F: FnMut(&[Point3<Real>; 3]),
    {
        self.iter().for_each(|tri| f(tri));
    }

    fn triangle_count(&self) -> usize {
        self.len()
    }
}

/// Unit facet normal from counter-clockwise winding, or zero for a degenerate triangle.
pub fn facet_normal(tri: &[Point3<Real>; 3]) -> Vector3<Real> {
    let n = (tri[1] - tri[0]).cross(&(tri[2] - tri[0]));
    n.try_normalize(Real::EPSILON).unwrap_or_else(Vector3::zeros)
}
