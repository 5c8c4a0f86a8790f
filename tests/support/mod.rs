//! Test support library
//! Provides various helper functions & utilities for tests.
#![allow(dead_code)]

use nalgebra::{Point3, Vector3};
use std::collections::HashMap;
use tpmsgen::float_types::{Real, TAU};
use tpmsgen::mesh::Mesh;
use tpmsgen::tpms::ImplicitField;

/// Quick helper to compare floating-point results with an acceptable tolerance.
pub fn approx_eq(a: Real, b: Real, eps: Real) -> bool {
    (a - b).abs() < eps
}

/// Edge lengths of the mesh's bounding box, zero for an empty mesh.
pub fn mesh_extents(mesh: &Mesh) -> Vector3<Real> {
    mesh.bounding_box()
        .map(|bb| bb.extents())
        .unwrap_or_else(Vector3::zeros)
}

/// Number of edges used by exactly one triangle. Zero for a closed mesh.
pub fn open_edge_count(mesh: &Mesh) -> usize {
    let key = |p: &Point3<Real>| [p.x.to_bits() as u64, p.y.to_bits() as u64, p.z.to_bits() as u64];
    let mut uses: HashMap<([u64; 3], [u64; 3]), usize> = HashMap::new();
    for tri in &mesh.triangles {
        for i in 0..3 {
            let (a, b) = (key(&tri[i]), key(&tri[(i + 1) % 3]));
            let edge = if a < b { (a, b) } else { (b, a) };
            *uses.entry(edge).or_default() += 1;
        }
    }
    uses.values().filter(|n| **n == 1).count()
}

/// Analytic sphere, negative inside.
#[derive(Clone, Copy, Debug)]
pub struct Sphere {
    pub center: Point3<Real>,
    pub radius: Real,
}

impl Sphere {
    pub fn new(radius: Real) -> Self {
        Self {
            center: Point3::origin(),
            radius,
        }
    }

    pub fn volume(&self) -> Real {
        2.0 / 3.0 * TAU * self.radius.powi(3)
    }
}

impl ImplicitField for Sphere {
    fn value(&self, p: &Point3<Real>) -> Real {
        (p - self.center).norm() - self.radius
    }
}

/// Fraction of cell-centred samples in `[0, extent)^3` where `field` is positive (void).
pub fn void_fraction<F: ImplicitField>(field: &F, extent: Real, n: usize) -> Real {
    let h = extent / n as Real;
    let mut points = Vec::with_capacity(n * n * n);
    for i in 0..n {
        for j in 0..n {
            for k in 0..n {
                points.push(Point3::new(
                    (i as Real + 0.5) * h,
                    (j as Real + 0.5) * h,
                    (k as Real + 0.5) * h,
                ));
            }
        }
    }
    let values = field.evaluate(&points);
    values.iter().filter(|v| **v > 0.0).count() as Real / values.len() as Real
}
