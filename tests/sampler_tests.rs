mod support;

use nalgebra::{Point3, Vector3};
use support::{Sphere, mesh_extents};
use tpmsgen::aabb::BoundingBox;
use tpmsgen::errors::ExtractionError;
use tpmsgen::float_types::Real;
use tpmsgen::sdf::{
    ExtractedSurface, ExtractionInput, IsosurfaceExtractor, Step, estimate_bounds, extract_mesh,
    extract_mesh_with, to_extractor_layout,
};
use tpmsgen::tpms::FnField;

#[test]
fn sphere_mesh_sits_on_the_sphere() {
    let sphere = Sphere::new(1.0);
    let step = 0.05;
    let mesh = extract_mesh(&sphere, Step::Uniform(step), None).unwrap();
    assert!(!mesh.is_empty());
    for p in mesh.positions() {
        let r = p.coords.norm();
        assert!((r - 1.0).abs() < step, "vertex {p:?} at radius {r}");
    }
    let volume = mesh.signed_volume().abs();
    assert!(
        (volume - sphere.volume()).abs() / sphere.volume() < 0.03,
        "volume {volume}"
    );
}

#[test]
fn explicit_bounds_are_used() {
    let sphere = Sphere {
        center: Point3::new(3.0, 0.0, 0.0),
        radius: 1.0,
    };
    let bounds = BoundingBox::new(Point3::new(1.5, -1.5, -1.5), Point3::new(4.5, 1.5, 1.5)).unwrap();
    let mesh = extract_mesh(&sphere, Step::Uniform(0.1), Some(bounds)).unwrap();
    let extents = mesh_extents(&mesh);
    for i in 0..3 {
        assert!(support::approx_eq(extents[i], 2.0, 0.2), "{extents:?}");
    }
    assert!(mesh.positions().all(|p| bounds.contains(p)));
}

#[test]
fn bounds_that_miss_the_surface_give_an_empty_mesh() {
    let sphere = Sphere::new(1.0);
    let far = BoundingBox::new(Point3::new(5.0, 5.0, 5.0), Point3::new(6.0, 6.0, 6.0)).unwrap();
    let mesh = extract_mesh(&sphere, Step::Uniform(0.1), Some(far)).unwrap();
    assert!(mesh.is_empty());
}

#[test]
fn grid_thinner_than_a_step_gives_an_empty_mesh() {
    let sphere = Sphere::new(1.0);
    let slab = BoundingBox::new(Point3::new(-2.0, -2.0, -0.05), Point3::new(2.0, 2.0, 0.05)).unwrap();
    let mesh = extract_mesh(&sphere, Step::Uniform(0.5), Some(slab)).unwrap();
    assert!(mesh.is_empty());
}

#[test]
fn estimated_bounds_cover_the_surface() {
    let sphere = Sphere {
        center: Point3::new(-2.0, 1.0, 4.0),
        radius: 3.0,
    };
    let bb = estimate_bounds(&sphere).unwrap();
    for axis in [Vector3::x(), Vector3::y(), Vector3::z()] {
        for sign in [-1.0, 1.0] {
            let extreme = sphere.center + axis * (sign * 3.0);
            assert!(bb.contains(&extreme), "{extreme:?} outside {bb:?}");
        }
    }
    assert!(bb.extents().max() < 8.0);
}

/// Records what it was handed and returns a single triangle.
struct Recording(std::sync::Mutex<Option<(Vec<f32>, [u32; 3], Point3<Real>, Vector3<Real>)>>);

impl IsosurfaceExtractor for Recording {
    fn extract(&self, input: &ExtractionInput<'_>) -> Result<ExtractedSurface, ExtractionError> {
        if let Ok(mut slot) = self.0.lock() {
            *slot = Some((input.values.to_vec(), input.grid_size, input.v_min, input.delta));
        }
        Ok(ExtractedSurface {
            vertices: vec![Point3::origin(), Point3::new(1.0, 0.0, 0.0), Point3::new(0.0, 1.0, 0.0)],
            faces: vec![[0, 1, 2]],
        })
    }
}

#[test]
fn extractor_receives_positive_inside_x_fastest_samples() {
    // plane x + 10y + 100z, so every sample is distinguishable
    let field = FnField(|p: &Point3<Real>| p.x + 10.0 * p.y + 100.0 * p.z);
    let bounds = BoundingBox::new(Point3::origin(), Point3::new(2.0, 3.0, 4.0)).unwrap();
    let recorder = Recording(std::sync::Mutex::new(None));
    let mesh = extract_mesh_with(&field, Step::Uniform(1.0), Some(bounds), &recorder).unwrap();
    assert_eq!(mesh.len(), 1);

    let (values, size, v_min, delta) = recorder.0.lock().unwrap().take().unwrap();
    assert_eq!(size, [2, 3, 4]);
    assert_eq!(v_min, Point3::origin());
    assert_eq!(delta, Vector3::repeat(1.0));
    for z in 0..4 {
        for y in 0..3 {
            for x in 0..2 {
                let i = x + 2 * (y + 3 * z);
                let expected = -((x + 10 * y + 100 * z) as f32);
                assert_eq!(values[i], expected);
            }
        }
    }
}

#[test]
fn layout_helper_matches_extractor_input() {
    let values: Vec<Real> = (0..24).map(|v| v as Real).collect();
    let out = to_extractor_layout(&values, [2, 3, 4]).unwrap();
    // evaluation index (ix*3 + iy)*4 + iz lands at ix + 2*(iy + 3*iz)
    assert_eq!(out[1], -12.0);
    assert_eq!(out[2], -4.0);
    assert_eq!(out[6], -1.0);
}
