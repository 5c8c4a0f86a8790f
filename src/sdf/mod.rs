//! Sampling implicit fields on a grid and extracting their zero level set.
//!
//! The extractor sits behind [`IsosurfaceExtractor`] so that the sampler only
//! deals with grids, sign and memory order. [`SurfaceNetsExtractor`] is the
//! implementation used by default.

pub mod bounds;
pub mod grid;
pub mod surface_nets;
pub mod traits;

pub use bounds::estimate_bounds;
pub use grid::{GridShape, SampleGrid, Step};
pub use surface_nets::SurfaceNetsExtractor;
pub use traits::{ExtractedSurface, ExtractionInput, IsosurfaceExtractor};

use crate::aabb::BoundingBox;
use crate::errors::{ExtractionError, TpmsError};
use crate::float_types::Real;
use crate::mesh::Mesh;
use crate::tpms::ImplicitField;

/// Value stored for samples where the field is not finite. Far outside.
const OUTSIDE: f32 = -1e10;

/// Reorder field samples for an extractor and flip them to positive inside.
///
/// `values` must be in evaluation order (x slowest, z fastest) for a grid of
/// `counts` samples; the result has x fastest, z slowest. Non-finite samples
/// are treated as far outside. A buffer of the wrong length is a
/// [`ExtractionError::SizeMismatch`].
pub fn to_extractor_layout(
    values: &[Real],
    counts: [usize; 3],
) -> Result<Vec<f32>, ExtractionError> {
    let [nx, ny, nz] = counts;
    let expected = nx * ny * nz;
    if values.len() != expected {
        return Err(ExtractionError::SizeMismatch {
            expected,
            actual: values.len(),
        });
    }
    let mut out = vec![OUTSIDE; expected];
    for ix in 0..nx {
        for iy in 0..ny {
            for iz in 0..nz {
                let v = values[(ix * ny + iy) * nz + iz];
                if v.is_finite() {
                    out[ix + nx * (iy + ny * iz)] = -v as f32;
                }
            }
        }
    }
    Ok(out)
}

/// Mesh the zero level set of `field` with the default extractor.
///
/// See [`extract_mesh_with`].
pub fn extract_mesh<F: ImplicitField + ?Sized>(
    field: &F,
    step: Step,
    bounds: Option<BoundingBox>,
) -> Result<Mesh, TpmsError> {
    extract_mesh_with(field, step, bounds, &SurfaceNetsExtractor)
}

/// Sample `field` on a regular grid and mesh its zero level set.
///
/// Without `bounds` the extent is found with [`estimate_bounds`]. Parameter
/// and bounds errors are returned; a failing extractor is logged and yields
/// an empty mesh.
pub fn extract_mesh_with<F, E>(
    field: &F,
    step: Step,
    bounds: Option<BoundingBox>,
    extractor: &E,
) -> Result<Mesh, TpmsError>
where
    F: ImplicitField + ?Sized,
    E: IsosurfaceExtractor + ?Sized,
{
    step.validate()?;
    let bounds = match bounds {
        Some(b) => b,
        None => estimate_bounds(field)?,
    };
    let grid = SampleGrid::new(&bounds, step)?;
    let counts = grid.counts();
    tracing::debug!(
        mins = ?bounds.mins.coords.as_slice(),
        maxs = ?bounds.maxs.coords.as_slice(),
        ?counts,
        samples = grid.len(),
        "sampling field"
    );

    let values = field.evaluate(&grid.points());
    let surface = to_extractor_layout(&values, counts).and_then(|layout| {
        // SampleGrid::new keeps the total sample count within u32
        let input = ExtractionInput {
            values: &layout,
            grid_size: counts.map(|n| n as u32),
            v_min: *grid.origin(),
            delta: *grid.step(),
        };
        extractor.extract(&input)
    });

    match surface {
        Ok(surface) => {
            let mesh = Mesh::from_indexed(&surface.vertices, &surface.faces);
            tracing::debug!(
                vertices = surface.vertices.len(),
                triangles = mesh.len(),
                "extracted surface"
            );
            Ok(mesh)
        }
        Err(e) => {
            tracing::error!(error = %e, ?counts, "isosurface extraction failed; returning an empty mesh");
            Ok(Mesh::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tpms::FnField;
    use nalgebra::{Point3, Vector3};

    #[test]
    fn layout_transposes_and_negates() {
        // value encodes its own (ix, iy, iz)
        let counts = [2, 3, 4];
        let mut values = Vec::new();
        for ix in 0..2 {
            for iy in 0..3 {
                for iz in 0..4 {
                    values.push((100 * ix + 10 * iy + iz) as Real);
                }
            }
        }
        let out = to_extractor_layout(&values, counts).unwrap();
        for ix in 0..2 {
            for iy in 0..3 {
                for iz in 0..4 {
                    let expected = -((100 * ix + 10 * iy + iz) as f32);
                    assert_eq!(out[ix + 2 * (iy + 3 * iz)], expected);
                }
            }
        }
    }

    #[test]
    fn non_finite_samples_are_outside() {
        let out = to_extractor_layout(&[Real::NAN, -1.0], [1, 1, 2]).unwrap();
        assert_eq!(out, vec![OUTSIDE, 1.0]);
    }

    #[test]
    fn layout_rejects_a_buffer_of_the_wrong_length() {
        let short = vec![0.0; 23];
        assert_eq!(
            to_extractor_layout(&short, [2, 3, 4]),
            Err(ExtractionError::SizeMismatch {
                expected: 24,
                actual: 23
            })
        );
        let long = vec![0.0; 25];
        assert!(matches!(
            to_extractor_layout(&long, [2, 3, 4]),
            Err(ExtractionError::SizeMismatch { actual: 25, .. })
        ));
    }

    struct Failing;

    impl IsosurfaceExtractor for Failing {
        fn extract(&self, _: &ExtractionInput<'_>) -> Result<ExtractedSurface, ExtractionError> {
            Err(ExtractionError::EmptySurface)
        }
    }

    #[test]
    fn extractor_failure_gives_empty_mesh() {
        let sphere = FnField(|p: &Point3<Real>| p.coords.norm() - 1.0);
        let bounds = BoundingBox::centered(Vector3::repeat(3.0));
        let mesh = extract_mesh_with(&sphere, Step::Uniform(0.25), Some(bounds), &Failing).unwrap();
        assert!(mesh.is_empty());
    }

    #[test]
    fn bad_step_is_an_error() {
        let sphere = FnField(|p: &Point3<Real>| p.coords.norm() - 1.0);
        let err = extract_mesh(&sphere, Step::Uniform(-1.0), None).unwrap_err();
        assert!(err.is_invalid_parameter());
    }
}
