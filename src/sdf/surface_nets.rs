//! [`IsosurfaceExtractor`] backed by `fast-surface-nets`.

use super::grid::GridShape;
use super::traits::{ExtractedSurface, ExtractionInput, IsosurfaceExtractor};
use crate::errors::ExtractionError;
use crate::float_types::Real;
use fast_surface_nets::{SurfaceNetsBuffer, surface_nets};
use nalgebra::{Point3, Vector3};

/// Naive surface nets over the whole grid.
#[derive(Clone, Copy, Debug, Default)]
pub struct SurfaceNetsExtractor;

impl SurfaceNetsExtractor {
    pub const fn new() -> Self {
        Self
    }
}

impl IsosurfaceExtractor for SurfaceNetsExtractor {
    fn extract(&self, input: &ExtractionInput<'_>) -> Result<ExtractedSurface, ExtractionError> {
        input.validate()?;
        let [nx, ny, nz] = input.grid_size;

        // surface nets wants negative inside
        let sdf: Vec<f32> = input.values.iter().map(|v| -v).collect();

        let shape = GridShape { nx, ny, nz };
        let mut buffer = SurfaceNetsBuffer::default();
        surface_nets(&sdf, &shape, [0, 0, 0], [nx - 1, ny - 1, nz - 1], &mut buffer);

        if buffer.indices.is_empty() {
            return Err(ExtractionError::EmptySurface);
        }

        let vertices = buffer
            .positions
            .iter()
            .map(|p| {
                let local = Vector3::new(p[0] as Real, p[1] as Real, p[2] as Real);
                input.v_min + local.component_mul(&input.delta)
            })
            .collect::<Vec<Point3<Real>>>();

        let faces = buffer
            .indices
            .chunks_exact(3)
            .map(|tri| [tri[0], tri[1], tri[2]])
            .collect();

        Ok(ExtractedSurface { vertices, faces })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ball(n: u32, radius: f32) -> Vec<f32> {
        let c = (n - 1) as f32 / 2.0;
        let mut values = Vec::with_capacity((n * n * n) as usize);
        for z in 0..n {
            for y in 0..n {
                for x in 0..n {
                    let d = ((x as f32 - c).powi(2) + (y as f32 - c).powi(2) + (z as f32 - c).powi(2))
                        .sqrt();
                    values.push(radius - d);
                }
            }
        }
        values
    }

    #[test]
    fn ball_produces_closed_surface_in_world_units() {
        let n = 12;
        let values = ball(n, 3.5);
        let input = ExtractionInput {
            values: &values,
            grid_size: [n, n, n],
            v_min: Point3::new(10.0, 0.0, -5.0),
            delta: Vector3::repeat(0.5),
        };
        let surface = SurfaceNetsExtractor::new().extract(&input).unwrap();
        assert!(!surface.faces.is_empty());
        let centre = Point3::new(10.0 + 2.75, 2.75, -5.0 + 2.75);
        for v in &surface.vertices {
            let r = (v - centre).norm();
            assert!((r - 1.75).abs() < 0.5, "vertex {v:?} at radius {r}");
        }
        let n_vertices = surface.vertices.len() as u32;
        assert!(surface.faces.iter().flatten().all(|&i| i < n_vertices));
    }

    #[test]
    fn constant_field_has_no_surface() {
        let values = vec![1.0; 27];
        let input = ExtractionInput {
            values: &values,
            grid_size: [3, 3, 3],
            v_min: Point3::origin(),
            delta: Vector3::repeat(1.0),
        };
        assert_eq!(
            SurfaceNetsExtractor.extract(&input),
            Err(ExtractionError::EmptySurface)
        );
    }

    #[test]
    fn malformed_input_is_rejected() {
        let values = vec![1.0; 8];
        let flat = ExtractionInput {
            values: &values,
            grid_size: [8, 1, 1],
            v_min: Point3::origin(),
            delta: Vector3::repeat(1.0),
        };
        assert_eq!(
            SurfaceNetsExtractor.extract(&flat),
            Err(ExtractionError::DegenerateGrid([8, 1, 1]))
        );

        let short = ExtractionInput {
            grid_size: [3, 3, 3],
            ..flat
        };
        assert_eq!(
            SurfaceNetsExtractor.extract(&short),
            Err(ExtractionError::SizeMismatch {
                expected: 27,
                actual: 8
            })
        );

        let mut nan = vec![1.0; 8];
        nan[5] = f32::NAN;
        let bad = ExtractionInput {
            values: &nan,
            grid_size: [2, 2, 2],
            ..flat
        };
        assert_eq!(
            SurfaceNetsExtractor.extract(&bad),
            Err(ExtractionError::NonFiniteSample(5))
        );
    }
}
