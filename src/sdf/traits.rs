//! Boundary between the sampler and an isosurface extraction routine.

use crate::errors::ExtractionError;
use crate::float_types::Real;
use nalgebra::{Point3, Vector3};

/// A sampled grid ready for extraction.
///
/// `values` is positive inside the solid and ordered with x varying fastest,
/// then y, then z: sample `(ix, iy, iz)` sits at
/// `ix + grid_size[0] * (iy + grid_size[1] * iz)` and at world position
/// `v_min + (ix, iy, iz) * delta`.
#[derive(Clone, Copy, Debug)]
pub struct ExtractionInput<'a> {
    pub values: &'a [f32],
    pub grid_size: [u32; 3],
    pub v_min: Point3<Real>,
    pub delta: Vector3<Real>,
}

impl ExtractionInput<'_> {
    /// Check the buffer against the grid before handing it to an extractor.
    pub fn validate(&self) -> Result<(), ExtractionError> {
        if self.grid_size.iter().any(|&n| n < 2) {
            return Err(ExtractionError::DegenerateGrid(self.grid_size));
        }
        let expected = self.grid_size.iter().map(|&n| n as usize).product();
        if self.values.len() != expected {
            return Err(ExtractionError::SizeMismatch {
                expected,
                actual: self.values.len(),
            });
        }
        if let Some(i) = self.values.iter().position(|v| !v.is_finite()) {
            return Err(ExtractionError::NonFiniteSample(i));
        }
        Ok(())
    }
}

/// Indexed triangles in world coordinates.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ExtractedSurface {
    pub vertices: Vec<Point3<Real>>,
    pub faces: Vec<[u32; 3]>,
}

/// Turns a sampled grid into triangles approximating its zero level set.
pub trait IsosurfaceExtractor: Send + Sync {
    fn extract(&self, input: &ExtractionInput<'_>) -> Result<ExtractedSurface, ExtractionError>;
}

impl<E: IsosurfaceExtractor + ?Sized> IsosurfaceExtractor for &E {
    fn extract(&self, input: &ExtractionInput<'_>) -> Result<ExtractedSurface, ExtractionError> {
        (**self).extract(input)
    }
}
