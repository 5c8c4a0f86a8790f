//! One-call specimen generation: parameters in, triangles out.

use crate::aabb::BoundingBox;
use crate::domain::{LatticeBox, PeriodSpec, compose_box, compose_sized_box};
use crate::errors::TpmsError;
use crate::float_types::Real;
use crate::mesh::Mesh;
use crate::sdf::{IsosurfaceExtractor, Step, SurfaceNetsExtractor, extract_mesh_with};
use crate::tpms::{LatticeParameters, TpmsField};
use nalgebra::Vector3;

/// Margin, in grid steps, between the clipping box and the default sampling
/// bounds. Past one step the last sample of every half-open axis lies
/// strictly outside the box.
pub const BOX_MARGIN: Real = 1.5;

/// How a lattice is clipped and sampled.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MeshingOptions {
    pub step: Step,
    pub periods: PeriodSpec,
    /// Absolute box size; overrides `periods` when set.
    pub box_size: Option<Vector3<Real>>,
    /// Sampling bounds. When `None` the clipping box is sampled with a margin
    /// of [`BOX_MARGIN`] steps on every side.
    ///
    /// Grid axes are half open, so bounds equal to the clipping box never
    /// sample its +x, +y and +z faces and leave the mesh open there.
    pub bounds: Option<BoundingBox>,
}

impl MeshingOptions {
    pub fn with_step(mut self, step: impl Into<Step>) -> Self {
        self.step = step.into();
        self
    }

    pub fn with_periods(mut self, periods: impl Into<PeriodSpec>) -> Self {
        self.periods = periods.into();
        self
    }

    pub fn with_box_size(mut self, size: Vector3<Real>) -> Self {
        self.box_size = Some(size);
        self
    }

    pub fn with_bounds(mut self, bounds: BoundingBox) -> Self {
        self.bounds = Some(bounds);
        self
    }

    pub fn validate(&self) -> Result<(), TpmsError> {
        self.step.validate()?;
        if self.box_size.is_none() {
            self.periods.validate()?;
        }
        Ok(())
    }
}

/// Build the clipped field without sampling it.
pub fn generate_field(
    params: &LatticeParameters,
    options: &MeshingOptions,
) -> Result<LatticeBox<TpmsField>, TpmsError> {
    options.validate()?;
    let field = params.build_field()?;
    match options.box_size {
        Some(size) => compose_sized_box(field, size),
        None => compose_box(field, &params.wavelengths, options.periods),
    }
}

/// Validate, build, clip and mesh a lattice with surface nets.
pub fn generate_mesh(
    params: &LatticeParameters,
    options: &MeshingOptions,
) -> Result<Mesh, TpmsError> {
    generate_mesh_with(params, options, &SurfaceNetsExtractor)
}

/// [`generate_mesh`] with a caller-supplied extractor.
pub fn generate_mesh_with<E: IsosurfaceExtractor + ?Sized>(
    params: &LatticeParameters,
    options: &MeshingOptions,
    extractor: &E,
) -> Result<Mesh, TpmsError> {
    let specimen = generate_field(params, options)?;
    let span = tracing::debug_span!(
        "generate",
        family = %params.family,
        extents = ?specimen.extents().as_slice()
    );
    let _enter = span.enter();
    let bounds = options.bounds.unwrap_or_else(|| {
        specimen
            .bounds()
            .expanded(&(options.step.as_vector() * BOX_MARGIN))
    });
    let mesh = extract_mesh_with(&specimen, options.step, Some(bounds), extractor)?;
    if mesh.is_empty() {
        tracing::warn!("lattice produced no triangles");
    }
    Ok(mesh)
}
