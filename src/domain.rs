//! Finite specimens: a lattice field clipped to an origin-centred box.

use crate::aabb::BoundingBox;
use crate::errors::TpmsError;
use crate::float_types::Real;
use crate::tpms::ImplicitField;
use nalgebra::{Point3, Vector3};

/// Number of lattice periods along each axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PeriodSpec {
    /// Same count on all three axes.
    Uniform(u32),
    PerAxis(u32, u32, u32),
}

impl Default for PeriodSpec {
    fn default() -> Self {
        PeriodSpec::Uniform(4)
    }
}

impl PeriodSpec {
    pub const fn counts(&self) -> [u32; 3] {
        match *self {
            PeriodSpec::Uniform(n) => [n, n, n],
            PeriodSpec::PerAxis(x, y, z) => [x, y, z],
        }
    }

    pub fn validate(&self) -> Result<(), TpmsError> {
        if self.counts().contains(&0) {
            return Err(TpmsError::invalid(
                "periods",
                format!("counts must be at least 1, got {:?}", self.counts()),
            ));
        }
        Ok(())
    }

    /// Box size covering `counts[i]` wavelengths on each axis.
    pub fn box_size(&self, wavelengths: &Vector3<Real>) -> Vector3<Real> {
        let [x, y, z] = self.counts();
        Vector3::new(x as Real, y as Real, z as Real).component_mul(wavelengths)
    }
}

impl From<u32> for PeriodSpec {
    fn from(n: u32) -> Self {
        PeriodSpec::Uniform(n)
    }
}

impl From<[u32; 3]> for PeriodSpec {
    fn from([x, y, z]: [u32; 3]) -> Self {
        PeriodSpec::PerAxis(x, y, z)
    }
}

impl TryFrom<&[u32]> for PeriodSpec {
    type Error = TpmsError;

    /// One value for every axis or exactly three per-axis values.
    fn try_from(counts: &[u32]) -> Result<Self, Self::Error> {
        let spec = match *counts {
            [n] => PeriodSpec::Uniform(n),
            [x, y, z] => PeriodSpec::PerAxis(x, y, z),
            _ => {
                return Err(TpmsError::invalid(
                    "periods",
                    format!("expected 1 or 3 counts, got {}", counts.len()),
                ));
            }
        };
        spec.validate()?;
        Ok(spec)
    }
}

/// Exact distance to an origin-centred box with half extents `half`.
///
/// Negative inside, zero on the faces.
#[inline]
pub fn box_distance(p: &Point3<Real>, half: &Vector3<Real>) -> Real {
    let q = p.coords.abs() - half;
    let outside = q.sup(&Vector3::zeros()).norm();
    let inside = q.max().min(0.0);
    outside + inside
}

/// A field intersected with a centred box: `max(box(p), field(p))`.
#[derive(Clone, Debug, PartialEq)]
pub struct LatticeBox<F> {
    field: F,
    size: Vector3<Real>,
    half: Vector3<Real>,
}

impl<F> LatticeBox<F> {
    pub const fn field(&self) -> &F {
        &self.field
    }

    /// Full edge lengths of the clipping box.
    pub const fn extents(&self) -> &Vector3<Real> {
        &self.size
    }

    /// The clipping box as min/max corners.
    ///
    /// Sampling exactly these bounds leaves the +x, +y and +z faces open,
    /// since grid axes exclude their maximum; grow them first with
    /// [`BoundingBox::expanded`].
    pub fn bounds(&self) -> BoundingBox {
        BoundingBox::centered(self.size)
    }

    pub fn into_inner(self) -> F {
        self.field
    }
}

impl<F: ImplicitField> ImplicitField for LatticeBox<F> {
    #[inline]
    fn value(&self, p: &Point3<Real>) -> Real {
        box_distance(p, &self.half).max(self.field.value(p))
    }
}

/// Clip `field` to a box spanning whole periods of `wavelengths`.
pub fn compose_box<F: ImplicitField>(
    field: F,
    wavelengths: &Vector3<Real>,
    periods: PeriodSpec,
) -> Result<LatticeBox<F>, TpmsError> {
    periods.validate()?;
    compose_sized_box(field, periods.box_size(wavelengths))
}

/// Clip `field` to a box of absolute `size`.
pub fn compose_sized_box<F: ImplicitField>(
    field: F,
    size: Vector3<Real>,
) -> Result<LatticeBox<F>, TpmsError> {
    if !size.iter().all(|s| s.is_finite() && *s > 0.0) {
        return Err(TpmsError::invalid(
            "size",
            format!("box edges must be positive, got {:?}", size.as_slice()),
        ));
    }
    Ok(LatticeBox {
        field,
        size,
        half: size * 0.5,
    })
}
