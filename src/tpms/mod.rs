//! Triply periodic minimal surface fields.
//!
//! Every field here is a plain value (wavelengths, rotation and isovalue
//! captured at construction) implementing [`ImplicitField`]. The sign
//! convention is the usual one for signed distance functions: negative inside
//! the solid, positive outside, zero on the surface.

pub mod params;
pub mod surfaces;

pub use params::{LatticeParameters, ThresholdSpec};
pub use surfaces::{Diamond, Gyroid, SheetGyroid};

use crate::errors::TpmsError;
use crate::float_types::{Real, TAU};
use crate::rotation::apply_row;
use nalgebra::{Matrix3, Point3, Vector3};
use std::fmt;
use std::str::FromStr;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// A scalar field over 3D space.
///
/// Implementations must be pure: the same point always gives the same value,
/// and evaluating one point never affects another. That is what lets
/// [`ImplicitField::evaluate`] fan out over threads.
pub trait ImplicitField: Send + Sync {
    /// Field value at a single point.
    fn value(&self, p: &Point3<Real>) -> Real;

    /// Field values for a batch of points, in the same order.
    #[cfg(not(feature = "parallel"))]
    fn evaluate(&self, points: &[Point3<Real>]) -> Vec<Real> {
        points.iter().map(|p| self.value(p)).collect()
    }

    /// Field values for a batch of points, in the same order.
    #[cfg(feature = "parallel")]
    fn evaluate(&self, points: &[Point3<Real>]) -> Vec<Real> {
        points.par_iter().map(|p| self.value(p)).collect()
    }
}

impl<F: ImplicitField + ?Sized> ImplicitField for &F {
    #[inline]
    fn value(&self, p: &Point3<Real>) -> Real {
        (**self).value(p)
    }
}

impl<F: ImplicitField + ?Sized> ImplicitField for Box<F> {
    #[inline]
    fn value(&self, p: &Point3<Real>) -> Real {
        (**self).value(p)
    }
}

/// Adapter turning a closure into an [`ImplicitField`].
///
/// ```
/// # use tpmsgen::tpms::{FnField, ImplicitField};
/// # use nalgebra::Point3;
/// let sphere = FnField(|p: &Point3<f64>| p.coords.norm() - 1.0);
/// assert!(sphere.value(&Point3::origin()) < 0.0);
/// ```
#[derive(Clone, Copy)]
pub struct FnField<F>(pub F);

impl<F> ImplicitField for FnField<F>
where
    F: Fn(&Point3<Real>) -> Real + Send + Sync,
{
    #[inline]
    fn value(&self, p: &Point3<Real>) -> Real {
        (self.0)(p)
    }
}

/// Maps world coordinates into the lattice's phase space.
///
/// Each axis is scaled by `2π/λ` and the scaled point is then rotated as a
/// row vector (see [`crate::rotation`]).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LatticeFrame {
    wavelengths: Vector3<Real>,
    wavenumbers: Vector3<Real>,
    rotation: Matrix3<Real>,
}

impl LatticeFrame {
    pub fn new(wavelengths: Vector3<Real>, rotation: Matrix3<Real>) -> Result<Self, TpmsError> {
        validate_wavelengths(&wavelengths)?;
        if !rotation.iter().all(|c| c.is_finite()) {
            return Err(TpmsError::invalid("rotation", "matrix must be finite"));
        }
        Ok(Self {
            wavelengths,
            wavenumbers: wavelengths.map(|l| TAU / l),
            rotation,
        })
    }

    /// Unrotated frame.
    pub fn axis_aligned(wavelengths: Vector3<Real>) -> Result<Self, TpmsError> {
        Self::new(wavelengths, Matrix3::identity())
    }

    #[inline]
    pub const fn wavelengths(&self) -> &Vector3<Real> {
        &self.wavelengths
    }

    #[inline]
    pub const fn rotation(&self) -> &Matrix3<Real> {
        &self.rotation
    }

    /// Scaled and rotated coordinates of `p`.
    #[inline]
    pub fn map(&self, p: &Point3<Real>) -> Vector3<Real> {
        apply_row(&self.rotation, &p.coords.component_mul(&self.wavenumbers))
    }
}

pub(crate) fn validate_wavelengths(wavelengths: &Vector3<Real>) -> Result<(), TpmsError> {
    for (axis, &l) in ["x", "y", "z"].iter().zip(wavelengths.iter()) {
        if !(l.is_finite() && l > 0.0) {
            return Err(TpmsError::invalid(
                "wavelength",
                format!("lambda_{axis} must be greater than 0, got {l}"),
            ));
        }
    }
    Ok(())
}

/// The supported surface families.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SurfaceFamily {
    Gyroid,
    Diamond,
    SheetGyroid,
}

impl SurfaceFamily {
    pub const ALL: [SurfaceFamily; 3] = [
        SurfaceFamily::Gyroid,
        SurfaceFamily::Diamond,
        SurfaceFamily::SheetGyroid,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            SurfaceFamily::Gyroid => "gyroid",
            SurfaceFamily::Diamond => "diamond",
            SurfaceFamily::SheetGyroid => "sheet-gyroid",
        }
    }

    /// Whether wall thickness can drive the isovalue (only sheets have a wall).
    pub const fn supports_thickness(self) -> bool {
        matches!(self, SurfaceFamily::SheetGyroid)
    }
}

impl fmt::Display for SurfaceFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for SurfaceFamily {
    type Err = TpmsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gyroid" => Ok(SurfaceFamily::Gyroid),
            "diamond" => Ok(SurfaceFamily::Diamond),
            "sheet-gyroid" | "sheet_gyroid" | "sheet" => Ok(SurfaceFamily::SheetGyroid),
            other => Err(TpmsError::invalid(
                "tpms",
                format!("must be one of gyroid, diamond, sheet-gyroid; got `{other}`"),
            )),
        }
    }
}

/// Any of the supported fields, dispatching on the family.
#[derive(Clone, Debug, PartialEq)]
pub enum TpmsField {
    Gyroid(Gyroid),
    Diamond(Diamond),
    SheetGyroid(SheetGyroid),
}

impl TpmsField {
    pub const fn family(&self) -> SurfaceFamily {
        match self {
            TpmsField::Gyroid(_) => SurfaceFamily::Gyroid,
            TpmsField::Diamond(_) => SurfaceFamily::Diamond,
            TpmsField::SheetGyroid(_) => SurfaceFamily::SheetGyroid,
        }
    }

    /// Isovalue the field was built with (full separation for sheets).
    pub const fn isovalue(&self) -> Real {
        match self {
            TpmsField::Gyroid(g) => g.isovalue(),
            TpmsField::Diamond(d) => d.isovalue(),
            TpmsField::SheetGyroid(s) => s.isovalue(),
        }
    }

    pub const fn frame(&self) -> &LatticeFrame {
        match self {
            TpmsField::Gyroid(g) => g.frame(),
            TpmsField::Diamond(d) => d.frame(),
            TpmsField::SheetGyroid(s) => s.frame(),
        }
    }
}

impl ImplicitField for TpmsField {
    #[inline]
    fn value(&self, p: &Point3<Real>) -> Real {
        match self {
            TpmsField::Gyroid(g) => g.value(p),
            TpmsField::Diamond(d) => d.value(p),
            TpmsField::SheetGyroid(s) => s.value(p),
        }
    }
}

impl From<Gyroid> for TpmsField {
    fn from(g: Gyroid) -> Self {
        TpmsField::Gyroid(g)
    }
}

impl From<Diamond> for TpmsField {
    fn from(d: Diamond) -> Self {
        TpmsField::Diamond(d)
    }
}

impl From<SheetGyroid> for TpmsField {
    fn from(s: SheetGyroid) -> Self {
        TpmsField::SheetGyroid(s)
    }
}
