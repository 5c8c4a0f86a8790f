//! User-facing lattice parameters and threshold resolution.

use super::{
    Diamond, Gyroid, LatticeFrame, SheetGyroid, SurfaceFamily, TpmsField, validate_wavelengths,
};
use crate::calibration::{porosity_to_isovalue, sheet_isovalue_from_thickness};
use crate::errors::TpmsError;
use crate::float_types::Real;
use crate::rotation::compose_rotation;
use nalgebra::{Matrix3, Vector3};

/// How the isosurface threshold is chosen. Exactly one applies per lattice.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ThresholdSpec {
    /// Void fraction in `[0, 1]`, resolved through the family's calibration curve.
    Porosity(Real),
    /// Raw isovalue (full separation `v` for sheets).
    Isovalue(Real),
    /// Sheet wall thickness in world units. Only meaningful for sheet gyroids.
    Thickness(Real),
}

impl Default for ThresholdSpec {
    fn default() -> Self {
        ThresholdSpec::Porosity(0.5)
    }
}

impl ThresholdSpec {
    /// Collapse the optional-argument form into one threshold.
    ///
    /// Supplying none or more than one of the three is an error.
    pub fn from_options(
        porosity: Option<Real>,
        isovalue: Option<Real>,
        thickness: Option<Real>,
    ) -> Result<Self, TpmsError> {
        match (porosity, isovalue, thickness) {
            (Some(p), None, None) => Ok(ThresholdSpec::Porosity(p)),
            (None, Some(v), None) => Ok(ThresholdSpec::Isovalue(v)),
            (None, None, Some(t)) => Ok(ThresholdSpec::Thickness(t)),
            (None, None, None) => Err(TpmsError::invalid(
                "threshold",
                "one of porosity, isovalue or thickness is required",
            )),
            (p, v, t) => {
                let given: Vec<&str> = [("porosity", p), ("isovalue", v), ("thickness", t)]
                    .into_iter()
                    .filter_map(|(name, value)| value.map(|_| name))
                    .collect();
                Err(TpmsError::invalid(
                    "threshold",
                    format!("{} are mutually exclusive", given.join(" and ")),
                ))
            }
        }
    }

    pub const fn kind(&self) -> &'static str {
        match self {
            ThresholdSpec::Porosity(_) => "porosity",
            ThresholdSpec::Isovalue(_) => "isovalue",
            ThresholdSpec::Thickness(_) => "thickness",
        }
    }
}

/// Everything needed to build one lattice field.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LatticeParameters {
    pub family: SurfaceFamily,
    /// Spatial period along x, y and z.
    pub wavelengths: Vector3<Real>,
    /// Euler angles about x, y and z, in degrees.
    pub rotation: [Real; 3],
    pub threshold: ThresholdSpec,
}

impl LatticeParameters {
    pub fn new(family: SurfaceFamily, wavelengths: Vector3<Real>, threshold: ThresholdSpec) -> Self {
        Self {
            family,
            wavelengths,
            rotation: [0.0; 3],
            threshold,
        }
    }

    /// Isotropic lattice: the same wavelength on every axis.
    pub fn isotropic(family: SurfaceFamily, wavelength: Real, threshold: ThresholdSpec) -> Self {
        Self::new(family, Vector3::repeat(wavelength), threshold)
    }

    pub fn with_rotation(mut self, theta_x: Real, theta_y: Real, theta_z: Real) -> Self {
        self.rotation = [theta_x, theta_y, theta_z];
        self
    }

    pub fn with_threshold(mut self, threshold: ThresholdSpec) -> Self {
        self.threshold = threshold;
        self
    }

    /// Check ranges and family/threshold compatibility without building anything.
    pub fn validate(&self) -> Result<(), TpmsError> {
        validate_wavelengths(&self.wavelengths)?;
        if let Some(bad) = self.rotation.iter().find(|a| !a.is_finite()) {
            return Err(TpmsError::invalid(
                "rotation",
                format!("angles must be finite, got {bad}"),
            ));
        }
        match self.threshold {
            ThresholdSpec::Porosity(p) if !(0.0..=1.0).contains(&p) => Err(TpmsError::invalid(
                "porosity",
                format!("must be between 0 and 1, got {p}"),
            )),
            ThresholdSpec::Isovalue(v) if !v.is_finite() => Err(TpmsError::invalid(
                "isovalue",
                format!("must be finite, got {v}"),
            )),
            ThresholdSpec::Thickness(_) if !self.family.supports_thickness() => {
                Err(TpmsError::invalid(
                    "thickness",
                    format!("{} has no wall; use porosity or isovalue", self.family),
                ))
            }
            _ => Ok(()),
        }
    }

    /// The isovalue this parameter set resolves to.
    pub fn resolve_isovalue(&self) -> Result<Real, TpmsError> {
        self.validate()?;
        match self.threshold {
            ThresholdSpec::Porosity(p) => porosity_to_isovalue(self.family, p),
            ThresholdSpec::Isovalue(v) => Ok(v),
            ThresholdSpec::Thickness(t) => sheet_isovalue_from_thickness(t, &self.wavelengths),
        }
    }

    pub fn rotation_matrix(&self) -> Matrix3<Real> {
        let [x, y, z] = self.rotation;
        compose_rotation(x, y, z)
    }

    pub fn frame(&self) -> Result<LatticeFrame, TpmsError> {
        LatticeFrame::new(self.wavelengths, self.rotation_matrix())
    }

    /// Validate, resolve the threshold and build the field.
    pub fn build_field(&self) -> Result<TpmsField, TpmsError> {
        let isovalue = self.resolve_isovalue()?;
        let frame = self.frame()?;
        tracing::debug!(
            family = %self.family,
            isovalue,
            threshold = self.threshold.kind(),
            "built lattice field"
        );
        Ok(match self.family {
            SurfaceFamily::Gyroid => Gyroid::new(frame, isovalue)?.into(),
            SurfaceFamily::Diamond => Diamond::new(frame, isovalue)?.into(),
            SurfaceFamily::SheetGyroid => SheetGyroid::new(frame, isovalue)?.into(),
        })
    }
}
