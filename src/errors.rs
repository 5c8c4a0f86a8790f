//! Parameter, calibration and extraction errors

use crate::float_types::Real;

/// Everything that can stop a lattice from being built.
///
/// All of these are raised before any sample grid is allocated, except
/// [`TpmsError::Io`] which comes from the writers.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum TpmsError {
    /// A parameter is out of range, missing, or conflicts with another one.
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter {
        /// Name of the offending parameter, as the caller spelled it.
        name: &'static str,
        /// Human readable reason.
        reason: String,
    },

    /// Sheet thickness outside the calibrated (0, 0.88) fraction of the wavelength.
    #[error(
        "sheet thickness {thickness} is {fraction:.4} of wavelength {wavelength}; \
         the calibration only covers fractions strictly between 0 and {limit}",
        limit = crate::calibration::THICKNESS_LIMIT
    )]
    CalibrationRange {
        /// Requested sheet thickness.
        thickness: Real,
        /// Normalizing wavelength (mean of the three axes).
        wavelength: Real,
        /// `thickness / wavelength`.
        fraction: Real,
    },

    /// The automatic bounds estimator found nothing near the zero level set.
    #[error("could not estimate bounds: {0}")]
    BoundsEstimation(String),

    /// Writing a mesh failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl TpmsError {
    /// Shorthand for [`TpmsError::InvalidParameter`].
    pub fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        TpmsError::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }

    /// `true` for [`TpmsError::InvalidParameter`].
    pub const fn is_invalid_parameter(&self) -> bool {
        matches!(self, TpmsError::InvalidParameter { .. })
    }
}

/// Failures reported by an isosurface extraction routine.
///
/// These never escape [`crate::sdf::extract_mesh`]: they are logged and turned
/// into an empty mesh.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum ExtractionError {
    /// Every axis needs at least two samples to form a cell.
    #[error("grid {0:?} needs at least 2 samples per axis")]
    DegenerateGrid([u32; 3]),
    /// The value buffer does not match the grid size.
    #[error("expected {expected} samples for the grid, got {actual}")]
    SizeMismatch {
        /// `nx * ny * nz`
        expected: usize,
        /// Length of the buffer handed over.
        actual: usize,
    },
    /// A sample was NaN or infinite.
    #[error("sample {0} is not finite")]
    NonFiniteSample(usize),
    /// The field never crosses zero inside the grid.
    #[error("field has no zero crossing inside the grid")]
    EmptySurface,
}
