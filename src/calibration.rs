//! Porosity and sheet-thickness calibration.
//!
//! A TPMS field only knows its isovalue. These tables translate the
//! quantities a specimen is specified by (void fraction, wall thickness) into
//! that isovalue. The gyroid and diamond curves are published reference
//! values and must not be refitted; the sheet-gyroid curves were sampled
//! over one unit cell of `|G| < v/2`.

use crate::errors::TpmsError;
use crate::float_types::{Real, tolerance};
use crate::tpms::SurfaceFamily;
use nalgebra::Vector3;

/// Largest sheet thickness, as a fraction of the wavelength, the calibration covers.
/// Beyond it the sheet closes off the pores.
pub const THICKNESS_LIMIT: Real = 0.88;

/// Gyroid porosity knots, ascending.
pub static GYROID_POROSITY: [Real; 51] = [
    0.0,
    2.48471078e-04,
    1.07463741e-02,
    3.38231255e-02,
    5.81577617e-02,
    8.22128679e-02,
    1.04808207e-01,
    1.27605428e-01,
    1.49362177e-01,
    1.72124457e-01,
    1.94929443e-01,
    2.14290775e-01,
    2.36431878e-01,
    2.58572980e-01,
    2.78959256e-01,
    2.98945648e-01,
    3.19269806e-01,
    3.40110317e-01,
    3.58803884e-01,
    3.79908396e-01,
    4.00061730e-01,
    4.20607182e-01,
    4.40527574e-01,
    4.59547259e-01,
    4.79300709e-01,
    5.00032515e-01,
    5.20699291e-01,
    5.40452741e-01,
    5.59472426e-01,
    5.79392818e-01,
    5.99938270e-01,
    6.20091604e-01,
    6.41196116e-01,
    6.59889683e-01,
    6.80730194e-01,
    7.01054352e-01,
    7.21040744e-01,
    7.41427020e-01,
    7.63568122e-01,
    7.85709225e-01,
    8.05070557e-01,
    8.27875543e-01,
    8.50637823e-01,
    8.72394572e-01,
    8.95191793e-01,
    9.17787132e-01,
    9.41842238e-01,
    9.66176875e-01,
    9.89253626e-01,
    9.99751529e-01,
    1.0,
];

/// Gyroid isovalue at each [`GYROID_POROSITY`] knot.
pub static GYROID_ISOVALUE: [Real; 51] = [
    1.55563492,
    1.49340952,
    1.43118413,
    1.36895873,
    1.30673333,
    1.24450793,
    1.18228254,
    1.12005714,
    1.05783174,
    0.99560635,
    0.93338095,
    0.87115555,
    0.80893016,
    0.74670476,
    0.68447936,
    0.62225397,
    0.56002857,
    0.49780317,
    0.43557778,
    0.37335238,
    0.31112698,
    0.24890159,
    0.18667619,
    0.12445079,
    0.0622254,
    0.0,
    -0.0622254,
    -0.12445079,
    -0.18667619,
    -0.24890159,
    -0.31112698,
    -0.37335238,
    -0.43557778,
    -0.49780317,
    -0.56002857,
    -0.62225397,
    -0.68447936,
    -0.74670476,
    -0.80893016,
    -0.87115555,
    -0.93338095,
    -0.99560635,
    -1.05783174,
    -1.12005714,
    -1.18228254,
    -1.24450793,
    -1.30673333,
    -1.36895873,
    -1.43118413,
    -1.49340952,
    -1.55563492,
];

/// Diamond porosity knots, ascending.
pub static DIAMOND_POROSITY: [Real; 51] = [
    0.0,
    0.00273318,
    0.00900708,
    0.01739298,
    0.02683488,
    0.03919631,
    0.05317281,
    0.07205661,
    0.09652325,
    0.120062,
    0.14658241,
    0.17123928,
    0.19645521,
    0.22266503,
    0.24335024,
    0.27024336,
    0.29036951,
    0.31707627,
    0.33608431,
    0.36285319,
    0.38372476,
    0.40894069,
    0.42999861,
    0.45651902,
    0.47664517,
    0.5022804,
    0.52335483,
    0.54348098,
    0.57000139,
    0.59105931,
    0.61627524,
    0.63714681,
    0.66391569,
    0.68292373,
    0.70963049,
    0.72975664,
    0.75664976,
    0.77733497,
    0.80354479,
    0.82876072,
    0.85341759,
    0.879938,
    0.90347675,
    0.92794339,
    0.94682719,
    0.96080369,
    0.97316512,
    0.98260702,
    0.99099292,
    0.99726682,
    1.0,
];

/// Diamond isovalue at each [`DIAMOND_POROSITY`] knot.
pub static DIAMOND_ISOVALUE: [Real; 51] = [
    1.41421356,
    1.35764502,
    1.30107648,
    1.24450793,
    1.18793939,
    1.13137085,
    1.07480231,
    1.01823376,
    0.96166522,
    0.90509668,
    0.84852814,
    0.79195959,
    0.73539105,
    0.67882251,
    0.62225397,
    0.56568542,
    0.50911688,
    0.45254834,
    0.3959798,
    0.33941125,
    0.28284271,
    0.22627417,
    0.16970563,
    0.11313708,
    0.05656854,
    0.0,
    -0.05656854,
    -0.11313708,
    -0.16970563,
    -0.22627417,
    -0.28284271,
    -0.33941125,
    -0.3959798,
    -0.45254834,
    -0.50911688,
    -0.56568542,
    -0.62225397,
    -0.67882251,
    -0.73539105,
    -0.79195959,
    -0.84852814,
    -0.90509668,
    -0.96166522,
    -1.01823376,
    -1.07480231,
    -1.13137085,
    -1.18793939,
    -1.24450793,
    -1.30107648,
    -1.35764502,
    -1.41421356,
];

/// Sheet-gyroid porosity knots, ascending (void fraction outside `|G| < v/2`).
pub static SHEET_GYROID_POROSITY: [Real; 31] = [
    0.0, 0.01372, 0.04492, 0.0841, 0.1232, 0.16204, 0.19787, 0.23414, 0.27066, 0.30521,
    0.33993, 0.37569, 0.40989, 0.44342, 0.47659, 0.51286, 0.54527, 0.57742, 0.6112, 0.64335,
    0.67601, 0.71022, 0.7416, 0.77409, 0.80856, 0.83762, 0.87209, 0.90192, 0.93621, 0.96682,
    1.0,
];

/// Sheet isovalue (full separation of the two gyroids) at each [`SHEET_GYROID_POROSITY`] knot.
pub static SHEET_GYROID_ISOVALUE: [Real; 31] = [
    3.0, 2.9, 2.8, 2.7, 2.6, 2.5, 2.4, 2.3, 2.2, 2.1, 2.0, 1.9, 1.8, 1.7, 1.6, 1.5, 1.4, 1.3,
    1.2, 1.1, 1.0, 0.9, 0.8, 0.7, 0.6, 0.5, 0.4, 0.3, 0.2, 0.1, 0.0,
];

/// Mean wall thickness along a lattice axis, as a fraction of the wavelength, ascending.
pub static SHEET_THICKNESS_FRACTION: [Real; 26] = [
    0.0, 0.01946, 0.03895, 0.05898, 0.07978, 0.10007, 0.12095, 0.14135, 0.16259, 0.18666,
    0.21044, 0.23505, 0.26055, 0.2872, 0.31246, 0.34388, 0.37666, 0.40738, 0.44492, 0.48683,
    0.53704, 0.59386, 0.65288, 0.71328, 0.80147, 0.91656,
];

/// Sheet isovalue at each [`SHEET_THICKNESS_FRACTION`] knot.
pub static SHEET_THICKNESS_ISOVALUE: [Real; 26] = [
    0.0, 0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7, 0.8, 0.9, 1.0, 1.1, 1.2, 1.3, 1.4, 1.5, 1.6, 1.7,
    1.8, 1.9, 2.0, 2.1, 2.2, 2.3, 2.4, 2.5,
];

/// Piecewise-linear curve through ascending knots.
///
/// Outside the knot range the end values are held, like `numpy.interp`.
#[derive(Clone, Copy, Debug)]
pub struct CalibrationCurve {
    pub xs: &'static [Real],
    pub ys: &'static [Real],
}

impl CalibrationCurve {
    pub fn gyroid_porosity() -> Self {
        Self {
            xs: &GYROID_POROSITY,
            ys: &GYROID_ISOVALUE,
        }
    }

    pub fn diamond_porosity() -> Self {
        Self {
            xs: &DIAMOND_POROSITY,
            ys: &DIAMOND_ISOVALUE,
        }
    }

    pub fn sheet_gyroid_porosity() -> Self {
        Self {
            xs: &SHEET_GYROID_POROSITY,
            ys: &SHEET_GYROID_ISOVALUE,
        }
    }

    pub fn sheet_thickness() -> Self {
        Self {
            xs: &SHEET_THICKNESS_FRACTION,
            ys: &SHEET_THICKNESS_ISOVALUE,
        }
    }

    /// Porosity curve for a surface family.
    pub fn porosity(family: SurfaceFamily) -> Self {
        match family {
            SurfaceFamily::Gyroid => Self::gyroid_porosity(),
            SurfaceFamily::Diamond => Self::diamond_porosity(),
            SurfaceFamily::SheetGyroid => Self::sheet_gyroid_porosity(),
        }
    }

    pub fn interpolate(&self, x: Real) -> Real {
        let xs = self.xs;
        let ys = self.ys;
        debug_assert_eq!(xs.len(), ys.len());
        let last = xs.len() - 1;
        if x <= xs[0] {
            return ys[0];
        }
        if x >= xs[last] {
            return ys[last];
        }
        // first knot strictly above x; x lies in [xs[hi - 1], xs[hi])
        let hi = xs.partition_point(|&k| k <= x);
        let lo = hi - 1;
        let t = (x - xs[lo]) / (xs[hi] - xs[lo]);
        ys[lo] + t * (ys[hi] - ys[lo])
    }
}

/// Isovalue that gives `porosity` void fraction for `family`.
///
/// `porosity` must lie in `[0, 1]`; 0 is fully solid, 1 fully void.
/// For [`SurfaceFamily::SheetGyroid`] the result is the full separation `v`
/// between the two gyroids.
pub fn porosity_to_isovalue(family: SurfaceFamily, porosity: Real) -> Result<Real, TpmsError> {
    if !(0.0..=1.0).contains(&porosity) {
        return Err(TpmsError::invalid(
            "porosity",
            format!("must be between 0 and 1, got {porosity}"),
        ));
    }
    Ok(CalibrationCurve::porosity(family).interpolate(porosity))
}

/// Sheet isovalue for a wall `thickness` at wavelength `wavelength`.
///
/// Fails with [`TpmsError::CalibrationRange`] unless `0 < thickness / wavelength < 0.88`.
pub fn thickness_to_isovalue(thickness: Real, wavelength: Real) -> Result<Real, TpmsError> {
    if !thickness.is_finite() {
        return Err(TpmsError::invalid(
            "thickness",
            format!("must be finite, got {thickness}"),
        ));
    }
    if !(wavelength.is_finite() && wavelength > 0.0) {
        return Err(TpmsError::invalid(
            "wavelength",
            format!("must be positive, got {wavelength}"),
        ));
    }
    let fraction = thickness / wavelength;
    if fraction <= 0.0 || fraction >= THICKNESS_LIMIT {
        return Err(TpmsError::CalibrationRange {
            thickness,
            wavelength,
            fraction,
        });
    }
    Ok(CalibrationCurve::sheet_thickness().interpolate(fraction))
}

/// [`thickness_to_isovalue`] normalized by the mean of the three wavelengths.
///
/// The thickness curve was sampled on an isotropic lattice, so unequal
/// wavelengths only log a warning.
pub fn sheet_isovalue_from_thickness(
    thickness: Real,
    wavelengths: &Vector3<Real>,
) -> Result<Real, TpmsError> {
    let mean = wavelengths.mean();
    if !is_isotropic(wavelengths) {
        tracing::warn!(
            wavelengths = ?wavelengths.as_slice(),
            mean_wavelength = mean,
            "sheet thickness calibration assumes equal wavelengths; using their mean"
        );
    }
    thickness_to_isovalue(thickness, mean)
}

/// `true` when the three wavelengths agree within [`tolerance`], relative to their mean.
pub fn is_isotropic(wavelengths: &Vector3<Real>) -> bool {
    let spread = wavelengths.max() - wavelengths.min();
    spread <= tolerance() * wavelengths.mean().abs().max(1.0)
}
