//! Gyroid, diamond and sheet-gyroid fields.

use super::{ImplicitField, LatticeFrame};
use crate::errors::TpmsError;
use crate::float_types::Real;
use nalgebra::{Point3, Vector3};

/// Gyroid solid: `cos x' sin y' + cos y' sin z' + cos z' sin x' - t`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Gyroid {
    frame: LatticeFrame,
    isovalue: Real,
}

impl Gyroid {
    pub fn new(frame: LatticeFrame, isovalue: Real) -> Result<Self, TpmsError> {
        if !isovalue.is_finite() {
            return Err(TpmsError::invalid("isovalue", format!("must be finite, got {isovalue}")));
        }
        Ok(Self { frame, isovalue })
    }

    #[inline]
    pub const fn isovalue(&self) -> Real {
        self.isovalue
    }

    #[inline]
    pub const fn frame(&self) -> &LatticeFrame {
        &self.frame
    }

    /// Gyroid level function of already scaled/rotated coordinates.
    #[inline]
    pub fn level(q: &Vector3<Real>) -> Real {
        let (sx, cx) = q.x.sin_cos();
        let (sy, cy) = q.y.sin_cos();
        let (sz, cz) = q.z.sin_cos();
        cx * sy + cy * sz + cz * sx
    }
}

impl ImplicitField for Gyroid {
    #[inline]
    fn value(&self, p: &Point3<Real>) -> Real {
        Self::level(&self.frame.map(p)) - self.isovalue
    }
}

/// Schwarz diamond solid:
/// `sin x' sin y' sin z' + sin x' cos y' cos z' + cos x' sin y' cos z' + cos x' cos y' sin z' - t`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Diamond {
    frame: LatticeFrame,
    isovalue: Real,
}

impl Diamond {
    pub fn new(frame: LatticeFrame, isovalue: Real) -> Result<Self, TpmsError> {
        if !isovalue.is_finite() {
            return Err(TpmsError::invalid("isovalue", format!("must be finite, got {isovalue}")));
        }
        Ok(Self { frame, isovalue })
    }

    #[inline]
    pub const fn isovalue(&self) -> Real {
        self.isovalue
    }

    #[inline]
    pub const fn frame(&self) -> &LatticeFrame {
        &self.frame
    }

    #[inline]
    pub fn level(q: &Vector3<Real>) -> Real {
        let (sx, cx) = q.x.sin_cos();
        let (sy, cy) = q.y.sin_cos();
        let (sz, cz) = q.z.sin_cos();
        sx * sy * sz + sx * cy * cz + cx * sy * cz + cx * cy * sz
    }
}

impl ImplicitField for Diamond {
    #[inline]
    fn value(&self, p: &Point3<Real>) -> Real {
        Self::level(&self.frame.map(p)) - self.isovalue
    }
}

/// Thin gyroid shell: the gyroid at `+v/2` with the gyroid at `-v/2` cut out.
///
/// The interior is `-v/2 < G < v/2`, a wall centred on the minimal surface
/// whose thickness grows with `v`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SheetGyroid {
    outer: Gyroid,
    inner: Gyroid,
    isovalue: Real,
}

impl SheetGyroid {
    /// `isovalue` is the full separation between the two gyroids and must be positive.
    pub fn new(frame: LatticeFrame, isovalue: Real) -> Result<Self, TpmsError> {
        if !(isovalue.is_finite() && isovalue > 0.0) {
            return Err(TpmsError::invalid(
                "isovalue",
                format!("sheet gyroid needs a positive isovalue, got {isovalue}"),
            ));
        }
        let half = isovalue / 2.0;
        Ok(Self {
            outer: Gyroid::new(frame, half)?,
            inner: Gyroid::new(frame, -half)?,
            isovalue,
        })
    }

    #[inline]
    pub const fn isovalue(&self) -> Real {
        self.isovalue
    }

    #[inline]
    pub const fn frame(&self) -> &LatticeFrame {
        self.outer.frame()
    }

    #[inline]
    pub const fn outer(&self) -> &Gyroid {
        &self.outer
    }

    #[inline]
    pub const fn inner(&self) -> &Gyroid {
        &self.inner
    }
}

impl ImplicitField for SheetGyroid {
    #[inline]
    fn value(&self, p: &Point3<Real>) -> Real {
        // outer minus inner, as a solid difference
        self.outer.value(p).max(-self.inner.value(p))
    }
}
