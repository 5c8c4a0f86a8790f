//! Regular sample grids and the shape handed to surface nets.

use crate::aabb::BoundingBox;
use crate::errors::TpmsError;
use crate::float_types::Real;
use nalgebra::{Point3, Vector3};

/// Shape of an x-fastest sample buffer, as surface nets sees it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridShape {
    pub nx: u32,
    pub ny: u32,
    pub nz: u32,
}

impl fast_surface_nets::ndshape::Shape<3> for GridShape {
    type Coord = u32;

    #[inline]
    fn as_array(&self) -> [Self::Coord; 3] {
        [self.nx, self.ny, self.nz]
    }

    fn size(&self) -> Self::Coord {
        self.nx * self.ny * self.nz
    }

    fn usize(&self) -> usize {
        self.nx as usize * self.ny as usize * self.nz as usize
    }

    fn linearize(&self, coords: [Self::Coord; 3]) -> u32 {
        let [x, y, z] = coords;
        (z * self.ny + y) * self.nx + x
    }

    fn delinearize(&self, i: u32) -> [Self::Coord; 3] {
        let x = i % self.nx;
        let yz = i / self.nx;
        let y = yz % self.ny;
        let z = yz / self.ny;
        [x, y, z]
    }
}

/// Grid spacing, either the same on every axis or per axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Step {
    Uniform(Real),
    PerAxis(Real, Real, Real),
}

impl Default for Step {
    fn default() -> Self {
        Step::Uniform(0.2)
    }
}

impl From<Real> for Step {
    fn from(step: Real) -> Self {
        Step::Uniform(step)
    }
}

impl From<[Real; 3]> for Step {
    fn from([x, y, z]: [Real; 3]) -> Self {
        Step::PerAxis(x, y, z)
    }
}

impl Step {
    pub fn as_vector(&self) -> Vector3<Real> {
        match *self {
            Step::Uniform(s) => Vector3::repeat(s),
            Step::PerAxis(x, y, z) => Vector3::new(x, y, z),
        }
    }

    pub fn validate(&self) -> Result<(), TpmsError> {
        let v = self.as_vector();
        if v.iter().all(|s| s.is_finite() && *s > 0.0) {
            Ok(())
        } else {
            Err(TpmsError::invalid(
                "step",
                format!("must be greater than 0, got {:?}", v.as_slice()),
            ))
        }
    }
}

/// Sample positions `min + i * step` for `i` in `0..ceil((max - min) / step)`.
///
/// The upper bound is exclusive, like a half-open range: the last sample may
/// fall short of `max` by up to one step.
#[derive(Clone, Debug, PartialEq)]
pub struct SampleGrid {
    axes: [Vec<Real>; 3],
    origin: Point3<Real>,
    step: Vector3<Real>,
}

impl SampleGrid {
    pub fn new(bounds: &BoundingBox, step: Step) -> Result<Self, TpmsError> {
        step.validate()?;
        let delta = step.as_vector();
        let mut axes: [Vec<Real>; 3] = Default::default();
        for (i, axis) in axes.iter_mut().enumerate() {
            let (lo, hi, d) = (bounds.mins[i], bounds.maxs[i], delta[i]);
            let n = ((hi - lo) / d).ceil().max(0.0);
            if n > u32::MAX as Real {
                return Err(TpmsError::invalid(
                    "step",
                    format!("{d} is too fine for the range {lo}..{hi}"),
                ));
            }
            *axis = (0..n as usize).map(|k| lo + k as Real * d).collect();
        }
        let grid = Self {
            axes,
            origin: bounds.mins,
            step: delta,
        };
        let total = grid.axes.iter().try_fold(1u32, |acc, a| {
            u32::try_from(a.len()).ok().and_then(|n| acc.checked_mul(n))
        });
        if total.is_none() {
            return Err(TpmsError::invalid(
                "step",
                format!("grid of {:?} samples is too large", grid.counts()),
            ));
        }
        Ok(grid)
    }

    /// Number of samples along x, y and z.
    pub fn counts(&self) -> [usize; 3] {
        [self.axes[0].len(), self.axes[1].len(), self.axes[2].len()]
    }

    pub fn len(&self) -> usize {
        self.counts().iter().product()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Minimum corner, which is also the first sample.
    pub const fn origin(&self) -> &Point3<Real> {
        &self.origin
    }

    pub const fn step(&self) -> &Vector3<Real> {
        &self.step
    }

    pub fn axis(&self, i: usize) -> &[Real] {
        &self.axes[i]
    }

    /// Every sample position, x varying slowest and z fastest.
    pub fn points(&self) -> Vec<Point3<Real>> {
        let [xs, ys, zs] = &self.axes;
        let mut points = Vec::with_capacity(self.len());
        for &x in xs {
            for &y in ys {
                points.extend(zs.iter().map(|&z| Point3::new(x, y, z)));
            }
        }
        points
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use fast_surface_nets::ndshape::Shape;

    #[test]
    fn shape_round_trips_indices() {
        let shape = GridShape { nx: 3, ny: 4, nz: 5 };
        assert_eq!(shape.usize(), 60);
        for i in 0..60 {
            assert_eq!(shape.linearize(shape.delinearize(i)), i);
        }
        assert_eq!(shape.linearize([1, 0, 0]), 1);
        assert_eq!(shape.linearize([0, 0, 1]), 12);
    }

    #[test]
    fn axes_follow_half_open_ranges() {
        let bb = BoundingBox::new(Point3::new(0.0, -1.0, 2.0), Point3::new(1.0, 1.0, 2.5)).unwrap();
        let grid = SampleGrid::new(&bb, Step::Uniform(0.3)).unwrap();
        // ceil(1/0.3) = 4, ceil(2/0.3) = 7, ceil(0.5/0.3) = 2
        assert_eq!(grid.counts(), [4, 7, 2]);
        assert_relative_eq!(grid.axis(0)[3], 0.9, epsilon = 1e-12);
        assert!(grid.axis(1).iter().all(|&y| y < 1.0));
    }

    #[test]
    fn points_vary_z_fastest() {
        let bb = BoundingBox::new(Point3::origin(), Point3::new(2.0, 2.0, 3.0)).unwrap();
        let grid = SampleGrid::new(&bb, Step::Uniform(1.0)).unwrap();
        let pts = grid.points();
        assert_eq!(pts.len(), 2 * 2 * 3);
        assert_eq!(pts[0], Point3::new(0.0, 0.0, 0.0));
        assert_eq!(pts[1], Point3::new(0.0, 0.0, 1.0));
        assert_eq!(pts[3], Point3::new(0.0, 1.0, 0.0));
        assert_eq!(pts[6], Point3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn per_axis_step() {
        let bb = BoundingBox::centered(Vector3::repeat(2.0));
        let grid = SampleGrid::new(&bb, Step::PerAxis(1.0, 0.5, 0.25)).unwrap();
        assert_eq!(grid.counts(), [2, 4, 8]);
        assert_relative_eq!(*grid.step(), Vector3::new(1.0, 0.5, 0.25));
    }

    #[test]
    fn step_must_be_positive() {
        let bb = BoundingBox::centered(Vector3::repeat(1.0));
        for bad in [Step::Uniform(0.0), Step::Uniform(-0.1), Step::PerAxis(0.1, Real::NAN, 0.1)] {
            assert!(SampleGrid::new(&bb, bad).unwrap_err().is_invalid_parameter());
        }
    }
}
