use crate::errors::TpmsError;
use crate::float_types::Real;
use nalgebra::{Point3, Vector3};

/// Axis-aligned box given by its minimum and maximum corners.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox {
    pub mins: Point3<Real>,
    pub maxs: Point3<Real>,
}

impl BoundingBox {
    /// Build a box, rejecting corners that are not finite or not strictly ordered on every axis.
    pub fn new(mins: Point3<Real>, maxs: Point3<Real>) -> Result<Self, TpmsError> {
        let finite = mins.iter().chain(maxs.iter()).all(|c| c.is_finite());
        if !finite {
            return Err(TpmsError::invalid("bounds", "corners must be finite"));
        }
        if mins.x >= maxs.x || mins.y >= maxs.y || mins.z >= maxs.z {
            return Err(TpmsError::invalid(
                "bounds",
                format!("min {mins:?} must be below max {maxs:?} on every axis"),
            ));
        }
        Ok(Self { mins, maxs })
    }

    /// Box of the given size centred on the origin.
    #[inline]
    pub fn centered(size: Vector3<Real>) -> Self {
        let half = size * 0.5;
        Self {
            mins: Point3::from(-half),
            maxs: Point3::from(half),
        }
    }

    /// Smallest box containing every point, or `None` for an empty iterator.
    pub fn from_points<'a, I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a Point3<Real>>,
    {
        let mut iter = points.into_iter();
        let first = *iter.next()?;
        let mut bb = Self {
            mins: first,
            maxs: first,
        };
        for p in iter {
            bb.union_point(p);
        }
        Some(bb)
    }

    /// Grow the box to include `p`.
    #[inline]
    pub fn union_point(&mut self, p: &Point3<Real>) {
        self.mins = self.mins.inf(p);
        self.maxs = self.maxs.sup(p);
    }

    /// The box grown by `margin` on every side.
    #[inline]
    pub fn expanded(&self, margin: &Vector3<Real>) -> Self {
        Self {
            mins: self.mins - margin,
            maxs: self.maxs + margin,
        }
    }

    #[inline]
    pub fn extents(&self) -> Vector3<Real> {
        self.maxs - self.mins
    }

    #[inline]
    pub fn center(&self) -> Point3<Real> {
        nalgebra::center(&self.mins, &self.maxs)
    }

    #[inline]
    pub fn contains(&self, p: &Point3<Real>) -> bool {
        (0..3).all(|i| p[i] >= self.mins[i] && p[i] <= self.maxs[i])
    }

    #[inline]
    pub fn intersects(&self, other: &Self) -> bool {
        self.maxs.x >= other.mins.x
            && self.mins.x <= other.maxs.x
            && self.maxs.y >= other.mins.y
            && self.mins.y <= other.maxs.y
            && self.maxs.z >= other.mins.z
            && self.mins.z <= other.maxs.z
    }
}
