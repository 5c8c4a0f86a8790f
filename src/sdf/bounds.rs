//! Automatic bounds for fields whose extent is not known up front.

use crate::aabb::BoundingBox;
use crate::errors::TpmsError;
use crate::float_types::Real;
use crate::tpms::ImplicitField;
use nalgebra::{Point3, Vector3};

const SAMPLES_PER_AXIS: usize = 16;
const MAX_PASSES: usize = 32;
const INITIAL_HALF_EXTENT: Real = 1e9;

/// Shrink a huge search cube onto the field's zero level set.
///
/// Each pass samples a 16³ lattice over the current box, keeps the samples
/// whose value lies within half a cell diagonal of zero and replaces the box
/// with their index extent padded by half a cell. Refinement stops after 32
/// passes or once the cell size stops changing.
///
/// Fails when a pass keeps no samples, which happens for fields that never
/// come near zero (or whose structure is far smaller than the search cells).
pub fn estimate_bounds<F: ImplicitField + ?Sized>(field: &F) -> Result<BoundingBox, TpmsError> {
    let mut lo = Vector3::repeat(-INITIAL_HALF_EXTENT);
    let mut hi = Vector3::repeat(INITIAL_HALF_EXTENT);
    let mut previous: Option<Real> = None;

    for pass in 0..MAX_PASSES {
        let d = (hi - lo) / (SAMPLES_PER_AXIS - 1) as Real;
        let threshold = d.norm() / 2.0;
        if previous == Some(threshold) {
            break;
        }
        previous = Some(threshold);

        let points = lattice(&lo, &d);
        let values = field.evaluate(&points);

        let mut near: Option<([usize; 3], [usize; 3])> = None;
        for (i, v) in values.iter().enumerate() {
            if v.abs() > threshold {
                continue;
            }
            let idx = unflatten(i);
            near = Some(match near {
                None => (idx, idx),
                Some((mn, mx)) => (
                    [mn[0].min(idx[0]), mn[1].min(idx[1]), mn[2].min(idx[2])],
                    [mx[0].max(idx[0]), mx[1].max(idx[1]), mx[2].max(idx[2])],
                ),
            });
        }

        let Some((mn, mx)) = near else {
            return Err(TpmsError::BoundsEstimation(format!(
                "no samples within {threshold} of the surface on pass {pass}"
            )));
        };

        let half_cell = d / 2.0;
        let new_lo = lo + as_vector(mn).component_mul(&d) - half_cell;
        let new_hi = lo + as_vector(mx).component_mul(&d) + half_cell;
        lo = new_lo;
        hi = new_hi;
        tracing::trace!(pass, threshold, lo = ?lo.as_slice(), hi = ?hi.as_slice(), "refined bounds");
    }

    tracing::debug!(mins = ?lo.as_slice(), maxs = ?hi.as_slice(), "estimated bounds");
    BoundingBox::new(Point3::from(lo), Point3::from(hi))
        .map_err(|e| TpmsError::BoundsEstimation(e.to_string()))
}

/// Sample lattice starting at `lo`, x slowest and z fastest.
fn lattice(lo: &Vector3<Real>, d: &Vector3<Real>) -> Vec<Point3<Real>> {
    let n = SAMPLES_PER_AXIS;
    let mut points = Vec::with_capacity(n * n * n);
    for i in 0..n {
        for j in 0..n {
            for k in 0..n {
                points.push(Point3::from(lo + as_vector([i, j, k]).component_mul(d)));
            }
        }
    }
    points
}

#[inline]
fn unflatten(i: usize) -> [usize; 3] {
    let n = SAMPLES_PER_AXIS;
    [i / (n * n), (i / n) % n, i % n]
}

#[inline]
fn as_vector(idx: [usize; 3]) -> Vector3<Real> {
    Vector3::new(idx[0] as Real, idx[1] as Real, idx[2] as Real)
}
