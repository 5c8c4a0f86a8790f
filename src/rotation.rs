//! Euler-angle rotation of the lattice frame.
//!
//! The lattice is oriented by rotating the *sample coordinates* before the
//! field is evaluated. Points are treated as row vectors and multiplied on the
//! right, `p' = p · R`, with `R = Rx · Ry · Rz`. Changing either the product
//! order or the side of the multiplication mirrors or re-orients the lattice,
//! so both are fixed here.

use crate::float_types::Real;
use nalgebra::{Matrix3, Point3, Rotation3, RowVector3, Vector3};

/// Unit the three Euler angles are given in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AngleUnit {
    #[default]
    Degrees,
    Radians,
}

impl AngleUnit {
    #[inline]
    pub fn to_radians(self, angle: Real) -> Real {
        match self {
            AngleUnit::Degrees => angle.to_radians(),
            AngleUnit::Radians => angle,
        }
    }
}

/// Rotation about the x axis, `[[1,0,0],[0,c,-s],[0,s,c]]`.
#[inline]
pub fn rotate_about_x(theta: Real, unit: AngleUnit) -> Matrix3<Real> {
    Rotation3::from_axis_angle(&Vector3::x_axis(), unit.to_radians(theta)).into_inner()
}

/// Rotation about the y axis, `[[c,0,s],[0,1,0],[-s,0,c]]`.
#[inline]
pub fn rotate_about_y(theta: Real, unit: AngleUnit) -> Matrix3<Real> {
    Rotation3::from_axis_angle(&Vector3::y_axis(), unit.to_radians(theta)).into_inner()
}

/// Rotation about the z axis, `[[c,-s,0],[s,c,0],[0,0,1]]`.
#[inline]
pub fn rotate_about_z(theta: Real, unit: AngleUnit) -> Matrix3<Real> {
    Rotation3::from_axis_angle(&Vector3::z_axis(), unit.to_radians(theta)).into_inner()
}

/// Combined rotation `Rx · Ry · Rz` for angles in degrees.
///
/// ```
/// # use tpmsgen::rotation::compose_rotation;
/// # use nalgebra::Matrix3;
/// assert_eq!(compose_rotation(0.0, 0.0, 0.0), Matrix3::identity());
/// ```
pub fn compose_rotation(theta_x: Real, theta_y: Real, theta_z: Real) -> Matrix3<Real> {
    compose_rotation_in(theta_x, theta_y, theta_z, AngleUnit::Degrees)
}

/// Combined rotation `Rx · Ry · Rz` for angles in radians.
pub fn compose_rotation_radians(theta_x: Real, theta_y: Real, theta_z: Real) -> Matrix3<Real> {
    compose_rotation_in(theta_x, theta_y, theta_z, AngleUnit::Radians)
}

/// Combined rotation `Rx · Ry · Rz` for angles in `unit`.
pub fn compose_rotation_in(
    theta_x: Real,
    theta_y: Real,
    theta_z: Real,
    unit: AngleUnit,
) -> Matrix3<Real> {
    rotate_about_x(theta_x, unit) * rotate_about_y(theta_y, unit) * rotate_about_z(theta_z, unit)
}

/// Apply `rotation` to a point treated as a row vector: `p · R`.
#[inline]
pub fn apply_row(rotation: &Matrix3<Real>, p: &Vector3<Real>) -> Vector3<Real> {
    let row: RowVector3<Real> = p.transpose() * rotation;
    row.transpose()
}

/// Batch form of [`apply_row`], preserving order.
pub fn rotate_points(rotation: &Matrix3<Real>, points: &[Point3<Real>]) -> Vec<Point3<Real>> {
    points
        .iter()
        .map(|p| Point3::from(apply_row(rotation, &p.coords)))
        .collect()
}
