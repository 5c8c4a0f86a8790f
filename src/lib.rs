//! Meshes of **triply periodic minimal surface (TPMS)** lattices for porosity test specimens.
//!
//! A lattice is an implicit field (gyroid, Schwarz diamond or sheet gyroid)
//! scaled per axis by its wavelength, rotated by three Euler angles, and
//! clipped to a box spanning a whole number of periods. The zero level set is
//! sampled on a regular grid and extracted with
//! [surface nets](https://crates.io/crates/fast-surface-nets).
//!
//! The isosurface threshold is given directly, or derived from a target
//! porosity or sheet wall thickness through built-in calibration curves.
//!
//! ```no_run
//! use tpmsgen::{
//!     LatticeParameters, MeshingOptions, PeriodSpec, SurfaceFamily, ThresholdSpec, generate_mesh,
//! };
//!
//! let params = LatticeParameters::isotropic(SurfaceFamily::Gyroid, 10.0, ThresholdSpec::Porosity(0.6))
//!     .with_rotation(0.0, 0.0, 45.0);
//! let mesh = generate_mesh(&params, &MeshingOptions::default().with_periods(PeriodSpec::Uniform(2))).unwrap();
//! println!("{} triangles", mesh.len());
//! ```
//!
//! # Features
//! #### Default
//! - **f64**: use f64 as Real
//! - [**stl-io**](https://en.wikipedia.org/wiki/STL_(file_format)): `.stl` export
//!
//! #### Optional
//! - **f32**: use f32 as Real, this conflicts with f64
//! - **parallel**: use rayon to evaluate fields over the sample grid
//! - **cli**: the `tpmsgen` command line tool

#![forbid(unsafe_code)]
#![warn(clippy::missing_const_for_fn, clippy::approx_constant, clippy::all)]

pub mod aabb;
pub mod calibration;
pub mod domain;
pub mod errors;
pub mod float_types;
pub mod generate;
pub mod io;
pub mod mesh;
pub mod rotation;
pub mod sdf;
pub mod tpms;
pub mod triangulated;

#[cfg(any(all(feature = "f64", feature = "f32"), not(any(feature = "f64", feature = "f32"))))]
compile_error!("Either 'f64' or 'f32' feature must be specified, but not both");

pub use aabb::BoundingBox;
pub use domain::{LatticeBox, PeriodSpec, compose_box, compose_sized_box};
pub use errors::{ExtractionError, TpmsError};
pub use generate::{MeshingOptions, generate_field, generate_mesh};
pub use mesh::Mesh;
pub use rotation::compose_rotation;
pub use sdf::{Step, extract_mesh};
pub use tpms::{ImplicitField, LatticeParameters, SurfaceFamily, ThresholdSpec, TpmsField};
