//! Mesh writers.
//!
//! Every writer is behind a cargo feature and accepts anything implementing
//! [`crate::triangulated::Triangulated3D`].

#[cfg(feature = "stl-io")]
mod stl;

#[cfg(feature = "stl-io")]
pub use stl::{StlFormat, to_stl_ascii, to_stl_binary, write_stl};
