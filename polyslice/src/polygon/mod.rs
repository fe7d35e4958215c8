//! Polygon type with its metrics, shape generators and the boolean difference used to cut it.
mod generators;
pub mod internal;
mod pgon;
mod pgon_types;

pub use generators::*;
pub use pgon::*;
pub use pgon_types::*;

pub(crate) use pgon::build_spatial_index;
