//! Cutting polygons with a blade and slicing every body crossed by a cut.
mod slice_all;
mod slice_types;
mod split;

pub use slice_all::*;
pub use slice_types::*;
pub use split::*;
