//! Geometry engine for slicing 2D bodies along a drawn cut line.
//!
//! Bodies are outlined by a [polygon::Polygon]. A cut subtracts a thin blade polygon from each
//! body the cut line crosses, every remaining piece is re-origined on its centroid and spawned as
//! a new body. See [slicer::slice_all] for the multi-body entry point and
//! [controller::Controller] for the pointer driven front end.
extern crate static_aabb2d_index;

#[macro_use]
mod macros;
pub mod controller;
pub mod core;
pub mod polygon;
pub mod slicer;
pub mod world;

pub use static_aabb2d_index::AABB;
