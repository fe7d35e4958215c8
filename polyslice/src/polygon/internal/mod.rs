//! Internal polygon modules made public for testing and debugging purposes.
//!
//! Not expected to be used directly, [super::Polygon::clip] is the entry point.
pub mod pgon_clip;
pub mod pgon_intersects;
