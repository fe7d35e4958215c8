//! Core math for working with 2D points, directions and line segment intersects.
mod base_math;
mod seg_intersect;
mod vector2;

pub use base_math::*;
pub use seg_intersect::{seg_intr, SegIntr};
pub use vector2::{vec2, Vector2};
