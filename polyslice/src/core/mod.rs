//! Core module has common math and numeric traits used by the polygon and slicing modules.
pub mod math;
pub mod traits;
