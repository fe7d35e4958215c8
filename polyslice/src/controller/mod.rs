//! Pointer driven front end: tool selection, drag state and the actions a finished drag runs.
mod input;
mod registry;
mod tool;

pub use input::*;
pub use registry::*;
pub use tool::*;
