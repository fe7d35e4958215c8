//! Bodies and the queries the slicer runs against them.
//!
//! The slicer only talks to the traits in this module, [World] is the in-process implementation
//! used by the controller and in tests.
mod body;
mod body_world;
mod traits;

pub use body::*;
pub use body_world::*;
pub use traits::*;

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum WorldError {
    #[error("no live body for {0}")]
    BodyNotFound(BodyHandle),
}
