//! Procedural scene synthesis.

pub(crate) mod physics;
pub(crate) mod throw;
