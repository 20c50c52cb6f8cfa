//! Scene schema enforcement.
//!
//! [`validate`] is the single chokepoint that turns an untyped document into a typed
//! [`crate::Scene`]; [`skeleton`] is an advisory lint over an already valid scene.

pub(crate) mod skeleton;
pub(crate) mod validate;
