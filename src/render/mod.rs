//! Rendering boundary: the drawing capability trait, the scene painter, and two surfaces.

pub(crate) mod cpu;
pub(crate) mod draw;
pub(crate) mod recording;
pub(crate) mod surface;
