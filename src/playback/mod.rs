//! Frame-accurate playback over the fixed scene timeline.

pub(crate) mod clock;
pub(crate) mod engine;
