pub(crate) mod ease;
pub(crate) mod pose;
pub(crate) mod rng;
