//! Core processing building blocks: crop geometry, resizing, alpha flattening
//! and the pure crop/export pipelines. These are internal primitives consumed
//! by the high-level `api` module.
pub mod params;
pub mod processing;
