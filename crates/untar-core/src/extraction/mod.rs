//! Extraction driver and filesystem materializer.

pub mod engine;
pub mod materialize;

pub use engine::Extractor;
