//! # arcana-reading
//!
//! The orchestrator crate: wires the draw engine, query planner,
//! embedding cache, executor, and merger into one pipeline per reading,
//! with registry-backed cancellation and typed progress events.

pub mod pipeline;
pub mod registry;

pub use pipeline::ReadingPipeline;
pub use registry::ReadingRegistry;
