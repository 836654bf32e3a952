//! # arcana-draw
//!
//! Everything that happens before retrieval: spread layouts, the
//! deterministic significator chain, the shuffle/cut/draw engine, and the
//! pure pattern analyzer. No I/O lives here; the deck arrives validated
//! and the output is plain data for the query planner.

pub mod analyzer;
pub mod engine;
pub mod significator;
pub mod spreads;

pub use analyzer::analyze;
pub use engine::{DrawEngine, ShuffledCard};
pub use significator::select;
pub use spreads::spread;
