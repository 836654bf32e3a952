//! # arcana-observability
//!
//! The offline quality loop: a bounded log of reading traces and the
//! tracing subscriber setup shared by binaries and tests.

pub mod trace_log;
pub mod tracing_setup;

pub use trace_log::TraceLog;
pub use tracing_setup::init_tracing;
