//! # arcana-retrieval
//!
//! The retrieval half of the engine: expands a draw into a bounded set
//! of queries, runs them concurrently against the embedding engine and
//! vector store, and merges every result into one deduplicated,
//! provenance-tracked evidence set.

pub mod executor;
pub mod merge;
pub mod planner;
pub mod search;

pub use executor::{QueryExecutor, QueryOutcome};
pub use merge::merge;
pub use planner::plan;
pub use search::BalancedSearcher;
