//! # arcana-core
//!
//! Foundation crate for the Arcana reading engine.
//! Defines all types, traits, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::ArcanaConfig;
pub use errors::{ArcanaError, ArcanaResult};
pub use models::{Arcana, Card, Deck, Draw, Suit};
pub use models::{EvidenceBuilder, EvidenceSet, PatternReport, Query, QueryKind};
