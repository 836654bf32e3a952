//! # arcana-embeddings
//!
//! Embedding providers (OpenAI-compatible HTTP, hashed offline fallback)
//! and the [`EmbeddingEngine`], which memoizes lookups for one reading
//! through a single-flight cache. The cache lives and dies with its
//! reading; nothing in this crate persists across readings.

pub mod cache;
pub mod engine;
pub mod providers;

pub use cache::{cache_key, normalize, EmbeddingCache};
pub use engine::EmbeddingEngine;
pub use providers::{create_provider, HashedEmbeddings, OpenAiEmbeddings};
