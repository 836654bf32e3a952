//! Trait seams for the external collaborators the engine consumes.

mod deck_source;
mod embedding;
mod vector_store;

pub use deck_source::IDeckSource;
pub use embedding::IEmbeddingProvider;
pub use vector_store::IVectorStore;
