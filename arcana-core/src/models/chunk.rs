use serde::{Deserialize, Serialize};

/// A unit of retrievable text from the evidence corpus.
///
/// Owned by the retrieval backend; the engine only reads it and
/// deduplicates by `id`. `similarity` is relative to the query that
/// fetched this instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
    pub id: String,
    pub source: String,
    pub text: String,
    pub similarity: f32,
}
