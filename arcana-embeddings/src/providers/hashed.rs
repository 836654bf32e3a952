//! Hashed offline fallback provider.
//!
//! Produces deterministic dense vectors by hashing terms into
//! fixed-dimension buckets with frequency weighting and L2
//! normalization. Not as semantically rich as neural embeddings, but
//! always available and free of network dependencies.

use std::collections::HashMap;

use arcana_core::errors::ArcanaResult;
use arcana_core::traits::IEmbeddingProvider;
use async_trait::async_trait;

pub struct HashedEmbeddings {
    dimensions: usize,
}

impl HashedEmbeddings {
    pub fn new(dimensions: usize) -> Self {
        Self { dimensions }
    }

    /// Hash a term into a bucket index using FNV-1a.
    fn hash_term(term: &str, dims: usize) -> usize {
        let mut h: u64 = 0xcbf29ce484222325;
        for b in term.as_bytes() {
            h ^= u64::from(*b);
            h = h.wrapping_mul(0x100000001b3);
        }
        (h as usize) % dims
    }

    /// Tokenize text into lowercase alphanumeric terms.
    fn tokenize(text: &str) -> Vec<String> {
        text.split(|c: char| !c.is_alphanumeric() && c != '_')
            .filter(|s| s.len() >= 2)
            .map(str::to_lowercase)
            .collect()
    }

    fn vector(&self, text: &str) -> Vec<f32> {
        let tokens = Self::tokenize(text);
        if tokens.is_empty() {
            return vec![0.0; self.dimensions];
        }

        let mut tf: HashMap<&str, f32> = HashMap::new();
        for tok in &tokens {
            *tf.entry(tok.as_str()).or_default() += 1.0;
        }

        let total = tokens.len() as f32;
        let mut vec = vec![0.0f32; self.dimensions];
        for (term, count) in &tf {
            let freq = count / total;
            // Longer terms carry more signal than likely stopwords.
            let weight = 1.0 + (term.len() as f32).ln();
            vec[Self::hash_term(term, self.dimensions)] += freq * weight;
        }

        let norm: f32 = vec.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > f32::EPSILON {
            for v in &mut vec {
                *v /= norm;
            }
        }

        vec
    }
}

#[async_trait]
impl IEmbeddingProvider for HashedEmbeddings {
    async fn embed(&self, text: &str) -> ArcanaResult<Vec<f32>> {
        Ok(self.vector(text))
    }

    async fn embed_batch(&self, texts: &[String]) -> ArcanaResult<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|t| self.vector(t)).collect())
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        "hashed"
    }

    fn is_available(&self) -> bool {
        true
    }
}
