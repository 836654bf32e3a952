//! Shared fixtures and test doubles for the Arcana workspace.
//!
//! Provides the canonical 78-card deck fixture, a deck source over it,
//! an in-memory cosine vector store, and embedding stubs (deterministic,
//! flaky, slow) for exercising the retrieval pipeline without I/O.

use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use arcana_core::errors::{ArcanaResult, RetrievalError};
use arcana_core::models::{Card, Chunk, Deck};
use arcana_core::traits::{IDeckSource, IEmbeddingProvider, IVectorStore};

/// Root directory of the test-fixtures folder.
fn fixtures_root() -> PathBuf {
    // Works from any crate in the workspace: walk up to find test-fixtures.
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
    let mut path = PathBuf::from(&manifest_dir);
    while !path.join("test-fixtures").exists() {
        if !path.pop() {
            panic!("could not find test-fixtures directory from CARGO_MANIFEST_DIR={manifest_dir}");
        }
    }
    path.join("test-fixtures")
}

/// Load and deserialize a JSON fixture file.
///
/// # Panics
/// Panics if the file doesn't exist or can't be deserialized.
pub fn load_fixture<T: DeserializeOwned>(relative_path: &str) -> T {
    let path = fixtures_root().join(relative_path);
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("failed to read fixture {}: {e}", path.display()));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("failed to parse fixture {}: {e}", path.display()))
}

/// The full Rider-Waite card list from `fixtures/deck.json`.
pub fn fixture_cards() -> Vec<Card> {
    load_fixture("fixtures/deck.json")
}

/// The fixture cards validated into a [`Deck`].
pub fn fixture_deck() -> Deck {
    Deck::new(fixture_cards()).expect("fixture deck must validate")
}

/// Deck source over the fixture deck (or any card list handed in).
pub struct FixtureDeckSource {
    cards: Vec<Card>,
}

impl FixtureDeckSource {
    pub fn new() -> Self {
        Self { cards: fixture_cards() }
    }

    /// A source returning an arbitrary card list, for validation tests.
    pub fn with_cards(cards: Vec<Card>) -> Self {
        Self { cards }
    }
}

impl Default for FixtureDeckSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl IDeckSource for FixtureDeckSource {
    async fn list_cards(&self) -> ArcanaResult<Vec<Card>> {
        Ok(self.cards.clone())
    }
}

/// Deterministic embedding stub: hashes tokens into buckets and
/// L2-normalizes. Counts provider invocations so single-flight tests can
/// assert how often it actually ran.
pub struct StubEmbedder {
    dimensions: usize,
    calls: AtomicUsize,
}

impl StubEmbedder {
    pub fn new(dimensions: usize) -> Self {
        Self { dimensions, calls: AtomicUsize::new(0) }
    }

    /// How many embed calls the provider has served (batch items count
    /// individually).
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Synchronous embedding, usable while seeding a vector store.
    pub fn vector(&self, text: &str) -> Vec<f32> {
        let mut v = vec![0.0f32; self.dimensions];
        for token in text.split_whitespace() {
            let mut h: u64 = 0xcbf29ce484222325;
            for b in token.to_lowercase().as_bytes() {
                h ^= u64::from(*b);
                h = h.wrapping_mul(0x100000001b3);
            }
            v[(h as usize) % self.dimensions] += 1.0;
        }
        let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > f32::EPSILON {
            for x in &mut v {
                *x /= norm;
            }
        }
        v
    }
}

impl Default for StubEmbedder {
    fn default() -> Self {
        Self::new(32)
    }
}

#[async_trait]
impl IEmbeddingProvider for StubEmbedder {
    async fn embed(&self, text: &str) -> ArcanaResult<Vec<f32>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.vector(text))
    }

    async fn embed_batch(&self, texts: &[String]) -> ArcanaResult<Vec<Vec<f32>>> {
        self.calls.fetch_add(texts.len(), Ordering::SeqCst);
        Ok(texts.iter().map(|t| self.vector(t)).collect())
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        "stub"
    }

    fn is_available(&self) -> bool {
        true
    }
}

/// Embedder that fails its first `failures` calls, then behaves like
/// [`StubEmbedder`]. Exercises the retry-then-degrade path.
pub struct FlakyEmbedder {
    inner: StubEmbedder,
    failures_remaining: AtomicUsize,
}

impl FlakyEmbedder {
    pub fn new(dimensions: usize, failures: usize) -> Self {
        Self {
            inner: StubEmbedder::new(dimensions),
            failures_remaining: AtomicUsize::new(failures),
        }
    }

    pub fn calls(&self) -> usize {
        self.inner.calls()
    }

    fn should_fail(&self) -> bool {
        self.failures_remaining
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
    }
}

#[async_trait]
impl IEmbeddingProvider for FlakyEmbedder {
    async fn embed(&self, text: &str) -> ArcanaResult<Vec<f32>> {
        if self.should_fail() {
            return Err(RetrievalError::EmbeddingFailed {
                provider: "flaky".to_string(),
                reason: "synthetic failure".to_string(),
            }
            .into());
        }
        self.inner.embed(text).await
    }

    async fn embed_batch(&self, texts: &[String]) -> ArcanaResult<Vec<Vec<f32>>> {
        if self.should_fail() {
            return Err(RetrievalError::EmbeddingFailed {
                provider: "flaky".to_string(),
                reason: "synthetic failure".to_string(),
            }
            .into());
        }
        self.inner.embed_batch(texts).await
    }

    fn dimensions(&self) -> usize {
        self.inner.dimensions()
    }

    fn name(&self) -> &str {
        "flaky"
    }

    fn is_available(&self) -> bool {
        true
    }
}

/// Embedder that sleeps before answering, for concurrency and
/// cancellation tests.
pub struct SlowEmbedder {
    inner: StubEmbedder,
    delay: Duration,
}

impl SlowEmbedder {
    pub fn new(dimensions: usize, delay: Duration) -> Self {
        Self { inner: StubEmbedder::new(dimensions), delay }
    }

    pub fn calls(&self) -> usize {
        self.inner.calls()
    }
}

#[async_trait]
impl IEmbeddingProvider for SlowEmbedder {
    async fn embed(&self, text: &str) -> ArcanaResult<Vec<f32>> {
        tokio::time::sleep(self.delay).await;
        self.inner.embed(text).await
    }

    async fn embed_batch(&self, texts: &[String]) -> ArcanaResult<Vec<Vec<f32>>> {
        tokio::time::sleep(self.delay).await;
        self.inner.embed_batch(texts).await
    }

    fn dimensions(&self) -> usize {
        self.inner.dimensions()
    }

    fn name(&self) -> &str {
        "slow"
    }

    fn is_available(&self) -> bool {
        true
    }
}

/// Embedder that records the peak number of concurrent embed calls. The
/// delay keeps calls overlapping long enough for the gauge to see them.
pub struct GaugeEmbedder {
    inner: StubEmbedder,
    delay: Duration,
    in_flight: AtomicUsize,
    peak: AtomicUsize,
}

impl GaugeEmbedder {
    pub fn new(dimensions: usize, delay: Duration) -> Self {
        Self {
            inner: StubEmbedder::new(dimensions),
            delay,
            in_flight: AtomicUsize::new(0),
            peak: AtomicUsize::new(0),
        }
    }

    /// Highest number of embed calls observed in flight at once.
    pub fn peak(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }

    async fn track<F, T>(&self, work: F) -> T
    where
        F: std::future::Future<Output = T>,
    {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
        tokio::time::sleep(self.delay).await;
        let out = work.await;
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        out
    }
}

#[async_trait]
impl IEmbeddingProvider for GaugeEmbedder {
    async fn embed(&self, text: &str) -> ArcanaResult<Vec<f32>> {
        self.track(self.inner.embed(text)).await
    }

    async fn embed_batch(&self, texts: &[String]) -> ArcanaResult<Vec<Vec<f32>>> {
        self.track(self.inner.embed_batch(texts)).await
    }

    fn dimensions(&self) -> usize {
        self.inner.dimensions()
    }

    fn name(&self) -> &str {
        "gauge"
    }

    fn is_available(&self) -> bool {
        true
    }
}

struct StoredChunk {
    id: String,
    source: String,
    text: String,
    embedding: Vec<f32>,
}

/// In-memory vector store over cosine similarity.
pub struct InMemoryVectorStore {
    chunks: Mutex<Vec<StoredChunk>>,
}

impl InMemoryVectorStore {
    pub fn new() -> Self {
        Self { chunks: Mutex::new(Vec::new()) }
    }

    pub fn insert(&self, id: &str, source: &str, text: &str, embedding: Vec<f32>) {
        self.chunks.lock().expect("store lock").push(StoredChunk {
            id: id.to_string(),
            source: source.to_string(),
            text: text.to_string(),
            embedding,
        });
    }

    /// Seeds the store from (id, source, text) rows, embedding each text
    /// with `embedder`.
    pub fn seed(&self, rows: &[(&str, &str, &str)], embedder: &StubEmbedder) {
        for (id, source, text) in rows {
            self.insert(id, source, text, embedder.vector(text));
        }
    }

    pub fn len(&self) -> usize {
        self.chunks.lock().expect("store lock").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for InMemoryVectorStore {
    fn default() -> Self {
        Self::new()
    }
}

fn cosine(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        return 0.0;
    }
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let na: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let nb: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if na <= f32::EPSILON || nb <= f32::EPSILON {
        0.0
    } else {
        dot / (na * nb)
    }
}

#[async_trait]
impl IVectorStore for InMemoryVectorStore {
    async fn similarity_search(
        &self,
        embedding: &[f32],
        top_k: usize,
        min_similarity: f32,
        source_filter: Option<&str>,
    ) -> ArcanaResult<Vec<Chunk>> {
        let chunks = self.chunks.lock().expect("store lock");
        let mut hits: Vec<Chunk> = chunks
            .iter()
            .filter(|c| source_filter.map_or(true, |s| c.source == s))
            .map(|c| Chunk {
                id: c.id.clone(),
                source: c.source.clone(),
                text: c.text.clone(),
                similarity: cosine(embedding, &c.embedding),
            })
            .filter(|c| c.similarity >= min_similarity)
            .collect();
        hits.sort_by(|a, b| {
            b.similarity
                .partial_cmp(&a.similarity)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        hits.truncate(top_k);
        Ok(hits)
    }
}

/// Vector store that always fails, for degradation tests.
pub struct FailingVectorStore;

#[async_trait]
impl IVectorStore for FailingVectorStore {
    async fn similarity_search(
        &self,
        _embedding: &[f32],
        _top_k: usize,
        _min_similarity: f32,
        _source_filter: Option<&str>,
    ) -> ArcanaResult<Vec<Chunk>> {
        Err(RetrievalError::SearchFailed {
            reason: "synthetic store failure".to_string(),
        }
        .into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn deck_fixture_has_78_unique_cards() {
        let cards = fixture_cards();
        assert_eq!(cards.len(), 78);
        let ids: HashSet<u32> = cards.iter().map(|c| c.id).collect();
        assert_eq!(ids.len(), 78);
        // Deck::new applies the same validation and must agree.
        assert_eq!(fixture_deck().len(), 78);
    }

    #[test]
    fn magician_is_card_one() {
        let deck = fixture_deck();
        let magician = deck.by_id(1).unwrap();
        assert_eq!(magician.name_en, "The Magician");
        assert_eq!(magician.name_cn, "魔术师");
    }

    #[test]
    fn stub_embedder_is_deterministic() {
        let e = StubEmbedder::new(16);
        assert_eq!(e.vector("the magician"), e.vector("the magician"));
        assert_ne!(e.vector("the magician"), e.vector("the tower"));
    }

    #[tokio::test]
    async fn store_ranks_by_cosine_similarity() {
        let embedder = StubEmbedder::new(32);
        let store = InMemoryVectorStore::new();
        store.seed(
            &[
                ("a", "pkt", "the magician upright meaning"),
                ("b", "pkt", "the tower reversed meaning"),
                ("c", "78degrees", "the magician card description"),
            ],
            &embedder,
        );

        let query = embedder.vector("the magician upright meaning");
        let hits = store.similarity_search(&query, 3, 0.1, None).await.unwrap();
        assert_eq!(hits[0].id, "a");
        assert!(hits[0].similarity > hits[1].similarity);

        let pkt_only = store
            .similarity_search(&query, 3, 0.0, Some("pkt"))
            .await
            .unwrap();
        assert!(pkt_only.iter().all(|c| c.source == "pkt"));
    }

    #[tokio::test]
    async fn flaky_embedder_recovers_after_failures() {
        let e = FlakyEmbedder::new(8, 1);
        assert!(e.embed("x").await.is_err());
        assert!(e.embed("x").await.is_ok());
    }
}
