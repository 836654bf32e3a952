/// Arcana engine version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// A complete tarot deck holds exactly this many cards.
pub const DECK_SIZE: usize = 78;

/// Probability that a card lands reversed, rolled once per shuffle.
pub const DEFAULT_REVERSAL_PROBABILITY: f64 = 0.5;

/// Maximum number of query tasks in flight at once.
pub const DEFAULT_MAX_CONCURRENT_QUERIES: usize = 10;

/// Delay before the single retry of a failed query.
pub const DEFAULT_RETRY_BACKOFF_MS: u64 = 200;

/// Candidate pool fetched per search is `top_k * CANDIDATE_MULTIPLIER`,
/// capped at `MAX_SEARCH_CANDIDATES`.
pub const CANDIDATE_MULTIPLIER: usize = 3;
pub const MAX_SEARCH_CANDIDATES: usize = 20;

/// Result counts per query tier.
pub const CARD_QUERY_TOP_K: usize = 10;
pub const NARROW_QUERY_TOP_K: usize = 5;

/// Similarity floors per query tier.
pub const CARD_MIN_SIMILARITY: f32 = 0.5;
pub const SPREAD_MIN_SIMILARITY: f32 = 0.25;

/// Retained readings in the trace log ring buffer.
pub const TRACE_LOG_CAPACITY: usize = 256;

/// Court-card rank numbers on minor cards.
pub const RANK_PAGE: u32 = 11;
pub const RANK_KNIGHT: u32 = 12;
pub const RANK_QUEEN: u32 = 13;
pub const RANK_KING: u32 = 14;
