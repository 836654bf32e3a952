//! Default values for the config subsystems.
//!
//! Runtime tunables that also matter outside configuration live in
//! [`crate::constants`]; these are config-only.

pub const DEFAULT_EMBEDDING_PROVIDER: &str = "hashed";
pub const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";
pub const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-3-small";
pub const DEFAULT_EMBEDDING_DIMENSIONS: usize = 384;
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;
