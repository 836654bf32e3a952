//! Error taxonomy: configuration errors are fatal at startup, selection
//! errors fail the single reading that hit them, retrieval errors are
//! recovered per query and only ever surface in the trace.

mod config_error;
mod retrieval_error;
mod selection_error;

pub use config_error::ConfigError;
pub use retrieval_error::RetrievalError;
pub use selection_error::SelectionError;

use thiserror::Error;
use uuid::Uuid;

/// Top-level error for the engine.
#[derive(Debug, Error)]
pub enum ArcanaError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Selection(#[from] SelectionError),

    #[error(transparent)]
    Retrieval(#[from] RetrievalError),

    #[error("reading {reading_id} was cancelled")]
    Cancelled { reading_id: Uuid },
}

/// Convenience alias used across the workspace.
pub type ArcanaResult<T> = Result<T, ArcanaError>;
