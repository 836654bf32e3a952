use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::query::QueryKind;

/// Pipeline stages reported through progress events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadingStage {
    Started,
    SignificatorSelected,
    CardsDrawn,
    PatternAnalyzed,
    QueriesPlanned,
    Retrieving,
    Merged,
}

/// Tagged events produced by the pipeline for a transport to consume.
///
/// The pipeline only writes into the channel handed to it; it has no
/// knowledge of the transport on the other end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ReadingEvent {
    Progress {
        reading_id: Uuid,
        stage: ReadingStage,
    },
    Partial {
        reading_id: Uuid,
        kind: QueryKind,
        chunks: usize,
        completed: usize,
        total: usize,
    },
    Complete {
        reading_id: Uuid,
        unique_chunks: usize,
        duration_ms: u64,
    },
    Error {
        reading_id: Uuid,
        message: String,
    },
}
