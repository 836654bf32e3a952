use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::draw::Draw;
use super::evidence::EvidenceSet;
use super::pattern::PatternReport;
use super::profile::{QuerentProfile, SignificatorChoice};
use super::spread::SpreadType;
use super::trace::ReadingTrace;

/// Input for one reading.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadingRequest {
    /// Caller-supplied id; a v4 uuid is minted when absent.
    pub reading_id: Option<Uuid>,
    pub spread_type: SpreadType,
    pub profile: QuerentProfile,
    /// Querent-chosen significator; overrides the demographic chain.
    pub significator_card_id: Option<u32>,
    /// Fixed rng seed for reproducible draws.
    pub seed: Option<u64>,
}

impl ReadingRequest {
    pub fn new(spread_type: SpreadType) -> Self {
        Self {
            reading_id: None,
            spread_type,
            profile: QuerentProfile::default(),
            significator_card_id: None,
            seed: None,
        }
    }
}

/// Everything handed to the generation consumer for one reading.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadingOutcome {
    pub reading_id: Uuid,
    pub spread_type: SpreadType,
    pub significator: Option<SignificatorChoice>,
    pub draws: Vec<Draw>,
    pub report: PatternReport,
    pub evidence: EvidenceSet,
    pub trace: ReadingTrace,
}
