use serde::{Deserialize, Serialize};

use crate::constants::{
    CARD_MIN_SIMILARITY, CARD_QUERY_TOP_K, NARROW_QUERY_TOP_K, SPREAD_MIN_SIMILARITY,
};

/// The fixed enumeration of retrieval query archetypes.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum QueryKind {
    // Per-card archetypes.
    Basic,
    Visual,
    Upright,
    Reversed,
    PositionMeaning,
    SuitPsychology,
    // Spread-level, always issued.
    MethodSteps,
    PositionGuidance,
    PsychologicalBackground,
    TraditionalMethod,
    // Spread-level, flag-gated.
    NumberPattern,
    CardRelationship,
    CourtCards,
}

impl QueryKind {
    /// Whether the archetype is parameterized per card.
    pub fn is_card_level(self) -> bool {
        matches!(
            self,
            QueryKind::Basic
                | QueryKind::Visual
                | QueryKind::Upright
                | QueryKind::Reversed
                | QueryKind::PositionMeaning
                | QueryKind::SuitPsychology
        )
    }

    /// Result budget for the archetype.
    pub fn top_k(self) -> usize {
        match self {
            QueryKind::Basic | QueryKind::PositionMeaning => CARD_QUERY_TOP_K,
            _ => NARROW_QUERY_TOP_K,
        }
    }

    /// Similarity floor for the archetype.
    pub fn min_similarity(self) -> f32 {
        if self.is_card_level() {
            CARD_MIN_SIMILARITY
        } else {
            SPREAD_MIN_SIMILARITY
        }
    }
}

/// One retrieval query; generated per reading, never persisted beyond the
/// trace artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Query {
    pub text: String,
    pub kind: QueryKind,
    /// The originating card for card-level archetypes.
    pub card_id: Option<u32>,
    pub position: Option<String>,
}
