use serde::{Deserialize, Serialize};

/// Minor-suit counts within a draw.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuitCounts {
    pub wands: usize,
    pub cups: usize,
    pub swords: usize,
    pub pentacles: usize,
}

/// Qualitative flags derived from fixed thresholds.
///
/// Advisory annotations for the query planner; the analyzer itself never
/// issues queries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternFlags {
    /// Major arcana form a strict majority of the spread.
    pub turning_point: bool,
    /// Reversed cards form a strict majority.
    pub obstacles: bool,
    /// Some rank number appears on two or more cards.
    pub emphasis: bool,
    /// Two or more court cards are present.
    pub court_presence: bool,
}

/// Structural statistics over one draw.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternReport {
    pub major_count: usize,
    pub minor_count: usize,
    pub reversed_count: usize,
    pub court_count: usize,
    pub suit_counts: SuitCounts,
    /// Rank numbers appearing on two or more cards, ascending.
    pub repeated_ranks: Vec<u32>,
    pub flags: PatternFlags,
}
