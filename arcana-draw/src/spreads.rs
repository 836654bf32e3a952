//! Fixed spread layouts: ordered position templates per spread type.
//!
//! Position names and order follow the Pictorial Key tradition; the
//! descriptions are what the planner substitutes into guidance queries.

use arcana_core::models::{PositionTemplate, Spread, SpreadType};

/// Builds the layout for a spread type.
pub fn spread(spread_type: SpreadType) -> Spread {
    let positions = match spread_type {
        SpreadType::ThreeCard => vec![
            position("past", "influences from the past"),
            position("present", "the current situation"),
            position("future", "the developing trend"),
        ],
        SpreadType::CelticCross => vec![
            position("cover", "what covers the significator, the present situation"),
            position("crossing", "what crosses the first card, obstacle or aid"),
            position("basis", "what lies beneath, the basis or root of the matter"),
            position("behind", "what is behind, influences passing away"),
            position("crowned", "what crowns, the possible outcome or aim"),
            position("before", "what is before, the near future"),
            position("self", "the querent themselves"),
            position("environment", "the surroundings and influence of others"),
            position("hopes_and_fears", "the querent's hopes and fears"),
            position("outcome", "the final outcome"),
        ],
    };
    Spread { spread_type, positions }
}

fn position(name: &str, description: &str) -> PositionTemplate {
    PositionTemplate {
        name: name.to_string(),
        description: description.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn three_card_layout() {
        let s = spread(SpreadType::ThreeCard);
        assert_eq!(s.position_count(), 3);
        assert_eq!(s.positions[0].name, "past");
        assert_eq!(s.positions[2].name, "future");
        assert!(!s.spread_type.uses_significator());
    }

    #[test]
    fn celtic_cross_layout() {
        let s = spread(SpreadType::CelticCross);
        assert_eq!(s.position_count(), 10);
        assert_eq!(s.positions[0].name, "cover");
        assert_eq!(s.positions[9].name, "outcome");
        assert!(s.spread_type.uses_significator());
    }

    #[test]
    fn position_counts_match_spread_type() {
        for t in [SpreadType::ThreeCard, SpreadType::CelticCross] {
            assert_eq!(spread(t).position_count(), t.position_count());
        }
    }
}
