//! Pure structural analysis of a draw.
//!
//! No I/O, no randomness, no hidden state: the same draws always produce
//! the same report. The flags are advisory annotations for the query
//! planner; nothing here issues a query.

use std::collections::BTreeMap;

use arcana_core::models::{Arcana, Draw, PatternFlags, PatternReport, Suit, SuitCounts};

/// Number of court cards that counts as a court presence.
const COURT_PRESENCE_THRESHOLD: usize = 2;

/// Computes structural statistics and threshold flags over one draw.
pub fn analyze(draws: &[Draw]) -> PatternReport {
    let total = draws.len();

    let mut report = PatternReport::default();
    let mut rank_counts: BTreeMap<u32, usize> = BTreeMap::new();

    for draw in draws {
        match draw.card.arcana {
            Arcana::Major => report.major_count += 1,
            Arcana::Minor => {
                report.minor_count += 1;
                match draw.card.suit {
                    Suit::Wands => report.suit_counts.wands += 1,
                    Suit::Cups => report.suit_counts.cups += 1,
                    Suit::Swords => report.suit_counts.swords += 1,
                    Suit::Pentacles => report.suit_counts.pentacles += 1,
                    Suit::Major => {}
                }
            }
        }
        if draw.is_reversed {
            report.reversed_count += 1;
        }
        if draw.card.is_court() {
            report.court_count += 1;
        }
        *rank_counts.entry(draw.card.number).or_default() += 1;
    }

    // Ranks shared by two or more cards, majors and minors alike.
    report.repeated_ranks = rank_counts
        .into_iter()
        .filter(|&(_, count)| count >= 2)
        .map(|(rank, _)| rank)
        .collect();

    report.flags = PatternFlags {
        turning_point: 2 * report.major_count > total,
        obstacles: 2 * report.reversed_count > total,
        emphasis: !report.repeated_ranks.is_empty(),
        court_presence: report.court_count >= COURT_PRESENCE_THRESHOLD,
    };

    report
}
