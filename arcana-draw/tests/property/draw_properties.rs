use std::collections::HashSet;

use arcana_core::config::DrawConfig;
use arcana_core::models::{Draw, SpreadType};
use arcana_draw::{analyze, spreads, DrawEngine};
use proptest::prelude::*;
use test_fixtures::fixture_deck;

proptest! {
    #[test]
    fn shuffle_is_a_permutation(seed in any::<u64>()) {
        let deck = fixture_deck();
        let mut engine = DrawEngine::with_seed(DrawConfig::default(), seed);
        let shuffled = engine.shuffle_and_cut(&deck, None, false).unwrap();

        prop_assert_eq!(shuffled.len(), 78);
        let ids: HashSet<u32> = shuffled.iter().map(|s| s.card.id).collect();
        prop_assert_eq!(ids.len(), 78);
    }

    #[test]
    fn excluded_significator_never_appears(seed in any::<u64>(), sig_id in 0u32..78) {
        let deck = fixture_deck();
        let sig = deck.by_id(sig_id).unwrap().clone();
        let mut engine = DrawEngine::with_seed(DrawConfig::default(), seed);
        let shuffled = engine.shuffle_and_cut(&deck, Some(&sig), true).unwrap();

        prop_assert_eq!(shuffled.len(), 77);
        prop_assert!(shuffled.iter().all(|s| s.card.id != sig_id));

        let spread = spreads::spread(SpreadType::CelticCross);
        let draws = DrawEngine::draw(&shuffled, &spread).unwrap();
        let drawn: HashSet<u32> = draws.iter().map(Draw::card_id).collect();
        prop_assert_eq!(drawn.len(), 10);
        prop_assert!(!drawn.contains(&sig_id));
    }

    #[test]
    fn draw_binds_positions_in_order(seed in any::<u64>()) {
        let deck = fixture_deck();
        let mut engine = DrawEngine::with_seed(DrawConfig::default(), seed);
        let shuffled = engine.shuffle_and_cut(&deck, None, false).unwrap();
        let spread = spreads::spread(SpreadType::ThreeCard);
        let draws = DrawEngine::draw(&shuffled, &spread).unwrap();

        for (i, draw) in draws.iter().enumerate() {
            prop_assert_eq!(draw.position_index, i);
            prop_assert_eq!(&draw.position_name, &spread.positions[i].name);
            // Drawing reads the shuffled pool verbatim, reversal included.
            prop_assert_eq!(draw.is_reversed, shuffled[i].is_reversed);
            prop_assert_eq!(draw.card_id(), shuffled[i].card.id);
        }
    }

    #[test]
    fn analyzer_counts_are_consistent(seed in any::<u64>()) {
        let deck = fixture_deck();
        let mut engine = DrawEngine::with_seed(DrawConfig::default(), seed);
        let shuffled = engine.shuffle_and_cut(&deck, None, false).unwrap();
        let spread = spreads::spread(SpreadType::CelticCross);
        let draws = DrawEngine::draw(&shuffled, &spread).unwrap();

        let report = analyze(&draws);
        prop_assert_eq!(report.major_count + report.minor_count, 10);
        let suit_total = report.suit_counts.wands
            + report.suit_counts.cups
            + report.suit_counts.swords
            + report.suit_counts.pentacles;
        prop_assert_eq!(suit_total, report.minor_count);
        prop_assert!(report.reversed_count <= 10);
        prop_assert!(report.court_count <= report.minor_count);
        // Purity: a second pass sees the same report.
        prop_assert_eq!(analyze(&draws), report);
    }
}
