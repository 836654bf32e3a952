//! Query fan-out planning.
//!
//! Pure expansion of a draw into retrieval queries: six archetypes per
//! card (reversed-meaning only for reversed cards), four fixed
//! spread-level queries, and up to three flag-gated extras. The bound is
//! `cards * 6 + 7` no matter the spread size.

use arcana_core::models::{Draw, PatternReport, Query, QueryKind, Spread};
use tracing::debug;

/// Plans every retrieval query for one reading.
pub fn plan(draws: &[Draw], spread: &Spread, report: &PatternReport) -> Vec<Query> {
    let mut queries = Vec::with_capacity(draws.len() * 6 + 7);

    for draw in draws {
        queries.extend(card_queries(draw));
    }
    queries.extend(spread_queries(spread));
    queries.extend(conditional_queries(draws, report));

    debug!(
        total = queries.len(),
        cards = draws.len(),
        "query fan-out planned"
    );
    queries
}

fn card_queries(draw: &Draw) -> Vec<Query> {
    let name = &draw.card.name_en;
    let position = &draw.position_name;
    let suit_keywords = draw.card.suit.element_keywords();

    let mut texts = vec![
        (
            QueryKind::Basic,
            format!("{name} tarot card basic meaning divinatory meaning symbolism archetype"),
        ),
        (
            QueryKind::Visual,
            format!("{name} tarot card description image visual appearance"),
        ),
        (
            QueryKind::Upright,
            format!("{name} tarot card upright meaning divinatory upright"),
        ),
    ];
    if draw.is_reversed {
        texts.push((
            QueryKind::Reversed,
            format!("{name} tarot card reversed meaning divinatory reversed"),
        ));
    }
    texts.push((
        QueryKind::PositionMeaning,
        format!("{name} tarot card {position} position meaning psychological interpretation"),
    ));
    texts.push((
        QueryKind::SuitPsychology,
        format!("{name} tarot card {suit_keywords} suit meaning psychological meaning"),
    ));

    texts
        .into_iter()
        .map(|(kind, text)| Query {
            text,
            kind,
            card_id: Some(draw.card.id),
            position: Some(position.clone()),
        })
        .collect()
}

fn spread_queries(spread: &Spread) -> Vec<Query> {
    let label = spread.spread_type.label();
    [
        (
            QueryKind::MethodSteps,
            format!("{label} spread tarot divination method how to use steps"),
        ),
        (
            QueryKind::PositionGuidance,
            format!("{label} spread tarot card positions meaning interpretation"),
        ),
        (
            QueryKind::PsychologicalBackground,
            format!("{label} spread tarot psychological approach interpretation"),
        ),
        (
            QueryKind::TraditionalMethod,
            format!("{label} spread tarot traditional divination method ancient celtic"),
        ),
    ]
    .into_iter()
    .map(|(kind, text)| Query {
        text,
        kind,
        card_id: None,
        position: None,
    })
    .collect()
}

fn conditional_queries(draws: &[Draw], report: &PatternReport) -> Vec<Query> {
    let mut queries = Vec::new();
    let card_names = || -> String {
        draws
            .iter()
            .map(|d| d.card.name_en.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    };

    if report.flags.emphasis {
        queries.push(Query {
            text: format!(
                "tarot card number patterns same numbers sequences in spread {}",
                card_names()
            ),
            kind: QueryKind::NumberPattern,
            card_id: None,
            position: None,
        });
    }
    if report.flags.turning_point || report.flags.obstacles {
        queries.push(Query {
            text: format!(
                "tarot card spread interpretation relationships between cards {}",
                card_names()
            ),
            kind: QueryKind::CardRelationship,
            card_id: None,
            position: None,
        });
    }
    if report.flags.court_presence {
        let courts = draws
            .iter()
            .filter(|d| d.card.is_court())
            .map(|d| d.card.name_en.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        queries.push(Query {
            text: format!("tarot court cards combination meaning {courts} in spread"),
            kind: QueryKind::CourtCards,
            card_id: None,
            position: None,
        });
    }
    queries
}

#[cfg(test)]
mod tests {
    use super::*;
    use arcana_core::models::PatternFlags;
    use helpers::*;
    use std::collections::HashSet;

    // Local draw construction; the draw crate is not a dependency here.
    mod helpers {
        use arcana_core::models::{Arcana, Card, Draw, PositionTemplate, Spread, SpreadType, Suit};

        pub fn card(id: u32, name: &str, number: u32, suit: Suit, arcana: Arcana) -> Card {
            Card {
                id,
                name_en: name.to_string(),
                name_cn: String::new(),
                number,
                suit,
                arcana,
            }
        }

        pub fn draw(card: Card, index: usize, position: &str, reversed: bool) -> Draw {
            Draw {
                card,
                position_index: index,
                position_name: position.to_string(),
                is_reversed: reversed,
            }
        }

        pub fn three_card_spread() -> Spread {
            Spread {
                spread_type: SpreadType::ThreeCard,
                positions: ["past", "present", "future"]
                    .into_iter()
                    .map(|name| PositionTemplate {
                        name: name.to_string(),
                        description: String::new(),
                    })
                    .collect(),
            }
        }
    }

    use arcana_core::models::{Arcana, Suit};

    fn sample_draws() -> Vec<Draw> {
        vec![
            draw(card(1, "The Magician", 1, Suit::Major, Arcana::Major), 0, "past", false),
            draw(card(40, "Five of Cups", 5, Suit::Cups, Arcana::Minor), 1, "present", true),
            draw(card(35, "King of Wands", 14, Suit::Wands, Arcana::Minor), 2, "future", false),
        ]
    }

    #[test]
    fn upright_cards_skip_the_reversed_query() {
        let draws = sample_draws();
        let queries = plan(&draws, &three_card_spread(), &PatternReport::default());

        // 3 cards * 6 archetypes - 2 upright cards skipping Reversed + 4 spread.
        let card_level = queries.iter().filter(|q| q.kind.is_card_level()).count();
        assert_eq!(card_level, 16);
        let reversed: Vec<_> = queries
            .iter()
            .filter(|q| q.kind == QueryKind::Reversed)
            .collect();
        assert_eq!(reversed.len(), 1);
        assert_eq!(reversed[0].card_id, Some(40));
    }

    #[test]
    fn four_spread_queries_are_always_present() {
        let queries = plan(&sample_draws(), &three_card_spread(), &PatternReport::default());
        for kind in [
            QueryKind::MethodSteps,
            QueryKind::PositionGuidance,
            QueryKind::PsychologicalBackground,
            QueryKind::TraditionalMethod,
        ] {
            let found: Vec<_> = queries.iter().filter(|q| q.kind == kind).collect();
            assert_eq!(found.len(), 1, "missing {kind:?}");
            assert!(found[0].text.contains("three card"));
            assert_eq!(found[0].card_id, None);
        }
    }

    #[test]
    fn flags_gate_the_conditional_queries() {
        let draws = sample_draws();
        let none = plan(&draws, &three_card_spread(), &PatternReport::default());
        assert!(none.iter().all(|q| {
            !matches!(
                q.kind,
                QueryKind::NumberPattern | QueryKind::CardRelationship | QueryKind::CourtCards
            )
        }));

        let mut report = PatternReport::default();
        report.flags = PatternFlags {
            turning_point: true,
            obstacles: false,
            emphasis: true,
            court_presence: true,
        };
        let all = plan(&draws, &three_card_spread(), &report);
        let kinds: HashSet<QueryKind> = all.iter().map(|q| q.kind).collect();
        assert!(kinds.contains(&QueryKind::NumberPattern));
        assert!(kinds.contains(&QueryKind::CardRelationship));
        assert!(kinds.contains(&QueryKind::CourtCards));

        let court = all.iter().find(|q| q.kind == QueryKind::CourtCards).unwrap();
        assert!(court.text.contains("King of Wands"));
        assert!(!court.text.contains("The Magician"));
    }

    #[test]
    fn query_count_stays_bounded() {
        let draws = sample_draws();
        let mut report = PatternReport::default();
        report.flags = PatternFlags {
            turning_point: true,
            obstacles: true,
            emphasis: true,
            court_presence: true,
        };
        let queries = plan(&draws, &three_card_spread(), &report);
        assert!(queries.len() <= draws.len() * 6 + 7);
    }

    #[test]
    fn no_verbatim_duplicate_text() {
        let queries = plan(&sample_draws(), &three_card_spread(), &PatternReport::default());
        let texts: HashSet<&str> = queries.iter().map(|q| q.text.as_str()).collect();
        assert_eq!(texts.len(), queries.len());
    }

    #[test]
    fn card_queries_carry_their_position() {
        let queries = plan(&sample_draws(), &three_card_spread(), &PatternReport::default());
        for q in queries.iter().filter(|q| q.kind.is_card_level()) {
            assert!(q.card_id.is_some());
            assert!(q.position.is_some());
        }
        let position_meaning = queries
            .iter()
            .find(|q| q.kind == QueryKind::PositionMeaning && q.card_id == Some(1))
            .unwrap();
        assert!(position_meaning.text.contains("past position"));
    }
}
