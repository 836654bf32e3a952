//! Shuffle, cut, and draw.
//!
//! Reversal is rolled exactly once per card at shuffle time and carried
//! on the shuffled card from then on; drawing never re-rolls it. The cut
//! is a single cyclic rotation after the shuffle, so it can never change
//! which cards are in the pool.

use arcana_core::config::DrawConfig;
use arcana_core::errors::SelectionError;
use arcana_core::models::{Card, Deck, Draw, Spread};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::debug;

/// A card in the shuffled pool with its fixed reversal state.
#[derive(Debug, Clone, PartialEq)]
pub struct ShuffledCard {
    pub card: Card,
    pub is_reversed: bool,
}

/// The card selection engine. Owns the rng so a seeded instance replays
/// the same shuffle.
pub struct DrawEngine {
    rng: StdRng,
    config: DrawConfig,
}

impl DrawEngine {
    /// Entropy-seeded engine for production readings.
    pub fn new(config: DrawConfig) -> Self {
        Self {
            rng: StdRng::from_entropy(),
            config,
        }
    }

    /// Fixed-seed engine for reproducible draws.
    pub fn with_seed(config: DrawConfig, seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            config,
        }
    }

    /// Shuffles the deck, rolls each card's reversal, and cuts once.
    ///
    /// When `exclude_significator` is set the significator's id leaves
    /// the pool before the shuffle (78 → 77). An excluded id that is not
    /// in the deck is a [`SelectionError::CardNotFound`].
    pub fn shuffle_and_cut(
        &mut self,
        deck: &Deck,
        significator: Option<&Card>,
        exclude_significator: bool,
    ) -> Result<Vec<ShuffledCard>, SelectionError> {
        let mut pool: Vec<Card> = match (exclude_significator, significator) {
            (true, Some(sig)) => {
                let remaining: Vec<Card> = deck
                    .cards()
                    .iter()
                    .filter(|c| c.id != sig.id)
                    .cloned()
                    .collect();
                if remaining.len() == deck.len() {
                    return Err(SelectionError::CardNotFound {
                        name: sig.name_en.clone(),
                    });
                }
                remaining
            }
            _ => deck.cards().to_vec(),
        };

        pool.shuffle(&mut self.rng);

        // Reversal is decided here, once, and never touched again.
        let mut shuffled: Vec<ShuffledCard> = pool
            .into_iter()
            .map(|card| ShuffledCard {
                is_reversed: self.rng.gen_bool(self.config.reversal_probability),
                card,
            })
            .collect();

        // The cut mirrors a physical cut: a pure rotation somewhere in
        // the middle half of the pile, membership untouched.
        let len = shuffled.len();
        if len > 1 {
            let offset = self.rng.gen_range(len / 4..=3 * len / 4) % len;
            shuffled.rotate_left(offset);
        }

        debug!(
            pool = shuffled.len(),
            excluded = exclude_significator && significator.is_some(),
            "deck shuffled and cut"
        );

        Ok(shuffled)
    }

    /// Takes the first N cards of the shuffled pool and binds them to the
    /// spread's positions in order.
    pub fn draw(shuffled: &[ShuffledCard], spread: &Spread) -> Result<Vec<Draw>, SelectionError> {
        let needed = spread.position_count();
        if shuffled.len() < needed {
            return Err(SelectionError::DeckTooSmall {
                needed,
                available: shuffled.len(),
            });
        }

        Ok(shuffled[..needed]
            .iter()
            .zip(spread.positions.iter())
            .enumerate()
            .map(|(i, (sc, template))| Draw {
                card: sc.card.clone(),
                position_index: i,
                position_name: template.name.clone(),
                is_reversed: sc.is_reversed,
            })
            .collect())
    }
}
