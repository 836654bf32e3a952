use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::constants::{DECK_SIZE, RANK_KING, RANK_PAGE};
use crate::errors::SelectionError;

/// The four minor suits plus the major-arcana pseudo-suit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Suit {
    Wands,
    Cups,
    Swords,
    Pentacles,
    Major,
}

impl Suit {
    /// Retrieval vocabulary for the suit's element.
    pub fn element_keywords(self) -> &'static str {
        match self {
            Suit::Wands => "fire element action",
            Suit::Cups => "water element emotion",
            Suit::Swords => "air element thought",
            Suit::Pentacles => "earth element material",
            Suit::Major => "major arcana archetype spirit",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Suit::Wands => "Wands",
            Suit::Cups => "Cups",
            Suit::Swords => "Swords",
            Suit::Pentacles => "Pentacles",
            Suit::Major => "Major",
        }
    }

    pub fn is_minor(self) -> bool {
        !matches!(self, Suit::Major)
    }
}

/// The two card categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Arcana {
    Major,
    Minor,
}

/// One card of the 78-card deck.
///
/// Owned by the deck repository; the engine never mutates it. `number` is
/// 0-21 for majors and 1-14 within each minor suit, where 11-14 are the
/// court ranks (Page, Knight, Queen, King).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub id: u32,
    pub name_en: String,
    pub name_cn: String,
    pub number: u32,
    pub suit: Suit,
    pub arcana: Arcana,
}

impl Card {
    pub fn is_court(&self) -> bool {
        self.arcana == Arcana::Minor && (RANK_PAGE..=RANK_KING).contains(&self.number)
    }
}

/// A validated deck: exactly 78 cards, ids pairwise distinct.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    pub fn new(cards: Vec<Card>) -> Result<Self, SelectionError> {
        if cards.len() != DECK_SIZE {
            return Err(SelectionError::IncompleteDeck {
                expected: DECK_SIZE,
                actual: cards.len(),
            });
        }
        let mut seen = HashSet::with_capacity(cards.len());
        for card in &cards {
            if !seen.insert(card.id) {
                return Err(SelectionError::DuplicateCardId { card_id: card.id });
            }
        }
        Ok(Self { cards })
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn by_id(&self, id: u32) -> Option<&Card> {
        self.cards.iter().find(|c| c.id == id)
    }

    /// Finds a card by suit and rank number (minor courts mainly).
    pub fn by_suit_and_number(&self, suit: Suit, number: u32) -> Option<&Card> {
        self.cards.iter().find(|c| c.suit == suit && c.number == number)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}
