use serde::{Deserialize, Serialize};

use super::card::Card;

/// A card bound to a spread position with its reversal state.
///
/// Created by the selection engine and immutable afterwards; the reversal
/// was rolled at shuffle time and is never re-rolled. The embedded card is
/// a copy of the deck record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Draw {
    pub card: Card,
    pub position_index: usize,
    pub position_name: String,
    pub is_reversed: bool,
}

impl Draw {
    pub fn card_id(&self) -> u32 {
        self.card.id
    }
}
