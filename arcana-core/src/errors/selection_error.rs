use thiserror::Error;

/// Structural failures in deck handling, drawing, or significator lookup.
/// Fatal for the single reading that hit them.
#[derive(Debug, Error)]
pub enum SelectionError {
    #[error("deck must hold exactly {expected} cards, got {actual}")]
    IncompleteDeck { expected: usize, actual: usize },

    #[error("deck contains duplicate card id {card_id}")]
    DuplicateCardId { card_id: u32 },

    #[error("card not found: {name}")]
    CardNotFound { name: String },

    #[error("not enough cards to draw: need {needed}, have {available}")]
    DeckTooSmall { needed: usize, available: usize },
}
