//! Deterministic significator selection from the querent profile.
//!
//! No randomness anywhere in this module: the same profile against the
//! same deck always yields the same card. Court rank comes from the
//! age/gender rule of the Pictorial Key; the suit falls through
//! personality → zodiac element → question domain → Wands. When the
//! resolved card is missing from the deck the selector retries with the
//! King of Wands before giving up.

use arcana_core::constants::{RANK_KING, RANK_KNIGHT, RANK_PAGE, RANK_QUEEN};
use arcana_core::errors::SelectionError;
use arcana_core::models::{Deck, Gender, QuerentProfile, SignificatorChoice, Suit};
use tracing::debug;

/// Age at which the court rank flips for male and female querents.
const COURT_AGE_THRESHOLD: u8 = 40;

/// Selects the significator for `profile`, with a human-readable audit
/// reason naming each rule that decided.
pub fn select(deck: &Deck, profile: &QuerentProfile) -> Result<SignificatorChoice, SelectionError> {
    let (rank, rank_reason) = resolve_rank(profile);
    let (suit, suit_reason) = resolve_suit(profile);

    let card = match deck.by_suit_and_number(suit, rank) {
        Some(card) => card.clone(),
        None => deck
            .by_suit_and_number(Suit::Wands, RANK_KING)
            .cloned()
            .ok_or_else(|| SelectionError::CardNotFound {
                name: format!("{} of {}", rank_label(rank), suit.label()),
            })?,
    };

    let reason = format!("{rank_reason}; {suit_reason}");
    debug!(card = %card.name_en, %reason, "significator selected");

    Ok(SignificatorChoice { card, reason })
}

/// Court rank from age and gender. Gender other than male/female, or a
/// missing age on the male/female branches, lands on the neutral King.
fn resolve_rank(profile: &QuerentProfile) -> (u32, String) {
    match (profile.gender, profile.age) {
        (Some(Gender::Male), Some(age)) if age >= COURT_AGE_THRESHOLD => {
            (RANK_KNIGHT, format!("Knight for a man of {age}"))
        }
        (Some(Gender::Male), _) => (RANK_KING, "King for a younger man".to_string()),
        (Some(Gender::Female), Some(age)) if age >= COURT_AGE_THRESHOLD => {
            (RANK_QUEEN, format!("Queen for a woman of {age}"))
        }
        (Some(Gender::Female), _) => (RANK_PAGE, "Page for a younger woman".to_string()),
        _ => (RANK_KING, "King by default, no age/gender given".to_string()),
    }
}

/// Suit priority chain, first match wins.
fn resolve_suit(profile: &QuerentProfile) -> (Suit, String) {
    if let Some(suit) = profile.personality.filter(|s| s.is_minor()) {
        return (suit, format!("{} from the stated personality", suit.label()));
    }
    if let Some(zodiac) = profile.zodiac {
        let suit = zodiac.element();
        return (suit, format!("{} from the {zodiac:?} element", suit.label()));
    }
    if let Some(domain) = profile.question_domain {
        let suit = domain.suit();
        return (suit, format!("{} from the {domain:?} question", suit.label()));
    }
    (Suit::Wands, "Wands by default, no suit signal given".to_string())
}

fn rank_label(rank: u32) -> &'static str {
    match rank {
        RANK_PAGE => "Page",
        RANK_KNIGHT => "Knight",
        RANK_QUEEN => "Queen",
        RANK_KING => "King",
        _ => "card",
    }
}
