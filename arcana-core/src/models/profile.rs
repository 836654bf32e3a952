use serde::{Deserialize, Serialize};

use super::card::{Card, Suit};

/// Querent gender, as far as the court-card rule distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

/// The twelve zodiac signs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Zodiac {
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
    Capricorn,
    Aquarius,
    Pisces,
}

impl Zodiac {
    /// Elemental suit of the sign: fire, water, air, earth.
    pub fn element(self) -> Suit {
        match self {
            Zodiac::Aries | Zodiac::Leo | Zodiac::Sagittarius => Suit::Wands,
            Zodiac::Cancer | Zodiac::Scorpio | Zodiac::Pisces => Suit::Cups,
            Zodiac::Gemini | Zodiac::Libra | Zodiac::Aquarius => Suit::Swords,
            Zodiac::Taurus | Zodiac::Virgo | Zodiac::Capricorn => Suit::Pentacles,
        }
    }
}

/// Broad topic of the querent's question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionDomain {
    Love,
    Career,
    Health,
    Finance,
    PersonalGrowth,
    General,
}

impl QuestionDomain {
    /// Suit associated with the domain's element.
    pub fn suit(self) -> Suit {
        match self {
            QuestionDomain::Love => Suit::Cups,
            QuestionDomain::Career => Suit::Wands,
            QuestionDomain::Health => Suit::Pentacles,
            QuestionDomain::Finance => Suit::Pentacles,
            QuestionDomain::PersonalGrowth => Suit::Swords,
            QuestionDomain::General => Suit::Wands,
        }
    }
}

/// Demographic and psychological attributes feeding significator selection.
///
/// Every field is optional; the selector falls through its priority chain
/// and lands on a fixed default when nothing is set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct QuerentProfile {
    pub age: Option<u8>,
    pub gender: Option<Gender>,
    pub zodiac: Option<Zodiac>,
    /// Explicit suit affinity; minor suits only, `Major` is ignored.
    pub personality: Option<Suit>,
    pub question_domain: Option<QuestionDomain>,
}

/// The selected significator and the human-readable audit reason.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignificatorChoice {
    pub card: Card,
    pub reason: String,
}
