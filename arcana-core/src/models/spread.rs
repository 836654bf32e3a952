use serde::{Deserialize, Serialize};

/// The supported spread layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpreadType {
    ThreeCard,
    CelticCross,
}

impl SpreadType {
    pub fn position_count(self) -> usize {
        match self {
            SpreadType::ThreeCard => 3,
            SpreadType::CelticCross => 10,
        }
    }

    /// Whether the layout sets a significator aside before the draw.
    pub fn uses_significator(self) -> bool {
        matches!(self, SpreadType::CelticCross)
    }

    /// Wording used inside query templates.
    pub fn label(self) -> &'static str {
        match self {
            SpreadType::ThreeCard => "three card",
            SpreadType::CelticCross => "celtic cross",
        }
    }
}

/// One named slot in a spread layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionTemplate {
    pub name: String,
    pub description: String,
}

/// A spread layout with its ordered position templates.
///
/// Fixed configuration data, never mutated at runtime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spread {
    pub spread_type: SpreadType,
    pub positions: Vec<PositionTemplate>,
}

impl Spread {
    pub fn position_count(&self) -> usize {
        self.positions.len()
    }
}
