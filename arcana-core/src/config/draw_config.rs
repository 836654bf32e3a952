use serde::{Deserialize, Serialize};

use crate::constants;

/// Shuffle and draw configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DrawConfig {
    /// Probability a card lands reversed, rolled once at shuffle time.
    pub reversal_probability: f64,
}

impl Default for DrawConfig {
    fn default() -> Self {
        Self {
            reversal_probability: constants::DEFAULT_REVERSAL_PROBABILITY,
        }
    }
}
