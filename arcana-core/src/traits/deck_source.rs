use async_trait::async_trait;

use crate::errors::ArcanaResult;
use crate::models::Card;

/// Deck repository seam: supplies the canonical 78-card list.
#[async_trait]
pub trait IDeckSource: Send + Sync {
    /// The full card list with stable ids; the caller validates it into a
    /// [`Deck`](crate::models::Deck).
    async fn list_cards(&self) -> ArcanaResult<Vec<Card>>;
}
