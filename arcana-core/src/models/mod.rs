//! Typed records exchanged between pipeline stages.
//!
//! Every stage consumes and produces one of these instead of loose maps,
//! so the invariants (distinct ids, frozen evidence, fixed query kinds)
//! are checkable at compile time.

mod card;
mod chunk;
mod draw;
mod events;
mod evidence;
mod pattern;
mod profile;
mod query;
mod reading;
mod spread;
mod trace;

pub use card::{Arcana, Card, Deck, Suit};
pub use chunk::Chunk;
pub use draw::Draw;
pub use events::{ReadingEvent, ReadingStage};
pub use evidence::{EvidenceBuilder, EvidenceEntry, EvidenceKey, EvidenceSet, Provenance};
pub use pattern::{PatternFlags, PatternReport, SuitCounts};
pub use profile::{Gender, QuerentProfile, QuestionDomain, SignificatorChoice, Zodiac};
pub use query::{Query, QueryKind};
pub use reading::{ReadingOutcome, ReadingRequest};
pub use spread::{PositionTemplate, Spread, SpreadType};
pub use trace::{QueryTrace, ReadingTrace};
