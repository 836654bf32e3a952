use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::chunk::Chunk;
use super::query::{Query, QueryKind};

/// One (query, similarity) observation of a chunk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Provenance {
    pub query_text: String,
    pub kind: QueryKind,
    pub card_id: Option<u32>,
    pub position: Option<String>,
    pub similarity: f32,
}

/// A deduplicated chunk together with every query that retrieved it.
///
/// Per-query similarities live only in the provenance records, so the
/// entry body is independent of merge order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvidenceEntry {
    pub id: String,
    pub source: String,
    pub text: String,
    pub provenance: Vec<Provenance>,
}

impl EvidenceEntry {
    /// Highest similarity any query observed for this chunk.
    pub fn best_similarity(&self) -> f32 {
        self.provenance.iter().map(|p| p.similarity).fold(0.0, f32::max)
    }
}

/// Grouping key handed to the generation consumer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EvidenceKey {
    Card(u32),
    Spread,
}

/// Frozen, provenance-tracked evidence for one reading.
///
/// Never holds two entries with the same chunk id. Built through
/// [`EvidenceBuilder`]; there are no mutating accessors after `freeze`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EvidenceSet {
    entries: BTreeMap<String, EvidenceEntry>,
}

impl EvidenceSet {
    pub fn get(&self, chunk_id: &str) -> Option<&EvidenceEntry> {
        self.entries.get(chunk_id)
    }

    pub fn entries(&self) -> impl Iterator<Item = &EvidenceEntry> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries grouped by the card (or spread concern) whose queries
    /// retrieved them; a shared chunk appears under every originator.
    pub fn grouped_by_concern(&self) -> BTreeMap<EvidenceKey, Vec<&EvidenceEntry>> {
        let mut groups: BTreeMap<EvidenceKey, Vec<&EvidenceEntry>> = BTreeMap::new();
        for entry in self.entries.values() {
            let mut keys: Vec<EvidenceKey> = entry
                .provenance
                .iter()
                .map(|p| p.card_id.map_or(EvidenceKey::Spread, EvidenceKey::Card))
                .collect();
            keys.sort_unstable();
            keys.dedup();
            for key in keys {
                groups.entry(key).or_default().push(entry);
            }
        }
        groups
    }
}

/// Append-only assembler for an [`EvidenceSet`].
#[derive(Debug, Default)]
pub struct EvidenceBuilder {
    entries: BTreeMap<String, EvidenceEntry>,
}

impl EvidenceBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one retrieved chunk for `query`. The first sighting of an
    /// id stores the chunk body; later sightings only extend provenance.
    pub fn observe(&mut self, query: &Query, chunk: &Chunk) {
        let entry = self
            .entries
            .entry(chunk.id.clone())
            .or_insert_with(|| EvidenceEntry {
                id: chunk.id.clone(),
                source: chunk.source.clone(),
                text: chunk.text.clone(),
                provenance: Vec::new(),
            });
        // Same id must mean same body; anything else is a backend bug.
        debug_assert_eq!(entry.source, chunk.source, "chunk {} changed source", chunk.id);
        entry.provenance.push(Provenance {
            query_text: query.text.clone(),
            kind: query.kind,
            card_id: query.card_id,
            position: query.position.clone(),
            similarity: chunk.similarity,
        });
    }

    /// Freezes the set. Provenance is canonically ordered and exact
    /// duplicates collapse, so equal input multisets compare equal no
    /// matter the observation order.
    pub fn freeze(mut self) -> EvidenceSet {
        for entry in self.entries.values_mut() {
            entry.provenance.sort_by(|a, b| {
                b.similarity
                    .partial_cmp(&a.similarity)
                    .unwrap_or(std::cmp::Ordering::Equal)
                    .then_with(|| a.query_text.cmp(&b.query_text))
                    .then_with(|| a.kind.cmp(&b.kind))
            });
            entry.provenance.dedup_by(|a, b| {
                a.query_text == b.query_text && a.kind == b.kind && a.similarity == b.similarity
            });
        }
        EvidenceSet { entries: self.entries }
    }
}
