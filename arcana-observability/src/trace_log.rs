//! Bounded in-memory log of reading traces.
//!
//! One record per completed reading; the oldest records fall off when
//! the ring fills. This is the hook for offline quality analysis:
//! chunk-reuse rate, per-archetype coverage, weak-query detection.

use std::collections::VecDeque;
use std::sync::Mutex;

use arcana_core::constants::TRACE_LOG_CAPACITY;
use arcana_core::models::ReadingTrace;
use tracing::debug;

pub struct TraceLog {
    entries: Mutex<VecDeque<ReadingTrace>>,
    capacity: usize,
}

impl TraceLog {
    pub fn new() -> Self {
        Self::with_capacity(TRACE_LOG_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Mutex::new(VecDeque::with_capacity(capacity)),
            capacity,
        }
    }

    /// Records one reading, evicting the oldest when full.
    pub fn record(&self, trace: ReadingTrace) {
        debug!(
            reading_id = %trace.reading_id,
            queries = trace.queries.len(),
            unique_chunks = trace.unique_chunks,
            duration_ms = trace.duration_ms,
            "reading trace recorded"
        );
        let mut entries = self.entries.lock().expect("trace log lock");
        if entries.len() == self.capacity {
            entries.pop_front();
        }
        entries.push_back(trace);
    }

    /// The most recent `n` traces, newest first.
    pub fn recent(&self, n: usize) -> Vec<ReadingTrace> {
        let entries = self.entries.lock().expect("trace log lock");
        entries.iter().rev().take(n).cloned().collect()
    }

    pub fn count(&self) -> usize {
        self.entries.lock().expect("trace log lock").len()
    }

    pub fn avg_duration_ms(&self) -> f64 {
        let entries = self.entries.lock().expect("trace log lock");
        if entries.is_empty() {
            return 0.0;
        }
        entries.iter().map(|t| t.duration_ms as f64).sum::<f64>() / entries.len() as f64
    }

    /// Duration at the given percentile (0.0 to 1.0), or `None` when the
    /// log is empty.
    pub fn duration_percentile(&self, percentile: f64) -> Option<u64> {
        let entries = self.entries.lock().expect("trace log lock");
        if entries.is_empty() {
            return None;
        }
        let mut durations: Vec<u64> = entries.iter().map(|t| t.duration_ms).collect();
        durations.sort_unstable();
        let rank = (percentile.clamp(0.0, 1.0) * (durations.len() - 1) as f64).round() as usize;
        Some(durations[rank])
    }
}

impl Default for TraceLog {
    fn default() -> Self {
        Self::new()
    }
}
