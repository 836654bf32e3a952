//! Bounded concurrent query execution.
//!
//! Every planned query runs as its own task in a `JoinSet`, gated by a
//! semaphore so the fan-out respects external rate limits. A failing
//! query retries once after a backoff and then degrades to zero chunks;
//! siblings never notice. Cancellation is observed between and inside
//! tasks, and a cancelled run merges nothing.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use arcana_core::config::RetrievalConfig;
use arcana_core::errors::{ArcanaError, ArcanaResult, RetrievalError};
use arcana_core::models::{Chunk, Query, QueryTrace, ReadingEvent};
use arcana_embeddings::EmbeddingEngine;
use tokio::sync::{mpsc, watch, Semaphore};
use tokio::task::JoinSet;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::search::BalancedSearcher;

/// What one query task produced.
#[derive(Debug, Clone)]
pub struct QueryOutcome {
    pub query: Query,
    pub chunks: Vec<Chunk>,
    pub latency_ms: u64,
    /// 1 when the first attempt succeeded, 2 when the retry ran.
    pub attempts: u8,
    /// Both attempts failed; the query contributed nothing.
    pub degraded: bool,
}

impl QueryOutcome {
    /// Trace record for the reading artifact.
    pub fn to_trace(&self) -> QueryTrace {
        QueryTrace {
            text: self.query.text.clone(),
            kind: self.query.kind,
            card_id: self.query.card_id,
            position: self.query.position.clone(),
            chunk_ids: self.chunks.iter().map(|c| c.id.clone()).collect(),
            similarities: self.chunks.iter().map(|c| c.similarity).collect(),
            latency_ms: self.latency_ms,
            attempts: self.attempts,
            degraded: self.degraded,
        }
    }
}

pub struct QueryExecutor {
    engine: Arc<EmbeddingEngine>,
    searcher: Arc<BalancedSearcher>,
    config: RetrievalConfig,
}

impl QueryExecutor {
    pub fn new(
        engine: Arc<EmbeddingEngine>,
        searcher: Arc<BalancedSearcher>,
        config: RetrievalConfig,
    ) -> Self {
        Self {
            engine,
            searcher,
            config,
        }
    }

    /// Runs every query concurrently under the configured cap.
    ///
    /// Arrival order of outcomes is unspecified; the merge downstream is
    /// commutative. When `cancel` flips, in-flight tasks stop at their
    /// next suspension point and the whole run returns
    /// [`ArcanaError::Cancelled`] with no partial results.
    pub async fn execute(
        &self,
        reading_id: Uuid,
        queries: Vec<Query>,
        cancel: watch::Receiver<bool>,
        events: Option<mpsc::Sender<ReadingEvent>>,
    ) -> ArcanaResult<Vec<QueryOutcome>> {
        let total = queries.len();
        let semaphore = Arc::new(Semaphore::new(self.config.max_concurrent_queries));
        let completed = Arc::new(AtomicUsize::new(0));
        let mut tasks: JoinSet<Option<QueryOutcome>> = JoinSet::new();

        for query in queries {
            let semaphore = Arc::clone(&semaphore);
            let engine = Arc::clone(&self.engine);
            let searcher = Arc::clone(&self.searcher);
            let cancel = cancel.clone();
            let events = events.clone();
            let completed = Arc::clone(&completed);
            let backoff = Duration::from_millis(self.config.retry_backoff_ms);
            let balance = self.config.balance_sources;

            tasks.spawn(async move {
                // The semaphore is never closed while tasks run.
                let Ok(_permit) = semaphore.acquire_owned().await else {
                    return None;
                };
                if *cancel.borrow() {
                    return None;
                }

                let outcome = tokio::select! {
                    () = wait_cancelled(cancel.clone()) => return None,
                    outcome = run_query(&engine, &searcher, query, backoff, balance) => outcome,
                };

                let done = completed.fetch_add(1, Ordering::SeqCst) + 1;
                if let Some(tx) = &events {
                    let _ = tx
                        .send(ReadingEvent::Partial {
                            reading_id,
                            kind: outcome.query.kind,
                            chunks: outcome.chunks.len(),
                            completed: done,
                            total,
                        })
                        .await;
                }
                Some(outcome)
            });
        }

        let mut outcomes = Vec::with_capacity(total);
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(Some(outcome)) => outcomes.push(outcome),
                Ok(None) => {}
                Err(e) => warn!(error = %e, "query task panicked or was aborted"),
            }
        }

        if *cancel.borrow() {
            return Err(ArcanaError::Cancelled { reading_id });
        }
        Ok(outcomes)
    }
}

/// Resolves when cancellation is signalled; pends forever when the
/// sender is gone (an unobservable cancellation cannot happen).
async fn wait_cancelled(mut cancel: watch::Receiver<bool>) {
    loop {
        if *cancel.borrow() {
            return;
        }
        if cancel.changed().await.is_err() {
            std::future::pending::<()>().await;
        }
    }
}

/// Embed-then-search with one retry. Never returns an error: the second
/// failure degrades to an empty outcome.
async fn run_query(
    engine: &EmbeddingEngine,
    searcher: &BalancedSearcher,
    query: Query,
    backoff: Duration,
    balance_sources: bool,
) -> QueryOutcome {
    let started = Instant::now();

    for attempt in 1..=2u8 {
        match attempt_query(engine, searcher, &query, balance_sources).await {
            Ok(chunks) => {
                debug!(
                    kind = ?query.kind,
                    chunks = chunks.len(),
                    attempt,
                    "query complete"
                );
                return QueryOutcome {
                    query,
                    chunks,
                    latency_ms: started.elapsed().as_millis() as u64,
                    attempts: attempt,
                    degraded: false,
                };
            }
            Err(e) if attempt == 1 => {
                warn!(kind = ?query.kind, error = %e, "query failed, retrying once");
                tokio::time::sleep(backoff).await;
            }
            Err(e) => {
                warn!(kind = ?query.kind, error = %e, "query failed after retry, degrading");
            }
        }
    }

    QueryOutcome {
        query,
        chunks: Vec::new(),
        latency_ms: started.elapsed().as_millis() as u64,
        attempts: 2,
        degraded: true,
    }
}

async fn attempt_query(
    engine: &EmbeddingEngine,
    searcher: &BalancedSearcher,
    query: &Query,
    balance_sources: bool,
) -> Result<Vec<Chunk>, ArcanaError> {
    let embedding = engine.embed(&query.text).await?;
    searcher
        .search(
            &embedding,
            query.kind.top_k(),
            query.kind.min_similarity(),
            balance_sources,
        )
        .await
        .map_err(|e| match e {
            err @ ArcanaError::Retrieval(_) => err,
            other => RetrievalError::SearchFailed {
                reason: other.to_string(),
            }
            .into(),
        })
}
