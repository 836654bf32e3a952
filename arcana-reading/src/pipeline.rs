//! The reading pipeline.
//!
//! Stages: validate deck → select significator → shuffle/cut/draw →
//! analyze → plan queries → execute fan-out → merge evidence → trace.
//! The embedding cache is created fresh for each reading and dropped
//! with it. A cancelled reading merges nothing and records no trace;
//! the registry entry is removed on every exit path.

use std::sync::Arc;
use std::time::Instant;

use arcana_core::config::ArcanaConfig;
use arcana_core::errors::{ArcanaResult, SelectionError};
use arcana_core::models::{
    Deck, ReadingEvent, ReadingOutcome, ReadingRequest, ReadingStage, ReadingTrace,
    SignificatorChoice,
};
use arcana_core::traits::{IDeckSource, IEmbeddingProvider, IVectorStore};
use arcana_draw::{analyze, significator, spreads, DrawEngine};
use arcana_embeddings::EmbeddingEngine;
use arcana_observability::TraceLog;
use arcana_retrieval::{merge, plan, BalancedSearcher, QueryExecutor};
use chrono::Utc;
use tokio::sync::{mpsc, watch};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::registry::ReadingRegistry;

pub struct ReadingPipeline {
    deck_source: Arc<dyn IDeckSource>,
    provider: Arc<dyn IEmbeddingProvider>,
    store: Arc<dyn IVectorStore>,
    config: ArcanaConfig,
    registry: Arc<ReadingRegistry>,
    trace_log: Arc<TraceLog>,
}

impl ReadingPipeline {
    pub fn new(
        deck_source: Arc<dyn IDeckSource>,
        provider: Arc<dyn IEmbeddingProvider>,
        store: Arc<dyn IVectorStore>,
        config: ArcanaConfig,
    ) -> Self {
        Self {
            deck_source,
            provider,
            store,
            config,
            registry: Arc::new(ReadingRegistry::new()),
            trace_log: Arc::new(TraceLog::new()),
        }
    }

    /// Cancellation surface for the transport layer.
    pub fn registry(&self) -> Arc<ReadingRegistry> {
        Arc::clone(&self.registry)
    }

    /// Recorded traces for offline quality analysis.
    pub fn trace_log(&self) -> Arc<TraceLog> {
        Arc::clone(&self.trace_log)
    }

    /// Runs one reading without progress reporting.
    pub async fn run(&self, request: ReadingRequest) -> ArcanaResult<ReadingOutcome> {
        self.run_with_events(request, None).await
    }

    /// Runs one reading, reporting stage transitions and per-query
    /// completions over `events` when given. The pipeline only writes
    /// into the channel; it knows nothing about the transport behind it.
    #[instrument(skip_all, fields(spread = ?request.spread_type))]
    pub async fn run_with_events(
        &self,
        request: ReadingRequest,
        events: Option<mpsc::Sender<ReadingEvent>>,
    ) -> ArcanaResult<ReadingOutcome> {
        let reading_id = request.reading_id.unwrap_or_else(Uuid::new_v4);
        let cancel = self.registry.register(reading_id);

        let result = self.run_stages(reading_id, request, cancel, events.as_ref()).await;

        // Every exit path releases the registry entry.
        self.registry.finish(reading_id);

        match &result {
            Ok(outcome) => {
                emit(
                    events.as_ref(),
                    ReadingEvent::Complete {
                        reading_id,
                        unique_chunks: outcome.evidence.len(),
                        duration_ms: outcome.trace.duration_ms,
                    },
                )
                .await;
            }
            Err(e) => {
                emit(
                    events.as_ref(),
                    ReadingEvent::Error {
                        reading_id,
                        message: e.to_string(),
                    },
                )
                .await;
            }
        }
        result
    }

    async fn run_stages(
        &self,
        reading_id: Uuid,
        request: ReadingRequest,
        cancel: watch::Receiver<bool>,
        events: Option<&mpsc::Sender<ReadingEvent>>,
    ) -> ArcanaResult<ReadingOutcome> {
        let started_at = Utc::now();
        let clock = Instant::now();
        progress(events, reading_id, ReadingStage::Started).await;

        // Stage 1: deck.
        let deck = Deck::new(self.deck_source.list_cards().await?)?;

        // Stage 2: significator. An explicit querent choice overrides
        // the demographic chain; spreads without one skip the stage.
        let spread = spreads::spread(request.spread_type);
        let significator = if request.spread_type.uses_significator() {
            let choice = match request.significator_card_id {
                Some(id) => {
                    let card = deck
                        .by_id(id)
                        .ok_or(SelectionError::CardNotFound {
                            name: format!("card id {id}"),
                        })?
                        .clone();
                    SignificatorChoice {
                        card,
                        reason: "chosen by the querent".to_string(),
                    }
                }
                None => significator::select(&deck, &request.profile)?,
            };
            progress(events, reading_id, ReadingStage::SignificatorSelected).await;
            Some(choice)
        } else {
            None
        };

        // Stage 3: shuffle, cut, draw.
        let mut engine = match request.seed {
            Some(seed) => DrawEngine::with_seed(self.config.draw.clone(), seed),
            None => DrawEngine::new(self.config.draw.clone()),
        };
        let shuffled = engine.shuffle_and_cut(
            &deck,
            significator.as_ref().map(|s| &s.card),
            request.spread_type.uses_significator(),
        )?;
        let draws = DrawEngine::draw(&shuffled, &spread)?;
        progress(events, reading_id, ReadingStage::CardsDrawn).await;

        // Stage 4: structural analysis.
        let report = analyze(&draws);
        progress(events, reading_id, ReadingStage::PatternAnalyzed).await;

        // Stage 5: query fan-out.
        let queries = plan(&draws, &spread, &report);
        progress(events, reading_id, ReadingStage::QueriesPlanned).await;

        // Stage 6: retrieval. The embedding engine, and with it the
        // single-flight cache, lives exactly as long as this reading.
        let embedding_engine = Arc::new(EmbeddingEngine::new(Arc::clone(&self.provider)));
        let executor = QueryExecutor::new(
            embedding_engine,
            Arc::new(BalancedSearcher::new(Arc::clone(&self.store))),
            self.config.retrieval.clone(),
        );
        progress(events, reading_id, ReadingStage::Retrieving).await;
        let outcomes = executor
            .execute(reading_id, queries, cancel, events.cloned())
            .await?;

        // Stage 7: merge.
        let evidence = merge(&outcomes);
        progress(events, reading_id, ReadingStage::Merged).await;

        // Stage 8: trace.
        let trace = ReadingTrace {
            reading_id,
            spread_type: request.spread_type,
            started_at,
            duration_ms: clock.elapsed().as_millis() as u64,
            total_chunks: outcomes.iter().map(|o| o.chunks.len()).sum(),
            unique_chunks: evidence.len(),
            queries: outcomes.iter().map(|o| o.to_trace()).collect(),
        };
        self.trace_log.record(trace.clone());

        info!(
            %reading_id,
            draws = draws.len(),
            queries = trace.queries.len(),
            unique_chunks = trace.unique_chunks,
            degraded = trace.degraded_count(),
            "reading complete"
        );

        Ok(ReadingOutcome {
            reading_id,
            spread_type: request.spread_type,
            significator,
            draws,
            report,
            evidence,
            trace,
        })
    }
}

async fn progress(
    events: Option<&mpsc::Sender<ReadingEvent>>,
    reading_id: Uuid,
    stage: ReadingStage,
) {
    emit(events, ReadingEvent::Progress { reading_id, stage }).await;
}

async fn emit(events: Option<&mpsc::Sender<ReadingEvent>>, event: ReadingEvent) {
    if let Some(tx) = events {
        // A consumer that hung up never fails the reading.
        let _ = tx.send(event).await;
    }
}
