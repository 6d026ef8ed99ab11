//! Run controller - drives the pair schedule through the comparison
//! service, one request at a time.

use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use tracing::{debug, info, warn, Instrument};

use crate::document::{Document, DocumentStore};
use crate::results::{ComparisonOutcome, ResultSet};
use crate::service::{CompareService, ServiceError};

use super::error::RunError;
use super::pairs::{self, Pair};
use super::progress::{ProgressReporter, RunProgressEvent};
use super::state::RunStateHandle;

/// Summary of a completed run.
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Pairs compared; equals the pair count of the frozen snapshot.
    pub total: usize,
    pub duration_ms: u64,
}

/// Drives one comparison run at a time over the document store.
///
/// The controller is the only component that transitions the shared run
/// state; the store and the result set merely consult it for their
/// mutation guards. Dispatch is strictly sequential: the next pair is not
/// sent until the previous call resolved, so the service never sees more
/// than one in-flight request from this engine.
pub struct RunController {
    store: Arc<DocumentStore>,
    results: Arc<ResultSet>,
    service: Arc<dyn CompareService>,
    state: RunStateHandle,
}

impl RunController {
    pub fn new(
        store: Arc<DocumentStore>,
        results: Arc<ResultSet>,
        service: Arc<dyn CompareService>,
        state: RunStateHandle,
    ) -> Self {
        Self {
            store,
            results,
            service,
            state,
        }
    }

    pub fn store(&self) -> &Arc<DocumentStore> {
        &self.store
    }

    pub fn results(&self) -> &Arc<ResultSet> {
        &self.results
    }

    /// Shared run state handle, for shells rendering progress.
    pub fn state(&self) -> &RunStateHandle {
        &self.state
    }

    /// Compares every pair of the current document snapshot.
    ///
    /// The pair schedule is frozen at start; later store edits do not
    /// affect an in-flight run. On the first service failure the run
    /// aborts and the visible result set keeps its previous contents.
    /// Only a run in which every pair succeeds replaces the result set.
    ///
    /// There is no way to cancel a run once started; it ends when every
    /// pair resolved or on the first failure.
    pub async fn start_run(
        &self,
        progress: &dyn ProgressReporter,
    ) -> Result<RunSummary, RunError> {
        let documents = self.store.list();

        if documents.len() < 2 {
            return Err(RunError::InsufficientDocuments {
                count: documents.len(),
            });
        }

        // Hard precondition: a run never reads a document whose content is
        // still loading.
        if let Some(doc) = documents.iter().find(|doc| !doc.payload.is_ready()) {
            return Err(RunError::PayloadNotReady {
                name: doc.name.clone(),
            });
        }

        let schedule = pairs::enumerate_pairs(&documents);
        let total = schedule.len();

        self.state.begin(total)?;

        let started = Instant::now();
        info!(total_pairs = total, "Starting comparison run");
        progress.report(RunProgressEvent::started(total));

        let outcome = self
            .execute(&documents, &schedule, progress)
            .instrument(tracing::info_span!("comparison_run", total_pairs = total))
            .await;

        match outcome {
            Ok(staged) => {
                self.results.install(staged);
                self.state.complete();
                let duration_ms = started.elapsed().as_millis() as u64;
                info!(total_pairs = total, duration_ms, "Comparison run completed");
                progress.report(RunProgressEvent::completed(total));
                Ok(RunSummary { total, duration_ms })
            }
            Err(err) => {
                let completed = self.state.snapshot().completed;
                self.state.fail(err.to_string());
                warn!(
                    "Comparison run failed after {} of {} pairs: {}",
                    completed, total, err
                );
                progress.report(RunProgressEvent::failed(completed, err.to_string()));
                Err(RunError::Service(err))
            }
        }
    }

    /// Sequentially dispatches the frozen schedule, staging outcomes in a
    /// run-local accumulator. The accumulator only becomes visible when
    /// every pair succeeded.
    async fn execute(
        &self,
        documents: &[Document],
        schedule: &[Pair],
        progress: &dyn ProgressReporter,
    ) -> Result<Vec<ComparisonOutcome>, ServiceError> {
        let mut staged = Vec::with_capacity(schedule.len());

        for pair in schedule {
            let first = &documents[pair.first];
            let second = &documents[pair.second];

            debug!("Comparing '{}' against '{}'", first.name, second.name);

            let outcome = self.service.compare(first, second).await?;

            self.state.record_success();
            let completed = self.state.snapshot().completed;

            progress.report(RunProgressEvent::pair_compared(
                completed,
                schedule.len(),
                &first.name,
                &second.name,
                outcome.score,
            ));

            staged.push(ComparisonOutcome {
                first: first.name.clone(),
                second: second.name.clone(),
                score: outcome.score,
                note: outcome.note,
                compared_at: Utc::now(),
            });
        }

        Ok(staged)
    }
}
