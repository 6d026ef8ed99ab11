//! Shared test support: a scripted comparison service and engine wiring.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use docsim::{
    CompareOutcome, CompareService, Document, DocumentStore, HealthStatus, ResultSet,
    RunController, RunStateHandle, ServiceError,
};

/// Scripted stand-in for the external comparison service.
///
/// Pops one scripted reply per `compare` call, in order, and records the
/// document names it was called with.
pub struct ScriptedService {
    replies: Mutex<VecDeque<Result<CompareOutcome, ServiceError>>>,
    health_reply: Mutex<Option<Result<HealthStatus, ServiceError>>>,
    pub calls: Mutex<Vec<(String, String)>>,
}

impl ScriptedService {
    pub fn new(replies: Vec<Result<CompareOutcome, ServiceError>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            health_reply: Mutex::new(None),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Builds a service that succeeds with the given scores, in order.
    pub fn with_scores(scores: &[f64]) -> Self {
        Self::new(
            scores
                .iter()
                .map(|&score| {
                    Ok(CompareOutcome {
                        score,
                        note: Some("Comparison complete".to_string()),
                    })
                })
                .collect(),
        )
    }

    pub fn with_health(self, reply: Result<HealthStatus, ServiceError>) -> Self {
        *self.health_reply.lock().unwrap() = Some(reply);
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl CompareService for ScriptedService {
    async fn compare(
        &self,
        first: &Document,
        second: &Document,
    ) -> Result<CompareOutcome, ServiceError> {
        self.calls
            .lock()
            .unwrap()
            .push((first.name.clone(), second.name.clone()));
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .expect("scripted service ran out of replies")
    }

    async fn health(&self) -> Result<HealthStatus, ServiceError> {
        self.health_reply
            .lock()
            .unwrap()
            .take()
            .unwrap_or_else(|| {
                Ok(HealthStatus {
                    message: "API is running".to_string(),
                })
            })
    }
}

/// Fully wired engine around a scripted service.
pub struct Harness {
    pub store: Arc<DocumentStore>,
    pub results: Arc<ResultSet>,
    pub state: RunStateHandle,
    pub service: Arc<ScriptedService>,
    pub controller: RunController,
}

impl Harness {
    pub fn new(service: ScriptedService) -> Self {
        let state = RunStateHandle::new();
        let store = Arc::new(DocumentStore::new(state.clone()));
        let results = Arc::new(ResultSet::new(state.clone()));
        let service = Arc::new(service);

        let controller = RunController::new(
            Arc::clone(&store),
            Arc::clone(&results),
            Arc::clone(&service) as Arc<dyn CompareService>,
            state.clone(),
        );

        Self {
            store,
            results,
            state,
            service,
            controller,
        }
    }

    /// Wires the engine and uploads one ready document per name.
    pub fn with_documents(service: ScriptedService, names: &[&str]) -> Self {
        let harness = Self::new(service);
        harness.store.add(
            names
                .iter()
                .map(|name| Document::new(*name, format!("content of {}", name).into_bytes()))
                .collect(),
        );
        harness
    }
}
