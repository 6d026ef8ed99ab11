pub mod error;
pub mod http;

pub use error::ServiceError;
pub use http::HttpCompareClient;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::document::Document;

/// Result of one successful pairwise comparison, as reported by the
/// service.
#[derive(Debug, Clone)]
pub struct CompareOutcome {
    /// Normalized similarity in `[0, 1]`.
    pub score: f64,
    /// Service-supplied human-readable note.
    pub note: Option<String>,
}

/// Health probe result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    pub message: String,
}

impl HealthStatus {
    /// The service only exposes a free-text message; the substring
    /// `"running"` is the marker its healthy responses carry. Kept as a
    /// compatibility shim with the deployed service contract.
    pub fn is_healthy(&self) -> bool {
        self.message.contains("running")
    }
}

/// Boundary to the external comparison service.
///
/// [`HttpCompareClient`] is the production implementation; tests script
/// their own.
#[async_trait]
pub trait CompareService: Send + Sync {
    /// Submits both payloads and returns the similarity outcome.
    async fn compare(
        &self,
        first: &Document,
        second: &Document,
    ) -> Result<CompareOutcome, ServiceError>;

    /// Probes service reachability.
    ///
    /// Only feeds the connectivity indicator; a failure here never blocks
    /// or aborts a run.
    async fn health(&self) -> Result<HealthStatus, ServiceError>;
}
