use thiserror::Error;

use crate::service::ServiceError;

#[derive(Error, Debug)]
pub enum RunError {
    /// A comparison run needs at least two documents.
    #[error("At least two documents are required to start a run (have {count})")]
    InsufficientDocuments { count: usize },

    /// A document's content had not finished loading when the run started.
    #[error("Document '{name}' has not finished loading")]
    PayloadNotReady { name: String },

    #[error("A comparison run is already in progress")]
    AlreadyRunning,

    /// The comparison service failed a pair; the run aborted.
    #[error("Comparison aborted: {0}")]
    Service(#[from] ServiceError),
}
