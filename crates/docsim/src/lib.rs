pub mod config;
pub mod document;
pub mod error;
pub mod logging;
pub mod results;
pub mod run;
pub mod service;

pub use config::{load_config, load_config_from_str, Config};
pub use document::{Document, DocumentStore, Payload};
pub use error::{ConfigError, DocsimError, Result, ResultsError, StoreError};
pub use results::{ComparisonOutcome, ResultSet};
pub use run::{
    enumerate_pairs, BroadcastProgress, NoopProgress, Pair, ProgressReporter, RunController,
    RunError, RunProgressBroadcaster, RunProgressEvent, RunState, RunStateHandle, RunStatus,
    RunSummary,
};
pub use service::{CompareOutcome, CompareService, HealthStatus, HttpCompareClient, ServiceError};
