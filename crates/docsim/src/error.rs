use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DocsimError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Document store error: {0}")]
    Store(#[from] StoreError),

    #[error("Result set error: {0}")]
    Results(#[from] ResultsError),

    #[error("Run error: {0}")]
    Run(#[from] crate::run::RunError),

    #[error("Service error: {0}")]
    Service(#[from] crate::service::ServiceError),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config JSON: {0}")]
    ParseJson(#[from] serde_json::Error),

    #[error("Config validation failed: {message}")]
    Validation { message: String },
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("The document list is locked while a comparison run is in progress")]
    RunInProgress,

    #[error("No document with id '{0}'")]
    UnknownDocument(String),
}

#[derive(Error, Debug)]
pub enum ResultsError {
    #[error("Results are locked while a comparison run is in progress")]
    RunInProgress,

    #[error("Result index {index} is out of range (len {len})")]
    IndexOutOfRange { index: usize, len: usize },
}

pub type Result<T> = std::result::Result<T, DocsimError>;
