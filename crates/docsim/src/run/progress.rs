//! Run progress reporting and streaming.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::broadcast;

/// Events emitted while a run executes.
///
/// Serialisable so a shell can render a progress indicator from the
/// stream without touching engine state.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RunProgressEvent {
    /// A run started with `total` pairs to compare.
    Started {
        total: usize,
        timestamp: DateTime<Utc>,
    },
    /// One pair resolved successfully.
    PairCompared {
        completed: usize,
        total: usize,
        first: String,
        second: String,
        score: f64,
        timestamp: DateTime<Utc>,
    },
    /// Every pair succeeded and the result set was published.
    Completed {
        total: usize,
        timestamp: DateTime<Utc>,
    },
    /// The run aborted on its first service failure.
    Failed {
        completed: usize,
        error: String,
        timestamp: DateTime<Utc>,
    },
}

impl RunProgressEvent {
    pub fn started(total: usize) -> Self {
        Self::Started {
            total,
            timestamp: Utc::now(),
        }
    }

    pub fn pair_compared(
        completed: usize,
        total: usize,
        first: &str,
        second: &str,
        score: f64,
    ) -> Self {
        Self::PairCompared {
            completed,
            total,
            first: first.to_string(),
            second: second.to_string(),
            score,
            timestamp: Utc::now(),
        }
    }

    pub fn completed(total: usize) -> Self {
        Self::Completed {
            total,
            timestamp: Utc::now(),
        }
    }

    pub fn failed(completed: usize, error: impl Into<String>) -> Self {
        Self::Failed {
            completed,
            error: error.into(),
            timestamp: Utc::now(),
        }
    }
}

pub trait ProgressReporter: Send + Sync {
    fn report(&self, event: RunProgressEvent);
}

/// No-op reporter for unit tests.
pub struct NoopProgress;

impl ProgressReporter for NoopProgress {
    fn report(&self, _event: RunProgressEvent) {}
}

/// Broadcasts run progress events for streaming.
#[derive(Clone)]
pub struct RunProgressBroadcaster {
    sender: Arc<broadcast::Sender<RunProgressEvent>>,
}

impl RunProgressBroadcaster {
    /// Creates a broadcaster with the specified channel capacity.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self {
            sender: Arc::new(sender),
        }
    }

    /// Creates a new subscriber for progress events.
    pub fn subscribe(&self) -> broadcast::Receiver<RunProgressEvent> {
        self.sender.subscribe()
    }

    /// Returns a reporter that feeds this broadcaster.
    pub fn reporter(&self) -> BroadcastProgress {
        BroadcastProgress {
            sender: Arc::clone(&self.sender),
        }
    }
}

impl Default for RunProgressBroadcaster {
    fn default() -> Self {
        Self::new(100)
    }
}

/// Bridges run events onto a broadcast channel.
pub struct BroadcastProgress {
    sender: Arc<broadcast::Sender<RunProgressEvent>>,
}

impl ProgressReporter for BroadcastProgress {
    fn report(&self, event: RunProgressEvent) {
        // Ignore errors - no active receivers is fine
        let _ = self.sender.send(event);
    }
}
