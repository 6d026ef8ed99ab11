//! Run lifecycle state machine.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::Serialize;

use super::error::RunError;

/// Lifecycle of a comparison run.
///
/// `Idle → Running → {Completed, Failed}`. A new run may start from any
/// state except `Running`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    Idle,
    Running,
    Completed,
    Failed,
}

/// Progress and outcome of the current (or most recent) run.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunState {
    pub status: RunStatus,
    /// Pairs resolved so far; monotone within a run.
    pub completed: usize,
    /// Pairs in the frozen schedule of the current run.
    pub total: usize,
    /// Present only when `status` is `Failed`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_error: Option<String>,
}

impl RunState {
    fn new() -> Self {
        Self {
            status: RunStatus::Idle,
            completed: 0,
            total: 0,
            last_error: None,
        }
    }
}

/// Shared handle to the run state.
///
/// Cloned into the document store, the result set, and the run controller
/// so every mutation guard consults the same state. Only the controller
/// drives transitions.
#[derive(Clone)]
pub struct RunStateHandle {
    inner: Arc<RwLock<RunState>>,
}

impl RunStateHandle {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(RunState::new())),
        }
    }

    fn read_guard(&self) -> RwLockReadGuard<'_, RunState> {
        match self.inner.read() {
            Ok(guard) => guard,
            Err(poisoned) => {
                log::warn!("Run state lock was poisoned, recovering");
                poisoned.into_inner()
            }
        }
    }

    fn write_guard(&self) -> RwLockWriteGuard<'_, RunState> {
        match self.inner.write() {
            Ok(guard) => guard,
            Err(poisoned) => {
                log::warn!("Run state lock was poisoned, recovering");
                poisoned.into_inner()
            }
        }
    }

    /// Returns a copy of the current state.
    pub fn snapshot(&self) -> RunState {
        self.read_guard().clone()
    }

    pub fn status(&self) -> RunStatus {
        self.read_guard().status
    }

    pub fn is_running(&self) -> bool {
        self.status() == RunStatus::Running
    }

    /// Transition into `Running`: resets the counters, clears the last
    /// error, and records the frozen schedule size. Fails if a run is
    /// already in progress.
    pub(crate) fn begin(&self, total: usize) -> Result<(), RunError> {
        let mut state = self.write_guard();
        if state.status == RunStatus::Running {
            return Err(RunError::AlreadyRunning);
        }
        state.status = RunStatus::Running;
        state.completed = 0;
        state.total = total;
        state.last_error = None;
        Ok(())
    }

    /// Records one successfully resolved pair.
    pub(crate) fn record_success(&self) {
        let mut state = self.write_guard();
        debug_assert_eq!(state.status, RunStatus::Running);
        state.completed += 1;
    }

    /// Transition `Running → Completed`.
    pub(crate) fn complete(&self) {
        self.write_guard().status = RunStatus::Completed;
    }

    /// Transition `Running → Failed`, recording the terminal error.
    pub(crate) fn fail(&self, error: impl Into<String>) {
        let mut state = self.write_guard();
        state.status = RunStatus::Failed;
        state.last_error = Some(error.into());
    }
}

impl Default for RunStateHandle {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let handle = RunStateHandle::new();
        let state = handle.snapshot();
        assert_eq!(state.status, RunStatus::Idle);
        assert_eq!(state.completed, 0);
        assert_eq!(state.total, 0);
        assert!(state.last_error.is_none());
        assert!(!handle.is_running());
    }

    #[test]
    fn test_begin_resets_counters_and_error() {
        let handle = RunStateHandle::new();
        handle.begin(3).unwrap();
        handle.record_success();
        handle.fail("boom");

        handle.begin(6).unwrap();
        let state = handle.snapshot();
        assert_eq!(state.status, RunStatus::Running);
        assert_eq!(state.completed, 0);
        assert_eq!(state.total, 6);
        assert!(state.last_error.is_none());
    }

    #[test]
    fn test_begin_rejected_while_running() {
        let handle = RunStateHandle::new();
        handle.begin(1).unwrap();

        assert!(matches!(handle.begin(1), Err(RunError::AlreadyRunning)));
    }

    #[test]
    fn test_begin_allowed_after_completion_and_failure() {
        let handle = RunStateHandle::new();
        handle.begin(1).unwrap();
        handle.complete();
        assert!(handle.begin(1).is_ok());

        handle.fail("boom");
        assert!(handle.begin(1).is_ok());
    }

    #[test]
    fn test_completed_count_is_monotone_within_a_run() {
        let handle = RunStateHandle::new();
        handle.begin(3).unwrap();

        let mut last = 0;
        for _ in 0..3 {
            handle.record_success();
            let completed = handle.snapshot().completed;
            assert!(completed > last);
            last = completed;
        }
        assert_eq!(last, 3);
    }

    #[test]
    fn test_fail_records_last_error() {
        let handle = RunStateHandle::new();
        handle.begin(2).unwrap();
        handle.record_success();
        handle.fail("corrupt file");

        let state = handle.snapshot();
        assert_eq!(state.status, RunStatus::Failed);
        assert_eq!(state.completed, 1);
        assert_eq!(state.last_error.as_deref(), Some("corrupt file"));
    }

    #[test]
    fn test_clones_share_state() {
        let handle = RunStateHandle::new();
        let clone = handle.clone();

        handle.begin(4).unwrap();
        assert!(clone.is_running());
        assert_eq!(clone.snapshot().total, 4);
    }
}
