//! Accumulated outcomes of comparison runs.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::ResultsError;
use crate::run::RunStateHandle;

/// Outcome of one successful pairwise comparison.
///
/// Carries display-name copies of the compared documents, so a row
/// survives removal of the underlying entries. Never mutated after
/// creation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonOutcome {
    pub first: String,
    pub second: String,
    /// Normalized similarity in `[0, 1]`.
    pub score: f64,
    /// Service-supplied note, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// When the comparison resolved.
    pub compared_at: DateTime<Utc>,
}

/// Ordered, editable collection of comparison outcomes.
///
/// A completed run replaces the whole collection; rows can be deleted
/// individually or cleared between runs. Edits are rejected while a run
/// is in progress and never affect the document store or a future run's
/// schedule.
pub struct ResultSet {
    outcomes: RwLock<Vec<ComparisonOutcome>>,
    run_state: RunStateHandle,
}

impl ResultSet {
    /// Creates an empty result set sharing the given run state for its
    /// guards.
    pub fn new(run_state: RunStateHandle) -> Self {
        Self {
            outcomes: RwLock::new(Vec::new()),
            run_state,
        }
    }

    fn read_guard(&self) -> RwLockReadGuard<'_, Vec<ComparisonOutcome>> {
        match self.outcomes.read() {
            Ok(guard) => guard,
            Err(poisoned) => {
                log::warn!("Result set lock was poisoned, recovering");
                poisoned.into_inner()
            }
        }
    }

    fn write_guard(&self) -> RwLockWriteGuard<'_, Vec<ComparisonOutcome>> {
        match self.outcomes.write() {
            Ok(guard) => guard,
            Err(poisoned) => {
                log::warn!("Result set lock was poisoned, recovering");
                poisoned.into_inner()
            }
        }
    }

    /// Returns a snapshot of the outcomes in schedule order.
    pub fn list(&self) -> Vec<ComparisonOutcome> {
        self.read_guard().clone()
    }

    pub fn len(&self) -> usize {
        self.read_guard().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read_guard().is_empty()
    }

    /// Deletes one row, preserving the order of the rest.
    ///
    /// Rejected while a run is in progress.
    pub fn remove_at(&self, index: usize) -> Result<ComparisonOutcome, ResultsError> {
        if self.run_state.is_running() {
            return Err(ResultsError::RunInProgress);
        }

        let mut outcomes = self.write_guard();
        if index >= outcomes.len() {
            return Err(ResultsError::IndexOutOfRange {
                index,
                len: outcomes.len(),
            });
        }
        Ok(outcomes.remove(index))
    }

    /// Deletes every row.
    ///
    /// Rejected while a run is in progress.
    pub fn clear(&self) -> Result<(), ResultsError> {
        if self.run_state.is_running() {
            return Err(ResultsError::RunInProgress);
        }

        self.write_guard().clear();
        Ok(())
    }

    /// Installs a completed run's outcomes, replacing any prior set.
    pub(crate) fn install(&self, outcomes: Vec<ComparisonOutcome>) {
        *self.write_guard() = outcomes;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(first: &str, second: &str, score: f64) -> ComparisonOutcome {
        ComparisonOutcome {
            first: first.to_string(),
            second: second.to_string(),
            score,
            note: None,
            compared_at: Utc::now(),
        }
    }

    fn results() -> ResultSet {
        ResultSet::new(RunStateHandle::new())
    }

    #[test]
    fn test_install_replaces_wholesale() {
        let results = results();
        results.install(vec![outcome("a", "b", 0.1)]);
        results.install(vec![outcome("c", "d", 0.2), outcome("c", "e", 0.3)]);

        let rows = results.list();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].first, "c");
        assert_eq!(rows[0].second, "d");
    }

    #[test]
    fn test_remove_at_keeps_order_of_remaining_rows() {
        let results = results();
        results.install(vec![
            outcome("a", "b", 0.1),
            outcome("a", "c", 0.8),
            outcome("b", "c", 0.5),
        ]);

        let removed = results.remove_at(1).unwrap();
        assert_eq!(removed.second, "c");
        assert_eq!(removed.score, 0.8);

        let rows = results.list();
        assert_eq!(rows.len(), 2);
        assert_eq!((rows[0].first.as_str(), rows[0].second.as_str()), ("a", "b"));
        assert_eq!((rows[1].first.as_str(), rows[1].second.as_str()), ("b", "c"));
    }

    #[test]
    fn test_remove_at_out_of_range() {
        let results = results();
        results.install(vec![outcome("a", "b", 0.1)]);

        let err = results.remove_at(5).unwrap_err();
        assert!(matches!(
            err,
            ResultsError::IndexOutOfRange { index: 5, len: 1 }
        ));
    }

    #[test]
    fn test_clear_empties_the_set() {
        let results = results();
        results.install(vec![outcome("a", "b", 0.1), outcome("a", "c", 0.2)]);

        results.clear().unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn test_edits_rejected_while_running() {
        let run_state = RunStateHandle::new();
        let results = ResultSet::new(run_state.clone());
        results.install(vec![outcome("a", "b", 0.1)]);

        run_state.begin(1).unwrap();

        assert!(matches!(results.remove_at(0), Err(ResultsError::RunInProgress)));
        assert!(matches!(results.clear(), Err(ResultsError::RunInProgress)));
        assert_eq!(results.len(), 1);

        run_state.fail("boom");
        assert!(results.clear().is_ok());
    }
}
