//! Ordered store of uploaded documents.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::StoreError;
use crate::run::RunStateHandle;

use super::{Document, Payload};

/// Ordered collection of uploaded documents.
///
/// The store owns every [`Document`]; a comparison run only takes a
/// snapshot. `remove` and `clear` are rejected while a run is in progress
/// so an in-flight schedule is never edited out from under the user.
pub struct DocumentStore {
    documents: RwLock<Vec<Document>>,
    run_state: RunStateHandle,
}

impl DocumentStore {
    /// Creates an empty store sharing the given run state for its guards.
    pub fn new(run_state: RunStateHandle) -> Self {
        Self {
            documents: RwLock::new(Vec::new()),
            run_state,
        }
    }

    fn read_guard(&self) -> RwLockReadGuard<'_, Vec<Document>> {
        match self.documents.read() {
            Ok(guard) => guard,
            Err(poisoned) => {
                log::warn!("Document store lock was poisoned, recovering");
                poisoned.into_inner()
            }
        }
    }

    fn write_guard(&self) -> RwLockWriteGuard<'_, Vec<Document>> {
        match self.documents.write() {
            Ok(guard) => guard,
            Err(poisoned) => {
                log::warn!("Document store lock was poisoned, recovering");
                poisoned.into_inner()
            }
        }
    }

    /// Appends documents at the end, preserving upload order.
    ///
    /// Order matters: pair enumeration is order-dependent, so it fixes the
    /// output order of the result set.
    pub fn add(&self, documents: Vec<Document>) {
        for doc in &documents {
            if !doc.is_supported() {
                log::warn!(
                    "Document '{}' has an unsupported extension; the service may reject it",
                    doc.name
                );
            }
        }
        self.write_guard().extend(documents);
    }

    /// Removes the document with the given identity.
    ///
    /// Rejected while a run is in progress.
    pub fn remove(&self, id: &str) -> Result<Document, StoreError> {
        if self.run_state.is_running() {
            return Err(StoreError::RunInProgress);
        }

        let mut documents = self.write_guard();
        let position = documents
            .iter()
            .position(|doc| doc.id == id)
            .ok_or_else(|| StoreError::UnknownDocument(id.to_string()))?;
        Ok(documents.remove(position))
    }

    /// Removes every document.
    ///
    /// Rejected while a run is in progress.
    pub fn clear(&self) -> Result<(), StoreError> {
        if self.run_state.is_running() {
            return Err(StoreError::RunInProgress);
        }

        self.write_guard().clear();
        Ok(())
    }

    /// Stores loaded bytes on the matching entry, completing its
    /// pending → ready transition.
    ///
    /// Matches by identity, never by position: indices shift when
    /// documents are removed while content is still loading.
    pub fn attach_payload(&self, id: &str, bytes: Vec<u8>) -> Result<(), StoreError> {
        let mut documents = self.write_guard();
        let document = documents
            .iter_mut()
            .find(|doc| doc.id == id)
            .ok_or_else(|| StoreError::UnknownDocument(id.to_string()))?;
        document.payload = Payload::Ready(bytes);
        Ok(())
    }

    /// Returns a snapshot of the store in upload order.
    pub fn list(&self) -> Vec<Document> {
        self.read_guard().clone()
    }

    pub fn len(&self) -> usize {
        self.read_guard().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read_guard().is_empty()
    }
}
