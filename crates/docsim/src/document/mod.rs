pub mod store;

pub use store::DocumentStore;

use std::path::Path;

/// File extensions the comparison service accepts.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["txt", "pdf", "doc", "docx"];

/// Content of an uploaded document.
///
/// Uploads are registered before their bytes finish loading, so a document
/// starts `Pending` and transitions to `Ready` exactly once.
#[derive(Debug, Clone)]
pub enum Payload {
    Pending,
    Ready(Vec<u8>),
}

impl Payload {
    pub fn is_ready(&self) -> bool {
        matches!(self, Payload::Ready(_))
    }

    /// Returns the loaded bytes, if any.
    pub fn bytes(&self) -> Option<&[u8]> {
        match self {
            Payload::Ready(bytes) => Some(bytes),
            Payload::Pending => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Document {
    /// Stable identity within a batch; never reused, unlike positions.
    pub id: String,
    /// Display name, not guaranteed unique.
    pub name: String,
    /// MIME type of the document (e.g., "text/plain", "application/pdf").
    pub mime_type: Option<String>,
    pub payload: Payload,
}

impl Document {
    fn new_internal(name: String, payload: Payload) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            mime_type: Self::detect_mime_type(&name),
            name,
            payload,
        }
    }

    /// Creates a document whose content is already loaded.
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self::new_internal(name.into(), Payload::Ready(bytes))
    }

    /// Creates a document whose content is still loading. Attach the bytes
    /// later with [`DocumentStore::attach_payload`].
    pub fn pending(name: impl Into<String>) -> Self {
        Self::new_internal(name.into(), Payload::Pending)
    }

    /// Detects MIME type from the display name using the mime_guess crate.
    /// Returns `None` for unknown extensions.
    fn detect_mime_type(name: &str) -> Option<String> {
        mime_guess::from_path(name).first().map(|m| m.to_string())
    }

    /// Returns true if the document's extension is one the service accepts.
    pub fn is_supported(&self) -> bool {
        Path::new(&self.name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| {
                SUPPORTED_EXTENSIONS
                    .iter()
                    .any(|supported| ext.eq_ignore_ascii_case(supported))
            })
            .unwrap_or(false)
    }
}
