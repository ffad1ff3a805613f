//! Case document storage
//!
//! Case documents are kept under a generated opaque name; the original
//! filename is only remembered in the database for downloads.

mod local;

pub use local::LocalDocumentStore;

use async_trait::async_trait;

use crate::{constants::ALLOWED_DOCUMENT_EXTENSIONS, error::AppResult};

/// A document written to storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredDocument {
    pub original_filename: String,
    pub stored_filename: String,
}

/// Storage backend for case documents
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Persist a document, returning its original and generated names.
    ///
    /// Fails with a validation error when the extension is not allowed.
    async fn save(&self, original_filename: &str, contents: &[u8]) -> AppResult<StoredDocument>;

    /// Read a document back by its stored name
    async fn read(&self, stored_filename: &str) -> AppResult<Vec<u8>>;

    /// Remove a document by its stored name
    async fn delete(&self, stored_filename: &str) -> AppResult<()>;
}

/// Lower-cased extension of `filename` if it is an accepted document type
pub fn allowed_extension(filename: &str) -> Option<String> {
    let (stem, ext) = filename.rsplit_once('.')?;
    if stem.is_empty() {
        return None;
    }
    let ext = ext.to_ascii_lowercase();
    ALLOWED_DOCUMENT_EXTENSIONS
        .contains(&ext.as_str())
        .then_some(ext)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allowed_extension() {
        assert_eq!(allowed_extension("brief.pdf").as_deref(), Some("pdf"));
        assert_eq!(allowed_extension("Brief.DOCX").as_deref(), Some("docx"));
        assert_eq!(allowed_extension("archive.tar.pdf").as_deref(), Some("pdf"));
        assert_eq!(allowed_extension("notes.txt"), None);
        assert_eq!(allowed_extension("noextension"), None);
        assert_eq!(allowed_extension(".pdf"), None);
    }
}
