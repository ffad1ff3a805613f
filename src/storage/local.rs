//! Filesystem-backed document store

use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;
use uuid::Uuid;

use super::{allowed_extension, DocumentStore, StoredDocument};
use crate::error::{AppError, AppResult};

/// Stores documents in a single flat upload directory
#[derive(Debug, Clone)]
pub struct LocalDocumentStore {
    root: PathBuf,
}

impl LocalDocumentStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Create the upload directory if it does not exist yet
    pub async fn ensure_root(&self) -> AppResult<()> {
        tokio::fs::create_dir_all(&self.root).await?;
        Ok(())
    }

    /// Map a stored name to a path, refusing anything but a plain file name
    fn resolve(&self, stored_filename: &str) -> AppResult<PathBuf> {
        let mut components = Path::new(stored_filename).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(_)), None) => Ok(self.root.join(stored_filename)),
            _ => Err(AppError::NotFound("File not found".to_string())),
        }
    }
}

#[async_trait]
impl DocumentStore for LocalDocumentStore {
    async fn save(&self, original_filename: &str, contents: &[u8]) -> AppResult<StoredDocument> {
        let ext = allowed_extension(original_filename).ok_or_else(|| {
            AppError::Validation("Invalid file format. Only PDF and DOCX are allowed".to_string())
        })?;

        let stored_filename = format!("{}.{}", Uuid::new_v4().simple(), ext);
        let path = self.root.join(&stored_filename);
        tokio::fs::write(&path, contents).await?;

        debug!(original = %original_filename, stored = %stored_filename, bytes = contents.len(), "Stored case document");

        Ok(StoredDocument {
            original_filename: original_filename.to_string(),
            stored_filename,
        })
    }

    async fn read(&self, stored_filename: &str) -> AppResult<Vec<u8>> {
        let path = self.resolve(stored_filename)?;
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(AppError::NotFound("File not found".to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn delete(&self, stored_filename: &str) -> AppResult<()> {
        let path = self.resolve(stored_filename)?;
        tokio::fs::remove_file(&path).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_save_read_delete() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalDocumentStore::new(dir.path());

        let doc = store.save("Case Brief.PDF", b"%PDF-1.7").await.unwrap();
        assert_eq!(doc.original_filename, "Case Brief.PDF");
        assert!(doc.stored_filename.ends_with(".pdf"));
        assert_ne!(doc.stored_filename, doc.original_filename);

        let bytes = store.read(&doc.stored_filename).await.unwrap();
        assert_eq!(bytes, b"%PDF-1.7");

        store.delete(&doc.stored_filename).await.unwrap();
        assert!(matches!(
            store.read(&doc.stored_filename).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_rejects_disallowed_extension() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalDocumentStore::new(dir.path());

        let result = store.save("payload.exe", b"MZ").await;
        assert!(matches!(result, Err(AppError::Validation(_))));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_generated_names_are_unique() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalDocumentStore::new(dir.path());

        let a = store.save("brief.docx", b"a").await.unwrap();
        let b = store.save("brief.docx", b"b").await.unwrap();
        assert_ne!(a.stored_filename, b.stored_filename);
    }

    #[tokio::test]
    async fn test_path_traversal_is_refused() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalDocumentStore::new(dir.path().join("uploads"));

        assert!(matches!(
            store.read("../secret.pdf").await,
            Err(AppError::NotFound(_))
        ));
        assert!(store.delete("/etc/passwd").await.is_err());
    }

    #[tokio::test]
    async fn test_delete_missing_file_is_storage_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalDocumentStore::new(dir.path());

        assert!(matches!(
            store.delete("missing.pdf").await,
            Err(AppError::Storage(_))
        ));
    }
}
