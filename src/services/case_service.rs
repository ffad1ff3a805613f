//! Hackathon case pool service

use sqlx::PgConnection;
use tracing::{info, warn};

use crate::{
    db::repositories::{CaseRepository, TeamRepository},
    error::{AppError, AppResult},
    models::HackathonCase,
    storage::DocumentStore,
};

/// An uploaded document before it reaches storage
#[derive(Debug)]
pub struct Upload {
    pub filename: String,
    pub contents: Vec<u8>,
}

/// Partial update of a case
#[derive(Debug, Default)]
pub struct CaseChanges<'a> {
    pub title: Option<&'a str>,
    pub description: Option<&'a str>,
}

/// Result of an update; `replaced_document` must be discarded after commit
#[derive(Debug)]
pub struct CaseUpdate {
    pub case: HackathonCase,
    pub replaced_document: Option<String>,
}

/// Result of a deletion; `case.stored_filename` must be discarded after commit
#[derive(Debug)]
pub struct CaseDeletion {
    pub case: HackathonCase,
    /// Teams that lost their assignment along with the case
    pub unassigned_teams: Vec<String>,
}

pub struct CaseService;

impl CaseService {
    pub async fn list(conn: &mut PgConnection) -> AppResult<Vec<HackathonCase>> {
        CaseRepository::list(conn).await
    }

    pub async fn get(conn: &mut PgConnection, id: i64) -> AppResult<HackathonCase> {
        CaseRepository::find_by_id(conn, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Case not found".to_string()))
    }

    /// Store the document, then record the case
    pub async fn create(
        conn: &mut PgConnection,
        store: &dyn DocumentStore,
        title: &str,
        description: &str,
        upload: Option<Upload>,
    ) -> AppResult<HackathonCase> {
        let upload = upload.ok_or_else(|| {
            AppError::Validation("A case document (PDF or DOCX) is required".to_string())
        })?;

        let document = store.save(&upload.filename, &upload.contents).await?;

        match CaseRepository::create(
            conn,
            title,
            description,
            &document.stored_filename,
            &document.original_filename,
        )
        .await
        {
            Ok(case) => {
                info!(case_id = case.id, stored = %case.stored_filename, "Case created");
                Ok(case)
            }
            Err(err) => {
                Self::discard_document(store, &document.stored_filename).await;
                Err(err)
            }
        }
    }

    /// Update text fields and optionally replace the document
    pub async fn update(
        conn: &mut PgConnection,
        store: &dyn DocumentStore,
        id: i64,
        changes: CaseChanges<'_>,
        upload: Option<Upload>,
    ) -> AppResult<CaseUpdate> {
        let existing = Self::get(conn, id).await?;

        let document = match upload {
            Some(upload) => Some(store.save(&upload.filename, &upload.contents).await?),
            None => None,
        };

        let result = CaseRepository::update(
            conn,
            id,
            changes.title,
            changes.description,
            document
                .as_ref()
                .map(|d| (d.stored_filename.as_str(), d.original_filename.as_str())),
        )
        .await;

        match result {
            Ok(case) => {
                info!(case_id = case.id, "Case updated");
                Ok(CaseUpdate {
                    case,
                    replaced_document: document.map(|_| existing.stored_filename),
                })
            }
            Err(err) => {
                if let Some(document) = document {
                    Self::discard_document(store, &document.stored_filename).await;
                }
                Err(err)
            }
        }
    }

    /// Remove the case record; its assignments go with it
    pub async fn delete(conn: &mut PgConnection, id: i64) -> AppResult<CaseDeletion> {
        let case = Self::get(conn, id).await?;
        let unassigned_teams = TeamRepository::team_names_for_case(conn, id).await?;

        CaseRepository::delete(conn, id).await?;

        if !unassigned_teams.is_empty() {
            warn!(
                case_id = id,
                teams = unassigned_teams.len(),
                "Deleted case was assigned; affected teams have no case until reassignment"
            );
        }
        info!(case_id = id, "Case deleted");

        Ok(CaseDeletion {
            case,
            unassigned_teams,
        })
    }

    /// Look up a case by its stored document name and read the document
    pub async fn download(
        conn: &mut PgConnection,
        store: &dyn DocumentStore,
        stored_filename: &str,
    ) -> AppResult<(HackathonCase, Vec<u8>)> {
        let case = CaseRepository::find_by_stored_filename(conn, stored_filename)
            .await?
            .ok_or_else(|| AppError::NotFound("File not found".to_string()))?;

        let contents = store.read(&case.stored_filename).await?;
        Ok((case, contents))
    }

    /// Best-effort removal of a document; a failure is returned as a warning
    pub async fn discard_document(store: &dyn DocumentStore, stored_filename: &str) -> Option<String> {
        match store.delete(stored_filename).await {
            Ok(()) => None,
            Err(err) => {
                warn!(stored = %stored_filename, error = %err, "Failed to remove case document");
                Some(format!("Case document '{}' could not be removed: {}", stored_filename, err))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use mockall::predicate::eq;

    use super::*;
    use crate::storage::MockDocumentStore;

    #[tokio::test]
    async fn test_discard_document_success_has_no_warning() {
        let mut store = MockDocumentStore::new();
        store
            .expect_delete()
            .with(eq("abc.pdf"))
            .times(1)
            .returning(|_| Ok(()));

        assert_eq!(CaseService::discard_document(&store, "abc.pdf").await, None);
    }

    #[tokio::test]
    async fn test_discard_document_failure_becomes_warning() {
        let mut store = MockDocumentStore::new();
        store
            .expect_delete()
            .times(1)
            .returning(|_| Err(AppError::Storage("permission denied".to_string())));

        let warning = CaseService::discard_document(&store, "abc.pdf").await.unwrap();
        assert!(warning.contains("abc.pdf"));
        assert!(warning.contains("permission denied"));
    }
}

#[cfg(test)]
mod db_tests {
    use super::*;
    use crate::{
        services::AssignmentService,
        storage::LocalDocumentStore,
        test_utils::{seed_team, test_pool},
    };

    #[tokio::test]
    #[ignore = "requires docker"]
    async fn test_case_lifecycle_with_documents() {
        let pool = test_pool().await;
        let dir = tempfile::tempdir().unwrap();
        let store = LocalDocumentStore::new(dir.path());
        let mut conn = pool.acquire().await.unwrap();

        let case = CaseService::create(
            &mut conn,
            &store,
            "Smart city",
            "Build something",
            Some(Upload {
                filename: "brief.pdf".to_string(),
                contents: b"%PDF-1.4 v1".to_vec(),
            }),
        )
        .await
        .unwrap();
        assert_eq!(case.original_filename, "brief.pdf");

        let (_, contents) = CaseService::download(&mut conn, &store, &case.stored_filename)
            .await
            .unwrap();
        assert_eq!(contents, b"%PDF-1.4 v1");

        let update = CaseService::update(
            &mut conn,
            &store,
            case.id,
            CaseChanges {
                title: Some("Smarter city"),
                ..Default::default()
            },
            Some(Upload {
                filename: "brief-v2.docx".to_string(),
                contents: b"v2".to_vec(),
            }),
        )
        .await
        .unwrap();
        assert_eq!(update.case.title, "Smarter city");
        assert_eq!(update.case.description, "Build something");
        assert_eq!(update.replaced_document.as_deref(), Some(case.stored_filename.as_str()));
        assert_eq!(CaseService::discard_document(&store, &case.stored_filename).await, None);

        seed_team(&mut conn, "assigned").await;
        let mut tx = pool.begin().await.unwrap();
        AssignmentService::assign_cases_evenly(&mut tx).await.unwrap();
        tx.commit().await.unwrap();

        let deletion = CaseService::delete(&mut conn, case.id).await.unwrap();
        assert_eq!(deletion.unassigned_teams, vec!["assigned".to_string()]);
        assert!(TeamRepository::assignments(&mut conn).await.unwrap().is_empty());

        assert!(matches!(
            CaseService::get(&mut conn, case.id).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    #[ignore = "requires docker"]
    async fn test_create_requires_document() {
        let pool = test_pool().await;
        let dir = tempfile::tempdir().unwrap();
        let store = LocalDocumentStore::new(dir.path());
        let mut conn = pool.acquire().await.unwrap();

        let err = CaseService::create(&mut conn, &store, "No file", "Missing", None)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
