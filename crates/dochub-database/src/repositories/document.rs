//! Document repository implementation.
//!
//! Every read excludes tombstoned rows; deletion only ever sets the
//! tombstone flag.

use sqlx::PgPool;

use dochub_core::error::{AppError, ErrorKind};
use dochub_core::result::AppResult;
use dochub_core::types::pagination::{PageRequest, PageResponse};
use dochub_core::types::{AccountId, DocumentId};
use dochub_entity::document::model::NewDocument;
use dochub_entity::document::Document;

/// Repository for document CRUD and query operations.
#[derive(Debug, Clone)]
pub struct DocumentRepository {
    pool: PgPool,
}

impl DocumentRepository {
    /// Create a new document repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a live document by primary key, optionally scoped to an owner.
    pub async fn find_by_id(
        &self,
        id: DocumentId,
        owner: Option<AccountId>,
    ) -> AppResult<Option<Document>> {
        let doc = match owner {
            Some(owner_id) => {
                sqlx::query_as::<_, Document>(
                    "SELECT * FROM documents \
                     WHERE id = $1 AND owner_id = $2 AND is_deleted = FALSE",
                )
                .bind(id)
                .bind(owner_id)
                .fetch_optional(&self.pool)
                .await
            }
            None => {
                sqlx::query_as::<_, Document>(
                    "SELECT * FROM documents WHERE id = $1 AND is_deleted = FALSE",
                )
                .bind(id)
                .fetch_optional(&self.pool)
                .await
            }
        };

        doc.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to find document by id", e)
        })
    }

    /// List an owner's live documents, newest first, optionally filtered by
    /// a search term over title, content, and description.
    pub async fn find_by_owner(
        &self,
        owner: AccountId,
        search: Option<&str>,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Document>> {
        match search {
            Some(term) => {
                let pattern = format!("%{term}%");

                let total: i64 = sqlx::query_scalar(
                    "SELECT COUNT(*) FROM documents \
                     WHERE owner_id = $1 AND is_deleted = FALSE \
                     AND (title ILIKE $2 OR content ILIKE $2 OR description ILIKE $2)",
                )
                .bind(owner)
                .bind(&pattern)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to count documents", e)
                })?;

                let docs = sqlx::query_as::<_, Document>(
                    "SELECT * FROM documents \
                     WHERE owner_id = $1 AND is_deleted = FALSE \
                     AND (title ILIKE $2 OR content ILIKE $2 OR description ILIKE $2) \
                     ORDER BY updated_at DESC LIMIT $3 OFFSET $4",
                )
                .bind(owner)
                .bind(&pattern)
                .bind(page.limit() as i64)
                .bind(page.offset() as i64)
                .fetch_all(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to search documents", e)
                })?;

                Ok(PageResponse::new(docs, page.page, page.page_size, total as u64))
            }
            None => {
                let total: i64 = sqlx::query_scalar(
                    "SELECT COUNT(*) FROM documents WHERE owner_id = $1 AND is_deleted = FALSE",
                )
                .bind(owner)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to count documents", e)
                })?;

                let docs = sqlx::query_as::<_, Document>(
                    "SELECT * FROM documents \
                     WHERE owner_id = $1 AND is_deleted = FALSE \
                     ORDER BY updated_at DESC LIMIT $2 OFFSET $3",
                )
                .bind(owner)
                .bind(page.limit() as i64)
                .bind(page.offset() as i64)
                .fetch_all(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to list documents", e)
                })?;

                Ok(PageResponse::new(docs, page.page, page.page_size, total as u64))
            }
        }
    }

    /// List public live documents, most viewed first.
    pub async fn find_public(&self, page: &PageRequest) -> AppResult<PageResponse<Document>> {
        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM documents WHERE is_public = TRUE AND is_deleted = FALSE",
        )
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to count public documents", e)
        })?;

        let docs = sqlx::query_as::<_, Document>(
            "SELECT * FROM documents \
             WHERE is_public = TRUE AND is_deleted = FALSE \
             ORDER BY view_count DESC LIMIT $1 OFFSET $2",
        )
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list public documents", e)
        })?;

        Ok(PageResponse::new(docs, page.page, page.page_size, total as u64))
    }

    /// Insert a new document and return the stored row.
    pub async fn create(&self, owner: AccountId, new: &NewDocument) -> AppResult<Document> {
        sqlx::query_as::<_, Document>(
            "INSERT INTO documents (owner_id, title, content, description) \
             VALUES ($1, $2, $3, $4) RETURNING *",
        )
        .bind(owner)
        .bind(&new.title)
        .bind(&new.content)
        .bind(&new.description)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create document", e))
    }

    /// Update a document's content fields.
    pub async fn update(&self, doc: &Document) -> AppResult<()> {
        let result = sqlx::query(
            "UPDATE documents SET title = $2, content = $3, description = $4, \
             is_public = $5, updated_at = NOW() \
             WHERE id = $1 AND is_deleted = FALSE",
        )
        .bind(doc.id)
        .bind(&doc.title)
        .bind(&doc.content)
        .bind(&doc.description)
        .bind(doc.is_public)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update document", e))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Document not found"));
        }
        Ok(())
    }

    /// Tombstone a document owned by the given account.
    ///
    /// Returns `false` if no live document matched.
    pub async fn soft_delete(&self, id: DocumentId, owner: AccountId) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE documents SET is_deleted = TRUE, updated_at = NOW() \
             WHERE id = $1 AND owner_id = $2 AND is_deleted = FALSE",
        )
        .bind(id)
        .bind(owner)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete document", e))?;

        Ok(result.rows_affected() > 0)
    }

    /// Increment a document's view counter.
    pub async fn increment_view_count(&self, id: DocumentId) -> AppResult<()> {
        sqlx::query(
            "UPDATE documents SET view_count = view_count + 1 \
             WHERE id = $1 AND is_deleted = FALSE",
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to increment view count", e)
        })?;
        Ok(())
    }

    /// Record a completed conversion on the document row.
    pub async fn record_conversion(&self, id: DocumentId) -> AppResult<()> {
        sqlx::query(
            "UPDATE documents SET conversion_count = conversion_count + 1, \
             last_converted_at = NOW(), updated_at = NOW() \
             WHERE id = $1 AND is_deleted = FALSE",
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to record conversion", e)
        })?;
        Ok(())
    }
}
