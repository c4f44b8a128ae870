//! Document operations — creation, listing, updates, soft deletion,
//! sharing, and conversion accounting.

use std::sync::Arc;

use tracing::{info, warn};

use dochub_auth::quota::QuotaEnforcer;
use dochub_auth::rbac::RoleGuard;
use dochub_core::error::AppError;
use dochub_core::types::DocumentId;
use dochub_core::types::pagination::{PageRequest, PageResponse};
use dochub_database::repositories::DocumentRepository;
use dochub_entity::account::{CounterKind, Role};
use dochub_entity::document::model::{DocumentUpdate, NewDocument};
use dochub_entity::document::Document;

use crate::context::RequestContext;

/// Maximum document title length.
const TITLE_MAX: usize = 200;

/// Handles document lifecycle operations.
#[derive(Clone)]
pub struct DocumentService {
    /// Document repository.
    documents: Arc<DocumentRepository>,
    /// Quota enforcement for create/convert.
    quotas: Arc<QuotaEnforcer>,
    /// Role hierarchy checks.
    guard: RoleGuard,
}

impl std::fmt::Debug for DocumentService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentService").finish()
    }
}

impl DocumentService {
    /// Create a new document service.
    pub fn new(
        documents: Arc<DocumentRepository>,
        quotas: Arc<QuotaEnforcer>,
        guard: RoleGuard,
    ) -> Self {
        Self {
            documents,
            quotas,
            guard,
        }
    }

    /// Create a document for the acting account.
    ///
    /// Reserves document quota first; the reservation is released if the
    /// insert itself fails.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        new: NewDocument,
    ) -> Result<Document, AppError> {
        validate_title(&new.title)?;

        self.quotas
            .reserve(&ctx.account, CounterKind::Document)
            .await?;

        match self.documents.create(ctx.account_id(), &new).await {
            Ok(doc) => {
                info!(document_id = %doc.id, owner_id = %doc.owner_id, "Document created");
                Ok(doc)
            }
            Err(e) => {
                warn!(owner_id = %ctx.account_id(), "Document insert failed, releasing quota");
                let _ = self
                    .quotas
                    .release(&ctx.account, CounterKind::Document)
                    .await;
                Err(e)
            }
        }
    }

    /// List the acting account's documents, optionally filtered by a
    /// search term.
    pub async fn list_mine(
        &self,
        ctx: &RequestContext,
        search: Option<&str>,
        page: &PageRequest,
    ) -> Result<PageResponse<Document>, AppError> {
        self.documents
            .find_by_owner(ctx.account_id(), search, page)
            .await
    }

    /// List public documents, most viewed first. No authentication
    /// required.
    pub async fn list_public(&self, page: &PageRequest) -> Result<PageResponse<Document>, AppError> {
        self.documents.find_public(page).await
    }

    /// Fetch one of the acting account's documents and count the view.
    pub async fn get(&self, ctx: &RequestContext, id: DocumentId) -> Result<Document, AppError> {
        let doc = self
            .documents
            .find_by_id(id, Some(ctx.account_id()))
            .await?
            .ok_or_else(|| AppError::not_found("Document not found"))?;

        self.documents.increment_view_count(id).await?;
        Ok(doc)
    }

    /// Update one of the acting account's documents.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: DocumentId,
        update: DocumentUpdate,
    ) -> Result<Document, AppError> {
        let mut doc = self
            .documents
            .find_by_id(id, Some(ctx.account_id()))
            .await?
            .ok_or_else(|| AppError::not_found("Document not found"))?;

        if let Some(title) = update.title {
            validate_title(&title)?;
            doc.title = title;
        }
        if let Some(content) = update.content {
            doc.content = content;
        }
        if let Some(description) = update.description {
            doc.description = Some(description);
        }

        self.documents.update(&doc).await?;
        Ok(doc)
    }

    /// Tombstone one of the acting account's documents and release its
    /// quota slot.
    pub async fn delete(&self, ctx: &RequestContext, id: DocumentId) -> Result<(), AppError> {
        let deleted = self.documents.soft_delete(id, ctx.account_id()).await?;
        if !deleted {
            return Err(AppError::not_found("Document not found"));
        }

        self.quotas
            .release(&ctx.account, CounterKind::Document)
            .await?;
        info!(document_id = %id, owner_id = %ctx.account_id(), "Document deleted");
        Ok(())
    }

    /// Toggle public visibility of a document (premium feature).
    pub async fn set_public(
        &self,
        ctx: &RequestContext,
        id: DocumentId,
        is_public: bool,
    ) -> Result<Document, AppError> {
        self.guard
            .require_min_role(&ctx.effective_role, &Role::Premium)?;

        let mut doc = self
            .documents
            .find_by_id(id, Some(ctx.account_id()))
            .await?
            .ok_or_else(|| AppError::not_found("Document not found"))?;

        doc.is_public = is_public;
        self.documents.update(&doc).await?;

        info!(document_id = %id, is_public, "Document visibility changed");
        Ok(doc)
    }

    /// Record a conversion of the given document.
    ///
    /// Reserves conversion quota for the owner, then bumps the document's
    /// conversion counter and timestamp. The actual rendering is handled
    /// elsewhere; this only does the accounting.
    pub async fn convert(&self, ctx: &RequestContext, id: DocumentId) -> Result<Document, AppError> {
        let doc = self
            .documents
            .find_by_id(id, Some(ctx.account_id()))
            .await?
            .ok_or_else(|| AppError::not_found("Document not found"))?;

        self.quotas
            .reserve(&ctx.account, CounterKind::Conversion)
            .await?;

        if let Err(e) = self.documents.record_conversion(doc.id).await {
            warn!(document_id = %id, "Conversion bookkeeping failed, releasing quota");
            let _ = self
                .quotas
                .release(&ctx.account, CounterKind::Conversion)
                .await;
            return Err(e);
        }

        info!(document_id = %id, owner_id = %ctx.account_id(), "Conversion recorded");

        self.documents
            .find_by_id(id, Some(ctx.account_id()))
            .await?
            .ok_or_else(|| AppError::not_found("Document not found"))
    }
}

/// Validate a document title.
fn validate_title(title: &str) -> Result<(), AppError> {
    if title.trim().is_empty() {
        return Err(AppError::validation("Title cannot be empty"));
    }
    if title.chars().count() > TITLE_MAX {
        return Err(AppError::validation(format!(
            "Title cannot exceed {TITLE_MAX} characters"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_rules() {
        assert!(validate_title("My document").is_ok());
        assert!(validate_title("   ").is_err());
        assert!(validate_title(&"x".repeat(201)).is_err());
    }
}
