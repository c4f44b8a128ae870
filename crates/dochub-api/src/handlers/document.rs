//! Document handlers — CRUD, sharing, conversion.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;

use dochub_core::types::DocumentId;
use dochub_core::types::pagination::{PageRequest, PageResponse};
use dochub_entity::document::Document;
use dochub_entity::document::model::{DocumentUpdate, NewDocument};

use crate::dto::request::{
    CreateDocumentRequest, ListDocumentsQuery, ShareRequest, UpdateDocumentRequest,
};
use crate::dto::response::{ApiResponse, ConvertResponse, MessageResponse};
use crate::error::ApiError;
use crate::extractors::AuthAccount;
use crate::state::AppState;

/// POST /api/documents
pub async fn create_document(
    State(state): State<AppState>,
    auth: AuthAccount,
    Json(req): Json<CreateDocumentRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Document>>), ApiError> {
    let doc = state
        .document_service
        .create(
            auth.context(),
            NewDocument {
                title: req.title,
                content: req.content,
                description: req.description,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(doc))))
}

/// GET /api/documents
pub async fn list_documents(
    State(state): State<AppState>,
    auth: AuthAccount,
    Query(query): Query<ListDocumentsQuery>,
) -> Result<Json<ApiResponse<PageResponse<Document>>>, ApiError> {
    let page = PageRequest::new(query.page, query.page_size);
    let docs = state
        .document_service
        .list_mine(auth.context(), query.search.as_deref(), &page)
        .await?;
    Ok(Json(ApiResponse::ok(docs)))
}

/// GET /api/documents/public
pub async fn list_public_documents(
    State(state): State<AppState>,
    Query(query): Query<ListDocumentsQuery>,
) -> Result<Json<ApiResponse<PageResponse<Document>>>, ApiError> {
    let page = PageRequest::new(query.page, query.page_size);
    let docs = state.document_service.list_public(&page).await?;
    Ok(Json(ApiResponse::ok(docs)))
}

/// GET /api/documents/{id}
pub async fn get_document(
    State(state): State<AppState>,
    auth: AuthAccount,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<Document>>, ApiError> {
    let doc = state
        .document_service
        .get(auth.context(), DocumentId::from_raw(id))
        .await?;
    Ok(Json(ApiResponse::ok(doc)))
}

/// PUT /api/documents/{id}
pub async fn update_document(
    State(state): State<AppState>,
    auth: AuthAccount,
    Path(id): Path<i64>,
    Json(req): Json<UpdateDocumentRequest>,
) -> Result<Json<ApiResponse<Document>>, ApiError> {
    let doc = state
        .document_service
        .update(
            auth.context(),
            DocumentId::from_raw(id),
            DocumentUpdate {
                title: req.title,
                content: req.content,
                description: req.description,
            },
        )
        .await?;
    Ok(Json(ApiResponse::ok(doc)))
}

/// DELETE /api/documents/{id}
pub async fn delete_document(
    State(state): State<AppState>,
    auth: AuthAccount,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state
        .document_service
        .delete(auth.context(), DocumentId::from_raw(id))
        .await?;
    Ok(Json(ApiResponse::ok(MessageResponse {
        message: "Document deleted".to_string(),
    })))
}

/// POST /api/documents/{id}/convert
pub async fn convert_document(
    State(state): State<AppState>,
    auth: AuthAccount,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<ConvertResponse>>, ApiError> {
    let doc = state
        .document_service
        .convert(auth.context(), DocumentId::from_raw(id))
        .await?;
    Ok(Json(ApiResponse::ok(ConvertResponse {
        message: "Document converted".to_string(),
        document_id: doc.id.into_inner(),
        download_url: format!("/api/documents/{}/download", doc.id),
    })))
}

/// GET /api/documents/{id}/download
///
/// Rendering is not implemented; this endpoint only acknowledges the
/// request so clients have a stable URL to poll once it is.
pub async fn download_document(
    State(state): State<AppState>,
    auth: AuthAccount,
    Path(id): Path<i64>,
) -> Result<(StatusCode, Json<ApiResponse<MessageResponse>>), ApiError> {
    let doc = state
        .document_service
        .get(auth.context(), DocumentId::from_raw(id))
        .await?;
    Ok((
        StatusCode::NOT_IMPLEMENTED,
        Json(ApiResponse::ok(MessageResponse {
            message: format!("PDF download for '{}' is not yet available", doc.title),
        })),
    ))
}

/// POST /api/documents/{id}/share (premium)
pub async fn share_document(
    State(state): State<AppState>,
    auth: AuthAccount,
    Path(id): Path<i64>,
    Json(req): Json<ShareRequest>,
) -> Result<Json<ApiResponse<Document>>, ApiError> {
    let doc = state
        .document_service
        .set_public(auth.context(), DocumentId::from_raw(id), req.is_public)
        .await?;
    Ok(Json(ApiResponse::ok(doc)))
}
