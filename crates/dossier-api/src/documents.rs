//! Handlers for document metadata.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `POST`   | `/documents` | Body: [`NewDocument`]; 201 |
//! | `GET`    | `/experts/{id}/documents` | Empty list for unknown experts |
//! | `DELETE` | `/documents/{id}` | Also removes the file on disk, best effort |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use dossier_core::{
  records::{Document, NewDocument},
  store::ExpertStore,
};
use validator::Validate as _;

use crate::error::ApiError;

/// `POST /documents`
pub async fn create<S: ExpertStore>(
  State(store): State<Arc<S>>,
  Json(body): Json<NewDocument>,
) -> Result<impl IntoResponse, ApiError> {
  body.validate()?;
  let doc = store
    .create_document(body)
    .await
    .map_err(ApiError::from_store)?;
  Ok((StatusCode::CREATED, Json(doc)))
}

/// `GET /experts/{id}/documents`
pub async fn list_for_expert<S: ExpertStore>(
  State(store): State<Arc<S>>,
  Path(expert_id): Path<i64>,
) -> Result<Json<Vec<Document>>, ApiError> {
  let docs = store
    .list_documents(expert_id)
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(docs))
}

/// `DELETE /documents/{id}`
pub async fn delete<S: ExpertStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<i64>,
) -> Result<Json<bool>, ApiError> {
  let deleted = store
    .delete_document(id)
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(deleted))
}
