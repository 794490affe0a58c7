//! Handlers for `/experts` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `POST`   | `/experts` | Body: [`NewExpert`]; 201 |
//! | `GET`    | `/experts` | Ascending id |
//! | `GET`    | `/experts/{id}` | `null` if not found |
//! | `GET`    | `/experts/{id}/profile` | `null` if not found |
//! | `PATCH`  | `/experts/{id}` | Body: [`ExpertPatch`]; `null` if not found |
//! | `DELETE` | `/experts/{id}` | `true` if something was deleted |
//! | `POST`   | `/experts/search` | Body: [`SearchQuery`] |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use dossier_core::{
  expert::{Expert, ExpertPatch, NewExpert},
  profile::ExpertProfile,
  search::SearchQuery,
  store::ExpertStore,
};
use validator::Validate as _;

use crate::error::ApiError;

// ─── Create / list ────────────────────────────────────────────────────────────

/// `POST /experts`
pub async fn create<S: ExpertStore>(
  State(store): State<Arc<S>>,
  Json(body): Json<NewExpert>,
) -> Result<impl IntoResponse, ApiError> {
  body.validate()?;
  let expert = store
    .create_expert(body)
    .await
    .map_err(ApiError::from_store)?;
  Ok((StatusCode::CREATED, Json(expert)))
}

/// `GET /experts`
pub async fn list<S: ExpertStore>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<Expert>>, ApiError> {
  let experts = store.list_experts().await.map_err(ApiError::from_store)?;
  Ok(Json(experts))
}

// ─── Single expert ────────────────────────────────────────────────────────────

/// `GET /experts/{id}`
pub async fn get_one<S: ExpertStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<i64>,
) -> Result<Json<Option<Expert>>, ApiError> {
  let expert = store.get_expert(id).await.map_err(ApiError::from_store)?;
  Ok(Json(expert))
}

/// `GET /experts/{id}/profile`
pub async fn profile<S: ExpertStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<i64>,
) -> Result<Json<Option<ExpertProfile>>, ApiError> {
  let profile = store.get_profile(id).await.map_err(ApiError::from_store)?;
  Ok(Json(profile))
}

/// `PATCH /experts/{id}`
pub async fn update<S: ExpertStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<i64>,
  Json(patch): Json<ExpertPatch>,
) -> Result<Json<Option<Expert>>, ApiError> {
  patch.validate()?;
  let expert = store
    .update_expert(id, patch)
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(expert))
}

/// `DELETE /experts/{id}`
pub async fn delete<S: ExpertStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<i64>,
) -> Result<Json<bool>, ApiError> {
  let deleted = store.delete_expert(id).await.map_err(ApiError::from_store)?;
  Ok(Json(deleted))
}

// ─── Search ───────────────────────────────────────────────────────────────────

/// `POST /experts/search`
pub async fn search<S: ExpertStore>(
  State(store): State<Arc<S>>,
  Json(query): Json<SearchQuery>,
) -> Result<Json<Vec<Expert>>, ApiError> {
  query.validate()?;
  let experts = store
    .search_experts(&query)
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(experts))
}
