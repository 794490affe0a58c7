//! Create handlers for the records attached to an expert.
//!
//! Each endpoint takes the record body (which names its `expert_id`),
//! validates it, and answers 201 with the stored row.

use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use dossier_core::{
  records::{
    NewCertification, NewEducation, NewProject, NewSkill, NewWorkExperience,
  },
  store::ExpertStore,
};
use validator::Validate as _;

use crate::error::ApiError;

/// `POST /education`
pub async fn create_education<S: ExpertStore>(
  State(store): State<Arc<S>>,
  Json(body): Json<NewEducation>,
) -> Result<impl IntoResponse, ApiError> {
  body.validate()?;
  let row = store
    .create_education(body)
    .await
    .map_err(ApiError::from_store)?;
  Ok((StatusCode::CREATED, Json(row)))
}

/// `POST /work-experience`
pub async fn create_work_experience<S: ExpertStore>(
  State(store): State<Arc<S>>,
  Json(body): Json<NewWorkExperience>,
) -> Result<impl IntoResponse, ApiError> {
  body.validate()?;
  let row = store
    .create_work_experience(body)
    .await
    .map_err(ApiError::from_store)?;
  Ok((StatusCode::CREATED, Json(row)))
}

/// `POST /skills`
pub async fn create_skill<S: ExpertStore>(
  State(store): State<Arc<S>>,
  Json(body): Json<NewSkill>,
) -> Result<impl IntoResponse, ApiError> {
  body.validate()?;
  let row = store.create_skill(body).await.map_err(ApiError::from_store)?;
  Ok((StatusCode::CREATED, Json(row)))
}

/// `POST /certifications`
pub async fn create_certification<S: ExpertStore>(
  State(store): State<Arc<S>>,
  Json(body): Json<NewCertification>,
) -> Result<impl IntoResponse, ApiError> {
  body.validate()?;
  let row = store
    .create_certification(body)
    .await
    .map_err(ApiError::from_store)?;
  Ok((StatusCode::CREATED, Json(row)))
}

/// `POST /projects`
pub async fn create_project<S: ExpertStore>(
  State(store): State<Arc<S>>,
  Json(body): Json<NewProject>,
) -> Result<impl IntoResponse, ApiError> {
  body.validate()?;
  let row = store
    .create_project(body)
    .await
    .map_err(ApiError::from_store)?;
  Ok((StatusCode::CREATED, Json(row)))
}
