//! Handler for `GET /experts/{id}/export?format=json|pdf`.

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, Query, State},
  http::header,
  response::{IntoResponse, Response},
};
use dossier_core::{
  export::{Export, ExportFormat, export},
  store::ExpertStore,
};
use serde::Deserialize;

use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct ExportParams {
  pub format: ExportFormat,
}

pub async fn handler<S: ExpertStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<i64>,
  Query(params): Query<ExportParams>,
) -> Result<Response, ApiError> {
  let rendered = export(store.as_ref(), id, params.format)
    .await
    .map_err(ApiError::from_store)?;

  Ok(match rendered {
    None => Json(None::<()>).into_response(),
    Some(Export::Profile(profile)) => Json(profile).into_response(),
    Some(Export::Report(bytes)) => (
      [
        (header::CONTENT_TYPE, "application/pdf".to_owned()),
        (
          header::CONTENT_DISPOSITION,
          format!("attachment; filename=\"expert-{id}.pdf\""),
        ),
      ],
      bytes,
    )
      .into_response(),
  })
}
