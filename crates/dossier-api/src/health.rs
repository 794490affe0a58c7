//! Handler for `GET /healthcheck`.

use axum::Json;
use chrono::{SecondsFormat, Utc};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct Health {
  pub status:    &'static str,
  pub timestamp: String,
}

pub async fn handler() -> Json<Health> {
  Json(Health {
    status:    "ok",
    timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
  })
}
