//! JSON REST API for Dossier.
//!
//! Exposes an axum [`Router`] backed by any [`dossier_core::store::ExpertStore`].
//! Auth, TLS, and transport concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .merge(dossier_api::api_router(store.clone()))
//! ```

pub mod documents;
pub mod error;
pub mod experts;
pub mod export;
pub mod health;
pub mod records;

use std::sync::Arc;

use axum::{
  Router,
  routing::{delete, get, post},
};
use dossier_core::store::ExpertStore;

pub use error::ApiError;

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: ExpertStore + 'static,
{
  Router::new()
    .route("/healthcheck", get(health::handler))
    // Experts
    .route("/experts", get(experts::list::<S>).post(experts::create::<S>))
    .route("/experts/search", post(experts::search::<S>))
    .route(
      "/experts/{id}",
      get(experts::get_one::<S>)
        .patch(experts::update::<S>)
        .delete(experts::delete::<S>),
    )
    .route("/experts/{id}/profile", get(experts::profile::<S>))
    .route("/experts/{id}/documents", get(documents::list_for_expert::<S>))
    .route("/experts/{id}/export", get(export::handler::<S>))
    // Records
    .route("/education", post(records::create_education::<S>))
    .route("/work-experience", post(records::create_work_experience::<S>))
    .route("/skills", post(records::create_skill::<S>))
    .route("/certifications", post(records::create_certification::<S>))
    .route("/projects", post(records::create_project::<S>))
    // Documents
    .route("/documents", post(documents::create::<S>))
    .route("/documents/{id}", delete(documents::delete::<S>))
    .with_state(store)
}
