//! The `ExpertStore` trait.
//!
//! The trait is implemented by storage backends (e.g. `dossier-store-sqlite`).
//! Higher layers (`dossier-api`, the export formatter) depend on this
//! abstraction, not on any concrete backend.

use std::future::Future;

use crate::{
  expert::{Expert, ExpertPatch, NewExpert},
  profile::ExpertProfile,
  records::{
    Certification, Document, Education, NewCertification, NewDocument,
    NewEducation, NewProject, NewSkill, NewWorkExperience, Project, Skill,
    WorkExperience,
  },
  search::SearchQuery,
};

/// Backend errors that may wrap a domain [`crate::Error`].
pub trait StoreError: std::error::Error + Send + Sync + 'static {
  /// The domain error behind this failure, if it is one. `None` means an
  /// opaque dependency failure (I/O, database, decoding).
  fn domain(&self) -> Option<&crate::Error>;
}

/// Abstraction over an expert registry backend.
///
/// Every create operation checks that the owning expert exists before it
/// writes, and every rule check happens before the write: a failed call
/// leaves no partial state behind.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait ExpertStore: Send + Sync {
  type Error: StoreError;

  // ── Experts ───────────────────────────────────────────────────────────

  fn create_expert(
    &self,
    input: NewExpert,
  ) -> impl Future<Output = Result<Expert, Self::Error>> + Send + '_;

  /// All experts, in insertion order.
  fn list_experts(
    &self,
  ) -> impl Future<Output = Result<Vec<Expert>, Self::Error>> + Send + '_;

  /// Returns `None` if not found.
  fn get_expert(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<Expert>, Self::Error>> + Send + '_;

  /// Apply the fields set in `patch` and bump `updated_at`. An empty patch
  /// writes nothing and returns the row as it is. Returns `None` if the
  /// expert does not exist.
  fn update_expert(
    &self,
    id: i64,
    patch: ExpertPatch,
  ) -> impl Future<Output = Result<Option<Expert>, Self::Error>> + Send + '_;

  /// Delete an expert and, by cascade, every child row. Returns `false` if
  /// there was nothing to delete.
  fn delete_expert(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  /// Experts matching every predicate of `query`, newest first, paginated.
  fn search_experts<'a>(
    &'a self,
    query: &'a SearchQuery,
  ) -> impl Future<Output = Result<Vec<Expert>, Self::Error>> + Send + 'a;

  /// Materialise the [`ExpertProfile`] for an expert. Returns `None` if the
  /// expert does not exist.
  fn get_profile(
    &self,
    expert_id: i64,
  ) -> impl Future<Output = Result<Option<ExpertProfile>, Self::Error>> + Send + '_;

  // ── Child records ─────────────────────────────────────────────────────

  fn create_education(
    &self,
    input: NewEducation,
  ) -> impl Future<Output = Result<Education, Self::Error>> + Send + '_;

  /// Fails with [`crate::Error::InvalidDateRange`] unless the end date (if
  /// any) is strictly after the start date.
  fn create_work_experience(
    &self,
    input: NewWorkExperience,
  ) -> impl Future<Output = Result<WorkExperience, Self::Error>> + Send + '_;

  /// Fails with [`crate::Error::DuplicateSkill`] if the expert already has a
  /// skill with the same name.
  fn create_skill(
    &self,
    input: NewSkill,
  ) -> impl Future<Output = Result<Skill, Self::Error>> + Send + '_;

  fn create_certification(
    &self,
    input: NewCertification,
  ) -> impl Future<Output = Result<Certification, Self::Error>> + Send + '_;

  /// Fails with [`crate::Error::InvalidDateRange`] if the end date (if any)
  /// precedes the start date.
  fn create_project(
    &self,
    input: NewProject,
  ) -> impl Future<Output = Result<Project, Self::Error>> + Send + '_;

  fn create_document(
    &self,
    input: NewDocument,
  ) -> impl Future<Output = Result<Document, Self::Error>> + Send + '_;

  fn list_documents(
    &self,
    expert_id: i64,
  ) -> impl Future<Output = Result<Vec<Document>, Self::Error>> + Send + '_;

  /// Delete a document row, then make a best-effort attempt to remove its
  /// backing file. Returns `false` if no such document existed.
  fn delete_document(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;
}
