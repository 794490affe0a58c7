//! Error types for `dossier-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("Expert with id {0} not found")]
  ExpertNotFound(i64),

  #[error("Skill \"{skill_name}\" already exists for expert {expert_id}")]
  DuplicateSkill {
    expert_id:  i64,
    skill_name: String,
  },

  #[error("{0}")]
  InvalidDateRange(&'static str),

  #[error("unknown {kind} value: {value:?}")]
  UnknownVariant {
    kind:  &'static str,
    value: String,
  },
}

/// Coarse classification of a domain [`Error`], used by transport layers to
/// pick a response status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
  /// A referenced record does not exist.
  NotFound,
  /// The write would violate a uniqueness rule.
  Conflict,
  /// The input breaks a cross-field rule (e.g. date ordering).
  InvariantViolation,
  /// A value could not be interpreted at all.
  Invalid,
}

impl Error {
  pub fn kind(&self) -> ErrorKind {
    match self {
      Self::ExpertNotFound(_) => ErrorKind::NotFound,
      Self::DuplicateSkill { .. } => ErrorKind::Conflict,
      Self::InvalidDateRange(_) => ErrorKind::InvariantViolation,
      Self::UnknownVariant { .. } => ErrorKind::Invalid,
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
