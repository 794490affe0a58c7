//! Multi-criteria expert search.
//!
//! A [`SearchQuery`] is turned into a flat list of [`Predicate`]s. Every
//! predicate must hold for an expert to match; each one is an existence test
//! against the expert row or one of its child collections, so a backend can
//! render them independently and join them with `AND`.

use serde::{Deserialize, Serialize};
use validator::Validate;

pub const DEFAULT_LIMIT: u32 = 20;

fn default_limit() -> u32 { DEFAULT_LIMIT }

/// Parameters for [`crate::store::ExpertStore::search_experts`].
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SearchQuery {
  /// Case-insensitive substring over the name, skills, education and work
  /// history. Any single hit qualifies the expert.
  #[serde(default)]
  pub search_term:          Option<String>,
  /// Every entry must match at least one of the expert's skills.
  #[serde(default)]
  pub skills:               Vec<String>,
  /// Substring of any education `level`.
  #[serde(default)]
  pub education_level:      Option<String>,
  /// Some job started at least this many years before the current year.
  #[serde(default)]
  pub experience_years_min: Option<u32>,
  /// Some job started at most this many years before the current year.
  #[serde(default)]
  pub experience_years_max: Option<u32>,
  #[serde(default = "default_limit")]
  #[validate(range(min = 1))]
  pub limit:                u32,
  #[serde(default)]
  pub offset:               u32,
}

impl Default for SearchQuery {
  fn default() -> Self {
    Self {
      search_term:          None,
      skills:               Vec::new(),
      education_level:      None,
      experience_years_min: None,
      experience_years_max: None,
      limit:                DEFAULT_LIMIT,
      offset:               0,
    }
  }
}

/// One independent condition an expert must satisfy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
  /// Substring hit on the full name, any skill name, any education level,
  /// major or institution, or any company, position or job description.
  Text(String),
  /// Some skill name contains the substring.
  Skill(String),
  /// Some education level contains the substring.
  EducationLevel(String),
  /// Some job started in this year or earlier.
  StartedNoLaterThan(i32),
  /// Some job started in this year or later.
  StartedNoEarlierThan(i32),
}

impl SearchQuery {
  /// Build the predicate list, anchoring experience bounds to `current_year`.
  ///
  /// Empty strings and an empty skill list impose no constraint.
  pub fn predicates(&self, current_year: i32) -> Vec<Predicate> {
    let mut preds = Vec::new();

    if let Some(term) = self.search_term.as_deref().filter(|t| !t.is_empty()) {
      preds.push(Predicate::Text(term.to_owned()));
    }

    preds.extend(self.skills.iter().cloned().map(Predicate::Skill));

    if let Some(level) = self.education_level.as_deref().filter(|l| !l.is_empty())
    {
      preds.push(Predicate::EducationLevel(level.to_owned()));
    }

    if let Some(min) = self.experience_years_min {
      preds.push(Predicate::StartedNoLaterThan(years_before(current_year, min)));
    }
    if let Some(max) = self.experience_years_max {
      preds.push(Predicate::StartedNoEarlierThan(years_before(current_year, max)));
    }

    preds
  }
}

fn years_before(current_year: i32, years: u32) -> i32 {
  current_year.saturating_sub(i32::try_from(years).unwrap_or(i32::MAX))
}
