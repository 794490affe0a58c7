//! The profile aggregate: an expert plus every child collection.

use serde::{Deserialize, Serialize};

use crate::{
  expert::Expert,
  records::{Certification, Document, Education, Project, Skill, WorkExperience},
};

/// The computed read model for an expert. Never stored, always derived.
///
/// Collections keep the order the store yields them in; an expert with no
/// rows of some kind gets an empty `Vec`, never a missing field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpertProfile {
  pub expert:          Expert,
  pub education:       Vec<Education>,
  pub work_experience: Vec<WorkExperience>,
  pub skills:          Vec<Skill>,
  pub certifications:  Vec<Certification>,
  pub projects:        Vec<Project>,
  pub documents:       Vec<Document>,
}
