//! Child records owned by an [`Expert`](crate::expert::Expert).
//!
//! Each record is created once and never edited. Only documents can be
//! removed on their own; everything else goes away with its expert.

use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::{
  Error, Result,
  date::to_calendar,
  validate::{GRADUATION_LOOKAHEAD, current_year, year_in_range},
};

// ─── Education ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Education {
  pub id:              i64,
  pub expert_id:       i64,
  /// Free text, e.g. "Bachelor", "Master", "PhD".
  pub level:           String,
  pub major:           String,
  pub institution:     String,
  pub graduation_year: i32,
  pub created_at:      DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_graduation_year"))]
pub struct NewEducation {
  pub expert_id:       i64,
  #[validate(length(min = 1))]
  pub level:           String,
  #[validate(length(min = 1))]
  pub major:           String,
  #[validate(length(min = 1))]
  pub institution:     String,
  pub graduation_year: i32,
}

fn validate_graduation_year(
  input: &NewEducation,
) -> std::result::Result<(), ValidationError> {
  year_in_range(
    "graduation_year",
    input.graduation_year,
    current_year() + GRADUATION_LOOKAHEAD,
  )
}

// ─── Work experience ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkExperience {
  pub id:              i64,
  pub expert_id:       i64,
  pub company_name:    String,
  pub position:        String,
  pub start_date:      DateTime<Utc>,
  /// `None` while the position is still held.
  pub end_date:        Option<DateTime<Utc>>,
  pub job_description: String,
  pub created_at:      DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewWorkExperience {
  pub expert_id:       i64,
  #[validate(length(min = 1))]
  pub company_name:    String,
  #[validate(length(min = 1))]
  pub position:        String,
  pub start_date:      DateTime<Utc>,
  #[serde(default)]
  pub end_date:        Option<DateTime<Utc>>,
  #[validate(length(min = 1))]
  pub job_description: String,
}

impl NewWorkExperience {
  /// A given end date must fall on a later calendar day than the start.
  pub fn check_dates(&self) -> Result<()> {
    if let Some(end) = self.end_date
      && to_calendar(end) <= to_calendar(self.start_date)
    {
      return Err(Error::InvalidDateRange("End date must be after start date"));
    }
    Ok(())
  }
}

// ─── Skills ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProficiencyLevel {
  Beginner,
  Intermediate,
  Advanced,
  Expert,
}

impl ProficiencyLevel {
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Beginner => "beginner",
      Self::Intermediate => "intermediate",
      Self::Advanced => "advanced",
      Self::Expert => "expert",
    }
  }
}

impl FromStr for ProficiencyLevel {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> {
    match s {
      "beginner" => Ok(Self::Beginner),
      "intermediate" => Ok(Self::Intermediate),
      "advanced" => Ok(Self::Advanced),
      "expert" => Ok(Self::Expert),
      other => Err(Error::UnknownVariant {
        kind:  "proficiency level",
        value: other.to_owned(),
      }),
    }
  }
}

impl fmt::Display for ProficiencyLevel {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// A named skill. `(expert_id, skill_name)` is unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
  pub id:                i64,
  pub expert_id:         i64,
  pub skill_name:        String,
  pub proficiency_level: ProficiencyLevel,
  pub created_at:        DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewSkill {
  pub expert_id:         i64,
  #[validate(length(min = 1))]
  pub skill_name:        String,
  pub proficiency_level: ProficiencyLevel,
}

// ─── Certifications ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Certification {
  pub id:                 i64,
  pub expert_id:          i64,
  pub certification_name: String,
  pub issuing_body:       String,
  pub year_obtained:      i32,
  /// `None` for certifications that never lapse.
  pub expiry_date:        Option<DateTime<Utc>>,
  pub created_at:         DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_year_obtained"))]
pub struct NewCertification {
  pub expert_id:          i64,
  #[validate(length(min = 1))]
  pub certification_name: String,
  #[validate(length(min = 1))]
  pub issuing_body:       String,
  pub year_obtained:      i32,
  #[serde(default)]
  pub expiry_date:        Option<DateTime<Utc>>,
}

fn validate_year_obtained(
  input: &NewCertification,
) -> std::result::Result<(), ValidationError> {
  year_in_range("year_obtained", input.year_obtained, current_year())
}

// ─── Projects ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
  pub id:              i64,
  pub expert_id:       i64,
  pub project_name:    String,
  pub role_in_project: String,
  pub start_date:      DateTime<Utc>,
  /// `None` while the project is ongoing.
  pub end_date:        Option<DateTime<Utc>>,
  pub description:     String,
  pub created_at:      DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewProject {
  pub expert_id:       i64,
  #[validate(length(min = 1))]
  pub project_name:    String,
  #[validate(length(min = 1))]
  pub role_in_project: String,
  pub start_date:      DateTime<Utc>,
  #[serde(default)]
  pub end_date:        Option<DateTime<Utc>>,
  #[validate(length(min = 1))]
  pub description:     String,
}

impl NewProject {
  /// A given end date may not precede the start. Same-day projects are fine,
  /// unlike work experience.
  pub fn check_dates(&self) -> Result<()> {
    if let Some(end) = self.end_date
      && to_calendar(end) < to_calendar(self.start_date)
    {
      return Err(Error::InvalidDateRange(
        "End date cannot be before start date",
      ));
    }
    Ok(())
  }
}

// ─── Documents ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentType {
  Cv,
  Certificate,
  Portfolio,
  Other,
}

impl DocumentType {
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Cv => "cv",
      Self::Certificate => "certificate",
      Self::Portfolio => "portfolio",
      Self::Other => "other",
    }
  }
}

impl FromStr for DocumentType {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> {
    match s {
      "cv" => Ok(Self::Cv),
      "certificate" => Ok(Self::Certificate),
      "portfolio" => Ok(Self::Portfolio),
      "other" => Ok(Self::Other),
      other => Err(Error::UnknownVariant {
        kind:  "document type",
        value: other.to_owned(),
      }),
    }
  }
}

impl fmt::Display for DocumentType {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Metadata for an uploaded file. The bytes themselves live at `file_path`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
  pub id:            i64,
  pub expert_id:     i64,
  pub document_name: String,
  pub document_type: DocumentType,
  pub file_path:     String,
  /// Size in bytes.
  pub file_size:     i64,
  pub mime_type:     String,
  pub uploaded_at:   DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewDocument {
  pub expert_id:     i64,
  #[validate(length(min = 1))]
  pub document_name: String,
  pub document_type: DocumentType,
  #[validate(length(min = 1))]
  pub file_path:     String,
  #[validate(range(min = 1))]
  pub file_size:     i64,
  #[validate(length(min = 1))]
  pub mime_type:     String,
}

#[cfg(test)]
mod tests {
  use chrono::TimeZone;

  use super::*;
  use crate::ErrorKind;

  fn day(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
  }

  fn job(start: DateTime<Utc>, end: Option<DateTime<Utc>>) -> NewWorkExperience {
    NewWorkExperience {
      expert_id: 1,
      company_name: "Initech".into(),
      position: "Engineer".into(),
      start_date: start,
      end_date: end,
      job_description: "TPS reports".into(),
    }
  }

  fn project(start: DateTime<Utc>, end: Option<DateTime<Utc>>) -> NewProject {
    NewProject {
      expert_id: 1,
      project_name: "Migration".into(),
      role_in_project: "Lead".into(),
      start_date: start,
      end_date: end,
      description: "Moved everything".into(),
    }
  }

  #[test]
  fn work_experience_requires_strictly_later_end() {
    assert!(job(day(2020, 1, 1), None).check_dates().is_ok());
    assert!(job(day(2020, 1, 1), Some(day(2020, 1, 2))).check_dates().is_ok());

    let err = job(day(2020, 1, 1), Some(day(2020, 1, 1)))
      .check_dates()
      .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvariantViolation);
    assert_eq!(err.to_string(), "End date must be after start date");
  }

  #[test]
  fn work_experience_compares_calendar_days() {
    let start = Utc.with_ymd_and_hms(2020, 1, 1, 8, 0, 0).unwrap();
    let end = Utc.with_ymd_and_hms(2020, 1, 1, 17, 0, 0).unwrap();
    assert!(job(start, Some(end)).check_dates().is_err());
  }

  #[test]
  fn project_allows_same_day_end() {
    assert!(project(day(2020, 1, 1), Some(day(2020, 1, 1))).check_dates().is_ok());

    let err = project(day(2020, 1, 2), Some(day(2020, 1, 1)))
      .check_dates()
      .unwrap_err();
    assert_eq!(err.to_string(), "End date cannot be before start date");
  }

  #[test]
  fn enums_round_trip_through_strings() {
    for level in [
      ProficiencyLevel::Beginner,
      ProficiencyLevel::Intermediate,
      ProficiencyLevel::Advanced,
      ProficiencyLevel::Expert,
    ] {
      assert_eq!(level.as_str().parse::<ProficiencyLevel>().unwrap(), level);
    }
    assert!("guru".parse::<ProficiencyLevel>().is_err());
    assert_eq!("cv".parse::<DocumentType>().unwrap(), DocumentType::Cv);
    assert!("spreadsheet".parse::<DocumentType>().is_err());
  }

  #[test]
  fn graduation_year_bounds() {
    let mut input = NewEducation {
      expert_id:       1,
      level:           "Bachelor".into(),
      major:           "CS".into(),
      institution:     "MIT".into(),
      graduation_year: 2010,
    };
    assert!(input.validate().is_ok());

    input.graduation_year = 1850;
    assert!(input.validate().is_err());

    input.graduation_year = current_year() + GRADUATION_LOOKAHEAD + 1;
    assert!(input.validate().is_err());
  }

  #[test]
  fn certification_year_cannot_be_in_future() {
    let input = NewCertification {
      expert_id:          1,
      certification_name: "CKA".into(),
      issuing_body:       "CNCF".into(),
      year_obtained:      current_year() + 1,
      expiry_date:        None,
    };
    assert!(input.validate().is_err());
  }

  #[test]
  fn document_size_must_be_positive() {
    let input = NewDocument {
      expert_id:     1,
      document_name: "CV".into(),
      document_type: DocumentType::Cv,
      file_path:     "/uploads/cv.pdf".into(),
      file_size:     0,
      mime_type:     "application/pdf".into(),
    };
    let errors = input.validate().unwrap_err();
    assert!(errors.field_errors().contains_key("file_size"));
  }
}
