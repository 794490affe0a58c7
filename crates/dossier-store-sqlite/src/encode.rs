//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings with fixed microsecond precision,
//! so lexical order matches chronological order. Day-precision dates are
//! stored as `YYYY-MM-DD`. Enumerations are stored as their lowercase names.

use chrono::{DateTime, NaiveDate, SecondsFormat, SubsecRound, Utc};
use dossier_core::{
  date::{to_boundary, to_calendar},
  expert::Expert,
  records::{
    Certification, Document, DocumentType, Education, ProficiencyLevel,
    Project, Skill, WorkExperience,
  },
};
use rusqlite::Row;

use crate::{Error, Result};

// ─── Timestamps ──────────────────────────────────────────────────────────────

/// The current time, truncated to what the store can represent.
pub fn now() -> DateTime<Utc> { Utc::now().trunc_subsecs(6) }

pub fn encode_ts(dt: DateTime<Utc>) -> String {
  dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub fn decode_ts(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::Decode(format!("timestamp {s:?}: {e}")))
}

// ─── Calendar dates ──────────────────────────────────────────────────────────

const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn encode_date(dt: DateTime<Utc>) -> String {
  to_calendar(dt).format(DATE_FORMAT).to_string()
}

pub fn decode_date(s: &str) -> Result<DateTime<Utc>> {
  NaiveDate::parse_from_str(s, DATE_FORMAT)
    .map(to_boundary)
    .map_err(|e| Error::Decode(format!("date {s:?}: {e}")))
}

fn decode_opt_date(s: Option<&str>) -> Result<Option<DateTime<Utc>>> {
  s.map(decode_date).transpose()
}

// ─── Enumerations ────────────────────────────────────────────────────────────

fn decode_proficiency(s: &str) -> Result<ProficiencyLevel> {
  s.parse().map_err(|e: dossier_core::Error| Error::Decode(e.to_string()))
}

fn decode_document_type(s: &str) -> Result<DocumentType> {
  s.parse().map_err(|e: dossier_core::Error| Error::Decode(e.to_string()))
}

// ─── Row types ───────────────────────────────────────────────────────────────
//
// Each `Raw*` struct holds the columns exactly as SQLite returns them; the
// matching `*_COLUMNS` constant lists them in `from_row` order.

pub const EXPERT_COLUMNS: &str = "id, full_name, place_of_birth, date_of_birth, \
   address, email, phone_number, created_at, updated_at";

pub struct RawExpert {
  pub id:             i64,
  pub full_name:      String,
  pub place_of_birth: String,
  pub date_of_birth:  String,
  pub address:        String,
  pub email:          String,
  pub phone_number:   String,
  pub created_at:     String,
  pub updated_at:     String,
}

impl RawExpert {
  pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:             row.get(0)?,
      full_name:      row.get(1)?,
      place_of_birth: row.get(2)?,
      date_of_birth:  row.get(3)?,
      address:        row.get(4)?,
      email:          row.get(5)?,
      phone_number:   row.get(6)?,
      created_at:     row.get(7)?,
      updated_at:     row.get(8)?,
    })
  }

  pub fn into_expert(self) -> Result<Expert> {
    Ok(Expert {
      id:             self.id,
      full_name:      self.full_name,
      place_of_birth: self.place_of_birth,
      date_of_birth:  decode_date(&self.date_of_birth)?,
      address:        self.address,
      email:          self.email,
      phone_number:   self.phone_number,
      created_at:     decode_ts(&self.created_at)?,
      updated_at:     decode_ts(&self.updated_at)?,
    })
  }
}

pub const EDUCATION_COLUMNS: &str =
  "id, expert_id, level, major, institution, graduation_year, created_at";

pub struct RawEducation {
  pub id:              i64,
  pub expert_id:       i64,
  pub level:           String,
  pub major:           String,
  pub institution:     String,
  pub graduation_year: i32,
  pub created_at:      String,
}

impl RawEducation {
  pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:              row.get(0)?,
      expert_id:       row.get(1)?,
      level:           row.get(2)?,
      major:           row.get(3)?,
      institution:     row.get(4)?,
      graduation_year: row.get(5)?,
      created_at:      row.get(6)?,
    })
  }

  pub fn into_education(self) -> Result<Education> {
    Ok(Education {
      id:              self.id,
      expert_id:       self.expert_id,
      level:           self.level,
      major:           self.major,
      institution:     self.institution,
      graduation_year: self.graduation_year,
      created_at:      decode_ts(&self.created_at)?,
    })
  }
}

pub const WORK_EXPERIENCE_COLUMNS: &str = "id, expert_id, company_name, position, \
   start_date, end_date, job_description, created_at";

pub struct RawWorkExperience {
  pub id:              i64,
  pub expert_id:       i64,
  pub company_name:    String,
  pub position:        String,
  pub start_date:      String,
  pub end_date:        Option<String>,
  pub job_description: String,
  pub created_at:      String,
}

impl RawWorkExperience {
  pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:              row.get(0)?,
      expert_id:       row.get(1)?,
      company_name:    row.get(2)?,
      position:        row.get(3)?,
      start_date:      row.get(4)?,
      end_date:        row.get(5)?,
      job_description: row.get(6)?,
      created_at:      row.get(7)?,
    })
  }

  pub fn into_work_experience(self) -> Result<WorkExperience> {
    Ok(WorkExperience {
      id:              self.id,
      expert_id:       self.expert_id,
      company_name:    self.company_name,
      position:        self.position,
      start_date:      decode_date(&self.start_date)?,
      end_date:        decode_opt_date(self.end_date.as_deref())?,
      job_description: self.job_description,
      created_at:      decode_ts(&self.created_at)?,
    })
  }
}

pub const SKILL_COLUMNS: &str =
  "id, expert_id, skill_name, proficiency_level, created_at";

pub struct RawSkill {
  pub id:                i64,
  pub expert_id:         i64,
  pub skill_name:        String,
  pub proficiency_level: String,
  pub created_at:        String,
}

impl RawSkill {
  pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:                row.get(0)?,
      expert_id:         row.get(1)?,
      skill_name:        row.get(2)?,
      proficiency_level: row.get(3)?,
      created_at:        row.get(4)?,
    })
  }

  pub fn into_skill(self) -> Result<Skill> {
    Ok(Skill {
      id:                self.id,
      expert_id:         self.expert_id,
      skill_name:        self.skill_name,
      proficiency_level: decode_proficiency(&self.proficiency_level)?,
      created_at:        decode_ts(&self.created_at)?,
    })
  }
}

pub const CERTIFICATION_COLUMNS: &str = "id, expert_id, certification_name, \
   issuing_body, year_obtained, expiry_date, created_at";

pub struct RawCertification {
  pub id:                 i64,
  pub expert_id:          i64,
  pub certification_name: String,
  pub issuing_body:       String,
  pub year_obtained:      i32,
  pub expiry_date:        Option<String>,
  pub created_at:         String,
}

impl RawCertification {
  pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:                 row.get(0)?,
      expert_id:          row.get(1)?,
      certification_name: row.get(2)?,
      issuing_body:       row.get(3)?,
      year_obtained:      row.get(4)?,
      expiry_date:        row.get(5)?,
      created_at:         row.get(6)?,
    })
  }

  pub fn into_certification(self) -> Result<Certification> {
    Ok(Certification {
      id:                 self.id,
      expert_id:          self.expert_id,
      certification_name: self.certification_name,
      issuing_body:       self.issuing_body,
      year_obtained:      self.year_obtained,
      expiry_date:        decode_opt_date(self.expiry_date.as_deref())?,
      created_at:         decode_ts(&self.created_at)?,
    })
  }
}

pub const PROJECT_COLUMNS: &str = "id, expert_id, project_name, role_in_project, \
   start_date, end_date, description, created_at";

pub struct RawProject {
  pub id:              i64,
  pub expert_id:       i64,
  pub project_name:    String,
  pub role_in_project: String,
  pub start_date:      String,
  pub end_date:        Option<String>,
  pub description:     String,
  pub created_at:      String,
}

impl RawProject {
  pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:              row.get(0)?,
      expert_id:       row.get(1)?,
      project_name:    row.get(2)?,
      role_in_project: row.get(3)?,
      start_date:      row.get(4)?,
      end_date:        row.get(5)?,
      description:     row.get(6)?,
      created_at:      row.get(7)?,
    })
  }

  pub fn into_project(self) -> Result<Project> {
    Ok(Project {
      id:              self.id,
      expert_id:       self.expert_id,
      project_name:    self.project_name,
      role_in_project: self.role_in_project,
      start_date:      decode_date(&self.start_date)?,
      end_date:        decode_opt_date(self.end_date.as_deref())?,
      description:     self.description,
      created_at:      decode_ts(&self.created_at)?,
    })
  }
}

pub const DOCUMENT_COLUMNS: &str = "id, expert_id, document_name, document_type, \
   file_path, file_size, mime_type, uploaded_at";

pub struct RawDocument {
  pub id:            i64,
  pub expert_id:     i64,
  pub document_name: String,
  pub document_type: String,
  pub file_path:     String,
  pub file_size:     i64,
  pub mime_type:     String,
  pub uploaded_at:   String,
}

impl RawDocument {
  pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:            row.get(0)?,
      expert_id:     row.get(1)?,
      document_name: row.get(2)?,
      document_type: row.get(3)?,
      file_path:     row.get(4)?,
      file_size:     row.get(5)?,
      mime_type:     row.get(6)?,
      uploaded_at:   row.get(7)?,
    })
  }

  pub fn into_document(self) -> Result<Document> {
    Ok(Document {
      id:            self.id,
      expert_id:     self.expert_id,
      document_name: self.document_name,
      document_type: decode_document_type(&self.document_type)?,
      file_path:     self.file_path,
      file_size:     self.file_size,
      mime_type:     self.mime_type,
      uploaded_at:   decode_ts(&self.uploaded_at)?,
    })
  }
}
