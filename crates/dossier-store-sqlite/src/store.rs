//! [`SqliteStore`]: the SQLite implementation of [`ExpertStore`].

use std::{io, path::Path};

use chrono::{Datelike as _, Utc};
use rusqlite::{
  Connection, OptionalExtension as _, TransactionBehavior, types::Value,
};

use dossier_core::{
  expert::{Expert, ExpertPatch, FieldUpdate, NewExpert},
  profile::ExpertProfile,
  records::{
    Certification, Document, Education, NewCertification, NewDocument,
    NewEducation, NewProject, NewSkill, NewWorkExperience, Project, Skill,
    WorkExperience,
  },
  search::SearchQuery,
  store::ExpertStore,
};

use crate::{
  Error, Result,
  encode::{
    CERTIFICATION_COLUMNS, DOCUMENT_COLUMNS, EDUCATION_COLUMNS, EXPERT_COLUMNS,
    PROJECT_COLUMNS, RawCertification, RawDocument, RawEducation, RawExpert,
    RawProject, RawSkill, RawWorkExperience, SKILL_COLUMNS,
    WORK_EXPERIENCE_COLUMNS, encode_date, encode_ts, now,
  },
  schema::SCHEMA,
  search::{Filter, register_fold},
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// An expert registry backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store. Useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        register_fold(conn)?;
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Run `insert` for a child of `expert_id` inside one immediate
  /// transaction, after confirming the expert exists. Either rule check or
  /// `insert` itself may reject with a domain error; nothing is written then.
  async fn guarded_insert<R, F>(&self, expert_id: i64, insert: F) -> Result<R>
  where
    R: Send + 'static,
    F: FnOnce(&Connection) -> rusqlite::Result<Guarded<R>> + Send + 'static,
  {
    let outcome = self
      .conn
      .call(move |conn| {
        let tx =
          conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        let outcome = if expert_exists(&tx, expert_id)? {
          insert(&tx)?
        } else {
          Guarded::Rejected(dossier_core::Error::ExpertNotFound(expert_id))
        };
        match outcome {
          Guarded::Done(_) => tx.commit()?,
          Guarded::Rejected(_) => tx.rollback()?,
        }
        Ok(outcome)
      })
      .await?;

    match outcome {
      Guarded::Done(r) => Ok(r),
      Guarded::Rejected(e) => Err(e.into()),
    }
  }

  // ── Per-expert child collections ──────────────────────────────────────────

  pub async fn list_education(&self, expert_id: i64) -> Result<Vec<Education>> {
    let raws: Vec<RawEducation> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {EDUCATION_COLUMNS} FROM education WHERE expert_id = ?1"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![expert_id], RawEducation::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawEducation::into_education).collect()
  }

  pub async fn list_work_experience(
    &self,
    expert_id: i64,
  ) -> Result<Vec<WorkExperience>> {
    let raws: Vec<RawWorkExperience> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {WORK_EXPERIENCE_COLUMNS} FROM work_experience WHERE expert_id = ?1"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![expert_id], RawWorkExperience::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws
      .into_iter()
      .map(RawWorkExperience::into_work_experience)
      .collect()
  }

  pub async fn list_skills(&self, expert_id: i64) -> Result<Vec<Skill>> {
    let raws: Vec<RawSkill> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {SKILL_COLUMNS} FROM skills WHERE expert_id = ?1"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![expert_id], RawSkill::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawSkill::into_skill).collect()
  }

  pub async fn list_certifications(
    &self,
    expert_id: i64,
  ) -> Result<Vec<Certification>> {
    let raws: Vec<RawCertification> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {CERTIFICATION_COLUMNS} FROM certifications WHERE expert_id = ?1"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![expert_id], RawCertification::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws
      .into_iter()
      .map(RawCertification::into_certification)
      .collect()
  }

  pub async fn list_projects(&self, expert_id: i64) -> Result<Vec<Project>> {
    let raws: Vec<RawProject> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {PROJECT_COLUMNS} FROM projects WHERE expert_id = ?1"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![expert_id], RawProject::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawProject::into_project).collect()
  }
}

/// Best-effort removal of a document's file. The row is already gone, so a
/// failure here is logged and swallowed.
async fn remove_backing_file(path: &str) {
  match tokio::fs::remove_file(path).await {
    Ok(()) => tracing::debug!(path, "removed document file"),
    Err(e) if e.kind() == io::ErrorKind::NotFound => {
      tracing::debug!(path, "document file already absent");
    }
    Err(e) => tracing::warn!(path, error = %e, "failed to remove document file"),
  }
}

/// Outcome of a write whose domain checks run on the connection thread.
enum Guarded<T> {
  Done(T),
  Rejected(dossier_core::Error),
}

fn expert_exists(conn: &Connection, id: i64) -> rusqlite::Result<bool> {
  Ok(
    conn
      .query_row(
        "SELECT 1 FROM experts WHERE id = ?1",
        rusqlite::params![id],
        |_| Ok(true),
      )
      .optional()?
      .unwrap_or(false),
  )
}

fn skill_exists(
  conn: &Connection,
  expert_id: i64,
  skill_name: &str,
) -> rusqlite::Result<bool> {
  Ok(
    conn
      .query_row(
        "SELECT 1 FROM skills WHERE expert_id = ?1 AND skill_name = ?2",
        rusqlite::params![expert_id, skill_name],
        |_| Ok(true),
      )
      .optional()?
      .unwrap_or(false),
  )
}

// ─── ExpertStore impl ────────────────────────────────────────────────────────

impl ExpertStore for SqliteStore {
  type Error = Error;

  // ── Experts ───────────────────────────────────────────────────────────────

  async fn create_expert(&self, input: NewExpert) -> Result<Expert> {
    let at = now();

    let NewExpert {
      full_name,
      place_of_birth,
      date_of_birth,
      address,
      email,
      phone_number,
    } = input;
    let dob_str = encode_date(date_of_birth);
    let at_str  = encode_ts(at);

    let raw: RawExpert = self
      .conn
      .call(move |conn| {
        Ok(conn.query_row(
          &format!(
            "INSERT INTO experts (
               full_name, place_of_birth, date_of_birth, address,
               email, phone_number, created_at, updated_at
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?7)
             RETURNING {EXPERT_COLUMNS}"
          ),
          rusqlite::params![
            full_name,
            place_of_birth,
            dob_str,
            address,
            email,
            phone_number,
            at_str,
          ],
          RawExpert::from_row,
        )?)
      })
      .await?;

    let expert = raw.into_expert()?;
    tracing::debug!(expert_id = expert.id, "created expert");
    Ok(expert)
  }

  async fn list_experts(&self) -> Result<Vec<Expert>> {
    let raws: Vec<RawExpert> = self
      .conn
      .call(|conn| {
        let mut stmt = conn
          .prepare(&format!("SELECT {EXPERT_COLUMNS} FROM experts ORDER BY id"))?;
        let rows = stmt
          .query_map([], RawExpert::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawExpert::into_expert).collect()
  }

  async fn get_expert(&self, id: i64) -> Result<Option<Expert>> {
    let raw: Option<RawExpert> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {EXPERT_COLUMNS} FROM experts WHERE id = ?1"),
              rusqlite::params![id],
              RawExpert::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawExpert::into_expert).transpose()
  }

  async fn update_expert(
    &self,
    id:    i64,
    patch: ExpertPatch,
  ) -> Result<Option<Expert>> {
    if patch.is_empty() {
      return self.get_expert(id).await;
    }

    let ExpertPatch {
      full_name,
      place_of_birth,
      date_of_birth,
      address,
      email,
      phone_number,
    } = patch;

    let mut sets: Vec<(&'static str, Value)> = Vec::new();
    let text_fields = [
      ("full_name", full_name),
      ("place_of_birth", place_of_birth),
      ("address", address),
      ("email", email),
      ("phone_number", phone_number),
    ];
    for (column, update) in text_fields {
      if let FieldUpdate::Set(v) = update {
        sets.push((column, Value::Text(v)));
      }
    }
    if let FieldUpdate::Set(dob) = date_of_birth {
      sets.push(("date_of_birth", Value::Text(encode_date(dob))));
    }
    sets.push(("updated_at", Value::Text(encode_ts(now()))));

    let assignments = sets
      .iter()
      .enumerate()
      .map(|(i, (column, _))| format!("{column} = ?{}", i + 1))
      .collect::<Vec<_>>()
      .join(", ");
    let id_param = sets.len() + 1;
    let sql = format!(
      "UPDATE experts SET {assignments} WHERE id = ?{id_param}
       RETURNING {EXPERT_COLUMNS}"
    );
    let mut params: Vec<Value> = sets.into_iter().map(|(_, v)| v).collect();
    params.push(Value::Integer(id));

    let raw: Option<RawExpert> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &sql,
              rusqlite::params_from_iter(params),
              RawExpert::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    if raw.is_some() {
      tracing::debug!(expert_id = id, "updated expert");
    }
    raw.map(RawExpert::into_expert).transpose()
  }

  async fn delete_expert(&self, id: i64) -> Result<bool> {
    let removed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute("DELETE FROM experts WHERE id = ?1", rusqlite::params![id])?)
      })
      .await?;

    if removed > 0 {
      tracing::debug!(expert_id = id, "deleted expert and dependent records");
    }
    Ok(removed > 0)
  }

  async fn search_experts(&self, query: &SearchQuery) -> Result<Vec<Expert>> {
    let preds = query.predicates(Utc::now().year());
    let mut filter = Filter::new(&preds);
    let where_clause = filter.where_clause();
    let page = filter.page(query.limit, query.offset);
    let params = filter.into_params();

    let sql = format!(
      "SELECT {EXPERT_COLUMNS}
       FROM experts e
       {where_clause}
       ORDER BY e.created_at DESC, e.id DESC
       {page}"
    );

    let raws: Vec<RawExpert> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(rusqlite::params_from_iter(params), RawExpert::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawExpert::into_expert).collect()
  }

  async fn get_profile(&self, expert_id: i64) -> Result<Option<ExpertProfile>> {
    let expert = match self.get_expert(expert_id).await? {
      Some(e) => e,
      None    => return Ok(None),
    };

    let (education, work_experience, skills, certifications, projects, documents) =
      tokio::try_join!(
        self.list_education(expert_id),
        self.list_work_experience(expert_id),
        self.list_skills(expert_id),
        self.list_certifications(expert_id),
        self.list_projects(expert_id),
        self.list_documents(expert_id),
      )?;

    Ok(Some(ExpertProfile {
      expert,
      education,
      work_experience,
      skills,
      certifications,
      projects,
      documents,
    }))
  }

  // ── Child records ─────────────────────────────────────────────────────────

  async fn create_education(&self, input: NewEducation) -> Result<Education> {
    let at_str = encode_ts(now());
    let expert_id = input.expert_id;

    let raw: RawEducation = self
      .guarded_insert(expert_id, move |conn| {
        Ok(Guarded::Done(conn.query_row(
          &format!(
            "INSERT INTO education (
               expert_id, level, major, institution, graduation_year, created_at
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)
             RETURNING {EDUCATION_COLUMNS}"
          ),
          rusqlite::params![
            input.expert_id,
            input.level,
            input.major,
            input.institution,
            input.graduation_year,
            at_str,
          ],
          RawEducation::from_row,
        )?))
      })
      .await?;

    let education = raw.into_education()?;
    tracing::debug!(expert_id, education_id = education.id, "created education");
    Ok(education)
  }

  async fn create_work_experience(
    &self,
    input: NewWorkExperience,
  ) -> Result<WorkExperience> {
    let at_str = encode_ts(now());
    let expert_id = input.expert_id;

    let raw: RawWorkExperience = self
      .guarded_insert(expert_id, move |conn| {
        if let Err(e) = input.check_dates() {
          return Ok(Guarded::Rejected(e));
        }
        Ok(Guarded::Done(conn.query_row(
          &format!(
            "INSERT INTO work_experience (
               expert_id, company_name, position, start_date, end_date,
               job_description, created_at
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
             RETURNING {WORK_EXPERIENCE_COLUMNS}"
          ),
          rusqlite::params![
            input.expert_id,
            input.company_name,
            input.position,
            encode_date(input.start_date),
            input.end_date.map(encode_date),
            input.job_description,
            at_str,
          ],
          RawWorkExperience::from_row,
        )?))
      })
      .await?;

    let work = raw.into_work_experience()?;
    tracing::debug!(expert_id, work_experience_id = work.id, "created work experience");
    Ok(work)
  }

  async fn create_skill(&self, input: NewSkill) -> Result<Skill> {
    let at_str = encode_ts(now());
    let expert_id = input.expert_id;

    let raw: RawSkill = self
      .guarded_insert(expert_id, move |conn| {
        if skill_exists(conn, input.expert_id, &input.skill_name)? {
          return Ok(Guarded::Rejected(dossier_core::Error::DuplicateSkill {
            expert_id:  input.expert_id,
            skill_name: input.skill_name,
          }));
        }
        Ok(Guarded::Done(conn.query_row(
          &format!(
            "INSERT INTO skills (expert_id, skill_name, proficiency_level, created_at)
             VALUES (?1, ?2, ?3, ?4)
             RETURNING {SKILL_COLUMNS}"
          ),
          rusqlite::params![
            input.expert_id,
            input.skill_name,
            input.proficiency_level.as_str(),
            at_str,
          ],
          RawSkill::from_row,
        )?))
      })
      .await?;

    let skill = raw.into_skill()?;
    tracing::debug!(expert_id, skill_id = skill.id, "created skill");
    Ok(skill)
  }

  async fn create_certification(
    &self,
    input: NewCertification,
  ) -> Result<Certification> {
    let at_str = encode_ts(now());
    let expert_id = input.expert_id;

    let raw: RawCertification = self
      .guarded_insert(expert_id, move |conn| {
        Ok(Guarded::Done(conn.query_row(
          &format!(
            "INSERT INTO certifications (
               expert_id, certification_name, issuing_body, year_obtained,
               expiry_date, created_at
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)
             RETURNING {CERTIFICATION_COLUMNS}"
          ),
          rusqlite::params![
            input.expert_id,
            input.certification_name,
            input.issuing_body,
            input.year_obtained,
            input.expiry_date.map(encode_date),
            at_str,
          ],
          RawCertification::from_row,
        )?))
      })
      .await?;

    let cert = raw.into_certification()?;
    tracing::debug!(expert_id, certification_id = cert.id, "created certification");
    Ok(cert)
  }

  async fn create_project(&self, input: NewProject) -> Result<Project> {
    let at_str = encode_ts(now());
    let expert_id = input.expert_id;

    let raw: RawProject = self
      .guarded_insert(expert_id, move |conn| {
        if let Err(e) = input.check_dates() {
          return Ok(Guarded::Rejected(e));
        }
        Ok(Guarded::Done(conn.query_row(
          &format!(
            "INSERT INTO projects (
               expert_id, project_name, role_in_project, start_date, end_date,
               description, created_at
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
             RETURNING {PROJECT_COLUMNS}"
          ),
          rusqlite::params![
            input.expert_id,
            input.project_name,
            input.role_in_project,
            encode_date(input.start_date),
            input.end_date.map(encode_date),
            input.description,
            at_str,
          ],
          RawProject::from_row,
        )?))
      })
      .await?;

    let project = raw.into_project()?;
    tracing::debug!(expert_id, project_id = project.id, "created project");
    Ok(project)
  }

  async fn create_document(&self, input: NewDocument) -> Result<Document> {
    let at_str = encode_ts(now());
    let expert_id = input.expert_id;

    let raw: RawDocument = self
      .guarded_insert(expert_id, move |conn| {
        Ok(Guarded::Done(conn.query_row(
          &format!(
            "INSERT INTO documents (
               expert_id, document_name, document_type, file_path,
               file_size, mime_type, uploaded_at
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
             RETURNING {DOCUMENT_COLUMNS}"
          ),
          rusqlite::params![
            input.expert_id,
            input.document_name,
            input.document_type.as_str(),
            input.file_path,
            input.file_size,
            input.mime_type,
            at_str,
          ],
          RawDocument::from_row,
        )?))
      })
      .await?;

    let doc = raw.into_document()?;
    tracing::debug!(expert_id, document_id = doc.id, "created document");
    Ok(doc)
  }

  async fn list_documents(&self, expert_id: i64) -> Result<Vec<Document>> {
    let raws: Vec<RawDocument> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {DOCUMENT_COLUMNS} FROM documents WHERE expert_id = ?1"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![expert_id], RawDocument::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawDocument::into_document).collect()
  }

  async fn delete_document(&self, id: i64) -> Result<bool> {
    let path: Option<String> = self
      .conn
      .call(move |conn| {
        let path = conn
          .query_row(
            "SELECT file_path FROM documents WHERE id = ?1",
            rusqlite::params![id],
            |r| r.get(0),
          )
          .optional()?;
        if path.is_some() {
          conn.execute("DELETE FROM documents WHERE id = ?1", rusqlite::params![id])?;
        }
        Ok(path)
      })
      .await?;

    let Some(path) = path else {
      return Ok(false);
    };

    tracing::debug!(document_id = id, "deleted document");
    remove_backing_file(&path).await;
    Ok(true)
  }
}
