//! Profile export: the structured aggregate or a flat text report.

use std::fmt::{self, Write};

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::{date::to_calendar, profile::ExpertProfile, store::ExpertStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
  Json,
  Pdf,
}

/// The rendered export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Export {
  /// The aggregate, unchanged.
  Profile(Box<ExpertProfile>),
  /// UTF-8 text report standing in for a rendered document.
  Report(Bytes),
}

/// Export an expert in `format`. Returns `None` if the expert does not exist,
/// whatever the format.
pub async fn export<S: ExpertStore>(
  store: &S,
  expert_id: i64,
  format: ExportFormat,
) -> Result<Option<Export>, S::Error> {
  let Some(profile) = store.get_profile(expert_id).await? else {
    return Ok(None);
  };

  Ok(Some(match format {
    ExportFormat::Json => Export::Profile(Box::new(profile)),
    ExportFormat::Pdf => Export::Report(render_report(&profile)),
  }))
}

/// Render `profile` as a plain-text report. Sections without rows are left
/// out entirely.
pub fn render_report(profile: &ExpertProfile) -> Bytes {
  Bytes::from(Report(profile).to_string())
}

struct Report<'a>(&'a ExpertProfile);

impl fmt::Display for Report<'_> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write_report(f, self.0)
  }
}

fn write_report(out: &mut impl Write, profile: &ExpertProfile) -> fmt::Result {
  let ExpertProfile {
    expert,
    education,
    work_experience,
    skills,
    certifications,
    projects,
    documents,
  } = profile;

  writeln!(out, "EXPERT PROFILE\n")?;
  writeln!(out, "Name: {}", expert.full_name)?;
  writeln!(out, "Email: {}", expert.email)?;
  writeln!(out, "Phone: {}", expert.phone_number)?;
  writeln!(out, "Address: {}", expert.address)?;
  writeln!(out, "Place of Birth: {}", expert.place_of_birth)?;
  writeln!(out, "Date of Birth: {}\n", to_calendar(expert.date_of_birth))?;

  if !education.is_empty() {
    writeln!(out, "EDUCATION")?;
    for edu in education {
      writeln!(
        out,
        "- {} in {} from {} ({})",
        edu.level, edu.major, edu.institution, edu.graduation_year
      )?;
    }
    writeln!(out)?;
  }

  if !work_experience.is_empty() {
    writeln!(out, "WORK EXPERIENCE")?;
    for work in work_experience {
      let end = work
        .end_date
        .map_or_else(|| "Present".to_owned(), |d| to_calendar(d).to_string());
      writeln!(
        out,
        "- {} at {} ({} - {end})",
        work.position,
        work.company_name,
        to_calendar(work.start_date)
      )?;
      writeln!(out, "  {}", work.job_description)?;
    }
    writeln!(out)?;
  }

  if !skills.is_empty() {
    writeln!(out, "SKILLS")?;
    for skill in skills {
      writeln!(out, "- {} ({})", skill.skill_name, skill.proficiency_level)?;
    }
    writeln!(out)?;
  }

  if !certifications.is_empty() {
    writeln!(out, "CERTIFICATIONS")?;
    for cert in certifications {
      writeln!(
        out,
        "- {} by {} ({})",
        cert.certification_name, cert.issuing_body, cert.year_obtained
      )?;
    }
    writeln!(out)?;
  }

  if !projects.is_empty() {
    writeln!(out, "PROJECTS")?;
    for project in projects {
      writeln!(out, "- {} ({})", project.project_name, project.role_in_project)?;
      writeln!(out, "  {}", project.description)?;
    }
    writeln!(out)?;
  }

  if !documents.is_empty() {
    writeln!(out, "DOCUMENTS")?;
    for doc in documents {
      writeln!(out, "- {} ({})", doc.document_name, doc.document_type)?;
    }
  }

  Ok(())
}

#[cfg(test)]
mod tests {
  use chrono::{TimeZone, Utc};

  use super::*;
  use crate::{
    expert::Expert,
    records::{ProficiencyLevel, Skill, WorkExperience},
  };

  fn expert() -> Expert {
    let now = Utc::now();
    Expert {
      id:             7,
      full_name:      "Grace Hopper".into(),
      place_of_birth: "New York".into(),
      date_of_birth:  Utc.with_ymd_and_hms(1906, 12, 9, 0, 0, 0).unwrap(),
      address:        "Arlington, VA".into(),
      email:          "grace@navy.mil".into(),
      phone_number:   "555-0100".into(),
      created_at:     now,
      updated_at:     now,
    }
  }

  fn bare() -> ExpertProfile {
    ExpertProfile {
      expert:          expert(),
      education:       Vec::new(),
      work_experience: Vec::new(),
      skills:          Vec::new(),
      certifications:  Vec::new(),
      projects:        Vec::new(),
      documents:       Vec::new(),
    }
  }

  fn text(profile: &ExpertProfile) -> String {
    String::from_utf8(render_report(profile).to_vec()).unwrap()
  }

  #[test]
  fn header_only_when_no_children() {
    let report = text(&bare());
    assert!(report.starts_with("EXPERT PROFILE\n\nName: Grace Hopper\n"));
    assert!(report.contains("Date of Birth: 1906-12-09\n"));
    for section in [
      "EDUCATION",
      "WORK EXPERIENCE",
      "SKILLS",
      "CERTIFICATIONS",
      "PROJECTS",
      "DOCUMENTS",
    ] {
      assert!(!report.contains(section), "unexpected {section}: {report}");
    }
  }

  #[test]
  fn non_empty_sections_get_one_bullet_per_row() {
    let mut profile = bare();
    let now = Utc::now();
    for (id, name) in [(1, "COBOL"), (2, "FLOW-MATIC")] {
      profile.skills.push(Skill {
        id,
        expert_id: 7,
        skill_name: name.into(),
        proficiency_level: ProficiencyLevel::Expert,
        created_at: now,
      });
    }
    profile.work_experience.push(WorkExperience {
      id:              1,
      expert_id:       7,
      company_name:    "Remington Rand".into(),
      position:        "Senior Mathematician".into(),
      start_date:      Utc.with_ymd_and_hms(1949, 1, 1, 0, 0, 0).unwrap(),
      end_date:        None,
      job_description: "UNIVAC programming".into(),
      created_at:      now,
    });

    let report = text(&profile);
    assert!(report.contains("SKILLS\n- COBOL (expert)\n- FLOW-MATIC (expert)\n"));
    assert!(report.contains(
      "- Senior Mathematician at Remington Rand (1949-01-01 - Present)\n  UNIVAC programming\n"
    ));
    assert!(!report.contains("EDUCATION"));
    assert_eq!(report.matches("\n- ").count(), 3);
  }
}
