//! Rendering of search [`Predicate`]s into SQL.
//!
//! Every predicate becomes one self-contained boolean expression over the
//! outer `experts e` row, usually a correlated `EXISTS` subquery. Expressions
//! are joined with `AND`. Each predicate binds exactly one numbered parameter,
//! which it may reference several times.
//!
//! Text matching is a literal, Unicode case-insensitive substring test:
//! columns go through the connection's [`FOLD_FN`] and the bound needle is
//! folded the same way with [`fold_case`] before binding.

use dossier_core::search::Predicate;
use rusqlite::{Connection, functions::FunctionFlags, types::Value};

/// Name of the case-folding SQL function registered by [`register_fold`].
pub const FOLD_FN: &str = "dossier_fold";

/// Unicode lower-case folding shared by SQL and bound parameters.
pub fn fold_case(s: &str) -> String { s.to_lowercase() }

/// Install [`FOLD_FN`] on `conn`. `NULL` folds to `NULL`.
pub fn register_fold(conn: &Connection) -> rusqlite::Result<()> {
  conn.create_scalar_function(
    FOLD_FN,
    1,
    FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
    |ctx| Ok(ctx.get::<Option<String>>(0)?.map(|s| fold_case(&s))),
  )
}

/// `instr(fold(column), needle) > 0`.
fn contains(column: &str, needle: &str) -> String {
  format!("instr({FOLD_FN}({column}), {needle}) > 0")
}

/// A `WHERE` clause under construction, plus its bound parameters.
#[derive(Debug, Default)]
pub struct Filter {
  clauses: Vec<String>,
  params:  Vec<Value>,
}

impl Filter {
  pub fn new(preds: &[Predicate]) -> Self {
    let mut filter = Self::default();
    for pred in preds {
      filter.push(pred);
    }
    filter
  }

  fn bind(&mut self, value: Value) -> String {
    self.params.push(value);
    format!("?{}", self.params.len())
  }

  fn bind_needle(&mut self, term: &str) -> String {
    self.bind(Value::Text(fold_case(term)))
  }

  fn push(&mut self, pred: &Predicate) {
    let clause = match pred {
      Predicate::Text(term) => {
        let p = self.bind_needle(term);
        format!(
          "({name}
            OR EXISTS (SELECT 1 FROM skills s
                       WHERE s.expert_id = e.id AND {skill})
            OR EXISTS (SELECT 1 FROM education ed
                       WHERE ed.expert_id = e.id
                         AND ({level} OR {major} OR {institution}))
            OR EXISTS (SELECT 1 FROM work_experience w
                       WHERE w.expert_id = e.id
                         AND ({company} OR {position} OR {description})))",
          name = contains("e.full_name", &p),
          skill = contains("s.skill_name", &p),
          level = contains("ed.level", &p),
          major = contains("ed.major", &p),
          institution = contains("ed.institution", &p),
          company = contains("w.company_name", &p),
          position = contains("w.position", &p),
          description = contains("w.job_description", &p),
        )
      }
      Predicate::Skill(name) => {
        let p = self.bind_needle(name);
        format!(
          "EXISTS (SELECT 1 FROM skills s
                   WHERE s.expert_id = e.id AND {})",
          contains("s.skill_name", &p)
        )
      }
      Predicate::EducationLevel(level) => {
        let p = self.bind_needle(level);
        format!(
          "EXISTS (SELECT 1 FROM education ed
                   WHERE ed.expert_id = e.id AND {})",
          contains("ed.level", &p)
        )
      }
      Predicate::StartedNoLaterThan(year) => {
        let p = self.bind(Value::Integer(i64::from(*year)));
        format!(
          "EXISTS (SELECT 1 FROM work_experience w
                   WHERE w.expert_id = e.id
                     AND CAST(strftime('%Y', w.start_date) AS INTEGER) <= {p})"
        )
      }
      Predicate::StartedNoEarlierThan(year) => {
        let p = self.bind(Value::Integer(i64::from(*year)));
        format!(
          "EXISTS (SELECT 1 FROM work_experience w
                   WHERE w.expert_id = e.id
                     AND CAST(strftime('%Y', w.start_date) AS INTEGER) >= {p})"
        )
      }
    };
    self.clauses.push(clause);
  }

  /// `WHERE a AND b ...`, or nothing when there are no predicates.
  pub fn where_clause(&self) -> String {
    if self.clauses.is_empty() {
      String::new()
    } else {
      format!("WHERE {}", self.clauses.join("\n  AND "))
    }
  }

  /// Append `LIMIT`/`OFFSET` parameters and return the placeholders for them.
  pub fn page(&mut self, limit: u32, offset: u32) -> String {
    let l = self.bind(Value::Integer(i64::from(limit)));
    let o = self.bind(Value::Integer(i64::from(offset)));
    format!("LIMIT {l} OFFSET {o}")
  }

  pub fn into_params(self) -> Vec<Value> { self.params }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn folding_is_unicode_aware() {
    assert_eq!(fold_case("École"), "école");
    assert_eq!(fold_case("ÉMILE Zola"), "émile zola");
    assert_eq!(fold_case("100%_done"), "100%_done");
  }

  #[test]
  fn registered_function_folds_in_sql() {
    let conn = Connection::open_in_memory().unwrap();
    register_fold(&conn).unwrap();
    let sql = format!("SELECT instr({FOLD_FN}('École Normale'), ?1) > 0");
    let hit: bool = conn
      .query_row(&sql, [fold_case("éCOLE")], |r| r.get(0))
      .unwrap();
    assert!(hit);
    let null: Option<String> = conn
      .query_row(&format!("SELECT {FOLD_FN}(NULL)"), [], |r| r.get(0))
      .unwrap();
    assert_eq!(null, None);
  }

  #[test]
  fn no_predicates_means_no_where() {
    assert_eq!(Filter::new(&[]).where_clause(), "");
  }

  #[test]
  fn text_predicate_binds_one_folded_parameter() {
    let filter = Filter::new(&[Predicate::Text("MIT".into())]);
    let sql = filter.where_clause();
    assert!(sql.starts_with(&format!("WHERE (instr({FOLD_FN}(e.full_name), ?1) > 0")));
    assert!(sql.contains(&format!("instr({FOLD_FN}(ed.institution), ?1) > 0")));
    assert!(!sql.contains("?2"));
    assert_eq!(filter.into_params(), vec![Value::Text("mit".into())]);
  }

  #[test]
  fn predicates_are_anded_with_distinct_parameters() {
    let mut filter = Filter::new(&[
      Predicate::Skill("React".into()),
      Predicate::Skill("Node.js".into()),
      Predicate::StartedNoLaterThan(2020),
    ]);
    let sql = filter.where_clause();
    assert_eq!(sql.matches(" AND EXISTS").count(), 2);
    assert!(sql.contains(&format!("instr({FOLD_FN}(s.skill_name), ?2) > 0")));
    assert!(sql.contains("<= ?3"));

    assert_eq!(filter.page(20, 40), "LIMIT ?4 OFFSET ?5");
    assert_eq!(filter.into_params(), vec![
      Value::Text("react".into()),
      Value::Text("node.js".into()),
      Value::Integer(2020),
      Value::Integer(20),
      Value::Integer(40),
    ]);
  }
}
