//! The expert: the root record every other collection hangs off.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use validator::{Validate, ValidateEmail, ValidationError, ValidationErrors};

/// A consultant or professional tracked by the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expert {
  pub id:             i64,
  pub full_name:      String,
  pub place_of_birth: String,
  /// Calendar date, exposed as midnight UTC.
  pub date_of_birth:  DateTime<Utc>,
  pub address:        String,
  pub email:          String,
  pub phone_number:   String,
  pub created_at:     DateTime<Utc>,
  pub updated_at:     DateTime<Utc>,
}

/// Input to [`crate::store::ExpertStore::create_expert`].
/// `id`, `created_at` and `updated_at` are always set by the store.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewExpert {
  #[validate(length(min = 1))]
  pub full_name:      String,
  #[validate(length(min = 1))]
  pub place_of_birth: String,
  pub date_of_birth:  DateTime<Utc>,
  #[validate(length(min = 1))]
  pub address:        String,
  #[validate(email)]
  pub email:          String,
  #[validate(length(min = 1))]
  pub phone_number:   String,
}

// ─── Partial updates ─────────────────────────────────────────────────────────

/// One field of a partial update: either left alone or replaced.
///
/// Deserialises from the bare value; a field missing from the payload falls
/// back to [`FieldUpdate::Unchanged`] through `#[serde(default)]`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FieldUpdate<T> {
  #[default]
  Unchanged,
  Set(T),
}

impl<T> FieldUpdate<T> {
  pub fn is_unchanged(&self) -> bool { matches!(self, Self::Unchanged) }

  pub fn as_set(&self) -> Option<&T> {
    match self {
      Self::Set(v) => Some(v),
      Self::Unchanged => None,
    }
  }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for FieldUpdate<T> {
  fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
    T::deserialize(d).map(Self::Set)
  }
}

/// Input to [`crate::store::ExpertStore::update_expert`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExpertPatch {
  #[serde(default)]
  pub full_name:      FieldUpdate<String>,
  #[serde(default)]
  pub place_of_birth: FieldUpdate<String>,
  #[serde(default)]
  pub date_of_birth:  FieldUpdate<DateTime<Utc>>,
  #[serde(default)]
  pub address:        FieldUpdate<String>,
  #[serde(default)]
  pub email:          FieldUpdate<String>,
  #[serde(default)]
  pub phone_number:   FieldUpdate<String>,
}

impl ExpertPatch {
  /// `true` when no field would change.
  pub fn is_empty(&self) -> bool {
    self.full_name.is_unchanged()
      && self.place_of_birth.is_unchanged()
      && self.date_of_birth.is_unchanged()
      && self.address.is_unchanged()
      && self.email.is_unchanged()
      && self.phone_number.is_unchanged()
  }
}

impl Validate for ExpertPatch {
  fn validate(&self) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let text_fields = [
      ("full_name", &self.full_name),
      ("place_of_birth", &self.place_of_birth),
      ("address", &self.address),
      ("phone_number", &self.phone_number),
    ];
    for (field, update) in text_fields {
      if update.as_set().is_some_and(|v| v.is_empty()) {
        errors.add(field, ValidationError::new("length"));
      }
    }

    if let FieldUpdate::Set(email) = &self.email
      && !email.validate_email()
    {
      errors.add("email", ValidationError::new("email"));
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
  }
}
