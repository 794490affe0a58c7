//! Validation rules whose bounds depend on the current date.

use std::borrow::Cow;

use chrono::{Datelike, Utc};
use validator::ValidationError;

/// The earliest graduation or certification year accepted.
pub const MIN_YEAR: i32 = 1900;

/// How far in the future a graduation year may lie.
pub const GRADUATION_LOOKAHEAD: i32 = 10;

pub fn current_year() -> i32 { Utc::now().year() }

/// Check that `year` lies in `[MIN_YEAR, max]`, reporting against `field`.
pub fn year_in_range(
  field: &'static str,
  year:  i32,
  max:   i32,
) -> Result<(), ValidationError> {
  if (MIN_YEAR..=max).contains(&year) {
    return Ok(());
  }
  Err(
    ValidationError::new(field).with_message(Cow::Owned(format!(
      "{field} must be between {MIN_YEAR} and {max}, got {year}"
    ))),
  )
}
