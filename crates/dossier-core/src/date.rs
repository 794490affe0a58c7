//! Calendar dates at rest, date-times on the wire.
//!
//! Birth, employment, project and expiry dates carry day precision only. The
//! store keeps them as [`NaiveDate`]; every API type exposes them as
//! [`DateTime<Utc>`] pinned to midnight. The two functions here are the only
//! crossing point between the representations.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

/// The UTC calendar day of `dt`. Any time-of-day component is discarded.
pub fn to_calendar(dt: DateTime<Utc>) -> NaiveDate { dt.date_naive() }

/// Midnight UTC at the start of `date`.
pub fn to_boundary(date: NaiveDate) -> DateTime<Utc> {
  date.and_time(NaiveTime::MIN).and_utc()
}

#[cfg(test)]
mod tests {
  use chrono::{Datelike, TimeZone, Timelike};

  use super::*;

  #[test]
  fn boundary_is_midnight_of_same_day() {
    let date = NaiveDate::from_ymd_opt(1990, 5, 15).unwrap();
    let dt = to_boundary(date);
    assert_eq!((dt.year(), dt.month(), dt.day()), (1990, 5, 15));
    assert_eq!((dt.hour(), dt.minute(), dt.second()), (0, 0, 0));
    assert_eq!(to_calendar(dt), date);
  }

  #[test]
  fn calendar_drops_time_of_day() {
    let dt = Utc.with_ymd_and_hms(2021, 12, 31, 23, 59, 59).unwrap();
    assert_eq!(to_calendar(dt), NaiveDate::from_ymd_opt(2021, 12, 31).unwrap());
    assert_eq!(
      to_boundary(to_calendar(dt)),
      Utc.with_ymd_and_hms(2021, 12, 31, 0, 0, 0).unwrap()
    );
  }
}
