//! Age Calculation
//!
//! Maps a date-of-birth timestamp to a display age. Babies under a year
//! are shown in whole months, everyone else in whole years. The boundary
//! matters: exactly 12 calendar months reads "1 year", never "12 months".
//!
//! Month arithmetic is calendar-aware, not a 30-day approximation: a month
//! is complete once the day-of-month comes around again. When a short month
//! never reaches that day the month completes on the 1st of the next one,
//! so Jan 31 to Feb 28 is still 0 months and Mar 1 makes it 1.

use chrono::{DateTime, Datelike, Local, NaiveDate};

/// A computed display age
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AgeResult {
    /// Whole months or whole years, depending on granularity
    pub value: u32,
    /// Pluralization-sensitive unit label: "month", "months", "year", "years"
    pub unit: &'static str,
    /// True when the age is expressed in months
    pub is_in_months: bool,
}

/// Calculate the display age for a date of birth in epoch milliseconds.
///
/// The timestamp is resolved in the local time zone at calendar-day
/// granularity; time of day is discarded. Deterministic tests should use
/// [`age_on`] instead.
#[must_use]
pub fn calculate_age(dob_millis: i64) -> AgeResult {
    age_on(dob_millis, Local::now().date_naive())
}

/// Calculate the display age as of an explicit calendar date.
///
/// A date of birth in the future (or outside the representable timestamp
/// range) clamps to zero months rather than going negative.
#[must_use]
pub fn age_on(dob_millis: i64, today: NaiveDate) -> AgeResult {
    let Some(dob) = DateTime::from_timestamp_millis(dob_millis)
        .map(|utc| utc.with_timezone(&Local).date_naive())
    else {
        return AgeResult {
            value: 0,
            unit: "months",
            is_in_months: true,
        };
    };

    #[allow(clippy::cast_sign_loss)]
    let months = whole_months_between(dob, today).max(0) as u32;
    if months < 12 {
        AgeResult {
            value: months,
            unit: if months == 1 { "month" } else { "months" },
            is_in_months: true,
        }
    } else {
        let years = months / 12;
        AgeResult {
            value: years,
            unit: if years == 1 { "year" } else { "years" },
            is_in_months: false,
        }
    }
}

/// Completed calendar months from `from` to `to` (negative if `to` is
/// earlier).
fn whole_months_between(from: NaiveDate, to: NaiveDate) -> i32 {
    #[allow(clippy::cast_possible_wrap)]
    let mut months = (to.year() - from.year()) * 12 + to.month() as i32 - from.month() as i32;
    // The month is only complete once the day-of-month is reached again.
    if to.day() < from.day() {
        months -= 1;
    }
    months
}
