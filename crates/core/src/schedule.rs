//! Recurring schedule validation and next-execution arithmetic.
//!
//! The calculator is a pure function over a supplied "now" so the date
//! rules are testable without clock control. Callers pass
//! `Utc::now().naive_utc()` in production.

use std::sync::LazyLock;

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime};
use regex::Regex;
use serde::{Deserialize, Serialize};
use validator::ValidateEmail;

use crate::error::CoreError;

/// 24-hour `HH:MM` execution time pattern.
static TIME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([01][0-9]|2[0-3]):[0-5][0-9]$").expect("valid regex"));

/// Recurrence frequency for a report schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
    Quarterly,
}

impl Frequency {
    pub fn parse(s: &str) -> Result<Self, CoreError> {
        match s {
            "daily" => Ok(Frequency::Daily),
            "weekly" => Ok(Frequency::Weekly),
            "monthly" => Ok(Frequency::Monthly),
            "quarterly" => Ok(Frequency::Quarterly),
            other => Err(CoreError::Validation(format!(
                "frequency must be one of daily, weekly, monthly, quarterly (got '{other}')"
            ))),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Frequency::Daily => "daily",
            Frequency::Weekly => "weekly",
            Frequency::Monthly => "monthly",
            Frequency::Quarterly => "quarterly",
        }
    }
}

// ---------------------------------------------------------------------------
// Request validation
// ---------------------------------------------------------------------------

/// Raw schedule creation request as received from the caller.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ScheduleRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub frequency: String,
    /// Execution time of day, 24-hour `HH:MM`.
    #[serde(default)]
    pub time: String,
    /// Recipient e-mail address for the rendered report.
    #[serde(default)]
    pub email: String,
}

/// A schedule request that passed validation.
#[derive(Debug, Clone)]
pub struct ValidatedSchedule {
    pub name: String,
    pub frequency: Frequency,
    pub execution_time: NaiveTime,
    pub email: String,
}

impl ScheduleRequest {
    pub fn validate(&self) -> Result<ValidatedSchedule, CoreError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(CoreError::Validation("name is required".to_string()));
        }

        let frequency = Frequency::parse(self.frequency.trim())?;
        let execution_time = parse_execution_time(self.time.trim())?;

        let email = self.email.trim();
        if !email.validate_email() {
            return Err(CoreError::Validation(format!(
                "'{email}' is not a valid e-mail address"
            )));
        }

        Ok(ValidatedSchedule {
            name: name.to_string(),
            frequency,
            execution_time,
            email: email.to_string(),
        })
    }
}

/// Parse a 24-hour `HH:MM` time-of-day string.
pub fn parse_execution_time(s: &str) -> Result<NaiveTime, CoreError> {
    if !TIME_RE.is_match(s) {
        return Err(CoreError::Validation(format!(
            "time must match 24-hour HH:MM (got '{s}')"
        )));
    }
    NaiveTime::parse_from_str(s, "%H:%M")
        .map_err(|_| CoreError::Validation(format!("time must match 24-hour HH:MM (got '{s}')")))
}

// ---------------------------------------------------------------------------
// Next-execution calculator
// ---------------------------------------------------------------------------

/// Compute the next execution instant for a frequency and time-of-day.
///
/// - daily: the next calendar day.
/// - weekly: the next Monday strictly after today.
/// - monthly: the first day of the next month.
/// - quarterly: the first day of the next quarter-start month
///   (Jan/Apr/Jul/Oct) strictly after the current month.
///
/// The result is always strictly after `now`, by at least the remainder
/// of the current day.
pub fn next_execution(now: NaiveDateTime, frequency: Frequency, at: NaiveTime) -> NaiveDateTime {
    let today = now.date();
    let date = match frequency {
        Frequency::Daily => today + Duration::days(1),
        Frequency::Weekly => {
            // Monday is 0; today being Monday rolls a full week.
            let since_monday = today.weekday().num_days_from_monday() as i64;
            today + Duration::days(7 - since_monday)
        }
        Frequency::Monthly => first_of_next_month(today),
        Frequency::Quarterly => first_of_next_quarter(today),
    };
    date.and_time(at)
}

fn first_of_next_month(today: NaiveDate) -> NaiveDate {
    let (year, month) = if today.month() == 12 {
        (today.year() + 1, 1)
    } else {
        (today.year(), today.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1).expect("first of month is a valid date")
}

fn first_of_next_quarter(today: NaiveDate) -> NaiveDate {
    // Next quarter-start month strictly after the current month.
    let month = (today.month() - 1) / 3 * 3 + 4;
    let (year, month) = if month > 12 {
        (today.year() + 1, 1)
    } else {
        (today.year(), month)
    };
    NaiveDate::from_ymd_opt(year, month, 1).expect("first of quarter is a valid date")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn dt(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_time(at(h, mi))
    }

    // -----------------------------------------------------------------------
    // Calculator
    // -----------------------------------------------------------------------

    #[test]
    fn daily_rolls_to_next_day() {
        let next = next_execution(dt(2024, 6, 15, 10, 0), Frequency::Daily, at(9, 0));
        assert_eq!(next, dt(2024, 6, 16, 9, 0));
    }

    #[test]
    fn weekly_from_wednesday_hits_next_monday() {
        // 2024-06-12 is a Wednesday; next Monday is 2024-06-17.
        let next = next_execution(dt(2024, 6, 12, 8, 0), Frequency::Weekly, at(7, 30));
        assert_eq!(next, dt(2024, 6, 17, 7, 30));
    }

    #[test]
    fn weekly_from_monday_rolls_a_full_week() {
        // 2024-06-10 is a Monday.
        let next = next_execution(dt(2024, 6, 10, 8, 0), Frequency::Weekly, at(7, 30));
        assert_eq!(next, dt(2024, 6, 17, 7, 30));
    }

    #[test]
    fn monthly_hits_first_of_next_month() {
        let next = next_execution(dt(2024, 6, 15, 10, 0), Frequency::Monthly, at(6, 0));
        assert_eq!(next, dt(2024, 7, 1, 6, 0));
    }

    #[test]
    fn monthly_december_rolls_the_year() {
        let next = next_execution(dt(2024, 12, 31, 10, 0), Frequency::Monthly, at(6, 0));
        assert_eq!(next, dt(2025, 1, 1, 6, 0));
    }

    #[test]
    fn quarterly_from_november_rolls_to_january() {
        let next = next_execution(dt(2024, 11, 20, 10, 0), Frequency::Quarterly, at(9, 0));
        assert_eq!(next, dt(2025, 1, 1, 9, 0));
    }

    #[test]
    fn quarterly_from_quarter_start_month_advances() {
        // January is a quarter-start month; the next one is April.
        let next = next_execution(dt(2024, 1, 1, 0, 0), Frequency::Quarterly, at(9, 0));
        assert_eq!(next, dt(2024, 4, 1, 9, 0));
    }

    #[test]
    fn quarterly_mid_quarter() {
        let next = next_execution(dt(2024, 5, 10, 10, 0), Frequency::Quarterly, at(9, 0));
        assert_eq!(next, dt(2024, 7, 1, 9, 0));
    }

    // -----------------------------------------------------------------------
    // Validation
    // -----------------------------------------------------------------------

    fn schedule_request() -> ScheduleRequest {
        ScheduleRequest {
            name: "Daily trading digest".into(),
            frequency: "daily".into(),
            time: "09:00".into(),
            email: "desk@example.com".into(),
        }
    }

    #[test]
    fn valid_schedule_passes() {
        let validated = schedule_request().validate().unwrap();
        assert_eq!(validated.frequency, Frequency::Daily);
        assert_eq!(validated.execution_time, at(9, 0));
    }

    #[test]
    fn unknown_frequency_rejected() {
        let mut req = schedule_request();
        req.frequency = "fortnightly".into();
        assert!(req.validate().is_err());
    }

    #[test]
    fn bad_time_patterns_rejected() {
        for bad in ["9:00", "24:00", "09:60", "0900", "09:00:00", ""] {
            assert!(
                parse_execution_time(bad).is_err(),
                "'{bad}' should be rejected"
            );
        }
    }

    #[test]
    fn boundary_times_accepted() {
        assert_eq!(parse_execution_time("00:00").unwrap(), at(0, 0));
        assert_eq!(parse_execution_time("23:59").unwrap(), at(23, 59));
    }

    #[test]
    fn invalid_email_rejected() {
        let mut req = schedule_request();
        req.email = "not-an-email".into();
        let err = req.validate().unwrap_err();
        assert!(err.to_string().contains("valid e-mail"));
    }

    #[test]
    fn empty_name_rejected() {
        let mut req = schedule_request();
        req.name = "  ".into();
        assert!(req.validate().is_err());
    }
}
