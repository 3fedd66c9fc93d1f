//! Calendar date checks

use chrono::{Local, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::utils::error_messages::*;
use crate::utils::validation::constants::{DAY_FIRST_DATE_FORMAT, ISO_DATE_FORMAT};
use crate::utils::validation::rules::DateOptions;
use crate::utils::validation::types::ValidationResult;

static ISO_DATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([0-9]{4})-([0-9]{2})-([0-9]{2})$").expect("Failed to compile ISO date regex")
});

static DAY_FIRST_DATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([0-9]{2})/([0-9]{2})/([0-9]{4})$").expect("Failed to compile day-first date regex")
});

/// Outcome of reading a date in a declared layout
enum Parsed {
    Date(NaiveDate),
    Malformed,
    Impossible,
    UnknownFormat,
}

fn ymd(year: &str, month: &str, day: &str) -> Parsed {
    match (year.parse::<i32>(), month.parse::<u32>(), day.parse::<u32>()) {
        (Ok(y), Ok(m), Ok(d)) => NaiveDate::from_ymd_opt(y, m, d)
            .map(Parsed::Date)
            .unwrap_or(Parsed::Impossible),
        _ => Parsed::Malformed,
    }
}

fn parse_with_format(value: &str, format: &str) -> Parsed {
    match format {
        ISO_DATE_FORMAT => match ISO_DATE.captures(value) {
            Some(caps) => ymd(&caps[1], &caps[2], &caps[3]),
            None => Parsed::Malformed,
        },
        DAY_FIRST_DATE_FORMAT => match DAY_FIRST_DATE.captures(value) {
            Some(caps) => ymd(&caps[3], &caps[2], &caps[1]),
            None => Parsed::Malformed,
        },
        _ => Parsed::UnknownFormat,
    }
}

/// Reads a date given either as `YYYY-MM-DD`, `DD/MM/YYYY` or an RFC 3339
/// timestamp (its date part is kept).
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    for format in [ISO_DATE_FORMAT, DAY_FIRST_DATE_FORMAT] {
        if let Parsed::Date(date) = parse_with_format(trimmed, format) {
            return Some(date);
        }
    }
    chrono::DateTime::parse_from_rfc3339(trimmed)
        .ok()
        .map(|stamp| stamp.date_naive())
}

/// Date in the declared layout, checked against today and optional bounds
pub fn date(value: &str, options: &DateOptions) -> ValidationResult {
    date_on(value, options, Local::now().date_naive())
}

/// Same as [`date`] with an explicit notion of today
pub fn date_on(value: &str, options: &DateOptions, today: NaiveDate) -> ValidationResult {
    let date = match parse_with_format(value.trim(), &options.format) {
        Parsed::Date(date) => date,
        Parsed::Malformed => {
            return ValidationResult::invalid(format!(
                "Invalid date format. Use {}.",
                options.format
            ))
        }
        Parsed::Impossible => return ValidationResult::invalid(INVALID_DATE),
        Parsed::UnknownFormat => return ValidationResult::invalid(UNSUPPORTED_DATE_FORMAT),
    };

    if !options.allow_future && date > today {
        return ValidationResult::invalid(FUTURE_DATE);
    }

    if !options.allow_past && date < today {
        return ValidationResult::invalid(PAST_DATE);
    }

    if let Some(raw_min) = options.min_date.as_deref() {
        let Some(min) = parse_date(raw_min) else {
            return ValidationResult::invalid(INVALID_DATE_BOUND);
        };
        if date < min {
            return ValidationResult::invalid(format!("The date must be on or after {}.", raw_min));
        }
    }

    if let Some(raw_max) = options.max_date.as_deref() {
        let Some(max) = parse_date(raw_max) else {
            return ValidationResult::invalid(INVALID_DATE_BOUND);
        };
        if date > max {
            return ValidationResult::invalid(format!("The date must be on or before {}.", raw_max));
        }
    }

    ValidationResult::valid()
}
