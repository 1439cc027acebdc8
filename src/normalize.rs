//! Conversion of raw extracted strings into canonical review field values.
//!
//! Every function here fails softly: bad input produces `None`, `false` or
//! `0.0`, never an error.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

pub const DEFAULT_MAX_RATING: f64 = 5.0;

const CANONICAL_DATE_FORMAT: &str = "%Y-%m-%d";

const MONTH_PATTERN: &str = r"(jan(?:uary)?|feb(?:ruary)?|mar(?:ch)?|apr(?:il)?|may|june?|july?|aug(?:ust)?|sep(?:t(?:ember)?)?|oct(?:ober)?|nov(?:ember)?|dec(?:ember)?)\.?";

static YEAR_FIRST_DATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:^|[^\d])(\d{4})[-/.](\d{1,2})[-/.](\d{1,2})(?:[^\d]|$)").unwrap()
});

static YEAR_LAST_DATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:^|[^\d])(\d{1,2})[/.](\d{1,2})[/.](\d{4})(?:[^\d]|$)").unwrap()
});

static MONTH_DAY_YEAR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"(?i)\b{MONTH_PATTERN}\s+(\d{{1,2}})(?:st|nd|rd|th)?,?\s+(\d{{4}})\b"
    ))
    .unwrap()
});

static DAY_MONTH_YEAR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"(?i)\b(\d{{1,2}})(?:st|nd|rd|th)?\s+(?:of\s+)?{MONTH_PATTERN},?\s+(\d{{4}})\b"
    ))
    .unwrap()
});

/// Raw rating value as found on a page
#[derive(Debug, Clone, PartialEq)]
pub enum RawRating {
    Missing,
    Number(f64),
    Text(String),
}

impl From<f64> for RawRating {
    fn from(value: f64) -> Self {
        RawRating::Number(value)
    }
}

impl From<&str> for RawRating {
    fn from(value: &str) -> Self {
        RawRating::Text(value.to_string())
    }
}

impl From<Option<&str>> for RawRating {
    fn from(value: Option<&str>) -> Self {
        value.map(RawRating::from).unwrap_or(RawRating::Missing)
    }
}

/// Parse a loosely formatted date, tolerating surrounding text, into `YYYY-MM-DD`.
pub fn normalize_date(raw: &str) -> Option<String> {
    parse_fuzzy_date(raw).map(|date| date.format(CANONICAL_DATE_FORMAT).to_string())
}

/// Inclusive bounds check on canonical dates.
///
/// Returns `false` when any of the three values is not a calendar date, so a
/// malformed window excludes every record.
pub fn is_in_range(date: &str, start: &str, end: &str) -> bool {
    let parse = |s: &str| NaiveDate::parse_from_str(s.trim(), CANONICAL_DATE_FORMAT).ok();
    match (parse(date), parse(start), parse(end)) {
        (Some(date), Some(start), Some(end)) => start <= date && date <= end,
        _ => false,
    }
}

/// Same check for optional bounds, as adapters receive them from the CLI.
pub fn is_in_window(date: &str, start: Option<&str>, end: Option<&str>) -> bool {
    match (start, end) {
        (Some(start), Some(end)) => is_in_range(date, start, end),
        _ => false,
    }
}

/// Coerce a rating to a number in `[0, max_scale]` rounded to 2 decimals.
///
/// Missing, non-numeric or non-finite input becomes `0.0`, the same value as
/// an explicit zero rating.
pub fn normalize_rating(raw: &RawRating, max_scale: f64) -> f64 {
    let value = match raw {
        RawRating::Missing => return 0.0,
        RawRating::Number(n) => *n,
        RawRating::Text(text) => match text.trim().parse::<f64>() {
            Ok(n) => n,
            Err(_) => return 0.0,
        },
    };
    if !value.is_finite() {
        return 0.0;
    }
    let clamped = value.max(0.0).min(max_scale);
    (clamped * 100.0).round() / 100.0
}

fn parse_fuzzy_date(raw: &str) -> Option<NaiveDate> {
    let text = raw.trim();
    if text.is_empty() {
        return None;
    }

    if let Some(caps) = YEAR_FIRST_DATE.captures(text) {
        if let Some(date) = ymd(&caps[1], &caps[2], &caps[3]) {
            return Some(date);
        }
    }
    if let Some(caps) = MONTH_DAY_YEAR.captures(text) {
        if let Some(date) = month_name_date(&caps[3], &caps[1], &caps[2]) {
            return Some(date);
        }
    }
    if let Some(caps) = DAY_MONTH_YEAR.captures(text) {
        if let Some(date) = month_name_date(&caps[3], &caps[2], &caps[1]) {
            return Some(date);
        }
    }
    // Month first, day first when that is not a valid date
    if let Some(caps) = YEAR_LAST_DATE.captures(text) {
        let date = ymd(&caps[3], &caps[1], &caps[2]).or_else(|| ymd(&caps[3], &caps[2], &caps[1]));
        if let Some(date) = date {
            return Some(date);
        }
    }
    None
}

fn ymd(year: &str, month: &str, day: &str) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, day.parse().ok()?)
}

fn month_name_date(year: &str, month: &str, day: &str) -> Option<NaiveDate> {
    let month = month_number(month)?;
    NaiveDate::from_ymd_opt(year.parse().ok()?, month, day.parse().ok()?)
}

fn month_number(token: &str) -> Option<u32> {
    let token = token.trim_end_matches('.').to_ascii_lowercase();
    let month = match token.get(..3)? {
        "jan" => 1,
        "feb" => 2,
        "mar" => 3,
        "apr" => 4,
        "may" => 5,
        "jun" => 6,
        "jul" => 7,
        "aug" => 8,
        "sep" => 9,
        "oct" => 10,
        "nov" => 11,
        "dec" => 12,
        _ => return None,
    };
    Some(month)
}
