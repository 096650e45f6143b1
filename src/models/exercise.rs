use chrono::{Datelike, DateTime, Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

pub const MAX_DESCRIPTION_LEN: usize = 500;

/// Storage format for dates. Zero-padded so that string order matches date order.
const STORAGE_FORMAT: &str = "%Y-%m-%d";
/// Format dates are rendered in for clients, e.g. `Mon Jan 01 2024`.
const DISPLAY_FORMAT: &str = "%a %b %d %Y";

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Exercise {
    pub id: String,
    pub user_id: String,
    pub description: String,
    pub duration: i64,
    pub date: String,
    pub created_at: String,
}

impl Exercise {
    pub fn new(user_id: String, description: String, duration: i64, date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            user_id,
            description,
            duration,
            date: storage_date(date),
            created_at: Utc::now().to_rfc3339(),
        }
    }

    pub fn day(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, STORAGE_FORMAT).ok()
    }
}

/// A single log line as returned by the API.
#[derive(Debug, Clone, Serialize)]
pub struct ExerciseView {
    pub description: String,
    pub duration: i64,
    pub date: String,
}

impl From<Exercise> for ExerciseView {
    fn from(exercise: Exercise) -> Self {
        let date = match exercise.day() {
            Some(day) => format_date(day),
            None => exercise.date,
        };
        Self {
            description: exercise.description,
            duration: exercise.duration,
            date,
        }
    }
}

/// Duration as submitted: JSON bodies send numbers, form bodies send strings.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DurationInput {
    Int(i64),
    Text(String),
}

impl DurationInput {
    pub fn minutes(&self) -> Result<i64, String> {
        let minutes = match self {
            DurationInput::Int(i) => *i,
            DurationInput::Text(s) => s
                .trim()
                .parse()
                .map_err(|_| "Duration must be a whole number of minutes".to_string())?,
        };
        if minutes < 1 {
            return Err("Duration must be at least 1".to_string());
        }
        Ok(minutes)
    }
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DISPLAY_FORMAT).to_string()
}

pub fn storage_date(date: NaiveDate) -> String {
    date.format(STORAGE_FORMAT).to_string()
}

/// Parse a client-supplied date.
///
/// Accepts `YYYY-MM-DD`, an RFC 3339 timestamp (its date part), or the
/// display format produced by [`format_date`]. Years outside 1..=9999 are
/// rejected so stored dates stay fixed-width.
pub fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    let raw = raw.trim();
    let parsed = NaiveDate::parse_from_str(raw, STORAGE_FORMAT)
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
        .or_else(|| NaiveDate::parse_from_str(raw, DISPLAY_FORMAT).ok());

    match parsed {
        Some(date) if (1..=9999).contains(&date.year()) => Ok(date),
        _ => Err(format!("Invalid date: {raw}")),
    }
}

/// Resolve an optional date field, falling back to today's local date.
pub fn date_or_today(raw: Option<&str>) -> Result<NaiveDate, String> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        Some(s) => parse_date(s),
        None => Ok(Local::now().date_naive()),
    }
}

pub fn validate_description(raw: &str) -> Result<String, String> {
    let description = raw.trim();
    if description.is_empty() {
        return Err("Description is required".to_string());
    }
    if description.chars().count() > MAX_DESCRIPTION_LEN {
        return Err(format!(
            "Description must be at most {MAX_DESCRIPTION_LEN} characters"
        ));
    }
    Ok(description.to_string())
}
