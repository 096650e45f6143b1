//! Assembly of a user's exercise log: date ordering, range filtering and
//! trailing-count truncation.

use chrono::NaiveDate;

use crate::models::Exercise;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LogFilter {
    /// Inclusive lower bound.
    pub from: Option<NaiveDate>,
    /// Inclusive upper bound.
    pub to: Option<NaiveDate>,
    /// Keep only the last `limit` entries. Zero disables truncation.
    pub limit: Option<u32>,
}

/// Order `exercises` by date ascending and apply `filter`.
///
/// The sort is stable, so entries on the same day keep the order they were
/// passed in. Entries whose stored date cannot be read sort first and never
/// pass a `from`/`to` bound.
pub fn build_log(mut exercises: Vec<Exercise>, filter: &LogFilter) -> Vec<Exercise> {
    exercises.sort_by_key(Exercise::day);

    exercises.retain(|exercise| {
        let Some(day) = exercise.day() else {
            return filter.from.is_none() && filter.to.is_none();
        };
        filter.from.is_none_or(|from| day >= from) && filter.to.is_none_or(|to| day <= to)
    });

    if let Some(limit) = filter.limit.filter(|&n| n > 0) {
        let limit = limit as usize;
        if exercises.len() > limit {
            exercises.drain(..exercises.len() - limit);
        }
    }

    exercises
}
