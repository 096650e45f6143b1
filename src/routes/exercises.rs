use axum::{
    Json, Router,
    extract::{Query, State},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use sqlx::{SqliteExecutor, SqlitePool};

use crate::AppState;
use crate::error::{AppError, AppResult};
use crate::extract::JsonOrForm;
use crate::log::{LogFilter, build_log};
use crate::models::exercise::{DurationInput, date_or_today, validate_description};
use crate::models::{Exercise, ExerciseView, User, format_date, parse_date};
use crate::routes::users::find_user;

#[derive(Deserialize)]
pub struct ExerciseForm {
    #[serde(rename = "userId")]
    user_id: Option<String>,
    #[serde(default)]
    description: String,
    duration: Option<DurationInput>,
    date: Option<String>,
}

#[derive(Serialize)]
struct AddedExercise {
    username: String,
    #[serde(rename = "_id")]
    id: String,
    description: String,
    duration: i64,
    date: String,
}

#[derive(Deserialize)]
pub struct LogParams {
    #[serde(rename = "userId")]
    user_id: Option<String>,
    from: Option<String>,
    to: Option<String>,
    limit: Option<String>,
}

#[derive(Serialize)]
struct ExerciseLog {
    #[serde(rename = "_id")]
    id: String,
    username: String,
    count: usize,
    log: Vec<ExerciseView>,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/exercise/add", post(add_exercise))
        .route("/api/exercise/log", get(exercise_log))
}

fn require_user_id(raw: Option<&str>) -> AppResult<&str> {
    raw.map(str::trim)
        .filter(|id| !id.is_empty())
        .ok_or_else(|| AppError::Validation("userId is required".to_string()))
}

fn parse_filter(params: &LogParams) -> AppResult<LogFilter> {
    let date_param = |raw: &Option<String>| -> AppResult<_> {
        match raw.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            Some(s) => parse_date(s).map(Some).map_err(AppError::Validation),
            None => Ok(None),
        }
    };

    let limit = match params.limit.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        Some(s) => Some(s.parse::<u32>().map_err(|_| {
            AppError::Validation(format!("limit must be a non-negative integer, got {s:?}"))
        })?),
        None => None,
    };

    Ok(LogFilter {
        from: date_param(&params.from)?,
        to: date_param(&params.to)?,
        limit,
    })
}

/// Validate and store one exercise for `user`.
///
/// Takes any executor so bulk imports can run it inside a transaction.
pub async fn insert_exercise<'e, E>(
    db: E,
    user: &User,
    description: &str,
    duration: Option<&DurationInput>,
    date: Option<&str>,
) -> AppResult<Exercise>
where
    E: SqliteExecutor<'e>,
{
    let description = validate_description(description).map_err(AppError::Validation)?;
    let duration = duration
        .ok_or_else(|| AppError::Validation("Duration is required".to_string()))?
        .minutes()
        .map_err(AppError::Validation)?;
    let date = date_or_today(date).map_err(AppError::Validation)?;

    let exercise = Exercise::new(user.id.clone(), description, duration, date);
    sqlx::query(
        "INSERT INTO exercises (id, user_id, description, duration, date, created_at) VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(&exercise.id)
    .bind(&exercise.user_id)
    .bind(&exercise.description)
    .bind(exercise.duration)
    .bind(&exercise.date)
    .bind(&exercise.created_at)
    .execute(db)
    .await?;

    Ok(exercise)
}

async fn fetch_exercises_for_user(db: &SqlitePool, user_id: &str) -> AppResult<Vec<Exercise>> {
    let exercises = sqlx::query_as(
        "SELECT * FROM exercises WHERE user_id = ? ORDER BY rowid",
    )
    .bind(user_id)
    .fetch_all(db)
    .await?;
    Ok(exercises)
}

async fn add_exercise(
    State(state): State<AppState>,
    JsonOrForm(form): JsonOrForm<ExerciseForm>,
) -> AppResult<Json<AddedExercise>> {
    let user_id = require_user_id(form.user_id.as_deref())?;
    let user = find_user(&state.db, user_id).await?;

    let exercise = insert_exercise(
        &state.db,
        &user,
        &form.description,
        form.duration.as_ref(),
        form.date.as_deref(),
    )
    .await?;

    tracing::info!(user_id = %user.id, exercise_id = %exercise.id, "added exercise");

    let date = exercise.day().map(format_date).unwrap_or(exercise.date);
    Ok(Json(AddedExercise {
        username: user.username,
        id: user.id,
        description: exercise.description,
        duration: exercise.duration,
        date,
    }))
}

async fn exercise_log(
    State(state): State<AppState>,
    Query(params): Query<LogParams>,
) -> AppResult<Json<ExerciseLog>> {
    let user_id = require_user_id(params.user_id.as_deref())?;
    let filter = parse_filter(&params)?;
    let user = find_user(&state.db, user_id).await?;

    let exercises = fetch_exercises_for_user(&state.db, &user.id).await?;
    let log: Vec<ExerciseView> = build_log(exercises, &filter)
        .into_iter()
        .map(ExerciseView::from)
        .collect();

    Ok(Json(ExerciseLog {
        id: user.id,
        username: user.username,
        count: log.len(),
        log,
    }))
}
