use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};
use serde::Deserialize;
use sqlx::SqlitePool;

use crate::AppState;
use crate::error::{AppError, AppResult, is_unique_violation};
use crate::extract::JsonOrForm;
use crate::models::user::validate_username;
use crate::models::{User, UserView};

#[derive(Deserialize)]
pub struct NewUserForm {
    #[serde(default)]
    username: String,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/exercise/new-user", post(create_user))
        .route("/api/exercise/users", get(list_users))
}

pub async fn insert_user(db: &SqlitePool, username: &str) -> AppResult<User> {
    let username = validate_username(username).map_err(AppError::Validation)?;

    let existing: Option<(String,)> = sqlx::query_as("SELECT id FROM users WHERE username = ?")
        .bind(&username)
        .fetch_optional(db)
        .await?;
    if existing.is_some() {
        return Err(AppError::Conflict(
            "user with this username already exists".to_string(),
        ));
    }

    let user = User::new(username);
    sqlx::query("INSERT INTO users (id, username, created_at) VALUES (?, ?, ?)")
        .bind(&user.id)
        .bind(&user.username)
        .bind(&user.created_at)
        .execute(db)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::Conflict("user with this username already exists".to_string())
            } else {
                AppError::Database(e)
            }
        })?;

    tracing::info!(user_id = %user.id, username = %user.username, "created user");
    Ok(user)
}

pub async fn find_user(db: &SqlitePool, id: &str) -> AppResult<User> {
    let user: Option<User> = sqlx::query_as("SELECT * FROM users WHERE id = ?")
        .bind(id)
        .fetch_optional(db)
        .await?;
    user.ok_or_else(|| AppError::NotFound("no such user".to_string()))
}

pub async fn fetch_users(db: &SqlitePool) -> AppResult<Vec<User>> {
    let users = sqlx::query_as("SELECT * FROM users ORDER BY rowid")
        .fetch_all(db)
        .await?;
    Ok(users)
}

async fn create_user(
    State(state): State<AppState>,
    JsonOrForm(form): JsonOrForm<NewUserForm>,
) -> AppResult<Json<UserView>> {
    let user = insert_user(&state.db, &form.username).await?;
    Ok(Json(user.into()))
}

async fn list_users(State(state): State<AppState>) -> AppResult<Json<Vec<UserView>>> {
    let users = fetch_users(&state.db).await?;
    Ok(Json(users.into_iter().map(UserView::from).collect()))
}
