use askama::Template;
use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse},
    routing::get,
};
use serde_json::json;

use crate::AppState;
use crate::error::AppError;
use crate::models::User;
use crate::routes::users::fetch_users;

#[derive(Template)]
#[template(path = "index.html")]
struct IndexTemplate {
    users: Vec<User>,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
}

async fn health() -> &'static str {
    "ok"
}

async fn index(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let users = fetch_users(&state.db).await?;
    let template = IndexTemplate { users };
    Ok(Html(template.render()?))
}

pub async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(json!({ "error": "not found" })))
}
