pub mod cli;
pub mod config;
pub mod db;
pub mod error;
pub mod extract;
pub mod log;
pub mod models;
pub mod routes;

use axum::Router;
use axum::http::{HeaderValue, header};
use sqlx::SqlitePool;
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    services::ServeDir,
    set_header::SetResponseHeaderLayer,
    trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
}

/// Build the full Axum application router.
///
/// Caller is responsible for running database migrations on `pool` beforehand
/// (`db::init_pool` does this).
pub fn build_app(pool: SqlitePool) -> Router {
    let state = AppState { db: pool };

    Router::new()
        .merge(routes::pages::router())
        .merge(routes::users::router())
        .merge(routes::exercises::router())
        .nest_service(
            "/static",
            ServiceBuilder::new()
                .layer(SetResponseHeaderLayer::overriding(
                    header::CACHE_CONTROL,
                    HeaderValue::from_static("public, max-age=86400"),
                ))
                .service(ServeDir::new("static")),
        )
        .fallback(routes::pages::not_found)
        .layer(CorsLayer::permissive())
        .layer(
            TraceLayer::new_for_http()
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}
