pub mod appresult;
pub mod classes;
pub mod config;
pub mod db;
pub mod query;
pub mod res;

use std::path::Path;

use axum::{extract::FromRef, Router};
use sqlx::SqlitePool;
use tower_http::{services::ServeDir, trace::TraceLayer};

pub use appresult::{AppError, AppResult};
use classes::BodyLimit;

#[derive(Clone, FromRef)]
pub struct AppState {
    pub db_pool: SqlitePool,
    pub body_limit: BodyLimit,
}

/// The whole HTTP surface: the `/classes` collections, with everything else
/// falling through to the static files in `client_dir`.
pub fn app(app_state: AppState, client_dir: impl AsRef<Path>) -> Router {
    let app = Router::new()
        .merge(classes::router())
        .fallback_service(ServeDir::new(client_dir))
        .with_state(app_state)
        .layer(TraceLayer::new_for_http());

    res::with_cors(app)
}
