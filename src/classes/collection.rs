use std::sync::Arc;

use axum::{body::Body, extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Serialize;
use sqlx::{sqlite::SqliteRow, FromRow, SqlitePool};

use crate::{
    query::{Getter, Poster, Record},
    res, AppResult, AppState,
};

use super::body::{read_limited, BodyLimit};

#[derive(Debug, Serialize)]
pub struct Results<T> {
    pub results: Vec<T>,
}

/// Mounts list (`GET`), create (`POST`) and preflight (`OPTIONS`) handlers
/// for one collection at `/classes/{name}`.
pub fn collection<T>(name: &str, getter: Getter<T>, poster: Poster) -> Router<AppState>
where
    T: for<'r> FromRow<'r, SqliteRow> + Serialize + Send + Unpin + 'static,
{
    let url: Arc<str> = format!("/classes/{name}").into();
    let getter = Arc::new(getter);
    let poster = Arc::new(poster);

    let list_url = url.clone();
    let create_url = url.clone();

    Router::new().route(
        &url,
        get(move |State(db_pool): State<SqlitePool>| async move {
            list(&list_url, &db_pool, &getter).await
        })
        .post(
            move |State(db_pool): State<SqlitePool>, State(limit): State<BodyLimit>, body: Body| async move {
                create(&create_url, &db_pool, limit, &poster, body).await
            },
        )
        .options(preflight),
    )
}

async fn list<T>(url: &str, db_pool: &SqlitePool, getter: &Getter<T>) -> AppResult<Json<Results<T>>>
where
    T: for<'r> FromRow<'r, SqliteRow> + Send + Unpin,
{
    tracing::info!("Serving a get request on: {url}");
    let results = getter.fetch(db_pool).await?;
    Ok(Json(Results { results }))
}

async fn create(
    url: &str,
    db_pool: &SqlitePool,
    limit: BodyLimit,
    poster: &Poster,
    body: Body,
) -> AppResult<(StatusCode, &'static str)> {
    tracing::info!("Serving a post request on: {url}");
    let bytes = read_limited(body, limit).await?;
    let record: Record = serde_json::from_slice(&bytes)?;

    let rows = poster.insert(db_pool, &record).await?;
    tracing::debug!("{rows} row(s) written to {url}");

    Ok(res::received())
}

async fn preflight() -> StatusCode {
    StatusCode::OK
}
