#![allow(dead_code)]

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chatterbox::{classes::BodyLimit, db, AppState};
use serde_json::Value;

pub struct TestServer {
    pub base_url: String,
    pub client: reqwest::Client,
}

/// Serves the app on a free local port, backed by a fresh in-memory store.
pub async fn spawn() -> Result<TestServer> {
    spawn_with_client_dir(&missing_client_dir()).await
}

pub async fn spawn_with_client_dir(client_dir: &Path) -> Result<TestServer> {
    let db_pool = db::connect("sqlite::memory:", 1).await?;
    let app_state = AppState {
        db_pool,
        body_limit: BodyLimit(1000),
    };
    let app = chatterbox::app(app_state, client_dir);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .context("failed to bind test listener")?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    Ok(TestServer {
        base_url: format!("http://{addr}"),
        client: reqwest::Client::new(),
    })
}

fn missing_client_dir() -> PathBuf {
    std::env::temp_dir().join("chatterbox-no-client-dir")
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn post(&self, collection: &str, body: Value) -> Result<reqwest::Response> {
        Ok(self
            .client
            .post(self.url(&format!("/classes/{collection}")))
            .json(&body)
            .send()
            .await?)
    }

    pub async fn results(&self, collection: &str) -> Result<Vec<Value>> {
        let body: Value = self
            .client
            .get(self.url(&format!("/classes/{collection}")))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        body.get("results")
            .and_then(Value::as_array)
            .cloned()
            .with_context(|| format!("no results array in {body}"))
    }
}
