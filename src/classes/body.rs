use axum::body::Body;
use futures_util::StreamExt;

use crate::{AppError, AppResult};

/// Largest POST body, in bytes, a collection accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BodyLimit(pub usize);

impl Default for BodyLimit {
    fn default() -> Self {
        BodyLimit(1000)
    }
}

/// Collects `body` chunk by chunk. Gives up as soon as more than `limit`
/// bytes have arrived.
pub async fn read_limited(body: Body, BodyLimit(limit): BodyLimit) -> AppResult<Vec<u8>> {
    let mut stream = body.into_data_stream();
    let mut buf = Vec::new();

    while let Some(chunk) = stream.next().await {
        buf.extend_from_slice(&chunk?);
        if buf.len() > limit {
            return Err(AppError::payload_too_large(limit));
        }
    }

    Ok(buf)
}
