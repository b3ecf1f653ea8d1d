use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use sqlx::error::ErrorKind;

use crate::query::QueryError;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug)]
pub struct AppError(pub StatusCode, pub anyhow::Error);

impl AppError {
    /// The response closes the connection, so the rest of the body is never read.
    pub fn payload_too_large(limit: usize) -> Self {
        Self(
            StatusCode::PAYLOAD_TOO_LARGE,
            anyhow::anyhow!("request body exceeds {limit} bytes"),
        )
    }

    pub fn status(&self) -> StatusCode {
        self.0
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let AppError(status, err) = self;
        if status.is_server_error() {
            tracing::error!("{status}: {err:#}\n\n{}", err.backtrace());
        } else {
            tracing::warn!("{status}: {err:#}");
        }

        let mut response = (status, format!("{err:#}")).into_response();
        if status == StatusCode::PAYLOAD_TOO_LARGE {
            response
                .headers_mut()
                .insert(header::CONNECTION, HeaderValue::from_static("close"));
        }
        response
    }
}

macro_rules! apperr_impl {
    ($E:ty, $status:expr) => {
        impl From<$E> for AppError {
            fn from(err: $E) -> Self {
                Self($status, anyhow::Error::from(err))
            }
        }
    };
}

apperr_impl!(serde_json::Error, StatusCode::BAD_REQUEST);
apperr_impl!(axum::Error, StatusCode::BAD_REQUEST);

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        let status = match &err {
            sqlx::Error::Database(db_err) => match db_err.kind() {
                ErrorKind::UniqueViolation => StatusCode::CONFLICT,
                ErrorKind::NotNullViolation
                | ErrorKind::ForeignKeyViolation
                | ErrorKind::CheckViolation => StatusCode::BAD_REQUEST,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self(status, anyhow::Error::from(err))
    }
}

impl From<QueryError> for AppError {
    fn from(err: QueryError) -> Self {
        match err {
            QueryError::Store(err) => err.into(),
            err @ (QueryError::MissingField(_) | QueryError::UnsupportedValue(_)) => {
                Self(StatusCode::BAD_REQUEST, anyhow::Error::from(err))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bad_json_is_a_client_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        assert_eq!(AppError::from(json_err).status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn record_errors_are_client_errors() {
        let err = AppError::from(QueryError::MissingField("text".to_owned()));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.1.to_string(), "missing field `text`");
    }

    #[test]
    fn plain_store_errors_are_server_errors() {
        let err = AppError::from(QueryError::Store(sqlx::Error::PoolTimedOut));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn oversized_body_closes_connection() {
        let response = AppError::payload_too_large(1000).into_response();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(response.headers()[header::CONNECTION], "close");
    }
}
