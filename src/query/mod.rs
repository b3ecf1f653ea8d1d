//! Query binders: reusable fetch and insert operations built from SQL text.
//!
//! Nothing in here knows about HTTP. Handlers get a [`Getter`] and a
//! [`Poster`] and never see the statements behind them.

mod template;

use std::marker::PhantomData;

use serde_json::Value;
use sqlx::{
    query::Query,
    sqlite::{SqliteArguments, SqliteRow},
    FromRow, Sqlite, SqlitePool,
};

pub use template::Template;

/// A JSON object as posted by a client, keyed by field name.
pub type Record = serde_json::Map<String, Value>;

type SqliteQuery<'q> = Query<'q, Sqlite, SqliteArguments<'q>>;

#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    #[error("missing field `{0}`")]
    MissingField(String),
    #[error("field `{0}` must be a string, number, boolean or null")]
    UnsupportedValue(String),
    #[error(transparent)]
    Store(#[from] sqlx::Error),
}

/// Runs a parameterless SELECT and decodes every row as `T`.
pub struct Getter<T> {
    sql: String,
    _row: PhantomData<fn() -> T>,
}

impl<T> Getter<T> {
    pub fn new(sql: impl Into<String>) -> Self {
        Getter {
            sql: sql.into(),
            _row: PhantomData,
        }
    }
}

impl<T> Getter<T>
where
    T: for<'r> FromRow<'r, SqliteRow> + Send + Unpin,
{
    pub async fn fetch(&self, db_pool: &SqlitePool) -> Result<Vec<T>, QueryError> {
        Ok(sqlx::query_as::<_, T>(&self.sql).fetch_all(db_pool).await?)
    }
}

/// Runs an INSERT whose `:field` parameters are filled from a [`Record`].
pub struct Poster {
    template: Template,
}

impl Poster {
    pub fn new(sql: &str) -> Self {
        Poster {
            template: Template::compile(sql),
        }
    }

    pub fn params(&self) -> &[String] {
        self.template.params()
    }

    /// Returns the number of rows written. Fields of `record` that the
    /// statement does not name are ignored.
    pub async fn insert(&self, db_pool: &SqlitePool, record: &Record) -> Result<u64, QueryError> {
        let mut query = sqlx::query(self.template.sql());
        for name in self.template.params() {
            let value = record
                .get(name)
                .ok_or_else(|| QueryError::MissingField(name.clone()))?;
            query = bind_value(query, name, value)?;
        }

        Ok(query.execute(db_pool).await?.rows_affected())
    }
}

fn bind_value<'q>(query: SqliteQuery<'q>, name: &str, value: &Value) -> Result<SqliteQuery<'q>, QueryError> {
    Ok(match value {
        Value::Null => query.bind(None::<String>),
        Value::Bool(b) => query.bind(*b),
        Value::Number(n) => match n.as_i64() {
            Some(i) => query.bind(i),
            None => query.bind(n.as_f64()),
        },
        Value::String(s) => query.bind(s.clone()),
        Value::Array(_) | Value::Object(_) => {
            return Err(QueryError::UnsupportedValue(name.to_owned()));
        }
    })
}
