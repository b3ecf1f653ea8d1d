use std::str::FromStr;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    FromRow, SqlitePool,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct User {
    pub username: String,
    // unique: username
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Room {
    pub roomname: String,
    // unique: roomname
}

/// A message as listed to clients, with its author and room resolved to names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Message {
    pub text: String,
    pub username: String,
    pub roomname: String,
}

pub const SELECT_USERS: &str = "SELECT username FROM users ORDER BY user_id";
pub const INSERT_USER: &str = "INSERT INTO users (username) VALUES (:username)";

pub const SELECT_ROOMS: &str = "SELECT roomname FROM rooms ORDER BY room_id";
pub const INSERT_ROOM: &str = "INSERT INTO rooms (roomname) VALUES (:roomname)";

pub const SELECT_MESSAGES: &str = "\
    SELECT messages.text AS text, users.username AS username, rooms.roomname AS roomname \
    FROM messages \
    JOIN users ON users.user_id = messages.user_id \
    JOIN rooms ON rooms.room_id = messages.room_id \
    ORDER BY messages.message_id";

// Names resolve inside the statement. An unknown name yields NULL, which the
// NOT NULL columns reject, so nothing is auto-created.
pub const INSERT_MESSAGE: &str = "\
    INSERT INTO messages (user_id, room_id, text) VALUES (\
    (SELECT user_id FROM users WHERE username = :username), \
    (SELECT room_id FROM rooms WHERE roomname = :roomname), \
    :text)";

/// Opens a pool on `database_url` and brings the schema up to date.
///
/// An in-memory database lives only as long as its connection, so for
/// `:memory:` URLs the pool is pinned to one connection that never expires.
pub async fn connect(database_url: &str, max_connections: u32) -> anyhow::Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(database_url)
        .with_context(|| format!("invalid database url {database_url}"))?
        .foreign_keys(true);

    let pool_options = if database_url.contains(":memory:") {
        SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new().max_connections(max_connections)
    };

    let db_pool = pool_options
        .connect_with(options)
        .await
        .with_context(|| format!("failed to connect to {database_url}"))?;

    sqlx::migrate!()
        .run(&db_pool)
        .await
        .context("failed to run migrations")?;

    tracing::info!("connected to {database_url}");
    Ok(db_pool)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn migrations_create_all_tables() {
        let db_pool = connect("sqlite::memory:", 1).await.unwrap();
        let tables: Vec<(String,)> = sqlx::query_as(
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name IN ('users', 'rooms', 'messages') ORDER BY name",
        )
        .fetch_all(&db_pool)
        .await
        .unwrap();
        let tables: Vec<_> = tables.into_iter().map(|(name,)| name).collect();
        assert_eq!(tables, ["messages", "rooms", "users"]);
    }

    #[tokio::test]
    async fn unreachable_database_is_an_error() {
        let err = connect("sqlite:///no/such/dir/chat.db", 1).await.unwrap_err();
        assert!(err.to_string().contains("failed to connect"), "{err}");
    }
}
