//! SQLite-backed store for messages and authors.
//!
//! One pooled connection (`max_connections(1)`) is shared by every request;
//! SQLite serializes access on that connection. All SQL lives here.

use std::str::FromStr;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow};
use sqlx::{FromRow, Row, SqlitePool};
use tracing::instrument;

use postbox_core::{Author, AuthorId, Message, MessageId, NewAuthor, NewMessage};

use crate::error::{map_sqlx_error, StoreError};

/// Explicitly passed persistence handle.
///
/// Opened once in `main` and injected into the router; handlers never reach
/// for a global connection.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: Arc<SqlitePool>,
}

impl SqliteStore {
    /// Open the store at `url` (e.g. `sqlite://my.db` or `sqlite::memory:`),
    /// creating the database file if missing.
    pub async fn connect(url: &str) -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str(url)
            .map_err(|e| map_sqlx_error("parse_database_url", e))?
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .map_err(|e| map_sqlx_error("connect", e))?;

        Ok(Self {
            pool: Arc::new(pool),
        })
    }

    /// Close the underlying connection. Idempotent.
    pub async fn close(&self) {
        self.pool.close().await;
    }

    /// Create missing tables; existing data is untouched.
    #[instrument(skip(self), err)]
    pub async fn sync_schema(&self) -> Result<(), StoreError> {
        // No foreign key constraint on author.message_id: deleting a message
        // leaves its author rows in place.
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS message (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT,
                content TEXT,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("create_message_table", e))?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS author (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                email TEXT NOT NULL,
                message_id INTEGER NOT NULL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("create_author_table", e))?;

        sqlx::query("CREATE INDEX IF NOT EXISTS author_message_id_idx ON author (message_id)")
            .execute(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("create_author_index", e))?;

        Ok(())
    }

    /// List messages, optionally restricted to titles containing `filter` as
    /// a case-sensitive substring. `instr` is used instead of `LIKE` because
    /// SQLite's `LIKE` is case-insensitive for ASCII.
    #[instrument(skip(self), err)]
    pub async fn list_messages(&self, filter: Option<&str>) -> Result<Vec<Message>, StoreError> {
        let rows = sqlx::query(
            r#"
            SELECT id, title, content, created_at, updated_at
            FROM message
            WHERE ?1 IS NULL OR instr(title, ?1) > 0
            ORDER BY id ASC
            "#,
        )
        .bind(filter)
        .fetch_all(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("list_messages", e))?;

        rows.iter().map(decode_message).collect()
    }

    #[instrument(skip(self, new), err)]
    pub async fn create_message(&self, new: NewMessage) -> Result<Message, StoreError> {
        let now = Utc::now();
        let row = sqlx::query(
            r#"
            INSERT INTO message (title, content, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?3)
            RETURNING id, title, content, created_at, updated_at
            "#,
        )
        .bind(new.title)
        .bind(new.content)
        .bind(now)
        .fetch_one(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("create_message", e))?;

        decode_message(&row)
    }

    #[instrument(skip(self), fields(id = %id), err)]
    pub async fn get_message(&self, id: MessageId) -> Result<Option<Message>, StoreError> {
        let row = sqlx::query(
            "SELECT id, title, content, created_at, updated_at FROM message WHERE id = ?1",
        )
        .bind(id.as_i64())
        .fetch_optional(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("get_message", e))?;

        row.as_ref().map(decode_message).transpose()
    }

    /// Persist an already-merged message record, bumping `updated_at`.
    /// Returns false when the record no longer exists.
    #[instrument(skip(self, message), fields(id = %message.id), err)]
    pub async fn update_message(&self, message: &Message) -> Result<bool, StoreError> {
        let result = sqlx::query(
            "UPDATE message SET title = ?1, content = ?2, updated_at = ?3 WHERE id = ?4",
        )
        .bind(&message.title)
        .bind(&message.content)
        .bind(Utc::now())
        .bind(message.id.as_i64())
        .execute(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("update_message", e))?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self), fields(id = %id), err)]
    pub async fn delete_message(&self, id: MessageId) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM message WHERE id = ?1")
            .bind(id.as_i64())
            .execute(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("delete_message", e))?;

        Ok(result.rows_affected() > 0)
    }

    /// Authors owned by `message_id`, in id order.
    #[instrument(skip(self), fields(message_id = %message_id), err)]
    pub async fn list_authors(&self, message_id: MessageId) -> Result<Vec<Author>, StoreError> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, email, message_id, created_at, updated_at
            FROM author
            WHERE message_id = ?1
            ORDER BY id ASC
            "#,
        )
        .bind(message_id.as_i64())
        .fetch_all(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("list_authors", e))?;

        rows.iter().map(decode_author).collect()
    }

    #[instrument(skip(self, new), fields(message_id = %new.message_id), err)]
    pub async fn create_author(&self, new: NewAuthor) -> Result<Author, StoreError> {
        let now = Utc::now();
        let row = sqlx::query(
            r#"
            INSERT INTO author (name, email, message_id, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?4)
            RETURNING id, name, email, message_id, created_at, updated_at
            "#,
        )
        .bind(new.name)
        .bind(new.email)
        .bind(new.message_id.as_i64())
        .bind(now)
        .fetch_one(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("create_author", e))?;

        decode_author(&row)
    }

    /// Look up one author constrained to the owning message *and* the author
    /// id. More than one row for that pair is a store inconsistency and is
    /// reported, never silently first-picked.
    #[instrument(skip(self), fields(message_id = %message_id, author_id = %author_id), err)]
    pub async fn get_author(
        &self,
        message_id: MessageId,
        author_id: AuthorId,
    ) -> Result<Option<Author>, StoreError> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, email, message_id, created_at, updated_at
            FROM author
            WHERE message_id = ?1 AND id = ?2
            "#,
        )
        .bind(message_id.as_i64())
        .bind(author_id.as_i64())
        .fetch_all(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("get_author", e))?;

        if rows.len() > 1 {
            return Err(StoreError::Ambiguous(format!(
                "{} author rows share id {author_id} under message {message_id}",
                rows.len()
            )));
        }

        rows.first().map(decode_author).transpose()
    }

    /// Persist an already-merged author record, bumping `updated_at`. The
    /// WHERE clause keeps the write scoped to the owning message.
    #[instrument(skip(self, author), fields(id = %author.id), err)]
    pub async fn update_author(&self, author: &Author) -> Result<bool, StoreError> {
        let result = sqlx::query(
            "UPDATE author SET name = ?1, email = ?2, updated_at = ?3 \
             WHERE message_id = ?4 AND id = ?5",
        )
        .bind(&author.name)
        .bind(&author.email)
        .bind(Utc::now())
        .bind(author.message_id.as_i64())
        .bind(author.id.as_i64())
        .execute(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("update_author", e))?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self), fields(message_id = %message_id, author_id = %author_id), err)]
    pub async fn delete_author(
        &self,
        message_id: MessageId,
        author_id: AuthorId,
    ) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM author WHERE message_id = ?1 AND id = ?2")
            .bind(message_id.as_i64())
            .bind(author_id.as_i64())
            .execute(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("delete_author", e))?;

        Ok(result.rows_affected() > 0)
    }
}

fn decode_message(row: &SqliteRow) -> Result<Message, StoreError> {
    let row = MessageRow::from_row(row).map_err(|e| StoreError::Database {
        operation: "decode_message_row",
        message: e.to_string(),
    })?;
    Ok(row.into())
}

fn decode_author(row: &SqliteRow) -> Result<Author, StoreError> {
    let row = AuthorRow::from_row(row).map_err(|e| StoreError::Database {
        operation: "decode_author_row",
        message: e.to_string(),
    })?;
    Ok(row.into())
}

// sqlx row types

#[derive(Debug)]
struct MessageRow {
    id: i64,
    title: Option<String>,
    content: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl<'r> FromRow<'r, SqliteRow> for MessageRow {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(MessageRow {
            id: row.try_get("id")?,
            title: row.try_get("title")?,
            content: row.try_get("content")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

impl From<MessageRow> for Message {
    fn from(row: MessageRow) -> Self {
        Message {
            id: MessageId::new(row.id),
            title: row.title,
            content: row.content,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug)]
struct AuthorRow {
    id: i64,
    name: String,
    email: String,
    message_id: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl<'r> FromRow<'r, SqliteRow> for AuthorRow {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(AuthorRow {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            email: row.try_get("email")?,
            message_id: row.try_get("message_id")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

impl From<AuthorRow> for Author {
    fn from(row: AuthorRow) -> Self {
        Author {
            id: AuthorId::new(row.id),
            name: row.name,
            email: row.email,
            message_id: MessageId::new(row.message_id),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
