//! SQLite database layer (embedded, no external dependencies)

use super::update::{BindValue, PartialUpdate};
use anyhow::{Context, Result};
use async_trait::async_trait;
use reservation_core::{Contact, Entity, EntityKind, EntityStore, ReservationError};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Sqlite, SqlitePool};
use std::marker::PhantomData;
use std::str::FromStr;

/// Connection pool plus schema setup
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    pub async fn connect(dsn: &str, max_connections: u32) -> Result<Self> {
        tracing::info!("Opening SQLite database at: {}", dsn);

        let in_memory = dsn.contains(":memory:") || dsn.contains("mode=memory");

        let mut options = SqliteConnectOptions::from_str(dsn)
            .with_context(|| format!("Invalid SQLite data source name: {}", dsn))?
            .create_if_missing(true);
        if !in_memory {
            let parent = options.clone().get_filename().parent().map(|p| p.to_path_buf());
            if let Some(parent) = parent.filter(|p| !p.as_os_str().is_empty()) {
                tracing::info!("Creating parent directory: {}", parent.display());
                tokio::fs::create_dir_all(&parent).await.with_context(|| {
                    format!("Failed to create database directory: {}", parent.display())
                })?;
            }

            options = options
                .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
                .synchronous(sqlx::sqlite::SqliteSynchronous::Normal);
        }

        // Every connection to an in-memory database sees its own empty copy,
        // so keep exactly one alive for the pool's lifetime.
        let pool_options = if in_memory {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(max_connections)
        };

        let pool = pool_options
            .connect_with(options)
            .await
            .with_context(|| format!("Failed to connect to SQLite database at: {}", dsn))?;

        tracing::info!("SQLite connection established, running migrations...");

        Self::run_migrations(&pool)
            .await
            .context("Failed to run database migrations")?;

        tracing::info!("Database initialization complete");

        Ok(Self { pool })
    }

    async fn run_migrations(pool: &SqlitePool) -> Result<()> {
        for kind in [EntityKind::Candidate, EntityKind::Recruiter] {
            let ddl = format!(
                r#"
                CREATE TABLE IF NOT EXISTS {} (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    full_name TEXT,
                    email TEXT,
                    phone INTEGER,
                    created_at DATETIME DEFAULT CURRENT_TIMESTAMP,
                    updated_at DATETIME DEFAULT CURRENT_TIMESTAMP
                )
                "#,
                kind.table()
            );
            sqlx::query(&ddl).execute(pool).await?;
        }

        Ok(())
    }

    pub fn pool(&self) -> SqlitePool {
        self.pool.clone()
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

/// Entity store backed by the kind's table
pub struct SqlStore<E: Entity> {
    pool: SqlitePool,
    _kind: PhantomData<fn() -> E>,
}

impl<E: Entity> SqlStore<E> {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            _kind: PhantomData,
        }
    }

    fn table() -> &'static str {
        E::KIND.table()
    }

    /// Ids are database integers in their canonical decimal form; anything
    /// else (including `01` or `+1`) cannot name a row
    fn parse_id(id: &str) -> reservation_core::Result<i64> {
        id.parse::<i64>()
            .ok()
            .filter(|n| n.to_string() == id)
            .ok_or_else(|| ReservationError::not_found(E::KIND, id))
    }

    /// An exhausted result set means the row is gone; anything else is
    /// wrapped with the failing operation
    fn map_err(e: sqlx::Error, op: &str, id: &str) -> ReservationError {
        match e {
            sqlx::Error::RowNotFound => ReservationError::not_found(E::KIND, id),
            e => ReservationError::Internal(format!(
                "failed to {} {} with id {}: {}",
                op,
                E::KIND,
                id,
                e
            )),
        }
    }
}

#[async_trait]
impl<E: Entity> EntityStore<E> for SqlStore<E> {
    async fn list(&self) -> reservation_core::Result<Vec<E>> {
        let query = format!(
            "SELECT id, full_name, email, phone FROM {} ORDER BY id",
            Self::table()
        );

        let rows: Vec<ContactRow> = sqlx::query_as(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                ReservationError::Internal(format!("failed to list {}s: {}", E::KIND, e))
            })?;

        Ok(rows.into_iter().map(ContactRow::into_entity).collect())
    }

    async fn add(&self, entity: E) -> reservation_core::Result<String> {
        let query = format!(
            "INSERT INTO {} (full_name, email, phone) VALUES (?1, ?2, ?3) RETURNING id",
            Self::table()
        );
        let contact = entity.contact();

        let id: i64 = sqlx::query_scalar(&query)
            .bind(contact.full_name.clone())
            .bind(contact.email.clone())
            .bind(contact.phone)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                ReservationError::Internal(format!("failed to add {}: {}", E::KIND, e))
            })?;

        Ok(id.to_string())
    }

    async fn get(&self, id: &str) -> reservation_core::Result<E> {
        let row_id = Self::parse_id(id)?;
        let query = format!(
            "SELECT id, full_name, email, phone FROM {} WHERE id = ?1",
            Self::table()
        );

        let row: ContactRow = sqlx::query_as(&query)
            .bind(row_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| Self::map_err(e, "get", id))?;

        Ok(row.into_entity())
    }

    async fn update(&self, id: &str, entity: E) -> reservation_core::Result<()> {
        let update = PartialUpdate::from_contact(entity.contact());
        if update.is_empty() {
            return Err(ReservationError::NoFieldsToUpdate);
        }
        let row_id = Self::parse_id(id)?;

        let query = update.to_sql(Self::table());
        let mut statement = sqlx::query_scalar::<Sqlite, i64>(&query);
        for value in update.values() {
            statement = match value {
                BindValue::Text(text) => statement.bind(text.clone()),
                BindValue::Integer(number) => statement.bind(*number),
            };
        }

        statement
            .bind(row_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| Self::map_err(e, "update", id))?;

        Ok(())
    }

    async fn delete(&self, id: &str) -> reservation_core::Result<()> {
        let row_id = Self::parse_id(id)?;
        let query = format!("DELETE FROM {} WHERE id = ?1 RETURNING id", Self::table());

        sqlx::query_scalar::<Sqlite, i64>(&query)
            .bind(row_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| Self::map_err(e, "delete", id))?;

        Ok(())
    }
}

// Helper struct for sqlx query_as
#[derive(sqlx::FromRow)]
struct ContactRow {
    id: i64,
    full_name: Option<String>,
    email: Option<String>,
    phone: Option<i64>,
}

impl ContactRow {
    fn into_entity<E: Entity>(self) -> E {
        E::from_parts(
            self.id.to_string(),
            Contact {
                full_name: self.full_name,
                email: self.email,
                phone: self.phone,
            },
        )
    }
}
