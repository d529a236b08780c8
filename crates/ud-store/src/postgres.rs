//! PostgreSQL-backed user store

use async_trait::async_trait;
use sqlx::PgPool;
use ud_core::Id;

use crate::store::{StoreError, StoreResult, UserStore};
use crate::user::{User, UserAttributes};

/// User store backed by the `users` table (see `schema.sql`).
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Translate write failures, surfacing unique-constraint violations as
/// [`StoreError::Conflict`].
fn write_error(e: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db) = &e {
        if matches!(db.kind(), sqlx::error::ErrorKind::UniqueViolation) {
            return StoreError::Conflict;
        }
    }
    StoreError::Database(e)
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn find_by_id(&self, id: Id) -> StoreResult<Option<User>> {
        let row = sqlx::query_as::<_, User>(
            r#"
            SELECT id, login, phone, pass
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn find_all(&self) -> StoreResult<Vec<User>> {
        let rows = sqlx::query_as::<_, User>(
            r#"
            SELECT id, login, phone, pass
            FROM users
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn find_by_login(&self, login: &str) -> StoreResult<Vec<User>> {
        let rows = sqlx::query_as::<_, User>(
            r#"
            SELECT id, login, phone, pass
            FROM users
            WHERE login = $1
            ORDER BY id ASC
            "#,
        )
        .bind(login)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn insert(&self, attrs: &UserAttributes) -> StoreResult<User> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (login, phone, pass)
            VALUES ($1, $2, $3)
            RETURNING id, login, phone, pass
            "#,
        )
        .bind(&attrs.login)
        .bind(&attrs.phone)
        .bind(&attrs.pass)
        .fetch_one(&self.pool)
        .await
        .map_err(write_error)
    }

    async fn update(&self, id: Id, attrs: &UserAttributes) -> StoreResult<Option<User>> {
        sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET login = $2, phone = $3, pass = $4
            WHERE id = $1
            RETURNING id, login, phone, pass
            "#,
        )
        .bind(id)
        .bind(&attrs.login)
        .bind(&attrs.phone)
        .bind(&attrs.pass)
        .fetch_optional(&self.pool)
        .await
        .map_err(write_error)
    }

    async fn delete(&self, id: Id) -> StoreResult<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
