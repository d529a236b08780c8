//! User store abstraction

use async_trait::async_trait;
use thiserror::Error;
use ud_core::Id;

use crate::user::{User, UserAttributes};

/// Error type for store operations
#[derive(Debug, Error)]
pub enum StoreError {
    /// The (login, pass) uniqueness rule was violated.
    #[error("user with this login and pass already exists")]
    Conflict,

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("store error: {0}")]
    Internal(String),
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence seam for user records.
///
/// Implementations enforce the (login, pass) uniqueness invariant and report
/// violations as [`StoreError::Conflict`] — a typed result, not a caught
/// storage exception.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Find a user by primary key.
    async fn find_by_id(&self, id: Id) -> StoreResult<Option<User>>;

    /// All users, in insertion order.
    async fn find_all(&self) -> StoreResult<Vec<User>>;

    /// Users whose login equals `login`, in insertion order.
    async fn find_by_login(&self, login: &str) -> StoreResult<Vec<User>>;

    /// Insert a new record, returning it with its assigned id.
    async fn insert(&self, attrs: &UserAttributes) -> StoreResult<User>;

    /// Overwrite the mutable fields of `id`. Returns `None` when the record
    /// does not exist.
    async fn update(&self, id: Id, attrs: &UserAttributes) -> StoreResult<Option<User>>;

    /// Remove a record. Returns whether anything was deleted.
    async fn delete(&self, id: Id) -> StoreResult<bool>;
}
