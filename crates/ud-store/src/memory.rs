//! In-memory user store
//!
//! Backs tests and database-less runs. A `BTreeMap` keyed by id preserves
//! insertion order for listings, matching the PostgreSQL `ORDER BY id`.

use std::collections::BTreeMap;
use std::sync::RwLock;

use async_trait::async_trait;
use ud_core::Id;

use crate::store::{StoreError, StoreResult, UserStore};
use crate::user::{User, UserAttributes};

#[derive(Default)]
struct Inner {
    users: BTreeMap<Id, User>,
    next_id: Id,
}

/// In-memory [`UserStore`] implementation.
#[derive(Default)]
pub struct MemoryUserStore {
    inner: RwLock<Inner>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned() -> StoreError {
    StoreError::Internal("store lock poisoned".to_string())
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_id(&self, id: Id) -> StoreResult<Option<User>> {
        let inner = self.inner.read().map_err(|_| poisoned())?;
        Ok(inner.users.get(&id).cloned())
    }

    async fn find_all(&self) -> StoreResult<Vec<User>> {
        let inner = self.inner.read().map_err(|_| poisoned())?;
        Ok(inner.users.values().cloned().collect())
    }

    async fn find_by_login(&self, login: &str) -> StoreResult<Vec<User>> {
        let inner = self.inner.read().map_err(|_| poisoned())?;
        Ok(inner
            .users
            .values()
            .filter(|u| u.login == login)
            .cloned()
            .collect())
    }

    async fn insert(&self, attrs: &UserAttributes) -> StoreResult<User> {
        let mut inner = self.inner.write().map_err(|_| poisoned())?;

        if inner
            .users
            .values()
            .any(|u| u.login == attrs.login && u.pass == attrs.pass)
        {
            return Err(StoreError::Conflict);
        }

        inner.next_id += 1;
        let user = User {
            id: inner.next_id,
            login: attrs.login.clone(),
            phone: attrs.phone.clone(),
            pass: attrs.pass.clone(),
        };
        inner.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update(&self, id: Id, attrs: &UserAttributes) -> StoreResult<Option<User>> {
        let mut inner = self.inner.write().map_err(|_| poisoned())?;

        if !inner.users.contains_key(&id) {
            return Ok(None);
        }
        if inner
            .users
            .values()
            .any(|u| u.id != id && u.login == attrs.login && u.pass == attrs.pass)
        {
            return Err(StoreError::Conflict);
        }

        let user = User {
            id,
            login: attrs.login.clone(),
            phone: attrs.phone.clone(),
            pass: attrs.pass.clone(),
        };
        inner.users.insert(id, user.clone());
        Ok(Some(user))
    }

    async fn delete(&self, id: Id) -> StoreResult<bool> {
        let mut inner = self.inner.write().map_err(|_| poisoned())?;
        Ok(inner.users.remove(&id).is_some())
    }
}
