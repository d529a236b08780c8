//! User model
//!
//! Table: users

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use ud_core::Id;
use validator::Validate;

/// User record as stored and as serialized to clients.
///
/// The wire shape is exactly `{id, login, phone, pass}`; no field is omitted
/// or masked. `pass` is carried verbatim — the API contract exposes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Id,
    pub login: String,
    pub phone: String,
    pub pass: String,
}

impl User {
    /// The mutable field state of this record.
    pub fn attributes(&self) -> UserAttributes {
        UserAttributes {
            login: self.login.clone(),
            phone: self.phone.clone(),
            pass: self.pass.clone(),
        }
    }
}

/// Candidate field state for a create or update.
///
/// Validated as a whole before any write, so partial updates are checked
/// against the merged record rather than the incoming fragment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Validate)]
pub struct UserAttributes {
    #[validate(length(min = 1, message = "must not be blank"))]
    pub login: String,

    #[validate(length(min = 1, message = "must not be blank"))]
    pub phone: String,

    #[validate(length(min = 1, message = "must not be blank"))]
    pub pass: String,
}

impl UserAttributes {
    /// Overlay present fields onto this state; absent fields keep their value.
    pub fn merged(
        self,
        login: Option<String>,
        phone: Option<String>,
        pass: Option<String>,
    ) -> Self {
        Self {
            login: login.unwrap_or(self.login),
            phone: phone.unwrap_or(self.phone),
            pass: pass.unwrap_or(self.pass),
        }
    }
}
