//! User representer
//!
//! Converts user records into their wire representation.

use serde::Serialize;
use ud_core::Id;
use ud_store::User;

/// User representation for API responses.
///
/// Every field is always present; `pass` is echoed verbatim per the API
/// contract.
#[derive(Debug, Clone, Serialize)]
pub struct UserRepresentation {
    pub id: Id,
    pub login: String,
    pub phone: String,
    pub pass: String,
}

/// User representer
pub struct UserRepresenter;

impl UserRepresenter {
    /// Render a single user.
    pub fn represent(user: User) -> UserRepresentation {
        UserRepresentation {
            id: user.id,
            login: user.login,
            phone: user.phone,
            pass: user.pass,
        }
    }

    /// Render a collection, preserving store order.
    pub fn represent_all(users: Vec<User>) -> Vec<UserRepresentation> {
        users.into_iter().map(Self::represent).collect()
    }
}
