//! Static bearer-token table
//!
//! Maps opaque token strings to identities. The table is built once from
//! configuration at startup and shared through the application state, so the
//! authenticator and every per-operation guard consult the same mapping.

use std::collections::HashMap;

use thiserror::Error;
use ud_core::config::AuthConfig;

use crate::identity::{Identity, Role};

/// Authentication errors
///
/// The display strings for `MissingToken` and `InvalidToken` are part of the
/// wire contract: they appear verbatim in 401 response bodies.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("No Bearer token provided")]
    MissingToken,
    #[error("Invalid API Token")]
    InvalidToken,
    #[error("unknown role in token table: {0}")]
    UnknownRole(String),
}

/// Token-to-identity mapping.
#[derive(Debug, Clone)]
pub struct TokenTable {
    tokens: HashMap<String, Identity>,
}

impl TokenTable {
    /// Build the table from configuration.
    ///
    /// Fails on role names the application does not know, rather than
    /// silently granting an empty role set.
    pub fn from_config(config: &AuthConfig) -> Result<Self, AuthError> {
        let mut tokens = HashMap::new();
        for entry in &config.tokens {
            let roles = entry
                .roles
                .iter()
                .map(|name| {
                    Role::from_name(name).ok_or_else(|| AuthError::UnknownRole(name.clone()))
                })
                .collect::<Result<Vec<_>, _>>()?;
            tokens.insert(entry.token.clone(), Identity::new(&entry.identity, roles));
        }
        Ok(Self { tokens })
    }

    /// Resolve a token by exact string comparison.
    pub fn resolve(&self, token: &str) -> Option<&Identity> {
        self.tokens.get(token)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// Extract the token from an `Authorization` header value.
///
/// The scheme prefix must be exactly `"Bearer "`; the remainder is returned
/// untrimmed so the table comparison stays an exact match.
pub fn extract_bearer_token(authorization: &str) -> Option<&str> {
    authorization.strip_prefix("Bearer ")
}
