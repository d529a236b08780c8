//! Axum extractors for API handlers

use std::sync::Arc;

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::{header, request::Parts},
};
use ud_auth::{extract_bearer_token, AuthError, Identity, Role, TokenTable};
use ud_store::UserStore;

use crate::error::ApiError;

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn UserStore>,
    pub tokens: Arc<TokenTable>,
}

impl AppState {
    pub fn new(store: Arc<dyn UserStore>, tokens: Arc<TokenTable>) -> Self {
        Self { store, tokens }
    }
}

/// Caller identity derived from the `Authorization` header.
///
/// A request without the header resolves to anonymous rather than being
/// rejected outright; each operation then applies its own role requirement
/// through [`RequestIdentity::require`]. A header that is present but
/// malformed or carries an unknown token is rejected here with 401.
pub struct RequestIdentity(Option<Identity>);

#[async_trait]
impl<S> FromRequestParts<S> for RequestIdentity
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);

        let Some(value) = parts.headers.get(header::AUTHORIZATION) else {
            return Ok(Self(None));
        };

        let token = value
            .to_str()
            .ok()
            .and_then(extract_bearer_token)
            .ok_or(AuthError::MissingToken)?;

        match app_state.tokens.resolve(token) {
            Some(identity) => Ok(Self(Some(identity.clone()))),
            None => Err(AuthError::InvalidToken.into()),
        }
    }
}

impl RequestIdentity {
    /// Enforce an operation's role requirement.
    ///
    /// Anonymous callers are rejected with the missing-token reason; callers
    /// authenticated under an insufficient role get a bare 401, matching the
    /// per-operation allow-list behavior of the API contract.
    pub fn require(&self, role: Role) -> Result<&Identity, ApiError> {
        match &self.0 {
            None => Err(AuthError::MissingToken.into()),
            Some(identity) if identity.has_role(role) => Ok(identity),
            Some(_) => Err(ApiError::Unauthorized { message: None }),
        }
    }
}
