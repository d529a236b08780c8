//! # ud-auth
//!
//! Authentication for UserDir RS: a static bearer-token table resolving
//! opaque token strings to identities with fixed role sets. Tokens are
//! compared by exact string match only; there is no expiry and no signature
//! verification.

pub mod identity;
pub mod tokens;

pub use identity::*;
pub use tokens::*;
