//! Base contract system
//!
//! The validation seam between request handling and persistence: a contract
//! takes a candidate record and returns every field violation at once.

use crate::error::ValidationErrors;

/// Result of contract validation
pub type ValidationResult = Result<(), ValidationErrors>;

/// Base contract trait
pub trait Contract<T>: Send + Sync {
    /// Validate the entity, collecting all violations rather than failing fast.
    fn validate(&self, entity: &T) -> ValidationResult;
}
