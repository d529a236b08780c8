//! User validation contract

use ud_core::contract::{Contract, ValidationResult};
use ud_core::error::ValidationErrors;
use validator::Validate;

use crate::user::UserAttributes;

/// Fixed rendering order for field messages.
const FIELD_ORDER: [&str; 3] = ["login", "phone", "pass"];

/// Contract applied to both create and update candidates.
///
/// Runs the derive-level constraints on [`UserAttributes`] and renders them
/// as ordered `"<field>: <message>"` entries, collecting every violation.
pub struct UserContract;

impl Contract<UserAttributes> for UserContract {
    fn validate(&self, entity: &UserAttributes) -> ValidationResult {
        let mut errors = ValidationErrors::new();

        if let Err(failures) = Validate::validate(entity) {
            let by_field = failures.field_errors();
            for field in FIELD_ORDER {
                if let Some(field_failures) = by_field.get(field) {
                    for failure in field_failures.iter() {
                        let message = failure.message.as_deref().unwrap_or("is invalid");
                        errors.add(field, message);
                    }
                }
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
