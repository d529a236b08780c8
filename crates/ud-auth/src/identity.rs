//! Identity and role types

use std::collections::HashSet;

/// Application roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Admin,
    User,
}

impl Role {
    /// Parse a role name as it appears in configuration.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "admin" => Some(Role::Admin),
            "user" => Some(Role::User),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::User => "user",
        }
    }
}

/// An authenticated caller: a name plus the roles granted to it.
///
/// Identities are never persisted; they are derived per request from the
/// bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    name: String,
    roles: HashSet<Role>,
}

impl Identity {
    pub fn new(name: impl Into<String>, roles: impl IntoIterator<Item = Role>) -> Self {
        Self {
            name: name.into(),
            roles: roles.into_iter().collect(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    pub fn is_admin(&self) -> bool {
        self.has_role(Role::Admin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_from_name() {
        assert_eq!(Role::from_name("admin"), Some(Role::Admin));
        assert_eq!(Role::from_name("user"), Some(Role::User));
        assert_eq!(Role::from_name("superuser"), None);
        assert_eq!(Role::from_name("Admin"), None);
    }

    #[test]
    fn test_identity_roles() {
        let admin = Identity::new("admin", [Role::Admin, Role::User]);
        assert!(admin.is_admin());
        assert!(admin.has_role(Role::User));

        let user = Identity::new("user", [Role::User]);
        assert!(!user.is_admin());
        assert!(user.has_role(Role::User));
        assert_eq!(user.name(), "user");
    }
}
