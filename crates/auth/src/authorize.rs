use thiserror::Error;

use prodparty_core::{DomainError, UserId};

use crate::Permission;

/// A resolved principal for access decisions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub user_id: UserId,
    pub permissions: Vec<Permission>,
}

impl Principal {
    pub fn new(user_id: UserId, permissions: impl IntoIterator<Item = Permission>) -> Self {
        Self {
            user_id,
            permissions: permissions.into_iter().collect(),
        }
    }

    /// Principal holding the wildcard permission.
    pub fn root() -> Self {
        Self::new(UserId::new(), [Permission::WILDCARD])
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthzError {
    #[error("forbidden: missing permission '{0}'")]
    Forbidden(String),
}

impl From<AuthzError> for DomainError {
    fn from(err: AuthzError) -> Self {
        DomainError::unauthorized(err.to_string())
    }
}

/// Authorize a principal for a single permission.
///
/// - No IO
/// - No panics
/// - No business logic (pure policy check)
pub fn authorize(principal: &Principal, required: &Permission) -> Result<(), AuthzError> {
    let granted = principal
        .permissions
        .iter()
        .any(|p| p.is_wildcard() || p == required);

    if granted {
        Ok(())
    } else {
        Err(AuthzError::Forbidden(required.as_str().to_string()))
    }
}
