//! Per-session access context and scoped check suspension.

use std::cell::Cell;

use crate::{AuthzError, Permission, Principal, authorize};

/// Access context of one edit session.
///
/// Reads consult [`AccessContext::ensure`] before touching a record. Checks can
/// be suspended for a single scope with [`AccessContext::without_access_check`];
/// the returned guard restores the previous state when dropped, including on
/// early returns and unwinding.
#[derive(Debug)]
pub struct AccessContext {
    principal: Principal,
    check_access: Cell<bool>,
}

impl AccessContext {
    pub fn new(principal: Principal) -> Self {
        Self {
            principal,
            check_access: Cell::new(true),
        }
    }

    pub fn check_access(&self) -> bool {
        self.check_access.get()
    }

    /// Suspend access checks until the guard is dropped.
    #[must_use = "access checks are restored as soon as the guard is dropped"]
    pub fn without_access_check(&self) -> AccessGuard<'_> {
        let previous = self.check_access.replace(false);
        tracing::debug!(user = %self.principal.user_id, "access checks suspended");
        AccessGuard {
            context: self,
            previous,
        }
    }

    /// Check `required` unless checks are suspended.
    pub fn ensure(&self, required: &Permission) -> Result<(), AuthzError> {
        if !self.check_access() {
            return Ok(());
        }
        authorize(&self.principal, required)
    }
}

/// Restores the access-check state captured when it was created.
#[derive(Debug)]
pub struct AccessGuard<'a> {
    context: &'a AccessContext,
    previous: bool,
}

impl Drop for AccessGuard<'_> {
    fn drop(&mut self) {
        self.context.check_access.set(self.previous);
        tracing::debug!(check_access = self.previous, "access checks restored");
    }
}
