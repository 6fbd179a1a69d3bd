//! `prodparty-auth`: read-access checks for domain records.
//!
//! This crate is intentionally decoupled from HTTP and storage. It provides the
//! permission model and the per-session [`AccessContext`] whose checks can be
//! suspended for one scoped read through an [`AccessGuard`].

pub mod authorize;
pub mod context;
pub mod permissions;

pub use authorize::{AuthzError, Principal, authorize};
pub use context::{AccessContext, AccessGuard};
pub use permissions::Permission;
