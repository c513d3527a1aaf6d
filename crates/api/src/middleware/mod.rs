//! Authentication and authorization middleware extractors.
//!
//! - [`auth::AuthUser`] -- Extracts the caller's identity from a bearer token.
//! - [`rbac::RequireAdmin`] -- Requires the administrator role.

pub mod auth;
pub mod rbac;
