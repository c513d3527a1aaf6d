//! Well-known role names.
//!
//! Roles are assigned by the auth provider and carried in the token's
//! `app_metadata.role` claim; this crate only needs to recognize the
//! administrator role.

pub const ROLE_ADMIN: &str = "admin";
