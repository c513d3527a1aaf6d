//! Identity resolution and ownership checks.
//!
//! - [`claims`] -- unverified decoding of the bearer token's payload.
//! - [`ownership`] -- admin-or-owner authorization for tournament edits.

pub mod claims;
pub mod ownership;
