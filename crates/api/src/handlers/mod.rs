//! Request handlers, one submodule per resource.
//!
//! Handlers are thin: they resolve identity, validate input, translate
//! between the client shape and the persisted shape via `hemamap_core`,
//! and forward to the hosted data layer through `hemamap_upstream`,
//! mapping failures via [`crate::error::AppError`].

pub mod auth;
pub mod moderation;
pub mod submission;
pub mod tournaments;
pub mod updates;
pub mod uploads;
pub mod user;
