//! Domain types for the tournament finder.
//!
//! This crate is I/O-free: it holds the record shapes persisted by the
//! hosted data layer, the client-facing shapes served over HTTP, and the
//! conversions between them (field naming, coordinate axis order, date
//! defaulting). Everything that talks to the network lives in
//! `hemamap-upstream` and `hemamap-api`.

pub mod error;
pub mod roles;
pub mod tournament;
pub mod types;
pub mod update;
