//! Data-layer table names.
//!
//! These must match the hosted backend's schema.

pub const TOURNAMENTS: &str = "tournaments";
pub const STAGED_TOURNAMENTS: &str = "staged_tournaments";
pub const TOURNAMENT_OWNERS: &str = "tournament_owners";
pub const TOURNAMENT_UPDATES: &str = "tournament_updates";
pub const USER_FAVOURITES: &str = "user_favourites";
