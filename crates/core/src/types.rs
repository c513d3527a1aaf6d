/// Tournament, staged-tournament and update ids are BIGSERIAL upstream.
pub type DbId = i64;

/// User ids are the auth provider's subject claim (a UUID string).
pub type UserId = String;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
