//! Announcement-style tournament updates.
//!
//! Updates are append-only; ordering is by creation timestamp descending,
//! so "the latest update" is always the first element of a listing.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::types::{DbId, Timestamp};

/// Persisted update row (snake_case, as stored by the data layer).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateRecord {
    pub id: DbId,
    pub tournament_id: DbId,
    pub message: String,
    pub created_at: Timestamp,
}

/// Client-facing update shape (camelCase).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TournamentUpdate {
    pub id: DbId,
    pub tournament_id: DbId,
    pub message: String,
    pub created_at: Timestamp,
}

impl TournamentUpdate {
    pub fn from_record(rec: UpdateRecord) -> Self {
        Self {
            id: rec.id,
            tournament_id: rec.tournament_id,
            message: rec.message,
            created_at: rec.created_at,
        }
    }
}

/// Sort update records newest-first.
pub fn sort_newest_first(records: &mut [UpdateRecord]) {
    records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}

/// Reduce a batch of update records to the newest update per tournament.
///
/// Used by the public listing to attach `latestUpdate` to each tournament
/// with a single upstream fetch instead of one per row.
pub fn latest_per_tournament(mut records: Vec<UpdateRecord>) -> HashMap<DbId, TournamentUpdate> {
    sort_newest_first(&mut records);

    let mut latest = HashMap::new();
    for rec in records {
        latest
            .entry(rec.tournament_id)
            .or_insert_with(|| TournamentUpdate::from_record(rec));
    }
    latest
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn update(id: DbId, tournament_id: DbId, secs: i64) -> UpdateRecord {
        UpdateRecord {
            id,
            tournament_id,
            message: format!("update {id}"),
            created_at: Utc.timestamp_opt(secs, 0).unwrap(),
        }
    }

    #[test]
    fn test_sort_newest_first() {
        let mut records = vec![update(1, 7, 100), update(2, 7, 300), update(3, 7, 200)];
        sort_newest_first(&mut records);

        let ids: Vec<DbId> = records.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }

    #[test]
    fn test_latest_per_tournament_picks_newest() {
        let records = vec![
            update(1, 7, 100),
            update(2, 7, 300),
            update(3, 9, 50),
            update(4, 7, 200),
        ];

        let latest = latest_per_tournament(records);
        assert_eq!(latest.len(), 2);
        assert_eq!(latest[&7].id, 2);
        assert_eq!(latest[&9].id, 3);
    }

    #[test]
    fn test_latest_per_tournament_empty() {
        assert!(latest_per_tournament(Vec::new()).is_empty());
    }
}
