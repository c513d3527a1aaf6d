//! Tournament record shapes and the data-shape adapter.
//!
//! The hosted data layer persists rows with snake_case column names and
//! coordinates in `[lat, lon]` order. The client boundary speaks camelCase
//! and `[lon, lat]` (the order the map widget consumes). Every read path
//! goes through [`Tournament::from_record`] and every write path through
//! [`TournamentDraft`] / [`TournamentPatch`], so each boundary crossing
//! performs the axis swap exactly once.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::types::{DbId, Timestamp, UserId};
use crate::update::TournamentUpdate;

/// A discipline offered at a tournament, paired with its entry category
/// ("Open", "Women", ...). The persisted column for the category is `type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Discipline {
    pub name: String,
    #[serde(rename = "type")]
    pub category: String,
}

/// A coordinate pair. Which axis comes first depends on the side of the
/// boundary: `[lat, lon]` persisted, `[lon, lat]` client-facing.
pub type Coordinates = [f64; 2];

/// Swap the axis order of a coordinate pair.
///
/// This is the only conversion between persisted `[lat, lon]` and
/// presentation `[lon, lat]`. It is self-inverse, so the invariant to hold
/// is simply: call it exactly once per boundary crossing.
pub fn swap_axes(c: Coordinates) -> Coordinates {
    [c[1], c[0]]
}

// ---------------------------------------------------------------------------
// Persisted shapes
// ---------------------------------------------------------------------------

/// A published tournament row as persisted by the data layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TournamentRecord {
    pub id: DbId,
    pub name: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub date_to: Option<String>,
    #[serde(default)]
    pub disciplines: Vec<Discipline>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub venue_details: String,
    #[serde(default)]
    pub registration_link: String,
    #[serde(default)]
    pub rules_link: String,
    #[serde(default)]
    pub contact_email: String,
    #[serde(default)]
    pub logo_url: Option<String>,
    /// Persisted axis order: `[lat, lon]`.
    #[serde(default)]
    pub coordinates: Option<Coordinates>,
    #[serde(default)]
    pub submitted_by: Option<String>,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
}

/// A staged (user-submitted, pending review) tournament row.
///
/// Same informational shape as [`TournamentRecord`] plus the submitting
/// user, the submission timestamp, and the `resolved` marker set by the
/// moderation pipeline. Staged ids and published ids are distinct entity
/// spaces even though the shapes match.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StagedTournamentRecord {
    pub id: DbId,
    pub name: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub date_to: Option<String>,
    #[serde(default)]
    pub disciplines: Vec<Discipline>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub venue_details: String,
    #[serde(default)]
    pub registration_link: String,
    #[serde(default)]
    pub rules_link: String,
    #[serde(default)]
    pub contact_email: String,
    #[serde(default)]
    pub logo_url: Option<String>,
    /// Persisted axis order: `[lat, lon]`.
    #[serde(default)]
    pub coordinates: Option<Coordinates>,
    #[serde(default)]
    pub user_id: Option<UserId>,
    #[serde(default)]
    pub submitted_by: Option<String>,
    #[serde(default)]
    pub resolved: bool,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
}

impl StagedTournamentRecord {
    /// Build the published-tournament insert payload for approval.
    ///
    /// Copies every informational field and stamps a fresh `created_at`.
    /// The staged row's own id, its `user_id` and its `resolved` flag are
    /// not carried over; `submitted_by` is kept because the published shape
    /// records an optional submitter identity.
    pub fn to_published_payload(&self, created_at: Timestamp) -> Value {
        json!({
            "name": self.name,
            "location": self.location,
            "date": self.date,
            "date_to": self.date_to,
            "disciplines": self.disciplines,
            "description": self.description,
            "venue_details": self.venue_details,
            "registration_link": self.registration_link,
            "rules_link": self.rules_link,
            "contact_email": self.contact_email,
            "logo_url": self.logo_url,
            "coordinates": self.coordinates,
            "submitted_by": self.submitted_by,
            "created_at": created_at,
        })
    }
}

// ---------------------------------------------------------------------------
// Client-facing shapes
// ---------------------------------------------------------------------------

/// A published tournament in client shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tournament {
    pub id: DbId,
    pub name: String,
    pub location: String,
    pub date: String,
    /// End date; defaults to the start date when the record has none.
    pub date_to: String,
    pub disciplines: Vec<Discipline>,
    pub description: String,
    pub venue_details: String,
    pub registration_link: String,
    pub rules_link: String,
    pub contact_email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
    /// Presentation axis order: `[lon, lat]`.
    #[serde(default)]
    pub coordinates: Option<Coordinates>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submitted_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latest_update: Option<TournamentUpdate>,
}

impl Tournament {
    /// Convert a persisted row to client shape: camelCase keys, `date_to`
    /// defaulted to the start date, coordinates swapped to `[lon, lat]`.
    pub fn from_record(rec: TournamentRecord) -> Self {
        let date_to = match rec.date_to {
            Some(d) if !d.is_empty() => d,
            _ => rec.date.clone(),
        };
        Self {
            id: rec.id,
            name: rec.name,
            location: rec.location,
            date: rec.date,
            date_to,
            disciplines: rec.disciplines,
            description: rec.description,
            venue_details: rec.venue_details,
            registration_link: rec.registration_link,
            rules_link: rec.rules_link,
            contact_email: rec.contact_email,
            logo_url: rec.logo_url,
            coordinates: rec.coordinates.map(swap_axes),
            submitted_by: rec.submitted_by,
            latest_update: None,
        }
    }

    /// Attach the newest update for this tournament (listing endpoint).
    pub fn with_latest_update(mut self, update: Option<TournamentUpdate>) -> Self {
        self.latest_update = update;
        self
    }
}

/// A staged tournament in client shape (the submitter's own listing).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StagedTournament {
    pub id: DbId,
    pub name: String,
    pub location: String,
    pub date: String,
    pub date_to: String,
    pub disciplines: Vec<Discipline>,
    pub description: String,
    pub venue_details: String,
    pub registration_link: String,
    pub rules_link: String,
    pub contact_email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
    /// Presentation axis order: `[lon, lat]`.
    #[serde(default)]
    pub coordinates: Option<Coordinates>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submitted_by: Option<String>,
    pub resolved: bool,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
}

impl StagedTournament {
    pub fn from_record(rec: StagedTournamentRecord) -> Self {
        let date_to = match rec.date_to {
            Some(d) if !d.is_empty() => d,
            _ => rec.date.clone(),
        };
        Self {
            id: rec.id,
            name: rec.name,
            location: rec.location,
            date: rec.date,
            date_to,
            disciplines: rec.disciplines,
            description: rec.description,
            venue_details: rec.venue_details,
            registration_link: rec.registration_link,
            rules_link: rec.rules_link,
            contact_email: rec.contact_email,
            logo_url: rec.logo_url,
            coordinates: rec.coordinates.map(swap_axes),
            submitted_by: rec.submitted_by,
            resolved: rec.resolved,
            created_at: rec.created_at,
        }
    }
}

// ---------------------------------------------------------------------------
// Write-path shapes
// ---------------------------------------------------------------------------

/// A tournament proposal as submitted by the client (camelCase,
/// presentation coordinate order).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TournamentDraft {
    pub name: String,
    pub location: String,
    pub date: String,
    pub date_to: Option<String>,
    pub disciplines: Vec<Discipline>,
    pub description: String,
    pub venue_details: String,
    pub registration_link: String,
    pub rules_link: String,
    pub contact_email: String,
    pub logo_url: Option<String>,
    /// Presentation axis order: `[lon, lat]`.
    pub coordinates: Option<Coordinates>,
    /// Caller-supplied display identity; falls back to the token's email.
    pub submitted_by: Option<String>,
}

/// The staged row inserted for a new submission (persisted shape,
/// `resolved` always starts false).
#[derive(Debug, Clone, Serialize)]
pub struct NewStagedTournament {
    pub name: String,
    pub location: String,
    pub date: String,
    pub date_to: String,
    pub disciplines: Vec<Discipline>,
    pub description: String,
    pub venue_details: String,
    pub registration_link: String,
    pub rules_link: String,
    pub contact_email: String,
    pub logo_url: Option<String>,
    /// Persisted axis order: `[lat, lon]`.
    pub coordinates: Option<Coordinates>,
    pub user_id: UserId,
    pub submitted_by: Option<String>,
    pub resolved: bool,
}

impl TournamentDraft {
    /// The tournament name with surrounding whitespace removed; must be
    /// non-empty for a submission to be accepted.
    pub fn trimmed_name(&self) -> &str {
        self.name.trim()
    }

    /// Normalize the draft into the persisted staged shape.
    ///
    /// Maps keys to snake_case, defaults the end date to the start date,
    /// swaps coordinates to persisted order, and attaches the submitting
    /// user. `submitted_by` prefers the caller-supplied identity over the
    /// token's email claim.
    pub fn into_staged_record(
        self,
        user_id: UserId,
        token_email: Option<String>,
    ) -> NewStagedTournament {
        let name = self.name.trim().to_string();
        let date_to = match self.date_to {
            Some(d) if !d.is_empty() => d,
            _ => self.date.clone(),
        };
        let submitted_by = self.submitted_by.filter(|s| !s.is_empty()).or(token_email);
        NewStagedTournament {
            name,
            location: self.location,
            date: self.date,
            date_to,
            disciplines: self.disciplines,
            description: self.description,
            venue_details: self.venue_details,
            registration_link: self.registration_link,
            rules_link: self.rules_link,
            contact_email: self.contact_email,
            logo_url: self.logo_url,
            coordinates: self.coordinates.map(swap_axes),
            user_id,
            submitted_by,
            resolved: false,
        }
    }
}

/// A partial edit of a published tournament (camelCase, presentation
/// coordinate order). Absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TournamentPatch {
    pub name: Option<String>,
    pub location: Option<String>,
    pub date: Option<String>,
    pub date_to: Option<String>,
    pub disciplines: Option<Vec<Discipline>>,
    pub description: Option<String>,
    pub venue_details: Option<String>,
    pub registration_link: Option<String>,
    pub rules_link: Option<String>,
    pub contact_email: Option<String>,
    pub logo_url: Option<String>,
    pub coordinates: Option<Coordinates>,
}

impl TournamentPatch {
    /// True when no field is set; such a patch is rejected as invalid input.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.location.is_none()
            && self.date.is_none()
            && self.date_to.is_none()
            && self.disciplines.is_none()
            && self.description.is_none()
            && self.venue_details.is_none()
            && self.registration_link.is_none()
            && self.rules_link.is_none()
            && self.contact_email.is_none()
            && self.logo_url.is_none()
            && self.coordinates.is_none()
    }

    /// Render the patch as a persisted-shape JSON object containing only
    /// the fields that are present. Coordinates are swapped to `[lat, lon]`.
    pub fn into_record_patch(self) -> Value {
        let mut obj = Map::new();
        if let Some(v) = self.name {
            obj.insert("name".into(), Value::String(v));
        }
        if let Some(v) = self.location {
            obj.insert("location".into(), Value::String(v));
        }
        if let Some(v) = self.date {
            obj.insert("date".into(), Value::String(v));
        }
        if let Some(v) = self.date_to {
            obj.insert("date_to".into(), Value::String(v));
        }
        if let Some(v) = self.disciplines {
            obj.insert("disciplines".into(), json!(v));
        }
        if let Some(v) = self.description {
            obj.insert("description".into(), Value::String(v));
        }
        if let Some(v) = self.venue_details {
            obj.insert("venue_details".into(), Value::String(v));
        }
        if let Some(v) = self.registration_link {
            obj.insert("registration_link".into(), Value::String(v));
        }
        if let Some(v) = self.rules_link {
            obj.insert("rules_link".into(), Value::String(v));
        }
        if let Some(v) = self.contact_email {
            obj.insert("contact_email".into(), Value::String(v));
        }
        if let Some(v) = self.logo_url {
            obj.insert("logo_url".into(), Value::String(v));
        }
        if let Some(v) = self.coordinates {
            obj.insert("coordinates".into(), json!(swap_axes(v)));
        }
        Value::Object(obj)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: DbId) -> TournamentRecord {
        TournamentRecord {
            id,
            name: "Nordic Open".into(),
            location: "Vienna, Austria".into(),
            date: "2025-10-01".into(),
            date_to: None,
            disciplines: vec![Discipline {
                name: "Longsword".into(),
                category: "Open".into(),
            }],
            description: "A test event".into(),
            venue_details: "Messe Wien".into(),
            registration_link: "https://example.com/register".into(),
            rules_link: "https://example.com/rules".into(),
            contact_email: "info@example.com".into(),
            logo_url: None,
            coordinates: Some([48.20, 16.37]),
            submitted_by: None,
            created_at: None,
        }
    }

    #[test]
    fn test_swap_axes_is_self_inverse() {
        let c = [16.37, 48.20];
        assert_eq!(swap_axes(swap_axes(c)), c);
    }

    #[test]
    fn test_from_record_swaps_coordinates_once() {
        // Persisted as [lat, lon], served as [lon, lat].
        let t = Tournament::from_record(record(1));
        assert_eq!(t.coordinates, Some([16.37, 48.20]));
    }

    #[test]
    fn test_from_record_defaults_end_date() {
        let t = Tournament::from_record(record(1));
        assert_eq!(t.date_to, "2025-10-01");

        let mut rec = record(2);
        rec.date_to = Some("2025-10-03".into());
        let t = Tournament::from_record(rec);
        assert_eq!(t.date_to, "2025-10-03");
    }

    #[test]
    fn test_from_record_treats_empty_end_date_as_absent() {
        let mut rec = record(3);
        rec.date_to = Some(String::new());
        let t = Tournament::from_record(rec);
        assert_eq!(t.date_to, "2025-10-01");
    }

    #[test]
    fn test_client_shape_is_camel_case() {
        let t = Tournament::from_record(record(1));
        let json = serde_json::to_value(&t).unwrap();
        assert!(json.get("dateTo").is_some());
        assert!(json.get("venueDetails").is_some());
        assert!(json.get("registrationLink").is_some());
        assert!(json.get("date_to").is_none());
    }

    #[test]
    fn test_discipline_category_serializes_as_type() {
        let d = Discipline {
            name: "Rapier".into(),
            category: "Women".into(),
        };
        let json = serde_json::to_value(&d).unwrap();
        assert_eq!(json["type"], "Women");
        assert!(json.get("category").is_none());
    }

    #[test]
    fn test_draft_normalization_round_trip() {
        // Coordinates submitted in presentation order must persist in
        // [lat, lon] and come back out unchanged through the read path.
        let draft = TournamentDraft {
            name: "  Nordic Open  ".into(),
            date: "2025-10-01".into(),
            coordinates: Some([16.37, 48.20]),
            ..Default::default()
        };

        let staged = draft.into_staged_record("user-1".into(), None);
        assert_eq!(staged.name, "Nordic Open");
        assert_eq!(staged.date_to, "2025-10-01");
        assert_eq!(staged.coordinates, Some([48.20, 16.37]));
        assert!(!staged.resolved);

        let mut rec = record(9);
        rec.coordinates = staged.coordinates;
        let out = Tournament::from_record(rec);
        assert_eq!(out.coordinates, Some([16.37, 48.20]));
    }

    #[test]
    fn test_draft_without_coordinates_stays_without() {
        let draft = TournamentDraft {
            name: "No Map".into(),
            date: "2025-10-01".into(),
            ..Default::default()
        };
        let staged = draft.into_staged_record("user-1".into(), None);
        assert_eq!(staged.coordinates, None);
    }

    #[test]
    fn test_draft_submitter_prefers_explicit_identity() {
        let draft = TournamentDraft {
            name: "Event".into(),
            submitted_by: Some("Club Falchion".into()),
            ..Default::default()
        };
        let staged = draft
            .clone()
            .into_staged_record("u".into(), Some("me@example.com".into()));
        assert_eq!(staged.submitted_by.as_deref(), Some("Club Falchion"));

        let draft = TournamentDraft {
            submitted_by: None,
            ..draft
        };
        let staged = draft.into_staged_record("u".into(), Some("me@example.com".into()));
        assert_eq!(staged.submitted_by.as_deref(), Some("me@example.com"));
    }

    #[test]
    fn test_published_payload_strips_staging_metadata() {
        let staged = StagedTournamentRecord {
            id: 77,
            name: "Nordic Open".into(),
            location: "Oslo".into(),
            date: "2025-10-01".into(),
            date_to: Some("2025-10-02".into()),
            disciplines: vec![],
            description: String::new(),
            venue_details: String::new(),
            registration_link: String::new(),
            rules_link: String::new(),
            contact_email: String::new(),
            logo_url: None,
            coordinates: Some([59.91, 10.75]),
            user_id: Some("user-1".into()),
            submitted_by: Some("me@example.com".into()),
            resolved: false,
            created_at: None,
        };

        let payload = staged.to_published_payload(chrono::Utc::now());
        assert!(payload.get("id").is_none());
        assert!(payload.get("user_id").is_none());
        assert!(payload.get("resolved").is_none());
        assert_eq!(payload["name"], "Nordic Open");
        assert_eq!(payload["submitted_by"], "me@example.com");
        // Coordinates stay in persisted order; no swap on this path.
        assert_eq!(payload["coordinates"][0], 59.91);
        assert!(payload.get("created_at").is_some());
    }

    #[test]
    fn test_patch_maps_keys_and_swaps_coordinates() {
        let patch = TournamentPatch {
            venue_details: Some("New hall".into()),
            coordinates: Some([16.37, 48.20]),
            ..Default::default()
        };

        let body = patch.into_record_patch();
        assert_eq!(body["venue_details"], "New hall");
        assert_eq!(body["coordinates"][0], 48.20);
        assert!(body.get("name").is_none());
    }

    #[test]
    fn test_empty_patch_detected() {
        assert!(TournamentPatch::default().is_empty());
        let patch = TournamentPatch {
            location: Some("Graz".into()),
            ..Default::default()
        };
        assert!(!patch.is_empty());
    }
}
