//! Shared integration-test harness.
//!
//! Spins up an in-memory stand-in for the hosted backend (data tables,
//! auth provider, object storage) on an ephemeral port and builds the real
//! application router pointed at it, so tests exercise the full middleware
//! stack plus actual HTTP round trips to the stub.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::body::Body;
use axum::extract::{Path, Query, State};
use axum::http::{header, HeaderMap, Request, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use hemamap_api::config::{ServerConfig, UpstreamSettings};
use hemamap_api::router::build_app_router;
use hemamap_api::state::AppState;

// ---------------------------------------------------------------------------
// App under test
// ---------------------------------------------------------------------------

/// Build a test `ServerConfig` pointing at the given stub backend.
///
/// `None` simulates a deployment with missing backend credentials.
pub fn test_config(upstream_base: Option<String>) -> ServerConfig {
    let upstream = match upstream_base {
        Some(base_url) => UpstreamSettings {
            base_url: Some(base_url),
            service_key: Some("test-service-key".to_string()),
            logos_bucket: Some("logos".to_string()),
        },
        None => UpstreamSettings::default(),
    };

    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        upstream,
    }
}

/// Build the full application router with all middleware layers.
///
/// This mirrors the router construction in `main.rs` so integration tests
/// exercise the same stack (CORS, request ID, timeout, tracing, panic
/// recovery) that production uses. No email notifier is attached.
pub fn build_test_app(upstream_base: Option<String>) -> Router {
    let config = test_config(upstream_base);
    let state = AppState::new(config.clone(), None);
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Bearer tokens
// ---------------------------------------------------------------------------

#[derive(serde::Serialize)]
struct TestClaims {
    sub: String,
    email: String,
    app_metadata: Value,
    exp: i64,
}

fn encode_token(sub: &str, email: &str, role: Option<&str>) -> String {
    let app_metadata = match role {
        Some(role) => json!({ "role": role }),
        None => json!({}),
    };
    let claims = TestClaims {
        sub: sub.to_string(),
        email: email.to_string(),
        app_metadata,
        exp: chrono::Utc::now().timestamp() + 3600,
    };
    // The server never verifies the signature, so any secret works.
    jsonwebtoken::encode(
        &jsonwebtoken::Header::new(jsonwebtoken::Algorithm::HS256),
        &claims,
        &jsonwebtoken::EncodingKey::from_secret(b"test-secret"),
    )
    .expect("token encoding should succeed")
}

/// A bearer token for a regular user.
pub fn make_token(sub: &str, email: &str) -> String {
    encode_token(sub, email, None)
}

/// A bearer token carrying the administrator role.
pub fn make_admin_token(sub: &str, email: &str) -> String {
    encode_token(sub, email, Some("admin"))
}

// ---------------------------------------------------------------------------
// Stub backend
// ---------------------------------------------------------------------------

/// In-memory state backing the stub backend.
#[derive(Default)]
pub struct StubDb {
    /// Table name -> rows (persisted shape, snake_case keys).
    pub tables: HashMap<String, Vec<Value>>,
    next_id: i64,
    /// `bucket/name` keys of uploaded objects.
    pub uploads: Vec<String>,
    /// Accounts the stub auth provider accepts: email -> password.
    pub accounts: HashMap<String, String>,
}

impl StubDb {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

pub type SharedDb = Arc<Mutex<StubDb>>;

pub fn new_db() -> SharedDb {
    Arc::new(Mutex::new(StubDb::default()))
}

/// Insert a row directly, assigning an id. Returns the id.
pub fn seed_row(db: &SharedDb, table: &str, mut row: Value) -> i64 {
    let mut db = db.lock().unwrap();
    let id = db.next_id();
    row["id"] = json!(id);
    db.tables.entry(table.to_string()).or_default().push(row);
    id
}

/// A published tournament row in persisted shape (coordinates `[lat, lon]`).
pub fn tournament_row(name: &str, coordinates: [f64; 2]) -> Value {
    json!({
        "name": name,
        "location": "Vienna, Austria",
        "date": "2025-10-01",
        "date_to": null,
        "disciplines": [{ "name": "Longsword", "type": "Open" }],
        "description": "A test event",
        "venue_details": "Main hall",
        "registration_link": "https://example.com/register",
        "rules_link": "https://example.com/rules",
        "contact_email": "info@example.com",
        "logo_url": null,
        "coordinates": coordinates,
        "submitted_by": null,
        "created_at": "2025-01-01T00:00:00Z",
    })
}

fn row_matches(row: &Value, filters: &[(String, String)]) -> bool {
    filters.iter().all(|(col, want)| {
        let got = match row.get(col) {
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => return false,
        };
        got == *want
    })
}

/// Split PostgREST-style query pairs into eq filters, order column and
/// select projection.
fn parse_query(
    params: Vec<(String, String)>,
) -> (Vec<(String, String)>, Option<String>, Option<String>) {
    let mut filters = Vec::new();
    let mut order = None;
    let mut select = None;
    for (key, value) in params {
        if key == "order" {
            order = value.strip_suffix(".desc").map(str::to_string);
        } else if key == "select" {
            select = Some(value);
        } else if let Some(v) = value.strip_prefix("eq.") {
            filters.push((key, v.to_string()));
        }
    }
    (filters, order, select)
}

async fn rest_get(
    State(db): State<SharedDb>,
    Path(table): Path<String>,
    Query(params): Query<Vec<(String, String)>>,
) -> Json<Value> {
    let (filters, order, select) = parse_query(params);
    let db = db.lock().unwrap();

    let mut rows: Vec<Value> = db
        .tables
        .get(&table)
        .cloned()
        .unwrap_or_default()
        .into_iter()
        .filter(|row| row_matches(row, &filters))
        .collect();

    if let Some(col) = order {
        rows.sort_by(|a, b| {
            let a = a.get(&col).map(|v| v.to_string()).unwrap_or_default();
            let b = b.get(&col).map(|v| v.to_string()).unwrap_or_default();
            b.cmp(&a)
        });
    }

    if let Some(cols) = select.filter(|s| s.as_str() != "*") {
        rows = rows
            .into_iter()
            .map(|row| {
                let mut out = serde_json::Map::new();
                for col in cols.split(',') {
                    if let Some(v) = row.get(col) {
                        out.insert(col.to_string(), v.clone());
                    }
                }
                Value::Object(out)
            })
            .collect();
    }

    Json(Value::Array(rows))
}

async fn rest_post(
    State(db): State<SharedDb>,
    Path(table): Path<String>,
    headers: HeaderMap,
    Json(mut row): Json<Value>,
) -> Response {
    let mut db = db.lock().unwrap();

    // The favorites table carries a uniqueness constraint.
    if table == "user_favourites" {
        let existing = db.tables.entry(table.clone()).or_default();
        let duplicate = existing.iter().any(|r| {
            r.get("user_id") == row.get("user_id") && r.get("tournament") == row.get("tournament")
        });
        if duplicate {
            return (
                StatusCode::CONFLICT,
                Json(json!({
                    "message": "duplicate key value violates unique constraint"
                })),
            )
                .into_response();
        }
    }

    if row.get("id").is_none() {
        row["id"] = json!(db.next_id());
    }
    if row.get("created_at").is_none() {
        row["created_at"] = json!(chrono::Utc::now().to_rfc3339());
    }

    db.tables.entry(table).or_default().push(row.clone());

    let wants_representation = headers
        .get("prefer")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.contains("return=representation"));

    if wants_representation {
        (StatusCode::CREATED, Json(json!([row]))).into_response()
    } else {
        StatusCode::CREATED.into_response()
    }
}

async fn rest_patch(
    State(db): State<SharedDb>,
    Path(table): Path<String>,
    Query(params): Query<Vec<(String, String)>>,
    Json(patch): Json<Value>,
) -> StatusCode {
    let (filters, _, _) = parse_query(params);
    let mut db = db.lock().unwrap();

    if let Some(rows) = db.tables.get_mut(&table) {
        for row in rows.iter_mut().filter(|r| row_matches(r, &filters)) {
            if let (Some(row), Some(patch)) = (row.as_object_mut(), patch.as_object()) {
                for (k, v) in patch {
                    row.insert(k.clone(), v.clone());
                }
            }
        }
    }
    StatusCode::NO_CONTENT
}

async fn rest_delete(
    State(db): State<SharedDb>,
    Path(table): Path<String>,
    Query(params): Query<Vec<(String, String)>>,
) -> StatusCode {
    let (filters, _, _) = parse_query(params);
    let mut db = db.lock().unwrap();

    if let Some(rows) = db.tables.get_mut(&table) {
        rows.retain(|r| !row_matches(r, &filters));
    }
    StatusCode::NO_CONTENT
}

async fn auth_token(State(db): State<SharedDb>, Json(body): Json<Value>) -> Response {
    let email = body["email"].as_str().unwrap_or_default().to_string();
    let password = body["password"].as_str().unwrap_or_default();

    let valid = db.lock().unwrap().accounts.get(&email).map(String::as_str) == Some(password);
    if !valid {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error_description": "Invalid login credentials" })),
        )
            .into_response();
    }

    Json(json!({
        "access_token": make_token("user-1", &email),
        "user": { "id": "user-1", "email": email },
    }))
    .into_response()
}

async fn auth_signup(State(db): State<SharedDb>, Json(body): Json<Value>) -> Response {
    let email = body["email"].as_str().unwrap_or_default().to_string();

    if db.lock().unwrap().accounts.contains_key(&email) {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "msg": "User already registered" })),
        )
            .into_response();
    }

    // Addresses starting with "confirm" simulate a deployment that wants
    // email confirmation before issuing a token.
    if email.starts_with("confirm") {
        return Json(json!({ "id": "pending-user", "email": email })).into_response();
    }

    Json(json!({
        "access_token": make_token("new-user", &email),
        "user": { "id": "new-user", "email": email },
    }))
    .into_response()
}

async fn storage_upload(
    State(db): State<SharedDb>,
    Path((bucket, name)): Path<(String, String)>,
    body: axum::body::Bytes,
) -> Response {
    if body.is_empty() {
        return StatusCode::BAD_REQUEST.into_response();
    }
    let key = format!("{bucket}/{name}");
    db.lock().unwrap().uploads.push(key.clone());
    Json(json!({ "Key": key })).into_response()
}

fn stub_router(db: SharedDb) -> Router {
    Router::new()
        .route(
            "/rest/v1/{table}",
            axum::routing::get(rest_get)
                .post(rest_post)
                .patch(rest_patch)
                .delete(rest_delete),
        )
        .route("/auth/v1/token", post(auth_token))
        .route("/auth/v1/signup", post(auth_signup))
        .route("/storage/v1/object/{bucket}/{name}", post(storage_upload))
        .with_state(db)
}

/// Serve the stub backend on an ephemeral port; returns its base URL.
pub async fn spawn_stub_upstream(db: SharedDb) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind stub upstream");
    let addr = listener.local_addr().expect("stub upstream address");
    let app = stub_router(db);
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("stub upstream server");
    });
    format!("http://{addr}")
}

/// Convenience: stub backend + app wired to it.
pub async fn stub_app() -> (Router, SharedDb) {
    let db = new_db();
    let base = spawn_stub_upstream(db.clone()).await;
    (build_test_app(Some(base)), db)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(app: Router, request: Request<Body>) -> Response {
    app.oneshot(request).await.expect("request should complete")
}

pub async fn get(app: Router, path: &str) -> Response {
    let request = Request::builder()
        .uri(path)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn get_auth(app: Router, path: &str, token: &str) -> Response {
    let request = Request::builder()
        .uri(path)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: Router, path: &str, body: Value) -> Response {
    let request = Request::builder()
        .method("POST")
        .uri(path)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn post_json_auth(app: Router, path: &str, body: Value, token: &str) -> Response {
    let request = Request::builder()
        .method("POST")
        .uri(path)
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn patch_json_auth(app: Router, path: &str, body: Value, token: &str) -> Response {
    let request = Request::builder()
        .method("PATCH")
        .uri(path)
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

/// Parse a response body as JSON.
pub async fn body_json(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).expect("response body should be JSON")
}
