/// Hosted-backend connection settings.
///
/// These are deliberately optional: per the deployment contract, a missing
/// base URL or service key is a request-time "configuration error" 500 on
/// the endpoints that need it, not a startup failure. This lets the public
/// pages (and the health check) stay up while the backend credentials are
/// being rotated.
#[derive(Debug, Clone, Default)]
pub struct UpstreamSettings {
    /// Base URL of the hosted backend (e.g. `https://project.example.co`).
    pub base_url: Option<String>,
    /// Server-held service API key, sent as `apikey` on every call.
    pub service_key: Option<String>,
    /// Storage bucket for tournament logos.
    pub logos_bucket: Option<String>,
}

/// Server configuration loaded from environment variables.
///
/// All server fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Hosted-backend settings (checked per request, not at startup).
    pub upstream: UpstreamSettings,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `API_BASE_URL`         | unset (request-time 500)   |
    /// | `API_KEY`              | unset (request-time 500)   |
    /// | `LOGOS_BUCKET`         | unset (request-time 500)   |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let upstream = UpstreamSettings {
            base_url: std::env::var("API_BASE_URL").ok().filter(|s| !s.is_empty()),
            service_key: std::env::var("API_KEY").ok().filter(|s| !s.is_empty()),
            logos_bucket: std::env::var("LOGOS_BUCKET").ok().filter(|s| !s.is_empty()),
        };

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            upstream,
        }
    }
}
