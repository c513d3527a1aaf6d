//! Unverified bearer-token payload decoding.
//!
//! Tokens are issued by the external auth provider; this server only reads
//! the payload claims (subject, email, role) to decide which authorization
//! path a request takes. The signature is deliberately NOT verified here --
//! the data layer re-validates the forwarded token on every call and
//! enforces the real row-level policies. A forged token that merely parses
//! gets routed, not trusted: it fails at the data layer.
//!
//! Consequently [`resolve_identity`] never errors; any token that cannot be
//! decoded simply resolves to "no identity, not admin".

use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::Deserialize;

use hemamap_core::roles::ROLE_ADMIN;

/// Provider-managed metadata embedded in the token payload.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppMetadata {
    #[serde(default)]
    pub role: Option<String>,
}

/// The claims this server reads from a bearer token.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenClaims {
    /// Subject -- the auth provider's user id.
    #[serde(default)]
    pub sub: Option<String>,
    /// The account email, used as the default submitter identity.
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub app_metadata: AppMetadata,
}

impl TokenClaims {
    /// True when the provider assigned the administrator role.
    pub fn is_admin(&self) -> bool {
        self.app_metadata.role.as_deref() == Some(ROLE_ADMIN)
    }
}

/// Decode the payload segment of a bearer token without verifying the
/// signature, expiry, or audience. Returns `None` on any decode failure.
pub fn decode_claims(token: &str) -> Option<TokenClaims> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.validate_aud = false;
    validation.required_spec_claims.clear();

    decode::<TokenClaims>(token, &DecodingKey::from_secret(&[]), &validation)
        .map(|data| data.claims)
        .ok()
}

/// Resolve a bearer token to `(user id, is administrator)`.
///
/// Never errors: an unparseable token, or one without a subject, resolves
/// to `(None, false)`.
pub fn resolve_identity(token: &str) -> (Option<String>, bool) {
    match decode_claims(token) {
        Some(claims) => {
            let is_admin = claims.is_admin();
            (claims.sub.filter(|s| !s.is_empty()), is_admin)
        }
        None => (None, false),
    }
}
