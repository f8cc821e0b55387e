use crate::{AuthError, Audience, IdentityContext, Plan, Result as AuthErrorResult};

use std::panic::Location;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE;
use error_location::ErrorLocation;
use log::warn;
use serde::Deserialize;
use serde_json::{Map, Value};
use uuid::Uuid;

/// The `scopes` claim as it may appear on the wire
#[derive(Deserialize)]
#[serde(untagged)]
enum ScopesClaim {
    Joined(String),
    List(Vec<String>),
}

impl ScopesClaim {
    fn normalize(self) -> Vec<String> {
        let parts: Vec<String> = match self {
            Self::Joined(joined) => joined.split(' ').map(str::to_string).collect(),
            Self::List(list) => list,
        };

        parts
            .into_iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    }
}

/// Payload claims before required-claim validation
#[derive(Deserialize)]
struct RawClaims {
    #[serde(default)]
    sub: Option<String>,
    #[serde(default)]
    tid: Option<String>,
    #[serde(default)]
    role: Option<String>,
    #[serde(default)]
    scopes: Option<ScopesClaim>,
    #[serde(default)]
    plan: Option<Plan>,
    #[serde(default)]
    entitlements: Option<Plan>,
    #[serde(default)]
    iat: Option<i64>,
    #[serde(default)]
    exp: Option<i64>,
    #[serde(default)]
    iss: Option<String>,
    #[serde(default)]
    aud: Option<Audience>,
}

/// Decodes the payload of a JWT-shaped credential into an [`IdentityContext`].
///
/// The signature segment is never inspected, and `exp`, `iss` and `aud` are
/// passed through without validation. Signature checking, if any, happens
/// upstream of this service.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClaimDecoder;

impl ClaimDecoder {
    pub fn new() -> Self {
        Self
    }

    /// Decode `credential` (without any `Bearer ` prefix).
    ///
    /// Every failure is reported as [`AuthError::TokenInvalid`].
    #[track_caller]
    pub fn decode(&self, credential: &str) -> AuthErrorResult<IdentityContext> {
        let location = ErrorLocation::from(Location::caller());

        Self::decode_claims(credential).map_err(|reason| {
            warn!("Failed to parse bearer token: {reason}");
            AuthError::TokenInvalid { reason, location }
        })
    }

    fn decode_claims(credential: &str) -> Result<IdentityContext, &'static str> {
        let mut segments = credential.split('.');
        let (Some(_header), Some(payload)) = (segments.next(), segments.next()) else {
            return Err("expected at least two dot-separated segments");
        };

        let padded = format!("{payload}{}", "=".repeat((4 - payload.len() % 4) % 4));
        let payload_bytes = URL_SAFE
            .decode(padded)
            .map_err(|_| "payload is not valid base64url")?;

        // Claims must be a JSON object; a derived struct also accepts arrays
        let claims: Map<String, Value> = serde_json::from_slice(&payload_bytes)
            .map_err(|_| "payload is not a JSON object")?;
        let raw: RawClaims = serde_json::from_value(Value::Object(claims))
            .map_err(|_| "payload is not a valid claim object")?;

        let subject = Self::required_uuid(raw.sub.as_deref(), "missing or invalid sub claim")?;
        let tenant = Self::required_uuid(raw.tid.as_deref(), "missing or invalid tid claim")?;

        Ok(IdentityContext {
            subject,
            tenant,
            role: raw.role,
            scopes: raw.scopes.map(ScopesClaim::normalize).unwrap_or_default(),
            plan: raw.plan.or(raw.entitlements),
            issued_at: raw.iat,
            expires_at: raw.exp,
            issuer: raw.iss,
            audience: raw.aud,
        })
    }

    fn required_uuid(value: Option<&str>, reason: &'static str) -> Result<Uuid, &'static str> {
        match value {
            Some(v) if !v.is_empty() => Uuid::parse_str(v).map_err(|_| reason),
            _ => Err(reason),
        }
    }
}
