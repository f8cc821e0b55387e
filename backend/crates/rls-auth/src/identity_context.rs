use crate::AccessProjection;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// Entitlement descriptor carried by the `plan` (or `entitlements`) claim
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Plan {
    /// Plain plan name, e.g. "pro"
    Label(String),
    /// Structured entitlements object
    Entitlements(Map<String, Value>),
}

/// The `aud` claim: a single audience or a list of them
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Audience {
    One(String),
    Many(Vec<String>),
}

/// Full claim set decoded from a bearer credential.
///
/// Built once per request by [`crate::ClaimDecoder`] and never persisted.
/// Serializes back to the wire claim names (`sub`, `tid`, ...), omitting
/// claims that are absent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IdentityContext {
    /// User identifier (`sub`)
    #[serde(rename = "sub")]
    pub subject: Uuid,
    /// Tenant identifier (`tid`)
    #[serde(rename = "tid")]
    pub tenant: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub scopes: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan: Option<Plan>,
    /// Issued-at timestamp, unvalidated (`iat`)
    #[serde(rename = "iat", skip_serializing_if = "Option::is_none")]
    pub issued_at: Option<i64>,
    /// Expiry timestamp, unvalidated (`exp`)
    #[serde(rename = "exp", skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<i64>,
    #[serde(rename = "iss", skip_serializing_if = "Option::is_none")]
    pub issuer: Option<String>,
    #[serde(rename = "aud", skip_serializing_if = "Option::is_none")]
    pub audience: Option<Audience>,
}

impl IdentityContext {
    /// Identity with only the required claims set
    pub fn new(subject: Uuid, tenant: Uuid) -> Self {
        Self {
            subject,
            tenant,
            role: None,
            scopes: Vec::new(),
            plan: None,
            issued_at: None,
            expires_at: None,
            issuer: None,
            audience: None,
        }
    }

    /// Minimal tenant/user pair used to scope a database session
    pub fn project(&self) -> AccessProjection {
        AccessProjection::from(self)
    }

    pub fn has_scope(&self, scope: &str) -> bool {
        self.scopes.iter().any(|s| s == scope)
    }
}
