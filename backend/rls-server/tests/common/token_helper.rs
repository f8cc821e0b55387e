#![allow(dead_code)]

use rls_auth::{IdentityContext, Plan, encode_unsigned};

use jsonwebtoken::{EncodingKey, Header, encode};
use serde_json::json;
use uuid::Uuid;

pub const TEST_TENANT: Uuid = Uuid::from_u128(0x5e1f_0000_0000_4000_8000_0000_0000_0001);
pub const TEST_USER: Uuid = Uuid::from_u128(0x0c67_622b_fcc5_4b58_9998_421b_73e4_8df9);

/// Signing key the server never sees; signatures are not checked
const SIGNING_SECRET: &[u8] = b"issuer-secret-unknown-to-the-server";

pub fn test_identity() -> IdentityContext {
    IdentityContext {
        role: Some("admin".to_string()),
        scopes: vec!["read".to_string(), "write".to_string()],
        plan: Some(Plan::Label("dev".to_string())),
        ..IdentityContext::new(TEST_USER, TEST_TENANT)
    }
}

/// `Bearer <alg:none credential>` for the test identity
pub fn unsigned_header() -> String {
    encode_unsigned(&test_identity())
}

/// Bare credential (no scheme) for the test identity
pub fn unsigned_credential() -> String {
    unsigned_header()
        .strip_prefix("Bearer ")
        .expect("encoder emits a Bearer prefix")
        .to_string()
}

/// HS256 credential carrying the test identity's tenant and user
pub fn signed_credential() -> String {
    let claims = json!({
        "sub": TEST_USER.to_string(),
        "tid": TEST_TENANT.to_string(),
        "role": "member",
        "scopes": "read",
    });

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(SIGNING_SECRET),
    )
    .expect("Failed to encode JWT")
}
