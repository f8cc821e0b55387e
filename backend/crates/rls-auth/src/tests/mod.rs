mod token_resolver;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;

/// HS256 token with sub 0c67622b-..., tid 00000000-..., role admin, plan dev,
/// iss vecapi, aud vecapi-clients
pub(crate) const SAMPLE_JWT: &str = concat!(
    "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9.",
    "eyJzdWIiOiIwYzY3NjIyYi1mY2M1LTRiNTgtOTk5OC00MjFiNzNlNDhkZjkiLCJ0aWQiOiIwMDAwMDAwMC0wMDAwLTAwMDAtMDAwMC0wMDAwMDAwMDAwMDAiLCJyb2xlIjoiYWRtaW4iLCJwbGFuIjoiZGV2IiwiaWF0IjoxNzU4NzgxMDYwLCJleHAiOjE3NTg3ODQ2NjAsImlzcyI6InZlY2FwaSIsImF1ZCI6InZlY2FwaS1jbGllbnRzIn0.",
    "p_xH49ZNbT66729RiE7FHdqJbiR5AkUZiIph5sBNlEw"
);

pub(crate) const SAMPLE_SUB: &str = "0c67622b-fcc5-4b58-9998-421b73e48df9";
pub(crate) const SAMPLE_TID: &str = "00000000-0000-0000-0000-000000000000";

/// Build a three-segment credential around a raw JSON payload
pub(crate) fn credential_with_payload(payload_json: &str) -> String {
    format!(
        "{}.{}.sig",
        URL_SAFE_NO_PAD.encode(r#"{"alg":"HS256","typ":"JWT"}"#),
        URL_SAFE_NO_PAD.encode(payload_json)
    )
}
