use crate::IdentityContext;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::Serialize;

/// Header of an explicitly unsigned credential
#[derive(Serialize)]
struct UnsignedHeader {
    alg: &'static str,
}

/// Build an unsigned (`alg: none`) bearer credential for `ctx`.
///
/// Returns the full header value, `Bearer <header>.<payload>.`, with an empty
/// signature segment. Absent optional claims are omitted from the payload.
pub fn encode_unsigned(ctx: &IdentityContext) -> String {
    let header = segment(&UnsignedHeader { alg: "none" });
    let payload = segment(ctx);

    format!("Bearer {header}.{payload}.")
}

fn segment<T: Serialize>(value: &T) -> String {
    // Serializing plain structs and JSON maps to a Vec cannot fail
    let raw = serde_json::to_vec(value).unwrap_or_default();
    URL_SAFE_NO_PAD.encode(raw)
}
