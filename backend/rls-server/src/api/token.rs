use crate::BearerToken;

use axum::Json;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

/// GET /token - The raw credential as resolved from the request
pub async fn token(BearerToken(token): BearerToken) -> Json<TokenResponse> {
    Json(TokenResponse { token })
}
