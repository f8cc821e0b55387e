use crate::ApiError;

use rls_auth::AuthError;
use rls_db::{DbError, ScopeState};

use std::panic::Location;

use axum::body::to_bytes;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use error_location::ErrorLocation;
use googletest::assert_that;
use googletest::prelude::{contains_substring, eq, not};
use serde_json::Value;

async fn render(error: ApiError) -> (StatusCode, Value) {
    let response = error.into_response();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();

    (status, serde_json::from_slice(&body).unwrap())
}

fn here() -> ErrorLocation {
    ErrorLocation::from(Location::caller())
}

#[tokio::test]
async fn given_missing_credential_when_rendered_then_401_with_fixed_message() {
    // Given
    let error = ApiError::from(AuthError::CredentialMissing { location: here() });

    // When
    let (status, json) = render(error).await;

    // Then
    assert_that!(status, eq(StatusCode::UNAUTHORIZED));
    assert_that!(json["error"]["code"], eq(&Value::from("CREDENTIAL_MISSING")));
    assert_that!(
        json["error"]["message"],
        eq(&Value::from("Missing authorization credential"))
    );
}

#[tokio::test]
async fn given_invalid_token_when_rendered_then_reason_not_exposed() {
    let error = ApiError::from(AuthError::TokenInvalid {
        reason: "payload is not valid base64url",
        location: here(),
    });

    let (status, json) = render(error).await;

    assert_that!(status, eq(StatusCode::UNAUTHORIZED));
    assert_that!(json["error"]["message"], eq(&Value::from("Invalid token")));
    assert_that!(json.to_string(), not(contains_substring("base64url")));
}

#[tokio::test]
async fn given_context_mismatch_when_rendered_then_500_without_setting_name() {
    // Given
    let error = ApiError::from(DbError::ContextMismatch {
        setting: "app.tenant_id".to_string(),
        location: here(),
    });

    // When
    let (status, json) = render(error).await;

    // Then
    assert_that!(status, eq(StatusCode::INTERNAL_SERVER_ERROR));
    assert_that!(json["error"]["code"], eq(&Value::from("CONTEXT_MISMATCH")));
    assert_that!(json.to_string(), not(contains_substring("app.tenant_id")));
}

#[tokio::test]
async fn given_acquire_failure_when_rendered_then_503() {
    let error = ApiError::from(DbError::Acquire {
        source: sqlx::Error::PoolTimedOut,
        location: here(),
    });

    let (status, json) = render(error).await;

    assert_that!(status, eq(StatusCode::SERVICE_UNAVAILABLE));
    assert_that!(json["error"]["code"], eq(&Value::from("SERVICE_UNAVAILABLE")));
}

#[tokio::test]
async fn given_invalid_scope_state_when_rendered_then_500() {
    let error = ApiError::from(DbError::InvalidState {
        state: ScopeState::Released,
        location: here(),
    });

    let (status, _) = render(error).await;

    assert_that!(status, eq(StatusCode::INTERNAL_SERVER_ERROR));
}
