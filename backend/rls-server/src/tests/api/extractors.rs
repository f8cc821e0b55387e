use crate::tests::{TENANT, USER, credential, test_state};
use crate::{Access, ApiError, BearerToken, Identity};

use axum::body::Body;
use axum::extract::FromRequestParts;
use axum::http::{HeaderValue, Request};
use googletest::assert_that;
use googletest::prelude::eq;

fn parts_with_authorization(value: Option<HeaderValue>) -> axum::http::request::Parts {
    let mut builder = Request::builder().uri("/whoami");
    if let Some(value) = value {
        builder = builder.header("Authorization", value);
    }
    let (parts, _body) = builder.body(Body::empty()).unwrap().into_parts();
    parts
}

#[tokio::test]
async fn given_bearer_header_when_extracting_access_then_projection_from_claims() {
    // Given
    let state = test_state();
    let header = HeaderValue::from_str(&format!("Bearer {}", credential())).unwrap();
    let mut parts = parts_with_authorization(Some(header));

    // When
    let Access(projection) = Access::from_request_parts(&mut parts, &state)
        .await
        .unwrap();

    // Then
    assert_that!(projection.tenant, eq(TENANT));
    assert_that!(projection.user, eq(USER));
}

#[tokio::test]
async fn given_bearer_header_when_extracting_identity_then_subject_and_tenant_decoded() {
    let state = test_state();
    let header = HeaderValue::from_str(&format!("Bearer {}", credential())).unwrap();
    let mut parts = parts_with_authorization(Some(header));

    let Identity(identity) = Identity::from_request_parts(&mut parts, &state)
        .await
        .unwrap();

    assert_that!(identity.subject, eq(USER));
    assert_that!(identity.tenant, eq(TENANT));
}

#[tokio::test]
async fn given_non_utf8_header_when_extracting_token_then_unauthorized() {
    // Given
    let state = test_state();
    let header = HeaderValue::from_bytes(b"Bearer \xfftoken").unwrap();
    let mut parts = parts_with_authorization(Some(header));

    // When
    let result = BearerToken::from_request_parts(&mut parts, &state).await;

    // Then
    assert!(matches!(
        result,
        Err(ApiError::Unauthorized {
            code: "CREDENTIAL_MALFORMED",
            ..
        })
    ));
}

#[tokio::test]
async fn given_no_header_when_extracting_token_then_unauthorized_missing() {
    let state = test_state();
    let mut parts = parts_with_authorization(None);

    let result = BearerToken::from_request_parts(&mut parts, &state).await;

    assert!(matches!(
        result,
        Err(ApiError::Unauthorized {
            code: "CREDENTIAL_MISSING",
            ..
        })
    ));
}
