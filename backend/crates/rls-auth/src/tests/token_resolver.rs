use crate::tests::SAMPLE_JWT;
use crate::{AuthError, CredentialSource, ResolverConfig, TokenResolver};

use googletest::assert_that;
use googletest::prelude::{eq, ok};

fn resolver() -> TokenResolver {
    TokenResolver::new(ResolverConfig::default())
}

// =========================================================================
// Authorization header
// =========================================================================

#[test]
fn given_bearer_header_when_resolved_then_returns_credential() {
    // Given
    let header = format!("Bearer {SAMPLE_JWT}");
    let source = CredentialSource::from_authorization(Some(&header));

    // When
    let result = resolver().resolve(&source);

    // Then
    assert_that!(result, ok(eq(SAMPLE_JWT)));
}

#[test]
fn given_lowercase_scheme_when_resolved_then_accepted() {
    let source = CredentialSource::from_authorization(Some("bearer abc.def.ghi"));

    let result = resolver().resolve(&source);

    assert_that!(result, ok(eq("abc.def.ghi")));
}

#[test]
fn given_basic_scheme_when_resolved_then_credential_malformed() {
    // Given
    let header = format!("Basic {SAMPLE_JWT}");
    let source = CredentialSource::from_authorization(Some(&header));

    // When
    let result = resolver().resolve(&source);

    // Then
    assert!(matches!(result, Err(AuthError::CredentialMalformed { .. })));
}

#[test]
fn given_scheme_without_credential_when_resolved_then_credential_malformed() {
    let source = CredentialSource::from_authorization(Some("Bearer   "));

    let result = resolver().resolve(&source);

    assert!(matches!(result, Err(AuthError::CredentialMalformed { .. })));
}

#[test]
fn given_malformed_header_and_query_token_when_resolved_then_header_error_wins() {
    // Given
    let source = CredentialSource {
        authorization: Some("Basic dXNlcjpwYXNz"),
        query: Some("access_token=abc.def.ghi"),
        protocols: None,
    };

    // When
    let result = resolver().resolve(&source);

    // Then
    assert!(matches!(result, Err(AuthError::CredentialMalformed { .. })));
}

#[test]
fn given_custom_scheme_when_resolved_then_only_that_scheme_accepted() {
    // Given
    let resolver = TokenResolver::new(ResolverConfig {
        scheme: "token".to_string(),
        ..ResolverConfig::default()
    });

    // When
    let accepted = resolver.resolve(&CredentialSource::from_authorization(Some("Token abc")));
    let rejected = resolver.resolve(&CredentialSource::from_authorization(Some("Bearer abc")));

    // Then
    assert_that!(accepted, ok(eq("abc")));
    assert!(matches!(rejected, Err(AuthError::CredentialMalformed { .. })));
}

// =========================================================================
// Precedence
// =========================================================================

#[test]
fn given_header_and_query_credentials_when_resolved_then_header_wins() {
    // Given
    let source = CredentialSource {
        authorization: Some("Bearer from-header"),
        query: Some("access_token=from-query"),
        protocols: Some("access_token=from-protocol"),
    };

    // When
    let result = resolver().resolve(&source);

    // Then
    assert_that!(result, ok(eq("from-header")));
}

#[test]
fn given_empty_header_when_resolved_then_falls_through_to_query() {
    let source = CredentialSource {
        authorization: Some(""),
        query: Some("token=from-query"),
        protocols: None,
    };

    let result = resolver().resolve(&source);

    assert_that!(result, ok(eq("from-query")));
}

#[test]
fn given_both_query_names_when_resolved_then_access_token_wins() {
    let source = CredentialSource {
        query: Some("token=second&access_token=first"),
        ..CredentialSource::default()
    };

    let result = resolver().resolve(&source);

    assert_that!(result, ok(eq("first")));
}

#[test]
fn given_blank_access_token_when_resolved_then_token_param_used() {
    let source = CredentialSource {
        query: Some("access_token=&token=fallback"),
        ..CredentialSource::default()
    };

    let result = resolver().resolve(&source);

    assert_that!(result, ok(eq("fallback")));
}

#[test]
fn given_percent_encoded_query_value_when_resolved_then_decoded_and_prefix_stripped() {
    let source = CredentialSource {
        query: Some("access_token=Bearer%20abc.def.ghi"),
        ..CredentialSource::default()
    };

    let result = resolver().resolve(&source);

    assert_that!(result, ok(eq("abc.def.ghi")));
}

#[test]
fn given_form_encoded_query_when_resolved_then_plus_decoded_as_space() {
    let source = CredentialSource {
        query: Some("other=1&token=Bearer+abc.def.ghi&access_token="),
        ..CredentialSource::default()
    };

    let result = resolver().resolve(&source);

    assert_that!(result, ok(eq("abc.def.ghi")));
}

#[test]
fn given_query_and_protocol_credentials_when_resolved_then_query_wins() {
    let source = CredentialSource {
        query: Some("access_token=from-query"),
        protocols: Some("access_token=from-protocol"),
        ..CredentialSource::default()
    };

    let result = resolver().resolve(&source);

    assert_that!(result, ok(eq("from-query")));
}

// =========================================================================
// Sub-protocol list
// =========================================================================

#[test]
fn given_protocol_list_with_token_entry_when_resolved_then_returns_credential() {
    // Given
    let protocols = format!("chat, access_token={SAMPLE_JWT}");
    let source = CredentialSource {
        protocols: Some(&protocols),
        ..CredentialSource::default()
    };

    // When
    let result = resolver().resolve(&source);

    // Then
    assert_that!(result, ok(eq(SAMPLE_JWT)));
}

#[test]
fn given_protocol_entry_with_bearer_prefix_when_resolved_then_prefix_stripped() {
    let protocols = format!("chat, access_token=Bearer {SAMPLE_JWT}, other");
    let source = CredentialSource {
        protocols: Some(&protocols),
        ..CredentialSource::default()
    };

    let result = resolver().resolve(&source);

    assert_that!(result, ok(eq(SAMPLE_JWT)));
}

#[test]
fn given_protocol_list_without_token_entry_when_resolved_then_credential_missing() {
    let source = CredentialSource {
        protocols: Some("chat, superchat"),
        ..CredentialSource::default()
    };

    let result = resolver().resolve(&source);

    assert!(matches!(result, Err(AuthError::CredentialMissing { .. })));
}

// =========================================================================
// Missing
// =========================================================================

#[test]
fn given_no_channels_when_resolved_then_credential_missing() {
    let result = resolver().resolve(&CredentialSource::default());

    assert!(matches!(result, Err(AuthError::CredentialMissing { .. })));
}

#[test]
fn given_unrelated_query_params_when_resolved_then_credential_missing() {
    let source = CredentialSource {
        query: Some("page=2&sort=asc"),
        ..CredentialSource::default()
    };

    let result = resolver().resolve(&source);

    assert!(matches!(result, Err(AuthError::CredentialMissing { .. })));
}
