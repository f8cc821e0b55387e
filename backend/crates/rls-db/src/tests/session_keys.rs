use crate::{DEFAULT_TENANT_SETTING, DEFAULT_USER_SETTING, DbError, SessionKeys};

use googletest::assert_that;
use googletest::prelude::eq;

#[test]
fn given_defaults_when_created_then_app_settings_used() {
    let keys = SessionKeys::default();

    assert_that!(keys.tenant(), eq(DEFAULT_TENANT_SETTING));
    assert_that!(keys.user(), eq(DEFAULT_USER_SETTING));
}

#[test]
fn given_valid_names_when_created_then_accepted() {
    // Given / When
    let keys = SessionKeys::new("rls.tenant_id", "_rls.user2").unwrap();

    // Then
    assert_that!(keys.tenant(), eq("rls.tenant_id"));
    assert_that!(keys.user(), eq("_rls.user2"));
}

#[test]
fn given_names_that_are_not_qualified_identifiers_when_created_then_rejected() {
    for name in [
        "tenant_id",
        "app.",
        ".tenant_id",
        "app.tenant.id",
        "app.tenant-id",
        "app.1tenant",
        "app.tenant_id; DROP TABLE users",
        "",
    ] {
        let result = SessionKeys::new(name, DEFAULT_USER_SETTING);

        assert!(
            matches!(result, Err(DbError::InvalidSettingName { .. })),
            "expected '{name}' to be rejected"
        );
    }
}

#[test]
fn given_same_name_twice_when_created_then_rejected() {
    let result = SessionKeys::new("app.id", "app.id");

    assert!(matches!(result, Err(DbError::InvalidSettingName { ref name, .. }) if name == "app.id"));
}
