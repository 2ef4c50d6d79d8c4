// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Registration, login, and session validation tests.

use crate::auth::{AuthenticationService, Role};
use crate::error::ApiError;
use crate::request_response::RegisterRequest;
use crate::tests::helpers::store;

fn registration() -> RegisterRequest {
    RegisterRequest {
        username: String::from("María"),
        email: String::from("Maria@Example.com"),
        phone: String::from("+52 55 0000 0000"),
        password: String::from("Str0ng-pass-word!"),
        confirmation: String::from("Str0ng-pass-word!"),
    }
}

#[test]
fn test_registration_creates_user_role_and_session() {
    let mut persistence = store();

    let response =
        AuthenticationService::register(&mut persistence, &registration()).expect("register");

    // Self-registration never yields an admin, whatever the client asks.
    assert_eq!(response.account.role, "user");
    assert_eq!(response.account.email, "maria@example.com");
    assert!(response.token.starts_with("session_"));

    let (actor, account) =
        AuthenticationService::validate_session(&mut persistence, &response.token)
            .expect("session valid");
    assert_eq!(actor.role, Role::User);
    assert_eq!(actor.id, account.account_id.to_string());
}

#[test]
fn test_registration_rejects_duplicate_email() {
    let mut persistence = store();
    AuthenticationService::register(&mut persistence, &registration()).expect("register");

    let result = AuthenticationService::register(&mut persistence, &registration());

    assert!(matches!(
        result,
        Err(ApiError::DomainRuleViolation { rule, .. }) if rule == "unique_login"
    ));
}

#[test]
fn test_login_with_correct_credentials() {
    let mut persistence = store();
    AuthenticationService::register(&mut persistence, &registration()).expect("register");

    let response = AuthenticationService::login(
        &mut persistence,
        "maria@example.com",
        "Str0ng-pass-word!",
    )
    .expect("login");

    assert_eq!(response.account.username, "María");
}

#[test]
fn test_login_with_wrong_password_fails_opaquely() {
    let mut persistence = store();
    AuthenticationService::register(&mut persistence, &registration()).expect("register");

    let wrong_password =
        AuthenticationService::login(&mut persistence, "maria@example.com", "nope nope nope");
    let wrong_login =
        AuthenticationService::login(&mut persistence, "nobody@example.com", "Str0ng-pass-word!");

    // Both failures look identical to the caller.
    assert_eq!(wrong_password, wrong_login);
    assert!(matches!(
        wrong_password,
        Err(ApiError::AuthenticationFailed { .. })
    ));
}

#[test]
fn test_logout_invalidates_session() {
    let mut persistence = store();
    let response =
        AuthenticationService::register(&mut persistence, &registration()).expect("register");

    AuthenticationService::logout(&mut persistence, &response.token).expect("logout");

    let result = AuthenticationService::validate_session(&mut persistence, &response.token);
    assert!(result.is_err());
}

#[test]
fn test_unknown_token_is_rejected() {
    let mut persistence = store();

    let result = AuthenticationService::validate_session(&mut persistence, "session_bogus");

    assert!(result.is_err());
}

#[test]
fn test_disabled_account_cannot_log_in_or_keep_sessions() {
    let mut persistence = store();
    let response =
        AuthenticationService::register(&mut persistence, &registration()).expect("register");
    let account_id: i64 = response.account.id.parse().expect("numeric id");

    persistence
        .disable_account(account_id, "2026-08-05T10:00:00Z")
        .expect("disable");

    assert!(
        AuthenticationService::login(&mut persistence, "maria@example.com", "Str0ng-pass-word!")
            .is_err()
    );
    assert!(AuthenticationService::validate_session(&mut persistence, &response.token).is_err());
}

#[test]
fn test_registration_requires_valid_email() {
    let mut persistence = store();
    let mut request = registration();
    request.email = String::from("not-an-email");

    let result = AuthenticationService::register(&mut persistence, &request);

    assert!(matches!(
        result,
        Err(ApiError::InvalidInput { field, .. }) if field == "email"
    ));
}
