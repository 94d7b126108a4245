//! Login flow integration tests.

use chrono::Utc;
use sso_auth::AuthErrorKind;
use sso_core::RequestContext;
use sso_model::App;

use crate::common::{decode_claims, TestEnv, APP_ID, TOKEN_TTL};

/// Tests that a successful login yields a token describing the user and app.
#[tokio::test]
async fn test_login_issues_scoped_token() -> anyhow::Result<()> {
    let env = TestEnv::new().await;
    let user_id = env.create_user("alice@example.com", "correct horse").await?;

    let issued_at = Utc::now().timestamp();
    let token = env
        .auth
        .login(&RequestContext::new(), "alice@example.com", "correct horse", APP_ID)
        .await?;

    let claims = decode_claims(&token)?;
    assert_eq!(claims.user_id, user_id);
    assert_eq!(claims.email, "alice@example.com");
    assert_eq!(claims.app_id, APP_ID);

    let expected_exp = issued_at + i64::try_from(TOKEN_TTL.as_secs())?;
    assert!(
        (claims.exp - expected_exp).abs() <= 5,
        "exp {} should be close to {}",
        claims.exp,
        expected_exp
    );

    Ok(())
}

/// Tests that tokens for different apps are signed with different secrets.
#[tokio::test]
async fn test_login_token_is_bound_to_requested_app() -> anyhow::Result<()> {
    let env = TestEnv::new().await;
    env.store.add_app(App::new(2, "other-app", "other-secret")).await;
    env.create_user("alice@example.com", "pw").await?;

    let token = env
        .auth
        .login(&RequestContext::new(), "alice@example.com", "pw", 2)
        .await?;

    // Not verifiable with the first app's secret
    assert!(decode_claims(&token).is_err());

    Ok(())
}

/// Tests that a wrong password is reported as invalid credentials.
#[tokio::test]
async fn test_login_wrong_password() -> anyhow::Result<()> {
    let env = TestEnv::new().await;
    env.create_user("alice@example.com", "correct horse").await?;

    let err = env
        .auth
        .login(&RequestContext::new(), "alice@example.com", "battery staple", APP_ID)
        .await
        .unwrap_err();

    assert_eq!(err.kind(), AuthErrorKind::InvalidCredentials);
    assert!(err.is_client_error());

    Ok(())
}

/// Tests that an unknown email keeps the current invalid-request classification.
#[tokio::test]
async fn test_login_unknown_user() {
    let env = TestEnv::new().await;

    let err = env
        .auth
        .login(&RequestContext::new(), "ghost@example.com", "pw", APP_ID)
        .await
        .unwrap_err();

    assert_eq!(err.kind(), AuthErrorKind::InvalidRequest);
    assert_eq!(err.client_message(), "invalid email or password");
}

/// Tests that valid credentials against a missing app fail with app-not-found.
#[tokio::test]
async fn test_login_unknown_app() -> anyhow::Result<()> {
    let env = TestEnv::new().await;
    env.create_user("alice@example.com", "pw").await?;

    let err = env
        .auth
        .login(&RequestContext::new(), "alice@example.com", "pw", 404)
        .await
        .unwrap_err();

    assert_eq!(err.kind(), AuthErrorKind::AppNotFound);

    Ok(())
}

/// Tests that the password is checked before the app is resolved.
#[tokio::test]
async fn test_login_wrong_password_and_unknown_app() -> anyhow::Result<()> {
    let env = TestEnv::new().await;
    env.create_user("alice@example.com", "pw").await?;

    let err = env
        .auth
        .login(&RequestContext::new(), "alice@example.com", "nope", 404)
        .await
        .unwrap_err();

    assert_eq!(err.kind(), AuthErrorKind::InvalidCredentials);

    Ok(())
}
