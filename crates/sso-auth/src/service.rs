//! Authentication service.
//!
//! Orchestrates login, registration, and admin checks over the injected
//! storage providers. The service holds no mutable state; clones share the
//! same provider handles and can serve requests concurrently.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use sso_core::{AuthConfig, RequestContext};
use sso_storage::{AppProvider, StorageResult, UserProvider, UserSaver};
use tracing::{Instrument, Span};

use crate::error::{op, AuthError, AuthResult};
use crate::password::{PasswordHasherService, PasswordPolicy};
use crate::token::TokenIssuer;

/// Authentication service.
#[derive(Clone)]
pub struct AuthService {
    span: Span,
    user_saver: Arc<dyn UserSaver>,
    user_provider: Arc<dyn UserProvider>,
    app_provider: Arc<dyn AppProvider>,
    hasher: PasswordHasherService,
    tokens: TokenIssuer,
}

impl std::fmt::Debug for AuthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthService")
            .field("policy", self.hasher.policy())
            .field("token_ttl", &self.tokens.ttl())
            .finish_non_exhaustive()
    }
}

impl AuthService {
    /// Creates a new authentication service with the default password policy.
    ///
    /// Every span the service opens is a child of `span`.
    #[must_use]
    pub fn new(
        span: Span,
        user_saver: Arc<dyn UserSaver>,
        user_provider: Arc<dyn UserProvider>,
        app_provider: Arc<dyn AppProvider>,
        token_ttl: Duration,
    ) -> Self {
        Self {
            span,
            user_saver,
            user_provider,
            app_provider,
            hasher: PasswordHasherService::with_defaults(),
            tokens: TokenIssuer::new(token_ttl),
        }
    }

    /// Creates a new authentication service from configuration.
    #[must_use]
    pub fn from_config(
        span: Span,
        user_saver: Arc<dyn UserSaver>,
        user_provider: Arc<dyn UserProvider>,
        app_provider: Arc<dyn AppProvider>,
        config: &AuthConfig,
    ) -> Self {
        Self::new(span, user_saver, user_provider, app_provider, config.token_ttl)
            .with_password_policy(PasswordPolicy::from(&config.password))
    }

    /// Replaces the password hashing policy.
    #[must_use]
    pub fn with_password_policy(mut self, policy: PasswordPolicy) -> Self {
        self.hasher = PasswordHasherService::new(policy);
        self
    }

    /// Authenticates a user and issues an access token for `app_id`.
    ///
    /// # Errors
    ///
    /// - `InvalidRequest` if no user has this email
    /// - `InvalidCredentials` if the password does not match
    /// - `AppNotFound` if the application cannot be loaded
    /// - `Internal` on storage or signing failure
    pub async fn login(
        &self,
        ctx: &RequestContext,
        email: &str,
        password: &str,
        app_id: i32,
    ) -> AuthResult<String> {
        let span = tracing::info_span!(parent: &self.span, "auth.login", email = %email, app_id);

        async {
            let user = guarded(ctx, self.user_provider.user(ctx, email))
                .await
                .map_err(|e| {
                    if e.is_not_found() {
                        tracing::warn!(error = %e, "user not found");
                        AuthError::InvalidRequest { op: op::LOGIN }
                    } else {
                        tracing::error!(error = %e, "failed to get user");
                        AuthError::internal(op::LOGIN, e)
                    }
                })?;

            if !self.hasher.verify(password, &user.pass_hash) {
                tracing::warn!(user_id = user.id, "invalid credentials");
                return Err(AuthError::InvalidCredentials { op: op::LOGIN });
            }

            if self.hasher.needs_rehash(&user.pass_hash) {
                tracing::debug!(
                    user_id = user.id,
                    "stored password hash uses outdated parameters"
                );
            }

            let app = guarded(ctx, self.app_provider.app(ctx, app_id))
                .await
                .map_err(|e| {
                    tracing::error!(error = %e, "failed to get app");
                    AuthError::AppNotFound { op: op::LOGIN }
                })?;

            let token = self.tokens.issue(&user, &app).map_err(|e| {
                tracing::error!(error = %e, "failed to create token");
                AuthError::internal(op::LOGIN, e)
            })?;

            tracing::info!(user_id = user.id, "user logged in");

            Ok(token)
        }
        .instrument(span)
        .await
    }

    /// Registers a new user and returns the assigned ID.
    ///
    /// # Errors
    ///
    /// - `UserExists` if the email is already registered
    /// - `Internal` on hashing or storage failure
    pub async fn register_new_user(
        &self,
        ctx: &RequestContext,
        email: &str,
        password: &str,
    ) -> AuthResult<i64> {
        let span = tracing::info_span!(parent: &self.span, "auth.register_new_user", email = %email);

        async {
            tracing::info!("registering new user");

            if let Some(e) = ctx.err() {
                tracing::warn!(error = %e, "registration aborted before hashing");
                return Err(AuthError::internal(op::REGISTER_NEW_USER, e));
            }

            let pass_hash = self.hasher.hash(password).map_err(|e| {
                tracing::error!(error = %e, "failed to generate password hash");
                AuthError::internal(op::REGISTER_NEW_USER, e)
            })?;

            let user_id = guarded(ctx, self.user_saver.save_user(ctx, email, &pass_hash))
                .await
                .map_err(|e| {
                    if e.is_duplicate() {
                        tracing::warn!(error = %e, "user already exists");
                        AuthError::UserExists {
                            op: op::REGISTER_NEW_USER,
                        }
                    } else {
                        tracing::error!(error = %e, "failed to save user");
                        AuthError::internal(op::REGISTER_NEW_USER, e)
                    }
                })?;

            tracing::info!(user_id, "user registered");

            Ok(user_id)
        }
        .instrument(span)
        .await
    }

    /// Reports whether a user has administrative privileges.
    ///
    /// # Errors
    ///
    /// - `InvalidRequest` if the user doesn't exist
    /// - `Internal` on storage failure
    pub async fn is_admin(&self, ctx: &RequestContext, user_id: i64) -> AuthResult<bool> {
        let span = tracing::info_span!(parent: &self.span, "auth.is_admin", user_id);

        async {
            tracing::info!("checking if user is admin");

            let is_admin = guarded(ctx, self.user_provider.is_admin(ctx, user_id))
                .await
                .map_err(|e| {
                    if e.is_not_found() {
                        tracing::warn!(error = %e, "user not found");
                        AuthError::InvalidRequest { op: op::IS_ADMIN }
                    } else {
                        tracing::error!(error = %e, "failed to check if user is admin");
                        AuthError::internal(op::IS_ADMIN, e)
                    }
                })?;

            tracing::info!(is_admin, "checked if user is admin");

            Ok(is_admin)
        }
        .instrument(span)
        .await
    }
}

/// Runs a storage call under the request's cancellation and deadline.
async fn guarded<T, F>(ctx: &RequestContext, call: F) -> StorageResult<T>
where
    F: Future<Output = StorageResult<T>>,
{
    ctx.guard(call).await?
}
