//! Cancellation and deadline integration tests.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use sso_auth::{AuthErrorKind, AuthService, PasswordPolicy};
use sso_core::RequestContext;
use sso_model::{App, User};
use sso_storage::{AppProvider, MemoryStore, StorageResult, UserProvider, UserSaver};

use crate::common::{TestEnv, APP_ID, TOKEN_TTL};

/// User lookups that stall before delegating to the in-memory store.
struct SlowUsers {
    inner: Arc<MemoryStore>,
    delay: Duration,
    completed: AtomicBool,
}

#[async_trait]
impl UserProvider for SlowUsers {
    async fn user(&self, ctx: &RequestContext, email: &str) -> StorageResult<User> {
        tokio::time::sleep(self.delay).await;
        self.completed.store(true, Ordering::SeqCst);
        self.inner.user(ctx, email).await
    }

    async fn is_admin(&self, ctx: &RequestContext, user_id: i64) -> StorageResult<bool> {
        tokio::time::sleep(self.delay).await;
        self.completed.store(true, Ordering::SeqCst);
        self.inner.is_admin(ctx, user_id).await
    }
}

fn slow_service(store: &Arc<MemoryStore>, slow: Arc<SlowUsers>) -> AuthService {
    let saver: Arc<dyn UserSaver> = store.clone();
    let apps: Arc<dyn AppProvider> = store.clone();

    AuthService::new(tracing::Span::none(), saver, slow, apps, TOKEN_TTL)
        .with_password_policy(PasswordPolicy::new().memory_cost(1024).time_cost(1))
}

async fn seeded_store() -> Arc<MemoryStore> {
    let store = Arc::new(MemoryStore::new());
    store.add_app(App::new(APP_ID, "test-app", "secret")).await;
    store
}

/// Tests that a passed deadline aborts an outstanding user lookup.
#[tokio::test(start_paused = true)]
async fn test_deadline_aborts_lookup() -> anyhow::Result<()> {
    let store = seeded_store().await;
    let slow = Arc::new(SlowUsers {
        inner: store.clone(),
        delay: Duration::from_secs(30),
        completed: AtomicBool::new(false),
    });
    let auth = slow_service(&store, slow.clone());

    auth.register_new_user(&RequestContext::new(), "alice@example.com", "pw")
        .await?;

    let ctx = RequestContext::new().timeout(Duration::from_secs(1));
    let err = auth
        .login(&ctx, "alice@example.com", "pw", APP_ID)
        .await
        .unwrap_err();

    assert_eq!(err.kind(), AuthErrorKind::Internal);
    assert!(err.to_string().contains("deadline exceeded"));

    // The lookup was dropped, not left running
    tokio::time::advance(Duration::from_secs(60)).await;
    assert!(!slow.completed.load(Ordering::SeqCst));

    Ok(())
}

/// Tests that cancelling from another task aborts an admin check.
#[tokio::test(start_paused = true)]
async fn test_cancel_aborts_admin_check() -> anyhow::Result<()> {
    let store = seeded_store().await;
    let slow = Arc::new(SlowUsers {
        inner: store.clone(),
        delay: Duration::from_secs(30),
        completed: AtomicBool::new(false),
    });
    let auth = slow_service(&store, slow.clone());

    let user_id = auth
        .register_new_user(&RequestContext::new(), "alice@example.com", "pw")
        .await?;

    let ctx = RequestContext::new();
    let canceller = ctx.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(100)).await;
        canceller.cancel();
    });

    let err = auth.is_admin(&ctx, user_id).await.unwrap_err();
    assert_eq!(err.kind(), AuthErrorKind::Internal);
    assert!(err.to_string().contains("cancelled"));
    assert!(!slow.completed.load(Ordering::SeqCst));

    Ok(())
}

/// Tests that a generous deadline does not interfere.
#[tokio::test]
async fn test_deadline_allows_fast_calls() -> anyhow::Result<()> {
    let env = TestEnv::new().await;
    let user_id = env.create_user("alice@example.com", "pw").await?;

    let ctx = RequestContext::new().timeout(Duration::from_secs(30));
    assert!(!env.auth.is_admin(&ctx, user_id).await?);
    env.auth.login(&ctx, "alice@example.com", "pw", APP_ID).await?;

    Ok(())
}
