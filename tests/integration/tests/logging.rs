//! Log hygiene integration tests.

use std::io;
use std::sync::{Arc, Mutex};

use sso_core::RequestContext;
use sso_model::App;
use sso_storage::MemoryStore;
use tracing::Level;

use crate::common::{TestEnv, APP_ID};

/// Writer that appends formatted log lines to a shared buffer.
#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl Captured {
    fn contents(&self) -> String {
        let buf = self.0.lock().unwrap();
        String::from_utf8_lossy(&buf).into_owned()
    }
}

impl io::Write for Captured {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Tests that operation spans are logged and secrets are not.
#[tokio::test]
async fn test_logs_never_contain_secrets() -> anyhow::Result<()> {
    let captured = Captured::default();
    let writer = captured.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(Level::TRACE)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    let store = Arc::new(MemoryStore::new());
    store.add_app(App::new(APP_ID, "test-app", "super-secret-key")).await;
    let auth = TestEnv::service(&store, tracing::info_span!("sso"));
    let ctx = RequestContext::new();

    auth.register_new_user(&ctx, "alice@example.com", "plaintext-pw-123")
        .await?;
    let _ = auth
        .login(&ctx, "alice@example.com", "wrong-pw-456", APP_ID)
        .await;
    auth.login(&ctx, "alice@example.com", "plaintext-pw-123", APP_ID)
        .await?;
    let _ = auth.register_new_user(&ctx, "alice@example.com", "dup-pw-789").await;

    let logs = captured.contents();

    assert!(logs.contains("auth.login"));
    assert!(logs.contains("auth.register_new_user"));
    assert!(logs.contains("invalid credentials"));
    assert!(logs.contains("user already exists"));

    for secret in [
        "plaintext-pw-123",
        "wrong-pw-456",
        "dup-pw-789",
        "super-secret-key",
        "$argon2id$",
    ] {
        assert!(!logs.contains(secret), "logs leaked {secret}");
    }

    Ok(())
}
