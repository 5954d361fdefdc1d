//! Test harness for integration testing.
//!
//! Wires a real AuthService (real bcrypt, real RS256 keys) to the in-memory
//! MockUserStore, so tests run without a database.

use axum::Router;
use std::sync::Arc;
use std::time::Duration;
use test_context::AsyncTestContext;
use user_service::common::UserId;
use user_service::domains::auth::{PasswordHasher, TokenIssuer};
use user_service::domains::user::AuthService;
use user_service::kernel::MockUserStore;
use user_service::server::build_app;

use super::fixtures::{token_keys, token_settings};

/// Test harness that manages test infrastructure.
///
/// Each test gets a fresh, empty store.
///
/// # Example using test-context
///
/// ```ignore
/// use test_context::test_context;
///
/// #[test_context(TestHarness)]
/// #[tokio::test]
/// async fn my_test(ctx: &TestHarness) {
///     let id = ctx.service.register("+628123456789", "Alice", "secret1").await.unwrap();
/// }
/// ```
pub struct TestHarness {
    /// Backing store - inspect or mutate it directly in tests.
    pub store: MockUserStore,
    /// Service under test.
    pub service: Arc<AuthService>,
}

impl AsyncTestContext for TestHarness {
    async fn setup() -> Self {
        Self::new()
    }

    async fn teardown(self) {
        // Store is dropped with the harness
    }
}

impl TestHarness {
    /// Creates a new test harness with an empty store.
    pub fn new() -> Self {
        // Initialize tracing subscriber to respect RUST_LOG environment variable.
        // Uses try_init() to avoid panicking if already initialized.
        // Run tests with: RUST_LOG=debug cargo test -- --nocapture
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();

        let store = MockUserStore::new();
        let service = Arc::new(AuthService::new(
            Arc::new(store.clone()),
            PasswordHasher::default(),
            token_keys(),
            token_settings(),
        ));

        Self { store, service }
    }

    /// Router wired to this harness' service.
    pub fn app(&self) -> Router {
        build_app(self.service.clone(), Duration::from_secs(5))
    }

    /// Issue a token with the service's own keys, for any user id.
    pub fn token_for(&self, id: UserId) -> String {
        TokenIssuer::new(token_keys(), token_settings())
            .issue(id)
            .expect("Failed to issue token")
    }
}
