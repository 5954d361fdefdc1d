//! Postgres-backed test harness.
//!
//! One Postgres container is started on first use and shared by every test in the
//! binary. Migrations run once. Tests share the database, so each one works with its
//! own phone numbers (see [`unique_phone_number`]) instead of truncating tables.

use anyhow::{Context, Result};
use sqlx::PgPool;
use std::sync::Arc;
use test_context::AsyncTestContext;
use testcontainers::runners::AsyncRunner;
use testcontainers::{ContainerAsync, ImageExt};
use testcontainers_modules::postgres::Postgres;
use tokio::sync::OnceCell;
use user_service::domains::auth::PasswordHasher;
use user_service::domains::user::{AuthService, PostgresUserStore};

use super::fixtures::{token_keys, token_settings};

struct SharedPostgres {
    db_url: String,
    // Keep the container alive for the entire test run
    _postgres: ContainerAsync<Postgres>,
}

static SHARED_POSTGRES: OnceCell<SharedPostgres> = OnceCell::const_new();

impl SharedPostgres {
    async fn init() -> Result<Self> {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();

        let postgres = Postgres::default()
            .with_tag("16")
            .start()
            .await
            .context("Failed to start Postgres container")?;

        let host = postgres.get_host().await?;
        let port = postgres.get_host_port_ipv4(5432).await?;
        let db_url = format!("postgresql://postgres:postgres@{}:{}/postgres", host, port);

        let pool = PgPool::connect(&db_url)
            .await
            .context("Failed to connect to Postgres for migrations")?;

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .context("Failed to run migrations")?;

        pool.close().await;

        Ok(Self {
            db_url,
            _postgres: postgres,
        })
    }

    async fn get() -> &'static Self {
        SHARED_POSTGRES
            .get_or_init(|| async {
                Self::init()
                    .await
                    .expect("Failed to initialize shared Postgres container")
            })
            .await
    }
}

/// Harness wiring `PostgresUserStore` (and an AuthService over it) to a real database.
///
/// ```ignore
/// #[test_context(PostgresHarness)]
/// #[tokio::test]
/// async fn my_test(ctx: &PostgresHarness) {
///     let id = ctx.store.insert_user(&unique_phone_number(), "Alice", "hash").await.unwrap();
/// }
/// ```
pub struct PostgresHarness {
    /// Pool for direct queries against the tables
    pub db_pool: PgPool,
    pub store: PostgresUserStore,
    pub service: Arc<AuthService>,
}

impl AsyncTestContext for PostgresHarness {
    async fn setup() -> Self {
        let shared = SharedPostgres::get().await;

        // Each test runs on its own runtime, so it gets its own pool
        let db_pool = PgPool::connect(&shared.db_url)
            .await
            .expect("Failed to connect to shared Postgres");

        let store = PostgresUserStore::new(db_pool.clone());
        let service = Arc::new(AuthService::new(
            Arc::new(store.clone()),
            PasswordHasher::default(),
            token_keys(),
            token_settings(),
        ));

        Self {
            db_pool,
            store,
            service,
        }
    }

    async fn teardown(self) {
        self.db_pool.close().await;
    }
}

impl PostgresHarness {
    /// Rows in `user_login_history` for a user
    pub async fn login_count(&self, user_id: i32) -> i64 {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM user_login_history WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(&self.db_pool)
            .await
            .expect("Failed to count login history")
    }
}

/// A valid `+62` phone number not used by any other test
pub fn unique_phone_number() -> String {
    let digits = uuid::Uuid::new_v4().as_u128() % 10_000_000_000;
    format!("+62{:010}", digits)
}
