// Main entry point for the user service API server

use anyhow::{Context, Result};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use user_service::domains::auth::{PasswordHasher, TokenKeys, TokenSettings};
use user_service::domains::user::{AuthService, PostgresUserStore};
use user_service::{server::build_app, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,user_service=debug,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting user service API");

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!(?config, "Configuration loaded");

    // Parse signing keys once; they are shared read-only by every request
    let keys = Arc::new(
        TokenKeys::from_base64_pem(&config.token_private_key, &config.token_public_key)
            .context("Failed to load token keys")?,
    );
    let hasher = PasswordHasher::new(config.bcrypt_cost).context("Invalid BCRYPT_COST")?;
    if hasher.cost() == user_service::domains::auth::password::MIN_COST {
        tracing::warn!("Using minimum bcrypt cost; raise BCRYPT_COST for stronger hashes");
    }

    // Connect to database
    tracing::info!("Connecting to database...");
    let pool = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Database connected");

    // Run migrations
    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Migrations complete");

    let auth_service = Arc::new(AuthService::new(
        Arc::new(PostgresUserStore::new(pool)),
        hasher,
        keys,
        TokenSettings {
            issuer: config.token_issuer.clone(),
            ttl: chrono::Duration::seconds(config.token_ttl_seconds),
        },
    ));

    // Build application
    let app = build_app(
        auth_service,
        Duration::from_secs(config.request_timeout_seconds),
    );

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Starting server on {}", addr);
    tracing::info!("Health check: http://localhost:{}/health", config.port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
