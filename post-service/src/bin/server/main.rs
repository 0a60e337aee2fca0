use std::sync::Arc;

use auth::Authenticator;
use auth::CredentialStore;
use auth::HashingPool;
use auth::RequestAuthorizer;
use auth::TokenCodec;
use post_service::config::Config;
use post_service::domain::post::service::PostService;
use post_service::inbound::http::router::create_router;
use post_service::outbound::repositories::PostgresCredentialStore;
use post_service::outbound::repositories::PostgresPostRepository;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "post_service=debug,auth=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "post-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        token_ttl_minutes = config.jwt.expiration_minutes,
        max_concurrent_hashes = config.auth.max_concurrent_hashes,
        "Configuration loaded"
    );

    if config.jwt.is_secret_weak() {
        tracing::warn!(
            min_bytes = post_service::config::JwtConfig::MIN_SECRET_BYTES,
            "JWT secret is shorter than recommended"
        );
    }

    let pg_pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = config.database.max_connections,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let codec = Arc::new(
        TokenCodec::new(config.jwt.secret.as_bytes())
            .with_default_ttl(chrono::Duration::minutes(config.jwt.expiration_minutes)),
    );
    let credential_store: Arc<dyn CredentialStore> =
        Arc::new(PostgresCredentialStore::new(pg_pool.clone()));

    let authenticator = Arc::new(Authenticator::new(
        Arc::clone(&credential_store),
        Arc::clone(&codec),
        HashingPool::new(config.auth.max_concurrent_hashes),
    ));
    authenticator.prime().await?;

    let authorizer = Arc::new(RequestAuthorizer::new(credential_store, codec));

    let post_repository = Arc::new(PostgresPostRepository::new(pg_pool));
    let post_service = Arc::new(PostService::new(post_repository));

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(post_service, authenticator, authorizer);
    axum::serve(http_listener, http_application).await?;

    tracing::info!("Server exited successfully");

    Ok(())
}
