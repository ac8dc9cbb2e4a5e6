use std::sync::Arc;

use auth::TokenIssuer;
use chrono::Duration;
use inventory_service::config::Config;
use inventory_service::domain::auth::ports::SystemClock;
use inventory_service::domain::auth::service::AuthService;
use inventory_service::domain::category::service::CategoryService;
use inventory_service::domain::file::service::FileService;
use inventory_service::domain::product::service::ProductService;
use inventory_service::inbound::http::router::create_router;
use inventory_service::inbound::http::router::AppState;
use inventory_service::outbound::repositories::category::PostgresCategoryRepository;
use inventory_service::outbound::repositories::file::PostgresFileRepository;
use inventory_service::outbound::repositories::product::PostgresProductRepository;
use inventory_service::outbound::repositories::refresh_token::PostgresRefreshTokenRepository;
use inventory_service::outbound::repositories::user::PostgresUserRepository;
use inventory_service::outbound::storage::local::LocalObjectStore;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "inventory_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "inventory-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        upload_dir = %config.storage.upload_dir,
        "Configuration loaded"
    );

    let pg_pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = 5,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let token_issuer = Arc::new(TokenIssuer::new(config.jwt.secret.as_bytes()));

    let user_repository = Arc::new(PostgresUserRepository::new(pg_pool.clone()));
    let refresh_token_repository = Arc::new(PostgresRefreshTokenRepository::new(pg_pool.clone()));
    let category_repository = Arc::new(PostgresCategoryRepository::new(pg_pool.clone()));
    let product_repository = Arc::new(PostgresProductRepository::new(pg_pool.clone()));
    let file_repository = Arc::new(PostgresFileRepository::new(pg_pool));
    let object_store = Arc::new(LocalObjectStore::new(&config.storage.upload_dir));

    let auth_service = Arc::new(AuthService::new(
        user_repository,
        refresh_token_repository,
        SystemClock,
        Arc::clone(&token_issuer),
        Duration::minutes(config.jwt.access_token_ttl_minutes),
    ));
    let category_service = Arc::new(CategoryService::new(Arc::clone(&category_repository)));
    let file_service = Arc::new(FileService::new(file_repository, object_store));
    let product_service = Arc::new(ProductService::new(
        product_repository,
        category_repository,
        file_service,
    ));

    let state = AppState {
        auth_service,
        category_service,
        product_service,
        token_issuer,
    };

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    axum::serve(http_listener, create_router(state)).await?;

    Ok(())
}
