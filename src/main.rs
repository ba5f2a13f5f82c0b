use std::sync::Arc;

use sqlx::sqlite::SqlitePoolOptions;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use course_catalog::api::router;
use course_catalog::config::AppConfig;
use course_catalog::db::SqliteKvStore;
use course_catalog::repository::CatalogStore;
use course_catalog::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "course_catalog=debug,tower_http=info".to_string()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env()?;

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect(&config.database_url)
        .await?;

    let kv = SqliteKvStore::new(pool);
    kv.migrate().await?;

    let store = CatalogStore::with_namespace(Arc::new(kv), config.namespace.clone());
    if config.seed_demo_data {
        store.initialize_demo_data().await?;
    }

    let app = router(AppState::new(store));

    info!("listening on http://{}", config.bind_addr);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
