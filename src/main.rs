use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use template_match_api::{
    config::Config,
    db::{create_pool, CatalogSource, InMemoryCatalog, PostgresCatalog},
    routes::{create_router, AppState},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "template_match_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    let catalog: Arc<dyn CatalogSource> = match (&config.database_url, &config.catalog_path) {
        (Some(database_url), _) => Arc::new(PostgresCatalog::new(create_pool(database_url).await?)),
        (None, Some(path)) => Arc::new(InMemoryCatalog::from_json_file(path)?),
        (None, None) => anyhow::bail!("No catalog source configured"),
    };

    tracing::info!(
        source = catalog.name(),
        weights = ?config.match_weights(),
        seeded = config.jitter_seed.is_some(),
        "Catalog source ready"
    );

    let app = create_router(AppState::from_config(&config, catalog));

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");
    axum::serve(listener, app).await?;

    Ok(())
}
