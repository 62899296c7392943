use std::env;
use std::sync::Arc;

use anyhow::Context;
use dynamo_demo_lookup::app::router;
use dynamo_demo_lookup::config::Config;
use dynamo_demo_lookup::dynamodb::DynamoDbStore;
use dynamo_demo_lookup::state::AppState;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    tracing::info!("dynamo-demo-lookup starting");

    let config = Config::from_env()?;
    config.log_startup();

    let store = DynamoDbStore::from_config(&config).await?;

    let state = AppState {
        store: Arc::new(store),
        config: Arc::new(config.clone()),
    };
    let app = router(state);

    if env::var("AWS_LAMBDA_RUNTIME_API").is_ok() {
        tracing::info!("Lambda runtime detected, serving API Gateway events");
        return lambda_http::run(app)
            .await
            .map_err(|e| anyhow::anyhow!(e));
    }

    let addr = format!("{}:{}", config.service_host, config.service_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    tracing::info!("Listening on {}", addr);
    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
