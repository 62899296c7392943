use dynamo_demo_lookup::config::ViewerConfig;
use dynamo_demo_lookup::viewer::{HttpFetcher, StdoutDisplay, Viewer, ViewerState, ERROR_PREFIX};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let config = ViewerConfig::from_env()?;
    tracing::info!("Fetching from {}", config.api_url);

    let viewer = Viewer::new(config, HttpFetcher::default(), StdoutDisplay);
    viewer.click().await;

    if let ViewerState::Displayed(text) = viewer.state() {
        if text.starts_with(ERROR_PREFIX) {
            std::process::exit(1);
        }
    }

    Ok(())
}
