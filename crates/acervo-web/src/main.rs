//! Museum site binary

use acervo_web::{server, WebConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "acervo_web=info,acervo_content=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting museum site");

    let config = WebConfig::from_env()?;
    tracing::info!(content = %config.content_url, addr = %config.api_addr, "configuration loaded");

    server::run(config).await?;

    Ok(())
}
