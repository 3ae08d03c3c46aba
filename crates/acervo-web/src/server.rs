//! Router and server lifecycle.

use crate::config::WebConfig;
use crate::error::Result;
use crate::{api, pages};
use acervo_content::{AssetUrls, ContentClient};
use axum::routing::get;
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

/// Shared, read-only application state.
#[derive(Debug, Clone)]
pub struct AppState {
    pub client: ContentClient,
    pub assets: AssetUrls,
    pub config: WebConfig,
}

pub type SharedState = Arc<AppState>;

impl AppState {
    /// Build the content client once from `config`.
    pub fn new(config: WebConfig) -> Result<Self> {
        let client = ContentClient::new(&config.client_config())?;
        let assets = AssetUrls::new(config.public_url.clone());
        Ok(Self { client, assets, config })
    }
}

/// Build the site router.
pub fn build_router(state: SharedState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health
        .route("/health", get(api::health))
        .route("/ready", get(api::ready))
        .route("/placeholder.svg", get(api::placeholder))
        .route("/lang/{code}", get(api::set_language))
        // Query endpoint
        .route("/api/pessoal", get(api::staff_directory))
        // Pages
        .route("/", get(pages::home::index))
        .route("/edificios", get(pages::buildings::list))
        .route("/edificios/{id}", get(pages::buildings::detail))
        .route("/cursos", get(pages::courses::list))
        .route("/pessoal", get(pages::staff::list))
        .route("/pessoal/{id}", get(pages::staff::detail))
        .route("/publicacoes", get(pages::publications::list))
        .route("/publicacoes/{id}", get(pages::publications::detail))
        .route("/servicos", get(pages::services::list))
        .route("/servicos/{id}", get(pages::services::detail))
        .route("/grupos", get(pages::groups::list))
        .route("/grupos/{id}", get(pages::groups::detail))
        .route("/galeria", get(pages::gallery::overview))
        .route("/galeria/categoria/{id}", get(pages::gallery::category))
        .route("/galeria/subcategoria/{id}", get(pages::gallery::subcategory))
        .route("/galeria/{id}", get(pages::gallery::photo))
        .route("/documentos/categoria/{id}", get(pages::documents::category))
        .route("/documentos/{id}", get(pages::documents::detail))
        .route("/materiais", get(pages::materials::landing))
        .route("/materiais/categorias", get(pages::materials::categories))
        .route("/materiais/categorias/{id}", get(pages::materials::category))
        .route("/materiais/{id}", get(pages::materials::detail))
        .fallback(pages::not_found)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Serve on an already-bound listener until the process is stopped.
pub async fn serve(listener: TcpListener, state: SharedState) -> Result<()> {
    let addr = listener.local_addr()?;
    info!("Site listening on http://{}", addr);
    axum::serve(listener, build_router(state)).await?;
    Ok(())
}

/// Bind the configured address and serve.
pub async fn run(config: WebConfig) -> Result<()> {
    let listener = TcpListener::bind(config.api_addr).await?;
    let state = Arc::new(AppState::new(config)?);
    serve(listener, state).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_from_default_config() {
        let state = AppState::new(WebConfig::default()).unwrap();
        assert_eq!(state.assets.base(), "http://localhost:8055");
        let _router = build_router(Arc::new(state));
    }

    #[test]
    fn invalid_content_url_is_rejected() {
        let config = WebConfig { content_url: "ftp://cms".into(), ..WebConfig::default() };
        assert!(AppState::new(config).is_err());
    }
}
