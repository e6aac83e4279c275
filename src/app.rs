use std::sync::Arc;
use std::time::Duration;

use alloy::providers::ProviderBuilder;
use anyhow::Context;
use axum::Router;
use axum::http::StatusCode;
use axum::routing::get;
use rmcp::transport::SseServer;
use rmcp::transport::sse_server::SseServerConfig;
use tokio_util::sync::CancellationToken;

use crate::config::Config;
use crate::middleware::trace::http_trace_layer;
use crate::repository::{AlloyEthereumRepository, EthereumRepository};
use crate::service::RouteService;

pub fn build_app(cancellation_token: CancellationToken, config: Config) -> anyhow::Result<Router> {
    let addr = config.server_uri().parse()?;

    let sse_config = SseServerConfig {
        bind: addr,
        sse_path: "/sse".to_string(),
        post_path: "/message".to_string(),
        ct: cancellation_token,
        sse_keep_alive: Some(Duration::from_secs(15)),
    };

    let (sse_server, sse_router) = SseServer::new(sse_config);

    let repository = build_repository(&config)?;
    let router_config = config.router.clone();
    tracing::info!(
        "Compiling routes for Universal Router {} (WETH {})",
        router_config.universal_router,
        router_config.weth
    );

    let route_service = move || RouteService::new(repository.clone(), router_config.clone());

    sse_server.with_service(route_service);

    let app = Router::new()
        .route("/health", get(|| async move { StatusCode::OK }))
        .nest("/routes", sse_router)
        .layer(http_trace_layer());

    Ok(app)
}

/// One repository is shared by every MCP session.
fn build_repository(config: &Config) -> anyhow::Result<Arc<dyn EthereumRepository>> {
    let rpc_url = config
        .rpc
        .url
        .parse()
        .with_context(|| format!("invalid RPC URL: {}", config.rpc.url))?;
    let provider = Arc::new(ProviderBuilder::new().connect_http(rpc_url));

    if config.wallet.private_key.is_empty() {
        tracing::info!("No private key provided. Running in read-only mode.");
        return Ok(Arc::new(AlloyEthereumRepository::new(provider)));
    }

    match AlloyEthereumRepository::new_with_wallet(provider.clone(), &config.wallet.private_key) {
        Ok(repo) => {
            if let Some(address) = repo.wallet_address() {
                tracing::info!("Initialized with wallet address: {address}");
            }
            Ok(Arc::new(repo))
        }
        Err(e) => {
            tracing::warn!("Failed to initialize wallet: {e}. Using read-only mode.");
            Ok(Arc::new(AlloyEthereumRepository::new(provider)))
        }
    }
}
