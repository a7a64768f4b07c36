#![deny(
    clippy::expect_used,
    clippy::panic,
    clippy::print_stdout,
    clippy::todo,
    clippy::unimplemented,
    clippy::unwrap_used
)]

use std::sync::Arc;
use std::time::Duration;

use axum::{
    http::{HeaderValue, Method},
    Extension,
};
use legisview_api::{
    config::{Config, CorsConfig},
    congress::HttpCongressClient,
    dashboard::Dashboard,
    rest,
};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::EnvFilter;

/// Build the CORS layer from configuration.
fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let cors_origins = &config.allowed_origins;
    let allow_origin: AllowOrigin = if cors_origins.iter().any(|o| o == "*") {
        tracing::warn!("CORS configured to allow any origin - not recommended for production");
        AllowOrigin::any()
    } else if cors_origins.is_empty() {
        tracing::info!(
            "CORS allowed origins not configured - cross-origin requests will be blocked"
        );
        AllowOrigin::list(Vec::<HeaderValue>::new())
    } else {
        let origins: Vec<HeaderValue> = cors_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();
        tracing::info!(origins = ?cors_origins, "CORS allowed origins configured");
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers(Any)
        .allow_origin(allow_origin)
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    // Load and validate configuration first (fail-fast)
    let config = Config::load().map_err(|e| anyhow::anyhow!("{e}"))?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.logging.level))
        .init();

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        congress = config.defaults.congress,
        chamber = %config.defaults.chamber,
        "legisview-api starting up"
    );

    let http = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.congress_api.timeout_secs))
        .build()?;
    let client = HttpCongressClient::with_client(
        http,
        &config.congress_api.base_url,
        &config.congress_api.api_key,
    );
    let dashboard = Arc::new(Dashboard::new(
        Arc::new(client),
        config.classifier.thresholds(),
        config.congress_api.page_size,
    ));

    let app = rest::router()
        .layer(Extension(dashboard))
        .layer(Extension(config.defaults.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&config.cors));

    let addr = format!("{}:{}", config.server.host, config.server.port);
    tracing::info!("Starting server at http://{}/bills", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if let Err(err) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %err, "failed to listen for shutdown signal");
            }
            tracing::info!("shutting down");
        })
        .await?;

    Ok(())
}
