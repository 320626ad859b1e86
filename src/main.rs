use carbon_footprint_api::config::Config;
use carbon_footprint_api::display_data::DisplayData;
use carbon_footprint_api::handlers::{self, AppState};
use carbon_footprint_api::orchestrator::EstimationOrchestrator;
use carbon_footprint_api::predictor_client::PredictorClient;
use std::net::SocketAddr;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_governor::{
    governor::GovernorConfigBuilder, key_extractor::SmartIpKeyExtractor, GovernorLayer,
};
use tower_http::limit::RequestBodyLimitLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Main entry point for the application.
///
/// This function initializes the application, including:
/// - Logging and tracing.
/// - Configuration loading.
/// - Display statistics.
/// - The remote predictor client and estimation orchestrator.
/// - HTTP routes and middleware (CORS, Rate Limiting).
///
/// It then starts the Axum server.
///
/// # Returns
///
/// * `anyhow::Result<()>` - Ok if the server runs successfully, or an error if initialization fails.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "carbon_footprint_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env()?;

    let display_data = DisplayData::load(
        config.carbon_stats_path.as_deref(),
        config.feature_importance_path.as_deref(),
    )
    .await;
    tracing::info!(
        "Display data ready: average {:.1} kg CO2/month, {} ranked features",
        display_data.stats.average_footprint,
        display_data.features.len()
    );

    // A client that cannot be built leaves the service on local estimates only
    let orchestrator = match PredictorClient::new(
        config.predictor_url.clone(),
        config.predictor_timeout,
        config.predictor_breaker_threshold,
    ) {
        Ok(client) => {
            tracing::info!("✓ Predictor client initialized: {}", config.predictor_url);
            EstimationOrchestrator::new(client)
        }
        Err(e) => {
            tracing::error!("Failed to initialize predictor client: {}", e);
            EstimationOrchestrator::local_only()
        }
    };

    let app_state = Arc::new(AppState {
        orchestrator,
        display: display_data,
    });

    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(config.rate_limit_per_second)
            .burst_size(config.rate_limit_burst)
            .key_extractor(SmartIpKeyExtractor)
            .finish()
            .ok_or_else(|| anyhow::anyhow!("Invalid rate limit configuration"))?,
    );

    let api = handlers::api_routes().layer(
        ServiceBuilder::new()
            // Questionnaires are tiny; 64KB is generous
            .layer(RequestBodyLimitLayer::new(64 * 1024))
            .layer(GovernorLayer {
                config: governor_conf,
            }),
    );

    let app = handlers::router(app_state, api);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
