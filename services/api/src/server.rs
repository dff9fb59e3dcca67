use crate::cli::ServeArgs;
use crate::infra::{cors_layer, AppState};
use crate::routes::with_wellness_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::{info, warn};
use zenguard::analysis::{CompletionClient, OllamaClient};
use zenguard::config::AppConfig;
use zenguard::error::AppError;
use zenguard::telemetry;
use zenguard::wellness::{ScoringConfig, WellnessService};

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let model = Arc::new(OllamaClient::new(config.ollama.settings())?);
    if !model.health_check().await {
        warn!(
            base_url = %config.ollama.base_url,
            "language model unreachable; analysis will fall back to neutral readings"
        );
    }

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
        model: model.clone(),
    };

    let wellness_service = Arc::new(WellnessService::with_options(
        model,
        ScoringConfig::default(),
        config.analysis.service_options(),
    ));

    let app = with_wellness_routes(wellness_service)
        .layer(Extension(app_state))
        .layer(cors_layer(&config.server.cors_origins))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        model = %config.ollama.model,
        detect_masking = config.analysis.detect_masking,
        "zenguard wellness service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
