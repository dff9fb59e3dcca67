use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use serde_json::json;
use std::sync::Arc;
use zenguard::analysis::CompletionClient;
use zenguard::wellness::{wellness_router, WellnessService};

pub(crate) fn with_wellness_routes<C>(service: Arc<WellnessService<C>>) -> axum::Router
where
    C: CompletionClient + 'static,
{
    wellness_router(service)
        .route("/", axum::routing::get(privacy_notice))
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

pub(crate) async fn privacy_notice() -> Json<serde_json::Value> {
    Json(json!({
        "name": "ZenGuard AI",
        "version": env!("CARGO_PKG_VERSION"),
        "privacy": {
            "data_storage": false,
            "logging": false,
            "tracking": false,
            "message": "Your thoughts are safe. Nothing is stored.",
        },
    }))
}

pub(crate) async fn healthcheck(Extension(state): Extension<AppState>) -> Json<serde_json::Value> {
    let ollama = if state.model.health_check().await {
        "connected"
    } else {
        "disconnected"
    };

    Json(json!({
        "status": "healthy",
        "ollama": ollama,
        "privacy": "enforced",
        "storage": "none",
    }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::Request;
    use metrics_exporter_prometheus::PrometheusBuilder;
    use serde_json::Value;
    use std::sync::atomic::AtomicBool;
    use tower::ServiceExt;
    use zenguard::analysis::{AnalysisError, CompletionRequest};
    use zenguard::wellness::ScoringConfig;

    struct StubModel {
        online: bool,
    }

    #[async_trait]
    impl CompletionClient for StubModel {
        async fn generate(&self, _request: &CompletionRequest) -> Result<String, AnalysisError> {
            Err(AnalysisError::Transport("stub".to_string()))
        }

        async fn health_check(&self) -> bool {
            self.online
        }
    }

    fn state(ready: bool, online: bool) -> AppState {
        AppState {
            readiness: Arc::new(AtomicBool::new(ready)),
            metrics: Arc::new(PrometheusBuilder::new().build_recorder().handle()),
            model: Arc::new(StubModel { online }),
        }
    }

    fn app(state: AppState) -> axum::Router {
        let model = Arc::new(StubModel { online: false });
        with_wellness_routes(Arc::new(WellnessService::new(model, ScoringConfig::default())))
            .layer(Extension(state))
    }

    async fn get_json(app: axum::Router, uri: &str) -> (StatusCode, Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).expect("request"))
            .await
            .expect("router responds");
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
            .await
            .expect("read body");
        (status, serde_json::from_slice(&body).expect("json payload"))
    }

    #[tokio::test]
    async fn root_states_the_privacy_guarantees() {
        let (status, body) = get_json(app(state(true, true)), "/").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["name"], "ZenGuard AI");
        assert_eq!(body["privacy"]["data_storage"], false);
        assert_eq!(body["privacy"]["logging"], false);
        assert_eq!(body["privacy"]["tracking"], false);
    }

    #[tokio::test]
    async fn health_reports_model_connectivity() {
        let Json(online) = healthcheck(Extension(state(true, true))).await;
        let Json(offline) = healthcheck(Extension(state(true, false))).await;

        assert_eq!(online["status"], "healthy");
        assert_eq!(online["ollama"], "connected");
        assert_eq!(offline["status"], "healthy");
        assert_eq!(offline["ollama"], "disconnected");
        assert_eq!(offline["storage"], "none");
    }

    #[tokio::test]
    async fn readiness_tracks_startup() {
        let (initializing, body) = get_json(app(state(false, true)), "/ready").await;
        assert_eq!(initializing, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["status"], "initializing");

        let (ready, body) = get_json(app(state(true, true)), "/ready").await;
        assert_eq!(ready, StatusCode::OK);
        assert_eq!(body["status"], "ready");
    }

    #[tokio::test]
    async fn metrics_are_plain_text() {
        let response = app(state(true, true))
            .oneshot(Request::builder().uri("/metrics").body(Body::empty()).expect("request"))
            .await
            .expect("router responds");

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/plain; version=0.0.4"
        );
    }
}
