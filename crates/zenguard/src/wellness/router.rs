use std::sync::Arc;

use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::scoring::WellnessInputs;
use super::service::WellnessService;
use crate::analysis::CompletionClient;

pub const MAX_ENTRY_CHARS: usize = 10_000;
pub const MAX_QUICK_CHECK_CHARS: usize = 2_000;
pub const MAX_IMAGE_BYTES: usize = 10 * 1024 * 1024;

const IMAGE_FIELD: &str = "file";
const IMAGE_CONTENT_TYPES: [&str; 3] = ["image/png", "image/jpeg", "image/jpg"];

/// Text submitted for analysis. Extra fields such as a session id are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct TextRequest {
    pub text: String,
}

impl TextRequest {
    fn validate(&self, max_chars: usize) -> Result<&str, String> {
        let chars = self.text.chars().count();
        if self.text.trim().is_empty() {
            return Err("text must not be empty".to_string());
        }
        if chars > max_chars {
            return Err(format!("text must be at most {max_chars} characters"));
        }
        Ok(&self.text)
    }
}

fn rejected(message: String) -> Response {
    error_response(StatusCode::UNPROCESSABLE_ENTITY, message)
}

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    let payload = json!({ "error": message.into() });
    (status, axum::Json(payload)).into_response()
}

/// Router builder exposing the analysis endpoints under `/api`.
pub fn wellness_router<C>(service: Arc<WellnessService<C>>) -> Router
where
    C: CompletionClient + 'static,
{
    Router::new()
        .route("/api/analyze", post(analyze_handler::<C>))
        .route("/api/quick-check", post(quick_check_handler::<C>))
        .route(
            "/api/release-affirmation",
            post(release_affirmation_handler::<C>),
        )
        .route("/api/score", post(score_handler::<C>))
        .route(
            "/api/analyze-visual",
            post(analyze_visual_handler::<C>).layer(DefaultBodyLimit::max(MAX_IMAGE_BYTES)),
        )
        .with_state(service)
}

pub(crate) async fn analyze_handler<C>(
    State(service): State<Arc<WellnessService<C>>>,
    axum::Json(request): axum::Json<TextRequest>,
) -> Response
where
    C: CompletionClient + 'static,
{
    match request.validate(MAX_ENTRY_CHARS) {
        Ok(text) => {
            let response = service.analyze(text).await;
            (StatusCode::OK, axum::Json(response)).into_response()
        }
        Err(message) => rejected(message),
    }
}

pub(crate) async fn quick_check_handler<C>(
    State(service): State<Arc<WellnessService<C>>>,
    axum::Json(request): axum::Json<TextRequest>,
) -> Response
where
    C: CompletionClient + 'static,
{
    match request.validate(MAX_QUICK_CHECK_CHARS) {
        Ok(text) => (StatusCode::OK, axum::Json(service.quick_check(text))).into_response(),
        Err(message) => rejected(message),
    }
}

pub(crate) async fn release_affirmation_handler<C>(
    State(service): State<Arc<WellnessService<C>>>,
    axum::Json(request): axum::Json<TextRequest>,
) -> Response
where
    C: CompletionClient + 'static,
{
    match request.validate(MAX_QUICK_CHECK_CHARS) {
        Ok(text) => {
            let affirmation = service.release_affirmation(text).await;
            let payload = json!({ "affirmation": affirmation });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(message) => rejected(message),
    }
}

pub(crate) async fn score_handler<C>(
    State(service): State<Arc<WellnessService<C>>>,
    axum::Json(inputs): axum::Json<WellnessInputs>,
) -> Response
where
    C: CompletionClient + 'static,
{
    (StatusCode::OK, axum::Json(service.score(&inputs))).into_response()
}

/// Pull the uploaded image out of the `file` field, checking its declared type.
async fn read_image(multipart: &mut Multipart) -> Result<Vec<u8>, Response> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| error_response(err.status(), err.body_text()))?
    {
        if field.name() != Some(IMAGE_FIELD) {
            continue;
        }

        let content_type = field.content_type().unwrap_or_default().to_ascii_lowercase();
        if !IMAGE_CONTENT_TYPES.contains(&content_type.as_str()) {
            return Err(error_response(
                StatusCode::BAD_REQUEST,
                "Invalid file type. Please upload PNG or JPG.",
            ));
        }

        let bytes = field
            .bytes()
            .await
            .map_err(|err| error_response(err.status(), err.body_text()))?;
        if bytes.is_empty() {
            return Err(error_response(StatusCode::BAD_REQUEST, "file must not be empty"));
        }
        return Ok(bytes.to_vec());
    }

    Err(error_response(
        StatusCode::BAD_REQUEST,
        "missing file field with a PNG or JPG image",
    ))
}

pub(crate) async fn analyze_visual_handler<C>(
    State(service): State<Arc<WellnessService<C>>>,
    mut multipart: Multipart,
) -> Response
where
    C: CompletionClient + 'static,
{
    match read_image(&mut multipart).await {
        Ok(image) => {
            let response = service.analyze_visual(&image).await;
            (StatusCode::OK, axum::Json(response)).into_response()
        }
        Err(response) => response,
    }
}
