use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, warn};

use super::AnalysisError;

/// Prompt plus sampling controls for a single completion.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub prompt: String,
    pub system_prompt: Option<String>,
    pub temperature: f32,
    pub max_tokens: u32,
    /// Base64-encoded images attached to the user message.
    pub images: Vec<String>,
}

impl CompletionRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            system_prompt: None,
            temperature: 0.3,
            max_tokens: 512,
            images: Vec::new(),
        }
    }

    pub fn system(mut self, system_prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(system_prompt.into());
        self
    }

    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn image(mut self, image_base64: impl Into<String>) -> Self {
        self.images.push(image_base64.into());
        self
    }
}

/// Text-in, text-out language model boundary.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn generate(&self, request: &CompletionRequest) -> Result<String, AnalysisError>;

    /// Whether the backing model is reachable; never errors.
    async fn health_check(&self) -> bool;
}

/// Connection settings for a local Ollama daemon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OllamaSettings {
    pub base_url: String,
    pub model: String,
    pub timeout: Duration,
    pub connect_timeout: Duration,
}

impl Default for OllamaSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:11434".to_string(),
            model: "gemma3:4b".to_string(),
            timeout: Duration::from_secs(120),
            connect_timeout: Duration::from_secs(10),
        }
    }
}

/// Client for the Ollama chat API (non-streaming).
pub struct OllamaClient {
    base_url: String,
    model: String,
    http: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    message: Option<ChatMessage>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    #[serde(default)]
    role: String,
    #[serde(default)]
    content: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    images: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct TagsResponse {
    #[serde(default)]
    models: Vec<ModelTag>,
}

#[derive(Debug, Deserialize)]
struct ModelTag {
    #[serde(default)]
    name: String,
}

fn normalize_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

impl OllamaClient {
    pub fn new(settings: OllamaSettings) -> Result<Self, AnalysisError> {
        let http = reqwest::Client::builder()
            .timeout(settings.timeout)
            .connect_timeout(settings.connect_timeout)
            .build()
            .map_err(|err| AnalysisError::Transport(err.to_string()))?;

        Ok(Self {
            base_url: normalize_base_url(&settings.base_url),
            model: settings.model,
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn chat_body(&self, request: &CompletionRequest) -> serde_json::Value {
        let mut messages = Vec::with_capacity(2);
        if let Some(system) = &request.system_prompt {
            messages.push(ChatMessage {
                role: "system".to_string(),
                content: system.clone(),
                images: Vec::new(),
            });
        }
        messages.push(ChatMessage {
            role: "user".to_string(),
            content: request.prompt.clone(),
            images: request.images.clone(),
        });

        json!({
            "model": self.model,
            "messages": messages,
            "stream": false,
            "options": {
                "temperature": request.temperature,
                "num_predict": request.max_tokens,
            },
        })
    }

    /// Model names match with or without their tag suffix.
    fn has_model(&self, tags: &TagsResponse) -> bool {
        let family = self.model.split(':').next().unwrap_or(&self.model);
        tags.models.iter().any(|tag| tag.name.contains(family))
    }
}

impl From<reqwest::Error> for AnalysisError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            AnalysisError::Timeout
        } else if let Some(status) = err.status() {
            AnalysisError::Status(status.as_u16())
        } else if err.is_decode() {
            AnalysisError::Decode(err.to_string())
        } else {
            AnalysisError::Transport(err.to_string())
        }
    }
}

#[async_trait]
impl CompletionClient for OllamaClient {
    async fn generate(&self, request: &CompletionRequest) -> Result<String, AnalysisError> {
        let url = format!("{}/api/chat", self.base_url);
        debug!(
            model = %self.model,
            prompt_chars = request.prompt.len(),
            images = request.images.len(),
            max_tokens = request.max_tokens,
            "requesting completion"
        );

        let response = self
            .http
            .post(&url)
            .json(&self.chat_body(request))
            .send()
            .await?
            .error_for_status()?;
        let body: ChatResponse = response.json().await?;

        Ok(body.message.map(|message| message.content).unwrap_or_default())
    }

    async fn health_check(&self) -> bool {
        let url = format!("{}/api/tags", self.base_url);
        let response = match self.http.get(&url).send().await {
            Ok(response) if response.status().is_success() => response,
            Ok(response) => {
                warn!(status = %response.status(), "ollama health check rejected");
                return false;
            }
            Err(err) => {
                warn!(error = %err, "ollama unreachable");
                return false;
            }
        };

        match response.json::<TagsResponse>().await {
            Ok(tags) => self.has_model(&tags),
            Err(err) => {
                warn!(error = %err, "ollama returned an unreadable model list");
                false
            }
        }
    }
}
