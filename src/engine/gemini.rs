//! Generative model client.
//!
//! [`GenerativeModel`] is the seam between the analyzer and the network;
//! [`GeminiClient`] implements it against the Gemini `generateContent`
//! REST endpoint.

use crate::error::ModelError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// One piece of multimodal request content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentPart {
    /// Base64 binary data with its MIME type.
    InlineData { mime_type: String, data: String },
    Text(String),
}

/// A single schema-constrained generation request.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelRequest {
    pub system_instruction: String,
    /// Ordered content parts.
    pub parts: Vec<ContentPart>,
    pub response_schema: Value,
    pub temperature: f32,
}

/// A model that answers one request with one text payload.
#[async_trait]
pub trait GenerativeModel: Send + Sync {
    /// Send the request and return the raw reply text.
    async fn generate(&self, request: &ModelRequest) -> Result<String, ModelError>;

    /// Model name, for logs and reports.
    fn model_name(&self) -> &str;
}

/// Connection settings for [`GeminiClient`].
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_url: String,
    pub api_key: String,
    pub model_name: String,
    /// `None` leaves the transport's default in place.
    pub timeout_seconds: Option<u64>,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_url: "https://generativelanguage.googleapis.com".to_string(),
            api_key: String::new(),
            model_name: "gemini-2.5-flash".to_string(),
            timeout_seconds: None,
        }
    }
}

/// Gemini generateContent request body.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    system_instruction: WireContent<'a>,
    contents: Vec<WireContent<'a>>,
    generation_config: GenerationConfig<'a>,
}

#[derive(Debug, Serialize)]
struct WireContent<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'a str>,
    parts: Vec<WirePart<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum WirePart<'a> {
    Inline {
        #[serde(rename = "inlineData")]
        inline_data: InlineData<'a>,
    },
    Text {
        text: &'a str,
    },
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InlineData<'a> {
    mime_type: &'a str,
    data: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig<'a> {
    response_mime_type: &'a str,
    response_schema: &'a Value,
    temperature: f32,
}

/// Gemini generateContent response.
#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ReplyPart>,
}

#[derive(Debug, Deserialize)]
struct ReplyPart {
    text: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate.
    fn into_text(self) -> Option<String> {
        let content = self.candidates.into_iter().next()?.content?;
        let text: String = content.parts.into_iter().filter_map(|p| p.text).collect();
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

fn to_wire_request(request: &ModelRequest) -> GenerateContentRequest<'_> {
    let parts = request
        .parts
        .iter()
        .map(|part| match part {
            ContentPart::InlineData { mime_type, data } => WirePart::Inline {
                inline_data: InlineData {
                    mime_type: mime_type.as_str(),
                    data: data.as_str(),
                },
            },
            ContentPart::Text(text) => WirePart::Text {
                text: text.as_str(),
            },
        })
        .collect();

    GenerateContentRequest {
        system_instruction: WireContent {
            role: None,
            parts: vec![WirePart::Text {
                text: request.system_instruction.as_str(),
            }],
        },
        contents: vec![WireContent {
            role: Some("user"),
            parts,
        }],
        generation_config: GenerationConfig {
            response_mime_type: "application/json",
            response_schema: &request.response_schema,
            temperature: request.temperature,
        },
    }
}

/// HTTP client for the Gemini API.
pub struct GeminiClient {
    config: GeminiConfig,
    http_client: reqwest::Client,
}

impl GeminiClient {
    /// Create a new client.
    pub fn new(config: GeminiConfig) -> Result<Self, ModelError> {
        let mut builder = reqwest::Client::builder();
        if let Some(seconds) = config.timeout_seconds {
            builder = builder.timeout(Duration::from_secs(seconds));
        }
        let http_client = builder.build()?;

        Ok(Self {
            config,
            http_client,
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.api_url.trim_end_matches('/'),
            self.config.model_name
        )
    }

    /// Classify a failed send. A timeout is only reported as such when
    /// this client configured one; otherwise the transport error is kept.
    fn send_error(&self, e: reqwest::Error) -> ModelError {
        match self.config.timeout_seconds {
            Some(seconds) if e.is_timeout() => ModelError::Timeout { seconds },
            _ if e.is_connect() => ModelError::Connect {
                url: self.config.api_url.clone(),
            },
            _ => ModelError::Transport(e),
        }
    }
}

#[async_trait]
impl GenerativeModel for GeminiClient {
    async fn generate(&self, request: &ModelRequest) -> Result<String, ModelError> {
        let url = self.endpoint();
        let body = to_wire_request(request);

        debug!(
            "Sending generateContent request with {} part(s) to {}",
            request.parts.len(),
            url
        );

        let response = self
            .http_client
            .post(&url)
            .header("x-goog-api-key", &self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| self.send_error(e))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(ModelError::Api { status, body });
        }

        let reply: GenerateContentResponse = response.json().await?;
        reply.into_text().ok_or(ModelError::EmptyReply)
    }

    fn model_name(&self) -> &str {
        &self.config.model_name
    }
}
