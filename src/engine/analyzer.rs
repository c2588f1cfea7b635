//! The prompt analyzer.
//!
//! Builds a schema-constrained multimodal request for the selected
//! technique, sends it to the generative model and validates the reply.
//! Every failure is logged with its cause and surfaced as the single
//! user-safe [`AnalysisError`].

use crate::attachments::Attachment;
use crate::engine::gemini::{ContentPart, GenerativeModel, ModelRequest};
use crate::error::{AnalysisError, ModelError, ReplyError};
use crate::instructions;
use crate::models::{AnalysisRequest, AnalysisResult};
use crate::techniques;
use serde_json::Value;
use std::time::Instant;
use tracing::{debug, error, info, warn};

/// Fixed lead-in of the text part.
pub const PROMPT_PREAMBLE: &str = "Please analyze the following prompt:";

const PROMPT_SEPARATOR: &str = "\n\n---\n\n";

/// Default sampling temperature: low, since this is an evaluative task.
pub const DEFAULT_TEMPERATURE: f32 = 0.3;

/// Why a single analysis call failed. Never leaves this module.
#[derive(Debug, thiserror::Error)]
enum FailureCause {
    #[error("transport failure: {0}")]
    Transport(#[from] ModelError),
    #[error("malformed reply: {0}")]
    MalformedReply(#[from] ReplyError),
}

/// Stateless analysis engine over a generative model.
pub struct PromptAnalyzer<M> {
    model: M,
    temperature: f32,
}

impl<M: GenerativeModel> PromptAnalyzer<M> {
    pub fn new(model: M) -> Self {
        Self {
            model,
            temperature: DEFAULT_TEMPERATURE,
        }
    }

    /// Override the sampling temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    /// Analyze a prompt as an example of the technique `technique_id`.
    ///
    /// The caller guarantees a non-blank prompt and at most two attachments
    /// within the size limit (see [`crate::attachments::AttachmentSet`]).
    /// No retry is attempted.
    pub async fn analyze(
        &self,
        prompt_text: &str,
        attachments: &[Attachment],
        technique_id: &str,
    ) -> Result<AnalysisResult, AnalysisError> {
        let start = Instant::now();

        match self.run(prompt_text, attachments, technique_id).await {
            Ok(result) => {
                info!(
                    "Analysis complete: score {}, classified as {} ({:.1}s)",
                    result.score,
                    result.classification,
                    start.elapsed().as_secs_f64()
                );
                Ok(result)
            }
            Err(cause) => {
                error!("Analysis with {} failed: {}", self.model.model_name(), cause);
                Err(AnalysisError)
            }
        }
    }

    /// Analyze a request formed by [`AnalysisRequest::new`].
    pub async fn analyze_request(
        &self,
        request: &AnalysisRequest,
    ) -> Result<AnalysisResult, AnalysisError> {
        self.analyze(
            request.prompt_text(),
            request.attachments(),
            request.technique(),
        )
        .await
    }

    async fn run(
        &self,
        prompt_text: &str,
        attachments: &[Attachment],
        technique_id: &str,
    ) -> Result<AnalysisResult, FailureCause> {
        if !techniques::is_known(technique_id) {
            warn!(
                "Unknown technique '{}', using {}",
                technique_id,
                techniques::default_technique()
            );
        }

        let instructions = instructions::build(technique_id);
        let request = ModelRequest {
            system_instruction: instructions.instruction_text,
            parts: content_parts(prompt_text, attachments),
            response_schema: instructions.output_schema,
            temperature: self.temperature,
        };

        info!(
            "Analyzing prompt as {} with {} attachment(s)",
            instructions.technique,
            attachments.len()
        );

        let reply = self.model.generate(&request).await?;
        debug!("Received {} bytes from model", reply.len());

        Ok(parse_reply(&reply)?)
    }
}

/// Attachments first, in order, then exactly one text part.
pub fn content_parts(prompt_text: &str, attachments: &[Attachment]) -> Vec<ContentPart> {
    let mut parts: Vec<ContentPart> = attachments
        .iter()
        .map(|a| ContentPart::InlineData {
            mime_type: a.mime_type.clone(),
            data: a.data.clone(),
        })
        .collect();

    parts.push(ContentPart::Text(format!(
        "{}{}{}",
        PROMPT_PREAMBLE, PROMPT_SEPARATOR, prompt_text
    )));
    parts
}

/// Parse and strictly validate a raw model reply.
pub fn parse_reply(raw: &str) -> Result<AnalysisResult, ReplyError> {
    let value: Value = serde_json::from_str(raw.trim()).map_err(ReplyError::NotJson)?;

    if !value.is_object() {
        return Err(ReplyError::Invalid {
            field: "reply",
            reason: "expected a JSON object".to_string(),
        });
    }

    // Keys outside the schema are dropped; the typed result is what callers get.
    let result: AnalysisResult = serde_json::from_value(value).map_err(ReplyError::Schema)?;
    validate(&result)?;
    Ok(result)
}

fn validate(result: &AnalysisResult) -> Result<(), ReplyError> {
    if !(1..=10).contains(&result.score) {
        return Err(ReplyError::Invalid {
            field: "score",
            reason: format!("{} is outside 1..=10", result.score),
        });
    }

    if techniques::from_label(&result.classification).is_none() {
        return Err(ReplyError::Invalid {
            field: "classification",
            reason: format!("'{}' is not a known technique label", result.classification),
        });
    }

    Ok(())
}
