//! Data models for prompt analysis.
//!
//! This module contains the request and result types that flow through
//! the analysis engine, plus the report written by the CLI.

use crate::attachments::{Attachment, AttachmentSet};
use crate::error::RequestError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One analysis call's input, assembled fresh by the caller.
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    prompt_text: String,
    attachments: Vec<Attachment>,
    technique: String,
}

impl AnalysisRequest {
    /// Form a request from a staged attachment set.
    ///
    /// Fails when the prompt is blank. The attachment limits are already
    /// guaranteed by [`AttachmentSet`].
    pub fn new(
        prompt_text: impl Into<String>,
        attachments: AttachmentSet,
        technique: impl Into<String>,
    ) -> Result<Self, RequestError> {
        let prompt_text = prompt_text.into();
        if prompt_text.trim().is_empty() {
            return Err(RequestError::EmptyPrompt);
        }

        Ok(Self {
            prompt_text,
            attachments: attachments.into_vec(),
            technique: technique.into(),
        })
    }

    pub fn prompt_text(&self) -> &str {
        &self.prompt_text
    }

    pub fn attachments(&self) -> &[Attachment] {
        &self.attachments
    }

    pub fn technique(&self) -> &str {
        &self.technique
    }
}

/// The components extracted from the user's prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnpackedCraft {
    pub context: String,
    pub role: String,
    pub action: String,
    pub format: String,
    /// Target audience and tone.
    pub target: String,
}

/// Critique of each component, plus an overall summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feedback {
    pub context: String,
    pub role: String,
    pub action: String,
    pub format: String,
    pub target: String,
    pub overall: String,
}

/// A validated analysis of one prompt.
///
/// Only constructed by validating a model reply; every field is required.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// Overall score, 1 to 10.
    pub score: u8,
    /// Display label of the technique the prompt most resembles.
    #[serde(alias = "promptClassification")]
    pub classification: String,
    /// Agreement or disagreement between the detected and selected technique.
    pub classification_feedback: String,
    pub unpacked: UnpackedCraft,
    pub feedback: Feedback,
    /// Rewrite exemplifying the selected technique.
    pub improved_prompt: String,
}

/// Metadata about one analysis run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// Technique id the prompt was analyzed against (after fallback).
    pub technique: String,
    /// Display name of that technique.
    pub technique_name: String,
    /// Name of the generative model used.
    pub model_used: String,
    /// Date and time of the analysis.
    pub analysis_date: DateTime<Utc>,
    /// Names of the attachments sent with the prompt.
    pub attachments: Vec<String>,
    /// Duration of the model call in seconds.
    pub duration_seconds: f64,
}

/// What the CLI writes out: the result plus how it was obtained.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub metadata: ReportMetadata,
    pub result: AnalysisResult,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_rejects_blank_prompt() {
        let err = AnalysisRequest::new("  \n\t", AttachmentSet::new(), "craft").unwrap_err();
        assert_eq!(err, RequestError::EmptyPrompt);
    }

    #[test]
    fn test_request_keeps_raw_prompt() {
        let request = AnalysisRequest::new("  Write a poem. ", AttachmentSet::new(), "bogus").unwrap();
        assert_eq!(request.prompt_text(), "  Write a poem. ");
        assert_eq!(request.technique(), "bogus");
        assert!(request.attachments().is_empty());
    }

    #[test]
    fn test_result_accepts_legacy_classification_name() {
        let value = json!({
            "score": 5,
            "promptClassification": "Few-Shot",
            "classificationFeedback": "ok",
            "unpacked": {"context": "c", "role": "r", "action": "a", "format": "f", "target": "t"},
            "feedback": {"context": "c", "role": "r", "action": "a", "format": "f", "target": "t", "overall": "o"},
            "improvedPrompt": "p"
        });
        let result: AnalysisResult = serde_json::from_value(value).unwrap();
        assert_eq!(result.classification, "Few-Shot");

        let out = serde_json::to_value(&result).unwrap();
        assert_eq!(out["classification"], "Few-Shot");
        assert_eq!(out["improvedPrompt"], "p");
    }
}
