//! Error types.
//!
//! Attachment and request errors are shown to the user as-is. Everything
//! that goes wrong inside an analysis call collapses into [`AnalysisError`];
//! the granular [`ModelError`] and [`ReplyError`] causes are only logged.

use thiserror::Error;

/// Rejection while staging attachments.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AttachmentError {
    #[error("You can attach a maximum of {max} files.")]
    TooMany { max: usize },

    #[error("File '{name}' is too large. Max size is {max_mb}MB.")]
    TooLarge { name: String, max_mb: usize },

    #[error("Failed to read file '{name}': {reason}")]
    Unreadable { name: String, reason: String },

    #[error("File '{name}' is not valid base64 data.")]
    InvalidEncoding { name: String },
}

/// Invalid input when forming an analysis request.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RequestError {
    #[error("Prompt text must not be empty")]
    EmptyPrompt,
}

/// Failure talking to the generative model.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("Cannot connect to the model API at {url}")]
    Connect { url: String },

    #[error("Request timed out after {seconds}s")]
    Timeout { seconds: u64 },

    #[error("Failed to send request: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Model API error {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Model reply contained no text")]
    EmptyReply,
}

/// The model replied, but not with a usable analysis.
#[derive(Debug, Error)]
pub enum ReplyError {
    #[error("Reply is not valid JSON: {0}")]
    NotJson(#[source] serde_json::Error),

    #[error("Reply does not match the analysis schema: {0}")]
    Schema(#[source] serde_json::Error),

    #[error("Invalid field `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// The single failure surfaced by the analysis engine.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("could not analyze prompt, check connection and retry")]
pub struct AnalysisError;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attachment_error_names_file() {
        let err = AttachmentError::TooLarge {
            name: "photo.png".to_string(),
            max_mb: 4,
        };
        assert_eq!(err.to_string(), "File 'photo.png' is too large. Max size is 4MB.");
    }

    #[test]
    fn test_analysis_error_is_user_safe() {
        assert_eq!(
            AnalysisError.to_string(),
            "could not analyze prompt, check connection and retry"
        );
    }
}
