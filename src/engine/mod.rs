//! Prompt analysis engine.
//!
//! This module provides the generative model client and the analyzer
//! that turns a prompt into a validated [`crate::models::AnalysisResult`].

pub mod analyzer;
pub mod gemini;

pub use analyzer::PromptAnalyzer;
pub use gemini::{ContentPart, GeminiClient, GeminiConfig, GenerativeModel, ModelRequest};
