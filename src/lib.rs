//! PromptCraft - prompt analysis engine
//!
//! Classifies which prompting technique a prompt resembles, scores it,
//! unpacks it into C.R.A.F.T. components and rewrites it as an example
//! of a selected technique, using a schema-constrained Gemini request.
//!
//! The flow is: stage attachments ([`attachments::AttachmentSet`]), form
//! an [`models::AnalysisRequest`], then call
//! [`engine::PromptAnalyzer::analyze`].

pub mod attachments;
pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod instructions;
pub mod models;
pub mod starters;
pub mod techniques;
pub mod tips;
