//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use crate::attachments::MAX_ATTACHMENTS;
use clap::Parser;
use std::path::PathBuf;

/// PromptCraft - analyze and improve prompts for generative AI
///
/// Classifies which prompting technique a prompt resembles, scores it,
/// unpacks it into C.R.A.F.T. components and rewrites it as an example
/// of the technique you pick.
///
/// Examples:
///   promptcraft "Write three taglines for a new product."
///   promptcraft -t few-shot --prompt-file prompt.txt
///   promptcraft -a cat.jpg "Write an Instagram caption for this picture."
///   promptcraft --example 2 -o analysis.json
///   promptcraft --list-techniques
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Prompt text to analyze
    ///
    /// Read from stdin when neither this, --prompt-file nor --example is given.
    #[arg(value_name = "PROMPT", conflicts_with_all = ["prompt_file", "example"])]
    pub prompt: Option<String>,

    /// Read the prompt text from a file
    #[arg(long, value_name = "FILE", conflicts_with = "example")]
    pub prompt_file: Option<PathBuf>,

    /// Analyze one of the built-in example prompts (see --list-examples)
    #[arg(long, value_name = "N")]
    pub example: Option<usize>,

    /// Prompting technique to analyze against
    ///
    /// One of: craft, one-shot, few-shot, chain-of-thought.
    /// Unknown values fall back to craft.
    #[arg(short, long, value_name = "ID")]
    pub technique: Option<String>,

    /// Attach an image or document (repeatable, at most 2)
    #[arg(short, long = "attach", value_name = "FILE")]
    pub attachments: Vec<PathBuf>,

    /// Gemini model to use
    #[arg(short, long, env = "PROMPTCRAFT_MODEL")]
    pub model: Option<String>,

    /// Gemini API base URL
    #[arg(long, value_name = "URL")]
    pub api_url: Option<String>,

    /// Gemini API key
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Sampling temperature (0.0 - 1.0)
    #[arg(long)]
    pub temperature: Option<f32>,

    /// Request timeout in seconds (default: none)
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Write the JSON report to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Path to configuration file
    ///
    /// If not specified, looks for .promptcraft.toml in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (minimal output)
    #[arg(short, long)]
    pub quiet: bool,

    /// List the supported prompting techniques and exit
    #[arg(long)]
    pub list_techniques: bool,

    /// List the built-in example prompts and exit
    #[arg(long)]
    pub list_examples: bool,

    /// Print the C.R.A.F.T. prompting guide and exit
    #[arg(long)]
    pub tips: bool,

    /// Generate a default .promptcraft.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Whether the invocation only prints information and exits.
    pub fn is_informational(&self) -> bool {
        self.init_config || self.list_techniques || self.list_examples || self.tips
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        if self.is_informational() {
            return Ok(());
        }

        if self.attachments.len() > MAX_ATTACHMENTS {
            return Err(format!(
                "You can attach a maximum of {} files.",
                MAX_ATTACHMENTS
            ));
        }

        if let Some(ref url) = self.api_url {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err("API URL must start with 'http://' or 'https://'".to_string());
            }
        }

        if let Some(temperature) = self.temperature {
            if !(0.0..=1.0).contains(&temperature) {
                return Err("Temperature must be between 0.0 and 1.0".to_string());
            }
        }

        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        if let Some(timeout) = self.timeout {
            if timeout == 0 {
                return Err("Timeout must be at least 1 second".to_string());
            }
        }

        if let Some(n) = self.example {
            if n == 0 || n > crate::starters::STARTER_PROMPTS.len() {
                return Err(format!(
                    "Example must be between 1 and {}",
                    crate::starters::STARTER_PROMPTS.len()
                ));
            }
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}
