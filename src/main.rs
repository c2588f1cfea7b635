//! PromptCraft - AI-powered prompt analyzer
//!
//! A CLI tool that asks a Gemini model to classify, score, unpack and
//! rewrite a prompt through the lens of a chosen prompting technique.
//!
//! Exit codes:
//!   0 - Success
//!   1 - Any error (invalid input, attachment rejected, analysis failed)

use anyhow::{bail, Context, Result};
use chrono::Utc;
use indicatif::{ProgressBar, ProgressStyle};
use promptcraft::attachments::AttachmentSet;
use promptcraft::cli::Args;
use promptcraft::config::{Config, CONFIG_FILE_NAME};
use promptcraft::engine::{GeminiClient, GeminiConfig, PromptAnalyzer};
use promptcraft::models::{AnalysisReport, AnalysisRequest, ReportMetadata};
use promptcraft::{starters, techniques, tips};
use std::io::Read;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Informational commands need no logging or network
    if args.init_config {
        return handle_init_config();
    }
    if args.list_techniques {
        print_techniques();
        return Ok(());
    }
    if args.list_examples {
        print_examples();
        return Ok(());
    }
    if args.tips {
        print!("{}", tips::render());
        return Ok(());
    }

    init_logging(&args);

    info!("PromptCraft v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);

    if let Err(e) = run(args).await {
        error!("{:#}", e);
        eprintln!("\n❌ Error: {}", e);
        std::process::exit(1);
    }

    Ok(())
}

/// Handle --init-config: generate a default .promptcraft.toml.
fn handle_init_config() -> Result<()> {
    let path = std::path::Path::new(CONFIG_FILE_NAME);

    if path.exists() {
        eprintln!(
            "⚠️  {} already exists. Remove it first or edit it manually.",
            CONFIG_FILE_NAME
        );
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content)
        .with_context(|| format!("Failed to write {}", CONFIG_FILE_NAME))?;

    println!("✅ Created {} with default settings.", CONFIG_FILE_NAME);
    Ok(())
}

fn print_techniques() {
    for technique in techniques::all() {
        let marker = if technique.id == techniques::DEFAULT_TECHNIQUE_ID {
            " (default)"
        } else {
            ""
        };
        println!("{:<18} {}{}", technique.id, technique.display_name, marker);
        println!("{:<18} {}", "", technique.description);
        for (kind, text) in technique.examples {
            println!("{:<18} {}: \"{}\"", "", kind, text);
        }
        println!();
    }
}

fn print_examples() {
    for (i, prompt) in starters::STARTER_PROMPTS.iter().enumerate() {
        println!("{}. {}\n", i + 1, prompt);
    }
}

/// Initialize logging based on verbosity settings.
fn init_logging(args: &Args) {
    let level = args.log_level();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
    }
}

/// Load configuration from file or use defaults.
fn load_config(args: &Args) -> Result<Config> {
    if let Some(ref config_path) = args.config {
        info!("Loading config from: {}", config_path.display());
        return Config::load(config_path);
    }

    match Config::load_default() {
        Ok(Some(config)) => {
            info!("Loaded default config from {}", CONFIG_FILE_NAME);
            Ok(config)
        }
        Ok(None) => {
            debug!("No config file found, using defaults");
            Ok(Config::default())
        }
        Err(e) => {
            warn!("Failed to load config: {}", e);
            Ok(Config::default())
        }
    }
}

/// Resolve the prompt text from the argument, a file, an example or stdin.
fn read_prompt(args: &Args) -> Result<String> {
    if let Some(ref prompt) = args.prompt {
        return Ok(prompt.clone());
    }
    if let Some(ref path) = args.prompt_file {
        return std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read prompt file: {}", path.display()));
    }
    if let Some(n) = args.example {
        return starters::starter(n)
            .map(String::from)
            .with_context(|| format!("No example prompt number {}", n));
    }

    let mut prompt = String::new();
    std::io::stdin()
        .read_to_string(&mut prompt)
        .context("Failed to read prompt from stdin")?;
    Ok(prompt)
}

/// Run one analysis and write the report.
async fn run(args: Args) -> Result<()> {
    let mut config = load_config(&args)?;
    config.merge_with_args(&args);

    let prompt = read_prompt(&args)?;

    // Stage attachments before anything touches the network
    let mut staged = AttachmentSet::new();
    staged.stage_files(&args.attachments).await?;
    let attachment_names: Vec<String> =
        staged.as_slice().iter().map(|a| a.name.clone()).collect();

    let request = AnalysisRequest::new(prompt, staged, config.general.technique.clone())?;

    let Some(api_key) = args.api_key.clone().filter(|k| !k.trim().is_empty()) else {
        bail!("No API key given. Set GEMINI_API_KEY or pass --api-key.");
    };

    let client = GeminiClient::new(GeminiConfig {
        api_url: config.model.api_url.clone(),
        api_key,
        model_name: config.model.name.clone(),
        timeout_seconds: config.model.timeout_seconds,
    })?;
    let analyzer = PromptAnalyzer::new(client).with_temperature(config.model.temperature);

    let technique = techniques::lookup(request.technique());
    let spinner = (!args.quiet).then(|| {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.set_message(format!(
            "Analyzing as {} with {}...",
            technique.display_name, config.model.name
        ));
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    });

    let start = Instant::now();
    let outcome = analyzer.analyze_request(&request).await;
    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }
    let result = outcome?;

    let report = AnalysisReport {
        metadata: ReportMetadata {
            technique: technique.id.to_string(),
            technique_name: technique.display_name.to_string(),
            model_used: config.model.name.clone(),
            analysis_date: Utc::now(),
            attachments: attachment_names,
            duration_seconds: start.elapsed().as_secs_f64(),
        },
        result,
    };

    let json = serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
    match args.output {
        Some(ref path) => {
            std::fs::write(path, &json)
                .with_context(|| format!("Failed to write report to {}", path.display()))?;
            if !args.quiet {
                eprintln!(
                    "✅ Score {}/10 ({}). Report saved to: {}",
                    report.result.score,
                    report.result.classification,
                    path.display()
                );
            }
        }
        None => println!("{}", json),
    }

    Ok(())
}
