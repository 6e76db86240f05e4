//! Application entry point: command-line front end.
//!
//! # Startup sequence
//!
//! 1. Initialise logging.
//! 2. Load [`AppConfig`] from disk (default on first run), apply
//!    `LESSON_GEN_*` environment overrides, then command-line overrides.
//! 3. Select the generation client once (live or mocked).
//! 4. Build the controller and a listener task that prints state changes.
//! 5. Submit one request; Ctrl-C while waiting abandons it.
//! 6. Print the result and optionally export it.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::sync::mpsc;

use lesson_generator::{
    client,
    config::AppConfig,
    export::write_export,
    filter::ContentFilter,
    pipeline::{ControllerState, GenerationController, SubmitOutcome},
    prompt::TemplateRegistry,
    validation::GenerationInput,
};

// ---------------------------------------------------------------------------
// CLI
// ---------------------------------------------------------------------------

#[derive(Debug, Parser)]
#[command(name = "lesson-generator", version, about = "Generate lesson material from a template")]
struct Cli {
    /// Subject of the material (at least 3 characters).
    #[arg(short, long, default_value = "")]
    topic: String,

    /// Audience level or grade, e.g. "Middle School".
    #[arg(short, long, default_value = "")]
    level: String,

    /// Duration in minutes.
    #[arg(short, long, default_value = "")]
    duration: String,

    #[arg(long, default_value = "engaging")]
    tone: String,

    #[arg(long, default_value = "medium")]
    length: String,

    /// Template id (see --list-templates).  Defaults to the first template.
    #[arg(long)]
    template: Option<String>,

    /// Send this text verbatim instead of filling a template.
    #[arg(long = "prompt")]
    custom_prompt: Option<String>,

    /// Generation endpoint; overrides settings and environment.
    #[arg(long)]
    endpoint: Option<String>,

    #[arg(long)]
    api_key: Option<String>,

    /// Upper bound on a live request, in seconds.
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Settings file to use instead of the platform default.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write the result to a text file.
    #[arg(long)]
    export: bool,

    /// Directory for --export (defaults to settings, then Downloads).
    #[arg(long)]
    export_dir: Option<PathBuf>,

    /// Print the available templates and exit.
    #[arg(long)]
    list_templates: bool,
}

impl Cli {
    fn input(&self, registry: &TemplateRegistry) -> GenerationInput {
        let template_id = self
            .template
            .clone()
            .or_else(|| registry.default_template().map(|t| t.id.to_string()))
            .unwrap_or_default();

        GenerationInput {
            topic: self.topic.clone(),
            level: self.level.clone(),
            duration: self.duration.clone(),
            tone: self.tone.clone(),
            length: self.length.clone(),
            template_id,
            custom_prompt: self.custom_prompt.clone().unwrap_or_default(),
        }
    }

    fn load_config(&self) -> Result<AppConfig> {
        let mut config = match &self.config {
            Some(path) => AppConfig::load_from(path)
                .with_context(|| format!("reading settings from {}", path.display()))?,
            None => AppConfig::load().context("reading settings")?,
        };
        config.apply_env_overrides();

        if let Some(endpoint) = &self.endpoint {
            config.generation.endpoint = Some(endpoint.clone());
        }
        if let Some(key) = &self.api_key {
            config.generation.api_key = Some(key.clone());
        }
        if let Some(secs) = self.timeout_secs {
            config.generation.timeout_secs = Some(secs);
        }
        if let Some(dir) = &self.export_dir {
            config.export.directory = Some(dir.clone());
        }
        Ok(config)
    }
}

// ---------------------------------------------------------------------------
// main
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() -> Result<ExitCode> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let registry = TemplateRegistry::builtin();

    if cli.list_templates {
        for template in registry.list_templates() {
            println!("{:<20} {}", template.id, template.title);
        }
        return Ok(ExitCode::SUCCESS);
    }

    let config = cli.load_config()?;
    let generation_client = client::from_config(&config.generation);

    let (state_tx, mut state_rx) = mpsc::unbounded_channel::<ControllerState>();
    let controller = Arc::new(
        GenerationController::new(registry, generation_client, ContentFilter::default())
            .with_listener(state_tx),
    );

    let status = tokio::spawn(async move {
        while let Some(state) = state_rx.recv().await {
            if state.is_busy() {
                eprintln!("… {}", state.label());
            }
        }
    });

    let input = cli.input(controller.registry());
    let outcome = tokio::select! {
        outcome = controller.submit(&input) => outcome,
        _ = tokio::signal::ctrl_c() => {
            controller.abandon();
            SubmitOutcome::Completed(controller.state())
        }
    };

    let code = match outcome {
        SubmitOutcome::Completed(ControllerState::Succeeded(result)) => {
            println!("{}", result.filtered_text.as_deref().unwrap_or_default());
            eprintln!(
                "done in {} ms, ~{} tokens ({} client)",
                result.elapsed_ms,
                result.token_estimate,
                controller.client_name()
            );
            if cli.export {
                let dir = config.export.resolved_directory();
                let text = controller.exportable_text();
                let path = write_export(&dir, &input.topic, text.as_deref())?;
                eprintln!("exported to {}", path.display());
            }
            ExitCode::SUCCESS
        }
        SubmitOutcome::Completed(ControllerState::Failed(message)) => {
            eprintln!("error: {message}");
            ExitCode::FAILURE
        }
        other => {
            log::error!("unexpected submit outcome: {other:?}");
            ExitCode::FAILURE
        }
    };

    // Dropping the controller closes the listener channel.
    drop(controller);
    let _ = status.await;

    Ok(code)
}
