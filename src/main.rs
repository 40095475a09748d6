mod config;
mod document;
mod emissions;
mod input;
mod pipeline;
mod render;

use std::io;
use std::process::ExitCode;

use chrono::Local;
use tracing_subscriber::EnvFilter;

use crate::config::load_config_or_default;
use crate::input::PromptSource;
use crate::pipeline::{run_pipeline, PipelineError, RunOutcome};
use crate::render::PieChartRenderer;

const CONFIG_PATH: &str = "carbon_report.toml";

fn init_json_logging() {
    if let Err(error) = tracing_log::LogTracer::init() {
        eprintln!(
            "logging bridge initialization failed (continuing with existing logger): {}",
            error
        );
    }

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    // stdout carries the interactive prompts.
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .json()
        .with_current_span(false)
        .with_span_list(false)
        .finish();

    if let Err(error) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("global logger initialization failed: {}", error);
    }
}

fn print_outcome(outcome: &RunOutcome) {
    println!(
        "Carbon footprint for {}: {:.2} tons of CO2",
        outcome.client_name,
        outcome.breakdown.total()
    );
    println!(
        "Report written to {} ({} pages)",
        outcome.document.path.display(),
        outcome.document.page_count
    );
}

fn main() -> ExitCode {
    init_json_logging();

    let config = match load_config_or_default(CONFIG_PATH) {
        Ok(config) => config,
        Err(error) => {
            log::error!("Configuration error: {}", error);
            eprintln!("Configuration error: {}", error);
            return ExitCode::FAILURE;
        }
    };

    let mut source = PromptSource::new(io::stdin().lock(), io::stdout());
    let chart_renderer = PieChartRenderer::new(config.output.chart_image_path());

    match run_pipeline(&config, &mut source, &chart_renderer, Local::now) {
        Ok(outcome) => {
            print_outcome(&outcome);
            ExitCode::SUCCESS
        }
        Err(PipelineError::Input(error)) => {
            log::warn!("run_aborted code={} error={}", error.code(), error);
            println!("\n{}", error.user_message());
            ExitCode::SUCCESS
        }
        Err(error) => {
            log::error!("run_failed code={} error={}", error.code(), error);
            eprintln!("{}", error.user_message());
            ExitCode::FAILURE
        }
    }
}
