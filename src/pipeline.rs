use chrono::{DateTime, Local};
use thiserror::Error;

use crate::config::Config;
use crate::document::{assemble, ArtifactRetention, MergeError, OutputDocument};
use crate::emissions::{
    Category, EmissionBreakdown, EmissionCalculator, SuggestionEngine, SuggestionSet,
};
use crate::input::{InputError, MeasurementSource};
use crate::render::{render_report, ChartRenderer, RenderError, ReportContext};

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error(transparent)]
    Merge(#[from] MergeError),
    #[error("failed to create output directory {path}: {source}")]
    OutputDir {
        path: String,
        source: std::io::Error,
    },
}

impl PipelineError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Input(error) => error.code(),
            Self::Render(error) => error.code(),
            Self::Merge(error) => error.code(),
            Self::OutputDir { .. } => "PIPELINE_OUTPUT_DIR_ERROR",
        }
    }

    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Input(error) => error.user_message(),
            Self::Render(error) => error.user_message(),
            Self::Merge(error) => error.user_message(),
            Self::OutputDir { .. } => "Could not create the output directory.",
        }
    }
}

#[derive(Debug)]
pub struct RunOutcome {
    pub client_name: String,
    pub breakdown: EmissionBreakdown,
    pub suggestions: SuggestionSet,
    pub document: OutputDocument,
}

/// One complete run. Pages are merged as [chart, report].
pub fn run_pipeline<S, C, T>(
    config: &Config,
    source: &mut S,
    chart_renderer: &C,
    clock: T,
) -> Result<RunOutcome, PipelineError>
where
    S: MeasurementSource,
    C: ChartRenderer,
    T: FnOnce() -> DateTime<Local>,
{
    let acquisition = source.acquire()?;
    let client_name = acquisition
        .client_name
        .unwrap_or_else(|| config.report.default_client_name.clone());
    log::info!("run_started client={}", client_name);

    let breakdown = EmissionCalculator::new(&config.factors).compute(&acquisition.measurements);
    let suggestions =
        SuggestionEngine::new(config.factors.suggestion_threshold).suggest(&breakdown);
    log::info!(
        "emissions_computed energy={} material={} waste={} shipping={} total={} suggestions={}",
        breakdown.energy(),
        breakdown.material(),
        breakdown.waste(),
        breakdown.shipping(),
        breakdown.total(),
        suggestions.len()
    );

    let output = &config.output;
    std::fs::create_dir_all(&output.dir).map_err(|source| PipelineError::OutputDir {
        path: output.dir.clone(),
        source,
    })?;

    let chart = chart_renderer.render_chart(
        &Category::labels(),
        &breakdown.values(),
        &output.chart_path(),
    )?;
    log::info!("artifact_written kind=chart path={}", chart.path().display());

    let context = ReportContext {
        client_name: client_name.clone(),
        generated_at: clock(),
    };
    let report = render_report(&breakdown, &suggestions, &context, &output.report_path())?;
    log::info!("artifact_written kind=report path={}", report.path().display());

    let retention = if output.keep_artifacts {
        ArtifactRetention::Keep
    } else {
        ArtifactRetention::Remove
    };
    let document = assemble(vec![chart, report], &output.merged_path(), retention)?;
    log::info!(
        "document_written path={} pages={}",
        document.path.display(),
        document.page_count
    );

    Ok(RunOutcome {
        client_name,
        breakdown,
        suggestions,
        document,
    })
}

#[cfg(test)]
mod tests;
