use std::path::Path;

use approx::assert_relative_eq;
use chrono::{DateTime, Local, TimeZone};
use lopdf::{Document, Object};

use super::{run_pipeline, PipelineError};
use crate::config::Config;
use crate::input::{InputError, ScriptedSource};
use crate::render::{write_blank_page, Artifact, ArtifactKind, ChartRenderer, PageSize, RenderError};

const STUB_CHART_SIZE: PageSize = PageSize {
    width: 720,
    height: 432,
};

/// Writes a blank chart-sized page and records what it was asked to draw.
#[derive(Default)]
struct StubChartRenderer {
    calls: std::cell::RefCell<Vec<(Vec<String>, Vec<f64>)>>,
}

impl ChartRenderer for StubChartRenderer {
    fn render_chart(
        &self,
        categories: &[&str],
        values: &[f64],
        destination: &Path,
    ) -> Result<Artifact, RenderError> {
        if categories.len() != values.len() {
            return Err(RenderError::LengthMismatch {
                categories: categories.len(),
                values: values.len(),
            });
        }
        self.calls.borrow_mut().push((
            categories.iter().map(|label| label.to_string()).collect(),
            values.to_vec(),
        ));
        write_blank_page(destination, STUB_CHART_SIZE)?;
        Ok(Artifact::new(ArtifactKind::Chart, destination))
    }
}

fn fixed_clock() -> DateTime<Local> {
    Local
        .with_ymd_and_hms(2024, 5, 17, 9, 30, 0)
        .single()
        .expect("unambiguous local time")
}

fn config_in(dir: &Path) -> Config {
    let mut config = Config::default();
    config.output.dir = dir.display().to_string();
    config
}

fn page_widths(path: &Path) -> Vec<i64> {
    let document = Document::load(path).expect("merged document should load");
    document
        .get_pages()
        .into_values()
        .map(|page_id| {
            document
                .get_dictionary(page_id)
                .and_then(|page| page.get(b"MediaBox"))
                .and_then(Object::as_array)
                .and_then(|media_box| media_box[2].as_i64())
                .expect("page width")
        })
        .collect()
}

#[test]
fn manufacturing_run_produces_chart_then_report() {
    let dir = tempfile::tempdir().expect("temp dir");
    let config = config_in(dir.path());
    let mut source = ScriptedSource::measurements("Acme Steel", 10000.0, 2000.0, 500.0, 5000.0);
    let renderer = StubChartRenderer::default();

    let outcome = run_pipeline(&config, &mut source, &renderer, fixed_clock)
        .expect("run should succeed");

    assert_eq!(outcome.client_name, "Acme Steel");
    assert_relative_eq!(outcome.breakdown.total(), 6.5, max_relative = 1e-12);
    assert_eq!(outcome.suggestions.len(), 5);
    assert!(!outcome
        .suggestions
        .iter()
        .any(|entry| entry.contains("logistics")));

    assert_eq!(outcome.document.page_count, 2);
    assert_eq!(outcome.document.path, dir.path().join("Merged_Report.pdf"));
    assert_eq!(page_widths(&outcome.document.path), vec![720, 612]);

    let calls = renderer.calls.borrow();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, vec!["Energy", "Material", "Waste", "Shipping"]);
    assert_eq!(calls[0].1, outcome.breakdown.values().to_vec());

    assert!(dir.path().join("Pie_emissions.pdf").exists());
    assert!(dir.path().join("Numbers_Suggestions.pdf").exists());
}

#[test]
fn all_zero_run_still_renders_and_merges() {
    let dir = tempfile::tempdir().expect("temp dir");
    let config = config_in(dir.path());
    let mut source = ScriptedSource::measurements("Idle Plant", 0.0, 0.0, 0.0, 0.0);
    let renderer = StubChartRenderer::default();

    let outcome = run_pipeline(&config, &mut source, &renderer, fixed_clock)
        .expect("zero run should succeed");

    assert_eq!(outcome.breakdown.total(), 0.0);
    assert_eq!(
        outcome.suggestions.iter().collect::<Vec<_>>(),
        vec![
            "Regularly maintain equipment to ensure energy efficiency.",
            "Train staff on sustainability practices to foster an eco-friendly workplace culture.",
        ]
    );
    assert_eq!(outcome.document.page_count, 2);
}

#[test]
fn blank_client_name_uses_configured_default() {
    let dir = tempfile::tempdir().expect("temp dir");
    let config = config_in(dir.path());
    let mut source = ScriptedSource::measurements("", 1.0, 1.0, 1.0, 1.0);

    let outcome = run_pipeline(&config, &mut source, &StubChartRenderer::default(), fixed_clock)
        .expect("run should succeed");

    assert_eq!(outcome.client_name, "Client A");
}

#[test]
fn invalid_input_aborts_before_any_artifact() {
    let dir = tempfile::tempdir().expect("temp dir");
    let output_dir = dir.path().join("out");
    let config = config_in(&output_dir);
    let mut source = ScriptedSource::failing(InputError::NotNumeric {
        field: "energy_kwh",
        value: "abc".to_string(),
    });
    let renderer = StubChartRenderer::default();

    let error = run_pipeline(&config, &mut source, &renderer, fixed_clock)
        .expect_err("invalid input must abort");

    assert!(matches!(error, PipelineError::Input(_)));
    assert_eq!(error.code(), "INPUT_NOT_NUMERIC");
    assert_eq!(
        error.user_message(),
        "Invalid input. Please enter numerical values."
    );
    assert!(renderer.calls.borrow().is_empty());
    assert!(!output_dir.exists());
}

#[test]
fn removed_artifacts_leave_only_merged_document() {
    let dir = tempfile::tempdir().expect("temp dir");
    let mut config = config_in(dir.path());
    config.output.keep_artifacts = false;
    let mut source = ScriptedSource::measurements("Acme Steel", 5.0, 5.0, 5.0, 5.0);

    run_pipeline(&config, &mut source, &StubChartRenderer::default(), fixed_clock)
        .expect("run should succeed");

    let names: Vec<String> = std::fs::read_dir(dir.path())
        .expect("read dir")
        .filter_map(Result::ok)
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["Merged_Report.pdf".to_string()]);
}

#[test]
fn chart_failure_stops_the_run() {
    struct FailingRenderer;

    impl ChartRenderer for FailingRenderer {
        fn render_chart(
            &self,
            _categories: &[&str],
            _values: &[f64],
            _destination: &Path,
        ) -> Result<Artifact, RenderError> {
            Err(RenderError::Backend("font unavailable".to_string()))
        }
    }

    let dir = tempfile::tempdir().expect("temp dir");
    let config = config_in(dir.path());
    let mut source = ScriptedSource::measurements("Acme Steel", 1.0, 1.0, 1.0, 1.0);

    let error = run_pipeline(&config, &mut source, &FailingRenderer, fixed_clock)
        .expect_err("chart failure must abort");

    assert!(matches!(error, PipelineError::Render(RenderError::Backend(_))));
    assert!(!dir.path().join("Merged_Report.pdf").exists());
}
