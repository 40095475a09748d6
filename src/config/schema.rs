use std::path::PathBuf;

use serde::Deserialize;

use super::defaults::*;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub factors: EmissionFactors,
    #[serde(default)]
    pub output: Output,
    #[serde(default)]
    pub report: Report,
}

/// Conversion coefficients (tons of CO2 per input unit) and the suggestion threshold.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct EmissionFactors {
    #[serde(default = "default_energy_coeff")]
    pub energy_coeff: f64,
    #[serde(default = "default_material_coeff")]
    pub material_coeff: f64,
    #[serde(default = "default_waste_coeff")]
    pub waste_coeff: f64,
    #[serde(default = "default_shipping_coeff")]
    pub shipping_coeff: f64,
    #[serde(default = "default_suggestion_threshold")]
    pub suggestion_threshold: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Output {
    #[serde(default = "default_output_dir")]
    pub dir: String,
    #[serde(default = "default_chart_file")]
    pub chart_file: String,
    #[serde(default = "default_report_file")]
    pub report_file: String,
    #[serde(default = "default_merged_file")]
    pub merged_file: String,
    #[serde(default = "default_keep_artifacts")]
    pub keep_artifacts: bool,
    #[serde(default)]
    pub chart_image: Option<String>,
}

impl Output {
    pub fn chart_path(&self) -> PathBuf {
        PathBuf::from(&self.dir).join(&self.chart_file)
    }

    pub fn report_path(&self) -> PathBuf {
        PathBuf::from(&self.dir).join(&self.report_file)
    }

    pub fn merged_path(&self) -> PathBuf {
        PathBuf::from(&self.dir).join(&self.merged_file)
    }

    pub fn chart_image_path(&self) -> Option<PathBuf> {
        self.chart_image
            .as_ref()
            .map(|file| PathBuf::from(&self.dir).join(file))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Report {
    #[serde(default = "default_client_name")]
    pub default_client_name: String,
}
