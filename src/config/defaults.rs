use super::schema::{EmissionFactors, Output, Report};

pub(super) fn default_energy_coeff() -> f64 {
    0.0002
}

pub(super) fn default_material_coeff() -> f64 {
    0.001
}

pub(super) fn default_waste_coeff() -> f64 {
    0.004
}

pub(super) fn default_shipping_coeff() -> f64 {
    0.0001
}

pub(super) fn default_suggestion_threshold() -> f64 {
    1.0
}

pub(super) fn default_output_dir() -> String {
    ".".to_string()
}

pub(super) fn default_chart_file() -> String {
    "Pie_emissions.pdf".to_string()
}

pub(super) fn default_report_file() -> String {
    "Numbers_Suggestions.pdf".to_string()
}

pub(super) fn default_merged_file() -> String {
    "Merged_Report.pdf".to_string()
}

pub(super) fn default_keep_artifacts() -> bool {
    true
}

pub(super) fn default_client_name() -> String {
    "Client A".to_string()
}

impl Default for EmissionFactors {
    fn default() -> Self {
        Self {
            energy_coeff: default_energy_coeff(),
            material_coeff: default_material_coeff(),
            waste_coeff: default_waste_coeff(),
            shipping_coeff: default_shipping_coeff(),
            suggestion_threshold: default_suggestion_threshold(),
        }
    }
}

impl Default for Output {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
            chart_file: default_chart_file(),
            report_file: default_report_file(),
            merged_file: default_merged_file(),
            keep_artifacts: default_keep_artifacts(),
            chart_image: None,
        }
    }
}

impl Default for Report {
    fn default() -> Self {
        Self {
            default_client_name: default_client_name(),
        }
    }
}
