use thiserror::Error;

use super::schema::Config;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },
    #[error("invalid config: {0}")]
    Validation(String),
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_factor("factors.energy_coeff", self.factors.energy_coeff)?;
        validate_factor("factors.material_coeff", self.factors.material_coeff)?;
        validate_factor("factors.waste_coeff", self.factors.waste_coeff)?;
        validate_factor("factors.shipping_coeff", self.factors.shipping_coeff)?;
        validate_factor(
            "factors.suggestion_threshold",
            self.factors.suggestion_threshold,
        )?;

        if self.output.dir.trim().is_empty() {
            return Err(ConfigError::Validation(
                "output.dir must not be empty".to_string(),
            ));
        }

        let mut file_names = vec![
            ("output.chart_file", self.output.chart_file.as_str()),
            ("output.report_file", self.output.report_file.as_str()),
            ("output.merged_file", self.output.merged_file.as_str()),
        ];
        if let Some(chart_image) = self.output.chart_image.as_deref() {
            file_names.push(("output.chart_image", chart_image));
        }

        for (name, value) in &file_names {
            if value.trim().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "{} must not be empty",
                    name
                )));
            }
        }

        for (index, (name, value)) in file_names.iter().enumerate() {
            if let Some((other_name, _)) = file_names
                .iter()
                .skip(index + 1)
                .find(|(_, other_value)| other_value == value)
            {
                return Err(ConfigError::Validation(format!(
                    "{} and {} must name different files",
                    name, other_name
                )));
            }
        }

        if self.report.default_client_name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "report.default_client_name must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}

fn validate_factor(name: &str, value: f64) -> Result<(), ConfigError> {
    if !value.is_finite() || value.is_sign_negative() {
        return Err(ConfigError::Validation(format!(
            "{} must be a finite, non-negative number",
            name
        )));
    }
    Ok(())
}
