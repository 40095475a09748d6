use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("{categories} categories but {values} values")]
    LengthMismatch { categories: usize, values: usize },
    #[error("value for {label} must be finite and non-negative, got {value}")]
    InvalidValue { label: String, value: f64 },
    #[error("render backend failure: {0}")]
    Backend(String),
    #[error("encoding failure: {0}")]
    Encoding(String),
    #[error("failed to write {path}: {message}")]
    Write { path: String, message: String },
}

impl RenderError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::LengthMismatch { .. } => "RENDER_LENGTH_MISMATCH",
            Self::InvalidValue { .. } => "RENDER_INVALID_VALUE",
            Self::Backend(_) => "RENDER_BACKEND_ERROR",
            Self::Encoding(_) => "RENDER_ENCODING_ERROR",
            Self::Write { .. } => "RENDER_WRITE_ERROR",
        }
    }

    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Backend(_) => {
                "Could not draw the emissions chart. Make sure a system font package is installed."
            }
            Self::Write { .. } => "Could not write report files. Check the output directory.",
            _ => "Could not render the report. Please try again.",
        }
    }
}
