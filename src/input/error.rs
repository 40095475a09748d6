use thiserror::Error;

#[derive(Debug, Error)]
pub enum InputError {
    #[error("{field} is not a number: {value:?}")]
    NotNumeric { field: &'static str, value: String },
    #[error("{field} must be non-negative, got {value}")]
    Negative { field: &'static str, value: f64 },
    #[error("{field} must be a finite number")]
    NotFinite { field: &'static str },
    #[error("input closed before {field} was entered")]
    Closed { field: &'static str },
    #[error("failed to read {field}: {source}")]
    Io {
        field: &'static str,
        source: std::io::Error,
    },
}

impl InputError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotNumeric { .. } => "INPUT_NOT_NUMERIC",
            Self::Negative { .. } => "INPUT_NEGATIVE",
            Self::NotFinite { .. } => "INPUT_NOT_FINITE",
            Self::Closed { .. } => "INPUT_CLOSED",
            Self::Io { .. } => "INPUT_IO_ERROR",
        }
    }

    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Closed { .. } => "Input ended before all values were entered.",
            Self::Io { .. } => "Could not read input. Please try again.",
            _ => "Invalid input. Please enter numerical values.",
        }
    }
}
