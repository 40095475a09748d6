mod error;
mod prompt;
#[cfg(test)]
mod scripted;

pub use error::InputError;
pub use prompt::PromptSource;
#[cfg(test)]
pub(crate) use scripted::ScriptedSource;

use crate::emissions::RawMeasurements;

/// What one acquisition step yields: the client and the run's measurements.
#[derive(Debug, Clone)]
pub struct Acquisition {
    /// `None` when the client name was left blank.
    pub client_name: Option<String>,
    pub measurements: RawMeasurements,
}

pub trait MeasurementSource {
    fn acquire(&mut self) -> Result<Acquisition, InputError>;
}
