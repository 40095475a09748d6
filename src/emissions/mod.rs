mod calculator;
mod model;
mod suggestions;

pub use calculator::EmissionCalculator;
pub(crate) use model::check_measurement;
pub use model::{Category, EmissionBreakdown, RawMeasurements};
pub use suggestions::{SuggestionEngine, SuggestionSet};
