use chrono::NaiveDate;
use thiserror::Error;

use crate::core::grid::GridError;
use crate::core::models::scenario::{ScenarioDescriptor, TreatmentError};
use crate::core::models::site::ConfigError;
use crate::core::models::weather::{MissingData, WeatherError};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum EngineError {
    #[error("Depth grid mismatch: {0}")]
    GridMismatch(#[from] GridError),

    #[error("Model '{model}' is missing required parameter '{field}'")]
    MissingParameter {
        model: &'static str,
        field: &'static str,
    },

    #[error(transparent)]
    MissingData(#[from] MissingData),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Treatment(#[from] TreatmentError),

    #[error(transparent)]
    Weather(#[from] WeatherError),

    #[error("No adapter registered for model '{0}'")]
    UnimplementedModel(String),

    #[error("Model '{model}' failed on {date}: {reason}")]
    StepFailure {
        model: &'static str,
        date: NaiveDate,
        reason: String,
    },

    #[error("Internal logic error: {0}")]
    Internal(String),
}

/// A failed scenario, reported with its identity attached so one failure in
/// a batch can be logged without disturbing the rest of the sweep.
#[derive(Debug, Error, Clone, PartialEq)]
#[error("Scenario '{scenario}' failed: {source}")]
pub struct ScenarioFailure {
    pub scenario: ScenarioDescriptor,
    #[source]
    pub source: EngineError,
}

impl ScenarioFailure {
    /// True when the scenario was skipped because no adapter exists for its
    /// model, as opposed to an adapter genuinely failing.
    pub fn is_unimplemented_model(&self) -> bool {
        matches!(self.source, EngineError::UnimplementedModel(_))
    }
}
