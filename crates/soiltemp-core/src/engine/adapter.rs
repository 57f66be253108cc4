//! The uniform model-adapter capability and the registry that resolves a
//! model identifier to an adapter instance.
//!
//! Every physical formulation sits behind [`SoilTempModel`]; the stepping
//! driver never names a concrete model. Adding a formulation means adding a
//! state variant and one [`ModelRegistry::register`] call.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::grid::DepthGrid;
use crate::core::models::weather::WeatherRecord;
use crate::engine::context::ScenarioContext;
use crate::engine::error::EngineError;
use crate::engine::models;

/// Opaque per-model state, threaded through sequential daily steps.
///
/// Owned by exactly one running scenario x model pair; created by
/// `initialize`, replaced (never mutated in place) by each `step`, and
/// discarded after the scenario's last day. Adapters unwrap their own
/// variant and treat anything else as an internal error.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelState {
    Campbell(models::campbell::State),
    ForceRestore(models::force_restore::State),
    Epic(models::epic::State),
    Swat(models::swat::State),
    Ceres(models::ceres::State),
    Stm2(models::stm2::State),
    Daycent(models::daycent::State),
    Parton(models::parton::State),
}

impl ModelState {
    pub(crate) fn variant_name(&self) -> &'static str {
        match self {
            Self::Campbell(_) => "campbell",
            Self::ForceRestore(_) => "force_restore",
            Self::Epic(_) => "epic",
            Self::Swat(_) => "swat",
            Self::Ceres(_) => "ceres",
            Self::Stm2(_) => "stm2",
            Self::Daycent(_) => "daycent",
            Self::Parton(_) => "parton",
        }
    }
}

/// One day's raw output from an adapter, on the scenario's native grid.
///
/// Adapters that run on a different internal grid remap their temperatures
/// back before returning, so `layer_mean` always has one entry per scenario
/// soil layer. Extremes are `None` for formulations that do not compute
/// them; the output unifier keeps that distinction.
#[derive(Debug, Clone, PartialEq)]
pub struct DayProfile {
    pub grid: DepthGrid,
    pub surface_mean: f64,
    pub surface_min: Option<f64>,
    pub surface_max: Option<f64>,
    pub layer_mean: Vec<f64>,
    pub layer_min: Option<Vec<f64>>,
    pub layer_max: Option<Vec<f64>>,
}

impl DayProfile {
    /// A profile without extremes, for models reporting means only.
    pub fn means_only(grid: DepthGrid, surface_mean: f64, layer_mean: Vec<f64>) -> Self {
        Self {
            grid,
            surface_mean,
            surface_min: None,
            surface_max: None,
            layer_mean,
            layer_min: None,
            layer_max: None,
        }
    }
}

/// The uniform capability every physical soil-temperature model implements.
///
/// `step` must be a pure function of `(state, day)` for a fixed context:
/// no hidden process-wide state, no dependency on prior invocations beyond
/// what the state value carries.
pub trait SoilTempModel: Send + Sync {
    fn name(&self) -> &'static str;

    /// Whether this formulation computes min/max temperatures.
    fn computes_extremes(&self) -> bool;

    /// One-time setup from site, soil, and first-day forcing.
    fn initialize(
        &self,
        ctx: &ScenarioContext<'_>,
        first_day: &WeatherRecord,
    ) -> Result<ModelState, EngineError>;

    /// Advances exactly one calendar day.
    fn step(
        &self,
        ctx: &ScenarioContext<'_>,
        state: ModelState,
        day: &WeatherRecord,
    ) -> Result<(ModelState, DayProfile), EngineError>;
}

/// Reports a state value that belongs to a different adapter.
pub(crate) fn foreign_state(model: &'static str, state: &ModelState) -> EngineError {
    EngineError::Internal(format!(
        "{model} adapter received {} state",
        state.variant_name()
    ))
}

/// Case-insensitive model identifier used for registry lookup.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct ModelId(String);

impl ModelId {
    pub fn new(id: &str) -> Self {
        Self(id.trim().to_ascii_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for ModelId {
    fn from(s: String) -> Self {
        Self::new(&s)
    }
}

impl From<ModelId> for String {
    fn from(id: ModelId) -> Self {
        id.0
    }
}

impl fmt::Display for ModelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Maps model identifiers to adapter instances.
pub struct ModelRegistry {
    adapters: HashMap<ModelId, Box<dyn SoilTempModel>>,
}

impl ModelRegistry {
    pub fn empty() -> Self {
        Self {
            adapters: HashMap::new(),
        }
    }

    /// A registry with the eight built-in formulations.
    pub fn builtin() -> Self {
        let mut registry = Self::empty();
        registry.register(Box::new(models::campbell::Campbell));
        registry.register(Box::new(models::force_restore::ForceRestore));
        registry.register(Box::new(models::epic::Epic));
        registry.register(Box::new(models::swat::Swat));
        registry.register(Box::new(models::ceres::Ceres));
        registry.register(Box::new(models::stm2::Stm2));
        registry.register(Box::new(models::daycent::Daycent));
        registry.register(Box::new(models::parton::Parton));
        registry
    }

    pub fn register(&mut self, adapter: Box<dyn SoilTempModel>) {
        self.adapters.insert(ModelId::new(adapter.name()), adapter);
    }

    /// Resolves an identifier, or reports the model as unimplemented so a
    /// batch sweep can skip the scenario instead of crashing.
    pub fn get(&self, id: &ModelId) -> Result<&dyn SoilTempModel, EngineError> {
        self.adapters
            .get(id)
            .map(|a| a.as_ref())
            .ok_or_else(|| EngineError::UnimplementedModel(id.to_string()))
    }

    /// Registered identifiers in sorted order.
    pub fn model_ids(&self) -> Vec<ModelId> {
        let mut ids: Vec<_> = self.adapters.keys().cloned().collect();
        ids.sort_by(|a, b| a.as_str().cmp(b.as_str()));
        ids
    }
}
