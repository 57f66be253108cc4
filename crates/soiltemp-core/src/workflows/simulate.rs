use tracing::{info, instrument};

use crate::core::models::scenario::ScenarioDescriptor;
use crate::core::models::site::SiteParams;
use crate::core::models::soil::SoilProfile;
use crate::core::models::weather::WeatherSeries;
use crate::engine::adapter::{ModelId, ModelRegistry};
use crate::engine::config::ModelTuning;
use crate::engine::context::ScenarioContext;
use crate::engine::driver::SteppingDriver;
use crate::engine::error::{EngineError, ScenarioFailure};
use crate::engine::output::DailyOutputRecord;
use crate::engine::progress::{Progress, ProgressReporter};

/// Everything one scenario needs, fully materialized before stepping
/// begins. Parsing weather, soil, and site files into these records is the
/// caller's concern.
#[derive(Debug, Clone)]
pub struct ScenarioInputs {
    pub descriptor: ScenarioDescriptor,
    pub model: ModelId,
    pub site: SiteParams,
    pub profile: SoilProfile,
    pub weather: WeatherSeries,
}

/// A completed scenario: its identity and the full canonical output
/// sequence, ready for tabular serialization.
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioRun {
    pub descriptor: ScenarioDescriptor,
    pub model: ModelId,
    pub records: Vec<DailyOutputRecord>,
}

/// Runs one scenario end-to-end. Any failure is attached to the scenario's
/// identity; partial output never escapes.
#[instrument(skip_all, name = "simulate_scenario", fields(scenario = %inputs.descriptor))]
pub fn run(
    inputs: &ScenarioInputs,
    registry: &ModelRegistry,
    tuning: &ModelTuning,
    reporter: &ProgressReporter,
) -> Result<ScenarioRun, ScenarioFailure> {
    let fail = |source: EngineError| ScenarioFailure {
        scenario: inputs.descriptor.clone(),
        source,
    };

    let adapter = registry.get(&inputs.model).map_err(fail)?;

    let biomass = inputs
        .descriptor
        .cover_level
        .biomass()
        .map_err(|e| fail(e.into()))?;
    let paw = inputs
        .descriptor
        .moisture_level
        .paw_fraction()
        .map_err(|e| fail(e.into()))?;
    let profile = inputs.profile.with_moisture(paw);

    info!(
        model = %inputs.model,
        days = inputs.weather.len(),
        biomass,
        paw,
        "Starting scenario."
    );
    reporter.report(Progress::StatusUpdate {
        text: format!("{} ({})", inputs.descriptor, inputs.model),
    });

    let ctx = ScenarioContext::new(&inputs.site, &profile, tuning, reporter, biomass);
    let records = SteppingDriver::run(adapter, ctx, &inputs.weather).map_err(fail)?;

    info!(records = records.len(), "Scenario complete.");
    Ok(ScenarioRun {
        descriptor: inputs.descriptor.clone(),
        model: inputs.model.clone(),
        records,
    })
}
