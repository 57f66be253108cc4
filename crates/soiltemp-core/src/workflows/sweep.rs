use tracing::{info, instrument, warn};

use crate::engine::adapter::ModelRegistry;
use crate::engine::config::ModelTuning;
use crate::engine::error::ScenarioFailure;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::workflows::simulate::{self, ScenarioInputs, ScenarioRun};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Outcome of a batch sweep: completed runs in input order, plus every
/// failure with its scenario identity. An unimplemented model id is a
/// skipped scenario here, never a crashed batch.
#[derive(Debug)]
pub struct SweepResult {
    pub completed: Vec<ScenarioRun>,
    pub failures: Vec<ScenarioFailure>,
}

/// Runs a batch of independent scenarios.
///
/// No scenario's model state is visible to another, so with the `parallel`
/// feature enabled the batch fans out across a rayon pool with no locking.
/// Output ordering follows input ordering either way.
#[instrument(skip_all, name = "sweep_workflow", fields(scenarios = batch.len()))]
pub fn run(
    batch: &[ScenarioInputs],
    registry: &ModelRegistry,
    tuning: &ModelTuning,
    reporter: &ProgressReporter,
) -> SweepResult {
    info!("Starting sweep over {} scenario(s).", batch.len());
    reporter.report(Progress::PhaseStart { name: "Sweep" });

    #[cfg(not(feature = "parallel"))]
    let iterator = batch.iter();

    #[cfg(feature = "parallel")]
    let iterator = batch.par_iter();

    let outcomes: Vec<_> = iterator
        .map(|inputs| simulate::run(inputs, registry, tuning, reporter))
        .collect();

    let mut completed = Vec::new();
    let mut failures = Vec::new();
    for outcome in outcomes {
        match outcome {
            Ok(run) => completed.push(run),
            Err(failure) => {
                warn!(scenario = %failure.scenario, error = %failure.source, "Scenario failed.");
                failures.push(failure);
            }
        }
    }

    reporter.report(Progress::PhaseFinish);
    info!(
        completed = completed.len(),
        failed = failures.len(),
        "Sweep finished."
    );
    SweepResult {
        completed,
        failures,
    }
}
