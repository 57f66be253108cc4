//! The stepping driver: owns the daily loop for one scenario.
//!
//! The driver feeds one day of forcing plus the prior opaque state into the
//! active adapter, collects the day's canonical records, and advances. Days
//! are consumed in strictly increasing date order with no skipping and no
//! reordering; any adapter failure discards the partial output, so a
//! scenario's result is all-or-nothing.

use chrono::{Days, NaiveDate};
use tracing::debug;

use crate::core::models::weather::{WeatherRecord, WeatherSeries};
use crate::engine::adapter::{ModelState, SoilTempModel};
use crate::engine::context::ScenarioContext;
use crate::engine::error::EngineError;
use crate::engine::output::{self, DailyOutputRecord};
use crate::engine::progress::Progress;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverPhase {
    Uninitialized,
    Running,
    Completed,
    Failed,
}

pub struct SteppingDriver<'a> {
    adapter: &'a dyn SoilTempModel,
    ctx: ScenarioContext<'a>,
    phase: DriverPhase,
    state: Option<ModelState>,
    expected_date: Option<NaiveDate>,
    records: Vec<DailyOutputRecord>,
}

impl<'a> SteppingDriver<'a> {
    pub fn new(adapter: &'a dyn SoilTempModel, ctx: ScenarioContext<'a>) -> Self {
        Self {
            adapter,
            ctx,
            phase: DriverPhase::Uninitialized,
            state: None,
            expected_date: None,
            records: Vec::new(),
        }
    }

    pub fn phase(&self) -> DriverPhase {
        self.phase
    }

    /// Uninitialized -> Running: captures the initial model state.
    pub fn initialize(&mut self, first_day: &WeatherRecord) -> Result<(), EngineError> {
        if self.phase != DriverPhase::Uninitialized {
            return Err(EngineError::Internal(format!(
                "initialize called in phase {:?}",
                self.phase
            )));
        }
        match self.adapter.initialize(&self.ctx, first_day) {
            Ok(state) => {
                self.state = Some(state);
                self.expected_date = Some(first_day.date);
                self.phase = DriverPhase::Running;
                debug!(model = self.adapter.name(), date = %first_day.date, "Driver initialized.");
                Ok(())
            }
            Err(e) => {
                self.fail();
                Err(e)
            }
        }
    }

    /// Running -> Running: advances exactly one calendar day.
    pub fn step(&mut self, day: &WeatherRecord) -> Result<(), EngineError> {
        if self.phase != DriverPhase::Running {
            return Err(EngineError::Internal(format!(
                "step called in phase {:?}",
                self.phase
            )));
        }
        let expected = self
            .expected_date
            .ok_or_else(|| EngineError::Internal("running driver lost its date cursor".into()))?;
        if day.date != expected {
            self.fail();
            return Err(EngineError::Internal(format!(
                "weather record out of sequence: expected {expected}, got {}",
                day.date
            )));
        }

        let prior = self
            .state
            .take()
            .ok_or_else(|| EngineError::Internal("running driver lost its model state".into()))?;
        match self.adapter.step(&self.ctx, prior, day) {
            Ok((next, profile)) => {
                self.records.extend(output::unify(day.date, &profile));
                self.state = Some(next);
                self.expected_date = expected.checked_add_days(Days::new(1));
                Ok(())
            }
            Err(e) => {
                self.fail();
                Err(e)
            }
        }
    }

    /// Running -> Completed: yields the accumulated canonical records and
    /// discards the final model state.
    pub fn complete(mut self) -> Result<Vec<DailyOutputRecord>, EngineError> {
        if self.phase != DriverPhase::Running {
            return Err(EngineError::Internal(format!(
                "complete called in phase {:?}",
                self.phase
            )));
        }
        self.phase = DriverPhase::Completed;
        self.state = None;
        Ok(std::mem::take(&mut self.records))
    }

    fn fail(&mut self) {
        // All-or-nothing per scenario: nothing partial escapes.
        self.phase = DriverPhase::Failed;
        self.state = None;
        self.records.clear();
    }

    /// Drives the whole series: initialize on the first day, then one step
    /// per record in order.
    pub fn run(
        adapter: &'a dyn SoilTempModel,
        ctx: ScenarioContext<'a>,
        series: &WeatherSeries,
    ) -> Result<Vec<DailyOutputRecord>, EngineError> {
        let mut driver = Self::new(adapter, ctx);
        driver.initialize(series.first())?;

        ctx.reporter.report(Progress::TaskStart {
            total_steps: series.len() as u64,
        });
        for day in series.records() {
            driver.step(day)?;
            ctx.reporter.report(Progress::TaskIncrement);
        }
        ctx.reporter.report(Progress::TaskFinish);

        driver.complete()
    }
}
