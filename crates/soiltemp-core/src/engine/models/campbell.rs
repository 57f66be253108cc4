//! Analytic damped-sine formulation (Campbell 1985).
//!
//! Soil temperature at depth `z` follows the annual air-temperature wave,
//! attenuated by `exp(-z/d)` and phase-shifted by `z/d` radians, where `d`
//! is the damping depth of the scenario's soil. Purely analytic in the
//! calendar day, so it serves as the control formulation in comparisons.

use chrono::Datelike;

use crate::engine::adapter::{DayProfile, ModelState, SoilTempModel, foreign_state};
use crate::engine::context::ScenarioContext;
use crate::engine::error::EngineError;
use crate::engine::models::damping_depth_cm;
use crate::core::models::weather::WeatherRecord;

/// Day of year at which the annual sine wave crosses its mean, rising.
const PHASE_OFFSET_DAYS: f64 = 107.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct State {
    pub days_elapsed: u64,
}

pub struct Campbell;

impl Campbell {
    fn temp_at(&self, ctx: &ScenarioContext<'_>, day_of_year: f64, depth_cm: f64) -> f64 {
        let d = damping_depth_cm(ctx);
        let omega = 2.0 * std::f64::consts::PI / 365.0;
        let phase = omega * (day_of_year - PHASE_OFFSET_DAYS) - depth_cm / d;
        ctx.site.annual_mean_temp
            + ctx.site.annual_amplitude * (-depth_cm / d).exp() * phase.sin()
    }
}

impl SoilTempModel for Campbell {
    fn name(&self) -> &'static str {
        "campbell"
    }

    fn computes_extremes(&self) -> bool {
        false
    }

    fn initialize(
        &self,
        _ctx: &ScenarioContext<'_>,
        _first_day: &WeatherRecord,
    ) -> Result<ModelState, EngineError> {
        Ok(ModelState::Campbell(State { days_elapsed: 0 }))
    }

    fn step(
        &self,
        ctx: &ScenarioContext<'_>,
        state: ModelState,
        day: &WeatherRecord,
    ) -> Result<(ModelState, DayProfile), EngineError> {
        let ModelState::Campbell(prior) = state else {
            return Err(foreign_state(self.name(), &state));
        };

        let doy = f64::from(day.date.ordinal());
        let grid = ctx.profile.grid().clone();
        let layer_mean = (0..grid.num_layers())
            .map(|i| self.temp_at(ctx, doy, grid.midpoint(i)))
            .collect();
        let surface = self.temp_at(ctx, doy, 0.0);

        let next = State {
            days_elapsed: prior.days_elapsed + 1,
        };
        Ok((
            ModelState::Campbell(next),
            DayProfile::means_only(grid, surface, layer_mean),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::models::tests::{deepest_layer_series, run_adapter, surface_series};

    #[test]
    fn surface_oscillates_around_the_annual_mean() {
        let records = run_adapter(&Campbell, 365, 0.0);
        let surface = surface_series(&records);
        let mean: f64 =
            surface.iter().map(|r| r.mean_temp).sum::<f64>() / surface.len() as f64;
        // test_site annual mean is 9.5 C
        assert!((mean - 9.5).abs() < 0.5);
    }

    #[test]
    fn amplitude_shrinks_with_depth() {
        let records = run_adapter(&Campbell, 365, 0.0);
        let surface: Vec<f64> = surface_series(&records).iter().map(|r| r.mean_temp).collect();
        let deep = deepest_layer_series(&records);

        let swing = |v: &[f64]| {
            v.iter().fold(f64::MIN, |a, &b| a.max(b)) - v.iter().fold(f64::MAX, |a, &b| a.min(b))
        };
        assert!(swing(&deep) < swing(&surface));
    }

    #[test]
    fn reports_no_extremes() {
        let records = run_adapter(&Campbell, 5, 0.0);
        assert!(records.iter().all(|r| r.min_temp.is_none() && r.max_temp.is_none()));
    }
}
