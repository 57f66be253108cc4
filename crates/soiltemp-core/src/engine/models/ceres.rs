//! CERES soil-temperature formulation (DSSAT lineage).
//!
//! The surface responds to a moving average of recent daily mean air
//! temperatures (window length configurable, five days published), boosted
//! by radiation and weighted by albedo. Layers approach a depth-blended
//! steady value with a fixed fraction per day. Means only.

use std::collections::VecDeque;

use crate::core::models::weather::WeatherRecord;
use crate::engine::adapter::{DayProfile, ModelState, SoilTempModel, foreign_state};
use crate::engine::context::ScenarioContext;
use crate::engine::error::EngineError;
use crate::engine::models::{damping_depth_cm, depth_blend};

/// Fraction of the gap to the steady profile closed per day.
const LAYER_RESPONSE: f64 = 0.2;

#[derive(Debug, Clone, PartialEq)]
pub struct State {
    /// Most recent daily mean air temperatures, oldest first, capped at the
    /// configured window length.
    pub recent_means: VecDeque<f64>,
    pub layer_temps: Vec<f64>,
}

pub struct Ceres;

impl SoilTempModel for Ceres {
    fn name(&self) -> &'static str {
        "ceres"
    }

    fn computes_extremes(&self) -> bool {
        false
    }

    fn initialize(
        &self,
        ctx: &ScenarioContext<'_>,
        first_day: &WeatherRecord,
    ) -> Result<ModelState, EngineError> {
        first_day.require_radiation()?;
        if ctx.tuning.ceres_window_days == 0 {
            return Err(EngineError::MissingParameter {
                model: self.name(),
                field: "ceres_window_days",
            });
        }

        let surface = first_day.mean_temp();
        let d = damping_depth_cm(ctx);
        let grid = ctx.profile.grid();
        let layer_temps = (0..grid.num_layers())
            .map(|i| depth_blend(surface, ctx.site.annual_mean_temp, grid.midpoint(i), d))
            .collect();

        let mut recent_means = VecDeque::with_capacity(ctx.tuning.ceres_window_days);
        recent_means.push_back(surface);
        Ok(ModelState::Ceres(State {
            recent_means,
            layer_temps,
        }))
    }

    fn step(
        &self,
        ctx: &ScenarioContext<'_>,
        state: ModelState,
        day: &WeatherRecord,
    ) -> Result<(ModelState, DayProfile), EngineError> {
        let ModelState::Ceres(prior) = state else {
            return Err(foreign_state(self.name(), &state));
        };

        let rad = day.require_radiation()?;

        let mut recent_means = prior.recent_means;
        recent_means.push_back(day.mean_temp());
        while recent_means.len() > ctx.tuning.ceres_window_days {
            recent_means.pop_front();
        }
        let ta_avg: f64 = recent_means.iter().sum::<f64>() / recent_means.len() as f64;

        let rad_boost = 0.3 * (day.t_max - day.t_min) * rad / (rad + 20.0);
        let surface = (1.0 - ctx.site.albedo) * (ta_avg + rad_boost)
            + ctx.site.albedo * ctx.site.annual_mean_temp;

        let d = damping_depth_cm(ctx);
        let grid = ctx.profile.grid();
        let layer_temps: Vec<f64> = prior
            .layer_temps
            .iter()
            .enumerate()
            .map(|(i, &t)| {
                let steady = depth_blend(surface, ctx.site.annual_mean_temp, grid.midpoint(i), d);
                t + LAYER_RESPONSE * (steady - t)
            })
            .collect();

        let next = State {
            recent_means,
            layer_temps: layer_temps.clone(),
        };
        Ok((
            ModelState::Ceres(next),
            DayProfile::means_only(grid.clone(), surface, layer_temps),
        ))
    }
}
