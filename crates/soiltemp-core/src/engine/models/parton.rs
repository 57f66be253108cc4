//! Empirical surface min/max formulation (Parton 1984).
//!
//! Daytime maximum and nighttime minimum soil-surface temperatures are
//! estimated from air extremes, solar radiation, and day length; the daily
//! surface mean is their average, lightly smoothed against the previous
//! day. Layer temperatures follow the surface by depth attenuation, with
//! extremes attenuated the same way at every band.

use crate::core::models::weather::WeatherRecord;
use crate::engine::adapter::{DayProfile, ModelState, SoilTempModel, foreign_state};
use crate::engine::context::ScenarioContext;
use crate::engine::error::EngineError;
use crate::engine::models::{cover_transmission, damping_depth_cm, depth_blend};

/// Weight on the previous day's surface mean.
const SMOOTHING: f64 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct State {
    pub prev_surface: f64,
}

pub struct Parton;

impl Parton {
    /// Daytime surface maximum and nighttime minimum from forcing.
    fn surface_extremes(
        &self,
        ctx: &ScenarioContext<'_>,
        day: &WeatherRecord,
        rad: f64,
        day_length: f64,
    ) -> (f64, f64) {
        let transmission = cover_transmission(ctx);
        // Radiation heats the surface over the daylight hours.
        let heating = (1.0 - ctx.site.albedo) * rad * transmission / day_length.max(1.0);
        let surf_max = day.t_max + 2.0 * heating;
        // Night sky cooling narrows toward the air minimum under cover.
        let surf_min = day.t_min + 0.1 * (day.t_max - day.t_min) * (1.0 - transmission);
        (surf_max, surf_min)
    }
}

impl SoilTempModel for Parton {
    fn name(&self) -> &'static str {
        "parton"
    }

    fn computes_extremes(&self) -> bool {
        true
    }

    fn initialize(
        &self,
        _ctx: &ScenarioContext<'_>,
        first_day: &WeatherRecord,
    ) -> Result<ModelState, EngineError> {
        first_day.require_radiation()?;
        first_day.require_day_length()?;
        Ok(ModelState::Parton(State {
            prev_surface: first_day.mean_temp(),
        }))
    }

    fn step(
        &self,
        ctx: &ScenarioContext<'_>,
        state: ModelState,
        day: &WeatherRecord,
    ) -> Result<(ModelState, DayProfile), EngineError> {
        let ModelState::Parton(prior) = state else {
            return Err(foreign_state(self.name(), &state));
        };

        let rad = day.require_radiation()?;
        let day_length = day.require_day_length()?;

        let (surf_max, surf_min) = self.surface_extremes(ctx, day, rad, day_length);
        // The daily mean is the average of the two surface extremes.
        let raw_mean = 0.5 * (surf_min + surf_max);
        let surface = SMOOTHING * prior.prev_surface + (1.0 - SMOOTHING) * raw_mean;

        let d = damping_depth_cm(ctx);
        let grid = ctx.profile.grid();
        let half_swing = 0.5 * (surf_max - surf_min);

        let layer_mean: Vec<f64> = (0..grid.num_layers())
            .map(|i| depth_blend(surface, ctx.site.annual_mean_temp, grid.midpoint(i), d))
            .collect();
        let layer_min = layer_mean
            .iter()
            .enumerate()
            .map(|(i, &t)| t - half_swing * (-grid.midpoint(i) / d).exp())
            .collect();
        let layer_max = layer_mean
            .iter()
            .enumerate()
            .map(|(i, &t)| t + half_swing * (-grid.midpoint(i) / d).exp())
            .collect();

        let profile = DayProfile {
            grid: grid.clone(),
            surface_mean: surface,
            surface_min: Some(surf_min),
            surface_max: Some(surf_max),
            layer_mean,
            layer_min: Some(layer_min),
            layer_max: Some(layer_max),
        };

        let next = State {
            prev_surface: surface,
        };
        Ok((ModelState::Parton(next), profile))
    }
}
