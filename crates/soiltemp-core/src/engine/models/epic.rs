//! EPIC soil-temperature formulation (Williams et al.).
//!
//! A bare-surface temperature is estimated from air temperature, the diurnal
//! range, and net radiation loading, then damped by snow and canopy cover.
//! Each profile layer relaxes toward a depth-blended steady value with the
//! configured lag. Computes min/max at every depth band.

use crate::core::models::weather::WeatherRecord;
use crate::engine::adapter::{DayProfile, ModelState, SoilTempModel, foreign_state};
use crate::engine::context::ScenarioContext;
use crate::engine::error::EngineError;
use crate::engine::models::{cover_transmission, damping_depth_cm, depth_blend, snow_transmission};

/// Radiation load (MJ/m2/day) at which the surface boost reaches half
/// strength.
const RADIATION_HALF_MJ: f64 = 15.0;

#[derive(Debug, Clone, PartialEq)]
pub struct State {
    pub surface_temp: f64,
    pub layer_temps: Vec<f64>,
}

pub struct Epic;

impl Epic {
    fn bare_surface(&self, ctx: &ScenarioContext<'_>, day: &WeatherRecord, rad: f64) -> f64 {
        let ta = day.mean_temp();
        let load = rad / (rad + RADIATION_HALF_MJ);
        ta + 0.5 * (day.t_max - day.t_min) * (1.0 - ctx.site.albedo) * load
    }
}

impl SoilTempModel for Epic {
    fn name(&self) -> &'static str {
        "epic"
    }

    fn computes_extremes(&self) -> bool {
        true
    }

    fn initialize(
        &self,
        ctx: &ScenarioContext<'_>,
        first_day: &WeatherRecord,
    ) -> Result<ModelState, EngineError> {
        // Fail fast if the series lacks the forcing this model needs.
        first_day.require_radiation()?;
        first_day.require_snow_water_equivalent()?;

        let surface = first_day.mean_temp();
        let d = damping_depth_cm(ctx);
        let grid = ctx.profile.grid();
        let layer_temps = (0..grid.num_layers())
            .map(|i| depth_blend(surface, ctx.site.annual_mean_temp, grid.midpoint(i), d))
            .collect();
        Ok(ModelState::Epic(State {
            surface_temp: surface,
            layer_temps,
        }))
    }

    fn step(
        &self,
        ctx: &ScenarioContext<'_>,
        state: ModelState,
        day: &WeatherRecord,
    ) -> Result<(ModelState, DayProfile), EngineError> {
        let ModelState::Epic(prior) = state else {
            return Err(foreign_state(self.name(), &state));
        };

        let rad = day.require_radiation()?;
        let swe = day.require_snow_water_equivalent()?;
        let transmission = snow_transmission(swe, ctx) * cover_transmission(ctx);

        let bare = self.bare_surface(ctx, day, rad);
        // Insulation pins the surface toward the annual mean, not merely
        // toward yesterday: a blend against the prior day alone is a
        // low-pass filter that passes the seasonal wave through unreduced.
        let insulated = ctx.site.annual_mean_temp
            + transmission * (bare - ctx.site.annual_mean_temp);
        let surface = transmission * insulated + (1.0 - transmission) * prior.surface_temp;

        let d = damping_depth_cm(ctx);
        let lag = ctx.tuning.epic_lag;
        let grid = ctx.profile.grid();
        let layer_temps: Vec<f64> = prior
            .layer_temps
            .iter()
            .enumerate()
            .map(|(i, &t)| {
                let steady = depth_blend(surface, ctx.site.annual_mean_temp, grid.midpoint(i), d);
                lag * t + (1.0 - lag) * steady
            })
            .collect();

        // Diurnal swing shrinks with the same transmission and depth factors.
        let ta = day.mean_temp();
        let half_swing_min = (ta - day.t_min) * transmission;
        let half_swing_max = (day.t_max - ta) * transmission;
        let attenuation =
            |depth: f64, half: f64| half * (-depth / d).exp();

        let layer_min = layer_temps
            .iter()
            .enumerate()
            .map(|(i, &t)| t - attenuation(grid.midpoint(i), half_swing_min))
            .collect();
        let layer_max = layer_temps
            .iter()
            .enumerate()
            .map(|(i, &t)| t + attenuation(grid.midpoint(i), half_swing_max))
            .collect();

        let profile = DayProfile {
            grid: grid.clone(),
            surface_mean: surface,
            surface_min: Some(surface - half_swing_min),
            surface_max: Some(surface + half_swing_max),
            layer_mean: layer_temps.clone(),
            layer_min: Some(layer_min),
            layer_max: Some(layer_max),
        };

        let next = State {
            surface_temp: surface,
            layer_temps,
        };
        Ok((ModelState::Epic(next), profile))
    }
}
