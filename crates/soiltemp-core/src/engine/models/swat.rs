//! SWAT soil-temperature formulation (Neitsch et al.).
//!
//! Uses SWAT's published cover and snow weighting functions: standing
//! biomass and snow pack blend yesterday's surface temperature with today's
//! bare-ground estimate, and each layer responds through SWAT's depth
//! factor. Means only; SWAT does not report soil temperature extremes.

use crate::core::models::weather::WeatherRecord;
use crate::engine::adapter::{DayProfile, ModelState, SoilTempModel, foreign_state};
use crate::engine::context::ScenarioContext;
use crate::engine::error::EngineError;
use crate::engine::models::{damping_depth_cm, depth_blend};

#[derive(Debug, Clone, PartialEq)]
pub struct State {
    pub surface_temp: f64,
    pub layer_temps: Vec<f64>,
}

pub struct Swat;

impl Swat {
    /// SWAT's weighting of yesterday's surface temperature, from standing
    /// biomass (kg/ha) and snow water equivalent (mm). 0 for bare,
    /// snow-free ground.
    fn cover_weight(&self, biomass: f64, swe_mm: f64) -> f64 {
        let bcv_biomass = biomass / (biomass + (7.563 - 1.297e-4 * biomass).exp());
        let bcv_snow = if swe_mm > 0.0 {
            swe_mm / (swe_mm + (6.055 - 0.3002 * swe_mm).exp())
        } else {
            0.0
        };
        bcv_biomass.max(bcv_snow)
    }

    /// SWAT depth factor: 0 at the surface, approaching 1 at depth.
    fn depth_factor(&self, depth_cm: f64, damping_cm: f64) -> f64 {
        let zd = depth_cm / damping_cm;
        zd / (zd + (-0.867 - 2.078 * zd).exp())
    }
}

impl SoilTempModel for Swat {
    fn name(&self) -> &'static str {
        "swat"
    }

    fn computes_extremes(&self) -> bool {
        false
    }

    fn initialize(
        &self,
        ctx: &ScenarioContext<'_>,
        first_day: &WeatherRecord,
    ) -> Result<ModelState, EngineError> {
        first_day.require_snow_water_equivalent()?;

        let surface = first_day.mean_temp();
        let d = damping_depth_cm(ctx);
        let grid = ctx.profile.grid();
        let layer_temps = (0..grid.num_layers())
            .map(|i| depth_blend(surface, ctx.site.annual_mean_temp, grid.midpoint(i), d))
            .collect();
        Ok(ModelState::Swat(State {
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
        let ModelState::Swat(prior) = state else {
            return Err(foreign_state(self.name(), &state));
        };

        let swe = day.require_snow_water_equivalent()?;
        let bcv = self.cover_weight(ctx.biomass, swe);

        // Bare-ground surface estimate from the day's air temperatures.
        let bare = day.mean_temp() + 0.25 * (day.t_max - day.t_min);
        let surface = bcv * prior.surface_temp + (1.0 - bcv) * bare;

        let d = damping_depth_cm(ctx);
        let lag = ctx.tuning.swat_lag;
        let grid = ctx.profile.grid();
        let layer_temps: Vec<f64> = prior
            .layer_temps
            .iter()
            .enumerate()
            .map(|(i, &t)| {
                let df = self.depth_factor(grid.midpoint(i), d);
                let steady = surface + df * (ctx.site.annual_mean_temp - surface);
                lag * t + (1.0 - lag) * steady
            })
            .collect();

        let next = State {
            surface_temp: surface,
            layer_temps: layer_temps.clone(),
        };
        Ok((
            ModelState::Swat(next),
            DayProfile::means_only(grid.clone(), surface, layer_temps),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::models::tests::{deepest_layer_series, run_adapter, surface_series};

    #[test]
    fn cover_weight_is_zero_for_bare_ground_and_grows_with_biomass() {
        let swat = Swat;
        assert_eq!(swat.cover_weight(0.0, 0.0), 0.0);
        let sparse = swat.cover_weight(1_800.0, 0.0);
        let dense = swat.cover_weight(10_500.0, 0.0);
        assert!(sparse > 0.0 && dense > sparse && dense < 1.0);
    }

    #[test]
    fn snow_pack_dominates_a_sparse_canopy() {
        let swat = Swat;
        let sparse = swat.cover_weight(1_800.0, 0.0);
        let snowy = swat.cover_weight(1_800.0, 40.0);
        assert!(snowy > sparse);
        assert!(snowy > 0.9);
    }

    #[test]
    fn depth_factor_rises_from_zero_toward_one() {
        let swat = Swat;
        assert_eq!(swat.depth_factor(0.0, 100.0), 0.0);
        let shallow = swat.depth_factor(10.0, 100.0);
        let deep = swat.depth_factor(500.0, 100.0);
        assert!(shallow > 0.0 && shallow < deep && deep > 0.95);
    }

    #[test]
    fn deep_layers_sit_closer_to_the_annual_mean_than_the_surface() {
        let records = run_adapter(&Swat, 365, 0.0);
        let surface: Vec<f64> = surface_series(&records).iter().map(|r| r.mean_temp).collect();
        let deep = deepest_layer_series(&records);

        let swing = |v: &[f64]| {
            v.iter().fold(f64::MIN, |a, &b| a.max(b)) - v.iter().fold(f64::MAX, |a, &b| a.min(b))
        };
        assert!(swing(&deep) < swing(&surface));
    }

    #[test]
    fn reports_no_extremes() {
        let records = run_adapter(&Swat, 5, 1_800.0);
        assert!(records.iter().all(|r| r.min_temp.is_none() && r.max_temp.is_none()));
    }
}
