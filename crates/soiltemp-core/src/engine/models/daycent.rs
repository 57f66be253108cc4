//! DayCent soil-temperature submodel (Parton/Del Grosso lineage).
//!
//! Runs on a fixed five-layer grid. Each layer relaxes toward the one above
//! at a rate set by its heat capacity, which includes the layer's water
//! store - the scenario profile's water is remapped onto the fixed grid as
//! an extensive quantity (mm per layer) at initialization. The surface
//! estimate is insulated by canopy biomass and snow. Surface extremes only.

use crate::core::grid::{DepthGrid, RemapMode, remap};
use crate::core::models::weather::WeatherRecord;
use crate::engine::adapter::{DayProfile, ModelState, SoilTempModel, foreign_state};
use crate::engine::context::ScenarioContext;
use crate::engine::error::EngineError;
use crate::engine::models::{cover_transmission, damping_depth_cm, depth_blend, snow_transmission};

/// Base fraction of the gap to the layer above closed per day, before
/// dividing by relative heat capacity.
const LAYER_RESPONSE: f64 = 0.6;

#[derive(Debug, Clone, PartialEq)]
pub struct State {
    pub layer_temps: Vec<f64>,
    /// Relative heat capacity per fixed layer, from thickness plus water
    /// store; fixed for the scenario.
    pub layer_capacity: Vec<f64>,
}

pub struct Daycent;

impl Daycent {
    fn fixed_grid(&self, ctx: &ScenarioContext<'_>) -> Result<DepthGrid, EngineError> {
        Ok(DepthGrid::from_boundaries(
            ctx.tuning.daycent_boundaries_cm.clone(),
        )?)
    }
}

impl SoilTempModel for Daycent {
    fn name(&self) -> &'static str {
        "daycent"
    }

    fn computes_extremes(&self) -> bool {
        true
    }

    fn initialize(
        &self,
        ctx: &ScenarioContext<'_>,
        first_day: &WeatherRecord,
    ) -> Result<ModelState, EngineError> {
        first_day.require_snow_water_equivalent()?;

        let fixed = self.fixed_grid(ctx)?;
        let source = ctx.profile.grid();

        // Water store per scenario layer in mm, then conservatively pooled
        // onto the fixed layers.
        let water_mm: Vec<f64> = ctx
            .profile
            .layers()
            .iter()
            .map(|l| l.water_content * l.thickness() * 10.0)
            .collect();
        let fixed_water = remap(source, &water_mm, &fixed, RemapMode::Extensive)?;

        let layer_capacity: Vec<f64> = (0..fixed.num_layers())
            .map(|i| fixed.thickness(i) + fixed_water[i] / 10.0)
            .collect();

        let surface = first_day.mean_temp();
        let d = damping_depth_cm(ctx);
        let layer_temps = (0..fixed.num_layers())
            .map(|i| depth_blend(surface, ctx.site.annual_mean_temp, fixed.midpoint(i), d))
            .collect();

        Ok(ModelState::Daycent(State {
            layer_temps,
            layer_capacity,
        }))
    }

    fn step(
        &self,
        ctx: &ScenarioContext<'_>,
        state: ModelState,
        day: &WeatherRecord,
    ) -> Result<(ModelState, DayProfile), EngineError> {
        let ModelState::Daycent(prior) = state else {
            return Err(foreign_state(self.name(), &state));
        };

        let swe = day.require_snow_water_equivalent()?;
        let transmission = snow_transmission(swe, ctx) * cover_transmission(ctx);
        let ta = day.mean_temp();

        let surface = transmission * (ta + 0.3 * (day.t_max - day.t_min) * (1.0 - ctx.site.albedo))
            + (1.0 - transmission) * prior.layer_temps[0];

        let min_capacity = prior
            .layer_capacity
            .iter()
            .fold(f64::MAX, |a, &b| a.min(b));
        let mut layer_temps = prior.layer_temps.clone();
        for i in 0..layer_temps.len() {
            let above = if i == 0 { surface } else { layer_temps[i - 1] };
            let rate =
                (LAYER_RESPONSE * min_capacity / prior.layer_capacity[i]).clamp(0.0, 1.0);
            layer_temps[i] += rate * (above - layer_temps[i]);
        }

        let fixed = self.fixed_grid(ctx)?;
        let layer_mean = remap(&fixed, &layer_temps, ctx.profile.grid(), RemapMode::Intensive)?;

        let profile = DayProfile {
            grid: ctx.profile.grid().clone(),
            surface_mean: surface,
            surface_min: Some(surface - (ta - day.t_min) * transmission),
            surface_max: Some(surface + (day.t_max - ta) * transmission),
            layer_mean,
            layer_min: None,
            layer_max: None,
        };

        let next = State {
            layer_temps,
            layer_capacity: prior.layer_capacity,
        };
        Ok((ModelState::Daycent(next), profile))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::site::tests::test_site;
    use crate::core::models::soil::tests::test_profile;
    use crate::core::models::weather::tests::test_record;
    use crate::engine::config::ModelTuning;
    use crate::engine::models::tests::{deepest_layer_series, run_adapter, surface_series};
    use crate::engine::progress::ProgressReporter;
    use chrono::NaiveDate;

    #[test]
    fn water_pooling_yields_heavier_lower_layers() {
        let site = test_site();
        let profile = test_profile().with_moisture(0.9);
        let tuning = ModelTuning::default();
        let reporter = ProgressReporter::new();
        let ctx = ScenarioContext::new(&site, &profile, &tuning, &reporter, 0.0);

        let date = NaiveDate::from_ymd_opt(1991, 1, 1).unwrap();
        let state = Daycent.initialize(&ctx, &test_record(date, 0.0, 10.0)).unwrap();
        let ModelState::Daycent(state) = state else {
            unreachable!()
        };
        // Thicker, wetter layers hold more heat.
        assert!(state.layer_capacity.last().unwrap() > state.layer_capacity.first().unwrap());
    }

    #[test]
    fn invalid_fixed_grid_configuration_is_a_grid_mismatch() {
        let site = test_site();
        let profile = test_profile();
        let tuning = ModelTuning {
            daycent_boundaries_cm: vec![5.0, 10.0],
            ..ModelTuning::default()
        };
        let reporter = ProgressReporter::new();
        let ctx = ScenarioContext::new(&site, &profile, &tuning, &reporter, 0.0);

        let date = NaiveDate::from_ymd_opt(1991, 1, 1).unwrap();
        let err = Daycent.initialize(&ctx, &test_record(date, 0.0, 10.0)).unwrap_err();
        assert!(matches!(err, EngineError::GridMismatch(_)));
    }

    #[test]
    fn deeper_layers_lag_the_surface() {
        let records = run_adapter(&Daycent, 365, 0.0);
        let surface: Vec<f64> = surface_series(&records).iter().map(|r| r.mean_temp).collect();
        let deep = deepest_layer_series(&records);

        let swing = |v: &[f64]| {
            v.iter().fold(f64::MIN, |a, &b| a.max(b)) - v.iter().fold(f64::MAX, |a, &b| a.min(b))
        };
        assert!(swing(&deep) < swing(&surface));
    }

    #[test]
    fn surface_extremes_only() {
        let records = run_adapter(&Daycent, 10, 1_800.0);
        for r in &records {
            let is_surface = r.depth_top == 0.0 && r.depth_bottom == 0.0;
            assert_eq!(r.min_temp.is_some(), is_surface);
            assert_eq!(r.max_temp.is_some(), is_surface);
        }
    }
}
