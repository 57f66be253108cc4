//! Force-restore formulation (Bhumralkar/Deardorff lineage).
//!
//! Two stores: a thin surface store forced by daily air temperature and
//! restored toward a single deep store, which itself integrates the surface
//! signal with a configurable time constant. The only lag model in the set;
//! its two-node grid is remapped onto the scenario profile on output, so the
//! deep-store value is clamped over any soil below the store depth.

use crate::core::grid::{DepthGrid, RemapMode, remap};
use crate::core::models::weather::WeatherRecord;
use crate::engine::adapter::{DayProfile, ModelState, SoilTempModel, foreign_state};
use crate::engine::context::ScenarioContext;
use crate::engine::error::EngineError;

/// Thickness of the fast surface store, in cm.
const SURFACE_STORE_CM: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct State {
    pub surface_temp: f64,
    pub deep_temp: f64,
}

pub struct ForceRestore;

impl ForceRestore {
    fn native_grid(&self, ctx: &ScenarioContext<'_>) -> Result<DepthGrid, EngineError> {
        let deep = ctx.tuning.force_restore_deep_depth_cm;
        if deep <= SURFACE_STORE_CM {
            return Err(EngineError::MissingParameter {
                model: self.name(),
                field: "force_restore_deep_depth_cm",
            });
        }
        Ok(DepthGrid::from_boundaries(vec![0.0, SURFACE_STORE_CM, deep])?)
    }
}

impl SoilTempModel for ForceRestore {
    fn name(&self) -> &'static str {
        "force_restore"
    }

    fn computes_extremes(&self) -> bool {
        false
    }

    fn initialize(
        &self,
        ctx: &ScenarioContext<'_>,
        first_day: &WeatherRecord,
    ) -> Result<ModelState, EngineError> {
        self.native_grid(ctx)?;
        Ok(ModelState::ForceRestore(State {
            surface_temp: first_day.mean_temp(),
            deep_temp: ctx.site.annual_mean_temp,
        }))
    }

    fn step(
        &self,
        ctx: &ScenarioContext<'_>,
        state: ModelState,
        day: &WeatherRecord,
    ) -> Result<(ModelState, DayProfile), EngineError> {
        let ModelState::ForceRestore(prior) = state else {
            return Err(foreign_state(self.name(), &state));
        };

        let ta = day.mean_temp();
        let force = ctx.tuning.force_restore_surface_response;
        let tau = ctx.tuning.force_restore_tau_days;

        let surface = prior.surface_temp
            + force * (ta - prior.surface_temp)
            + (prior.deep_temp - prior.surface_temp) / tau;
        let deep = prior.deep_temp + (surface - prior.deep_temp) / tau;

        let native = self.native_grid(ctx)?;
        let layer_mean = remap(
            &native,
            &[surface, deep],
            ctx.profile.grid(),
            RemapMode::Intensive,
        )?;

        let next = State {
            surface_temp: surface,
            deep_temp: deep,
        };
        Ok((
            ModelState::ForceRestore(next),
            DayProfile::means_only(ctx.profile.grid().clone(), surface, layer_mean),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::models::tests::{deepest_layer_series, run_adapter, surface_series};

    #[test]
    fn deep_store_lags_and_smooths_the_surface() {
        let records = run_adapter(&ForceRestore, 365, 0.0);
        let surface: Vec<f64> = surface_series(&records).iter().map(|r| r.mean_temp).collect();
        let deep = deepest_layer_series(&records);

        let swing = |v: &[f64]| {
            v.iter().fold(f64::MIN, |a, &b| a.max(b)) - v.iter().fold(f64::MAX, |a, &b| a.min(b))
        };
        assert!(swing(&deep) < swing(&surface) * 0.8);

        // The deep store peaks after the surface does.
        let argmax = |v: &[f64]| {
            v.iter()
                .enumerate()
                .max_by(|a, b| a.1.partial_cmp(b.1).unwrap())
                .unwrap()
                .0
        };
        assert!(argmax(&deep) > argmax(&surface));
    }

    #[test]
    fn surface_tracks_a_sustained_warm_spell() {
        let records = run_adapter(&ForceRestore, 60, 0.0);
        let surface = surface_series(&records);
        let first = surface[0].mean_temp;
        let last = surface.last().unwrap().mean_temp;
        // The synthetic series warms from January onward.
        assert!(last > first);
    }

    #[test]
    fn reports_no_extremes() {
        let records = run_adapter(&ForceRestore, 5, 0.0);
        assert!(records.iter().all(|r| r.min_temp.is_none() && r.max_temp.is_none()));
    }
}
