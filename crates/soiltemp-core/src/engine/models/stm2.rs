//! STM2 finite-difference formulation (Spokas & Forcella lineage).
//!
//! Solves one-dimensional heat conduction explicitly on a fixed grid of
//! 50 mm nodes (42 published). Node diffusivities come from the scenario's
//! bulk density and water content, remapped onto the node grid once at
//! initialization; node temperatures are remapped back onto the scenario
//! profile every day. The daily step is split into enough sub-steps to keep
//! the explicit scheme stable, and a non-finite temperature anywhere aborts
//! the scenario as a step failure.

use crate::core::grid::{DepthGrid, RemapMode, remap};
use crate::core::models::weather::WeatherRecord;
use crate::engine::adapter::{DayProfile, ModelState, SoilTempModel, foreign_state};
use crate::engine::context::ScenarioContext;
use crate::engine::error::EngineError;
use crate::engine::models::{damping_depth_cm, depth_blend, snow_transmission};

/// Stability bound on `alpha * dt / dz^2` for the explicit scheme.
const MAX_FOURIER_NUMBER: f64 = 0.25;

#[derive(Debug, Clone, PartialEq)]
pub struct State {
    pub node_temps: Vec<f64>,
    /// Per-node thermal diffusivity in cm2/day, fixed for the scenario.
    pub node_diffusivity: Vec<f64>,
}

pub struct Stm2;

impl Stm2 {
    fn node_grid(&self, ctx: &ScenarioContext<'_>) -> Result<DepthGrid, EngineError> {
        Ok(DepthGrid::uniform(
            ctx.tuning.stm2_node_thickness_cm,
            ctx.tuning.stm2_node_count,
        )?)
    }

    /// Thermal diffusivity in cm2/day from bulk density (g/cm3) and
    /// volumetric water content.
    fn diffusivity(bulk_density: f64, water_content: f64) -> f64 {
        (200.0 * (0.25 + water_content) * (bulk_density / 1.5)).clamp(50.0, 600.0)
    }
}

impl SoilTempModel for Stm2 {
    fn name(&self) -> &'static str {
        "stm2"
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

        let nodes = self.node_grid(ctx)?;
        let source = ctx.profile.grid();
        let bd = remap(
            source,
            &ctx.profile.bulk_density(),
            &nodes,
            RemapMode::Intensive,
        )?;
        let wc = remap(
            source,
            &ctx.profile.water_content(),
            &nodes,
            RemapMode::Intensive,
        )?;
        let node_diffusivity: Vec<f64> = bd
            .iter()
            .zip(&wc)
            .map(|(&b, &w)| Self::diffusivity(b, w))
            .collect();

        let surface = first_day.mean_temp();
        let d = damping_depth_cm(ctx);
        let node_temps = (0..nodes.num_layers())
            .map(|i| depth_blend(surface, ctx.site.annual_mean_temp, nodes.midpoint(i), d))
            .collect();

        Ok(ModelState::Stm2(State {
            node_temps,
            node_diffusivity,
        }))
    }

    fn step(
        &self,
        ctx: &ScenarioContext<'_>,
        state: ModelState,
        day: &WeatherRecord,
    ) -> Result<(ModelState, DayProfile), EngineError> {
        let ModelState::Stm2(prior) = state else {
            return Err(foreign_state(self.name(), &state));
        };

        let swe = day.require_snow_water_equivalent()?;
        let transmission = snow_transmission(swe, ctx);
        let ta = day.mean_temp();

        // Upper boundary: air temperature filtered through the snow pack;
        // lower boundary: the annual mean.
        let top = transmission * ta + (1.0 - transmission) * prior.node_temps[0];
        let bottom = ctx.site.annual_mean_temp;

        let dz = ctx.tuning.stm2_node_thickness_cm;
        let alpha_max = prior
            .node_diffusivity
            .iter()
            .fold(0.0_f64, |a, &b| a.max(b));
        let substeps = (alpha_max / (MAX_FOURIER_NUMBER * dz * dz)).ceil().max(1.0) as usize;
        let dt = 1.0 / substeps as f64;

        let n = prior.node_temps.len();
        let mut temps = prior.node_temps.clone();
        for _ in 0..substeps {
            let mut next = temps.clone();
            for i in 0..n {
                let above = if i == 0 { top } else { temps[i - 1] };
                let below = if i == n - 1 { bottom } else { temps[i + 1] };
                let r = prior.node_diffusivity[i] * dt / (dz * dz);
                next[i] = temps[i] + r * (above - 2.0 * temps[i] + below);
            }
            temps = next;
        }

        if temps.iter().any(|t| !t.is_finite()) {
            return Err(EngineError::StepFailure {
                model: self.name(),
                date: day.date,
                reason: "non-finite node temperature".to_string(),
            });
        }

        let nodes = self.node_grid(ctx)?;
        let layer_mean = remap(&nodes, &temps, ctx.profile.grid(), RemapMode::Intensive)?;

        let profile = DayProfile {
            grid: ctx.profile.grid().clone(),
            surface_mean: top,
            surface_min: Some(top - (ta - day.t_min) * transmission),
            surface_max: Some(top + (day.t_max - ta) * transmission),
            layer_mean,
            layer_min: None,
            layer_max: None,
        };

        let next = State {
            node_temps: temps,
            node_diffusivity: prior.node_diffusivity,
        };
        Ok((ModelState::Stm2(next), profile))
    }
}
