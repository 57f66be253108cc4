//! Externalized model constants.
//!
//! Every coefficient the original formulations hard-coded inside model setup
//! lives here as a named, overridable field, so an experiment can vary a lag
//! coefficient or grid size without touching adapter code.

use serde::{Deserialize, Serialize};

/// Tunable constants shared across the model adapters.
///
/// Defaults reproduce each formulation's published values; override
/// individual fields with struct-update syntax.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelTuning {
    /// Baseline damping depth of the annual temperature wave in moist
    /// mineral soil, in cm.
    pub damping_depth_cm: f64,

    /// EPIC surface-to-profile lag coefficient (weight on the previous
    /// day's temperature).
    pub epic_lag: f64,

    /// SWAT lag coefficient.
    pub swat_lag: f64,

    /// Scaling depth for snow-pack insulation, in mm of water equivalent.
    pub snow_damping_swe_mm: f64,

    /// CERES moving-average window over daily mean air temperature, in days.
    pub ceres_window_days: usize,

    /// Depth of the force-restore deep store, in cm.
    pub force_restore_deep_depth_cm: f64,

    /// Restore time constant of the force-restore deep store, in days.
    /// At 60 days the store passes roughly 0.7 of the annual wave
    /// (`1/sqrt(1 + (omega*tau)^2)` with `omega = 2*pi/365`).
    pub force_restore_tau_days: f64,

    /// Daily response of the force-restore surface store to air temperature.
    pub force_restore_surface_response: f64,

    /// STM2 node thickness, in cm (50 mm in the published model).
    pub stm2_node_thickness_cm: f64,

    /// STM2 node count (42 in the published model).
    pub stm2_node_count: usize,

    /// DayCent fixed five-layer boundaries, in cm from the surface.
    pub daycent_boundaries_cm: Vec<f64>,

    /// Biomass at which canopy insulation reaches half strength, in kg/ha.
    pub biomass_half_damping_kg_ha: f64,
}

impl Default for ModelTuning {
    fn default() -> Self {
        Self {
            damping_depth_cm: 100.0,
            epic_lag: 0.8,
            swat_lag: 0.8,
            snow_damping_swe_mm: 20.0,
            ceres_window_days: 5,
            force_restore_deep_depth_cm: 100.0,
            force_restore_tau_days: 60.0,
            force_restore_surface_response: 0.8,
            stm2_node_thickness_cm: 5.0,
            stm2_node_count: 42,
            daycent_boundaries_cm: vec![0.0, 5.0, 10.0, 20.0, 40.0, 60.0],
            biomass_half_damping_kg_ha: 2_000.0,
        }
    }
}
