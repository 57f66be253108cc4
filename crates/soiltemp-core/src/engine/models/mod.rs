//! The eight built-in soil-temperature formulations.
//!
//! Each module wraps one physically distinct point-in-time model behind the
//! [`SoilTempModel`](crate::engine::adapter::SoilTempModel) capability. The
//! variants differ in required forcing fields, native grid, and whether they
//! compute min/max temperatures:
//!
//! | model           | native grid          | needs                | extremes |
//! |-----------------|----------------------|----------------------|----------|
//! | `campbell`      | scenario profile     | air temp only        | no       |
//! | `force_restore` | surface + deep store | air temp only        | no       |
//! | `epic`          | scenario profile     | radiation, snow      | yes      |
//! | `swat`          | scenario profile     | snow                 | no       |
//! | `ceres`         | scenario profile     | radiation            | no       |
//! | `stm2`          | 42 x 50 mm nodes     | snow                 | surface  |
//! | `daycent`       | fixed five layers    | snow                 | surface  |
//! | `parton`        | scenario profile     | radiation, daylength | yes      |

pub mod campbell;
pub mod ceres;
pub mod daycent;
pub mod epic;
pub mod force_restore;
pub mod parton;
pub mod stm2;
pub mod swat;

use crate::engine::context::ScenarioContext;

/// Damping depth of the annual temperature wave for this scenario's soil,
/// in cm. Wetter, denser profiles conduct the wave deeper.
pub(crate) fn damping_depth_cm(ctx: &ScenarioContext<'_>) -> f64 {
    let profile = ctx.profile;
    let bd = profile.depth_weighted_mean(&profile.bulk_density());
    let wc = profile.depth_weighted_mean(&profile.water_content());
    ctx.tuning.damping_depth_cm * (0.5 + 0.5 * (bd / 1.5).min(2.0)) * (0.8 + 0.8 * wc)
}

/// Snow-pack transmission factor in `(0, 1]`: 1 for bare ground, falling
/// exponentially with snow water equivalent.
pub(crate) fn snow_transmission(swe_mm: f64, ctx: &ScenarioContext<'_>) -> f64 {
    (-swe_mm.max(0.0) / ctx.tuning.snow_damping_swe_mm).exp()
}

/// Canopy transmission factor in `(0, 1]`: 1 for bare soil, halving at the
/// configured biomass.
pub(crate) fn cover_transmission(ctx: &ScenarioContext<'_>) -> f64 {
    let half = ctx.tuning.biomass_half_damping_kg_ha;
    half / (ctx.biomass.max(0.0) + half)
}

/// Steady profile shape: surface influence decaying toward the annual mean
/// with depth.
pub(crate) fn depth_blend(surface: f64, annual_mean: f64, depth_cm: f64, damping_cm: f64) -> f64 {
    let w = (-depth_cm / damping_cm).exp();
    surface * w + annual_mean * (1.0 - w)
}
