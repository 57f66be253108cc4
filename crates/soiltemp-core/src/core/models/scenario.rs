//! Scenario identity and the combinatorial sweep resolver.
//!
//! A scenario is one site x soil x cover-level x moisture-level combination.
//! Cover and moisture levels are treatment codes mapped to physical values
//! through fixed, documented lookup tables; the resolver itself is purely
//! structural and carries no physics.

use itertools::iproduct;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TreatmentError {
    #[error("Unknown cover level {0} (known levels: 0, 2, 7)")]
    UnknownCoverLevel(u8),

    #[error("Unknown moisture level {0} (known levels: 1..=5)")]
    UnknownMoistureLevel(u8),
}

/// Canopy-cover treatment code, a proxy for leaf area index.
///
/// Maps to standing surface biomass: level 0 is bare soil, level 2 a sparse
/// canopy (LAI ~2), level 7 a closed canopy (LAI ~7).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CoverLevel(pub u8);

impl CoverLevel {
    /// Standing biomass for this treatment, in kg/ha.
    pub fn biomass(self) -> Result<f64, TreatmentError> {
        match self.0 {
            0 => Ok(0.0),
            2 => Ok(1_800.0),
            7 => Ok(10_500.0),
            other => Err(TreatmentError::UnknownCoverLevel(other)),
        }
    }
}

/// Soil-moisture treatment code, setting the plant-available-water fraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MoistureLevel(pub u8);

impl MoistureLevel {
    /// Plant-available water fraction for this treatment: levels 1..=5 map
    /// to 0.1, 0.3, 0.5, 0.7, 0.9 of the capacity between wilting point and
    /// field capacity.
    pub fn paw_fraction(self) -> Result<f64, TreatmentError> {
        match self.0 {
            1..=5 => Ok(0.1 + 0.2 * f64::from(self.0 - 1)),
            other => Err(TreatmentError::UnknownMoistureLevel(other)),
        }
    }
}

/// Immutable identity of one simulation instance.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScenarioDescriptor {
    pub site_id: String,
    pub soil_id: String,
    pub cover_level: CoverLevel,
    pub moisture_level: MoistureLevel,
}

impl fmt::Display for ScenarioDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}-c{}-m{}",
            self.site_id, self.soil_id, self.cover_level.0, self.moisture_level.0
        )
    }
}

/// Enumerates the Cartesian product of the four treatment axes in a fixed,
/// deterministic order (sites outermost, moisture levels innermost).
pub fn resolve_scenarios(
    sites: &[&str],
    soils: &[&str],
    covers: &[CoverLevel],
    moistures: &[MoistureLevel],
) -> Vec<ScenarioDescriptor> {
    iproduct!(sites, soils, covers, moistures)
        .map(|(site, soil, cover, moisture)| ScenarioDescriptor {
            site_id: (*site).to_string(),
            soil_id: (*soil).to_string(),
            cover_level: *cover,
            moisture_level: *moisture,
        })
        .collect()
}
