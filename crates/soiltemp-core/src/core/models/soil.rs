use crate::core::grid::{DepthGrid, GridError};
use serde::{Deserialize, Serialize};

/// One measured layer of a soil profile.
///
/// Depths are in cm from the surface, water quantities are volumetric
/// fractions, bulk density is in g/cm3, organic carbon is a mass fraction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SoilLayer {
    pub top: f64,
    pub bottom: f64,
    pub bulk_density: f64,
    pub field_capacity: f64,
    pub wilting_point: f64,
    pub water_content: f64,
    pub organic_carbon: f64,
}

impl SoilLayer {
    pub fn thickness(&self) -> f64 {
        self.bottom - self.top
    }
}

/// A validated, contiguous stack of soil layers starting at the surface.
#[derive(Debug, Clone, PartialEq)]
pub struct SoilProfile {
    layers: Vec<SoilLayer>,
    grid: DepthGrid,
}

impl SoilProfile {
    /// Validates contiguity and ordering: layers sorted ascending by `top`,
    /// `layer[i].bottom == layer[i + 1].top`, the first layer at depth 0,
    /// every layer strictly thicker than zero.
    pub fn new(layers: Vec<SoilLayer>) -> Result<Self, GridError> {
        if layers.is_empty() {
            return Err(GridError::Empty);
        }
        if layers[0].top != 0.0 {
            return Err(GridError::NonZeroSurface(layers[0].top));
        }
        for pair in layers.windows(2) {
            if pair[0].bottom != pair[1].top {
                return Err(GridError::NonMonotonic {
                    lower: pair[0].bottom,
                    upper: pair[1].top,
                });
            }
        }
        let mut boundaries = Vec::with_capacity(layers.len() + 1);
        boundaries.push(0.0);
        boundaries.extend(layers.iter().map(|l| l.bottom));
        let grid = DepthGrid::from_boundaries(boundaries)?;
        Ok(Self { layers, grid })
    }

    pub fn layers(&self) -> &[SoilLayer] {
        &self.layers
    }

    pub fn num_layers(&self) -> usize {
        self.layers.len()
    }

    /// The profile's native depth discretization.
    pub fn grid(&self) -> &DepthGrid {
        &self.grid
    }

    pub fn total_depth(&self) -> f64 {
        self.grid.total_depth()
    }

    /// Per-layer bulk density, in grid order, ready for remapping.
    pub fn bulk_density(&self) -> Vec<f64> {
        self.layers.iter().map(|l| l.bulk_density).collect()
    }

    /// Per-layer volumetric water content, in grid order.
    pub fn water_content(&self) -> Vec<f64> {
        self.layers.iter().map(|l| l.water_content).collect()
    }

    /// Depth-weighted mean of a per-layer quantity over the whole profile.
    pub fn depth_weighted_mean(&self, values: &[f64]) -> f64 {
        let weighted: f64 = values
            .iter()
            .zip(&self.layers)
            .map(|(v, l)| v * l.thickness())
            .sum();
        weighted / self.total_depth()
    }

    /// Returns a copy of the profile with every layer's water content set
    /// from a plant-available-water fraction:
    /// `wp + paw * (fc - wp)`, clamped to `[0, 1]`.
    pub fn with_moisture(&self, paw_fraction: f64) -> Self {
        let layers = self
            .layers
            .iter()
            .map(|l| SoilLayer {
                water_content: (l.wilting_point
                    + paw_fraction * (l.field_capacity - l.wilting_point))
                    .clamp(0.0, 1.0),
                ..*l
            })
            .collect();
        Self {
            layers,
            grid: self.grid.clone(),
        }
    }
}
