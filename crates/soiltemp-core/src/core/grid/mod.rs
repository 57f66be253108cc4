//! # Depth Grid Module
//!
//! Depth discretizations of a soil column and the conservative remapper that
//! translates layer-indexed quantities between them.
//!
//! A [`DepthGrid`] is an ordered sequence of layer boundaries starting at the
//! surface. Each physical model was designed around its own discretization
//! (the scenario's profiled layers, a fixed 50 mm grid, a fixed five-layer
//! grid), so every quantity that crosses a model boundary goes through
//! [`remap`](remap::remap), which preserves the depth-integral of the
//! quantity under grid mismatch.

pub mod remap;

pub use remap::{RemapMode, remap};

use itertools::Itertools;
use thiserror::Error;

/// Errors produced when constructing or combining depth grids.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GridError {
    #[error("Depth grid must contain at least one layer")]
    Empty,

    #[error("Depth grid must start at the surface (depth 0), found {0}")]
    NonZeroSurface(f64),

    #[error("Depth grid boundaries must be strictly increasing: {lower} >= {upper}")]
    NonMonotonic { lower: f64, upper: f64 },

    #[error("Expected {expected} layer values for grid, found {found}")]
    LengthMismatch { expected: usize, found: usize },
}

/// An ordered, contiguous depth discretization of a soil column.
///
/// Stored as `num_layers + 1` boundary depths, the first of which is always
/// `0.0`. Layer `i` spans `boundaries[i]..boundaries[i + 1]`. Depth units are
/// whatever the scenario uses consistently (the built-in adapters work in
/// centimetres).
#[derive(Debug, Clone, PartialEq)]
pub struct DepthGrid {
    boundaries: Vec<f64>,
}

impl DepthGrid {
    /// Builds a grid from an explicit boundary sequence, surface included.
    pub fn from_boundaries(boundaries: Vec<f64>) -> Result<Self, GridError> {
        if boundaries.len() < 2 {
            return Err(GridError::Empty);
        }
        if boundaries[0] != 0.0 {
            return Err(GridError::NonZeroSurface(boundaries[0]));
        }
        for (&lower, &upper) in boundaries.iter().tuple_windows() {
            if !(upper > lower) {
                return Err(GridError::NonMonotonic { lower, upper });
            }
        }
        Ok(Self { boundaries })
    }

    /// Builds a grid from consecutive layer thicknesses, starting at depth 0.
    pub fn from_thicknesses(thicknesses: &[f64]) -> Result<Self, GridError> {
        let mut boundaries = Vec::with_capacity(thicknesses.len() + 1);
        boundaries.push(0.0);
        let mut depth = 0.0;
        for &t in thicknesses {
            depth += t;
            boundaries.push(depth);
        }
        Self::from_boundaries(boundaries)
    }

    /// Builds a uniform grid of `count` layers, each `step` deep.
    pub fn uniform(step: f64, count: usize) -> Result<Self, GridError> {
        let boundaries = (0..=count).map(|i| i as f64 * step).collect();
        Self::from_boundaries(boundaries)
    }

    pub fn num_layers(&self) -> usize {
        self.boundaries.len() - 1
    }

    pub fn top(&self, layer: usize) -> f64 {
        self.boundaries[layer]
    }

    pub fn bottom(&self, layer: usize) -> f64 {
        self.boundaries[layer + 1]
    }

    pub fn thickness(&self, layer: usize) -> f64 {
        self.bottom(layer) - self.top(layer)
    }

    pub fn midpoint(&self, layer: usize) -> f64 {
        0.5 * (self.top(layer) + self.bottom(layer))
    }

    /// Depth of the deepest boundary.
    pub fn total_depth(&self) -> f64 {
        self.boundaries[self.boundaries.len() - 1]
    }

    /// Checks that a value slice has one entry per layer.
    pub(crate) fn check_values(&self, values: &[f64]) -> Result<(), GridError> {
        if values.len() != self.num_layers() {
            return Err(GridError::LengthMismatch {
                expected: self.num_layers(),
                found: values.len(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_boundaries_accepts_a_valid_grid() {
        let grid = DepthGrid::from_boundaries(vec![0.0, 10.0, 30.0, 60.0]).unwrap();
        assert_eq!(grid.num_layers(), 3);
        assert_eq!(grid.top(1), 10.0);
        assert_eq!(grid.bottom(1), 30.0);
        assert_eq!(grid.thickness(2), 30.0);
        assert_eq!(grid.midpoint(0), 5.0);
        assert_eq!(grid.total_depth(), 60.0);
    }

    #[test]
    fn from_boundaries_rejects_a_grid_not_starting_at_the_surface() {
        let result = DepthGrid::from_boundaries(vec![5.0, 10.0]);
        assert_eq!(result, Err(GridError::NonZeroSurface(5.0)));
    }

    #[test]
    fn from_boundaries_rejects_non_monotonic_boundaries() {
        let result = DepthGrid::from_boundaries(vec![0.0, 20.0, 10.0]);
        assert!(matches!(result, Err(GridError::NonMonotonic { .. })));
    }

    #[test]
    fn from_boundaries_rejects_zero_thickness_layers() {
        let result = DepthGrid::from_boundaries(vec![0.0, 10.0, 10.0]);
        assert!(matches!(result, Err(GridError::NonMonotonic { .. })));
    }

    #[test]
    fn from_boundaries_rejects_an_empty_grid() {
        assert_eq!(DepthGrid::from_boundaries(vec![0.0]), Err(GridError::Empty));
        assert_eq!(DepthGrid::from_boundaries(vec![]), Err(GridError::Empty));
    }

    #[test]
    fn from_thicknesses_accumulates_boundaries_from_the_surface() {
        let grid = DepthGrid::from_thicknesses(&[10.0, 20.0, 30.0]).unwrap();
        assert_eq!(grid, DepthGrid::from_boundaries(vec![0.0, 10.0, 30.0, 60.0]).unwrap());
    }

    #[test]
    fn uniform_builds_equal_layers() {
        let grid = DepthGrid::uniform(5.0, 42).unwrap();
        assert_eq!(grid.num_layers(), 42);
        assert_eq!(grid.thickness(0), 5.0);
        assert_eq!(grid.total_depth(), 210.0);
    }
}
