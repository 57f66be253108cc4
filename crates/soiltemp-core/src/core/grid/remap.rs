//! Conservative remapping of layer-indexed quantities between depth grids.
//!
//! Every adapter that runs on a grid other than the scenario's soil-profile
//! grid funnels its conversions through [`remap`], so the conservation
//! contract lives in exactly one place.

use super::{DepthGrid, GridError};

/// How a layer-indexed quantity behaves under regridding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemapMode {
    /// Per-unit-depth quantities (temperature, concentration, density):
    /// remapped as the overlap-length-weighted average of source values.
    Intensive,
    /// Totalized quantities (water mass per layer): each source layer
    /// contributes in proportion to the fraction of its length overlapped.
    Extensive,
}

/// Redistributes `values`, given per-layer on `source`, onto `target`.
///
/// For each target layer the overlap with every source layer is
/// `max(0, min(t.bottom, s.bottom) - max(t.top, s.top))`. Intensive values
/// are averaged with overlap-length weights; extensive values are summed as
/// `value_s * overlap / thickness_s`.
///
/// If the target grid reaches below the deepest source boundary, the deepest
/// source layer is treated as extending to the bottom of the target grid:
/// soil below the profiled depth is assumed uniform, so the last value is
/// clamped rather than zero-filled.
///
/// Remapping a grid onto itself is the identity, and the depth-integral
/// `sum(value * thickness)` is preserved whenever the target spans the
/// source.
pub fn remap(
    source: &DepthGrid,
    values: &[f64],
    target: &DepthGrid,
    mode: RemapMode,
) -> Result<Vec<f64>, GridError> {
    source.check_values(values)?;

    let last = source.num_layers() - 1;
    let mut out = Vec::with_capacity(target.num_layers());

    for t in 0..target.num_layers() {
        let (t_top, t_bottom) = (target.top(t), target.bottom(t));
        let mut weighted = 0.0;
        let mut weight = 0.0;

        for (s, &value) in values.iter().enumerate() {
            let s_top = source.top(s);
            // The deepest source layer extends to the bottom of the target
            // grid, clamping its value over any excess depth.
            let s_bottom = if s == last {
                source.bottom(s).max(target.total_depth())
            } else {
                source.bottom(s)
            };

            let overlap = (t_bottom.min(s_bottom) - t_top.max(s_top)).max(0.0);
            if overlap == 0.0 {
                continue;
            }

            match mode {
                RemapMode::Intensive => {
                    weighted += value * overlap;
                    weight += overlap;
                }
                RemapMode::Extensive => {
                    weighted += value * overlap / source.thickness(s);
                }
            }
        }

        out.push(match mode {
            RemapMode::Intensive => weighted / weight,
            RemapMode::Extensive => weighted,
        });
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-9;

    fn f64_approx_equal(a: f64, b: f64) -> bool {
        (a - b).abs() < TOLERANCE
    }

    fn grid(boundaries: &[f64]) -> DepthGrid {
        DepthGrid::from_boundaries(boundaries.to_vec()).unwrap()
    }

    #[test]
    fn remapping_a_grid_onto_itself_is_the_identity() {
        let g = grid(&[0.0, 10.0, 30.0, 60.0]);
        let values = vec![2.0, 4.0, 6.0];
        let out = remap(&g, &values, &g, RemapMode::Intensive).unwrap();
        assert_eq!(out, values);
    }

    #[test]
    fn intensive_remap_averages_three_layers_onto_two() {
        let source = grid(&[0.0, 10.0, 30.0, 60.0]);
        let target = grid(&[0.0, 20.0, 60.0]);
        let out = remap(&source, &[2.0, 4.0, 6.0], &target, RemapMode::Intensive).unwrap();
        assert!(f64_approx_equal(out[0], 3.0));
        assert!(f64_approx_equal(out[1], 5.5));
    }

    #[test]
    fn intensive_remap_preserves_the_depth_integral_when_target_spans_source() {
        let source = grid(&[0.0, 7.0, 19.0, 45.0, 100.0]);
        let target = grid(&[0.0, 5.0, 10.0, 20.0, 40.0, 100.0]);
        let values = vec![1.5, 3.25, -2.0, 8.0];

        let out = remap(&source, &values, &target, RemapMode::Intensive).unwrap();

        let source_integral: f64 = values
            .iter()
            .enumerate()
            .map(|(i, v)| v * source.thickness(i))
            .sum();
        let target_integral: f64 = out
            .iter()
            .enumerate()
            .map(|(i, v)| v * target.thickness(i))
            .sum();
        assert!((target_integral - source_integral).abs() / source_integral.abs() < 1e-6);
    }

    #[test]
    fn extensive_remap_preserves_the_total_when_target_spans_source() {
        let source = grid(&[0.0, 10.0, 30.0, 60.0]);
        let target = grid(&[0.0, 5.0, 15.0, 60.0]);
        // Water per layer, in mm.
        let values = vec![12.0, 40.0, 33.0];
        let out = remap(&source, &values, &target, RemapMode::Extensive).unwrap();

        let total: f64 = out.iter().sum();
        assert!(f64_approx_equal(total, 85.0));
        // First 5 cm holds half of the first layer's water.
        assert!(f64_approx_equal(out[0], 6.0));
    }

    #[test]
    fn target_deeper_than_source_clamps_the_deepest_source_value() {
        let source = grid(&[0.0, 10.0, 30.0]);
        let target = grid(&[0.0, 10.0, 30.0, 90.0, 150.0]);
        let out = remap(&source, &[5.0, 9.0], &target, RemapMode::Intensive).unwrap();
        assert_eq!(out, vec![5.0, 9.0, 9.0, 9.0]);
    }

    #[test]
    fn extensive_clamp_extends_the_deepest_per_length_density() {
        let source = grid(&[0.0, 10.0, 30.0]);
        let target = grid(&[0.0, 30.0, 50.0]);
        // 2.0 per cm in the second source layer.
        let out = remap(&source, &[10.0, 40.0], &target, RemapMode::Extensive).unwrap();
        assert!(f64_approx_equal(out[0], 50.0));
        assert!(f64_approx_equal(out[1], 40.0));
    }

    #[test]
    fn value_length_mismatch_is_rejected() {
        let g = grid(&[0.0, 10.0, 30.0]);
        let result = remap(&g, &[1.0], &g, RemapMode::Intensive);
        assert_eq!(
            result,
            Err(GridError::LengthMismatch {
                expected: 2,
                found: 1
            })
        );
    }

    #[test]
    fn coarse_to_fine_then_back_recovers_layer_means() {
        let coarse = grid(&[0.0, 20.0, 60.0]);
        let fine = grid(&[0.0, 5.0, 10.0, 15.0, 20.0, 30.0, 40.0, 50.0, 60.0]);
        let values = vec![3.0, 7.5];

        let onto_fine = remap(&coarse, &values, &fine, RemapMode::Intensive).unwrap();
        let back = remap(&fine, &onto_fine, &coarse, RemapMode::Intensive).unwrap();

        assert!(f64_approx_equal(back[0], 3.0));
        assert!(f64_approx_equal(back[1], 7.5));
    }
}
