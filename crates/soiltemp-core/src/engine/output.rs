//! Canonical output schema and the unifier that maps each model's raw day
//! profile into it.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::engine::adapter::DayProfile;

/// One depth band of one day, in the canonical schema shared by all models.
///
/// `min_temp`/`max_temp` are `None` when the formulation does not compute
/// extremes. The sentinel is preserved all the way to serialization; it is
/// never coerced to a number and never defaulted to the mean.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyOutputRecord {
    pub date: NaiveDate,
    pub depth_top: f64,
    pub depth_bottom: f64,
    pub mean_temp: f64,
    pub min_temp: Option<f64>,
    pub max_temp: Option<f64>,
}

/// Flattens a day profile into canonical records: one surface row at depth
/// band 0..0, then one row per soil layer in depth order.
pub fn unify(date: NaiveDate, profile: &DayProfile) -> Vec<DailyOutputRecord> {
    let mut records = Vec::with_capacity(profile.layer_mean.len() + 1);

    records.push(DailyOutputRecord {
        date,
        depth_top: 0.0,
        depth_bottom: 0.0,
        mean_temp: profile.surface_mean,
        min_temp: profile.surface_min,
        max_temp: profile.surface_max,
    });

    for (i, &mean_temp) in profile.layer_mean.iter().enumerate() {
        records.push(DailyOutputRecord {
            date,
            depth_top: profile.grid.top(i),
            depth_bottom: profile.grid.bottom(i),
            mean_temp,
            min_temp: profile.layer_min.as_ref().map(|v| v[i]),
            max_temp: profile.layer_max.as_ref().map(|v| v[i]),
        });
    }

    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::grid::DepthGrid;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(1991, 7, 15).unwrap()
    }

    #[test]
    fn surface_row_is_always_reported_at_the_zero_depth_band() {
        let grid = DepthGrid::from_boundaries(vec![0.0, 10.0, 30.0]).unwrap();
        let profile = DayProfile::means_only(grid, 21.5, vec![18.0, 14.0]);

        let records = unify(date(), &profile);
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].depth_top, 0.0);
        assert_eq!(records[0].depth_bottom, 0.0);
        assert_eq!(records[0].mean_temp, 21.5);
        assert_eq!(records[1].depth_top, 0.0);
        assert_eq!(records[1].depth_bottom, 10.0);
        assert_eq!(records[2].depth_bottom, 30.0);
    }

    #[test]
    fn missing_extremes_stay_none_instead_of_being_defaulted() {
        let grid = DepthGrid::from_boundaries(vec![0.0, 10.0]).unwrap();
        let profile = DayProfile::means_only(grid, 20.0, vec![15.0]);

        for record in unify(date(), &profile) {
            assert_eq!(record.min_temp, None);
            assert_eq!(record.max_temp, None);
        }
    }

    #[test]
    fn extremes_are_carried_through_when_the_model_computes_them() {
        let grid = DepthGrid::from_boundaries(vec![0.0, 10.0]).unwrap();
        let profile = DayProfile {
            surface_min: Some(12.0),
            surface_max: Some(28.0),
            layer_min: Some(vec![13.5]),
            layer_max: Some(vec![24.0]),
            ..DayProfile::means_only(grid, 20.0, vec![17.0])
        };

        let records = unify(date(), &profile);
        assert_eq!(records[0].min_temp, Some(12.0));
        assert_eq!(records[0].max_temp, Some(28.0));
        assert_eq!(records[1].min_temp, Some(13.5));
        assert_eq!(records[1].max_temp, Some(24.0));
    }
}
