use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A forcing field required by the active model was absent for a day.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Missing forcing field '{field}' on {date}")]
pub struct MissingData {
    pub date: NaiveDate,
    pub field: &'static str,
}

/// Errors produced when assembling a weather series.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WeatherError {
    #[error("Weather series is empty")]
    Empty,

    #[error("Weather records out of order or duplicated at {date}")]
    OutOfOrder { date: NaiveDate },

    #[error("Gap in weather series: expected {expected}, found {found}")]
    Gap {
        expected: NaiveDate,
        found: NaiveDate,
    },
}

/// One calendar day of weather forcing.
///
/// Temperatures in degrees C, radiation in MJ/m2/day, rain and snow water
/// equivalent in mm, day length in hours. Fields not measured at every site
/// are optional; a model that needs one goes through the `require_*`
/// accessors so absence surfaces as a [`MissingData`] error instead of a
/// silent default.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeatherRecord {
    pub date: NaiveDate,
    pub t_min: f64,
    pub t_max: f64,
    pub t_mean: Option<f64>,
    pub radiation: Option<f64>,
    pub rain: Option<f64>,
    pub snow_water_equivalent: Option<f64>,
    pub day_length: Option<f64>,
}

impl WeatherRecord {
    /// The day's mean air temperature: the recorded mean when present,
    /// otherwise `(t_min + t_max) / 2`.
    pub fn mean_temp(&self) -> f64 {
        self.t_mean.unwrap_or(0.5 * (self.t_min + self.t_max))
    }

    pub fn require_radiation(&self) -> Result<f64, MissingData> {
        self.radiation.ok_or(MissingData {
            date: self.date,
            field: "radiation",
        })
    }

    pub fn require_rain(&self) -> Result<f64, MissingData> {
        self.rain.ok_or(MissingData {
            date: self.date,
            field: "rain",
        })
    }

    pub fn require_snow_water_equivalent(&self) -> Result<f64, MissingData> {
        self.snow_water_equivalent.ok_or(MissingData {
            date: self.date,
            field: "snow_water_equivalent",
        })
    }

    pub fn require_day_length(&self) -> Result<f64, MissingData> {
        self.day_length.ok_or(MissingData {
            date: self.date,
            field: "day_length",
        })
    }
}

/// A strictly ordered, gap-free daily weather series.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherSeries {
    records: Vec<WeatherRecord>,
}

impl WeatherSeries {
    pub fn new(records: Vec<WeatherRecord>) -> Result<Self, WeatherError> {
        if records.is_empty() {
            return Err(WeatherError::Empty);
        }
        for pair in records.windows(2) {
            let found = pair[1].date;
            if found <= pair[0].date {
                return Err(WeatherError::OutOfOrder { date: found });
            }
            // found > pair[0].date rules out date overflow here.
            if let Some(expected) = pair[0].date.checked_add_days(Days::new(1))
                && found != expected
            {
                return Err(WeatherError::Gap { expected, found });
            }
        }
        Ok(Self { records })
    }

    pub fn records(&self) -> &[WeatherRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn first(&self) -> &WeatherRecord {
        &self.records[0]
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn test_record(date: NaiveDate, t_min: f64, t_max: f64) -> WeatherRecord {
        WeatherRecord {
            date,
            t_min,
            t_max,
            t_mean: None,
            radiation: Some(14.0),
            rain: Some(0.0),
            snow_water_equivalent: Some(0.0),
            day_length: Some(12.0),
        }
    }

    /// A synthetic gap-free series with a mild seasonal swing.
    pub(crate) fn test_series(days: usize) -> WeatherSeries {
        let start = NaiveDate::from_ymd_opt(1991, 1, 1).unwrap();
        let records = (0..days)
            .map(|i| {
                let date = start.checked_add_days(Days::new(i as u64)).unwrap();
                let seasonal =
                    10.0 - 12.0 * (2.0 * std::f64::consts::PI * i as f64 / 365.0).cos();
                test_record(date, seasonal - 5.0, seasonal + 5.0)
            })
            .collect();
        WeatherSeries::new(records).unwrap()
    }

    #[test]
    fn mean_temp_falls_back_to_the_min_max_average() {
        let date = NaiveDate::from_ymd_opt(1991, 6, 1).unwrap();
        let mut record = test_record(date, 4.0, 16.0);
        assert_eq!(record.mean_temp(), 10.0);

        record.t_mean = Some(9.2);
        assert_eq!(record.mean_temp(), 9.2);
    }

    #[test]
    fn require_accessors_report_the_missing_field_and_date() {
        let date = NaiveDate::from_ymd_opt(1991, 6, 1).unwrap();
        let mut record = test_record(date, 4.0, 16.0);
        record.radiation = None;

        let err = record.require_radiation().unwrap_err();
        assert_eq!(err.field, "radiation");
        assert_eq!(err.date, date);
        assert!(record.require_rain().is_ok());
    }

    #[test]
    fn series_with_a_gap_is_rejected() {
        let start = NaiveDate::from_ymd_opt(1991, 1, 1).unwrap();
        let records = vec![
            test_record(start, 0.0, 10.0),
            test_record(start.checked_add_days(Days::new(2)).unwrap(), 0.0, 10.0),
        ];
        assert!(matches!(
            WeatherSeries::new(records),
            Err(WeatherError::Gap { .. })
        ));
    }

    #[test]
    fn series_out_of_order_is_rejected() {
        let start = NaiveDate::from_ymd_opt(1991, 1, 2).unwrap();
        let records = vec![
            test_record(start, 0.0, 10.0),
            test_record(start.pred_opt().unwrap(), 0.0, 10.0),
        ];
        assert!(matches!(
            WeatherSeries::new(records),
            Err(WeatherError::OutOfOrder { .. })
        ));
    }

    #[test]
    fn gap_free_series_is_accepted() {
        let series = test_series(30);
        assert_eq!(series.len(), 30);
    }
}
