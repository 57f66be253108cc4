use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
}

/// Site-level scalars shared by every model at one location.
///
/// `annual_mean_temp` and `annual_amplitude` describe the long-term air
/// temperature climate in degrees C, `albedo` is the bare-surface shortwave
/// albedo, `latitude` is in degrees north.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SiteParams {
    pub annual_mean_temp: f64,
    pub annual_amplitude: f64,
    pub albedo: f64,
    pub latitude: f64,
}

#[derive(Default)]
pub struct SiteParamsBuilder {
    annual_mean_temp: Option<f64>,
    annual_amplitude: Option<f64>,
    albedo: Option<f64>,
    latitude: Option<f64>,
}

impl SiteParamsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn annual_mean_temp(mut self, value: f64) -> Self {
        self.annual_mean_temp = Some(value);
        self
    }
    pub fn annual_amplitude(mut self, value: f64) -> Self {
        self.annual_amplitude = Some(value);
        self
    }
    pub fn albedo(mut self, value: f64) -> Self {
        self.albedo = Some(value);
        self
    }
    pub fn latitude(mut self, value: f64) -> Self {
        self.latitude = Some(value);
        self
    }

    pub fn build(self) -> Result<SiteParams, ConfigError> {
        Ok(SiteParams {
            annual_mean_temp: self
                .annual_mean_temp
                .ok_or(ConfigError::MissingParameter("annual_mean_temp"))?,
            annual_amplitude: self
                .annual_amplitude
                .ok_or(ConfigError::MissingParameter("annual_amplitude"))?,
            albedo: self
                .albedo
                .ok_or(ConfigError::MissingParameter("albedo"))?,
            latitude: self
                .latitude
                .ok_or(ConfigError::MissingParameter("latitude"))?,
        })
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn test_site() -> SiteParams {
        SiteParamsBuilder::new()
            .annual_mean_temp(9.5)
            .annual_amplitude(11.0)
            .albedo(0.15)
            .latitude(51.0)
            .build()
            .unwrap()
    }

    #[test]
    fn builder_reports_the_first_missing_parameter() {
        let result = SiteParamsBuilder::new().annual_mean_temp(9.5).build();
        assert_eq!(
            result,
            Err(ConfigError::MissingParameter("annual_amplitude"))
        );
    }

    #[test]
    fn builder_with_all_fields_succeeds() {
        let site = test_site();
        assert_eq!(site.albedo, 0.15);
        assert_eq!(site.latitude, 51.0);
    }
}
