//! Parsing of weather, soil, and sweep configuration files into the typed
//! records the core consumes. The core itself never touches the filesystem.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use soiltemp::core::models::scenario::{CoverLevel, MoistureLevel, resolve_scenarios};
use soiltemp::core::models::site::{SiteParams, SiteParamsBuilder};
use soiltemp::core::models::soil::{SoilLayer, SoilProfile};
use soiltemp::core::models::weather::{WeatherRecord, WeatherSeries};
use soiltemp::engine::adapter::ModelId;
use soiltemp::engine::config::ModelTuning;
use soiltemp::workflows::ScenarioInputs;

use crate::error::{CliError, Result};

/// Top-level sweep description, loaded from TOML.
#[derive(Debug, Deserialize)]
pub struct SweepConfig {
    pub model: String,
    #[serde(default)]
    pub tuning: ModelTuning,
    pub sites: Vec<SiteConfig>,
    pub soils: Vec<SoilConfig>,
    pub cover_levels: Vec<u8>,
    pub moisture_levels: Vec<u8>,
}

#[derive(Debug, Deserialize)]
pub struct SiteConfig {
    pub id: String,
    /// Weather CSV path, relative to the config file.
    pub weather: PathBuf,
    pub annual_mean_temp: f64,
    pub annual_amplitude: f64,
    pub albedo: f64,
    pub latitude: f64,
}

#[derive(Debug, Deserialize)]
pub struct SoilConfig {
    pub id: String,
    /// Soil profile TOML path, relative to the config file.
    pub profile: PathBuf,
}

#[derive(Debug, Deserialize)]
struct ProfileFile {
    layers: Vec<SoilLayer>,
}

fn parse_error(path: &Path, source: anyhow::Error) -> CliError {
    CliError::FileParsing {
        path: path.to_path_buf(),
        source,
    }
}

pub fn load_sweep_config(path: &Path) -> Result<SweepConfig> {
    let text = std::fs::read_to_string(path)?;
    toml::from_str(&text).map_err(|e| parse_error(path, anyhow::Error::new(e)))
}

/// Reads a daily weather CSV with the canonical header
/// `date,t_min,t_max,t_mean,radiation,rain,snow_water_equivalent,day_length`.
/// Empty optional fields stay absent rather than defaulting to zero.
pub fn load_weather(path: &Path) -> Result<WeatherSeries> {
    let mut reader =
        csv::Reader::from_path(path).map_err(|e| parse_error(path, anyhow::Error::new(e)))?;
    let mut records = Vec::new();
    for row in reader.deserialize::<WeatherRecord>() {
        records.push(row.map_err(|e| parse_error(path, anyhow::Error::new(e)))?);
    }
    WeatherSeries::new(records)
        .map_err(|e| parse_error(path, anyhow::Error::new(e).context("invalid weather series")))
}

pub fn load_profile(path: &Path) -> Result<SoilProfile> {
    let text = std::fs::read_to_string(path)?;
    let file: ProfileFile =
        toml::from_str(&text).map_err(|e| parse_error(path, anyhow::Error::new(e)))?;
    SoilProfile::new(file.layers)
        .map_err(|e| parse_error(path, anyhow::Error::new(e).context("invalid soil profile")))
}

/// Materializes every scenario of the sweep: the Cartesian product of the
/// configured sites, soils, cover levels, and moisture levels, with weather
/// and soil files loaded once per site/soil.
pub fn build_batch(
    config: &SweepConfig,
    config_dir: &Path,
    model_override: Option<&str>,
) -> Result<Vec<ScenarioInputs>> {
    let model = ModelId::new(model_override.unwrap_or(&config.model));

    let mut sites: HashMap<&str, (SiteParams, WeatherSeries)> = HashMap::new();
    for site in &config.sites {
        let params = SiteParamsBuilder::new()
            .annual_mean_temp(site.annual_mean_temp)
            .annual_amplitude(site.annual_amplitude)
            .albedo(site.albedo)
            .latitude(site.latitude)
            .build()
            .map_err(soiltemp::engine::error::EngineError::from)?;
        let weather = load_weather(&config_dir.join(&site.weather))?;
        sites.insert(site.id.as_str(), (params, weather));
    }

    let mut soils: HashMap<&str, SoilProfile> = HashMap::new();
    for soil in &config.soils {
        soils.insert(soil.id.as_str(), load_profile(&config_dir.join(&soil.profile))?);
    }

    let site_ids: Vec<&str> = config.sites.iter().map(|s| s.id.as_str()).collect();
    let soil_ids: Vec<&str> = config.soils.iter().map(|s| s.id.as_str()).collect();
    let covers: Vec<CoverLevel> = config.cover_levels.iter().map(|&c| CoverLevel(c)).collect();
    let moistures: Vec<MoistureLevel> = config
        .moisture_levels
        .iter()
        .map(|&m| MoistureLevel(m))
        .collect();

    let batch = resolve_scenarios(&site_ids, &soil_ids, &covers, &moistures)
        .into_iter()
        .map(|descriptor| {
            let (site, weather) = &sites[descriptor.site_id.as_str()];
            let profile = &soils[descriptor.soil_id.as_str()];
            ScenarioInputs {
                descriptor,
                model: model.clone(),
                site: *site,
                profile: profile.clone(),
                weather: weather.clone(),
            }
        })
        .collect();
    Ok(batch)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const WEATHER_CSV: &str = "\
date,t_min,t_max,t_mean,radiation,rain,snow_water_equivalent,day_length
1991-01-01,-3.0,4.0,,6.0,0.0,0.0,8.1
1991-01-02,-2.5,5.0,1.0,5.5,2.0,0.0,8.2
1991-01-03,-4.0,2.0,,,0.0,3.5,8.2
";

    const SOIL_TOML: &str = r#"
[[layers]]
top = 0.0
bottom = 10.0
bulk_density = 1.3
field_capacity = 0.3
wilting_point = 0.12
water_content = 0.22
organic_carbon = 0.015

[[layers]]
top = 10.0
bottom = 30.0
bulk_density = 1.45
field_capacity = 0.3
wilting_point = 0.12
water_content = 0.22
organic_carbon = 0.01
"#;

    #[test]
    fn weather_csv_round_trips_with_optional_fields_absent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("weather.csv");
        std::fs::File::create(&path)
            .unwrap()
            .write_all(WEATHER_CSV.as_bytes())
            .unwrap();

        let series = load_weather(&path).unwrap();
        assert_eq!(series.len(), 3);
        assert_eq!(series.records()[0].t_mean, None);
        assert_eq!(series.records()[1].t_mean, Some(1.0));
        assert_eq!(series.records()[2].radiation, None);
        assert_eq!(series.records()[2].snow_water_equivalent, Some(3.5));
    }

    #[test]
    fn soil_toml_parses_into_a_validated_profile() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("soil.toml");
        std::fs::File::create(&path)
            .unwrap()
            .write_all(SOIL_TOML.as_bytes())
            .unwrap();

        let profile = load_profile(&path).unwrap();
        assert_eq!(profile.num_layers(), 2);
        assert_eq!(profile.total_depth(), 30.0);
    }

    #[test]
    fn build_batch_expands_the_full_cartesian_product() {
        let dir = tempfile::tempdir().unwrap();
        let weather_path = dir.path().join("weather.csv");
        std::fs::File::create(&weather_path)
            .unwrap()
            .write_all(WEATHER_CSV.as_bytes())
            .unwrap();
        let soil_path = dir.path().join("soil.toml");
        std::fs::File::create(&soil_path)
            .unwrap()
            .write_all(SOIL_TOML.as_bytes())
            .unwrap();

        let config_text = r#"
model = "epic"
cover_levels = [0, 2]
moisture_levels = [1, 3]

[[sites]]
id = "halle"
weather = "weather.csv"
annual_mean_temp = 9.5
annual_amplitude = 11.0
albedo = 0.15
latitude = 51.0

[[soils]]
id = "loam"
profile = "soil.toml"
"#;
        let config_path = dir.path().join("sweep.toml");
        std::fs::File::create(&config_path)
            .unwrap()
            .write_all(config_text.as_bytes())
            .unwrap();

        let config = load_sweep_config(&config_path).unwrap();
        let batch = build_batch(&config, dir.path(), Some("swat")).unwrap();
        assert_eq!(batch.len(), 4);
        assert!(batch.iter().all(|s| s.model.as_str() == "swat"));
    }

    #[test]
    fn missing_weather_file_is_a_parse_error_with_the_path_attached() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.csv");
        let err = load_weather(&path).unwrap_err();
        assert!(matches!(err, CliError::FileParsing { .. }));
    }
}
