//! Canonical CSV serialization of completed scenario runs.

use std::path::Path;

use soiltemp::workflows::ScenarioRun;

use crate::error::Result;

const HEADER: [&str; 8] = [
    "scenario",
    "model",
    "date",
    "depth_top",
    "depth_bottom",
    "mean_temp",
    "min_temp",
    "max_temp",
];

/// Literal written for temperatures a model does not compute. Readers must
/// be able to tell "not available" apart from any numeric value.
const NOT_AVAILABLE: &str = "NA";

fn format_optional(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:.3}"),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// Writes every run's records as one flat CSV table, runs in batch order,
/// rows within a run in date and depth order.
pub fn write_runs(path: &Path, runs: &[ScenarioRun]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(HEADER)?;

    for run in runs {
        let scenario = run.descriptor.to_string();
        for record in &run.records {
            writer.write_record([
                scenario.as_str(),
                run.model.as_str(),
                &record.date.to_string(),
                &format!("{:.1}", record.depth_top),
                &format!("{:.1}", record.depth_bottom),
                &format!("{:.3}", record.mean_temp),
                &format_optional(record.min_temp),
                &format_optional(record.max_temp),
            ])?;
        }
    }

    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use soiltemp::core::models::scenario::{CoverLevel, MoistureLevel, ScenarioDescriptor};
    use soiltemp::engine::adapter::ModelId;
    use soiltemp::engine::output::DailyOutputRecord;

    fn sample_run() -> ScenarioRun {
        let date = NaiveDate::from_ymd_opt(1991, 7, 15).unwrap();
        ScenarioRun {
            descriptor: ScenarioDescriptor {
                site_id: "halle".to_string(),
                soil_id: "loam".to_string(),
                cover_level: CoverLevel(2),
                moisture_level: MoistureLevel(3),
            },
            model: ModelId::new("swat"),
            records: vec![
                DailyOutputRecord {
                    date,
                    depth_top: 0.0,
                    depth_bottom: 0.0,
                    mean_temp: 21.456,
                    min_temp: None,
                    max_temp: None,
                },
                DailyOutputRecord {
                    date,
                    depth_top: 0.0,
                    depth_bottom: 10.0,
                    mean_temp: 18.0,
                    min_temp: Some(14.25),
                    max_temp: Some(23.5),
                },
            ],
        }
    }

    #[test]
    fn missing_extremes_serialize_as_the_na_literal() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        write_runs(&path, &[sample_run()]).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[0],
            "scenario,model,date,depth_top,depth_bottom,mean_temp,min_temp,max_temp"
        );
        assert_eq!(
            lines[1],
            "halle-loam-c2-m3,swat,1991-07-15,0.0,0.0,21.456,NA,NA"
        );
        assert_eq!(
            lines[2],
            "halle-loam-c2-m3,swat,1991-07-15,0.0,10.0,18.000,14.250,23.500"
        );
    }

    #[test]
    fn an_empty_batch_still_writes_the_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        write_runs(&path, &[]).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().count(), 1);
    }
}
