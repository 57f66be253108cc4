use std::path::Path;

use soiltemp::engine::adapter::ModelRegistry;
use soiltemp::engine::progress::ProgressReporter;
use soiltemp::workflows::sweep;
use tracing::info;

use crate::cli::RunArgs;
use crate::data;
use crate::error::{CliError, Result};
use crate::output;
use crate::ui::SweepProgress;

pub fn run(args: RunArgs) -> Result<()> {
    let config = data::load_sweep_config(&args.config)?;
    let config_dir = args.config.parent().unwrap_or_else(|| Path::new("."));

    info!("Resolving scenario batch from {:?}", &args.config);
    let batch = data::build_batch(&config, config_dir, args.model.as_deref())?;
    if batch.is_empty() {
        return Err(CliError::Config(
            "The sweep configuration resolves to zero scenarios.".to_string(),
        ));
    }

    let registry = ModelRegistry::builtin();
    let total_days: u64 = batch.iter().map(|s| s.weather.len() as u64).sum();
    let progress = SweepProgress::new(total_days);
    let reporter = ProgressReporter::with_callback(progress.callback());

    println!("Running {} scenario(s)...", batch.len());
    let result = sweep::run(&batch, &registry, &config.tuning, &reporter);
    progress.finish();

    output::write_runs(&args.output, &result.completed)?;
    println!(
        "✓ {} scenario(s) written to: {}",
        result.completed.len(),
        args.output.display()
    );

    if !result.failures.is_empty() {
        eprintln!("{} scenario(s) failed:", result.failures.len());
        for failure in &result.failures {
            eprintln!("  ✗ {}: {}", failure.scenario, failure.source);
        }
    }

    if result.completed.is_empty() {
        return Err(CliError::Config(
            "Every scenario in the sweep failed.".to_string(),
        ));
    }

    Ok(())
}
