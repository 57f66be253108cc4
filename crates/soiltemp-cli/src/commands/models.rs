use soiltemp::engine::adapter::ModelRegistry;

use crate::error::Result;

pub fn run() -> Result<()> {
    let registry = ModelRegistry::builtin();

    println!("{:<14} output", "model");
    for id in registry.model_ids() {
        let adapter = registry.get(&id)?;
        let output = if adapter.computes_extremes() {
            "min / mean / max"
        } else {
            "mean only"
        };
        println!("{:<14} {}", id.as_str(), output);
    }

    Ok(())
}
