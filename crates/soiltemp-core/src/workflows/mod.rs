//! # Workflows Module
//!
//! The public, user-facing layer: complete scientific procedures built from
//! the engine and core.
//!
//! - [`simulate`] - One scenario end-to-end: treatment resolution, adapter
//!   lookup, the daily loop, canonical output
//! - [`sweep`] - A batch of independent scenarios with per-scenario failure
//!   isolation, optionally in parallel

pub mod simulate;
pub mod sweep;

pub use simulate::{ScenarioInputs, ScenarioRun};
pub use sweep::SweepResult;
