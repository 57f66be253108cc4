//! # Soiltemp Core Library
//!
//! A harness for driving a family of interchangeable point-in-time
//! soil-temperature formulations over long daily weather series, producing
//! depth-resolved temperature profiles for model comparison and sensitivity
//! analysis.
//!
//! ## Architectural Philosophy
//!
//! The library is designed with a strict three-layer architecture to ensure a
//! clear separation of concerns, making it modular, testable, and extensible.
//!
//! - **[`core`]: The Foundation.** Stateless data models (soil profiles,
//!   weather series, site parameters, scenario descriptors) and the
//!   conservative depth-grid remapping engine that reconciles the different
//!   layer discretizations the models were designed around.
//!
//! - **[`engine`]: The Logic Core.** The model-adapter capability set behind
//!   which the eight physical formulations sit, the registry that resolves a
//!   model identifier to an adapter, and the stepping driver that threads
//!   opaque model state across sequential daily invocations.
//!
//! - **[`workflows`]: The Public API.** The highest-level, user-facing layer:
//!   single-scenario simulation and batch sweeps across the site x soil x
//!   cover x moisture scenario space, with per-scenario failure isolation.

pub mod core;
pub mod engine;
pub mod workflows;
