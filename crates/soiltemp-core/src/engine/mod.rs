//! # Engine Module
//!
//! The stateful stepping layer of the harness.
//!
//! ## Overview
//!
//! The engine owns everything between the typed scenario inputs and the
//! canonical output records: the adapter capability each physical model
//! implements, the registry resolving model identifiers to adapters, the
//! driver that threads opaque model state through sequential daily steps,
//! and the unifier that normalizes heterogeneous per-model outputs.
//!
//! ## Architecture
//!
//! - **Adapters** ([`adapter`], [`models`]) - The uniform
//!   `initialize`/`step` contract and the eight built-in formulations
//! - **Stepping** ([`driver`]) - The per-scenario daily loop state machine
//! - **Outputs** ([`output`]) - The canonical daily record schema
//! - **Configuration** ([`config`]) - Externalized model constants
//! - **Progress Monitoring** ([`progress`]) - Progress reporting callbacks
//! - **Error Handling** ([`error`]) - Engine error taxonomy and scenario
//!   failure reporting

pub mod adapter;
pub mod config;
pub mod context;
pub mod driver;
pub mod error;
pub mod models;
pub mod output;
pub mod progress;
