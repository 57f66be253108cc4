//! # Data Models Module
//!
//! Typed records describing one simulation scenario: the soil profile and its
//! depth grid, the daily weather forcing, site-level scalars, and the
//! combinatorial scenario identity used by batch sweeps.
//!
//! ## Key Components
//!
//! - [`soil`] - Soil layers and the validated soil profile
//! - [`weather`] - Daily forcing records and gap-free series
//! - [`site`] - Site-level scalar parameters
//! - [`scenario`] - Scenario descriptors, treatment lookups, and the resolver

pub mod scenario;
pub mod site;
pub mod soil;
pub mod weather;
