//! # Core Module
//!
//! Stateless foundations of the soil-temperature harness.
//!
//! ## Overview
//!
//! This module holds everything the stepping engine consumes but does not
//! own: the typed records describing a scenario (soil profile, weather
//! series, site parameters, scenario identity) and the depth-grid machinery
//! that lets models with different native layer discretizations exchange
//! layer-indexed quantities without losing mass or energy content.
//!
//! ## Key Components
//!
//! - [`grid`] - Depth discretizations and the conservative remapper
//! - [`models`] - Soil, weather, site, and scenario data models

pub mod grid;
pub mod models;
