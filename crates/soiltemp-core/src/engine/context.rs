use crate::core::models::site::SiteParams;
use crate::core::models::soil::SoilProfile;
use crate::engine::config::ModelTuning;
use crate::engine::progress::ProgressReporter;

/// Shared, read-only bundle handed to every adapter call for one scenario.
///
/// The profile's water content has already been adjusted for the scenario's
/// moisture treatment, and `biomass` is the resolved cover-level value.
#[derive(Clone, Copy)]
pub struct ScenarioContext<'a> {
    pub site: &'a SiteParams,
    pub profile: &'a SoilProfile,
    pub tuning: &'a ModelTuning,
    pub reporter: &'a ProgressReporter<'a>,
    pub biomass: f64,
}

impl<'a> ScenarioContext<'a> {
    pub fn new(
        site: &'a SiteParams,
        profile: &'a SoilProfile,
        tuning: &'a ModelTuning,
        reporter: &'a ProgressReporter<'a>,
        biomass: f64,
    ) -> Self {
        Self {
            site,
            profile,
            tuning,
            reporter,
            biomass,
        }
    }
}
