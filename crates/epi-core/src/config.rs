//! Top-level model configuration.
//!
//! Typically assembled by the surrounding application (deserialized from a
//! file under the `serde` feature, or built in code) and handed to
//! `epi-sim`'s `ModelBuilder`.  File formats are owned by the application,
//! not this workspace.

use crate::{CoreError, CoreResult, Day};

/// One occupation-class contact network: a name and the mean number of
/// daily interactions its members should have *after* daily-fraction
/// thinning.  The small-world lattice is built with degree
/// `mean_interactions / daily_fraction_work` so the expected realized
/// degree matches.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OccupationNetworkSpec {
    pub name: String,
    pub mean_interactions: f64,
}

/// Static configuration for one model instance.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ModelConfig {
    /// Population size.  Every SoA array in the model has this length.
    pub n_total: usize,

    /// Master RNG seed.  The same seed always produces identical runs.
    pub seed: u64,

    /// Length of the interaction ring: how many days of contact records are
    /// retained before their storage is recycled.
    pub days_of_interaction_retention: usize,

    /// Number of day buckets in every event list.  Scheduling an event at or
    /// beyond this day is a fatal capacity error.
    pub scheduling_horizon: usize,

    /// Daily activation fraction applied to every occupation network.
    pub daily_fraction_work: f64,

    /// Rewire probability for the occupation small-world lattices.
    pub work_network_rewire: f64,

    /// One entry per occupation class; people carry the class index.
    pub occupation_networks: Vec<OccupationNetworkSpec>,

    /// Sizing hint for the random-network occurrence pool and ledger
    /// provisioning when per-person quotas are not yet known.
    pub mean_random_interactions: f64,

    /// Whether daily networks are regenerated every step.  When `false` the
    /// driver rebuilds only when a network mutation sets the rebuild flag.
    pub rebuild_networks_daily: bool,

    /// Soft-quarantine mode: quarantined people keep interacting (the
    /// ledger's quarantine filter is suppressed).
    pub soft_quarantine_on: bool,

    /// Enables the hospital network slot and the hospital drain phase.
    pub hospital_on: bool,

    /// Enables the NOVID multi-hop adjacency build at model construction.
    pub novid_on: bool,

    /// Maximum hop distance for NOVID adjacency lists (distance 0 = self).
    pub novid_max_dist: usize,

    /// Day from which the smart-release sweep runs; 0 disables it.
    pub smart_release_day: u32,

    /// Total days to simulate (exclusive upper bound for run loops).
    pub total_days: u32,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            n_total: 10_000,
            seed: 0,
            days_of_interaction_retention: 10,
            scheduling_horizon: 500,
            daily_fraction_work: 0.5,
            work_network_rewire: 0.1,
            occupation_networks: vec![OccupationNetworkSpec {
                name: "occupation".to_string(),
                mean_interactions: 5.0,
            }],
            mean_random_interactions: 2.0,
            rebuild_networks_daily: true,
            soft_quarantine_on: false,
            hospital_on: false,
            novid_on: false,
            novid_max_dist: 5,
            smart_release_day: 0,
            total_days: 100,
        }
    }
}

impl ModelConfig {
    /// The day at which the simulation ends (exclusive upper bound).
    #[inline]
    pub fn end_day(&self) -> Day {
        Day(self.total_days)
    }

    /// Check invariants the rest of the substrate relies on.  Violations are
    /// caller errors, reported rather than fatal.
    pub fn validate(&self) -> CoreResult<()> {
        if self.n_total == 0 {
            return Err(CoreError::Config("n_total must be positive".into()));
        }
        if self.days_of_interaction_retention == 0 {
            return Err(CoreError::Config(
                "days_of_interaction_retention must be at least 1".into(),
            ));
        }
        if self.scheduling_horizon == 0 {
            return Err(CoreError::Config("scheduling_horizon must be at least 1".into()));
        }
        if !(0.0..=1.0).contains(&self.daily_fraction_work) {
            return Err(CoreError::Config("daily_fraction_work must be in [0, 1]".into()));
        }
        if !(0.0..=1.0).contains(&self.work_network_rewire) {
            return Err(CoreError::Config("work_network_rewire must be in [0, 1]".into()));
        }
        if self.novid_on && self.novid_max_dist < 2 {
            return Err(CoreError::Config("novid_max_dist must be at least 2".into()));
        }
        Ok(())
    }
}
