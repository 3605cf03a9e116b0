//! `ModelBuilder` — fluent construction of a ready-to-step [`Model`].

use epi_core::{ModelConfig, SimRng};
use epi_events::EventStore;
use epi_ledger::InteractionLedger;
use epi_net::network::Edge;
use epi_net::{build_novid_adjacency, build_small_world, NetworkRegistry};
use epi_pop::PersonStore;

use crate::error::{SimError, SimResult};
use crate::model::{ledger_capacity_for, Counters, Model};

/// Builds a [`Model`] from a config and a populated [`PersonStore`].
///
/// Household (and, with `hospital_on`, hospital) edges come from the
/// caller — deriving them from demographics is collaborator logic, not
/// substrate logic.  Occupation networks are built here, small-world over
/// each class's members.
///
/// ```ignore
/// let model = ModelBuilder::new(config, population)
///     .household_edges(households)
///     .build()?;
/// ```
pub struct ModelBuilder {
    config: ModelConfig,
    population: PersonStore,
    household_edges: Vec<Edge>,
    hospital_edges: Vec<Edge>,
}

impl ModelBuilder {
    pub fn new(config: ModelConfig, population: PersonStore) -> Self {
        Self {
            config,
            population,
            household_edges: Vec::new(),
            hospital_edges: Vec::new(),
        }
    }

    pub fn household_edges(mut self, edges: Vec<Edge>) -> Self {
        self.household_edges = edges;
        self
    }

    /// Fixed hospital-network edges; ignored unless `hospital_on`.
    pub fn hospital_edges(mut self, edges: Vec<Edge>) -> Self {
        self.hospital_edges = edges;
        self
    }

    pub fn build(self) -> SimResult<Model> {
        let Self { config, population, household_edges, hospital_edges } = self;

        config.validate()?;
        if population.count != config.n_total {
            return Err(SimError::PopulationSizeMismatch {
                expected: config.n_total,
                got: population.count,
            });
        }

        let mut rng = SimRng::new(config.seed);

        let occupation_names: Vec<String> = config
            .occupation_networks
            .iter()
            .map(|spec| spec.name.clone())
            .collect();
        let mut networks = NetworkRegistry::new(
            config.n_total,
            &occupation_names,
            config.daily_fraction_work,
            config.hospital_on,
        );

        let household_id = networks.household().id;
        networks.set_edges(household_id, household_edges)?;
        if let Some(hospital_id) = networks.hospital().map(|h| h.id) {
            networks.set_edges(hospital_id, hospital_edges)?;
        }

        // Small-world lattices sized so the *realized* degree after
        // daily-fraction thinning matches each class's mean.
        for (class, spec) in config.occupation_networks.iter().enumerate() {
            let members = population.occupation_members(class as u16);
            let degree = if config.daily_fraction_work > 0.0 {
                spec.mean_interactions / config.daily_fraction_work
            } else {
                spec.mean_interactions
            };
            let edges =
                build_small_world(&mut rng, &members, degree, config.work_network_rewire);
            networks.occupation_mut()[class].edges = edges;
        }

        // Provision the ledger against the expected daily record volume:
        // two records per fixed edge, one per random occurrence, doubled for
        // headroom against rebuild variance.
        let fixed_edges: usize = networks.iter().map(|n| n.n_edges()).sum();
        let mut random_records = population.total_random_quota();
        if random_records == 0 {
            random_records =
                (config.n_total as f64 * config.mean_random_interactions).ceil() as usize;
        }
        let capacity = 2 * ledger_capacity_for(2 * fixed_edges + random_records);

        let mut ledger =
            InteractionLedger::new(config.n_total, config.days_of_interaction_retention);
        ledger.provision(capacity.max(16));

        let novid = config
            .novid_on
            .then(|| build_novid_adjacency(&population, &networks, config.novid_max_dist));

        let events = EventStore::new(config.n_total, config.scheduling_horizon);

        log::debug!(
            "model built: {} people, {} networks, ledger {} records/day, horizon {} days",
            config.n_total,
            networks.ids().len(),
            capacity.max(16),
            config.scheduling_horizon
        );

        Ok(Model {
            config,
            time: epi_core::Day::ZERO,
            rng,
            population,
            networks,
            ledger,
            events,
            novid,
            counters: Counters::default(),
            rebuild_networks: true,
        })
    }
}
