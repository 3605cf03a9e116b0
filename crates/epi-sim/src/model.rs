//! `Model` — the aggregate the driver and all handlers operate on.

use std::any::Any;

use epi_core::{Day, EventId, ModelConfig, NetworkId, PersonId, SimRng};
use epi_events::{EventCategory, EventStore};
use epi_ledger::InteractionLedger;
use epi_net::network::{Edge, NetworkKind};
use epi_net::{NetworkRegistry, NovidAdjacency};
use epi_pop::PersonStore;

use crate::error::SimResult;

/// Daily and cumulative bookkeeping the surrounding application reads out.
/// Category totals live on the event lists; this struct carries only the
/// counts that are not derivable from them.
#[derive(Default)]
pub struct Counters {
    /// Quarantine entries scheduled today.
    pub n_quarantine_events: u64,
    /// Quarantine releases scheduled today.
    pub n_quarantine_release_events: u64,
    /// As above, restricted to app users.
    pub n_quarantine_events_app_user: u64,
    pub n_quarantine_release_events_app_user: u64,
    /// Person-days spent in quarantine, accumulated over the whole run.
    pub n_quarantine_days: u64,
}

impl Counters {
    pub(crate) fn reset_daily(&mut self) {
        self.n_quarantine_events = 0;
        self.n_quarantine_release_events = 0;
        self.n_quarantine_events_app_user = 0;
        self.n_quarantine_release_events_app_user = 0;
    }
}

/// The simulation state: population, networks, ledger, events, and time.
/// Constructed by [`crate::ModelBuilder`]; stepped by [`crate::Simulation`].
pub struct Model {
    pub config: ModelConfig,
    pub time: Day,
    pub rng: SimRng,
    pub population: PersonStore,
    pub networks: NetworkRegistry,
    pub ledger: InteractionLedger,
    pub events: EventStore,
    /// Present iff `config.novid_on`.
    pub novid: Option<NovidAdjacency>,
    pub counters: Counters,
    /// Consulted by the driver at the top of each step; set at build and by
    /// any network mutation.
    pub(crate) rebuild_networks: bool,
}

impl Model {
    // ── Events ────────────────────────────────────────────────────────────

    /// Schedule an event for `person` on `day`, resolving their age band.
    /// Quarantine scheduling additionally feeds the daily counters.
    pub fn schedule_event(
        &mut self,
        category: EventCategory,
        person: PersonId,
        day: Day,
        payload: Option<Box<dyn Any>>,
    ) -> EventId {
        match category {
            EventCategory::Quarantined => {
                self.counters.n_quarantine_events += 1;
                if self.population.is_app_user(person) {
                    self.counters.n_quarantine_events_app_user += 1;
                }
            }
            EventCategory::QuarantineRelease => {
                self.counters.n_quarantine_release_events += 1;
                if self.population.is_app_user(person) {
                    self.counters.n_quarantine_release_events_app_user += 1;
                }
            }
            _ => {}
        }
        let age = self.population.age_of(person);
        self.events.append(category, person, age, day, self.time, payload)
    }

    /// Cancel a scheduled event and recycle its record.
    pub fn cancel_event(&mut self, id: EventId) {
        self.events.remove(id, self.time);
    }

    // ── Networks ──────────────────────────────────────────────────────────

    /// Add a fixed-edge user network, provisioning ledger storage for its
    /// interactions and flagging a network rebuild.
    pub fn add_user_network(
        &mut self,
        name: impl Into<String>,
        kind: NetworkKind,
        skip_hospitalised: bool,
        skip_quarantined: bool,
        daily_fraction: f64,
        edges: Vec<Edge>,
    ) -> SimResult<NetworkId> {
        let capacity = ledger_capacity_for(edges.len() * 2);
        let id = self.networks.add_user_network(
            name,
            kind,
            skip_hospitalised,
            skip_quarantined,
            daily_fraction,
            edges,
        )?;
        self.ledger.provision(capacity);
        self.rebuild_networks = true;
        Ok(id)
    }

    /// Add a member-random user network (re-paired daily from quotas).
    pub fn add_user_network_random(
        &mut self,
        name: impl Into<String>,
        skip_hospitalised: bool,
        skip_quarantined: bool,
        members: Vec<PersonId>,
        quotas: Vec<u16>,
    ) -> SimResult<NetworkId> {
        let capacity = ledger_capacity_for(quotas.iter().map(|&q| q as usize).sum());
        let id = self.networks.add_user_network_random(
            name,
            skip_hospitalised,
            skip_quarantined,
            members,
            quotas,
        )?;
        self.ledger.provision(capacity);
        self.rebuild_networks = true;
        Ok(id)
    }

    /// Delete a network (default slots are silenced, user networks removed).
    pub fn delete_network(&mut self, id: NetworkId) -> SimResult<()> {
        self.networks.delete_network(id)?;
        self.rebuild_networks = true;
        Ok(())
    }

    /// Change a network's daily interaction fraction.  Takes effect at the
    /// next recording pass without a rebuild.
    pub fn update_daily_fraction(&mut self, id: NetworkId, fraction: f64) -> SimResult<()> {
        self.networks.update_daily_fraction(id, fraction)?;
        Ok(())
    }

    /// Force a network rebuild at the start of the next step.
    pub fn request_network_rebuild(&mut self) {
        self.rebuild_networks = true;
    }
}

/// Ledger block size for an expected number of daily interaction records,
/// with the standard 10% headroom.
pub(crate) fn ledger_capacity_for(records: usize) -> usize {
    (records as f64 * 1.1).ceil() as usize
}
