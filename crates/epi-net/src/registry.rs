//! `NetworkRegistry` — the model's fixed default network slots plus
//! caller-added user networks.
//!
//! # Id layout
//!
//! Default slots get fixed ids at construction: household is 0, occupation
//! classes are `1..=n_occupation`, the random network is `n_occupation + 1`,
//! and the hospital network (when the model runs one) is `n_occupation + 2`.
//! User networks are allocated `max(existing id) + 1` so ids never collide
//! even after deletions.
//!
//! Deleting a default network zeroes its daily fraction but keeps the slot,
//! so id arithmetic stays valid for the rest of the run.  Deleting a user
//! network removes it outright.

use epi_core::{NetworkId, PersonId};

use crate::error::{NetError, NetResult};
use crate::network::{Construction, Edge, Network, NetworkKind};

pub struct NetworkRegistry {
    n_total: usize,
    household: Network,
    occupation: Vec<Network>,
    random: Network,
    hospital: Option<Network>,
    user: Vec<Network>,
}

impl NetworkRegistry {
    /// Create the default slots.  All edge lists start empty; the model
    /// builder fills them before the first time step.
    pub fn new(
        n_total: usize,
        occupation_names: &[String],
        daily_fraction_work: f64,
        hospital_on: bool,
    ) -> Self {
        let n_occ = occupation_names.len() as u32;

        let mut household = Network::new(
            NetworkId(0),
            "household",
            NetworkKind::Household,
            Construction::Household,
        );
        household.skip_hospitalised = true;

        let occupation = occupation_names
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let mut net = Network::new(
                    NetworkId(1 + i as u32),
                    name.clone(),
                    NetworkKind::Occupation,
                    Construction::SmallWorld,
                );
                net.skip_hospitalised = true;
                net.skip_quarantined = true;
                net.daily_fraction = daily_fraction_work;
                net
            })
            .collect();

        // The random network carries no filters: chance encounters happen to
        // everyone still alive, interventions notwithstanding.
        let random = Network::new(
            NetworkId(n_occ + 1),
            "random",
            NetworkKind::Random,
            Construction::RandomDefault,
        );

        let hospital = hospital_on.then(|| {
            let mut net = Network::new(
                NetworkId(n_occ + 2),
                "hospital",
                NetworkKind::Hospital,
                Construction::External,
            );
            net.skip_quarantined = true;
            net
        });

        Self { n_total, household, occupation, random, hospital, user: Vec::new() }
    }

    #[inline]
    pub fn n_total(&self) -> usize {
        self.n_total
    }

    // ── Default-slot accessors ────────────────────────────────────────────

    pub fn household(&self) -> &Network {
        &self.household
    }

    pub fn household_mut(&mut self) -> &mut Network {
        &mut self.household
    }

    pub fn occupation(&self) -> &[Network] {
        &self.occupation
    }

    pub fn occupation_mut(&mut self) -> &mut [Network] {
        &mut self.occupation
    }

    pub fn random(&self) -> &Network {
        &self.random
    }

    pub fn random_mut(&mut self) -> &mut Network {
        &mut self.random
    }

    pub fn hospital(&self) -> Option<&Network> {
        self.hospital.as_ref()
    }

    pub fn hospital_mut(&mut self) -> Option<&mut Network> {
        self.hospital.as_mut()
    }

    pub fn user_networks(&self) -> &[Network] {
        &self.user
    }

    pub fn user_networks_mut(&mut self) -> &mut [Network] {
        &mut self.user
    }

    // ── Lookup ────────────────────────────────────────────────────────────

    pub fn get(&self, id: NetworkId) -> Option<&Network> {
        self.iter().find(|n| n.id == id)
    }

    pub fn get_mut(&mut self, id: NetworkId) -> Option<&mut Network> {
        self.iter_mut().find(|n| n.id == id)
    }

    /// All networks in canonical interaction-recording order: household,
    /// occupations, random, hospital, then user networks in creation order.
    pub fn iter(&self) -> impl Iterator<Item = &Network> {
        std::iter::once(&self.household)
            .chain(self.occupation.iter())
            .chain(std::iter::once(&self.random))
            .chain(self.hospital.iter())
            .chain(self.user.iter())
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Network> {
        std::iter::once(&mut self.household)
            .chain(self.occupation.iter_mut())
            .chain(std::iter::once(&mut self.random))
            .chain(self.hospital.iter_mut())
            .chain(self.user.iter_mut())
    }

    pub fn ids(&self) -> Vec<NetworkId> {
        self.iter().map(|n| n.id).collect()
    }

    fn next_user_id(&self) -> NetworkId {
        let max = self.iter().map(|n| n.id.0).max().unwrap_or(0);
        NetworkId(max + 1)
    }

    // ── User networks ─────────────────────────────────────────────────────

    /// Add a fixed-edge user network.  Edges are validated before anything
    /// is committed; on error the registry is unchanged.
    pub fn add_user_network(
        &mut self,
        name: impl Into<String>,
        kind: NetworkKind,
        skip_hospitalised: bool,
        skip_quarantined: bool,
        daily_fraction: f64,
        edges: Vec<Edge>,
    ) -> NetResult<NetworkId> {
        if !(0.0..=1.0).contains(&daily_fraction) {
            return Err(NetError::InvalidFraction(daily_fraction));
        }
        self.validate_edges(&edges)?;

        let id = self.next_user_id();
        let mut net = Network::new(id, name, kind, Construction::External);
        net.skip_hospitalised = skip_hospitalised;
        net.skip_quarantined = skip_quarantined;
        net.daily_fraction = daily_fraction;
        net.edges = edges;
        self.user.push(net);
        Ok(id)
    }

    /// Add a user network whose edges are re-paired randomly each day from
    /// an explicit member/quota list.
    pub fn add_user_network_random(
        &mut self,
        name: impl Into<String>,
        skip_hospitalised: bool,
        skip_quarantined: bool,
        members: Vec<PersonId>,
        quotas: Vec<u16>,
    ) -> NetResult<NetworkId> {
        if members.len() != quotas.len() {
            return Err(NetError::MemberQuotaMismatch { members: members.len(), quotas: quotas.len() });
        }
        if members.len() > self.n_total {
            return Err(NetError::TooManyMembers { got: members.len(), population: self.n_total });
        }
        if let Some(&bad) = members.iter().find(|m| m.index() >= self.n_total) {
            return Err(NetError::MemberOutOfRange(bad));
        }

        let id = self.next_user_id();
        let mut net = Network::new(id, name, NetworkKind::UserDefined, Construction::RandomMembers);
        net.skip_hospitalised = skip_hospitalised;
        net.skip_quarantined = skip_quarantined;
        let capacity = quotas.iter().map(|&q| q as usize).sum::<usize>();
        net.occurrence_pool = Vec::with_capacity(capacity);
        net.edges = Vec::with_capacity(capacity / 2 + 1);
        net.members = members;
        net.member_quotas = quotas;
        self.user.push(net);
        Ok(id)
    }

    fn validate_edges(&self, edges: &[Edge]) -> NetResult<()> {
        for edge in edges {
            if edge.a.index() >= self.n_total || edge.b.index() >= self.n_total {
                return Err(NetError::EdgeOutOfRange(edge.a, edge.b));
            }
            if edge.a == edge.b {
                return Err(NetError::SelfLoop(edge.a));
            }
        }
        Ok(())
    }

    // ── Mutation ──────────────────────────────────────────────────────────

    /// Replace a network's fixed edge list, validating endpoints first.
    pub fn set_edges(&mut self, id: NetworkId, edges: Vec<Edge>) -> NetResult<()> {
        self.validate_edges(&edges)?;
        let net = self.get_mut(id).ok_or(NetError::UnknownNetwork(id))?;
        net.edges = edges;
        Ok(())
    }

    /// Set a network's daily interaction fraction.
    pub fn update_daily_fraction(&mut self, id: NetworkId, fraction: f64) -> NetResult<()> {
        if !(0.0..=1.0).contains(&fraction) {
            return Err(NetError::InvalidFraction(fraction));
        }
        let net = self.get_mut(id).ok_or(NetError::UnknownNetwork(id))?;
        net.daily_fraction = fraction;
        Ok(())
    }

    /// Delete a network.  Default slots are silenced in place (fraction 0);
    /// user networks are removed from the registry.
    pub fn delete_network(&mut self, id: NetworkId) -> NetResult<()> {
        if let Some(pos) = self.user.iter().position(|n| n.id == id) {
            self.user.remove(pos);
            return Ok(());
        }
        let net = self.get_mut(id).ok_or(NetError::UnknownNetwork(id))?;
        net.daily_fraction = 0.0;
        Ok(())
    }
}
