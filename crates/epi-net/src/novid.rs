//! Multi-hop adjacency for proximity scoring (the NOVID app model).
//!
//! For every app user, precompute the set of app users at each network
//! distance `1..=max_dist`, breadth-first over the *stable* contact layers
//! (household and occupation networks).  Random and hospital edges churn
//! daily and are excluded — the app scores a person's standing social
//! neighbourhood, not yesterday's stranger contacts.
//!
//! Each hop deduplicates against a per-person "seen" [`ContactSet`] so a
//! person appears at their shortest distance only.

use epi_core::{ContactSet, PersonId};
use epi_pop::PersonStore;

use crate::registry::NetworkRegistry;

/// Per-person neighbour lists by hop distance.  `lists[p][d]` holds the app
/// users exactly `d` hops from person `p`; distance 0 is the person
/// themselves (empty for non-app-users, whose lists are all empty).
pub struct NovidAdjacency {
    lists: Vec<Vec<Vec<PersonId>>>,
    max_dist: usize,
}

impl NovidAdjacency {
    #[inline]
    pub fn max_dist(&self) -> usize {
        self.max_dist
    }

    /// App users exactly `dist` hops from `person`.
    pub fn neighbours(&self, person: PersonId, dist: usize) -> &[PersonId] {
        &self.lists[person.index()][dist]
    }

    /// Neighbour counts by distance for `person`, `0..=max_dist`.
    pub fn counts(&self, person: PersonId) -> Vec<usize> {
        self.lists[person.index()].iter().map(Vec::len).collect()
    }
}

/// Build the multi-hop adjacency.  O(app users × edges per hop).
pub fn build_novid_adjacency(
    population: &PersonStore,
    networks: &NetworkRegistry,
    max_dist: usize,
) -> NovidAdjacency {
    let n = population.count;
    let mut lists: Vec<Vec<Vec<PersonId>>> = vec![vec![Vec::new(); max_dist + 1]; n];
    let mut seen: Vec<ContactSet> = (0..n).map(|_| ContactSet::new()).collect();

    // Distance 0: the app user themselves.
    for person in population.person_ids() {
        if population.is_app_user(person) {
            seen[person.index()].insert(person.index() as u64);
            lists[person.index()][0].push(person);
        }
    }

    // Distance 1: direct edges in the stable layers, app users only.
    let mut frontier: Vec<ContactSet> = (0..n).map(|_| ContactSet::new()).collect();
    let stable = std::iter::once(networks.household()).chain(networks.occupation().iter());
    for net in stable {
        for edge in &net.edges {
            if !population.is_app_user(edge.a) || !population.is_app_user(edge.b) {
                continue;
            }
            frontier[edge.a.index()].insert(edge.b.index() as u64);
            frontier[edge.b.index()].insert(edge.a.index() as u64);
        }
    }
    for i in 0..n {
        for key in frontier[i].iter() {
            if !seen[i].contains(key) {
                seen[i].insert(key);
                lists[i][1].push(PersonId(key as u32));
            }
        }
    }

    // Distance d: expand the d-1 frontier through each member's distance-1
    // list, keeping first sightings only.
    for dist in 2..=max_dist {
        for i in 0..n {
            let mut found = ContactSet::new();
            let mut at_dist = Vec::new();
            for hop in &lists[i][dist - 1] {
                for &next in &lists[hop.index()][1] {
                    let key = next.index() as u64;
                    if !seen[i].contains(key) && !found.contains(key) {
                        found.insert(key);
                        at_dist.push(next);
                    }
                }
            }
            for key in found.to_list() {
                seen[i].insert(key);
            }
            lists[i][dist] = at_dist;
        }
    }

    if log::log_enabled!(log::Level::Debug) {
        let n_app = population.person_ids().filter(|&p| population.is_app_user(p)).count();
        for dist in 1..=max_dist {
            let total: usize = lists.iter().map(|per| per[dist].len()).sum();
            let mean = if n_app > 0 { total as f64 / n_app as f64 } else { 0.0 };
            log::debug!("novid adjacency: distance {dist}, mean degree {mean:.2}");
        }
    }

    NovidAdjacency { lists, max_dist }
}
