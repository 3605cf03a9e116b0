//! Random pairing: shuffle an occurrence pool and pair adjacent entries.
//!
//! Each person contributes as many pool occurrences as their daily contact
//! quota.  After a Fisher-Yates shuffle, adjacent occurrences become edges;
//! a would-be self-pairing is repaired by swapping in the next occurrence
//! belonging to someone else.  If no such occurrence exists the surplus
//! occurrence is dropped, as is a lone odd occurrence at the tail — contact
//! quotas are targets, not guarantees.

use epi_core::{PersonId, SimRng};
use epi_pop::PersonStore;

use crate::network::{Edge, Network};

/// Pair a shuffled occurrence pool into `edges`.  `pool` is consumed as
/// scratch (its order is destroyed).
pub fn pair_occurrences(rng: &mut SimRng, pool: &mut [PersonId], edges: &mut Vec<Edge>) {
    edges.clear();
    if pool.len() < 2 {
        return;
    }
    rng.shuffle(pool);

    let last = pool.len() - 1;
    let mut idx = 0;
    while idx < last {
        if pool[idx] == pool[idx + 1] {
            // Repair: swap in the next occurrence held by someone else.
            let mut skip = 1;
            while idx + skip < last {
                if pool[idx] != pool[idx + 1 + skip] {
                    pool.swap(idx + 1, idx + 1 + skip);
                    break;
                }
                skip += 1;
            }
            if pool[idx] == pool[idx + 1] {
                // Only occurrences of this person remain; drop one and retry.
                idx += 1;
                continue;
            }
        }
        edges.push(Edge { a: pool[idx], b: pool[idx + 1] });
        idx += 2;
    }
}

/// Rebuild the default random network from the whole population's quotas.
/// No health filtering happens here — the ledger filters at record time.
pub fn build_random_default(net: &mut Network, population: &PersonStore, rng: &mut SimRng) {
    if !net.is_active() {
        net.edges.clear();
        return;
    }
    net.occurrence_pool.clear();
    for person in population.person_ids() {
        let quota = population.random_interactions[person.index()];
        for _ in 0..quota {
            net.occurrence_pool.push(person);
        }
    }
    let Network { occurrence_pool, edges, .. } = net;
    pair_occurrences(rng, occurrence_pool, edges);
}

/// Rebuild a member-random network.  Unlike the default random network,
/// member networks filter at build time: hospitalised members (when the
/// network skips them) and quarantined members (when the network skips them
/// and soft quarantine is off) contribute no occurrences today.
pub fn build_random_members(
    net: &mut Network,
    population: &PersonStore,
    soft_quarantine: bool,
    rng: &mut SimRng,
) {
    if !net.is_active() {
        net.edges.clear();
        return;
    }
    net.occurrence_pool.clear();
    for (slot, &person) in net.members.iter().enumerate() {
        if net.skip_hospitalised && population.is_hospitalised(person) {
            continue;
        }
        if net.skip_quarantined && !soft_quarantine && population.is_quarantined(person) {
            continue;
        }
        for _ in 0..net.member_quotas[slot] {
            net.occurrence_pool.push(person);
        }
    }
    let Network { occurrence_pool, edges, .. } = net;
    pair_occurrences(rng, occurrence_pool, edges);
}
