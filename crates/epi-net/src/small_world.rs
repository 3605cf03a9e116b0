//! Watts-Strogatz small-world construction for occupation networks.
//!
//! A ring lattice over the member list (each node linked to its
//! `round(mean_degree / 2)` nearest neighbours per side) with each edge's far
//! endpoint rewired to a uniform random member with probability
//! `rewire_prob`.  Rewiring never introduces self-loops or duplicate edges;
//! a rewire that cannot find a fresh endpoint keeps the lattice edge.

use rustc_hash::FxHashSet;

use epi_core::{PersonId, SimRng};

use crate::network::Edge;

/// Bounded retry count per rewire before keeping the lattice edge.
const REWIRE_ATTEMPTS: usize = 32;

fn pair_key(a: u32, b: u32) -> (u32, u32) {
    if a < b { (a, b) } else { (b, a) }
}

/// Build a small-world edge list over node indices `0..n_nodes`, then
/// relabel through `members` so the edges carry real person ids.
pub fn build_small_world(
    rng: &mut SimRng,
    members: &[PersonId],
    mean_degree: f64,
    rewire_prob: f64,
) -> Vec<Edge> {
    let n_nodes = members.len();
    if n_nodes < 2 {
        return Vec::new();
    }

    // Per-side neighbour count, capped so the lattice stays simple.
    let k_side = ((mean_degree / 2.0).round() as usize).max(1).min((n_nodes - 1) / 2).max(1);

    let mut edges: Vec<(u32, u32)> = Vec::with_capacity(n_nodes * k_side);
    let mut seen: FxHashSet<(u32, u32)> = FxHashSet::default();
    for i in 0..n_nodes as u32 {
        for j in 1..=k_side as u32 {
            let other = (i + j) % n_nodes as u32;
            let key = pair_key(i, other);
            if seen.insert(key) {
                edges.push((i, other));
            }
        }
    }

    // Rewire each edge's far endpoint with probability `rewire_prob`.
    for e in 0..edges.len() {
        if !rng.gen_bool(rewire_prob) {
            continue;
        }
        let (a, old_b) = edges[e];
        for _ in 0..REWIRE_ATTEMPTS {
            let new_b = rng.gen_range(0..n_nodes as u32);
            if new_b == a || new_b == old_b {
                continue;
            }
            if seen.contains(&pair_key(a, new_b)) {
                continue;
            }
            seen.remove(&pair_key(a, old_b));
            seen.insert(pair_key(a, new_b));
            edges[e] = (a, new_b);
            break;
        }
    }

    edges
        .into_iter()
        .map(|(a, b)| Edge { a: members[a as usize], b: members[b as usize] })
        .collect()
}
