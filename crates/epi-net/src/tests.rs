//! Unit tests for epi-net.

use epi_core::{NetworkId, PersonId, SimRng};
use epi_pop::PersonStore;

use crate::network::{Edge, NetworkKind};
use crate::registry::NetworkRegistry;
use crate::{build_novid_adjacency, build_random_default, build_small_world, pair_occurrences, NetError};

fn rng() -> SimRng {
    SimRng::new(7)
}

fn registry(n_total: usize) -> NetworkRegistry {
    NetworkRegistry::new(n_total, &["office".into(), "school".into()], 0.5, true)
}

// ── Random pairing ────────────────────────────────────────────────────────────

#[cfg(test)]
mod pairing {
    use super::*;

    #[test]
    fn even_pool_pairs_everyone() {
        let mut pool: Vec<PersonId> = (0..100).map(PersonId).collect();
        let mut edges = Vec::new();
        pair_occurrences(&mut rng(), &mut pool, &mut edges);
        assert_eq!(edges.len(), 50);
        assert!(edges.iter().all(|e| e.a != e.b));
    }

    #[test]
    fn odd_tail_is_dropped() {
        let mut pool: Vec<PersonId> = (0..7).map(PersonId).collect();
        let mut edges = Vec::new();
        pair_occurrences(&mut rng(), &mut pool, &mut edges);
        assert_eq!(edges.len(), 3);
    }

    #[test]
    fn duplicate_occurrences_never_self_pair() {
        // Two occurrences each: self-pairings must be repaired by swapping.
        let mut pool: Vec<PersonId> = (0..20).flat_map(|i| [PersonId(i), PersonId(i)]).collect();
        let mut edges = Vec::new();
        for seed in 0..10 {
            let mut r = SimRng::new(seed);
            pair_occurrences(&mut r, &mut pool, &mut edges);
            assert!(edges.iter().all(|e| e.a != e.b), "self-loop at seed {seed}");
        }
    }

    #[test]
    fn unrepairable_pool_produces_no_edges() {
        // Every occurrence is the same person: nothing to pair with.
        let mut pool = vec![PersonId(3); 6];
        let mut edges = vec![Edge { a: PersonId(0), b: PersonId(1) }];
        pair_occurrences(&mut rng(), &mut pool, &mut edges);
        assert!(edges.is_empty());
    }

    #[test]
    fn default_random_network_honours_quotas() {
        let mut pop = PersonStore::new(10);
        pop.set_random_interactions(vec![2; 10]).unwrap();
        let mut reg = registry(10);
        build_random_default(reg.random_mut(), &pop, &mut rng());
        // 20 occurrences pair into 10 edges.
        assert_eq!(reg.random().n_edges(), 10);
    }

    #[test]
    fn silenced_random_network_builds_nothing() {
        let mut pop = PersonStore::new(10);
        pop.set_random_interactions(vec![2; 10]).unwrap();
        let mut reg = registry(10);
        let id = reg.random().id;
        reg.delete_network(id).unwrap();
        build_random_default(reg.random_mut(), &pop, &mut rng());
        assert_eq!(reg.random().n_edges(), 0);
    }
}

// ── Small world ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod small_world {
    use super::*;

    #[test]
    fn lattice_degree_matches_mean() {
        let members: Vec<PersonId> = (0..50).map(PersonId).collect();
        let edges = build_small_world(&mut rng(), &members, 4.0, 0.0);
        // k_side = 2: each of 50 nodes contributes 2 edges.
        assert_eq!(edges.len(), 100);
    }

    #[test]
    fn no_self_loops_or_duplicates_after_rewiring() {
        let members: Vec<PersonId> = (0..80).map(PersonId).collect();
        let edges = build_small_world(&mut rng(), &members, 6.0, 0.3);
        let mut seen = std::collections::HashSet::new();
        for e in &edges {
            assert_ne!(e.a, e.b);
            let key = if e.a.0 < e.b.0 { (e.a.0, e.b.0) } else { (e.b.0, e.a.0) };
            assert!(seen.insert(key), "duplicate edge {key:?}");
        }
    }

    #[test]
    fn edges_are_relabelled_through_members() {
        let members = vec![PersonId(10), PersonId(20), PersonId(30), PersonId(40)];
        let edges = build_small_world(&mut rng(), &members, 2.0, 0.0);
        assert!(edges.iter().all(|e| members.contains(&e.a) && members.contains(&e.b)));
    }

    #[test]
    fn tiny_member_list_is_safe() {
        assert!(build_small_world(&mut rng(), &[PersonId(0)], 4.0, 0.5).is_empty());
        let edges = build_small_world(&mut rng(), &[PersonId(0), PersonId(1)], 4.0, 0.5);
        assert_eq!(edges.len(), 1);
    }
}

// ── Registry ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod registry_ops {
    use super::*;

    #[test]
    fn default_slot_ids_are_fixed() {
        let reg = registry(100);
        assert_eq!(reg.household().id, NetworkId(0));
        assert_eq!(reg.occupation()[0].id, NetworkId(1));
        assert_eq!(reg.occupation()[1].id, NetworkId(2));
        assert_eq!(reg.random().id, NetworkId(3));
        assert_eq!(reg.hospital().unwrap().id, NetworkId(4));
    }

    #[test]
    fn default_slot_filter_flags() {
        let reg = registry(100);
        assert!(reg.household().skip_hospitalised);
        assert!(!reg.household().skip_quarantined);
        for occ in reg.occupation() {
            assert!(occ.skip_hospitalised && occ.skip_quarantined);
        }
        // Chance encounters are unfiltered: hospitalised and quarantined
        // people still draw random contacts.
        assert!(!reg.random().skip_hospitalised);
        assert!(!reg.random().skip_quarantined);
        assert!(reg.hospital().unwrap().skip_quarantined);
        assert!(!reg.hospital().unwrap().skip_hospitalised);
    }

    #[test]
    fn user_network_ids_never_collide() {
        let mut reg = registry(100);
        let a = reg
            .add_user_network("gym", NetworkKind::UserDefined, false, false, 1.0, vec![])
            .unwrap();
        let b = reg
            .add_user_network("choir", NetworkKind::UserDefined, false, false, 1.0, vec![])
            .unwrap();
        assert_eq!(a, NetworkId(5));
        assert_eq!(b, NetworkId(6));

        // Deleting a user network frees nothing: the next id still advances.
        reg.delete_network(a).unwrap();
        let c = reg
            .add_user_network("club", NetworkKind::UserDefined, false, false, 1.0, vec![])
            .unwrap();
        assert_eq!(c, NetworkId(7));
    }

    #[test]
    fn bad_edges_are_rejected_without_side_effects() {
        let mut reg = registry(10);
        let out_of_range = vec![Edge { a: PersonId(0), b: PersonId(10) }];
        assert!(matches!(
            reg.add_user_network("x", NetworkKind::UserDefined, false, false, 1.0, out_of_range),
            Err(NetError::EdgeOutOfRange(..))
        ));
        let self_loop = vec![Edge { a: PersonId(3), b: PersonId(3) }];
        assert!(matches!(
            reg.add_user_network("x", NetworkKind::UserDefined, false, false, 1.0, self_loop),
            Err(NetError::SelfLoop(_))
        ));
        assert!(reg.user_networks().is_empty());
    }

    #[test]
    fn member_random_network_validation() {
        let mut reg = registry(10);
        assert!(matches!(
            reg.add_user_network_random("x", false, false, vec![PersonId(0)], vec![1, 2]),
            Err(NetError::MemberQuotaMismatch { .. })
        ));
        assert!(matches!(
            reg.add_user_network_random("x", false, false, vec![PersonId(11)], vec![1]),
            Err(NetError::MemberOutOfRange(_))
        ));
    }

    #[test]
    fn deleting_a_default_slot_silences_it() {
        let mut reg = registry(10);
        let id = reg.household().id;
        reg.delete_network(id).unwrap();
        assert!(!reg.household().is_active());
        // The slot is still addressable.
        assert!(reg.get(id).is_some());
    }

    #[test]
    fn fraction_updates_are_validated() {
        let mut reg = registry(10);
        let id = reg.random().id;
        reg.update_daily_fraction(id, 0.25).unwrap();
        assert!((reg.random().daily_fraction - 0.25).abs() < 1e-12);
        assert!(matches!(
            reg.update_daily_fraction(id, 1.5),
            Err(NetError::InvalidFraction(_))
        ));
        assert!(matches!(
            reg.update_daily_fraction(NetworkId(99), 0.5),
            Err(NetError::UnknownNetwork(_))
        ));
    }

    #[test]
    fn canonical_iteration_order() {
        let mut reg = registry(10);
        reg.add_user_network("gym", NetworkKind::UserDefined, false, false, 1.0, vec![])
            .unwrap();
        let ids = reg.ids();
        assert_eq!(ids, vec![NetworkId(0), NetworkId(1), NetworkId(2), NetworkId(3), NetworkId(4), NetworkId(5)]);
    }
}

// ── NOVID adjacency ───────────────────────────────────────────────────────────

#[cfg(test)]
mod novid {
    use super::*;

    /// A path A-B-C-D in the household layer, all app users.
    fn path_registry() -> (PersonStore, NetworkRegistry) {
        let mut pop = PersonStore::new(4);
        pop.set_app_users(vec![true; 4]).unwrap();
        let mut reg = NetworkRegistry::new(4, &[], 1.0, false);
        reg.household_mut().edges = vec![
            Edge { a: PersonId(0), b: PersonId(1) },
            Edge { a: PersonId(1), b: PersonId(2) },
            Edge { a: PersonId(2), b: PersonId(3) },
        ];
        (pop, reg)
    }

    #[test]
    fn hop_distances_along_a_path() {
        let (pop, reg) = path_registry();
        let adj = build_novid_adjacency(&pop, &reg, 3);

        assert_eq!(adj.neighbours(PersonId(0), 0), &[PersonId(0)]);
        assert_eq!(adj.neighbours(PersonId(0), 1), &[PersonId(1)]);
        assert_eq!(adj.neighbours(PersonId(0), 2), &[PersonId(2)]);
        assert_eq!(adj.neighbours(PersonId(0), 3), &[PersonId(3)]);

        // The middle of the path sees both ends at distance 2 at most.
        assert_eq!(adj.counts(PersonId(1)), vec![1, 2, 1, 0]);
    }

    #[test]
    fn each_person_appears_at_shortest_distance_only() {
        // A triangle: distance-2 expansion must not re-report neighbours.
        let mut pop = PersonStore::new(3);
        pop.set_app_users(vec![true; 3]).unwrap();
        let mut reg = NetworkRegistry::new(3, &[], 1.0, false);
        reg.household_mut().edges = vec![
            Edge { a: PersonId(0), b: PersonId(1) },
            Edge { a: PersonId(1), b: PersonId(2) },
            Edge { a: PersonId(0), b: PersonId(2) },
        ];
        let adj = build_novid_adjacency(&pop, &reg, 3);
        for p in 0..3 {
            assert_eq!(adj.counts(PersonId(p)), vec![1, 2, 0, 0]);
        }
    }

    #[test]
    fn non_app_users_break_the_chain() {
        let (mut pop, reg) = path_registry();
        pop.set_app_users(vec![true, false, true, true]).unwrap();
        let adj = build_novid_adjacency(&pop, &reg, 3);

        // B is not on the app: A has no reachable app neighbours at all.
        assert_eq!(adj.counts(PersonId(0)), vec![1, 0, 0, 0]);
        // B's own lists are empty, distance 0 included.
        assert_eq!(adj.counts(PersonId(1)), vec![0, 0, 0, 0]);
        // C-D still see each other.
        assert_eq!(adj.neighbours(PersonId(2), 1), &[PersonId(3)]);
    }
}
