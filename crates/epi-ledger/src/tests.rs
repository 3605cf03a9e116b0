//! Unit tests for epi-ledger.

use epi_core::{Day, NetworkId, PersonId, SimRng};
use epi_net::network::{Construction, Edge, Network, NetworkKind};
use epi_pop::PersonStore;

use crate::InteractionLedger;

fn rng() -> SimRng {
    SimRng::new(11)
}

fn fixed_network(edges: Vec<Edge>) -> Network {
    let mut net = Network::new(NetworkId(0), "test", NetworkKind::Household, Construction::External);
    net.edges = edges;
    net
}

fn ledger(n_total: usize, retention: usize, capacity: usize) -> InteractionLedger {
    let mut l = InteractionLedger::new(n_total, retention);
    l.provision(capacity);
    l
}

#[test]
fn each_edge_writes_both_diaries() {
    let pop = PersonStore::new(4);
    let net = fixed_network(vec![
        Edge { a: PersonId(0), b: PersonId(1) },
        Edge { a: PersonId(0), b: PersonId(2) },
    ]);
    let mut l = ledger(4, 3, 16);
    l.record_network(&net, &pop, false, &mut rng());

    assert_eq!(l.total_recorded(), 4);
    assert_eq!(l.daily_count(PersonId(0)), 2);
    assert_eq!(l.daily_count(PersonId(1)), 1);
    assert_eq!(l.daily_count(PersonId(3)), 0);

    // Diaries list most recent first.
    let partners: Vec<PersonId> = l.interactions(PersonId(0)).map(|r| r.partner).collect();
    assert_eq!(partners, vec![PersonId(2), PersonId(1)]);
    assert_eq!(l.interactions(PersonId(1)).next().unwrap().partner, PersonId(0));
}

#[test]
fn dead_and_hospitalised_endpoints_are_filtered() {
    let mut pop = PersonStore::new(4);
    pop.set_dead(PersonId(1), true);
    pop.set_hospitalised(PersonId(3), true);

    let mut net = fixed_network(vec![
        Edge { a: PersonId(0), b: PersonId(1) }, // dead endpoint
        Edge { a: PersonId(2), b: PersonId(3) }, // hospitalised endpoint
        Edge { a: PersonId(0), b: PersonId(2) }, // survives
    ]);
    net.skip_hospitalised = true;

    let mut l = ledger(4, 3, 16);
    l.record_network(&net, &pop, false, &mut rng());
    assert_eq!(l.total_recorded(), 2);
    assert_eq!(l.daily_count(PersonId(0)), 1);
    assert_eq!(l.daily_count(PersonId(1)), 0);
    assert_eq!(l.daily_count(PersonId(3)), 0);
}

#[test]
fn quarantine_filter_respects_soft_quarantine() {
    let mut pop = PersonStore::new(2);
    pop.set_quarantined(PersonId(1), true);
    let mut net = fixed_network(vec![Edge { a: PersonId(0), b: PersonId(1) }]);
    net.skip_quarantined = true;

    let mut strict = ledger(2, 3, 8);
    strict.record_network(&net, &pop, false, &mut rng());
    assert_eq!(strict.total_recorded(), 0);

    // Soft quarantine keeps the edge (the app still observes it).
    let mut soft = ledger(2, 3, 8);
    soft.record_network(&net, &pop, true, &mut rng());
    assert_eq!(soft.total_recorded(), 2);
}

#[test]
fn daily_fraction_thins_interactions() {
    let pop = PersonStore::new(100);
    let edges: Vec<Edge> = (0..50)
        .map(|i| Edge { a: PersonId(2 * i), b: PersonId(2 * i + 1) })
        .collect();

    let mut all = fixed_network(edges.clone());
    all.daily_fraction = 1.0;
    let mut l = ledger(100, 3, 200);
    l.record_network(&all, &pop, false, &mut rng());
    assert_eq!(l.total_recorded(), 100);

    let mut none = fixed_network(edges.clone());
    none.daily_fraction = 0.0;
    let mut l = ledger(100, 3, 200);
    l.record_network(&none, &pop, false, &mut rng());
    assert_eq!(l.total_recorded(), 0);

    let mut half = fixed_network(edges);
    half.daily_fraction = 0.5;
    let mut l = ledger(100, 3, 200);
    l.record_network(&half, &pop, false, &mut rng());
    let kept = l.total_recorded();
    assert!(kept % 2 == 0 && kept > 0 && kept < 100, "kept {kept}");
}

#[test]
fn traceability_flags_start_unresolved_and_are_markable() {
    let pop = PersonStore::new(3);
    let net = fixed_network(vec![
        Edge { a: PersonId(0), b: PersonId(1) },
        Edge { a: PersonId(0), b: PersonId(2) },
    ]);
    let mut l = ledger(3, 2, 16);
    l.record_network(&net, &pop, false, &mut rng());

    assert!(l
        .interactions(PersonId(0))
        .all(|r| r.traceable.is_none() && r.manual_traceable.is_none()));

    // A tracing pass resolves one contact's flags in place.
    l.interactions_mut(PersonId(0), |r| {
        if r.partner == PersonId(1) {
            r.traceable = Some(true);
            r.manual_traceable = Some(false);
        }
    });
    let flags: Vec<(PersonId, Option<bool>)> = l
        .interactions(PersonId(0))
        .map(|r| (r.partner, r.traceable))
        .collect();
    assert_eq!(flags, vec![(PersonId(2), None), (PersonId(1), Some(true))]);

    // The partner's own record is independent.
    assert!(l.interactions(PersonId(1)).all(|r| r.traceable.is_none()));

    // Rotation wipes the reused slot's flags with everything else.
    l.rotate_day();
    l.rotate_day();
    l.record_network(&net, &pop, false, &mut rng());
    assert!(l.interactions(PersonId(0)).all(|r| r.traceable.is_none()));
}

#[test]
fn rotation_recycles_the_oldest_slot() {
    let pop = PersonStore::new(2);
    let net = fixed_network(vec![Edge { a: PersonId(0), b: PersonId(1) }]);
    let mut l = ledger(2, 2, 8);

    l.record_network(&net, &pop, false, &mut rng());
    assert_eq!(l.daily_count(PersonId(0)), 1);

    l.rotate_day();
    assert_eq!(l.daily_count(PersonId(0)), 0);
    assert_eq!(l.daily_count_at_lag(PersonId(0), 1), 1);
    assert_eq!(
        l.interactions_at_lag(PersonId(0), 1).next().unwrap().partner,
        PersonId(1)
    );

    // Retention 2: the next rotation lands on the original slot and wipes it.
    l.rotate_day();
    assert_eq!(l.daily_count(PersonId(0)), 0);
    assert_eq!(l.total_recorded(), 0);
}

#[test]
fn late_provisioning_reaches_every_slot() {
    let pop = PersonStore::new(2);
    let net = fixed_network(vec![Edge { a: PersonId(0), b: PersonId(1) }]);
    let mut l = InteractionLedger::new(2, 3);
    l.provision(2);
    l.rotate_day();
    l.provision(2);

    // Both blocks are usable in the rotated-to slot.
    for _ in 0..2 {
        l.record_network(&net, &pop, false, &mut rng());
    }
    assert_eq!(l.total_recorded(), 4);
}

#[test]
fn day_at_lag_maps_into_the_retention_window() {
    let l = InteractionLedger::new(1, 3);
    assert_eq!(l.day_at_lag(Day(5), 0), Some(Day(5)));
    assert_eq!(l.day_at_lag(Day(5), 2), Some(Day(3)));
    assert_eq!(l.day_at_lag(Day(5), 3), None); // beyond retention
    assert_eq!(l.day_at_lag(Day(1), 2), None); // before the run began
}

#[test]
#[should_panic(expected = "interaction ledger exhausted")]
fn exhausting_a_slot_is_fatal() {
    let pop = PersonStore::new(4);
    let net = fixed_network(vec![
        Edge { a: PersonId(0), b: PersonId(1) },
        Edge { a: PersonId(2), b: PersonId(3) },
    ]);
    let mut l = ledger(4, 2, 3); // 2 edges need 4 records
    l.record_network(&net, &pop, false, &mut rng());
}
