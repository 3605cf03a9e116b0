//! Unit tests for epi-events.

use epi_core::{AgeGroup, Day, EventId, PersonId};

use crate::{EventCategory, EventPool, EventStore};

fn store() -> EventStore {
    EventStore::new(100, 50)
}

const CAT: EventCategory = EventCategory::Symptomatic;

// ── EventPool ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod pool {
    use super::*;

    #[test]
    fn initial_block_is_one_per_person() {
        let pool = EventPool::new(64);
        assert_eq!(pool.capacity(), 64);
    }

    #[test]
    fn release_then_acquire_reuses_record() {
        let mut pool = EventPool::new(8);
        let a = pool.acquire();
        pool.release(a);
        let b = pool.acquire();
        assert_eq!(a, b);
    }

    #[test]
    fn exhaustion_grows_by_half_population() {
        let mut pool = EventPool::new(10);
        let ids: Vec<EventId> = (0..10).map(|_| pool.acquire()).collect();
        assert_eq!(pool.capacity(), 10);
        // Eleventh acquire forces a refill block of ceil(0.5 × 10) = 5.
        let extra = pool.acquire();
        assert_eq!(pool.capacity(), 15);
        assert!(ids.iter().all(|&id| id != extra));
    }
}

// ── EventStore counters ───────────────────────────────────────────────────────

#[cfg(test)]
mod counters {
    use super::*;

    #[test]
    fn append_bumps_daily_and_age_counts() {
        let mut s = store();
        let age = AgeGroup::new(3);
        s.append(CAT, PersonId(1), age, Day(5), Day(0), None);

        assert_eq!(s.n_pending(CAT, Day(5)), 1);
        assert_eq!(s.n_scheduled(CAT, Day(5)), 1);
        assert_eq!(s.n_pending_by_age(CAT, Day(5))[3], 1);
        assert_eq!(s.n_pending_by_age(CAT, Day(5))[2], 0);
    }

    #[test]
    fn future_event_not_in_live_totals_until_rollover() {
        let mut s = store();
        s.append(CAT, PersonId(0), AgeGroup::new(1), Day(5), Day(0), None);

        // Scheduled in the future: pending but not live.
        assert_eq!(s.n_current(CAT), 0);
        assert_eq!(s.n_total(CAT), 0);

        // Day 5 arrives — rollover folds it in exactly once.
        s.roll_day(CAT, Day(5));
        assert_eq!(s.n_current(CAT), 1);
        assert_eq!(s.n_total(CAT), 1);
        assert_eq!(s.n_total_by_age(CAT)[1], 1);
    }

    #[test]
    fn past_or_present_event_counts_immediately() {
        let mut s = store();
        s.append(CAT, PersonId(0), AgeGroup::new(0), Day(2), Day(2), None);
        assert_eq!(s.n_current(CAT), 1);
        assert_eq!(s.n_total(CAT), 1);
    }

    #[test]
    fn remove_reverses_the_same_rule() {
        let mut s = store();
        // Future event removed before its day: only daily pending reverts.
        let future = s.append(CAT, PersonId(0), AgeGroup::new(4), Day(9), Day(0), None);
        assert_eq!(s.n_pending_by_age(CAT, Day(9))[4], 1);
        s.remove(future, Day(0));
        assert_eq!(s.n_pending(CAT, Day(9)), 0);
        assert_eq!(s.n_pending_by_age(CAT, Day(9))[4], 0);
        assert_eq!(s.n_current(CAT), 0);

        // Due event removed after counting: live count reverts too.
        let due = s.append(CAT, PersonId(1), AgeGroup::new(0), Day(1), Day(1), None);
        assert_eq!(s.n_current(CAT), 1);
        s.remove(due, Day(1));
        assert_eq!(s.n_current(CAT), 0);
        // Cumulative total is monotone: removal never rolls it back.
        assert_eq!(s.n_total(CAT), 1);
    }

    #[test]
    fn removed_event_record_is_reused() {
        let mut s = store();
        let a = s.append(CAT, PersonId(0), AgeGroup::new(0), Day(1), Day(0), None);
        s.remove(a, Day(0));
        let b = s.append(CAT, PersonId(1), AgeGroup::new(0), Day(2), Day(0), None);
        assert_eq!(a, b);
    }
}

// ── Bucket linking ────────────────────────────────────────────────────────────

#[cfg(test)]
mod linking {
    use super::*;

    fn bucket_people(s: &EventStore, day: Day) -> Vec<PersonId> {
        let (mut id, count) = s.drain_snapshot(CAT, day);
        let mut people = Vec::new();
        for _ in 0..count {
            people.push(s.record(id).person);
            id = s.next_of(id);
        }
        people
    }

    #[test]
    fn head_insert_order_is_most_recent_first() {
        let mut s = store();
        for i in 0..3 {
            s.append(CAT, PersonId(i), AgeGroup::new(0), Day(4), Day(0), None);
        }
        assert_eq!(
            bucket_people(&s, Day(4)),
            vec![PersonId(2), PersonId(1), PersonId(0)]
        );
    }

    #[test]
    fn remove_head_middle_and_tail() {
        let mut s = store();
        let ids: Vec<EventId> = (0..4)
            .map(|i| s.append(CAT, PersonId(i), AgeGroup::new(0), Day(4), Day(0), None))
            .collect();

        // List order is 3,2,1,0.  Remove the middle (person 2)…
        s.remove(ids[2], Day(0));
        assert_eq!(
            bucket_people(&s, Day(4)),
            vec![PersonId(3), PersonId(1), PersonId(0)]
        );
        // …then the head (person 3)…
        s.remove(ids[3], Day(0));
        assert_eq!(bucket_people(&s, Day(4)), vec![PersonId(1), PersonId(0)]);
        // …then the tail (person 0)…
        s.remove(ids[0], Day(0));
        assert_eq!(bucket_people(&s, Day(4)), vec![PersonId(1)]);
        // …then the sole remaining element.
        s.remove(ids[1], Day(0));
        assert!(bucket_people(&s, Day(4)).is_empty());
        assert_eq!(s.n_pending(CAT, Day(4)), 0);
    }

    #[test]
    fn snapshot_does_not_see_events_enqueued_mid_walk() {
        let mut s = store();
        for i in 0..2 {
            s.append(CAT, PersonId(i), AgeGroup::new(0), Day(3), Day(3), None);
        }
        let (head, count) = s.drain_snapshot(CAT, Day(3));
        assert_eq!(count, 2);

        // Simulate a callback that enqueues a same-day event mid-walk: the
        // snapshot head and count are unaffected.
        let mut id = head;
        let mut visited = Vec::new();
        for _ in 0..count {
            let next = s.next_of(id);
            visited.push(s.record(id).person);
            s.append(CAT, PersonId(99), AgeGroup::new(0), Day(3), Day(3), None);
            id = next;
        }
        assert_eq!(visited, vec![PersonId(1), PersonId(0)]);
        // The enqueued events are pending for a later pass.
        assert_eq!(s.n_pending(CAT, Day(3)), 4);
    }

    #[test]
    fn draining_with_removal_is_idempotent() {
        let mut s = store();
        for i in 0..5 {
            s.append(CAT, PersonId(i), AgeGroup::new(0), Day(2), Day(2), None);
        }

        let drain = |s: &mut EventStore| -> usize {
            let (mut id, count) = s.drain_snapshot(CAT, Day(2));
            for _ in 0..count {
                let next = s.next_of(id);
                s.remove(id, Day(2));
                id = next;
            }
            count as usize
        };

        let mut s2 = s;
        assert_eq!(drain(&mut s2), 5);
        assert_eq!(drain(&mut s2), 0);
    }
}

// ── Capacity ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod capacity {
    use super::*;

    #[test]
    #[should_panic(expected = "scheduling horizon exceeded")]
    fn scheduling_past_horizon_is_fatal() {
        let mut s = EventStore::new(10, 20);
        s.append(CAT, PersonId(0), AgeGroup::new(0), Day(20), Day(0), None);
    }

    #[test]
    fn payload_roundtrip_and_clear_on_release() {
        let mut s = store();
        let id = s.append(
            CAT,
            PersonId(0),
            AgeGroup::new(0),
            Day(1),
            Day(0),
            Some(Box::new(42u32)),
        );
        let payload = s.take_payload(id);
        assert_eq!(*payload.as_ref().unwrap().downcast_ref::<u32>().unwrap(), 42);
        s.put_payload(id, payload);

        s.remove(id, Day(0));
        let reused = s.append(CAT, PersonId(1), AgeGroup::new(0), Day(1), Day(0), None);
        assert_eq!(reused, id);
        assert!(s.record(reused).payload.is_none());
    }
}
