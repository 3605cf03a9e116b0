//! `EventStore` — per-category, day-bucketed event lists over the pool.
//!
//! # "Now"-relative counting
//!
//! Most events are scheduled for *future* days (disease progression is
//! sampled ahead of time), so each list keeps two families of counters:
//!
//! - per-day: `n_daily` (ever scheduled), `n_daily_current` and
//!   `n_daily_by_age` (still pending) — bumped at append time regardless of
//!   the day, the pending pair decremented again on removal;
//! - live/cumulative: `n_current`, `n_total`, `n_total_by_age` — bumped at
//!   append time only when the event's day is not in the future, and folded
//!   forward once per day by [`EventStore::roll_day`] when that day becomes
//!   "now".
//!
//! The split means a future-dated event is never double-counted in the live
//! totals: it enters them exactly once, either at append (already due) or at
//! rollover (its day arrived).  Removal reverses the same rule.
//!
//! The drain loop that dispatches a day's events lives in the driver crate;
//! this module exposes the snapshot/walk primitives it needs
//! ([`EventStore::drain_snapshot`], [`EventStore::next_of`]).

use std::any::Any;

use epi_core::{AgeGroup, Day, EventId, PersonId, N_AGE_GROUPS};

use crate::{EventCategory, EventPool, EventRecord, N_EVENT_CATEGORIES};

/// One category's day-bucketed list and counters.
struct EventList {
    /// Head of each day's doubly-linked bucket; `EventId::INVALID` = empty.
    heads: Vec<EventId>,
    /// Events ever scheduled for each day.
    n_daily: Vec<u64>,
    /// Events still pending (scheduled minus removed/dispatched) per day.
    n_daily_current: Vec<u64>,
    /// Per-day, per-age-band pending counts (appended minus removed).
    n_daily_by_age: Vec<[u64; N_AGE_GROUPS]>,
    /// Live events whose day is not in the future.
    n_current: u64,
    /// Cumulative events whose day has been reached.
    n_total: u64,
    n_total_by_age: [u64; N_AGE_GROUPS],
}

impl EventList {
    fn new(horizon: usize) -> Self {
        Self {
            heads:           vec![EventId::INVALID; horizon],
            n_daily:         vec![0; horizon],
            n_daily_current: vec![0; horizon],
            n_daily_by_age:  vec![[0; N_AGE_GROUPS]; horizon],
            n_current:       0,
            n_total:         0,
            n_total_by_age:  [0; N_AGE_GROUPS],
        }
    }
}

/// The event subsystem: one pool shared by all categories' lists.
pub struct EventStore {
    pool:    EventPool,
    lists:   Vec<EventList>,
    horizon: usize,
}

impl EventStore {
    /// `horizon` is the number of day buckets per category; scheduling at or
    /// beyond it is a fatal capacity error.
    pub fn new(population: usize, horizon: usize) -> Self {
        Self {
            pool:    EventPool::new(population),
            lists:   (0..N_EVENT_CATEGORIES).map(|_| EventList::new(horizon)).collect(),
            horizon,
        }
    }

    // ── Scheduling ────────────────────────────────────────────────────────

    /// Schedule an event: head-insert into the category's bucket for `day`
    /// and update the counter families (see module docs for the
    /// now-relative split).
    ///
    /// # Panics
    /// Panics if `day` is at or beyond the scheduling horizon — undersized
    /// provisioning cannot self-correct mid-run.
    pub fn append(
        &mut self,
        category: EventCategory,
        person: PersonId,
        age: AgeGroup,
        day: Day,
        now: Day,
        payload: Option<Box<dyn Any>>,
    ) -> EventId {
        let d = day.index();
        if d >= self.horizon {
            panic!(
                "event scheduling horizon exceeded: {day} >= {} (category {category:?})",
                self.horizon
            );
        }

        let id = self.pool.acquire();
        {
            let record = self.pool.get_mut(id);
            record.category = category;
            record.person = person;
            record.age = age;
            record.day = day;
            record.payload = payload;
        }

        let list = &mut self.lists[category.index()];
        if list.n_daily_current[d] > 0 {
            let old_head = list.heads[d];
            self.pool.get_mut(old_head).prev = id;
            self.pool.get_mut(id).next = old_head;
        }
        list.heads[d] = id;
        list.n_daily[d] += 1;
        list.n_daily_by_age[d][age.index()] += 1;
        list.n_daily_current[d] += 1;

        if day <= now {
            list.n_total += 1;
            list.n_current += 1;
            list.n_total_by_age[age.index()] += 1;
        }

        id
    }

    /// Unlink an event from its day bucket and return it to the pool.
    /// O(1); handles head-of-list and sole-element cases.
    pub fn remove(&mut self, id: EventId, now: Day) {
        let (category, day, age, next, prev) = {
            let record = self.pool.get(id);
            (record.category, record.day, record.age, record.next, record.prev)
        };
        let d = day.index();
        let list = &mut self.lists[category.index()];

        if list.n_daily_current[d] > 1 {
            if list.heads[d] != id {
                if next == EventId::INVALID {
                    self.pool.get_mut(prev).next = EventId::INVALID;
                } else {
                    self.pool.get_mut(prev).next = next;
                    self.pool.get_mut(next).prev = prev;
                }
            } else {
                list.heads[d] = next;
                self.pool.get_mut(next).prev = EventId::INVALID;
            }
        } else {
            list.heads[d] = EventId::INVALID;
        }

        let list = &mut self.lists[category.index()];
        if day <= now {
            list.n_current -= 1;
        }
        list.n_daily_current[d] -= 1;
        list.n_daily_by_age[d][age.index()] -= 1;

        self.pool.release(id);
    }

    /// Fold `now`'s pending counts into the live/cumulative totals.  Called
    /// exactly once per category per day, when `now` arrives.
    pub fn roll_day(&mut self, category: EventCategory, now: Day) {
        let d = now.index();
        if d >= self.horizon {
            return;
        }
        let list = &mut self.lists[category.index()];
        list.n_current += list.n_daily_current[d];
        list.n_total += list.n_daily[d];
        for band in 0..N_AGE_GROUPS {
            list.n_total_by_age[band] += list.n_daily_by_age[d][band];
        }
    }

    // ── Drain-walk primitives (used by the driver's dispatch loop) ────────

    /// Snapshot of `category`'s bucket for `day`: the head and the pending
    /// count *at this moment*.  Walking exactly `count` nodes from `head`
    /// (capturing `next` before each callback) visits the events queued
    /// before the walk began; same-day events enqueued *during* the walk are
    /// head-inserted and therefore not visited.
    pub fn drain_snapshot(&self, category: EventCategory, day: Day) -> (EventId, u64) {
        let d = day.index();
        if d >= self.horizon {
            return (EventId::INVALID, 0);
        }
        let list = &self.lists[category.index()];
        (list.heads[d], list.n_daily_current[d])
    }

    /// The next event in the same day bucket, `EventId::INVALID` at the end.
    #[inline]
    pub fn next_of(&self, id: EventId) -> EventId {
        self.pool.get(id).next
    }

    /// Read access to a pooled record (person, day, category).
    #[inline]
    pub fn record(&self, id: EventId) -> &EventRecord {
        self.pool.get(id)
    }

    /// Detach an event's payload so it can be lent to a handler while the
    /// store is mutably borrowed elsewhere.
    pub fn take_payload(&mut self, id: EventId) -> Option<Box<dyn Any>> {
        self.pool.get_mut(id).payload.take()
    }

    /// Re-attach a payload taken with [`EventStore::take_payload`].
    pub fn put_payload(&mut self, id: EventId, payload: Option<Box<dyn Any>>) {
        self.pool.get_mut(id).payload = payload;
    }

    // ── Counters surface ──────────────────────────────────────────────────

    /// Events still pending in `category`'s bucket for `day`.
    pub fn n_pending(&self, category: EventCategory, day: Day) -> u64 {
        let d = day.index();
        if d >= self.horizon {
            return 0;
        }
        self.lists[category.index()].n_daily_current[d]
    }

    /// Events ever scheduled in `category` for `day`.
    pub fn n_scheduled(&self, category: EventCategory, day: Day) -> u64 {
        let d = day.index();
        if d >= self.horizon {
            return 0;
        }
        self.lists[category.index()].n_daily[d]
    }

    /// Live events whose day has been reached.
    pub fn n_current(&self, category: EventCategory) -> u64 {
        self.lists[category.index()].n_current
    }

    /// Cumulative events whose day has been reached.
    pub fn n_total(&self, category: EventCategory) -> u64 {
        self.lists[category.index()].n_total
    }

    /// Cumulative per-age-band totals.
    pub fn n_total_by_age(&self, category: EventCategory) -> &[u64; N_AGE_GROUPS] {
        &self.lists[category.index()].n_total_by_age
    }

    /// Per-day, per-age-band pending counts for `day`.
    pub fn n_pending_by_age(&self, category: EventCategory, day: Day) -> &[u64; N_AGE_GROUPS] {
        &self.lists[category.index()].n_daily_by_age[day.index()]
    }

    /// Total pooled records (free and live) — provisioning diagnostics.
    pub fn pool_capacity(&self) -> usize {
        self.pool.capacity()
    }
}
