//! `EventPool` — a free-list-backed arena of reusable event records.
//!
//! # Why an arena
//!
//! Events are scheduled and cancelled millions of times per run.  Records
//! are acquired from and released to a free list threaded through the arena
//! itself; the arena only ever grows (in geometrically sized blocks) and no
//! record is deallocated until the model is dropped, so steady-state
//! scheduling performs zero heap traffic.
//!
//! Records are addressed by [`EventId`] — an index into the arena — rather
//! than pointers; the intrusive `next`/`prev` links are indices too.

use std::any::Any;

use epi_core::{AgeGroup, Day, EventId, PersonId};

use crate::EventCategory;

/// One pooled event record.
///
/// A record is a member of exactly one list at any time: either a category's
/// day bucket (via `next`/`prev`) or the pool's free list (via `next`).
pub struct EventRecord {
    pub category: EventCategory,
    pub person:   PersonId,
    /// The person's age band at scheduling time; keyed into the per-age
    /// counters on both append and removal.
    pub age:      AgeGroup,
    pub day:      Day,
    /// Opaque payload handed to the transition handler, cleared on release.
    pub payload:  Option<Box<dyn Any>>,
    pub(crate) next: EventId,
    pub(crate) prev: EventId,
}

impl EventRecord {
    fn blank() -> Self {
        Self {
            category: EventCategory::Symptomatic,
            person:   PersonId::INVALID,
            age:      AgeGroup::default(),
            day:      Day::ZERO,
            payload:  None,
            next:     EventId::INVALID,
            prev:     EventId::INVALID,
        }
    }
}

/// Arena of recycled [`EventRecord`]s.
pub struct EventPool {
    records:   Vec<EventRecord>,
    free_head: EventId,
    /// Population size — block growth is expressed as events per person.
    population: usize,
}

/// Initial provisioning: one pooled event per person.
const INITIAL_EVENTS_PER_PERSON: f64 = 1.0;
/// Refill blocks are half a population's worth each time the pool runs dry.
const REFILL_EVENTS_PER_PERSON: f64 = 0.5;

impl EventPool {
    pub fn new(population: usize) -> Self {
        let mut pool = Self {
            records:   Vec::new(),
            free_head: EventId::INVALID,
            population,
        };
        pool.add_block(INITIAL_EVENTS_PER_PERSON);
        pool
    }

    /// Total records ever allocated (free and live).
    pub fn capacity(&self) -> usize {
        self.records.len()
    }

    /// Pop a record off the free list, growing the pool if it is empty.
    /// The returned record has cleared links and no payload.
    pub fn acquire(&mut self) -> EventId {
        if self.free_head == EventId::INVALID {
            self.add_block(REFILL_EVENTS_PER_PERSON);
        }
        let id = self.free_head;
        let record = &mut self.records[id.index()];
        self.free_head = record.next;
        record.next = EventId::INVALID;
        record.prev = EventId::INVALID;
        id
    }

    /// Push a record back onto the free list.  O(1), no deallocation; the
    /// payload is dropped so recycled records carry nothing across uses.
    pub fn release(&mut self, id: EventId) {
        let head = self.free_head;
        let record = &mut self.records[id.index()];
        record.payload = None;
        record.prev = EventId::INVALID;
        record.next = head;
        self.free_head = id;
    }

    #[inline]
    pub fn get(&self, id: EventId) -> &EventRecord {
        &self.records[id.index()]
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, id: EventId) -> &mut EventRecord {
        &mut self.records[id.index()]
    }

    /// Append a block of `events_per_person × population` blank records and
    /// thread them onto the free list.
    fn add_block(&mut self, events_per_person: f64) {
        let n_events = ((self.population as f64 * events_per_person).ceil() as usize).max(1);
        let start = self.records.len();
        self.records.reserve(n_events);
        for offset in 0..n_events {
            let mut record = EventRecord::blank();
            // Chain each new record onto the front of the free list.
            record.next = if offset == 0 {
                self.free_head
            } else {
                EventId((start + offset - 1) as u32)
            };
            self.records.push(record);
        }
        self.free_head = EventId((start + n_events - 1) as u32);
    }
}
