//! `InteractionLedger` — who met whom, for each of the last N days.
//!
//! # Layout
//!
//! A ring of `retention` day slots.  Each slot owns a chain of
//! pre-provisioned [`InteractionBlock`]s (bump-allocated, never freed) plus
//! one diary head and count per person.  Recording an edge writes *two*
//! records, one into each endpoint's diary, linked by [`InterRef`] indices
//! rather than pointers.
//!
//! Rotating to a new day reuses the oldest slot: block cursors rewind and
//! diaries reset, but the block storage itself is kept for the whole run.
//!
//! # Capacity
//!
//! Blocks are sized at provisioning time from the networks' expected daily
//! interaction counts.  Running a slot's chain dry mid-record is a fatal
//! provisioning error, not a recoverable one — see [`InteractionLedger::record_network`].

use epi_core::{Day, NetworkId, PersonId, SimRng};
use epi_net::network::{Network, NetworkKind};
use epi_pop::PersonStore;

/// Index of one interaction record: block index within the day slot's chain,
/// record index within the block.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct InterRef {
    block: u32,
    idx: u32,
}

impl InterRef {
    pub const INVALID: InterRef = InterRef { block: u32::MAX, idx: u32::MAX };

    #[inline]
    pub fn is_valid(self) -> bool {
        self != Self::INVALID
    }
}

/// One recorded interaction, from one endpoint's point of view.
#[derive(Debug, Copy, Clone)]
pub struct InteractionRecord {
    pub network: NetworkId,
    pub kind: NetworkKind,
    pub partner: PersonId,
    /// Whether the app could trace this contact; `None` until a tracing
    /// collaborator resolves it.
    pub traceable: Option<bool>,
    /// As above, for manual contact tracing.
    pub manual_traceable: Option<bool>,
    /// Next record in the same person's diary for the same day.
    pub(crate) next: InterRef,
}

/// A bump-allocated run of records.
struct InteractionBlock {
    records: Vec<InteractionRecord>,
    cursor: usize,
}

impl InteractionBlock {
    fn new(capacity: usize) -> Self {
        let filler = InteractionRecord {
            network: NetworkId::INVALID,
            kind: NetworkKind::Random,
            partner: PersonId::INVALID,
            traceable: None,
            manual_traceable: None,
            next: InterRef::INVALID,
        };
        Self { records: vec![filler; capacity], cursor: 0 }
    }
}

/// One day's worth of storage: the block chain plus per-person diaries.
struct DaySlot {
    blocks: Vec<InteractionBlock>,
    /// Head of each person's diary; `InterRef::INVALID` = no interactions.
    heads: Vec<InterRef>,
    /// Diary length per person.
    counts: Vec<u32>,
}

impl DaySlot {
    fn new(n_total: usize) -> Self {
        Self {
            blocks: Vec::new(),
            heads: vec![InterRef::INVALID; n_total],
            counts: vec![0; n_total],
        }
    }

    fn reset(&mut self) {
        for block in &mut self.blocks {
            block.cursor = 0;
        }
        self.heads.fill(InterRef::INVALID);
        self.counts.fill(0);
    }

    /// Bump-allocate a record slot, walking the block chain.
    fn alloc(&mut self) -> Option<InterRef> {
        for (b, block) in self.blocks.iter_mut().enumerate() {
            if block.cursor < block.records.len() {
                let r = InterRef { block: b as u32, idx: block.cursor as u32 };
                block.cursor += 1;
                return Some(r);
            }
        }
        None
    }

    fn get(&self, r: InterRef) -> &InteractionRecord {
        &self.blocks[r.block as usize].records[r.idx as usize]
    }

    fn get_mut(&mut self, r: InterRef) -> &mut InteractionRecord {
        &mut self.blocks[r.block as usize].records[r.idx as usize]
    }

    fn used(&self) -> usize {
        self.blocks.iter().map(|b| b.cursor).sum()
    }
}

/// The rolling interaction ledger.
pub struct InteractionLedger {
    slots: Vec<DaySlot>,
    /// Ring index of today's slot.
    current: usize,
    retention: usize,
}

impl InteractionLedger {
    /// A ledger retaining `retention` days of diaries for `n_total` people.
    /// Starts with no block storage; call
    /// [`InteractionLedger::provision`] before the first record.
    pub fn new(n_total: usize, retention: usize) -> Self {
        Self {
            slots: (0..retention.max(1)).map(|_| DaySlot::new(n_total)).collect(),
            current: 0,
            retention: retention.max(1),
        }
    }

    #[inline]
    pub fn retention(&self) -> usize {
        self.retention
    }

    /// Append a block of `capacity` records to every day slot's chain.
    /// Called once at model build, and again whenever a user network is
    /// added mid-run.
    pub fn provision(&mut self, capacity: usize) {
        if capacity == 0 {
            return;
        }
        for slot in &mut self.slots {
            slot.blocks.push(InteractionBlock::new(capacity));
        }
        log::debug!(
            "ledger provisioned: +{capacity} records/day, {} total",
            self.slots[0].blocks.iter().map(|b| b.records.len()).sum::<usize>()
        );
    }

    /// Advance the ring to a new day, recycling the oldest slot.
    pub fn rotate_day(&mut self) {
        self.current = (self.current + 1) % self.retention;
        self.slots[self.current].reset();
    }

    /// Record today's interactions for one network's edges.
    ///
    /// Per-edge filters, applied in order:
    /// 1. either endpoint dead → drop;
    /// 2. the network skips hospitalised and either endpoint is → drop;
    /// 3. Bernoulli drop with probability `1 − daily_fraction`;
    /// 4. the network skips quarantined, soft quarantine is off, and either
    ///    endpoint is quarantined → drop.
    ///
    /// Surviving edges write one record into each endpoint's diary.
    ///
    /// # Panics
    /// Panics when the day slot's block chain is exhausted: the ledger was
    /// provisioned for fewer interactions than the networks produce, which
    /// cannot be corrected mid-run.
    pub fn record_network(
        &mut self,
        net: &Network,
        population: &PersonStore,
        soft_quarantine: bool,
        rng: &mut SimRng,
    ) {
        if !net.is_active() {
            return;
        }
        let sample_fraction = net.daily_fraction < 1.0;

        for edge in &net.edges {
            if population.is_dead(edge.a) || population.is_dead(edge.b) {
                continue;
            }
            if net.skip_hospitalised
                && (population.is_hospitalised(edge.a) || population.is_hospitalised(edge.b))
            {
                continue;
            }
            if sample_fraction && !rng.gen_bool(net.daily_fraction) {
                continue;
            }
            if net.skip_quarantined
                && !soft_quarantine
                && (population.is_quarantined(edge.a) || population.is_quarantined(edge.b))
            {
                continue;
            }

            self.push_record(net, edge.a, edge.b);
            self.push_record(net, edge.b, edge.a);
        }
    }

    fn push_record(&mut self, net: &Network, owner: PersonId, partner: PersonId) {
        let slot = &mut self.slots[self.current];
        let Some(r) = slot.alloc() else {
            panic!(
                "interaction ledger exhausted while recording network {} ({}): \
                 provisioned for {} records/day",
                net.id,
                net.name,
                slot.blocks.iter().map(|b| b.records.len()).sum::<usize>()
            );
        };
        let head = slot.heads[owner.index()];
        *slot.get_mut(r) = InteractionRecord {
            network: net.id,
            kind: net.kind,
            partner,
            traceable: None,
            manual_traceable: None,
            next: head,
        };
        slot.heads[owner.index()] = r;
        slot.counts[owner.index()] += 1;
    }

    // ── Queries ───────────────────────────────────────────────────────────

    /// Number of interactions in `person`'s diary today.
    pub fn daily_count(&self, person: PersonId) -> u32 {
        self.slots[self.current].counts[person.index()]
    }

    /// Number of interactions in `person`'s diary `lag` days ago.
    /// `lag` must be `< retention`; day slots older than the retention
    /// window have been recycled.
    pub fn daily_count_at_lag(&self, person: PersonId, lag: usize) -> u32 {
        self.slots[self.slot_at_lag(lag)].counts[person.index()]
    }

    /// Iterate `person`'s diary for today, most recent first.
    pub fn interactions(&self, person: PersonId) -> DiaryIter<'_> {
        self.interactions_at_lag(person, 0)
    }

    /// Iterate `person`'s diary `lag` days ago, most recent first.
    pub fn interactions_at_lag(&self, person: PersonId, lag: usize) -> DiaryIter<'_> {
        let slot = &self.slots[self.slot_at_lag(lag)];
        DiaryIter { slot, next: slot.heads[person.index()] }
    }

    /// Visit `person`'s diary for today mutably — tracing collaborators use
    /// this to resolve the traceability flags on each contact.
    pub fn interactions_mut(&mut self, person: PersonId, visit: impl FnMut(&mut InteractionRecord)) {
        self.interactions_mut_at_lag(person, 0, visit);
    }

    /// Mutable diary visit `lag` days ago, most recent first.
    pub fn interactions_mut_at_lag(
        &mut self,
        person: PersonId,
        lag: usize,
        mut visit: impl FnMut(&mut InteractionRecord),
    ) {
        let idx = self.slot_at_lag(lag);
        let slot = &mut self.slots[idx];
        let mut next = slot.heads[person.index()];
        while next.is_valid() {
            let record = slot.get_mut(next);
            next = record.next;
            visit(record);
        }
    }

    /// The day a diary at `lag` was recorded, given today's date.
    pub fn day_at_lag(&self, today: Day, lag: usize) -> Option<Day> {
        (lag < self.retention && lag as u32 <= today.index() as u32)
            .then(|| Day(today.index() as u32 - lag as u32))
    }

    /// Total records written into today's slot (both diary directions).
    pub fn total_recorded(&self) -> usize {
        self.slots[self.current].used()
    }

    fn slot_at_lag(&self, lag: usize) -> usize {
        debug_assert!(lag < self.retention);
        (self.current + self.retention - lag) % self.retention
    }
}

/// Iterator over one person's diary for one day.
pub struct DiaryIter<'a> {
    slot: &'a DaySlot,
    next: InterRef,
}

impl<'a> Iterator for DiaryIter<'a> {
    type Item = &'a InteractionRecord;

    fn next(&mut self) -> Option<Self::Item> {
        if !self.next.is_valid() {
            return None;
        }
        let record = self.slot.get(self.next);
        self.next = record.next;
        Some(record)
    }
}
