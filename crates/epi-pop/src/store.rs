//! Core population storage: `PersonStore` (SoA data).

use thiserror::Error;

use epi_core::{AgeGroup, PersonId};

/// Errors produced by `epi-pop`.
#[derive(Debug, Error)]
pub enum PopError {
    #[error("{what} length {got} does not match population size {expected}")]
    CountMismatch {
        expected: usize,
        got:      usize,
        what:     &'static str,
    },
}

pub type PopResult<T> = Result<T, PopError>;

/// Structure-of-Arrays storage for all per-person state the substrate reads.
///
/// Every `Vec` field has exactly `count` elements; the `PersonId` value is
/// the index into all of them:
///
/// ```ignore
/// let band = store.age_group[person.index()];  // O(1), cache-friendly
/// ```
///
/// The three health flags are the *only* disease state the core consults
/// (the interaction ledger's filters).  The epidemiological transitions that
/// flip them live outside this workspace and mutate the store through the
/// setters below.
pub struct PersonStore {
    /// Number of people.  Equals the length of every SoA `Vec`.
    pub count: usize,

    // ── Static attributes (set once at model construction) ────────────────
    /// Age band, used for the per-age-group event counters.
    pub age_group: Vec<AgeGroup>,

    /// Occupation-network class index; `u16::MAX` means "no occupation
    /// network" (e.g. not in the workforce).
    pub occupation: Vec<u16>,

    /// Per-day random-contact quota: how many occurrences this person
    /// contributes to the random-pairing pool.
    pub random_interactions: Vec<u16>,

    /// Whether this person participates in the proximity-scoring app.
    pub app_user: Vec<bool>,

    // ── Mutable health flags (flipped daily by collaborator logic) ────────
    pub dead:         Vec<bool>,
    pub hospitalised: Vec<bool>,
    pub quarantined:  Vec<bool>,
}

/// Class value meaning "not a member of any occupation network".
pub const NO_OCCUPATION: u16 = u16::MAX;

impl PersonStore {
    /// Allocate a store of `count` people with neutral defaults: age band 0,
    /// no occupation network, no random contacts, no app, all flags clear.
    pub fn new(count: usize) -> Self {
        Self {
            count,
            age_group:           vec![AgeGroup::default(); count],
            occupation:          vec![NO_OCCUPATION; count],
            random_interactions: vec![0; count],
            app_user:            vec![false; count],
            dead:                vec![false; count],
            hospitalised:        vec![false; count],
            quarantined:         vec![false; count],
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Iterator over all `PersonId`s in ascending index order.
    pub fn person_ids(&self) -> impl Iterator<Item = PersonId> + '_ {
        (0..self.count as u32).map(PersonId)
    }

    // ── Per-person accessors ──────────────────────────────────────────────

    #[inline]
    pub fn age_of(&self, person: PersonId) -> AgeGroup {
        self.age_group[person.index()]
    }

    #[inline]
    pub fn is_dead(&self, person: PersonId) -> bool {
        self.dead[person.index()]
    }

    #[inline]
    pub fn is_hospitalised(&self, person: PersonId) -> bool {
        self.hospitalised[person.index()]
    }

    #[inline]
    pub fn is_quarantined(&self, person: PersonId) -> bool {
        self.quarantined[person.index()]
    }

    #[inline]
    pub fn is_app_user(&self, person: PersonId) -> bool {
        self.app_user[person.index()]
    }

    #[inline]
    pub fn set_dead(&mut self, person: PersonId, value: bool) {
        self.dead[person.index()] = value;
    }

    #[inline]
    pub fn set_hospitalised(&mut self, person: PersonId, value: bool) {
        self.hospitalised[person.index()] = value;
    }

    #[inline]
    pub fn set_quarantined(&mut self, person: PersonId, value: bool) {
        self.quarantined[person.index()] = value;
    }

    // ── Bulk loaders (model construction) ─────────────────────────────────

    pub fn set_age_groups(&mut self, bands: Vec<AgeGroup>) -> PopResult<()> {
        self.checked_assign(bands, "age groups", |store, v| store.age_group = v)
    }

    pub fn set_occupations(&mut self, classes: Vec<u16>) -> PopResult<()> {
        self.checked_assign(classes, "occupation classes", |store, v| store.occupation = v)
    }

    pub fn set_random_interactions(&mut self, quotas: Vec<u16>) -> PopResult<()> {
        self.checked_assign(quotas, "random-interaction quotas", |store, v| {
            store.random_interactions = v
        })
    }

    pub fn set_app_users(&mut self, flags: Vec<bool>) -> PopResult<()> {
        self.checked_assign(flags, "app-user flags", |store, v| store.app_user = v)
    }

    fn checked_assign<T>(
        &mut self,
        values: Vec<T>,
        what: &'static str,
        assign: impl FnOnce(&mut Self, Vec<T>),
    ) -> PopResult<()> {
        if values.len() != self.count {
            return Err(PopError::CountMismatch {
                expected: self.count,
                got:      values.len(),
                what,
            });
        }
        assign(self, values);
        Ok(())
    }

    /// Members of one occupation class, in ascending person order.
    pub fn occupation_members(&self, class: u16) -> Vec<PersonId> {
        self.person_ids()
            .filter(|p| self.occupation[p.index()] == class)
            .collect()
    }

    /// Sum of every person's random-contact quota — the occurrence-pool size
    /// the random network needs.
    pub fn total_random_quota(&self) -> usize {
        self.random_interactions.iter().map(|&q| q as usize).sum()
    }
}
