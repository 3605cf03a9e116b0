//! Event categories — one day-bucketed list per variant.
//!
//! The order of `ALL` is not the dispatch order; the time-step driver owns
//! its own fixed drain sequence.  This enum only provides stable indices for
//! the per-category list array and counters surface.

/// A class of per-person state transition with its own day-bucketed list.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EventCategory {
    // ── Disease progression ───────────────────────────────────────────────
    Symptomatic,
    SymptomaticMild,
    Hospitalised,
    Critical,
    HospitalisedRecovering,
    Recovered,
    Susceptible,
    Death,

    // ── Hospital flow (active only with the hospital slot enabled) ────────
    Discharged,
    Mortuary,
    Waiting,
    General,
    Icu,

    // ── Testing and tracing (drained to a fixed point daily) ──────────────
    TestTake,
    TestResult,
    ManualContactTracing,

    // ── Vaccination (payload-carrying) ────────────────────────────────────
    VaccineProtect,
    VaccineWane,

    // ── Quarantine bookkeeping ────────────────────────────────────────────
    QuarantineRelease,
    TraceTokenRelease,
    Quarantined,
}

/// Number of event categories (length of the per-category list array).
pub const N_EVENT_CATEGORIES: usize = 21;

impl EventCategory {
    /// Every category, in index order.
    pub const ALL: [EventCategory; N_EVENT_CATEGORIES] = [
        EventCategory::Symptomatic,
        EventCategory::SymptomaticMild,
        EventCategory::Hospitalised,
        EventCategory::Critical,
        EventCategory::HospitalisedRecovering,
        EventCategory::Recovered,
        EventCategory::Susceptible,
        EventCategory::Death,
        EventCategory::Discharged,
        EventCategory::Mortuary,
        EventCategory::Waiting,
        EventCategory::General,
        EventCategory::Icu,
        EventCategory::TestTake,
        EventCategory::TestResult,
        EventCategory::ManualContactTracing,
        EventCategory::VaccineProtect,
        EventCategory::VaccineWane,
        EventCategory::QuarantineRelease,
        EventCategory::TraceTokenRelease,
        EventCategory::Quarantined,
    ];

    /// Stable index into the per-category list array.
    #[inline(always)]
    pub fn index(self) -> usize {
        self as usize
    }
}
