//! `Network` — one contact layer: metadata, edges, and (for member-random
//! networks) the pairing state needed to rebuild it daily.

use epi_core::{NetworkId, PersonId};

/// A network's interaction type.  Used by ledger consumers to classify the
/// interactions a network produces.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum NetworkKind {
    Household,
    Occupation,
    Random,
    Hospital,
    UserDefined,
}

/// How a network's edges come into existence, and whether they change daily.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Construction {
    /// Fixed edges loaded from demographic household data.
    Household,
    /// Watts-Strogatz ring lattice with rewiring, rebuilt on request.
    SmallWorld,
    /// Daily random pairing over the whole population's contact quotas.
    RandomDefault,
    /// Daily random pairing over an explicit member/quota list.
    RandomMembers,
    /// Fixed edges supplied by the caller.
    External,
}

/// An undirected contact edge.  The ledger records it as two directed
/// interactions, one per endpoint diary.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Edge {
    pub a: PersonId,
    pub b: PersonId,
}

/// Fractions below this are treated as "network off".
pub const MIN_ACTIVE_FRACTION: f64 = 1e-9;

/// One contact layer.
pub struct Network {
    pub id: NetworkId,
    pub name: String,
    pub kind: NetworkKind,
    pub construction: Construction,

    /// Skip interactions touching a hospitalised endpoint.
    pub skip_hospitalised: bool,
    /// Skip interactions touching a quarantined endpoint (unless the model
    /// runs soft quarantine).
    pub skip_quarantined: bool,
    /// Probability that an edge produces an interaction on a given day.
    pub daily_fraction: f64,

    /// The current day's edges.  Random networks overwrite this every
    /// rebuild; fixed networks set it once.
    pub edges: Vec<Edge>,

    // ── Member-random pairing state ───────────────────────────────────────
    /// Members of a `RandomMembers` network (empty otherwise).
    pub(crate) members: Vec<PersonId>,
    /// Per-member daily contact quota, parallel to `members`.
    pub(crate) member_quotas: Vec<u16>,
    /// Occurrence pool scratch, reused across daily rebuilds.
    pub(crate) occurrence_pool: Vec<PersonId>,
}

impl Network {
    pub fn new(id: NetworkId, name: impl Into<String>, kind: NetworkKind, construction: Construction) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
            construction,
            skip_hospitalised: false,
            skip_quarantined: false,
            daily_fraction: 1.0,
            edges: Vec::new(),
            members: Vec::new(),
            member_quotas: Vec::new(),
            occurrence_pool: Vec::new(),
        }
    }

    #[inline]
    pub fn n_edges(&self) -> usize {
        self.edges.len()
    }

    /// Whether this network produces interactions at all.  A deleted default
    /// network stays in the registry with its fraction zeroed.
    #[inline]
    pub fn is_active(&self) -> bool {
        self.daily_fraction >= MIN_ACTIVE_FRACTION
    }
}
