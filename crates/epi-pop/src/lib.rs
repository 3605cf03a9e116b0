//! `epi-pop` — Structure-of-Arrays population storage.
//!
//! One [`PersonStore`] holds every per-person attribute the simulation
//! substrate consults, as parallel `Vec`s indexed by `PersonId`.  People are
//! created once at model setup and never destroyed; the mutable health flags
//! (`dead`, `hospitalised`, `quarantined`) are flipped by collaborator
//! transition logic and read by the interaction ledger's filters.

pub mod store;


pub use store::{PersonStore, PopError, PopResult, NO_OCCUPATION};
