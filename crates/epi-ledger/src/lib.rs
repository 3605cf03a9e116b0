//! `epi-ledger` — the rolling interaction ledger.
//!
//! Records which pairs of people interacted on which network, for each of
//! the last `days_of_interaction_retention` days, in per-person diaries over
//! pre-provisioned block storage.  Contact tracing and transmission both
//! read these diaries; neither ever allocates on the hot path.

pub mod ledger;

#[cfg(test)]
mod tests;

pub use ledger::{DiaryIter, InterRef, InteractionLedger, InteractionRecord};
