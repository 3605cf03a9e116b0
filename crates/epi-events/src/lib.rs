//! `epi-events` — pooled event records and day-bucketed category lists.
//!
//! # Shape of the subsystem
//!
//! ```text
//! EventStore
//! ├── EventPool          arena + free list of recycled EventRecords
//! └── one EventList per  day-indexed bucket heads + the two counter
//!     EventCategory      families (per-day and now-relative totals)
//! ```
//!
//! Scheduling (`append`) and cancellation (`remove`) are O(1) against
//! pre-allocated storage; the pool grows in geometric blocks and never
//! shrinks.  The per-day drain loop lives in `epi-sim`, built on the
//! snapshot/walk primitives exposed here.

pub mod category;
pub mod list;
pub mod pool;

#[cfg(test)]
mod tests;

pub use category::{EventCategory, N_EVENT_CATEGORIES};
pub use list::EventStore;
pub use pool::{EventPool, EventRecord};
