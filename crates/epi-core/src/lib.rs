//! `epi-core` — foundational types for the `rust_epi` simulation substrate.
//!
//! This crate is a dependency of every other `epi-*` crate.  It intentionally
//! has no `epi-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `PersonId`, `NetworkId`, `EventId`, `AgeGroup`        |
//! | [`day`]         | `Day` — the simulated-day counter                     |
//! | [`rng`]         | `SimRng` — the single shared generator                |
//! | [`config`]      | `ModelConfig`, `OccupationNetworkSpec`                |
//! | [`contact_set`] | `ContactSet` — Robin-Hood open-addressed integer set  |
//! | [`error`]       | `CoreError`, `CoreResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod config;
pub mod contact_set;
pub mod day;
pub mod error;
pub mod ids;
pub mod rng;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{ModelConfig, OccupationNetworkSpec};
pub use contact_set::ContactSet;
pub use day::Day;
pub use error::{CoreError, CoreResult};
pub use ids::{AgeGroup, EventId, NetworkId, PersonId, N_AGE_GROUPS};
pub use rng::SimRng;
