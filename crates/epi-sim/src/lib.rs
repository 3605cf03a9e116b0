//! `epi-sim` — model aggregate and time-step driver.
//!
//! This crate wires the subsystems together:
//!
//! ```text
//! ModelBuilder ──► Model ◄──┬── HandlerTable   (per-category transitions)
//!                           └── DayHooks       (daily collaborator phases)
//!                    ▲
//!                    └── Simulation::step()    one day, fixed phase order
//! ```
//!
//! Disease dynamics, testing policy, and vaccination logic are *not* here —
//! they arrive as [`TransitionHandler`]s and [`DayHooks`] implementations.
//! The substrate guarantees the mechanics: networks rebuilt and recorded
//! before transmission, event buckets drained in a deterministic order, and
//! one RNG stream for the whole run.

pub mod builder;
pub mod error;
pub mod handler;
pub mod model;
pub mod step;


pub use builder::ModelBuilder;
pub use error::{SimError, SimResult};
pub use handler::{DayHooks, HandlerTable, NoHooks, TransitionHandler};
pub use model::{Counters, Model};
pub use step::Simulation;
