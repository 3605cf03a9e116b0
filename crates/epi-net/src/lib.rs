//! `epi-net` — contact-network layer.
//!
//! | module        | contents                                              |
//! |---------------|-------------------------------------------------------|
//! | `network`     | `Network`, `Edge`, kind/construction enums            |
//! | `registry`    | default slots + user networks, id allocation          |
//! | `random`      | occurrence-pool shuffle-and-pair rebuilds             |
//! | `small_world` | Watts-Strogatz occupation-network construction        |
//! | `novid`       | multi-hop adjacency for proximity scoring             |

pub mod error;
pub mod network;
pub mod novid;
pub mod random;
pub mod registry;
pub mod small_world;

#[cfg(test)]
mod tests;

pub use error::{NetError, NetResult};
pub use network::{Construction, Edge, Network, NetworkKind, MIN_ACTIVE_FRACTION};
pub use novid::{build_novid_adjacency, NovidAdjacency};
pub use random::{build_random_default, build_random_members, pair_occurrences};
pub use registry::NetworkRegistry;
pub use small_world::build_small_world;
