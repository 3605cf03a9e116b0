//! Network-subsystem error type.
//!
//! Everything here is an *invalid external input* error: the operation is
//! rejected, the registry is left unchanged, and the run continues.

use thiserror::Error;

use epi_core::{NetworkId, PersonId};

/// Errors produced by `epi-net`.
#[derive(Debug, Error)]
pub enum NetError {
    #[error("edge ({0}, {1}) references a person outside the population")]
    EdgeOutOfRange(PersonId, PersonId),

    #[error("edge connects {0} to itself")]
    SelfLoop(PersonId),

    #[error("member {0} is outside the population")]
    MemberOutOfRange(PersonId),

    #[error("member list length {members} does not match quota list length {quotas}")]
    MemberQuotaMismatch { members: usize, quotas: usize },

    #[error("network member count {got} exceeds population size {population}")]
    TooManyMembers { got: usize, population: usize },

    #[error("daily fraction {0} is outside [0, 1]")]
    InvalidFraction(f64),

    #[error("no network with id {0}")]
    UnknownNetwork(NetworkId),
}

pub type NetResult<T> = Result<T, NetError>;
