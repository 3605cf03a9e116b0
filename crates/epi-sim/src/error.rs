//! Model-level error type: the union of the subsystems' caller-input errors
//! plus the builder's own checks.

use thiserror::Error;

use epi_core::CoreError;
use epi_net::NetError;
use epi_pop::PopError;

#[derive(Debug, Error)]
pub enum SimError {
    #[error(transparent)]
    Config(#[from] CoreError),

    #[error(transparent)]
    Population(#[from] PopError),

    #[error(transparent)]
    Network(#[from] NetError),

    #[error("population store holds {got} people but the config declares {expected}")]
    PopulationSizeMismatch { expected: usize, got: usize },
}

pub type SimResult<T> = Result<T, SimError>;
