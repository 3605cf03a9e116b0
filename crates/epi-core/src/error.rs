//! Substrate error type.
//!
//! Sub-crates define their own error enums and either convert into
//! `CoreError` via `From` impls or keep them separate.  The split between
//! recoverable and fatal conditions is deliberate: malformed *caller* input
//! is an `Err`; exhausted *static provisioning* (event horizon, ledger
//! blocks) panics with a diagnostic, because an undersized model cannot
//! self-correct mid-run.

use thiserror::Error;

/// The top-level error type for `epi-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for all `epi-*` crates.
pub type CoreResult<T> = Result<T, CoreError>;
