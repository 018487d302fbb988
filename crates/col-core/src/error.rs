//! Framework error type.
//!
//! Higher crates define their own enums and wrap `CoreError` as one variant
//! where they need to surface it.

use thiserror::Error;

use crate::{AgentId, FactionId};

/// The base error type shared by the `col-*` crates.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("agent {0} not found")]
    AgentNotFound(AgentId),

    #[error("faction {0} not found")]
    FactionNotFound(FactionId),

    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for `col-core`.
pub type CoreResult<T> = Result<T, CoreError>;
