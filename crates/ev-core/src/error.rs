//! Framework error type.
//!
//! Sub-crates define their own error enums and either convert into `EvError`
//! via `From` impls or keep them separate and wrap `EvError` as one variant.
//! Both patterns are acceptable; prefer whichever keeps error sites clean.

use thiserror::Error;

use crate::{NodeId, VehicleId};

/// The top-level error type for `ev-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum EvError {
    #[error("vehicle {0} not found")]
    VehicleNotFound(VehicleId),

    #[error("node {0} not found")]
    NodeNotFound(NodeId),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for all `ev-*` crates.
pub type EvResult<T> = Result<T, EvError>;
