//! Spatial-subsystem error type.

use thiserror::Error;

use wf_core::{CoreError, NodeId};

/// Errors produced by `wf-spatial`.
#[derive(Debug, Error)]
pub enum SpatialError {
    #[error("node {0} not found in graph")]
    NodeNotFound(NodeId),

    #[error("graph has no routable nodes")]
    EmptyGraph,

    #[error("no path from {from} to {to}")]
    NoPath { from: NodeId, to: NodeId },

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("search timed out after {elapsed_ms} ms")]
    Timeout { elapsed_ms: u64 },

    #[error("search cancelled")]
    Cancelled,

    #[error("table parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<CoreError> for SpatialError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::InvalidCoordinate { .. } => SpatialError::InvalidInput(err.to_string()),
            CoreError::Parse(msg) => SpatialError::Parse(msg),
        }
    }
}

pub type SpatialResult<T> = Result<T, SpatialError>;
