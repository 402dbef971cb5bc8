//! Core error type.
//!
//! Sub-crates define their own error enums and convert `CoreError` into them
//! via `From` impls.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid coordinate (lon {lon}, lat {lat})")]
    InvalidCoordinate { lon: f64, lat: f64 },

    #[error("parse error: {0}")]
    Parse(String),
}

/// Shorthand result type for `wf-core`.
pub type CoreResult<T> = Result<T, CoreError>;
