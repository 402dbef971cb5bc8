//! Runtime configuration for graph construction and route search.
//!
//! All structs implement `Default`; applications typically start from the
//! defaults and override individual fields from CLI flags or a JSON file
//! (with the `serde` feature enabled).

use std::time::Duration;

/// Top-level configuration bundle.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct NavConfig {
    pub graph:  GraphConfig,
    pub search: SearchConfig,
}

/// Controls which ways become part of the routable graph.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GraphConfig {
    /// Only route over ways whose `highway` tag is a drivable road class.
    /// Off by default: every valid way with two or more nodes is routable.
    pub highway_filter: bool,
}

/// Per-query search budget.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SearchConfig {
    /// Wall-clock budget for a single query.  `None` = unbounded.
    pub timeout_ms: Option<u64>,
}

impl SearchConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }
}
