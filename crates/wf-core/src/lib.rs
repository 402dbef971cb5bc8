//! `wf-core` — foundational types for the `wayfinder` routing workspace.
//!
//! This crate is a dependency of every other `wf-*` crate.  It has no `wf-*`
//! dependencies and minimal external ones (only `thiserror`, plus optional
//! `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `NodeId`, `WayId`, `NodeIdx`, `EdgeIdx`, `WayNameId`  |
//! | [`geo`]         | `GeoPoint`, haversine distance, bearing               |
//! | [`records`]     | `NodeRecord`, `WayRecord`, tag helpers                |
//! | [`config`]      | `NavConfig`, `GraphConfig`, `SearchConfig`            |
//! | [`error`]       | `CoreError`, `CoreResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod config;
pub mod error;
pub mod geo;
pub mod ids;
pub mod records;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{GraphConfig, NavConfig, SearchConfig};
pub use error::{CoreError, CoreResult};
pub use geo::{EARTH_RADIUS_MI, GeoPoint};
pub use ids::{EdgeIdx, NodeId, NodeIdx, WayId, WayNameId};
pub use records::{NodeRecord, Tags, WayRecord};
