//! `wf-spatial` — road graph store, A* routing, and turn-by-turn directions.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                    |
//! |----------------|-------------------------------------------------------------|
//! | [`graph`]      | `RoadGraph` (CSR + R-tree), `GraphBuilder`, `build_graph`   |
//! | [`search`]     | generic A* engine, `SearchLimits`, `CancelToken`            |
//! | [`router`]     | `Router` trait, `AStarRouter`, `DijkstraRouter`, `shortest_path` |
//! | [`directions`] | `Maneuver`, `Direction`, `directions`                       |
//! | [`loader`]     | CSV node/way table loaders                                  |
//! | [`error`]      | `SpatialError`, `SpatialResult<T>`                          |
//!
//! # Feature flags
//!
//! | Flag       | Effect                                                    |
//! |------------|-----------------------------------------------------------|
//! | `parallel` | `route_many` runs queries on the Rayon pool.              |
//! | `serde`    | Derives `Serialize`/`Deserialize` on public types.        |

pub mod directions;
pub mod error;
pub mod graph;
pub mod loader;
pub mod router;
pub mod search;


pub use directions::{Direction, Maneuver, UNKNOWN_ROAD, directions};
pub use error::{SpatialError, SpatialResult};
pub use graph::{BuildReport, GraphBuilder, RoadGraph, build_graph, build_graph_with};
pub use router::{
    AStarRouter, DijkstraRouter, Route, Router, route_many, shortest_path, shortest_path_with,
};
pub use search::{CancelToken, SearchLimits};
