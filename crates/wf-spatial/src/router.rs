//! Routing trait and the default A* implementation.
//!
//! # Pluggability
//!
//! Callers route through the [`Router`] trait, so alternative engines can be
//! swapped in without touching the graph store.  Two implementations ship:
//!
//! | Router           | Heuristic                                  |
//! |------------------|--------------------------------------------|
//! | [`AStarRouter`]  | great-circle miles to the destination      |
//! | [`DijkstraRouter`] | none (uniform-cost search)               |
//!
//! Both run the generic engine in [`crate::search`] over [`RoadSearch`];
//! they return identical path costs and differ only in how many nodes they
//! expand.
//!
//! # Cost units
//!
//! Edge costs and route totals are great-circle **miles**.  The heuristic is
//! the straight great-circle distance to the destination, which never
//! exceeds the length of any road path there, so A* stays optimal.

use tracing::debug;

use wf_core::{GeoPoint, NodeId, NodeIdx, SearchConfig};

use crate::graph::RoadGraph;
use crate::search::{SearchFailure, SearchLimits, SearchProblem, Uninformed, astar};
use crate::{SpatialError, SpatialResult};

// ── Route ─────────────────────────────────────────────────────────────────────

/// The result of a routing query.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    /// Node ids from start to destination inclusive.
    pub nodes:       Vec<NodeId>,
    /// Sum of edge lengths along `nodes`, in miles.
    pub total_miles: f64,
    /// Nodes finalized by the search; a measure of work done.
    pub expanded:    usize,
}

impl Route {
    /// `true` if start and destination are the same node.
    pub fn is_trivial(&self) -> bool {
        self.nodes.len() <= 1
    }

    pub fn hop_count(&self) -> usize {
        self.nodes.len().saturating_sub(1)
    }
}

// ── Search problem over the road graph ────────────────────────────────────────

/// Road-graph state space for one destination.
pub struct RoadSearch<'g> {
    graph:    &'g RoadGraph,
    goal:     NodeIdx,
    goal_pos: GeoPoint,
}

impl<'g> RoadSearch<'g> {
    pub fn new(graph: &'g RoadGraph, goal: NodeIdx) -> Self {
        Self { graph, goal, goal_pos: graph.pos(goal) }
    }
}

impl SearchProblem for RoadSearch<'_> {
    type State = NodeIdx;

    fn successors(&self, state: NodeIdx) -> impl Iterator<Item = (NodeIdx, f64)> {
        self.graph.adjacent(state)
    }

    fn heuristic(&self, state: NodeIdx) -> f64 {
        self.graph.pos(state).distance_mi(self.goal_pos)
    }

    fn is_goal(&self, state: NodeIdx) -> bool {
        state == self.goal
    }
}

// ── Router trait ──────────────────────────────────────────────────────────────

/// Pluggable routing engine.
///
/// # Thread safety
///
/// Implementations must be `Send + Sync` so one router can serve queries
/// from many threads against a shared [`RoadGraph`].
pub trait Router: Send + Sync {
    /// Compute a route between two routable nodes.
    ///
    /// `from == to` yields a single-node route rather than an error.
    fn route(
        &self,
        graph: &RoadGraph,
        from: NodeId,
        to: NodeId,
        limits: &SearchLimits,
    ) -> SpatialResult<Route>;

    /// Snap both points to their closest routable nodes, then [`route`](Self::route).
    fn route_between(
        &self,
        graph: &RoadGraph,
        start: GeoPoint,
        dest: GeoPoint,
        limits: &SearchLimits,
    ) -> SpatialResult<Route> {
        let from = graph.closest(start.lon, start.lat)?;
        let to = graph.closest(dest.lon, dest.lat)?;
        debug!(%from, %to, %start, %dest, "snapped route endpoints");
        self.route(graph, from, to, limits)
    }
}

/// A* over great-circle distance.  The default router.
#[derive(Debug, Clone, Copy, Default)]
pub struct AStarRouter;

impl Router for AStarRouter {
    fn route(
        &self,
        graph: &RoadGraph,
        from: NodeId,
        to: NodeId,
        limits: &SearchLimits,
    ) -> SpatialResult<Route> {
        let (start, goal) = (graph.index_of(from)?, graph.index_of(to)?);
        let problem = RoadSearch::new(graph, goal);
        finish(graph, from, to, astar(&problem, start, limits))
    }
}

/// Uniform-cost search over the same graph; a reference for A*.
#[derive(Debug, Clone, Copy, Default)]
pub struct DijkstraRouter;

impl Router for DijkstraRouter {
    fn route(
        &self,
        graph: &RoadGraph,
        from: NodeId,
        to: NodeId,
        limits: &SearchLimits,
    ) -> SpatialResult<Route> {
        let (start, goal) = (graph.index_of(from)?, graph.index_of(to)?);
        let problem = RoadSearch::new(graph, goal);
        finish(graph, from, to, astar(&Uninformed(&problem), start, limits))
    }
}

fn finish(
    graph: &RoadGraph,
    from: NodeId,
    to: NodeId,
    result: Result<crate::search::SearchOutcome<NodeIdx>, SearchFailure>,
) -> SpatialResult<Route> {
    match result {
        Ok(outcome) => {
            debug!(
                %from,
                %to,
                hops = outcome.path.len().saturating_sub(1),
                miles = outcome.cost,
                expanded = outcome.expanded,
                "route found"
            );
            Ok(Route {
                nodes:       outcome.path.into_iter().map(|idx| graph.id_of(idx)).collect(),
                total_miles: outcome.cost,
                expanded:    outcome.expanded,
            })
        }
        Err(SearchFailure::Exhausted { expanded }) => {
            debug!(%from, %to, expanded, "frontier exhausted");
            Err(SpatialError::NoPath { from, to })
        }
        Err(SearchFailure::Cancelled) => Err(SpatialError::Cancelled),
        Err(SearchFailure::Timeout { elapsed }) => Err(SpatialError::Timeout {
            elapsed_ms: elapsed.as_millis() as u64,
        }),
    }
}

// ── Free-function entry points ────────────────────────────────────────────────

/// Shortest path between the nodes closest to two coordinates.
///
/// Returns node ids from start to destination inclusive.
///
/// # Errors
///
/// [`SpatialError::InvalidInput`] for malformed coordinates,
/// [`SpatialError::EmptyGraph`] if the graph has no nodes, and
/// [`SpatialError::NoPath`] if the two nodes are not connected.
pub fn shortest_path(
    graph: &RoadGraph,
    start_lon: f64,
    start_lat: f64,
    dest_lon: f64,
    dest_lat: f64,
) -> SpatialResult<Vec<NodeId>> {
    shortest_path_with(
        graph,
        GeoPoint::new(start_lon, start_lat),
        GeoPoint::new(dest_lon, dest_lat),
        &SearchLimits::unbounded(),
    )
}

/// Like [`shortest_path`] with a deadline and/or cancellation token.
pub fn shortest_path_with(
    graph: &RoadGraph,
    start: GeoPoint,
    dest: GeoPoint,
    limits: &SearchLimits,
) -> SpatialResult<Vec<NodeId>> {
    AStarRouter
        .route_between(graph, start, dest, limits)
        .map(|route| route.nodes)
}

/// Route a batch of `(start, dest)` queries, each under its own limits
/// derived from `config`.  Results are in query order.
///
/// With the `parallel` feature the batch runs on the Rayon pool; every query
/// allocates its own search state, so no locking is involved.
pub fn route_many<R: Router>(
    router: &R,
    graph: &RoadGraph,
    queries: &[(GeoPoint, GeoPoint)],
    config: &SearchConfig,
) -> Vec<SpatialResult<Route>> {
    let run = |&(start, dest): &(GeoPoint, GeoPoint)| {
        router.route_between(graph, start, dest, &SearchLimits::from_config(config))
    };

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        queries.par_iter().map(run).collect()
    }

    #[cfg(not(feature = "parallel"))]
    {
        queries.iter().map(run).collect()
    }
}
