//! Turn-by-turn directions from a node path.
//!
//! [`directions`] walks a path edge by edge and groups consecutive edges that
//! stay on the same named way into one [`Maneuver`].  When the way changes,
//! the new maneuver's [`Direction`] comes from the signed change in bearing
//! between the edge arriving at the turn node and the edge leaving it:
//!
//! | \|Δ\| (degrees) | Direction            |
//! |-----------------|----------------------|
//! | ≤ 15            | `Straight`           |
//! | ≤ 30            | `SlightLeft/Right`   |
//! | ≤ 100           | `Left/Right`         |
//! | > 100           | `SharpLeft/Right`    |
//!
//! Δ is positive for clockwise (rightward) turns.  The first maneuver is
//! always `Start`.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use wf_core::geo::normalize_delta;
use wf_core::{NodeId, NodeIdx, WayNameId};

use crate::graph::RoadGraph;
use crate::{SpatialError, SpatialResult};

/// Way name reported for segments with no common named way.
pub const UNKNOWN_ROAD: &str = "unknown road";

const STRAIGHT_MAX_DEG: f64 = 15.0;
const SLIGHT_MAX_DEG: f64 = 30.0;
const TURN_MAX_DEG: f64 = 100.0;

// ── Direction ─────────────────────────────────────────────────────────────────

/// Maneuver kind.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    Start,
    Straight,
    SlightLeft,
    SlightRight,
    Left,
    Right,
    SharpLeft,
    SharpRight,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::Start,
        Direction::Straight,
        Direction::SlightLeft,
        Direction::SlightRight,
        Direction::Left,
        Direction::Right,
        Direction::SharpLeft,
        Direction::SharpRight,
    ];

    /// Classify a turn from the signed bearing change in degrees.
    pub fn from_turn(delta_deg: f64) -> Direction {
        let delta = normalize_delta(delta_deg);
        let left = delta < 0.0;
        let magnitude = delta.abs();
        if magnitude <= STRAIGHT_MAX_DEG {
            Direction::Straight
        } else if magnitude <= SLIGHT_MAX_DEG {
            if left { Direction::SlightLeft } else { Direction::SlightRight }
        } else if magnitude <= TURN_MAX_DEG {
            if left { Direction::Left } else { Direction::Right }
        } else if left {
            Direction::SharpLeft
        } else {
            Direction::SharpRight
        }
    }

    /// Instruction phrase, e.g. `"Turn left"`.
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Start       => "Start",
            Direction::Straight    => "Go straight",
            Direction::SlightLeft  => "Slight left",
            Direction::SlightRight => "Slight right",
            Direction::Left        => "Turn left",
            Direction::Right       => "Turn right",
            Direction::SharpLeft   => "Sharp left",
            Direction::SharpRight  => "Sharp right",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = SpatialError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Direction::ALL
            .into_iter()
            .find(|d| d.as_str() == s)
            .ok_or_else(|| SpatialError::Parse(format!("unknown direction {s:?}")))
    }
}

// ── Maneuver ──────────────────────────────────────────────────────────────────

/// One instruction: which way to go, on which way, and for how far.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Maneuver {
    pub direction:      Direction,
    pub way:            String,
    pub distance_miles: f64,
}

impl fmt::Display for Maneuver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} on {} and continue for {:.3} miles.",
            self.direction, self.way, self.distance_miles
        )
    }
}

impl FromStr for Maneuver {
    type Err = SpatialError;

    /// Parse the [`Display`](fmt::Display) form back into a maneuver.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || SpatialError::Parse(format!("malformed maneuver {s:?}"));

        let body = s.trim().strip_suffix(" miles.").ok_or_else(malformed)?;
        let (head, miles) = body.rsplit_once(" and continue for ").ok_or_else(malformed)?;
        let (label, way) = head.split_once(" on ").ok_or_else(malformed)?;

        let distance_miles: f64 = miles.parse().map_err(|_| malformed())?;
        if !distance_miles.is_finite() || distance_miles < 0.0 {
            return Err(malformed());
        }
        Ok(Maneuver {
            direction: label.parse()?,
            way: way.to_owned(),
            distance_miles,
        })
    }
}

// ── Synthesis ─────────────────────────────────────────────────────────────────

/// Convert a node path into maneuvers.
///
/// Paths with fewer than two nodes produce no maneuvers.
///
/// # Errors
///
/// [`SpatialError::NodeNotFound`] if any id is not a routable node.
pub fn directions(graph: &RoadGraph, path: &[NodeId]) -> SpatialResult<Vec<Maneuver>> {
    let nodes: Vec<NodeIdx> = path
        .iter()
        .map(|&id| graph.index_of(id))
        .collect::<SpatialResult<_>>()?;

    let mut maneuvers = Vec::new();
    let Some((&first, &second)) = nodes.first().zip(nodes.get(1)) else {
        return Ok(maneuvers);
    };

    let mut way = edge_way(graph, None, first, second);
    let mut open = Maneuver {
        direction:      Direction::Start,
        way:            way_label(graph, way),
        distance_miles: edge_miles(graph, first, second),
    };

    for window in nodes.windows(3) {
        let (prev, at, next) = (window[0], window[1], window[2]);
        let next_way = edge_way(graph, way, at, next);
        let miles = edge_miles(graph, at, next);

        if next_way == way {
            open.distance_miles += miles;
            continue;
        }

        let incoming = graph.pos(prev).bearing_deg(graph.pos(at));
        let outgoing = graph.pos(at).bearing_deg(graph.pos(next));
        let finished = std::mem::replace(&mut open, Maneuver {
            direction:      Direction::from_turn(outgoing - incoming),
            way:            way_label(graph, next_way),
            distance_miles: miles,
        });
        maneuvers.push(finished);
        way = next_way;
    }

    maneuvers.push(open);
    Ok(maneuvers)
}

/// Way to report for the edge `a → b`: stay on `current` while both
/// endpoints carry it, otherwise take the alphabetically first way they
/// share.  `None` means no common named way.
fn edge_way(
    graph: &RoadGraph,
    current: Option<WayNameId>,
    a: NodeIdx,
    b: NodeIdx,
) -> Option<WayNameId> {
    let (ways_a, ways_b) = (graph.way_name_ids(a), graph.way_name_ids(b));
    if let Some(w) = current {
        if ways_a.binary_search(&w).is_ok() && ways_b.binary_search(&w).is_ok() {
            return Some(w);
        }
    }
    first_common(ways_a, ways_b)
}

/// Smallest element present in both sorted slices.
fn first_common(a: &[WayNameId], b: &[WayNameId]) -> Option<WayNameId> {
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        match a[i].cmp(&b[j]) {
            Ordering::Less => i += 1,
            Ordering::Greater => j += 1,
            Ordering::Equal => return Some(a[i]),
        }
    }
    None
}

fn way_label(graph: &RoadGraph, way: Option<WayNameId>) -> String {
    way.map_or(UNKNOWN_ROAD, |w| graph.way_name(w)).to_owned()
}

fn edge_miles(graph: &RoadGraph, a: NodeIdx, b: NodeIdx) -> f64 {
    graph.pos(a).distance_mi(graph.pos(b))
}
