//! Input tables consumed by graph and name-index construction.
//!
//! These are the rows an ingestion layer (OSM parser, CSV loader, test
//! fixture) hands over.  Nothing here is validated on construction; the
//! builders skip rows they cannot use.

use std::collections::BTreeMap;

use crate::{GeoPoint, NodeId, WayId};

/// Tag mapping shared by nodes and ways (`"name" → "Telegraph Avenue"`).
pub type Tags = BTreeMap<String, String>;

/// Tag key holding a display name.
pub const NAME_TAG: &str = "name";

/// Tag key holding the road class of a way.
pub const HIGHWAY_TAG: &str = "highway";

/// `highway` values that carry cars; used when the graph's highway filter is on.
pub const DRIVABLE_HIGHWAYS: &[&str] = &[
    "motorway", "trunk", "primary", "secondary", "tertiary", "unclassified",
    "residential", "living_street", "motorway_link", "trunk_link",
    "primary_link", "secondary_link", "tertiary_link",
];

/// One row of the node table.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeRecord {
    pub id:   NodeId,
    pub pos:  GeoPoint,
    pub tags: Tags,
}

impl NodeRecord {
    pub fn new(id: i64, lon: f64, lat: f64) -> Self {
        Self { id: id.into(), pos: GeoPoint::new(lon, lat), tags: Tags::new() }
    }

    /// Builder-style helper: attach one tag.
    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.insert(key.into(), value.into());
        self
    }

    /// Builder-style helper: attach a `name` tag.
    pub fn named(self, name: impl Into<String>) -> Self {
        self.with_tag(NAME_TAG, name)
    }

    pub fn name(&self) -> Option<&str> {
        self.tags.get(NAME_TAG).map(String::as_str)
    }
}

/// One row of the way table.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WayRecord {
    pub id:    WayId,
    /// Ordered polyline of node references.
    pub nodes: Vec<NodeId>,
    pub tags:  Tags,
    /// Set to `false` by ingestion to exclude the way from routing.
    pub valid: bool,
}

impl WayRecord {
    pub fn new(id: i64, nodes: impl IntoIterator<Item = i64>) -> Self {
        Self {
            id:    id.into(),
            nodes: nodes.into_iter().map(NodeId).collect(),
            tags:  Tags::new(),
            valid: true,
        }
    }

    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.insert(key.into(), value.into());
        self
    }

    pub fn named(self, name: impl Into<String>) -> Self {
        self.with_tag(NAME_TAG, name)
    }

    pub fn name(&self) -> Option<&str> {
        self.tags.get(NAME_TAG).map(String::as_str)
    }

    /// `true` if the way's `highway` tag names a car-drivable road class.
    pub fn is_drivable(&self) -> bool {
        self.tags
            .get(HIGHWAY_TAG)
            .is_some_and(|h| DRIVABLE_HIGHWAYS.contains(&h.as_str()))
    }
}
