//! CSV loaders for the node and way tables.
//!
//! # CSV format
//!
//! Nodes, one row per node:
//!
//! ```csv
//! id,lon,lat,tags
//! 53085123,-122.2585,37.8719,name=Cafe Roma;amenity=cafe
//! 53085124,-122.2590,37.8721,
//! ```
//!
//! Ways, one row per way.  `nodes` is a space-separated list of node ids:
//!
//! ```csv
//! id,nodes,tags
//! 6338,53085123 53085124 53085130,name=Bancroft Way;highway=residential
//! ```
//!
//! **`tags`** is a `;`-separated list of `key=value` pairs and may be empty.
//! A pair without `=` is a parse error; values may contain `=`.
//!
//! The loaders only reject rows they cannot parse at all.  Semantic problems
//! (unknown node references, one-node ways, NaN coordinates) are left to the
//! graph builder, which skips them.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use wf_core::{GeoPoint, NodeId, NodeRecord, Tags, WayId, WayRecord};

use crate::SpatialError;

// ── CSV records ───────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct NodeRow {
    id:   i64,
    lon:  f64,
    lat:  f64,
    #[serde(default)]
    tags: String,
}

#[derive(Deserialize)]
struct WayRow {
    id:    i64,
    nodes: String,
    #[serde(default)]
    tags:  String,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load the node table from a CSV file.
pub fn load_nodes_csv(path: &Path) -> Result<Vec<NodeRecord>, SpatialError> {
    let file = std::fs::File::open(path)?;
    load_nodes_reader(file)
}

/// Like [`load_nodes_csv`] but accepts any `Read` source.
pub fn load_nodes_reader<R: Read>(reader: R) -> Result<Vec<NodeRecord>, SpatialError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut nodes = Vec::new();

    for result in csv_reader.deserialize::<NodeRow>() {
        let row = result.map_err(|e| SpatialError::Parse(e.to_string()))?;
        nodes.push(NodeRecord {
            id:   NodeId(row.id),
            pos:  GeoPoint::new(row.lon, row.lat),
            tags: parse_tags(&row.tags)?,
        });
    }

    Ok(nodes)
}

/// Load the way table from a CSV file.
pub fn load_ways_csv(path: &Path) -> Result<Vec<WayRecord>, SpatialError> {
    let file = std::fs::File::open(path)?;
    load_ways_reader(file)
}

/// Like [`load_ways_csv`] but accepts any `Read` source.
pub fn load_ways_reader<R: Read>(reader: R) -> Result<Vec<WayRecord>, SpatialError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut ways = Vec::new();

    for result in csv_reader.deserialize::<WayRow>() {
        let row = result.map_err(|e| SpatialError::Parse(e.to_string()))?;
        ways.push(WayRecord {
            id:    WayId(row.id),
            nodes: parse_refs(&row.nodes)?,
            tags:  parse_tags(&row.tags)?,
            valid: true,
        });
    }

    Ok(ways)
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn parse_refs(s: &str) -> Result<Vec<NodeId>, SpatialError> {
    s.split_whitespace()
        .map(|tok| {
            tok.parse::<i64>().map(NodeId).map_err(|_| {
                SpatialError::Parse(format!("invalid node reference {tok:?}: expected an integer id"))
            })
        })
        .collect()
}

fn parse_tags(s: &str) -> Result<Tags, SpatialError> {
    let mut tags = Tags::new();
    for pair in s.split(';').map(str::trim).filter(|p| !p.is_empty()) {
        let (key, value) = pair.split_once('=').ok_or_else(|| {
            SpatialError::Parse(format!("invalid tag {pair:?}: expected key=value"))
        })?;
        tags.insert(key.trim().to_owned(), value.trim().to_owned());
    }
    Ok(tags)
}
