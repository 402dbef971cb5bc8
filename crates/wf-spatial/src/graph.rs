//! Road graph representation and builder.
//!
//! # Data layout
//!
//! Routable nodes are stored in **ascending `NodeId` order** at dense
//! [`NodeIdx`] positions.  Adjacency uses **Compressed Sparse Row (CSR)**
//! format: the half-edges leaving node `n` occupy
//!
//! ```text
//! edge_to[ node_out_start[n] .. node_out_start[n+1] ]
//! ```
//!
//! Every undirected road segment is stored as two half-edges, so adjacency is
//! symmetric by construction.  Half-edges of a node are sorted by target
//! index, which is also ascending `NodeId` order.
//!
//! # Way names
//!
//! Way names are interned into an alphabetically sorted table; each node
//! keeps a sorted slice of [`WayNameId`]s for the named ways it lies on.
//! Because the table is alphabetical, "smallest common id" also means
//! "alphabetically first common name".
//!
//! # Spatial index
//!
//! An R-tree (via `rstar`) over `[lon, lat]` answers approximate k-nearest
//! queries for snapping UIs.  The exact great-circle [`RoadGraph::closest`]
//! query is a linear scan so that its tie-breaking is fully deterministic.

use std::collections::BTreeSet;

use rstar::{PointDistance, RTree, RTreeObject, AABB};
use rustc_hash::FxHashMap;
use tracing::{debug, info, warn};

use wf_core::{
    EdgeIdx, GeoPoint, GraphConfig, NodeId, NodeIdx, NodeRecord, Tags, WayNameId, WayRecord,
};

use crate::{SpatialError, SpatialResult};

// ── R-tree node entry ─────────────────────────────────────────────────────────

/// Entry stored in the R-tree spatial index: a 2-D `[lon, lat]` point with
/// the associated `NodeIdx`.
#[derive(Clone)]
struct NodeEntry {
    point: [f64; 2], // [lon, lat]
    idx:   NodeIdx,
}

impl RTreeObject for NodeEntry {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for NodeEntry {
    /// Squared Euclidean distance in lon/lat space.  Good enough to rank
    /// candidates within a city; not used for the exact `closest` query.
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dlon = self.point[0] - point[0];
        let dlat = self.point[1] - point[1];
        dlon * dlon + dlat * dlat
    }
}

// ── RoadGraph ─────────────────────────────────────────────────────────────────

/// Undirected routable road graph in CSR format.
///
/// Build one with [`build_graph`] or [`GraphBuilder`].  The graph is frozen
/// once [`GraphBuilder::build`] returns: there is no mutation API, and the
/// arrays are only reachable through read-only accessors.  It is
/// `Send + Sync`, so any number of queries may read it concurrently.
///
/// ```compile_fail
/// let mut graph = wf_spatial::RoadGraph::empty();
/// graph.edge_to.clear();
/// ```
pub struct RoadGraph {
    // ── Node data (indexed by NodeIdx) ────────────────────────────────────
    /// External id of each node, strictly ascending.
    pub(crate) node_ids: Vec<NodeId>,

    /// Geographic position of each node.
    pub(crate) node_pos: Vec<GeoPoint>,

    node_tags: Vec<Tags>,

    /// Sorted way-name ids per node.
    node_ways: Vec<Vec<WayNameId>>,

    // ── CSR adjacency ─────────────────────────────────────────────────────
    /// CSR row pointer.  Length = `node_count + 1`.
    pub(crate) node_out_start: Vec<u32>,

    /// Target node of each half-edge.
    pub(crate) edge_to: Vec<NodeIdx>,

    /// Great-circle length of each half-edge in miles.
    pub(crate) edge_length_mi: Vec<f64>,

    // ── Lookup tables ─────────────────────────────────────────────────────
    way_names: Vec<String>,
    id_to_idx: FxHashMap<NodeId, NodeIdx>,
    spatial_idx: RTree<NodeEntry>,
}

impl RoadGraph {
    /// Construct a graph with no nodes or edges.
    pub fn empty() -> Self {
        GraphBuilder::new(GraphConfig::default()).build()
    }

    // ── Graph dimensions ──────────────────────────────────────────────────

    pub fn node_count(&self) -> usize {
        self.node_ids.len()
    }

    /// Number of undirected edges (each stored as two half-edges).
    pub fn edge_count(&self) -> usize {
        self.edge_to.len() / 2
    }

    pub fn is_empty(&self) -> bool {
        self.node_ids.is_empty()
    }

    // ── Id ↔ index ────────────────────────────────────────────────────────

    pub fn contains(&self, id: NodeId) -> bool {
        self.id_to_idx.contains_key(&id)
    }

    /// Dense index of `id`, or [`SpatialError::NodeNotFound`].
    #[inline]
    pub fn index_of(&self, id: NodeId) -> SpatialResult<NodeIdx> {
        self.id_to_idx
            .get(&id)
            .copied()
            .ok_or(SpatialError::NodeNotFound(id))
    }

    #[inline]
    pub fn id_of(&self, idx: NodeIdx) -> NodeId {
        self.node_ids[idx.index()]
    }

    /// All routable node ids in ascending order.
    pub fn node_ids(&self) -> &[NodeId] {
        &self.node_ids
    }

    /// Positions of the routable nodes, parallel to [`node_ids`](Self::node_ids).
    pub fn node_positions(&self) -> &[GeoPoint] {
        &self.node_pos
    }

    // ── Graph traversal ───────────────────────────────────────────────────

    /// Iterator over the half-edges leaving `node`.
    ///
    /// A contiguous index range; no heap allocation.
    #[inline]
    pub fn out_edges(&self, node: NodeIdx) -> impl Iterator<Item = EdgeIdx> + '_ {
        let start = self.node_out_start[node.index()] as usize;
        let end   = self.node_out_start[node.index() + 1] as usize;
        (start..end).map(|i| EdgeIdx(i as u32))
    }

    /// `(neighbor, length_mi)` pairs for every half-edge leaving `node`.
    #[inline]
    pub fn adjacent(&self, node: NodeIdx) -> impl Iterator<Item = (NodeIdx, f64)> + '_ {
        self.out_edges(node)
            .map(|e| (self.edge_to[e.index()], self.edge_length_mi[e.index()]))
    }

    #[inline]
    pub fn degree(&self, node: NodeIdx) -> usize {
        let start = self.node_out_start[node.index()] as usize;
        let end   = self.node_out_start[node.index() + 1] as usize;
        end - start
    }

    /// Ids adjacent to `id`, ascending and without duplicates.
    pub fn neighbors(&self, id: NodeId) -> SpatialResult<Vec<NodeId>> {
        let idx = self.index_of(id)?;
        Ok(self.adjacent(idx).map(|(n, _)| self.id_of(n)).collect())
    }

    // ── Node attributes ───────────────────────────────────────────────────

    pub fn coordinates(&self, id: NodeId) -> SpatialResult<GeoPoint> {
        Ok(self.pos(self.index_of(id)?))
    }

    #[inline]
    pub fn pos(&self, idx: NodeIdx) -> GeoPoint {
        self.node_pos[idx.index()]
    }

    pub fn tags(&self, id: NodeId) -> SpatialResult<&Tags> {
        Ok(&self.node_tags[self.index_of(id)?.index()])
    }

    pub fn tag(&self, id: NodeId, key: &str) -> SpatialResult<Option<&str>> {
        Ok(self.tags(id)?.get(key).map(String::as_str))
    }

    /// Names of the ways `id` lies on, alphabetically.
    pub fn way_names(&self, id: NodeId) -> SpatialResult<Vec<&str>> {
        let idx = self.index_of(id)?;
        Ok(self.way_name_ids(idx).iter().map(|&w| self.way_name(w)).collect())
    }

    #[inline]
    pub fn way_name_ids(&self, idx: NodeIdx) -> &[WayNameId] {
        &self.node_ways[idx.index()]
    }

    #[inline]
    pub fn way_name(&self, id: WayNameId) -> &str {
        &self.way_names[id.index()]
    }

    // ── Geometry ──────────────────────────────────────────────────────────

    /// Great-circle distance in miles between two routable nodes.
    pub fn distance(&self, a: NodeId, b: NodeId) -> SpatialResult<f64> {
        Ok(self.coordinates(a)?.distance_mi(self.coordinates(b)?))
    }

    /// Initial bearing in degrees from `a` toward `b`, in (−180, 180].
    pub fn bearing(&self, a: NodeId, b: NodeId) -> SpatialResult<f64> {
        Ok(self.coordinates(a)?.bearing_deg(self.coordinates(b)?))
    }

    // ── Spatial queries ───────────────────────────────────────────────────

    /// The routable node closest (great-circle) to `(lon, lat)`.
    ///
    /// Nodes are scanned in ascending id order and only a strictly smaller
    /// distance replaces the best, so ties go to the lowest id.
    pub fn closest(&self, lon: f64, lat: f64) -> SpatialResult<NodeId> {
        let idx = self.closest_idx(GeoPoint::new(lon, lat))?;
        Ok(self.id_of(idx))
    }

    pub fn closest_idx(&self, query: GeoPoint) -> SpatialResult<NodeIdx> {
        let query = query.validate()?;
        let mut best: Option<(NodeIdx, f64)> = None;
        for (i, &pos) in self.node_pos.iter().enumerate() {
            let d = query.distance_mi(pos);
            if best.is_none_or(|(_, best_d)| d < best_d) {
                best = Some((NodeIdx(i as u32), d));
            }
        }
        best.map(|(idx, _)| idx).ok_or(SpatialError::EmptyGraph)
    }

    /// Up to `k` nodes near `(lon, lat)`, ranked by planar lon/lat distance.
    pub fn nearest_nodes(&self, lon: f64, lat: f64, k: usize) -> SpatialResult<Vec<NodeId>> {
        let query = GeoPoint::new(lon, lat).validate()?;
        Ok(self
            .spatial_idx
            .nearest_neighbor_iter(&[query.lon, query.lat])
            .take(k)
            .map(|e| self.id_of(e.idx))
            .collect())
    }
}

// ── Construction entry points ─────────────────────────────────────────────────

/// Build the routable graph from node and way tables with default settings.
pub fn build_graph(nodes: &[NodeRecord], ways: &[WayRecord]) -> RoadGraph {
    build_graph_with(nodes, ways, &GraphConfig::default())
}

/// Build the routable graph with an explicit [`GraphConfig`].
pub fn build_graph_with(nodes: &[NodeRecord], ways: &[WayRecord], config: &GraphConfig) -> RoadGraph {
    let mut builder = GraphBuilder::new(config.clone());
    builder.add_nodes(nodes);
    for way in ways {
        builder.add_way(way);
    }
    builder.build()
}

// ── GraphBuilder ──────────────────────────────────────────────────────────────

/// Construct a [`RoadGraph`] incrementally, then call [`build`](Self::build).
///
/// Add the node table first: [`add_way`](Self::add_way) resolves references
/// immediately and treats any id not yet added as missing.
///
/// Malformed input never aborts the build.  A way that is flagged invalid,
/// filtered out, or yields no edges is skipped; a reference to an unknown
/// node breaks the polyline at that point.  Counts are logged at `build()`.
///
/// A routable way's name is attached to every one of its nodes that ends up
/// in the graph, including nodes next to a gap whose own edges on that way
/// were dropped.
///
/// # Example
///
/// ```
/// use wf_core::{GraphConfig, NodeRecord, WayRecord};
/// use wf_spatial::GraphBuilder;
///
/// let nodes = [NodeRecord::new(1, -122.26, 37.87), NodeRecord::new(2, -122.25, 37.87)];
/// let mut b = GraphBuilder::new(GraphConfig::default());
/// b.add_nodes(&nodes);
/// assert!(b.add_way(&WayRecord::new(10, [1, 2]).named("Bancroft Way")));
/// let graph = b.build();
/// assert_eq!(graph.node_count(), 2);
/// assert_eq!(graph.edge_count(), 1);
/// ```
pub struct GraphBuilder<'a> {
    config:    GraphConfig,
    nodes:     FxHashMap<NodeId, &'a NodeRecord>,
    raw_edges: Vec<RawEdge>,
    /// `(node, raw name id)` for each resolvable node of a named routable way.
    members:   Vec<(NodeId, u32)>,
    names:     Vec<String>,
    name_ids:  FxHashMap<String, u32>,
    report:    BuildReport,
}

struct RawEdge {
    a: NodeId,
    b: NodeId,
}

/// Counters describing what the builder kept and skipped.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BuildReport {
    pub ways_routable:      usize,
    pub ways_invalid:       usize,
    pub ways_filtered:      usize,
    pub ways_without_edges: usize,
    pub missing_refs:       usize,
    pub nodes_unusable:     usize,
}

impl<'a> GraphBuilder<'a> {
    pub fn new(config: GraphConfig) -> Self {
        Self {
            config,
            nodes:     FxHashMap::default(),
            raw_edges: Vec::new(),
            members:   Vec::new(),
            names:     Vec::new(),
            name_ids:  FxHashMap::default(),
            report:    BuildReport::default(),
        }
    }

    /// Register the node table.  Nodes with non-finite coordinates are
    /// counted and ignored; a repeated id keeps the last record.
    pub fn add_nodes(&mut self, nodes: &'a [NodeRecord]) {
        self.nodes.reserve(nodes.len());
        for node in nodes {
            self.add_node(node);
        }
    }

    pub fn add_node(&mut self, node: &'a NodeRecord) {
        if node.pos.is_finite() {
            self.nodes.insert(node.id, node);
        } else {
            self.report.nodes_unusable += 1;
        }
    }

    /// Add the edges of one way.  Returns `true` if the way contributed at
    /// least one edge.
    pub fn add_way(&mut self, way: &WayRecord) -> bool {
        if !way.valid {
            self.report.ways_invalid += 1;
            return false;
        }
        if self.config.highway_filter && !way.is_drivable() {
            self.report.ways_filtered += 1;
            return false;
        }

        let mut pairs: Vec<(NodeId, NodeId)> = Vec::with_capacity(way.nodes.len());
        for pair in way.nodes.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if a != b && self.nodes.contains_key(&a) && self.nodes.contains_key(&b) {
                pairs.push((a, b));
            }
        }
        self.report.missing_refs += way
            .nodes
            .iter()
            .filter(|id| !self.nodes.contains_key(*id))
            .count();

        let added = pairs.len();
        if added == 0 {
            debug!(way = way.id.0, refs = way.nodes.len(), "way contributes no edges");
            self.report.ways_without_edges += 1;
            return false;
        }
        if let Some(name) = way.name() {
            let name = self.intern(name);
            for &id in &way.nodes {
                if self.nodes.contains_key(&id) {
                    self.members.push((id, name));
                }
            }
        }
        self.raw_edges
            .extend(pairs.into_iter().map(|(a, b)| RawEdge { a, b }));
        self.report.ways_routable += 1;
        true
    }

    pub fn report(&self) -> &BuildReport {
        &self.report
    }

    fn intern(&mut self, name: &str) -> u32 {
        if let Some(&id) = self.name_ids.get(name) {
            return id;
        }
        let id = self.names.len() as u32;
        self.names.push(name.to_owned());
        self.name_ids.insert(name.to_owned(), id);
        id
    }

    /// Consume the builder and produce a [`RoadGraph`].
    ///
    /// Time complexity: O(E log E) for the half-edge sort + O(N log N) for
    /// node ordering and the R-tree bulk load.
    pub fn build(self) -> RoadGraph {
        // ── Routable node set, ascending by id ────────────────────────────
        let routable: BTreeSet<NodeId> = self
            .raw_edges
            .iter()
            .flat_map(|e| [e.a, e.b])
            .collect();
        let node_ids: Vec<NodeId> = routable.into_iter().collect();
        let node_count = node_ids.len();

        let id_to_idx: FxHashMap<NodeId, NodeIdx> = node_ids
            .iter()
            .enumerate()
            .map(|(i, &id)| (id, NodeIdx(i as u32)))
            .collect();

        let mut node_pos  = Vec::with_capacity(node_count);
        let mut node_tags = Vec::with_capacity(node_count);
        for id in &node_ids {
            // Every routable id came from an edge whose endpoints were checked.
            let record = self.nodes[id];
            node_pos.push(record.pos);
            node_tags.push(record.tags.clone());
        }

        // ── Alphabetical way-name table ───────────────────────────────────
        let mut order: Vec<u32> = (0..self.names.len() as u32).collect();
        order.sort_by(|&x, &y| self.names[x as usize].cmp(&self.names[y as usize]));
        let mut remap = vec![WayNameId::INVALID; self.names.len()];
        for (sorted_pos, &raw) in order.iter().enumerate() {
            remap[raw as usize] = WayNameId(sorted_pos as u32);
        }
        let way_names: Vec<String> = order
            .iter()
            .map(|&raw| self.names[raw as usize].clone())
            .collect();

        // ── Half-edges and per-node way names ─────────────────────────────
        let mut half_edges: Vec<(u32, u32)> = Vec::with_capacity(self.raw_edges.len() * 2);
        let mut node_ways: Vec<Vec<WayNameId>> = vec![Vec::new(); node_count];
        for e in &self.raw_edges {
            let a = id_to_idx[&e.a];
            let b = id_to_idx[&e.b];
            half_edges.push((a.0, b.0));
            half_edges.push((b.0, a.0));
        }
        // Nodes of a named way that are routable only through other ways
        // still carry its name.
        for &(id, raw) in &self.members {
            if let Some(idx) = id_to_idx.get(&id) {
                node_ways[idx.index()].push(remap[raw as usize]);
            }
        }
        half_edges.sort_unstable();
        half_edges.dedup();
        for ways in &mut node_ways {
            ways.sort_unstable();
            ways.dedup();
        }

        // ── CSR arrays ────────────────────────────────────────────────────
        let mut node_out_start = vec![0u32; node_count + 1];
        for &(from, _) in &half_edges {
            node_out_start[from as usize + 1] += 1;
        }
        for i in 1..=node_count {
            node_out_start[i] += node_out_start[i - 1];
        }
        debug_assert_eq!(node_out_start[node_count] as usize, half_edges.len());

        let edge_to: Vec<NodeIdx> = half_edges.iter().map(|&(_, to)| NodeIdx(to)).collect();
        let edge_length_mi: Vec<f64> = half_edges
            .iter()
            .map(|&(from, to)| node_pos[from as usize].distance_mi(node_pos[to as usize]))
            .collect();

        // ── Spatial index ─────────────────────────────────────────────────
        let entries: Vec<NodeEntry> = node_pos
            .iter()
            .enumerate()
            .map(|(i, pos)| NodeEntry { point: [pos.lon, pos.lat], idx: NodeIdx(i as u32) })
            .collect();
        let spatial_idx = RTree::bulk_load(entries);

        let r = &self.report;
        let skipped = r.ways_invalid + r.ways_filtered + r.ways_without_edges;
        if skipped > 0 || r.missing_refs > 0 || r.nodes_unusable > 0 {
            warn!(
                ways_skipped = skipped,
                missing_refs = r.missing_refs,
                nodes_unusable = r.nodes_unusable,
                "graph build skipped malformed records"
            );
        }
        info!(
            nodes = node_count,
            edges = half_edges.len() / 2,
            ways = r.ways_routable,
            way_names = way_names.len(),
            "road graph built"
        );

        RoadGraph {
            node_ids,
            node_pos,
            node_tags,
            node_ways,
            node_out_start,
            edge_to,
            edge_length_mi,
            way_names,
            id_to_idx,
            spatial_idx,
        }
    }
}
