//! `NameIndex`: prefix and exact search over named locations.

use tracing::{debug, info};

use wf_core::{GeoPoint, NodeId, NodeRecord};

use crate::trie::{KeySlot, Trie};

/// A named map location.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Location {
    pub id:   NodeId,
    pub lon:  f64,
    pub lat:  f64,
    /// The name as it appeared in the data, not the cleaned key.
    pub name: String,
}

/// Normalize a name into its search key: ASCII letters and spaces only,
/// lowercased.
///
/// ```
/// assert_eq!(wf_names::clean_name("Caffè Strada #2"), "caff strada ");
/// ```
pub fn clean_name(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_alphabetic() || *c == ' ')
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Everything stored under one cleaned key.
#[derive(Debug, Default)]
struct KeyEntry {
    /// Distinct raw spellings in first-insertion order.
    names:     Vec<String>,
    locations: Vec<Location>,
}

/// Search index over place names.
///
/// Built once, then read-only; `Send + Sync` so it can be shared across
/// threads next to the road graph.
#[derive(Debug, Default)]
pub struct NameIndex {
    trie:    Trie,
    entries: Vec<KeyEntry>,
    len:     usize,
}

impl NameIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of locations stored.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of distinct cleaned keys.
    pub fn key_count(&self) -> usize {
        self.trie.key_count()
    }

    /// Add a named location under its cleaned key.
    ///
    /// A name with no letters (`"76"`, `"#42"`) is stored under the empty key
    /// at the trie root: [`exact_lookup`](Self::exact_lookup) finds it, prefix
    /// search never does.
    pub fn insert(&mut self, id: NodeId, pos: GeoPoint, raw_name: &str) {
        let key = clean_name(raw_name);
        if key.is_empty() {
            debug!(%id, name = raw_name, "name has no letters; exact lookup only");
        }

        let slot = self.trie.insert(&key) as usize;
        if slot == self.entries.len() {
            self.entries.push(KeyEntry::default());
        }
        let entry = &mut self.entries[slot];
        if !entry.names.iter().any(|n| n == raw_name) {
            entry.names.push(raw_name.to_owned());
        }
        entry.locations.push(Location {
            id,
            lon: pos.lon,
            lat: pos.lat,
            name: raw_name.to_owned(),
        });
        self.len += 1;
    }

    /// Raw names whose cleaned key starts with the cleaned `prefix`.
    ///
    /// Keys are visited in lexicographic order; each raw spelling appears once.
    /// A prefix that cleans to the empty string matches nothing.
    pub fn prefix_search(&self, prefix: &str) -> Vec<String> {
        self.prefix_search_limit(prefix, usize::MAX)
    }

    /// Like [`prefix_search`](Self::prefix_search), stopping after `limit`
    /// names.
    pub fn prefix_search_limit(&self, prefix: &str, limit: usize) -> Vec<String> {
        let key = clean_name(prefix);
        if key.is_empty() {
            return Vec::new();
        }
        self.trie
            .with_prefix(&key)
            .flat_map(|slot| self.entry(slot).names.iter().cloned())
            .take(limit)
            .collect()
    }

    /// Every location whose cleaned name equals the cleaned `name`, in
    /// insertion order.  Names without letters all share the empty key, so
    /// `"76"` also finds `"#42"`.
    pub fn exact_lookup(&self, name: &str) -> Vec<Location> {
        let key = clean_name(name);
        self.trie
            .get(&key)
            .map(|slot| self.entry(slot).locations.clone())
            .unwrap_or_default()
    }

    fn entry(&self, slot: KeySlot) -> &KeyEntry {
        &self.entries[slot as usize]
    }
}

/// Index the `name` tag of every node in the table.
///
/// Nodes outside the routable graph are included: a shop or landmark is
/// searchable even when no road passes through its node.
pub fn build_name_index(nodes: &[NodeRecord]) -> NameIndex {
    let mut index = NameIndex::new();
    let mut unnamed = 0usize;
    for node in nodes {
        match node.name() {
            Some(name) => index.insert(node.id, node.pos, name),
            None => unnamed += 1,
        }
    }
    info!(
        locations = index.len(),
        keys = index.key_count(),
        unnamed,
        "name index built"
    );
    index
}

/// Free-function form of [`NameIndex::prefix_search`].
pub fn prefix_search(index: &NameIndex, prefix: &str) -> Vec<String> {
    index.prefix_search(prefix)
}

/// Free-function form of [`NameIndex::exact_lookup`].
pub fn exact_lookup(index: &NameIndex, name: &str) -> Vec<Location> {
    index.exact_lookup(name)
}
