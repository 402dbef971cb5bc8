//! Unit tests for wf-names.

#[cfg(test)]
mod helpers {
    use wf_core::NodeRecord;

    use crate::{NameIndex, build_name_index};

    pub fn berkeley() -> NameIndex {
        let nodes = vec![
            NodeRecord::new(1, -122.2585, 37.8719).named("Cafe Roma"),
            NodeRecord::new(2, -122.2590, 37.8721).named("Cafeteria"),
            NodeRecord::new(3, -122.2600, 37.8730).named("Roma Pizza"),
            NodeRecord::new(4, -122.2500, 37.8700).named("Central Park"),
            NodeRecord::new(5, -122.2400, 37.8600).named("Central Park"),
            NodeRecord::new(6, -122.2610, 37.8740),
            NodeRecord::new(7, -122.2620, 37.8750).named("CAFE ROMA!"),
            NodeRecord::new(8, -122.2630, 37.8760).named("#42"),
        ];
        build_name_index(&nodes)
    }
}

// ── Cleaning ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod clean {
    use crate::clean_name;

    #[test]
    fn keeps_letters_and_spaces() {
        assert_eq!(clean_name("Cafe Roma"), "cafe roma");
        assert_eq!(clean_name("O'Brien's Pub"), "obriens pub");
        assert_eq!(clean_name("7-Eleven"), "eleven");
        assert_eq!(clean_name("123"), "");
    }
}

// ── Trie ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod trie {
    use crate::trie::Trie;

    #[test]
    fn slots_are_stable() {
        let mut t = Trie::new();
        assert_eq!(t.insert("cafe"), 0);
        assert_eq!(t.insert("cab"), 1);
        assert_eq!(t.insert("cafe"), 0);
        assert_eq!(t.key_count(), 2);
        assert_eq!(t.get("cafe"), Some(0));
        assert_eq!(t.get("caf"), None);
    }

    #[test]
    fn prefix_walk_is_lexicographic() {
        let mut t = Trie::new();
        for key in ["cafeteria", "cab", "cafe", "cafe roma", "dog"] {
            t.insert(key);
        }
        // Slots: cafeteria=0, cab=1, cafe=2, cafe roma=3, dog=4.
        let slots: Vec<u32> = t.with_prefix("ca").collect();
        assert_eq!(slots, vec![1, 2, 3, 0]);
        assert_eq!(t.with_prefix("x").count(), 0);
        assert_eq!(t.with_prefix("").count(), 5);
    }
}

// ── Prefix search ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod prefix {
    use crate::prefix_search;

    #[test]
    fn caf_matches_cafes_only() {
        let index = super::helpers::berkeley();
        let hits = prefix_search(&index, "caf");
        assert_eq!(hits, vec!["Cafe Roma", "CAFE ROMA!", "Cafeteria"]);
        assert!(!hits.iter().any(|h| h == "Roma Pizza"));
    }

    #[test]
    fn case_and_punctuation_insensitive() {
        let index = super::helpers::berkeley();
        assert_eq!(prefix_search(&index, "CAF"), prefix_search(&index, "c-a-f"));
    }

    #[test]
    fn empty_prefix_matches_nothing() {
        let index = super::helpers::berkeley();
        assert!(prefix_search(&index, "").is_empty());
        assert!(prefix_search(&index, "123").is_empty());
    }

    #[test]
    fn duplicate_names_reported_once() {
        let index = super::helpers::berkeley();
        assert_eq!(prefix_search(&index, "central"), vec!["Central Park"]);
    }

    #[test]
    fn limit_truncates() {
        let index = super::helpers::berkeley();
        assert_eq!(index.prefix_search_limit("caf", 1), vec!["Cafe Roma"]);
        assert!(index.prefix_search_limit("caf", 0).is_empty());
    }

    #[test]
    fn no_match() {
        let index = super::helpers::berkeley();
        assert!(prefix_search(&index, "zebra").is_empty());
    }
}

// ── Exact lookup ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod exact {
    use wf_core::{GeoPoint, NodeId, NodeRecord};

    use crate::{NameIndex, build_name_index, exact_lookup, prefix_search};

    #[test]
    fn duplicate_names_return_every_location() {
        let index = super::helpers::berkeley();
        let hits = exact_lookup(&index, "Central Park");
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].id, NodeId(4));
        assert_eq!((hits[0].lon, hits[0].lat), (-122.2500, 37.8700));
        assert_eq!(hits[1].id, NodeId(5));
        assert_eq!((hits[1].lon, hits[1].lat), (-122.2400, 37.8600));
    }

    #[test]
    fn matches_on_cleaned_key() {
        let index = super::helpers::berkeley();
        let hits = exact_lookup(&index, "cafe roma");
        let ids: Vec<NodeId> = hits.iter().map(|l| l.id).collect();
        assert_eq!(ids, vec![NodeId(1), NodeId(7)]);
        assert_eq!(hits[1].name, "CAFE ROMA!");
    }

    #[test]
    fn prefix_is_not_exact() {
        let index = super::helpers::berkeley();
        assert!(exact_lookup(&index, "Cafe").is_empty());
        assert!(exact_lookup(&index, "Cafe Rom").is_empty());
    }

    #[test]
    fn names_without_letters_share_empty_key() {
        let nodes = [
            NodeRecord::new(1, 0.0, 0.0).named("76"),
            NodeRecord::new(2, 0.1, 0.1).named("#42"),
            NodeRecord::new(3, 0.2, 0.2).named("Route 76"),
        ];
        let index = build_name_index(&nodes);

        let ids: Vec<NodeId> = exact_lookup(&index, "76").iter().map(|l| l.id).collect();
        assert_eq!(ids, vec![NodeId(1), NodeId(2)]);
        assert_eq!(exact_lookup(&index, "")[1].name, "#42");
        // Prefix search still ignores the empty key.
        assert!(prefix_search(&index, "76").is_empty());
        assert_eq!(prefix_search(&index, "route"), vec!["Route 76"]);
    }

    #[test]
    fn counts() {
        let index = super::helpers::berkeley();
        // Node 6 has no name; "#42" is stored under the empty key.
        assert_eq!(index.len(), 7);
        assert_eq!(index.key_count(), 5);

        let mut index = NameIndex::new();
        assert!(index.is_empty());
        index.insert(NodeId(1), GeoPoint::new(0.0, 0.0), "42");
        assert_eq!(index.len(), 1);
        assert_eq!(index.exact_lookup("42")[0].id, NodeId(1));
    }
}
