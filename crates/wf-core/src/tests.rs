//! Unit tests for wf-core primitives.

#[cfg(test)]
mod ids {
    use crate::{EdgeIdx, NodeId, NodeIdx, WayNameId};

    #[test]
    fn index_roundtrip() {
        let idx = NodeIdx(42);
        assert_eq!(idx.index(), 42);
        assert_eq!(NodeIdx::try_from(42usize).unwrap(), idx);
    }

    #[test]
    fn ordering() {
        assert!(NodeId(-5) < NodeId(3));
        assert!(NodeIdx(100) > NodeIdx(99));
    }

    #[test]
    fn invalid_sentinels_are_max() {
        assert_eq!(NodeIdx::INVALID.0, u32::MAX);
        assert_eq!(EdgeIdx::INVALID.0, u32::MAX);
        assert_eq!(WayNameId::default(), WayNameId::INVALID);
    }

    #[test]
    fn display() {
        assert_eq!(NodeId(53_085_123).to_string(), "NodeId(53085123)");
        assert_eq!(NodeIdx(7).to_string(), "NodeIdx(7)");
    }
}

#[cfg(test)]
mod geo {
    use crate::{CoreError, GeoPoint};
    use crate::geo::{bearing, distance, normalize_delta};

    #[test]
    fn zero_distance() {
        let p = GeoPoint::new(-122.2585, 37.8719);
        assert_eq!(p.distance_mi(p), 0.0);
    }

    #[test]
    fn symmetric_distance() {
        let a = GeoPoint::new(-122.2585, 37.8719);
        let b = GeoPoint::new(-122.2690, 37.8590);
        assert_eq!(a.distance_mi(b), b.distance_mi(a));
    }

    #[test]
    fn one_degree_latitude() {
        // R·π/180 with R = 3963 mi.
        let d = distance(0.0, 0.0, 0.0, 1.0);
        assert!((d - 69.167).abs() < 0.01, "got {d}");
    }

    #[test]
    fn triangle_inequality() {
        let a = GeoPoint::new(-122.25, 37.87);
        let b = GeoPoint::new(-122.27, 37.86);
        let c = GeoPoint::new(-122.24, 37.85);
        assert!(a.distance_mi(c) <= a.distance_mi(b) + b.distance_mi(c) + 1e-9);
    }

    #[test]
    fn parse_lon_lat() {
        let p: GeoPoint = " -122.2585 , 37.8719 ".parse().unwrap();
        assert_eq!(p, GeoPoint::new(-122.2585, 37.8719));
        assert!(matches!("Sather Tower".parse::<GeoPoint>(), Err(CoreError::Parse(_))));
        assert!(matches!("1.0,north".parse::<GeoPoint>(), Err(CoreError::Parse(_))));
        assert!(matches!(
            "200.0,0.0".parse::<GeoPoint>(),
            Err(CoreError::InvalidCoordinate { .. })
        ));
    }

    #[test]
    fn cardinal_bearings() {
        assert!((bearing(0.0, 0.0, 0.0, 1.0) - 0.0).abs() < 1e-9);
        assert!((bearing(0.0, 0.0, 1.0, 0.0) - 90.0).abs() < 1e-9);
        assert!((bearing(0.0, 0.0, -1.0, 0.0) + 90.0).abs() < 1e-9);
        // Due south is reported as +180, never −180.
        assert_eq!(bearing(0.0, 1.0, 0.0, 0.0), 180.0);
    }

    #[test]
    fn delta_normalization() {
        assert_eq!(normalize_delta(190.0), -170.0);
        assert_eq!(normalize_delta(-190.0), 170.0);
        assert_eq!(normalize_delta(45.0), 45.0);
        assert_eq!(normalize_delta(540.0), 180.0);
    }

    #[test]
    fn validate_rejects_nan_and_range() {
        assert!(GeoPoint::new(f64::NAN, 0.0).validate().is_err());
        assert!(GeoPoint::new(0.0, 91.0).validate().is_err());
        assert!(GeoPoint::new(181.0, 0.0).validate().is_err());
        assert!(GeoPoint::new(-122.3, 37.9).validate().is_ok());
    }
}

#[cfg(test)]
mod records {
    use crate::{NodeRecord, WayRecord};

    #[test]
    fn node_name_tag() {
        let n = NodeRecord::new(1, -122.0, 37.0).named("Cafe Roma");
        assert_eq!(n.name(), Some("Cafe Roma"));
        assert_eq!(NodeRecord::new(2, 0.0, 0.0).name(), None);
    }

    #[test]
    fn way_defaults_valid() {
        let w = WayRecord::new(9, [1, 2, 3]);
        assert!(w.valid);
        assert_eq!(w.nodes.len(), 3);
    }

    #[test]
    fn drivable_highways() {
        assert!(WayRecord::new(1, [1, 2]).with_tag("highway", "residential").is_drivable());
        assert!(!WayRecord::new(1, [1, 2]).with_tag("highway", "footway").is_drivable());
        assert!(!WayRecord::new(1, [1, 2]).is_drivable());
    }
}

#[cfg(test)]
mod config {
    use std::time::Duration;

    use crate::{NavConfig, SearchConfig};

    #[test]
    fn defaults_are_unbounded() {
        let cfg = NavConfig::default();
        assert!(!cfg.graph.highway_filter);
        assert_eq!(cfg.search.timeout(), None);
    }

    #[test]
    fn timeout_conversion() {
        let cfg = SearchConfig { timeout_ms: Some(250) };
        assert_eq!(cfg.timeout(), Some(Duration::from_millis(250)));
    }
}
