//! Built-in street network used when no CSV tables are given.
//!
//! A 3 × 3 grid of named streets loosely modelled on the blocks south of the
//! UC Berkeley campus, plus a pedestrian path and a handful of landmarks that
//! sit off the road network.

use wf_core::{NodeRecord, WayRecord};

// Grid coordinates.
const HEARST_LAT:    f64 = 37.8744;
const BANCROFT_LAT:  f64 = 37.8688;
const DWIGHT_LAT:    f64 = 37.8645;
const SHATTUCK_LON:  f64 = -122.2681;
const TELEGRAPH_LON: f64 = -122.2588;
const COLLEGE_LON:   f64 = -122.2532;

const ROWS: [(&str, f64); 3] = [
    ("Hearst Avenue", HEARST_LAT),
    ("Bancroft Way", BANCROFT_LAT),
    ("Dwight Way", DWIGHT_LAT),
];
const COLS: [(&str, f64); 3] = [
    ("Shattuck Avenue", SHATTUCK_LON),
    ("Telegraph Avenue", TELEGRAPH_LON),
    ("College Avenue", COLLEGE_LON),
];

/// Intersection node id for grid row `r`, column `c`.
fn corner(r: usize, c: usize) -> i64 {
    100 + 10 * r as i64 + c as i64
}

/// Build the node and way tables.
pub fn tables() -> (Vec<NodeRecord>, Vec<WayRecord>) {
    let mut nodes = Vec::new();
    for (r, &(_, lat)) in ROWS.iter().enumerate() {
        for (c, &(_, lon)) in COLS.iter().enumerate() {
            nodes.push(NodeRecord::new(corner(r, c), lon, lat));
        }
    }

    // Mid-block node on the campus path.
    nodes.push(NodeRecord::new(150, -122.2595, 37.8716));

    // Landmarks: searchable by name, never routable.
    nodes.extend([
        NodeRecord::new(900, -122.2578, 37.8721).named("Sather Tower"),
        NodeRecord::new(901, -122.2545, 37.8690).named("Cafe Strada"),
        NodeRecord::new(902, -122.2587, 37.8658).named("Caffe Mediterraneum"),
        NodeRecord::new(903, -122.2681, 37.8701).named("Downtown Berkeley BART"),
        NodeRecord::new(904, -122.2590, 37.8685).named("Cafe Milano"),
        NodeRecord::new(905, -122.2640, 37.8690).named("Berkeley Public Library"),
        NodeRecord::new(906, -122.2530, 37.8650).named("Cafe Strada"),
    ]);

    let mut ways = Vec::new();
    for (r, &(name, _)) in ROWS.iter().enumerate() {
        let refs = (0..COLS.len()).map(|c| corner(r, c));
        ways.push(
            WayRecord::new(1 + r as i64, refs)
                .named(name)
                .with_tag("highway", "secondary"),
        );
    }
    for (c, &(name, _)) in COLS.iter().enumerate() {
        let refs = (0..ROWS.len()).map(|r| corner(r, c));
        ways.push(
            WayRecord::new(10 + c as i64, refs)
                .named(name)
                .with_tag("highway", "tertiary"),
        );
    }
    ways.push(
        WayRecord::new(20, [corner(0, 1), 150, corner(1, 1)])
            .named("Sproul Plaza")
            .with_tag("highway", "footway"),
    );

    (nodes, ways)
}
