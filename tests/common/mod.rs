//! Shared fixtures for the integration tests.
//!
//! The region fixture is a nested country→state→city document; loading it
//! walks the district tree and bulk-adds every district as a member.

use geoset::{GeoItem, GeoSet};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Region {
    pub name: String,
    #[allow(dead_code)]
    pub level: String,
    pub center: Center,
    #[serde(default)]
    pub districts: Vec<Region>,
}

#[derive(Debug, Deserialize)]
pub struct Center {
    pub longitude: f64,
    pub latitude: f64,
}

pub fn region_fixture() -> Region {
    serde_json::from_str(include_str!("../fixtures/region.json")).expect("region fixture parses")
}

/// A `GeoSet` populated with every district of the region fixture.
pub fn region_set() -> GeoSet {
    let mut geo = GeoSet::new();
    let region = region_fixture();
    add_districts(&mut geo, &region);
    geo
}

fn add_districts(geo: &mut GeoSet, region: &Region) {
    let items: Vec<GeoItem> = region
        .districts
        .iter()
        .map(|d| GeoItem::new(d.name.clone(), d.center.longitude, d.center.latitude))
        .collect();

    if !items.is_empty() {
        geo.add(&items).expect("fixture coordinates are valid");
    }

    for district in &region.districts {
        add_districts(geo, district);
    }
}
