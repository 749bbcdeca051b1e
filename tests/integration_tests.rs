use geoset::{GeoItem, GeoSet, GeoSetError, Point, Unit};

mod common;

fn china_pair() -> GeoSet {
    let mut geo = GeoSet::new();
    geo.add(&[
        GeoItem::new("beijing", 116.40, 39.90),
        GeoItem::new("shanghai", 121.47, 31.23),
    ])
    .unwrap();
    geo
}

#[test]
fn test_distance_between_cities() {
    let geo = china_pair();
    let km = geo.dist("beijing", "shanghai", Unit::Kilometers).unwrap();
    assert!((km - 1067.0).abs() < 1.0, "got {km} km");
}

#[test]
fn test_radius_by_member_spans_the_set() {
    let geo = china_pair();
    let found = geo
        .radius_by_member("beijing", 2000.0, Unit::Kilometers)
        .unwrap();
    assert_eq!(found.len(), 2);

    let beijing = found.iter().find(|e| e.member == "beijing").unwrap();
    assert_eq!(beijing.dist, 0.0);

    let shanghai = found.iter().find(|e| e.member == "shanghai").unwrap();
    assert!((shanghai.dist - 1067.0).abs() < 1.0);
}

#[test]
fn test_pos_and_hash_of_origin() {
    let mut geo = GeoSet::new();
    geo.add(&[GeoItem::new("origin", 0.0, 0.0)]).unwrap();

    let pos = geo.pos(&["origin"]).unwrap();
    let item = pos[0].as_ref().unwrap();
    assert!(item.point.x().abs() < 1e-5);
    assert!(item.point.y().abs() < 1e-5);

    let hashes = geo.hash(&["origin"]).unwrap();
    assert_eq!(hashes[0].len(), 11);
    assert!(hashes[0].starts_with("s00000"));
}

#[test]
fn test_out_of_range_coordinates_leave_index_empty() {
    let mut geo = GeoSet::new();
    assert!(geo.add(&[GeoItem::new("x", 200.0, 0.0)]).is_err());
    assert!(geo.add(&[GeoItem::new("y", 0.0, 91.0)]).is_err());
    assert!(geo.is_empty());
}

#[test]
fn test_dist_on_missing_members() {
    let geo = GeoSet::new();
    assert!(matches!(
        geo.dist("a", "b", Unit::Kilometers),
        Err(GeoSetError::NotFound)
    ));
    assert!(geo.is_empty());
}

#[test]
fn test_remove_of_absent_member_is_a_noop() {
    let mut geo = GeoSet::new();
    geo.remove(&["ghost"]).unwrap();
    assert!(geo.is_empty());
}

#[test]
fn test_re_adding_a_member_updates_its_position() {
    let mut geo = china_pair();
    geo.add(&[GeoItem::new("beijing", 2.3522, 48.8566)]).unwrap();
    assert_eq!(geo.len(), 2);

    let pos = geo.pos(&["beijing"]).unwrap();
    let item = pos[0].as_ref().unwrap();
    assert!((item.point.x() - 2.3522).abs() < 1e-4);
    assert!((item.point.y() - 48.8566).abs() < 1e-4);
}

#[test]
fn test_region_fixture_loads_every_district() {
    let geo = common::region_set();
    assert_eq!(geo.len(), 11);

    let pos = geo.pos(&["Boston", "San Diego"]).unwrap();
    assert!(pos.iter().all(|p| p.is_some()));

    let hashes = geo.hash(&["Los Angeles"]).unwrap();
    assert_eq!(hashes[0].len(), 11);
}

#[test]
fn test_region_fixture_known_distance() {
    let geo = common::region_set();
    let km = geo
        .dist("New York City", "Newark", Unit::Kilometers)
        .unwrap();
    assert!((km - 14.26).abs() < 0.5, "got {km} km");
}

#[test]
fn test_region_fixture_radius_neighborhood() {
    let geo = common::region_set();
    let found = geo
        .radius_by_member("New York City", 20.0, Unit::Kilometers)
        .unwrap();

    let mut members: Vec<&str> = found.iter().map(|e| e.member.as_str()).collect();
    members.sort_unstable();
    assert_eq!(members, ["New York City", "Newark"]);
    assert!(found.iter().all(|e| e.dist <= 20.0));
}

#[test]
fn test_radius_is_sound_and_complete_over_a_lattice() {
    // A lattice of members around Paris; the query must report every member
    // comfortably inside the disk and nothing outside it.
    let (center_lon, center_lat) = (2.3522, 48.8566);
    let radius_km = 30.0;

    let mut items = Vec::new();
    for i in 0..15 {
        for j in 0..15 {
            let lon = 2.0 + i as f64 * 0.05;
            let lat = 48.5 + j as f64 * 0.05;
            items.push(GeoItem::new(format!("p{i}x{j}"), lon, lat));
        }
    }
    let mut geo = GeoSet::new();
    geo.add(&items).unwrap();

    let found = geo
        .radius(Point::new(center_lon, center_lat), radius_km, Unit::Kilometers)
        .unwrap();

    // Soundness: nothing beyond the radius, no member twice.
    let mut members: Vec<&str> = found.iter().map(|e| e.member.as_str()).collect();
    members.sort_unstable();
    let unique = members.len();
    members.dedup();
    assert_eq!(members.len(), unique, "duplicate members in radius result");
    for entry in &found {
        assert!(entry.dist <= radius_km, "{} at {} km", entry.member, entry.dist);
    }

    // Completeness with margin: members a cell diagonal inside the disk are
    // always covered by the neighbor grid.
    let margin_km = radius_km * 0.9;
    for item in &items {
        let d_km = geoset::geohash::distance(
            item.point.x(),
            item.point.y(),
            center_lon,
            center_lat,
        ) / 1000.0;
        if d_km <= margin_km {
            assert!(
                found.iter().any(|e| e.member == item.member),
                "{} at {d_km} km missing from a {radius_km} km search",
                item.member
            );
        }
    }
}

#[test]
fn test_dist_is_symmetric() {
    let geo = common::region_set();
    let ab = geo.dist("Boston", "Buffalo", Unit::Meters).unwrap();
    let ba = geo.dist("Buffalo", "Boston", Unit::Meters).unwrap();
    assert_eq!(ab.to_bits(), ba.to_bits());
}

#[test]
fn test_unit_parsing_end_to_end() {
    let geo = china_pair();
    let unit: Unit = "mi".parse().unwrap();
    let mi = geo.dist("beijing", "shanghai", unit).unwrap();
    let m = geo.dist("beijing", "shanghai", Unit::Meters).unwrap();
    assert!(((mi * 1609.34 - m) / m).abs() < 1e-12);

    assert!(matches!(
        "leagues".parse::<Unit>(),
        Err(GeoSetError::InvalidUnit(_))
    ));
}
