use criterion::{Criterion, black_box, criterion_group, criterion_main};
use geoset::{GeoItem, GeoSet, Point, Unit};

fn populated(n: usize) -> GeoSet {
    let mut geo = GeoSet::new();
    let items: Vec<GeoItem> = (0..n)
        .map(|i| {
            let lon = -74.0 + (i % 1000) as f64 * 0.001;
            let lat = 40.0 + (i / 1000) as f64 * 0.001;
            GeoItem::new(format!("p{i}"), lon, lat)
        })
        .collect();
    geo.add(&items).unwrap();
    geo
}

fn benchmark_add(c: &mut Criterion) {
    let mut group = c.benchmark_group("add");

    group.bench_function("single_add", |b| {
        let mut geo = GeoSet::new();
        let mut counter = 0u64;
        b.iter(|| {
            let lon = -74.0 + (counter % 1000) as f64 * 0.001;
            let lat = 40.0 + (counter % 500) as f64 * 0.001;
            let item = GeoItem::new(format!("p{counter}"), lon, lat);
            counter += 1;
            geo.add(black_box(&[item])).unwrap()
        })
    });

    group.bench_function("batch_add_100", |b| {
        let mut geo = GeoSet::new();
        let mut counter = 0u64;
        b.iter(|| {
            let items: Vec<GeoItem> = (0..100)
                .map(|i| {
                    let id = counter * 100 + i;
                    let lon = -74.0 + (id % 1000) as f64 * 0.001;
                    let lat = 40.0 + (id % 500) as f64 * 0.001;
                    GeoItem::new(format!("p{id}"), lon, lat)
                })
                .collect();
            counter += 1;
            geo.add(black_box(&items)).unwrap()
        })
    });

    group.finish();
}

fn benchmark_queries(c: &mut Criterion) {
    let mut group = c.benchmark_group("queries");

    let geo = populated(100_000);
    let center = Point::new(-73.5, 40.05);

    group.bench_function("radius_1km", |b| {
        b.iter(|| {
            geo.radius(black_box(center), black_box(1.0), Unit::Kilometers)
                .unwrap()
        })
    });

    group.bench_function("radius_50km", |b| {
        b.iter(|| {
            geo.radius(black_box(center), black_box(50.0), Unit::Kilometers)
                .unwrap()
        })
    });

    group.bench_function("dist", |b| {
        b.iter(|| {
            geo.dist(black_box("p0"), black_box("p99999"), Unit::Meters)
                .unwrap()
        })
    });

    group.bench_function("pos", |b| b.iter(|| geo.pos(black_box(&["p500"])).unwrap()));

    group.finish();
}

criterion_group!(benches, benchmark_add, benchmark_queries);
criterion_main!(benches);
