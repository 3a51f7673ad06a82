//! 카탈로그 벤치마크
//!
//! 패키지 추가, 병합, 열거, 경로 조회 성능을 측정합니다.

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use pkgscan_catalog::{Catalog, Location, Package, PackageType};

fn generate_packages(count: usize) -> Vec<Package> {
    (0..count)
        .map(|i| {
            Package::new(format!("package-{i}"), format!("1.{}.0", i % 10), PackageType::Npm)
                .with_location(Location::with_virtual_path(
                    format!("/app/node_modules/package-{i}/package.json"),
                    "/app/package-lock.json",
                ))
        })
        .collect()
}

fn bench_add(c: &mut Criterion) {
    let mut group = c.benchmark_group("catalog_add");

    for size in [100, 1_000, 10_000].iter() {
        let packages = generate_packages(*size);
        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &packages, |b, packages| {
            b.iter(|| {
                let catalog = Catalog::default();
                for pkg in packages.iter().cloned() {
                    catalog.add(black_box(pkg));
                }
                catalog
            })
        });
    }

    group.finish();
}

fn bench_merge(c: &mut Criterion) {
    let mut group = c.benchmark_group("catalog_merge");

    // 같은 패키지가 1000개의 서로 다른 파일에서 보고됨
    let duplicates: Vec<Package> = (0..1_000)
        .map(|i| {
            Package::new("lodash", "4.17.21", PackageType::Npm)
                .with_location(Location::new(format!("/app-{i}/package-lock.json")))
        })
        .collect();

    group.throughput(Throughput::Elements(1_000));
    group.bench_function("same_package_1000_locations", |b| {
        b.iter(|| {
            let catalog = Catalog::default();
            for pkg in duplicates.iter().cloned() {
                catalog.add(black_box(pkg));
            }
            catalog
        })
    });

    group.finish();
}

fn bench_queries(c: &mut Criterion) {
    let mut group = c.benchmark_group("catalog_query");

    let catalog = Catalog::new(generate_packages(10_000));

    group.throughput(Throughput::Elements(10_000));
    group.bench_function("enumerate_all_10000", |b| {
        b.iter(|| catalog.enumerate(black_box(&[])).count())
    });
    group.bench_function("enumerate_by_type_10000", |b| {
        b.iter(|| catalog.enumerate(black_box(&[PackageType::Npm])).count())
    });

    group.throughput(Throughput::Elements(1));
    group.bench_function("path_lookup_single", |b| {
        b.iter(|| {
            catalog
                .packages_by_path(black_box("/app/node_modules/package-5000/package.json"))
                .len()
        })
    });
    group.bench_function("path_lookup_miss", |b| {
        b.iter(|| catalog.packages_by_path(black_box("/nonexistent")).len())
    });

    group.finish();
}

criterion_group!(benches, bench_add, bench_merge, bench_queries);
criterion_main!(benches);
