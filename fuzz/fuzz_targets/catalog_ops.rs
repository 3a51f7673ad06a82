#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use pkgscan_catalog::{Catalog, Location, Package, PackageType};

/// 퍼저용 카탈로그 연산
#[derive(Arbitrary, Debug)]
enum Op {
    Add {
        name: u8,
        version: u8,
        npm: bool,
        path: u8,
    },
    Delete {
        index: u8,
    },
}

fuzz_target!(|ops: Vec<Op>| {
    let catalog = Catalog::default();
    let mut ids = Vec::new();

    // 연산 수 제한 (퍼징 성능)
    for op in ops.into_iter().take(256) {
        match op {
            Op::Add {
                name,
                version,
                npm,
                path,
            } => {
                let package_type = if npm {
                    PackageType::Npm
                } else {
                    PackageType::JavaGradle
                };
                let package = Package::new(
                    format!("pkg-{}", name % 16),
                    format!("1.{}", version % 4),
                    package_type,
                )
                .with_location(Location::new(format!("/dir-{}/lock", path % 8)));
                ids.push(catalog.add(package));
            }
            Op::Delete { index } => {
                if !ids.is_empty() {
                    let id = &ids[usize::from(index) % ids.len()];
                    catalog.delete(id);
                }
            }
        }
    }

    // 모든 인덱스가 주 저장소와 일치해야 한다
    let all = catalog.sorted(&[]);
    assert_eq!(all.len(), catalog.package_count());
    for package in &all {
        assert!(catalog.get(&package.id()).is_some());
        for location in package.locations.iter() {
            let by_path = catalog.packages_by_path(location.real_path());
            assert!(by_path.iter().any(|p| p.id() == package.id()));
        }
    }
    let typed: usize = catalog
        .package_types()
        .iter()
        .map(|t| catalog.enumerate(&[*t]).len())
        .sum();
    assert_eq!(typed, all.len());
});
