//! Catalog integration tests: indexing, merging, deletion and concurrent adds

use std::collections::BTreeSet;
use std::sync::Arc;

use pkgscan_catalog::{
    Catalog, Cpe, JavaMetadata, Language, Location, Metadata, Package, PackageId, PackageSource,
    PackageType, identity,
};

fn gradle(group: &str, name: &str, version: &str, path: &str) -> Package {
    Package::new(name, version, PackageType::JavaGradle)
        .with_language(Language::Java)
        .with_metadata(Metadata::Java(JavaMetadata {
            group_id: group.to_owned(),
            artifact_id: name.to_owned(),
        }))
        .with_found_by("java-gradle-lockfile-cataloger")
        .with_location(Location::new(path))
}

fn names(packages: impl IntoIterator<Item = Package>) -> Vec<String> {
    packages.into_iter().map(|p| p.name).collect()
}

/// Same record seen by two catalogers in different files keeps both locations
#[test]
fn test_cross_cataloger_merge_keeps_every_location() {
    let catalog = Catalog::default();

    let first = catalog.add(gradle("junit", "junit", "4.12", "/app/gradle.lockfile"));
    let second = catalog.add(
        gradle("junit", "junit", "4.12", "/app/build.gradle")
            .with_found_by("java-gradle-build-cataloger"),
    );

    assert_eq!(first, second);
    assert_eq!(catalog.package_count(), 1);

    let stored = catalog.get(&first).unwrap();
    assert_eq!(stored.locations.len(), 2);
    assert_eq!(stored.found_by, "java-gradle-lockfile-cataloger");

    assert_eq!(catalog.packages_by_path("/app/gradle.lockfile").len(), 1);
    assert_eq!(catalog.packages_by_path("/app/build.gradle").len(), 1);
}

/// Records that differ only in metadata are different packages
#[test]
fn test_metadata_participates_in_identity() {
    let catalog = Catalog::default();
    catalog.add(gradle("org.a", "lib", "1.0", "/a"));
    catalog.add(gradle("org.b", "lib", "1.0", "/a"));

    assert_eq!(catalog.package_count(), 2);
    assert_eq!(catalog.packages_by_path("/a").len(), 2);
}

/// Number of stored packages equals number of distinct identities added
#[test]
fn test_package_count_matches_distinct_identities() {
    let inputs: Vec<Package> = (0..50)
        .map(|i| gradle("org.example", &format!("lib-{}", i % 17), "1.0", &format!("/f{i}")))
        .collect();
    let distinct: BTreeSet<PackageId> = inputs.iter().map(identity).collect();

    let catalog: Catalog = inputs.into_iter().collect();

    assert_eq!(catalog.package_count(), distinct.len());
    assert_eq!(catalog.package_count(), 17);
    // 50 distinct files, each one indexed
    assert_eq!(catalog.paths().len(), 50);
}

/// The same add sequence always yields the same enumeration order
#[test]
fn test_enumeration_order_is_deterministic() {
    let build = || {
        Catalog::new([
            gradle("g", "zeta", "1", "/z"),
            gradle("g", "alpha", "1", "/a"),
            gradle("g", "zeta", "1", "/z2"),
            gradle("g", "mid", "1", "/m"),
        ])
    };

    let first = names(build().enumerate(&[]));
    let second = names(build().enumerate(&[PackageType::JavaGradle]));

    assert_eq!(first, vec!["zeta", "alpha", "mid"]);
    assert_eq!(first, second);
}

/// Path lookups follow first-insertion order for real and virtual paths alike
#[test]
fn test_path_lookup_order_is_first_insertion() {
    let shared = || Location::with_virtual_path("/r", "/v");
    let catalog = Catalog::new(
        ["z", "a", "m"]
            .map(|name| Package::new(name, "1", PackageType::Npm).with_location(shared())),
    );

    assert_eq!(names(catalog.packages_by_path("/r")), vec!["z", "a", "m"]);
    assert_eq!(names(catalog.packages_by_path("/v")), vec!["z", "a", "m"]);

    // merges that bring a new path keep the existing buckets untouched
    catalog.add(Package::new("a", "1", PackageType::Npm).with_location(Location::new("/n")));
    catalog.add(Package::new("z", "1", PackageType::Npm).with_location(Location::new("/n")));
    catalog.add(Package::new("m", "1", PackageType::Npm).with_location(shared()));

    assert_eq!(catalog.package_count(), 3);
    assert_eq!(names(catalog.packages_by_path("/r")), vec!["z", "a", "m"]);
    assert_eq!(names(catalog.packages_by_path("/v")), vec!["z", "a", "m"]);
    assert_eq!(names(catalog.packages_by_path("/n")), vec!["a", "z"]);
}

/// Every id in the type and path indexes resolves to a stored package
#[test]
fn test_indexes_only_reference_stored_packages() {
    let catalog = Catalog::new([
        Package::new("a", "1", PackageType::Deb)
            .with_location(Location::with_virtual_path("/var/lib/dpkg/status", "/status")),
        Package::new("b", "1", PackageType::Rpm).with_location(Location::new("/var/lib/rpm")),
        Package::new("c", "1", PackageType::Npm)
            .with_location(Location::new("/app/package-lock.json")),
    ]);
    let b_id = identity(&Package::new("b", "1", PackageType::Rpm));
    assert!(catalog.delete(&b_id));

    for path in catalog.paths() {
        let found = catalog.packages_by_path(&path);
        assert!(!found.is_empty(), "empty bucket left for {path}");
    }
    for ty in catalog.package_types() {
        assert!(catalog.enumerate(&[ty]).len() > 0);
    }
    assert_eq!(catalog.package_types(), vec![PackageType::Deb, PackageType::Npm]);
    assert!(catalog.packages_by_path("/var/lib/rpm").is_empty());
}

/// Deleting then re-adding places the package at the end of enumeration
#[test]
fn test_readd_after_delete_appends() {
    let catalog = Catalog::new([
        Package::new("a", "1", PackageType::Deb),
        Package::new("b", "1", PackageType::Deb),
    ]);
    let a_id = identity(&Package::new("a", "1", PackageType::Deb));

    catalog.delete(&a_id);
    catalog.add(Package::new("a", "1", PackageType::Deb));

    assert_eq!(names(catalog.enumerate(&[])), vec!["b", "a"]);
}

/// CPE evidence from every record survives merging, duplicates dropped
#[test]
fn test_cpes_are_unioned_across_records() {
    let cpe_a = Cpe::new("cpe:2.3:a:junit:junit:4.12:*:*:*:*:*:*:*").unwrap();
    let cpe_b = Cpe::new("cpe:2.3:a:junit-team:junit:4.12:*:*:*:*:*:*:*").unwrap();

    let catalog = Catalog::new([
        gradle("junit", "junit", "4.12", "/a").with_cpe(cpe_a.clone()),
        gradle("junit", "junit", "4.12", "/b")
            .with_cpe(cpe_b.clone())
            .with_cpe(cpe_a.clone()),
    ]);

    let stored: Vec<Package> = catalog.enumerate(&[]).collect();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].cpes, vec![cpe_a, cpe_b]);
}

/// Absent catalogs behave like empty ones
#[test]
fn test_absent_catalog_behaves_as_empty() {
    let missing: Option<Arc<Catalog>> = None;
    assert_eq!(missing.enumerate(&[PackageType::Deb]).count(), 0);
    assert!(missing.packages_by_path("/status").is_empty());
    assert_eq!(missing.package_count(), 0);
}

/// Serialized package exposes the stored id and type name
#[test]
fn test_stored_package_serializes_with_id() {
    let catalog = Catalog::default();
    let id = catalog.add(Package::new("openssl", "3.0.11", PackageType::Deb));
    let stored = catalog.get(&id).unwrap();

    let json = serde_json::to_value(&stored).unwrap();
    assert_eq!(json["id"], id.as_str());
    assert_eq!(json["type"], "deb");
}

/// Concurrent adds from many tasks merge into a consistent catalog
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_adds_from_tasks() {
    let catalog = Arc::new(Catalog::default());

    let mut handles = Vec::new();
    for task in 0..8 {
        let catalog = Arc::clone(&catalog);
        handles.push(tokio::spawn(async move {
            for i in 0..100 {
                // every task reports the same 25 packages from its own file
                let pkg = Package::new(format!("pkg-{}", i % 25), "1.0", PackageType::Npm)
                    .with_location(Location::new(format!("/task-{task}/package-lock.json")));
                catalog.add(pkg);
            }
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    assert_eq!(catalog.package_count(), 25);
    assert_eq!(catalog.paths().len(), 8);
    for pkg in catalog.enumerate(&[PackageType::Npm]) {
        assert_eq!(pkg.locations.len(), 8, "{pkg}");
    }
    for task in 0..8 {
        let path = format!("/task-{task}/package-lock.json");
        assert_eq!(catalog.packages_by_path(&path).len(), 25);
    }
}

/// Concurrent readers never observe a package missing from its indexes
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_readers_see_consistent_indexes_during_writes() {
    let catalog = Arc::new(Catalog::default());

    let writer = {
        let catalog = Arc::clone(&catalog);
        tokio::spawn(async move {
            for i in 0..500 {
                catalog.add(
                    Package::new(format!("pkg-{i}"), "1", PackageType::Gem)
                        .with_location(Location::new("/Gemfile.lock")),
                );
                tokio::task::yield_now().await;
            }
        })
    };

    let reader = {
        let catalog = Arc::clone(&catalog);
        tokio::spawn(async move {
            for _ in 0..200 {
                for pkg in catalog.enumerate(&[]) {
                    let by_path = catalog.packages_by_path("/Gemfile.lock");
                    assert!(by_path.iter().any(|p| p.name == pkg.name));
                }
                tokio::task::yield_now().await;
            }
        })
    };

    writer.await.unwrap();
    reader.await.unwrap();
    assert_eq!(catalog.package_count(), 500);
}
