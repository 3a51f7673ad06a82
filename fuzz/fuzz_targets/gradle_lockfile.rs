#![no_main]

use libfuzzer_sys::fuzz_target;
use pkgscan_catalog::Location;
use pkgscan_scanner::{Cataloger, GradleLockfileCataloger};

fuzz_target!(|data: &[u8]| {
    if let Ok(content) = std::str::from_utf8(data) {
        let location = Location::new("/fuzz/gradle.lockfile");
        if let Ok(packages) = GradleLockfileCataloger.parse(content, &location) {
            for package in &packages {
                assert!(!package.name.is_empty());
            }
        }
    }
});
