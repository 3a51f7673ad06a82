#![no_main]

use libfuzzer_sys::fuzz_target;
use pkgscan_catalog::Location;
use pkgscan_scanner::{BuildGradleCataloger, Cataloger};

fuzz_target!(|data: &[u8]| {
    if let Ok(content) = std::str::from_utf8(data) {
        let location = Location::new("/fuzz/build.gradle");
        let _ = BuildGradleCataloger.parse(content, &location);
    }
});
