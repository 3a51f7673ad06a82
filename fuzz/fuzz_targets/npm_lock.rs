#![no_main]

use libfuzzer_sys::fuzz_target;
use pkgscan_catalog::Location;
use pkgscan_scanner::{Cataloger, NpmLockCataloger};

fuzz_target!(|data: &[u8]| {
    if let Ok(content) = std::str::from_utf8(data) {
        let location = Location::new("/fuzz/package-lock.json");
        let _ = NpmLockCataloger.parse(content, &location);
    }
});
