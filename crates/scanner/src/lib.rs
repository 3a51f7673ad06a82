#![doc = include_str!("../README.md")]
//!
//! # Module Structure
//!
//! - [`error`]: Domain error types (`ScannerError`)
//! - [`config`]: Scanner configuration (`ScannerConfig`, builder)
//! - [`cataloger`]: Manifest catalogers (`Cataloger` trait, `CatalogerRegistry`,
//!   `BuildGradleCataloger`, `GradleLockfileCataloger`, `NpmLockCataloger`)
//! - [`scanner`]: Concurrent directory scanner (`CatalogScanner`, `ScanSummary`)
//!
//! # Architecture
//!
//! ```text
//! root_dirs --> discover_manifests --> CatalogerRegistry::matching
//!                                            |
//!                           +----------------+----------------+
//!                           |                |                |
//!                     build.gradle    gradle.lockfile   package-lock.json
//!                           |                |                |
//!                           +----------------+----------------+
//!                                            |
//!                                   Catalog::add (merge + index)
//! ```

pub mod cataloger;
pub mod config;
pub mod error;
pub mod scanner;

// --- Public API Re-exports ---

// Scanner (main orchestrator)
pub use scanner::{CatalogScanner, CatalogScannerBuilder, ScanSummary};

// Configuration
pub use config::{ScannerConfig, ScannerConfigBuilder};

// Error
pub use error::ScannerError;

// Catalogers
pub use cataloger::{
    BuildGradleCataloger, Cataloger, CatalogerRegistry, GradleLockfileCataloger, NpmLockCataloger,
};
