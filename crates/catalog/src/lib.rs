#![doc = include_str!("../README.md")]
//!
//! # Module Structure
//!
//! - [`types`]: 패키지 레코드 (`Package`, `PackageType`, `Language`, `Metadata`)
//! - [`location`]: 증거 위치 (`Location`, `Coordinates`, `LocationSet`)
//! - [`cpe`]: 검증된 CPE 2.3 문자열 (`Cpe`)
//! - [`id`]: 결정적 패키지 식별 (`PackageId`, `identity`)
//! - [`id_set`]: 삽입 순서 보존 id 집합 (`OrderedIdSet`)
//! - [`merge`]: 같은 id 레코드의 증거 병합 (`merge_into`)
//! - [`catalog`]: 다중 인덱스 저장소 (`Catalog`, `PackageSource`)
//! - [`error`]: 도메인 에러 (`CatalogError`)
//!
//! # Architecture
//!
//! ```text
//! cataloger A --+
//! cataloger B --+--> Catalog::add --> identity --> merge or insert
//! cataloger C --+                                     |
//!                                 +-------------------+-------------------+
//!                                 |                   |                   |
//!                          id -> Package       type -> ids         path -> ids
//!                                 |                   |                   |
//!                                 +--------- enumerate / packages_by_path +
//! ```

pub mod catalog;
pub mod cpe;
pub mod error;
pub mod id;
pub mod id_set;
pub mod location;
pub mod merge;
pub mod types;

// --- Public API Re-exports ---

// Catalog
pub use catalog::{Catalog, PackageSource, Packages};

// Error
pub use error::CatalogError;

// Identity
pub use id::{PackageId, identity};
pub use id_set::OrderedIdSet;

// Types
pub use cpe::Cpe;
pub use location::{Coordinates, Location, LocationSet};
pub use merge::merge_into;
pub use types::{JavaMetadata, Language, Metadata, NpmMetadata, Package, PackageType};
