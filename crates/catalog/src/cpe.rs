//! CPE 2.3 formatted string
//!
//! CPE 문자열 생성은 이 크레이트의 관심사가 아닙니다. 여기서는 형식만 검증하고
//! 패키지 매칭 증거로 운반합니다.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

const CPE_PREFIX: &str = "cpe:2.3:";
const CPE_COMPONENTS: usize = 13;

/// 검증된 CPE 2.3 문자열
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Cpe(String);

impl Cpe {
    /// CPE 문자열을 검증하여 생성합니다.
    ///
    /// `cpe:2.3:` 접두사와 13개의 `:` 구분 요소(`\:` 이스케이프 제외)가 필요합니다.
    pub fn new(value: impl Into<String>) -> Result<Self, CatalogError> {
        let value = value.into();
        let trimmed = value.trim();

        if !trimmed.starts_with(CPE_PREFIX) {
            return Err(CatalogError::InvalidCpe {
                value,
                reason: format!("missing '{CPE_PREFIX}' prefix"),
            });
        }

        let components = split_components(trimmed);
        if components.len() != CPE_COMPONENTS {
            return Err(CatalogError::InvalidCpe {
                reason: format!(
                    "expected {CPE_COMPONENTS} components, found {}",
                    components.len()
                ),
                value,
            });
        }

        if let Some(pos) = components.iter().position(|c| c.is_empty()) {
            return Err(CatalogError::InvalidCpe {
                reason: format!("component {pos} is empty"),
                value,
            });
        }

        Ok(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// 이스케이프되지 않은 `:`로 분리합니다.
fn split_components(value: &str) -> Vec<&str> {
    let mut components = Vec::with_capacity(CPE_COMPONENTS);
    let mut start = 0;
    let mut escaped = false;
    for (i, ch) in value.char_indices() {
        match ch {
            '\\' if !escaped => escaped = true,
            ':' if !escaped => {
                components.push(&value[start..i]);
                start = i + 1;
            }
            _ => escaped = false,
        }
    }
    components.push(&value[start..]);
    components
}

impl FromStr for Cpe {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for Cpe {
    type Error = CatalogError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Cpe> for String {
    fn from(cpe: Cpe) -> Self {
        cpe.0
    }
}

impl fmt::Display for Cpe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_valid_cpe() {
        let cpe = Cpe::new(" cpe:2.3:a:apache:log4j:2.14.1:*:*:*:*:*:*:* ").unwrap();
        assert_eq!(cpe.as_str(), "cpe:2.3:a:apache:log4j:2.14.1:*:*:*:*:*:*:*");
    }

    #[test]
    fn rejects_missing_prefix() {
        let err = Cpe::new("cpe:/a:apache:log4j:2.14.1").unwrap_err();
        assert!(err.to_string().contains("prefix"));
    }

    #[test]
    fn rejects_wrong_component_count() {
        let err = Cpe::new("cpe:2.3:a:apache:log4j").unwrap_err();
        assert!(err.to_string().contains("13 components"));
    }

    #[test]
    fn rejects_empty_component() {
        assert!(Cpe::new("cpe:2.3:a::log4j:2.14.1:*:*:*:*:*:*:*").is_err());
    }

    #[test]
    fn escaped_colon_is_not_a_separator() {
        assert!(Cpe::new(r"cpe:2.3:a:vendor:prod\:uct:1.0:*:*:*:*:*:*:*").is_ok());
        assert!(Cpe::new(r"cpe:2.3:a:vendor:prod\:uct:1.0:*:*:*:*:*:*").is_err());
    }

    #[test]
    fn serde_validates_on_deserialize() {
        let ok: Result<Cpe, _> =
            serde_json::from_str("\"cpe:2.3:a:package:1:1:*:*:*:*:*:*:*\"");
        assert!(ok.is_ok());
        let bad: Result<Cpe, _> = serde_json::from_str("\"not-a-cpe\"");
        assert!(bad.is_err());
    }
}
