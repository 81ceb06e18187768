use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// A WCAG specification version recognised by the corpus.
///
/// Versions are totally ordered. [`WcagVersion::ALL`] lists them in
/// ascending order, which is also the order the resolver probes when
/// searching for a version-namespaced document.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum WcagVersion {
    /// WCAG 2.0.
    #[serde(rename = "20")]
    V20,
    /// WCAG 2.1.
    #[serde(rename = "21")]
    V21,
    /// WCAG 2.2.
    #[serde(rename = "22")]
    V22,
}

impl WcagVersion {
    /// Every supported version, in ascending order.
    pub const ALL: [Self; 3] = [Self::V20, Self::V21, Self::V22];

    /// The corpus directory label for this version.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::V20 => "20",
            Self::V21 => "21",
            Self::V22 => "22",
        }
    }

    /// The human-readable version number, e.g. "2.1".
    #[must_use]
    pub const fn number(self) -> &'static str {
        match self {
            Self::V20 => "2.0",
            Self::V21 => "2.1",
            Self::V22 => "2.2",
        }
    }
}

impl fmt::Display for WcagVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Error returned when a string is not a recognised version label.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("unrecognised WCAG version label '{0}': expected 20, 21 or 22")]
pub struct ParseVersionError(String);

impl FromStr for WcagVersion {
    type Err = ParseVersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "20" => Ok(Self::V20),
            "21" => Ok(Self::V21),
            "22" => Ok(Self::V22),
            other => Err(ParseVersionError(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    #[test_case("20", WcagVersion::V20; "wcag 20")]
    #[test_case("21", WcagVersion::V21; "wcag 21")]
    #[test_case("22", WcagVersion::V22; "wcag 22")]
    fn parse_valid_label(label: &str, expected: WcagVersion) {
        assert_eq!(label.parse::<WcagVersion>().unwrap(), expected);
    }

    #[test_case(""; "empty")]
    #[test_case("2.0"; "dotted")]
    #[test_case("23"; "unsupported")]
    #[test_case("v21"; "prefixed")]
    fn parse_invalid_label(label: &str) {
        assert!(label.parse::<WcagVersion>().is_err());
    }

    #[test]
    fn all_is_ascending() {
        let mut sorted = WcagVersion::ALL;
        sorted.sort();
        assert_eq!(sorted, WcagVersion::ALL);
        assert!(WcagVersion::V20 < WcagVersion::V21);
        assert!(WcagVersion::V21 < WcagVersion::V22);
    }

    #[test]
    fn display_round_trips() {
        for version in WcagVersion::ALL {
            assert_eq!(version.to_string().parse::<WcagVersion>().unwrap(), version);
        }
    }

    #[test]
    fn serde_uses_directory_labels() {
        let json = serde_json::to_string(&WcagVersion::V21).unwrap();
        assert_eq!(json, "\"21\"");
        let back: WcagVersion = serde_json::from_str(&json).unwrap();
        assert_eq!(back, WcagVersion::V21);
    }

    #[test]
    fn numbers_match_labels() {
        assert_eq!(WcagVersion::V20.number(), "2.0");
        assert_eq!(WcagVersion::V22.number(), "2.2");
    }
}
