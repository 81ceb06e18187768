use std::{fmt, ops::Deref, str::FromStr};

use serde::{Deserialize, Serialize};

/// A validated identifier for a version-namespaced document, such as
/// `contrast-minimum` or `non-text-content`.
///
/// Slugs are opaque and case-sensitive. The character set is restricted to
/// ASCII alphanumerics plus `.`, `_` and `-` so that a slug joined onto a
/// namespace directory can never traverse outside it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Slug(String);

impl Slug {
    /// Creates a new `Slug` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is empty or contains characters
    /// outside `[A-Za-z0-9._-]`.
    pub fn new(s: String) -> Result<Self, ParseSlugError> {
        if s.is_empty() || !s.chars().all(is_slug_char) {
            return Err(ParseSlugError(s));
        }
        Ok(Self(s))
    }

    /// Returns the string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

const fn is_slug_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-')
}

impl TryFrom<String> for Slug {
    type Error = ParseSlugError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for Slug {
    type Error = ParseSlugError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value.to_string())
    }
}

impl From<Slug> for String {
    fn from(slug: Slug) -> Self {
        slug.0
    }
}

impl AsRef<str> for Slug {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Deref for Slug {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Slug {
    type Err = ParseSlugError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.to_string())
    }
}

/// Error returned when a string is not a valid document identifier.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("invalid identifier '{0}': must be non-empty and contain only ASCII alphanumerics, '.', '_' or '-'")]
pub struct ParseSlugError(String);

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    #[test_case("contrast-minimum"; "hyphenated")]
    #[test_case("non-text-content"; "multiple hyphens")]
    #[test_case("focus_visible"; "underscore")]
    #[test_case("x"; "single character")]
    #[test_case("a.b"; "dotted")]
    #[test_case("Target-Size"; "mixed case preserved")]
    fn valid_slugs_parse(raw: &str) {
        let slug = raw.parse::<Slug>().unwrap();
        assert_eq!(slug.as_str(), raw);
    }

    #[test_case(""; "empty")]
    #[test_case("a/b"; "slash")]
    #[test_case("a b"; "space")]
    #[test_case("a\\b"; "backslash")]
    #[test_case("caf\u{e9}"; "non ascii")]
    #[test_case("a\tb"; "tab")]
    fn invalid_slugs_rejected(raw: &str) {
        assert!(raw.parse::<Slug>().is_err());
    }

    #[test]
    fn slugs_are_case_sensitive() {
        let lower = Slug::try_from("contrast").unwrap();
        let upper = Slug::try_from("Contrast").unwrap();
        assert_ne!(lower, upper);
    }

    #[test]
    fn serde_round_trip() {
        let slug = Slug::try_from("contrast-minimum").unwrap();
        let json = serde_json::to_string(&slug).unwrap();
        assert_eq!(json, "\"contrast-minimum\"");
        let back: Slug = serde_json::from_str(&json).unwrap();
        assert_eq!(back, slug);
    }

    #[test]
    fn serde_rejects_invalid() {
        let result: Result<Slug, _> = serde_json::from_str("\"../escape\"");
        assert!(result.is_err());
    }

    #[test]
    fn error_display() {
        let error = "a b".parse::<Slug>().unwrap_err();
        assert_eq!(
            error.to_string(),
            "invalid identifier 'a b': must be non-empty and contain only ASCII alphanumerics, '.', '_' or '-'"
        );
    }
}
