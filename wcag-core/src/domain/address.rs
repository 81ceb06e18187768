use std::{fmt, str::FromStr};

use super::{DocumentKind, ParseSlugError, Slug};

/// A logical address for a corpus resource, written as a `wcag://` URI.
///
/// Four shapes exist:
///
/// - `wcag://guidelines` for the outline
/// - `wcag://criterion/{id}` for a success criterion
/// - `wcag://understanding/{id}` for an understanding document
/// - `wcag://technique/{id}` for a technique
///
/// Addresses never encode a version or technology; resolution of the
/// concrete namespace happens later. Technique identifiers are carried
/// verbatim here so that prefix validation can report its own error class.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ResourceAddress {
    /// The guidelines outline.
    Outline,
    /// A success criterion addressed by slug.
    Criterion(Slug),
    /// An understanding document addressed by slug.
    Understanding(Slug),
    /// A technique addressed by its raw identifier.
    Technique(String),
}

impl ResourceAddress {
    /// The document kind this address refers to.
    #[must_use]
    pub const fn kind(&self) -> DocumentKind {
        match self {
            Self::Outline => DocumentKind::Outline,
            Self::Criterion(_) => DocumentKind::Criterion,
            Self::Understanding(_) => DocumentKind::Understanding,
            Self::Technique(_) => DocumentKind::Technique,
        }
    }
}

impl fmt::Display for ResourceAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Outline => write!(f, "wcag://guidelines"),
            Self::Criterion(slug) => write!(f, "wcag://criterion/{slug}"),
            Self::Understanding(slug) => write!(f, "wcag://understanding/{slug}"),
            Self::Technique(id) => write!(f, "wcag://technique/{id}"),
        }
    }
}

/// Errors that can occur when parsing a `wcag://` resource address.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ParseAddressError {
    /// The address does not start with the `wcag://` scheme.
    #[error("address '{0}' does not use the wcag:// scheme")]
    Scheme(String),
    /// The address does not match any known resource shape.
    #[error("address '{0}' does not match a known resource shape")]
    Shape(String),
    /// The identifier segment is not a valid slug.
    #[error("address '{address}' has an invalid identifier: {source}")]
    Identifier {
        /// The full address as given.
        address: String,
        /// The underlying slug validation failure.
        source: ParseSlugError,
    },
}

impl FromStr for ResourceAddress {
    type Err = ParseAddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rest = s
            .strip_prefix("wcag://")
            .ok_or_else(|| ParseAddressError::Scheme(s.to_string()))?;

        if rest == "guidelines" {
            return Ok(Self::Outline);
        }

        let Some((shape, id)) = rest.split_once('/') else {
            return Err(ParseAddressError::Shape(s.to_string()));
        };

        match shape {
            "criterion" => Ok(Self::Criterion(parse_slug(s, id)?)),
            "understanding" => Ok(Self::Understanding(parse_slug(s, id)?)),
            "technique" if !id.is_empty() && !id.contains('/') => {
                Ok(Self::Technique(id.to_string()))
            }
            _ => Err(ParseAddressError::Shape(s.to_string())),
        }
    }
}

impl TryFrom<&str> for ResourceAddress {
    type Error = ParseAddressError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::from_str(value)
    }
}

fn parse_slug(address: &str, id: &str) -> Result<Slug, ParseAddressError> {
    id.parse().map_err(|source| ParseAddressError::Identifier {
        address: address.to_string(),
        source,
    })
}
