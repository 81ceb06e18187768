use std::{fmt, str::FromStr};

/// A technology namespace for implementation techniques.
///
/// Each variant corresponds to one directory under `techniques/` in the
/// corpus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Technology {
    /// WAI-ARIA techniques.
    Aria,
    /// CSS techniques.
    Css,
    /// Documented failures.
    Failures,
    /// Flash techniques.
    Flash,
    /// Technology-agnostic techniques.
    General,
    /// HTML techniques.
    Html,
    /// PDF techniques.
    Pdf,
    /// Client-side scripting techniques.
    ClientSideScript,
    /// Silverlight techniques.
    Silverlight,
    /// SMIL techniques.
    Smil,
    /// Server-side scripting techniques.
    ServerSideScript,
    /// Plain-text techniques.
    Text,
}

impl Technology {
    /// The corpus directory name for this technology.
    #[must_use]
    pub const fn dir_name(self) -> &'static str {
        match self {
            Self::Aria => "aria",
            Self::Css => "css",
            Self::Failures => "failures",
            Self::Flash => "flash",
            Self::General => "general",
            Self::Html => "html",
            Self::Pdf => "pdf",
            Self::ClientSideScript => "client-side-script",
            Self::Silverlight => "silverlight",
            Self::Smil => "smil",
            Self::ServerSideScript => "server-side-script",
            Self::Text => "text",
        }
    }
}

impl fmt::Display for Technology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}

/// Technique prefixes longer than one character, ordered longest first.
///
/// Matching must try these before the single-letter fallback so that `SCR21`
/// maps to client-side scripting rather than whatever `S` would mean, and
/// `FLASH1` is never read as a failure.
const MULTI_CHAR_PREFIXES: [(&str, Technology); 7] = [
    ("FLASH", Technology::Flash),
    ("ARIA", Technology::Aria),
    ("PDF", Technology::Pdf),
    ("SCR", Technology::ClientSideScript),
    ("SVR", Technology::ServerSideScript),
    ("SL", Technology::Silverlight),
    ("SM", Technology::Smil),
];

const fn single_char_technology(c: char) -> Option<Technology> {
    match c {
        'C' => Some(Technology::Css),
        'F' => Some(Technology::Failures),
        'G' => Some(Technology::General),
        'H' => Some(Technology::Html),
        'T' => Some(Technology::Text),
        _ => None,
    }
}

fn prefix_technology(id: &str) -> Option<Technology> {
    for (prefix, technology) in MULTI_CHAR_PREFIXES {
        if id.starts_with(prefix) {
            return Some(technology);
        }
    }
    single_char_technology(id.chars().next()?)
}

/// A technique identifier such as `G90`, `SCR21` or `ARIA5`, together with
/// the technology namespace derived from its prefix.
///
/// The prefix is derived by greedy matching: multi-character prefixes are
/// tried longest first, then the first character alone. Identifiers must
/// start with an uppercase ASCII letter and contain only ASCII
/// alphanumerics.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TechniqueId {
    id: String,
    technology: Technology,
}

impl TechniqueId {
    /// Creates a new `TechniqueId` from a string, deriving its technology.
    ///
    /// # Errors
    ///
    /// Returns [`ParseTechniqueIdError::InvalidIdentifier`] if the string is
    /// empty, not led by an uppercase ASCII letter, or contains characters
    /// outside ASCII alphanumerics. Returns
    /// [`ParseTechniqueIdError::UnknownPrefix`] if the string is well formed
    /// but its prefix maps to no known technology.
    pub fn new(id: String) -> Result<Self, ParseTechniqueIdError> {
        let Some(first) = id.chars().next() else {
            return Err(ParseTechniqueIdError::InvalidIdentifier { id });
        };
        if !first.is_ascii_uppercase() || !id.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(ParseTechniqueIdError::InvalidIdentifier { id });
        }
        match prefix_technology(&id) {
            Some(technology) => Ok(Self { id, technology }),
            None => Err(ParseTechniqueIdError::UnknownPrefix {
                prefix: first.to_string(),
                id,
            }),
        }
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.id
    }

    /// The technology namespace derived from the prefix.
    #[must_use]
    pub const fn technology(&self) -> Technology {
        self.technology
    }
}

impl TryFrom<String> for TechniqueId {
    type Error = ParseTechniqueIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for TechniqueId {
    type Error = ParseTechniqueIdError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value.to_string())
    }
}

impl AsRef<str> for TechniqueId {
    fn as_ref(&self) -> &str {
        &self.id
    }
}

impl fmt::Display for TechniqueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

impl FromStr for TechniqueId {
    type Err = ParseTechniqueIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.to_string())
    }
}

/// Errors that can occur when parsing a technique identifier.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ParseTechniqueIdError {
    /// The identifier is empty, not led by an uppercase ASCII letter, or
    /// contains characters outside ASCII alphanumerics.
    #[error("invalid technique identifier '{id}': expected an uppercase prefix followed by ASCII alphanumerics")]
    InvalidIdentifier {
        /// The identifier as given.
        id: String,
    },
    /// The identifier is well formed but its prefix is not a known
    /// technology.
    #[error("unknown technique prefix '{prefix}' in identifier '{id}'")]
    UnknownPrefix {
        /// The derived prefix.
        prefix: String,
        /// The identifier as given.
        id: String,
    },
}
