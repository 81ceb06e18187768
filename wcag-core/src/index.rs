//! The persisted criteria index.
//!
//! A [`CriteriaIndex`] is a JSON snapshot of every success criterion
//! fragment in the corpus, built ahead of time so that discovery queries
//! never have to walk and parse the corpus at request time. The snapshot
//! records a fingerprint of the guidelines document it was built from;
//! consumers use [`CriteriaIndex::is_stale`] to detect a corpus that has
//! moved on since.

use std::{
    fmt::Write as _,
    fs,
    path::{Path, PathBuf},
    str::FromStr,
    sync::LazyLock,
};

use chrono::{DateTime, Utc};
use rayon::prelude::*;
use scraper::{Html, Selector};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use walkdir::WalkDir;

use crate::{
    domain::{Slug, WcagVersion},
    outline,
    storage::{paths, DocumentStore, StoreError},
};

static CONFORMANCE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".conformance-level").expect("this must never fail"));

/// WCAG conformance level of a success criterion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ConformanceLevel {
    /// Level A.
    A,
    /// Level AA.
    AA,
    /// Level AAA.
    AAA,
}

impl ConformanceLevel {
    /// Extracts a level from free-form marker text such as "(Level AA)".
    ///
    /// Longest spelling is checked first so "AAA" is never read as "AA".
    #[must_use]
    pub fn from_text(text: &str) -> Option<Self> {
        if text.contains("AAA") {
            Some(Self::AAA)
        } else if text.contains("AA") {
            Some(Self::AA)
        } else if text.contains('A') {
            Some(Self::A)
        } else {
            None
        }
    }

    /// The canonical spelling.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::AA => "AA",
            Self::AAA => "AAA",
        }
    }
}

impl std::fmt::Display for ConformanceLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The string is not one of the exact spellings `A`, `AA` or `AAA`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid conformance level '{0}': expected A, AA or AAA")]
pub struct ParseLevelError(String);

impl FromStr for ConformanceLevel {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "A" => Ok(Self::A),
            "AA" => Ok(Self::AA),
            "AAA" => Ok(Self::AAA),
            other => Err(ParseLevelError(other.to_string())),
        }
    }
}

/// One indexed success criterion fragment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CriterionRecord {
    /// The criterion slug.
    pub id: Slug,
    /// The version directory the fragment was found in.
    pub version: WcagVersion,
    /// Conformance level, when the fragment carries a level marker.
    pub conformance_level: Option<ConformanceLevel>,
    /// First heading of the fragment, empty when it has none.
    pub title: String,
    /// The fragment HTML as stored.
    pub raw_content: String,
}

/// A snapshot of all success criteria in a corpus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CriteriaIndex {
    generated: DateTime<Utc>,
    source_fingerprint: String,
    records: Vec<CriterionRecord>,
}

/// Errors that can occur while building, loading or saving an index.
#[derive(Debug, thiserror::Error)]
pub enum IndexError {
    /// The corpus could not be read.
    #[error(transparent)]
    Store(#[from] StoreError),
    /// The index file could not be read or written.
    #[error("failed to access criteria index at {}", path.display())]
    Io {
        /// The index file path.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The index file is not valid index JSON.
    #[error("invalid criteria index JSON at {}", path.display())]
    Json {
        /// The index file path.
        path: PathBuf,
        /// The underlying decode error.
        #[source]
        source: serde_json::Error,
    },
}

impl CriteriaIndex {
    /// Builds an index by walking every criterion fragment in the corpus.
    ///
    /// Fragments that sit outside the expected layout or fail to read are
    /// skipped; the guidelines document itself is required because its
    /// fingerprint anchors staleness detection.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError::Store`] if the guidelines document cannot be
    /// read.
    pub fn build(store: &DocumentStore) -> Result<Self, IndexError> {
        let source_fingerprint = fingerprint(&store.read_guidelines()?);

        let fragments: Vec<(WcagVersion, Slug, PathBuf)> =
            WalkDir::new(paths::criteria_dir(store.root()))
                .min_depth(2)
                .max_depth(2)
                .into_iter()
                .filter_map(Result::ok)
                .filter_map(|entry| {
                    let path = entry.into_path();
                    match classify_fragment(&path) {
                        Some((version, slug)) => Some((version, slug, path)),
                        None => {
                            tracing::debug!(
                                "Skipping fragment outside the sc layout at {}",
                                path.display()
                            );
                            None
                        }
                    }
                })
                .collect();

        let mut records: Vec<CriterionRecord> = fragments
            .into_par_iter()
            .filter_map(|(version, slug, path)| match fs::read_to_string(&path) {
                Ok(html) => Some(record_from(version, slug, html)),
                Err(error) => {
                    tracing::debug!("Skipping unreadable fragment {}: {error}", path.display());
                    None
                }
            })
            .collect();
        records.sort_by(|a, b| {
            a.version
                .cmp(&b.version)
                .then_with(|| a.id.as_str().cmp(b.id.as_str()))
        });

        Ok(Self {
            generated: Utc::now(),
            source_fingerprint,
            records,
        })
    }

    /// Loads an index from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError::Io`] if the file cannot be read and
    /// [`IndexError::Json`] if its contents do not decode.
    pub fn load(path: &Path) -> Result<Self, IndexError> {
        let json = fs::read_to_string(path).map_err(|source| IndexError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&json).map_err(|source| IndexError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Writes the index as pretty-printed JSON, creating parent
    /// directories as needed.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError::Io`] if writing fails or [`IndexError::Json`]
    /// if serialization fails.
    pub fn save(&self, path: &Path) -> Result<(), IndexError> {
        let json = serde_json::to_string_pretty(self).map_err(|source| IndexError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| IndexError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        }
        fs::write(path, json + "\n").map_err(|source| IndexError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Whether the corpus has diverged from the guidelines document this
    /// index was built from. An unreadable guidelines document counts as
    /// stale.
    #[must_use]
    pub fn is_stale(&self, store: &DocumentStore) -> bool {
        match store.read_guidelines() {
            Ok(html) => fingerprint(&html) != self.source_fingerprint,
            Err(error) => {
                tracing::debug!("Could not re-read guidelines for staleness check: {error}");
                true
            }
        }
    }

    /// The first record with the given slug.
    ///
    /// Records are sorted by version then slug, so this returns the
    /// earliest version containing the criterion, matching resolution
    /// order.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&CriterionRecord> {
        self.records.iter().find(|record| record.id.as_str() == id)
    }

    /// All records, sorted by version then slug.
    #[must_use]
    pub fn records(&self) -> &[CriterionRecord] {
        &self.records
    }

    /// Number of indexed criteria.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the index holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// When the index was built.
    #[must_use]
    pub const fn generated(&self) -> DateTime<Utc> {
        self.generated
    }
}

/// Interprets a walked path as `<version>/<slug>.html`, rejecting
/// anything else.
fn classify_fragment(path: &Path) -> Option<(WcagVersion, Slug)> {
    if path.extension().is_none_or(|ext| ext != "html") {
        return None;
    }
    let version = path
        .parent()?
        .file_name()?
        .to_str()?
        .parse::<WcagVersion>()
        .ok()?;
    let slug = Slug::new(path.file_stem()?.to_str()?.to_string()).ok()?;
    Some((version, slug))
}

fn record_from(version: WcagVersion, id: Slug, html: String) -> CriterionRecord {
    let document = Html::parse_document(&html);
    let title = outline::first_heading_of(&document).unwrap_or_default();
    let conformance_level = document
        .select(&CONFORMANCE)
        .next()
        .map(|marker| outline::normalized_text(marker))
        .and_then(|text| ConformanceLevel::from_text(&text));
    CriterionRecord {
        id,
        version,
        conformance_level,
        title,
        raw_content: html,
    }
}

fn fingerprint(html: &str) -> String {
    let digest = Sha256::digest(html.as_bytes());
    let mut out = String::with_capacity(digest.len() * 2);
    for byte in digest {
        write!(out, "{byte:02x}").expect("this must never fail");
    }
    out
}
