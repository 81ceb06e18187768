//! Identifier resolution across version and technology namespaces.
//!
//! Search-order policy lives here and nowhere else. Version-namespaced
//! documents are probed across [`WcagVersion::ALL`] in ascending order and
//! the first version containing the identifier wins, so content in an
//! earlier version deliberately shadows the same identifier in a later one.
//! Techniques skip the fan-out entirely: their prefix names the single
//! technology directory to check. The outline needs no search at all and is
//! read straight from the store.

use crate::{
    domain::{DocumentKind, ParseTechniqueIdError, Slug, TechniqueId, Technology, WcagVersion},
    storage::{DocumentStore, StoreError},
};

/// The namespace a document was found in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Namespace {
    /// A specification version directory.
    Version(WcagVersion),
    /// A technology directory.
    Technology(Technology),
}

/// A document located in the corpus, with its content loaded.
///
/// Produced by the resolve functions and consumed once by the transformer;
/// never persisted.
#[derive(Debug, Clone)]
pub struct Resolved {
    /// The kind of document that was requested.
    pub kind: DocumentKind,
    /// Where the document was found.
    pub namespace: Namespace,
    /// The identifier as requested.
    pub id: String,
    /// The raw HTML content.
    pub html: String,
}

/// Errors that can occur while resolving an identifier.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    /// The technique identifier is empty, not led by an uppercase ASCII
    /// letter, or contains characters outside ASCII alphanumerics.
    #[error("malformed technique identifier '{id}'")]
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
    /// No namespace contains the identifier.
    #[error("{kind} '{id}' not found")]
    NotFound {
        /// The kind that was requested.
        kind: DocumentKind,
        /// The identifier as given.
        id: String,
    },
    /// The store failed for a reason other than absence.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Reads the guidelines outline source.
///
/// The outline has a fixed location and no identifier, so there is
/// nothing to search; this exists so that every document lookup goes
/// through the resolver.
///
/// # Errors
///
/// Returns [`ResolveError::NotFound`] if the corpus has no guidelines
/// document, or [`ResolveError::Store`] for any other read failure.
pub fn resolve_outline(store: &DocumentStore) -> Result<String, ResolveError> {
    store.read_guidelines().map_err(|error| match error {
        StoreError::NotFound(_) => ResolveError::NotFound {
            kind: DocumentKind::Outline,
            id: "guidelines".to_string(),
        },
        other => ResolveError::Store(other),
    })
}

/// Resolves a success criterion by probing versions in ascending order.
///
/// # Errors
///
/// Returns [`ResolveError::NotFound`] if no version contains the slug, or
/// [`ResolveError::Store`] if reading the winning fragment fails.
pub fn resolve_criterion(store: &DocumentStore, slug: &Slug) -> Result<Resolved, ResolveError> {
    let version = first_version_match(slug, DocumentKind::Criterion, |version| {
        store.criterion_exists(version, slug)
    })?;
    let html = store.read_criterion(version, slug)?;
    Ok(Resolved {
        kind: DocumentKind::Criterion,
        namespace: Namespace::Version(version),
        id: slug.to_string(),
        html,
    })
}

/// Resolves an understanding document by probing versions in ascending
/// order.
///
/// # Errors
///
/// Returns [`ResolveError::NotFound`] if no version contains the slug, or
/// [`ResolveError::Store`] if reading the winning document fails.
pub fn resolve_understanding(store: &DocumentStore, slug: &Slug) -> Result<Resolved, ResolveError> {
    let version = first_version_match(slug, DocumentKind::Understanding, |version| {
        store.understanding_exists(version, slug)
    })?;
    let html = store.read_understanding(version, slug)?;
    Ok(Resolved {
        kind: DocumentKind::Understanding,
        namespace: Namespace::Version(version),
        id: slug.to_string(),
        html,
    })
}

/// Resolves a technique by deriving its technology from the identifier
/// prefix and checking that single directory.
///
/// # Errors
///
/// Returns [`ResolveError::InvalidIdentifier`] or
/// [`ResolveError::UnknownPrefix`] for identifiers the prefix table cannot
/// place, [`ResolveError::NotFound`] if the technology directory does not
/// contain the technique, or [`ResolveError::Store`] if the read fails.
pub fn resolve_technique(store: &DocumentStore, raw: &str) -> Result<Resolved, ResolveError> {
    let id = raw.parse::<TechniqueId>().map_err(|error| match error {
        ParseTechniqueIdError::InvalidIdentifier { id } => ResolveError::InvalidIdentifier { id },
        ParseTechniqueIdError::UnknownPrefix { prefix, id } => {
            ResolveError::UnknownPrefix { prefix, id }
        }
    })?;

    if !store.technique_exists(&id) {
        tracing::debug!(
            "Technique '{}' not present under '{}'",
            id.as_str(),
            id.technology()
        );
        return Err(ResolveError::NotFound {
            kind: DocumentKind::Technique,
            id: id.as_str().to_string(),
        });
    }

    let html = store.read_technique(&id)?;
    Ok(Resolved {
        kind: DocumentKind::Technique,
        namespace: Namespace::Technology(id.technology()),
        id: id.as_str().to_string(),
        html,
    })
}

fn first_version_match(
    slug: &Slug,
    kind: DocumentKind,
    exists: impl Fn(WcagVersion) -> bool,
) -> Result<WcagVersion, ResolveError> {
    for version in WcagVersion::ALL {
        if exists(version) {
            return Ok(version);
        }
        tracing::debug!("No {kind} '{slug}' in version {version}");
    }
    Err(ResolveError::NotFound {
        kind,
        id: slug.to_string(),
    })
}
