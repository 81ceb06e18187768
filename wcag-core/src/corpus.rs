//! The corpus façade.
//!
//! [`Corpus`] is the one entry point consumers need: give it an address,
//! get back a markdown document. It owns a [`DocumentStore`] and an
//! optional [`CriteriaIndex`] and wires resolution, extraction and
//! conversion together behind a single error type.

use crate::{
    convert::{self, ConvertError},
    domain::{DocumentKind, ResourceAddress, Slug, Technology, WcagVersion},
    index::CriteriaIndex,
    outline::{self, CriterionRef},
    resolver::{self, Namespace, Resolved, ResolveError},
    storage::{DocumentStore, StoreError},
};

/// A resolved and transformed document, ready to serve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedDocument {
    /// What kind of document this is.
    pub kind: DocumentKind,
    /// The requested identifier; `None` for the outline, which has none.
    pub id: Option<String>,
    /// The version namespace the document came from, when it has one.
    pub version: Option<WcagVersion>,
    /// The technology namespace the document came from, when it has one.
    pub technology: Option<Technology>,
    /// The markdown content.
    pub markdown: String,
}

/// Errors produced while fetching a document.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The request itself is malformed and no lookup was attempted.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    /// The identifier is well formed but nothing in the corpus matches.
    #[error("{kind} '{id}' not found")]
    NotFound {
        /// The kind that was requested.
        kind: DocumentKind,
        /// The identifier as given.
        id: String,
    },
    /// A technique identifier with a prefix outside the technology table.
    #[error("unknown technique prefix '{prefix}' in identifier '{id}'")]
    UnknownPrefix {
        /// The derived prefix.
        prefix: String,
        /// The identifier as given.
        id: String,
    },
    /// The store failed for a reason other than absence.
    #[error(transparent)]
    Store(StoreError),
    /// Markdown conversion failed.
    #[error(transparent)]
    Convert(#[from] ConvertError),
}

impl From<ResolveError> for FetchError {
    fn from(error: ResolveError) -> Self {
        match error {
            ResolveError::InvalidIdentifier { .. } => Self::InvalidRequest(error.to_string()),
            ResolveError::UnknownPrefix { prefix, id } => Self::UnknownPrefix { prefix, id },
            ResolveError::NotFound { kind, id } => Self::NotFound { kind, id },
            ResolveError::Store(store) => Self::Store(store),
        }
    }
}

/// A WCAG documentation corpus with optional criteria index.
#[derive(Debug, Clone)]
pub struct Corpus {
    store: DocumentStore,
    index: Option<CriteriaIndex>,
}

impl Corpus {
    /// Creates a corpus over `store`, consulting `index` for criterion
    /// titles when present.
    #[must_use]
    pub const fn new(store: DocumentStore, index: Option<CriteriaIndex>) -> Self {
        Self { store, index }
    }

    /// The underlying store.
    #[must_use]
    pub const fn store(&self) -> &DocumentStore {
        &self.store
    }

    /// The loaded criteria index, if any.
    #[must_use]
    pub const fn index(&self) -> Option<&CriteriaIndex> {
        self.index.as_ref()
    }

    /// Fetches the document at `address`.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::NotFound`] when no namespace contains the
    /// identifier, [`FetchError::InvalidRequest`] or
    /// [`FetchError::UnknownPrefix`] for identifiers that fail validation,
    /// and [`FetchError::Store`] or [`FetchError::Convert`] when reading
    /// or converting fails.
    pub fn fetch(&self, address: &ResourceAddress) -> Result<FetchedDocument, FetchError> {
        match address {
            ResourceAddress::Outline => self.fetch_outline(),
            ResourceAddress::Criterion(slug) => self.fetch_criterion(slug),
            ResourceAddress::Understanding(slug) => self.fetch_understanding(slug),
            ResourceAddress::Technique(id) => self.fetch_technique(id),
        }
    }

    /// Parses `uri` as a `wcag://` address and fetches it.
    ///
    /// # Errors
    ///
    /// As [`Corpus::fetch`], plus [`FetchError::InvalidRequest`] when the
    /// URI does not parse.
    pub fn fetch_uri(&self, uri: &str) -> Result<FetchedDocument, FetchError> {
        let address = uri
            .parse::<ResourceAddress>()
            .map_err(|error| FetchError::InvalidRequest(error.to_string()))?;
        self.fetch(&address)
    }

    /// Fetches the guidelines outline.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::NotFound`] when the corpus has no guidelines
    /// document.
    pub fn fetch_outline(&self) -> Result<FetchedDocument, FetchError> {
        let html = resolver::resolve_outline(&self.store)?;
        let principles = outline::extract(&html);
        let markdown = outline::render(&principles, |criterion| self.criterion_title(criterion));
        Ok(FetchedDocument {
            kind: DocumentKind::Outline,
            id: None,
            version: None,
            technology: None,
            markdown,
        })
    }

    /// Fetches a success criterion fragment as markdown.
    ///
    /// # Errors
    ///
    /// See [`Corpus::fetch`].
    pub fn fetch_criterion(&self, slug: &Slug) -> Result<FetchedDocument, FetchError> {
        let resolved = resolver::resolve_criterion(&self.store, slug)?;
        finish(resolved)
    }

    /// Fetches an understanding document as markdown.
    ///
    /// # Errors
    ///
    /// See [`Corpus::fetch`].
    pub fn fetch_understanding(&self, slug: &Slug) -> Result<FetchedDocument, FetchError> {
        let resolved = resolver::resolve_understanding(&self.store, slug)?;
        finish(resolved)
    }

    /// Fetches a technique document as markdown.
    ///
    /// # Errors
    ///
    /// See [`Corpus::fetch`].
    pub fn fetch_technique(&self, id: &str) -> Result<FetchedDocument, FetchError> {
        let resolved = resolver::resolve_technique(&self.store, id)?;
        finish(resolved)
    }

    /// Display title for a criterion reference in the outline.
    ///
    /// Prefers the index, then any heading inlined in the outline itself,
    /// then a heading read from the criterion fragment. Falls back to the
    /// empty string, which the renderer turns into a number-only label.
    fn criterion_title(&self, criterion: &CriterionRef) -> String {
        if let Some(record) = self.index.as_ref().and_then(|index| index.get(&criterion.id)) {
            if !record.title.is_empty() {
                return record.title.clone();
            }
        }
        if let Some(title) = &criterion.title {
            return title.clone();
        }
        if let Some(title) = self.heading_from_store(&criterion.id) {
            return title;
        }
        tracing::debug!("No title found for criterion '{}'", criterion.id);
        String::new()
    }

    fn heading_from_store(&self, id: &str) -> Option<String> {
        let slug = Slug::new(id.to_string()).ok()?;
        let resolved = resolver::resolve_criterion(&self.store, &slug).ok()?;
        outline::first_heading_text(&resolved.html)
    }
}

fn finish(resolved: Resolved) -> Result<FetchedDocument, FetchError> {
    let markdown = convert::to_markdown(resolved.kind, &resolved.html)?;
    let (version, technology) = match resolved.namespace {
        Namespace::Version(version) => (Some(version), None),
        Namespace::Technology(technology) => (None, Some(technology)),
    };
    Ok(FetchedDocument {
        kind: resolved.kind,
        id: Some(resolved.id),
        version,
        technology,
        markdown,
    })
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;

    use tempfile::TempDir;

    use super::*;

    fn write(root: &Path, relative: &str, contents: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }

    fn corpus_dir() -> TempDir {
        let dir = TempDir::new().unwrap();
        write(
            dir.path(),
            "guidelines/index.html",
            r#"<html><body>
            <section class="principle"><h2>Perceivable</h2>
                <section class="guideline"><h3>Text Alternatives</h3>
                    <div data-include="sc/20/non-text-content.html"></div>
                </section>
            </section>
            <section class="principle"><h2>Operable</h2>
                <section class="guideline"><h3>Keyboard Accessible</h3>
                    <section class="sc" id="keyboard"><h4>Keyboard</h4></section>
                </section>
            </section>
            </body></html>"#,
        );
        write(
            dir.path(),
            "guidelines/sc/20/non-text-content.html",
            "<h4>Non-text Content</h4><p class=\"conformance-level\">(Level A)</p>",
        );
        write(
            dir.path(),
            "guidelines/sc/20/keyboard.html",
            "<h4>Keyboard</h4><p class=\"conformance-level\">(Level A)</p>",
        );
        write(
            dir.path(),
            "understanding/20/keyboard.html",
            r#"<h1>Understanding Keyboard</h1>
            <p>Use <a href="../../techniques/general/G90.html">G90</a>
            or see <a href="non-text-content.html">a sibling</a>.</p>"#,
        );
        write(
            dir.path(),
            "techniques/general/G90.html",
            "<h1>G90: Providing keyboard triggers</h1>",
        );
        write(
            dir.path(),
            "techniques/client-side-script/SCR21.html",
            "<h1>SCR21: Using functions of the DOM</h1>",
        );
        dir
    }

    fn plain_corpus(dir: &TempDir) -> Corpus {
        Corpus::new(DocumentStore::new(dir.path()), None)
    }

    fn slug(raw: &str) -> Slug {
        Slug::try_from(raw).unwrap()
    }

    #[test]
    fn outline_fills_titles_from_fragments_when_unindexed() {
        let dir = corpus_dir();
        let outline = plain_corpus(&dir).fetch_outline().unwrap();

        assert_eq!(outline.kind, DocumentKind::Outline);
        assert_eq!(outline.id, None);
        assert!(outline
            .markdown
            .contains("- [1.1.1 Non-text Content](wcag://criterion/non-text-content)"));
        assert!(outline
            .markdown
            .contains("- [2.1.1 Keyboard](wcag://criterion/keyboard)"));
    }

    #[test]
    fn outline_prefers_index_titles_over_fragments() {
        let dir = corpus_dir();
        let store = DocumentStore::new(dir.path());
        let index = CriteriaIndex::build(&store).unwrap();
        // The fragment moves on after indexing; the snapshot still wins.
        write(
            dir.path(),
            "guidelines/sc/20/non-text-content.html",
            "<h4>Renamed Since Indexing</h4>",
        );

        let outline = Corpus::new(store, Some(index)).fetch_outline().unwrap();
        assert!(outline
            .markdown
            .contains("- [1.1.1 Non-text Content](wcag://criterion/non-text-content)"));
    }

    #[test]
    fn outline_degrades_missing_criterion_to_a_number_only_line() {
        let dir = corpus_dir();
        // The outline references a criterion that exists neither on disk
        // nor in the index.
        write(
            dir.path(),
            "guidelines/index.html",
            r#"<section class="principle"><h2>Perceivable</h2>
            <section class="guideline"><h3>Text Alternatives</h3>
                <div data-include="sc/20/non-text-content.html"></div>
                <div data-include="sc/20/ghost.html"></div>
            </section>
            </section>"#,
        );
        let store = DocumentStore::new(dir.path());
        let index = CriteriaIndex::build(&store).unwrap();
        assert!(index.get("ghost").is_none());

        let outline = Corpus::new(store, Some(index)).fetch_outline().unwrap();
        assert!(outline
            .markdown
            .contains("- [1.1.1 Non-text Content](wcag://criterion/non-text-content)"));
        assert!(outline.markdown.contains("- [1.1.2](wcag://criterion/ghost)"));
    }

    #[test]
    fn outline_without_guidelines_is_not_found() {
        let dir = TempDir::new().unwrap();
        let error = plain_corpus(&dir).fetch_outline().unwrap_err();

        assert!(matches!(
            error,
            FetchError::NotFound {
                kind: DocumentKind::Outline,
                ..
            }
        ));
    }

    #[test]
    fn criterion_fetch_reports_its_version() {
        let dir = corpus_dir();
        let document = plain_corpus(&dir).fetch_criterion(&slug("keyboard")).unwrap();

        assert_eq!(document.kind, DocumentKind::Criterion);
        assert_eq!(document.id.as_deref(), Some("keyboard"));
        assert_eq!(document.version, Some(WcagVersion::V20));
        assert_eq!(document.technology, None);
        assert!(document.markdown.contains("#### Keyboard"));
    }

    #[test]
    fn understanding_fetch_rewrites_corpus_links() {
        let dir = corpus_dir();
        let document = plain_corpus(&dir)
            .fetch_understanding(&slug("keyboard"))
            .unwrap();

        assert!(document.markdown.contains("[G90](wcag://technique/G90)"));
        assert!(document
            .markdown
            .contains("[a sibling](wcag://understanding/non-text-content)"));
    }

    #[test]
    fn technique_fetch_reports_its_technology() {
        let dir = corpus_dir();
        let document = plain_corpus(&dir).fetch_technique("SCR21").unwrap();

        assert_eq!(document.technology, Some(Technology::ClientSideScript));
        assert_eq!(document.version, None);
        assert!(document.markdown.contains("SCR21"));
    }

    #[test]
    fn fetch_uri_dispatches_by_shape() {
        let dir = corpus_dir();
        let corpus = plain_corpus(&dir);

        assert_eq!(
            corpus.fetch_uri("wcag://guidelines").unwrap().kind,
            DocumentKind::Outline
        );
        assert_eq!(
            corpus.fetch_uri("wcag://technique/G90").unwrap().kind,
            DocumentKind::Technique
        );
    }

    #[test]
    fn unparseable_uri_is_an_invalid_request() {
        let dir = corpus_dir();
        let error = plain_corpus(&dir).fetch_uri("https://example.com/").unwrap_err();

        assert!(matches!(error, FetchError::InvalidRequest(_)));
    }

    #[test]
    fn traversal_slug_is_an_invalid_request() {
        let dir = corpus_dir();
        let error = plain_corpus(&dir)
            .fetch_uri("wcag://criterion/../../etc/passwd")
            .unwrap_err();

        assert!(matches!(error, FetchError::InvalidRequest(_)));
    }

    #[test]
    fn unknown_prefix_is_never_reported_as_not_found() {
        let dir = corpus_dir();
        let error = plain_corpus(&dir).fetch_uri("wcag://technique/S99").unwrap_err();

        assert!(matches!(
            error,
            FetchError::UnknownPrefix { ref prefix, .. } if prefix == "S"
        ));
    }

    #[test]
    fn missing_criterion_is_not_found() {
        let dir = corpus_dir();
        let error = plain_corpus(&dir)
            .fetch_uri("wcag://criterion/nowhere")
            .unwrap_err();

        assert!(matches!(
            error,
            FetchError::NotFound {
                kind: DocumentKind::Criterion,
                ..
            }
        ));
    }

    #[test]
    fn repeated_fetches_are_byte_identical() {
        let dir = corpus_dir();
        let corpus = plain_corpus(&dir);

        let first = corpus.fetch_outline().unwrap();
        let second = corpus.fetch_outline().unwrap();
        assert_eq!(first.markdown, second.markdown);

        let first = corpus.fetch_technique("G90").unwrap();
        let second = corpus.fetch_technique("G90").unwrap();
        assert_eq!(first.markdown, second.markdown);
    }
}
