use std::{
    fs, io,
    path::{Path, PathBuf},
};

use super::paths;
use crate::domain::{Slug, TechniqueId, WcagVersion};

/// Errors that can occur while reading a document from the corpus.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The document file does not exist.
    #[error("document not found at {}", .0.display())]
    NotFound(PathBuf),
    /// An I/O error other than absence.
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Read-only access to a WCAG corpus directory.
///
/// The store owns path construction for every document kind; callers never
/// handle corpus paths directly. Existence probes are separate from reads so
/// the resolver can fan out across versions without touching file contents.
#[derive(Debug, Clone)]
pub struct DocumentStore {
    root: PathBuf,
}

impl DocumentStore {
    /// Creates a store over the given corpus root.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The corpus root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Whether the guidelines outline source exists.
    #[must_use]
    pub fn guidelines_exists(&self) -> bool {
        paths::guidelines_index(&self.root).is_file()
    }

    /// Reads the guidelines outline source.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if the source is missing, or
    /// [`StoreError::Io`] for any other read failure.
    pub fn read_guidelines(&self) -> Result<String, StoreError> {
        read(paths::guidelines_index(&self.root))
    }

    /// Whether a criterion fragment exists in the given version namespace.
    #[must_use]
    pub fn criterion_exists(&self, version: WcagVersion, slug: &Slug) -> bool {
        paths::criterion(&self.root, version, slug).is_file()
    }

    /// Reads a criterion fragment from the given version namespace.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if the fragment is missing, or
    /// [`StoreError::Io`] for any other read failure.
    pub fn read_criterion(&self, version: WcagVersion, slug: &Slug) -> Result<String, StoreError> {
        read(paths::criterion(&self.root, version, slug))
    }

    /// Whether an understanding document exists in the given version
    /// namespace.
    #[must_use]
    pub fn understanding_exists(&self, version: WcagVersion, slug: &Slug) -> bool {
        paths::understanding(&self.root, version, slug).is_file()
    }

    /// Reads an understanding document from the given version namespace.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if the document is missing, or
    /// [`StoreError::Io`] for any other read failure.
    pub fn read_understanding(
        &self,
        version: WcagVersion,
        slug: &Slug,
    ) -> Result<String, StoreError> {
        read(paths::understanding(&self.root, version, slug))
    }

    /// Whether a technique exists in its technology namespace.
    #[must_use]
    pub fn technique_exists(&self, id: &TechniqueId) -> bool {
        paths::technique(&self.root, id.technology(), id.as_str()).is_file()
    }

    /// Reads a technique from its technology namespace.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if the technique is missing, or
    /// [`StoreError::Io`] for any other read failure.
    pub fn read_technique(&self, id: &TechniqueId) -> Result<String, StoreError> {
        read(paths::technique(&self.root, id.technology(), id.as_str()))
    }
}

fn read(path: PathBuf) -> Result<String, StoreError> {
    match fs::read_to_string(&path) {
        Ok(contents) => Ok(contents),
        Err(error) if error.kind() == io::ErrorKind::NotFound => Err(StoreError::NotFound(path)),
        Err(error) => Err(StoreError::Io(error)),
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    fn corpus() -> TempDir {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("guidelines/sc/21")).unwrap();
        fs::create_dir_all(root.join("understanding/20")).unwrap();
        fs::create_dir_all(root.join("techniques/general")).unwrap();
        fs::write(
            root.join("guidelines/index.html"),
            "<html><body>outline</body></html>",
        )
        .unwrap();
        fs::write(
            root.join("guidelines/sc/21/focus-visible.html"),
            "<section id=\"focus-visible\"><h4>Focus Visible</h4></section>",
        )
        .unwrap();
        fs::write(
            root.join("understanding/20/focus-visible.html"),
            "<html><h1>Focus Visible</h1></html>",
        )
        .unwrap();
        fs::write(
            root.join("techniques/general/G90.html"),
            "<html><h1>G90</h1></html>",
        )
        .unwrap();
        dir
    }

    #[test]
    fn reads_guidelines_source() {
        let dir = corpus();
        let store = DocumentStore::new(dir.path());
        assert!(store.guidelines_exists());
        assert!(store.read_guidelines().unwrap().contains("outline"));
    }

    #[test]
    fn probes_and_reads_by_version() {
        let dir = corpus();
        let store = DocumentStore::new(dir.path());
        let slug = Slug::try_from("focus-visible").unwrap();

        assert!(store.criterion_exists(WcagVersion::V21, &slug));
        assert!(!store.criterion_exists(WcagVersion::V20, &slug));
        assert!(store
            .read_criterion(WcagVersion::V21, &slug)
            .unwrap()
            .contains("Focus Visible"));

        assert!(store.understanding_exists(WcagVersion::V20, &slug));
        assert!(!store.understanding_exists(WcagVersion::V22, &slug));
    }

    #[test]
    fn reads_technique_by_derived_technology() {
        let dir = corpus();
        let store = DocumentStore::new(dir.path());
        let id = "G90".parse::<TechniqueId>().unwrap();

        assert!(store.technique_exists(&id));
        assert!(store.read_technique(&id).unwrap().contains("G90"));
    }

    #[test]
    fn missing_document_is_not_found() {
        let dir = corpus();
        let store = DocumentStore::new(dir.path());
        let slug = Slug::try_from("does-not-exist").unwrap();

        let error = store.read_criterion(WcagVersion::V21, &slug).unwrap_err();
        assert!(matches!(error, StoreError::NotFound(_)));
    }

    #[test]
    fn missing_guidelines_is_not_found() {
        let dir = TempDir::new().unwrap();
        let store = DocumentStore::new(dir.path());

        assert!(!store.guidelines_exists());
        assert!(matches!(
            store.read_guidelines(),
            Err(StoreError::NotFound(_))
        ));
    }
}
