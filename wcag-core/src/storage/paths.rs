//! Path construction for the corpus layout.
//!
//! The corpus keeps the outline at `guidelines/index.html`, criterion
//! fragments under `guidelines/sc/<version>/`, understanding documents under
//! `understanding/<version>/`, and techniques under
//! `techniques/<technology>/`. All path construction lives here; no other
//! module builds corpus paths.

use std::path::{Path, PathBuf};

use crate::domain::{Slug, Technology, WcagVersion};

/// Path of the guidelines outline source.
pub(crate) fn guidelines_index(root: &Path) -> PathBuf {
    root.join("guidelines").join("index.html")
}

/// Directory holding every criterion fragment, one subdirectory per version.
pub(crate) fn criteria_dir(root: &Path) -> PathBuf {
    root.join("guidelines").join("sc")
}

/// Path of a criterion fragment within a version namespace.
pub(crate) fn criterion(root: &Path, version: WcagVersion, slug: &Slug) -> PathBuf {
    criteria_dir(root)
        .join(version.label())
        .join(format!("{}.html", slug.as_str()))
}

/// Path of an understanding document within a version namespace.
pub(crate) fn understanding(root: &Path, version: WcagVersion, slug: &Slug) -> PathBuf {
    root.join("understanding")
        .join(version.label())
        .join(format!("{}.html", slug.as_str()))
}

/// Path of a technique document within a technology namespace.
pub(crate) fn technique(root: &Path, technology: Technology, id: &str) -> PathBuf {
    root.join("techniques")
        .join(technology.dir_name())
        .join(format!("{id}.html"))
}
