//! WCAG Documentation Corpus Engine
//!
//! Resolves stable identifiers to documents in a WCAG source tree and
//! normalizes them to markdown with working `wcag://` cross-references.

pub mod domain;
pub use domain::{
    DocumentKind, ResourceAddress, Slug, TechniqueId, Technology, WcagVersion,
};

/// Read access to a corpus tree on disk.
pub mod storage;
pub use storage::{DocumentStore, StoreError};

/// Identifier resolution across version and technology namespaces.
pub mod resolver;

/// Guidelines outline extraction and rendering.
pub mod outline;

/// HTML to markdown conversion with cross-reference rewriting.
pub mod convert;

/// The criteria index side-file.
pub mod index;

/// The resource facade joining the other components.
pub mod corpus;
pub use corpus::{Corpus, FetchError, FetchedDocument};
