//! Domain types for the documentation corpus.
//!
//! This module contains the identifier types, version tags, and resource
//! addresses that the resolver and facade operate on. Identifiers are
//! validated on construction so that a value of one of these types can
//! always be joined onto a corpus path safely.

/// Resource address parsing and formatting.
pub mod address;
pub use address::{ParseAddressError, ResourceAddress};

mod kind;
pub use kind::DocumentKind;

/// Identifiers for version-namespaced documents.
pub mod slug;
pub use slug::{ParseSlugError, Slug};

/// Technique identifiers and technology namespaces.
pub mod technique;
pub use technique::{ParseTechniqueIdError, TechniqueId, Technology};

mod version;
pub use version::{ParseVersionError, WcagVersion};
