use std::fmt;

/// The four kinds of addressable document in the corpus.
///
/// The kind determines which resolution strategy applies: the outline lives
/// at a fixed location, criteria and understanding documents are searched
/// across versions, and techniques are dispatched to a single technology
/// directory by their prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentKind {
    /// The guidelines outline.
    Outline,
    /// A success criterion fragment.
    Criterion,
    /// An understanding document.
    Understanding,
    /// An implementation technique.
    Technique,
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Outline => "guidelines outline",
            Self::Criterion => "success criterion",
            Self::Understanding => "understanding document",
            Self::Technique => "technique",
        };
        f.write_str(name)
    }
}
