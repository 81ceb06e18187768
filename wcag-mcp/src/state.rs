//! Shared state for the MCP server.

use std::{path::Path, sync::Arc};

use wcag_core::{corpus::Corpus, index::CriteriaIndex, storage::DocumentStore};

/// Read-only state shared by every tool and resource handler.
#[derive(Clone)]
pub struct ServerState {
    /// The corpus all requests are served from.
    pub corpus: Arc<Corpus>,
}

impl ServerState {
    /// Builds state for the corpus at `root`, picking up the criteria
    /// index at `index_path` when one is present and fresh.
    ///
    /// A missing outline or index is reported at startup rather than
    /// failing; the affected requests error at call time instead.
    #[must_use]
    pub fn new(root: &Path, index_path: &Path) -> Self {
        let store = DocumentStore::new(root);
        if !store.guidelines_exists() {
            tracing::warn!(
                "No guidelines outline at {}; outline requests will fail",
                root.display()
            );
        }
        let index = load_index(index_path, &store);
        Self {
            corpus: Arc::new(Corpus::new(store, index)),
        }
    }
}

fn load_index(path: &Path, store: &DocumentStore) -> Option<CriteriaIndex> {
    match CriteriaIndex::load(path) {
        Ok(index) if index.is_stale(store) => {
            tracing::warn!(
                "Criteria index at {} is stale; ignoring it (rebuild with wcag-index)",
                path.display()
            );
            None
        }
        Ok(index) => {
            tracing::info!("Loaded criteria index with {} criteria", index.len());
            Some(index)
        }
        Err(error) => {
            tracing::warn!("Criteria index unavailable: {error}");
            None
        }
    }
}
