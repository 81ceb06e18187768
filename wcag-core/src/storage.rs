pub(crate) mod paths;
/// Typed read access to the corpus tree.
pub mod store;

pub use store::{DocumentStore, StoreError};
