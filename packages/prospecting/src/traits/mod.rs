//! Trait seams for the external collaborators.
//!
//! The pipeline only ever talks to the search provider, the store, and
//! the draft composer through these traits, so tests (and dry runs)
//! swap in the in-memory/mock implementations without touching the
//! pipeline code.

pub mod composer;
pub mod searcher;
pub mod store;

pub use composer::{DraftComposer, MockComposer};
pub use searcher::{MockSearchProvider, SearchProvider, SerperProvider};
pub use store::{ContactDirectory, LeadStore};
