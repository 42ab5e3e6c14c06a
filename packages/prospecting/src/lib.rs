//! Lead Discovery & Deduplication Pipeline
//!
//! A rate-limited prospecting library that discovers potential contacts
//! via web search, deduplicates them against previously stored leads
//! and a long-lived contacts table, enriches them with emails, and
//! generates outreach drafts for human review.
//!
//! # Design Philosophy
//!
//! **"Find, dedup, draft — never send"**
//!
//! - Campaigns are a closed enum, not string tags
//! - One search budget shared by every phase of a run
//! - The store's uniqueness constraint is the dedup source of truth
//! - Every phase degrades per-item; a run always ends with a summary
//! - Drafts stop at `draft_pending_review`; sending is out of scope
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use prospecting::{
//!     CampaignSelection, LeadRegistry, MemoryStore, Mode, Pipeline,
//!     ProspectSearcher, RateLimitedSearcher, RunBudget, SerperProvider,
//!     TemplateComposer,
//! };
//!
//! let store = Arc::new(MemoryStore::new());
//! let budget = Arc::new(RunBudget::new(20));
//! let searcher = ProspectSearcher::new(RateLimitedSearcher::new(
//!     SerperProvider::new(api_key),
//!     budget,
//! ));
//! let registry = LeadRegistry::new(store.clone(), store);
//! let pipeline = Pipeline::new(searcher, registry, Arc::new(TemplateComposer::new()));
//!
//! let summary = pipeline.run(Mode::Full, CampaignSelection::All).await;
//! println!("{summary}");
//! ```
//!
//! # Modules
//!
//! - [`traits`] - Core trait abstractions (SearchProvider, LeadStore, DraftComposer)
//! - [`types`] - Lead, draft, and search-hit records
//! - [`campaigns`] - The campaign enum and per-campaign query tables
//! - [`search`] - Budgeted, rate-limited search and prospect discovery
//! - [`extract`] - Heuristic extraction from titles and snippets
//! - [`registry`] - Validation, dedup, and persistence
//! - [`pipeline`] - Phase orchestration (search, enrich, draft)
//! - [`draft`] - Template-based draft composition
//! - [`stores`] - Storage implementations (MemoryStore, PostgresStore)

pub mod campaigns;
pub mod draft;
pub mod error;
pub mod extract;
pub mod pipeline;
pub mod registry;
pub mod search;
pub mod stores;
pub mod traits;
pub mod types;

// Re-export core types at crate root
pub use campaigns::{Campaign, CampaignConfig};
pub use draft::TemplateComposer;
pub use error::{DraftError, SearchError, StoreError};
pub use pipeline::{CampaignSelection, Mode, Pipeline, RunSummary};
pub use registry::{BatchOutcome, LeadRegistry, RegistryStats};
pub use search::{PacingConfig, ProspectSearcher, RateLimitedSearcher, RunBudget};
pub use stores::MemoryStore;
#[cfg(feature = "postgres")]
pub use stores::PostgresStore;
pub use traits::{
    composer::{DraftComposer, MockComposer},
    searcher::{MockSearchProvider, SearchProvider, SerperProvider},
    store::{ContactDirectory, LeadStore},
};
pub use types::{
    CandidateLead, Contact, DraftRecord, Language, Lead, LeadStatus, MessageDraft, NewDraft,
    NewLead, SearchHit,
};
