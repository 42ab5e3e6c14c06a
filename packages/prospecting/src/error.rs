//! Typed errors for the prospecting library.
//!
//! Uses `thiserror` for library errors (not `anyhow`) so callers can
//! branch on outcome kind: retry logic keys on `SearchError::RateLimited`
//! and dedup keys on `StoreError::UniqueViolation` instead of sniffing
//! message strings.

use thiserror::Error;
use uuid::Uuid;

/// Errors from the external search provider.
#[derive(Debug, Error)]
pub enum SearchError {
    /// The provider throttled us. Retryable with backoff.
    #[error("search provider rate limited")]
    RateLimited,

    /// HTTP transport failed
    #[error("HTTP error: {0}")]
    Http(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Provider returned an unusable response
    #[error("provider error: {0}")]
    Provider(String),
}

/// Errors from the lead/contact store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A uniqueness constraint rejected the write.
    ///
    /// For lead inserts this means another row already holds the same
    /// profile URL; callers treat it as a duplicate, never as a failure.
    #[error("unique constraint violated on {key}")]
    UniqueViolation { key: String },

    /// Lead id not present in the store
    #[error("lead not found: {id}")]
    LeadNotFound { id: Uuid },

    /// Backend failure (connection, query, serialization)
    #[error("storage error: {0}")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Errors from the drafting collaborator.
#[derive(Debug, Error)]
pub enum DraftError {
    /// No template exists for this campaign/language pair
    #[error("no template for campaign {campaign} ({language})")]
    NoTemplate { campaign: String, language: String },

    /// The composer backend failed
    #[error("composer error: {0}")]
    Composer(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Result type alias for search operations.
pub type SearchResult<T> = std::result::Result<T, SearchError>;

/// Result type alias for store operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Result type alias for draft composition.
pub type DraftResult<T> = std::result::Result<T, DraftError>;
