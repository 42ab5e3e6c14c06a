//! Storage traits for leads, drafts, and the contacts dedup oracle.
//!
//! The store is external: it assigns ids, stamps timestamps, and owns
//! the uniqueness constraint on `profile_url` — the true linearization
//! point for dedup, since the registry's advisory existence checks and
//! the insert are not atomic across concurrent runs.

use async_trait::async_trait;
use uuid::Uuid;

use crate::campaigns::Campaign;
use crate::error::StoreResult;
use crate::types::{Contact, DraftRecord, Lead, LeadStatus, NewDraft, NewLead};

/// The lead table plus its draft side table.
#[async_trait]
pub trait LeadStore: Send + Sync {
    /// Insert a new lead, returning the persisted row.
    ///
    /// Must fail with `StoreError::UniqueViolation` when a lead with
    /// the same `profile_url` already exists.
    async fn insert_lead(&self, lead: &NewLead) -> StoreResult<Lead>;

    /// Whether a lead with this profile URL already exists.
    async fn lead_exists(&self, profile_url: &str) -> StoreResult<bool>;

    /// Leads with the given status, oldest first, optionally scoped to
    /// one campaign.
    async fn leads_with_status(
        &self,
        status: LeadStatus,
        campaign: Option<Campaign>,
    ) -> StoreResult<Vec<Lead>>;

    /// Leads with no email whose status is not `ignored`, oldest first.
    async fn leads_missing_email(&self, campaign: Option<Campaign>) -> StoreResult<Vec<Lead>>;

    /// Update a lead's status, stamping `updated_at`.
    async fn set_status(&self, id: Uuid, status: LeadStatus) -> StoreResult<()>;

    /// Update a lead's email, stamping `updated_at`.
    async fn set_email(&self, id: Uuid, email: &str) -> StoreResult<()>;

    /// Persist a composed draft for human review.
    async fn insert_draft(&self, draft: &NewDraft) -> StoreResult<DraftRecord>;
}

/// Read-only lookups against the long-lived contacts table.
///
/// Used purely as a secondary dedup oracle; this pipeline never writes
/// contacts.
#[async_trait]
pub trait ContactDirectory: Send + Sync {
    /// Find a contact by exact email.
    async fn contact_by_email(&self, email: &str) -> StoreResult<Option<Contact>>;

    /// Find a contact by case-insensitive (first, last) name pair.
    async fn contact_by_name(&self, first: &str, last: &str) -> StoreResult<Option<Contact>>;
}
