//! Lead registration: validation, dedup, and persistence.
//!
//! The registry screens candidates with advisory checks (profile URL
//! already stored, person already in the contacts table) and then
//! inserts. The store's uniqueness constraint on `profile_url` has the
//! final word: an insert racing another run loses cleanly and is
//! counted as a duplicate.

use regex::Regex;
use std::fmt;
use std::sync::{Arc, OnceLock};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::campaigns::Campaign;
use crate::error::{StoreError, StoreResult};
use crate::traits::store::{ContactDirectory, LeadStore};
use crate::types::{CandidateLead, DraftRecord, Lead, LeadStatus, NewDraft, NewLead};

fn profile_url_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^https?://(www\.)?linkedin\.com/in/[A-Za-z0-9_\-%.]+/?$").unwrap()
    })
}

/// Outcome counters for one registration batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RegistryStats {
    pub processed: u32,
    pub inserted: u32,
    pub duplicates: u32,
    pub errors: u32,
}

impl fmt::Display for RegistryStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} processed, {} inserted, {} duplicates, {} errors",
            self.processed, self.inserted, self.duplicates, self.errors
        )
    }
}

/// The leads that survived a batch, plus the counters.
#[derive(Debug, Default)]
pub struct BatchOutcome {
    pub leads: Vec<Lead>,
    pub stats: RegistryStats,
}

/// Front door to the store for the pipeline.
///
/// All writes go through here so a dry run can swap persistence for
/// logging in exactly one place.
pub struct LeadRegistry {
    store: Arc<dyn LeadStore>,
    contacts: Arc<dyn ContactDirectory>,
    dry_run: bool,
}

impl LeadRegistry {
    pub fn new(store: Arc<dyn LeadStore>, contacts: Arc<dyn ContactDirectory>) -> Self {
        Self {
            store,
            contacts,
            dry_run: false,
        }
    }

    /// Log intended writes instead of performing them.
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Validate, dedup, and insert a batch of candidates.
    ///
    /// Per-candidate failures are counted and skipped; a bad candidate
    /// never stops the batch. Re-running the same batch yields only
    /// duplicates.
    pub async fn register_batch(&self, candidates: Vec<CandidateLead>) -> BatchOutcome {
        let mut outcome = BatchOutcome::default();

        for candidate in candidates {
            outcome.stats.processed += 1;

            if !profile_url_re().is_match(&candidate.profile_url) {
                warn!(url = candidate.profile_url.as_str(), "invalid profile URL, skipping");
                outcome.stats.errors += 1;
                continue;
            }

            if self.is_duplicate(&candidate).await {
                outcome.stats.duplicates += 1;
                continue;
            }

            let new_lead = to_new_lead(&candidate);

            if self.dry_run {
                info!(
                    name = new_lead.full_name.as_deref().unwrap_or("?"),
                    url = new_lead.profile_url.as_str(),
                    "[dry run] would insert lead"
                );
                outcome.stats.inserted += 1;
                outcome.leads.push(synthesize_lead(&new_lead));
                continue;
            }

            match self.store.insert_lead(&new_lead).await {
                Ok(lead) => {
                    info!(
                        name = lead.full_name.as_deref().unwrap_or("?"),
                        campaign = %lead.campaign,
                        "lead inserted"
                    );
                    outcome.stats.inserted += 1;
                    outcome.leads.push(lead);
                }
                Err(StoreError::UniqueViolation { key }) => {
                    debug!(key, "lost insert race, counting as duplicate");
                    outcome.stats.duplicates += 1;
                }
                Err(e) => {
                    warn!(url = new_lead.profile_url.as_str(), error = %e, "insert failed");
                    outcome.stats.errors += 1;
                }
            }
        }

        info!(stats = %outcome.stats, "batch registered");
        outcome
    }

    /// Advisory dedup checks. Store errors are logged and treated as
    /// "not a duplicate": the uniqueness constraint still backstops the
    /// insert.
    async fn is_duplicate(&self, candidate: &CandidateLead) -> bool {
        match self.store.lead_exists(&candidate.profile_url).await {
            Ok(true) => {
                debug!(url = candidate.profile_url.as_str(), "lead already stored");
                return true;
            }
            Ok(false) => {}
            Err(e) => warn!(error = %e, "lead existence check failed, proceeding"),
        }

        if let Some(email) = candidate.email.as_deref() {
            match self.contacts.contact_by_email(email).await {
                Ok(Some(_)) => {
                    debug!(email, "already a known contact");
                    return true;
                }
                Ok(None) => {}
                Err(e) => warn!(error = %e, "contact email check failed, proceeding"),
            }
        }

        if let Some((first, last)) = candidate.full_name.as_deref().and_then(split_name) {
            match self.contacts.contact_by_name(first, last).await {
                Ok(Some(_)) => {
                    debug!(first, last, "already a known contact");
                    return true;
                }
                Ok(None) => {}
                Err(e) => warn!(error = %e, "contact name check failed, proceeding"),
            }
        }

        false
    }

    /// Leads awaiting draft generation, oldest first.
    ///
    /// Query failures degrade to an empty list so one phase's failure
    /// does not abort the run.
    pub async fn leads_needing_drafts(&self, campaign: Option<Campaign>) -> Vec<Lead> {
        match self.store.leads_with_status(LeadStatus::New, campaign).await {
            Ok(leads) => leads,
            Err(e) => {
                warn!(error = %e, "failed to list leads needing drafts");
                Vec::new()
            }
        }
    }

    /// Non-ignored leads without an email, oldest first.
    pub async fn leads_missing_email(&self, campaign: Option<Campaign>) -> Vec<Lead> {
        match self.store.leads_missing_email(campaign).await {
            Ok(leads) => leads,
            Err(e) => {
                warn!(error = %e, "failed to list leads missing email");
                Vec::new()
            }
        }
    }

    /// Store a found email on a lead. Returns whether the write stuck.
    pub async fn record_email(&self, lead: &Lead, email: &str) -> bool {
        if self.dry_run {
            info!(
                name = lead.full_name.as_deref().unwrap_or("?"),
                email,
                "[dry run] would set email"
            );
            return true;
        }
        match self.store.set_email(lead.id, email).await {
            Ok(()) => true,
            Err(e) => {
                warn!(lead_id = %lead.id, error = %e, "failed to set email");
                false
            }
        }
    }

    /// Persist a composed draft for review.
    pub async fn record_draft(&self, draft: &NewDraft) -> StoreResult<DraftRecord> {
        if self.dry_run {
            info!(
                lead_id = %draft.lead_id,
                subject = draft.subject.as_str(),
                "[dry run] would store draft"
            );
            return Ok(synthesize_draft(draft));
        }
        self.store.insert_draft(draft).await
    }

    /// Advance a lead's status after its draft is safely stored.
    pub async fn mark_draft_generated(&self, lead: &Lead) -> StoreResult<()> {
        if self.dry_run {
            info!(lead_id = %lead.id, "[dry run] would mark draft_generated");
            return Ok(());
        }
        self.store.set_status(lead.id, LeadStatus::DraftGenerated).await
    }
}

/// Split a display name into (first, rest-as-last).
fn split_name(full_name: &str) -> Option<(&str, &str)> {
    let (first, rest) = full_name.trim().split_once(char::is_whitespace)?;
    let last = rest.trim_start();
    if last.is_empty() {
        None
    } else {
        Some((first, last))
    }
}

fn to_new_lead(candidate: &CandidateLead) -> NewLead {
    let (first_name, last_name) = candidate
        .full_name
        .as_deref()
        .and_then(split_name)
        .map(|(f, l)| (Some(f.to_string()), Some(l.to_string())))
        .unwrap_or((None, None));

    NewLead {
        full_name: candidate.full_name.clone(),
        first_name,
        last_name,
        job_title: candidate.job_title.clone(),
        organization: candidate.organization.clone(),
        email: candidate.email.clone(),
        profile_url: candidate.profile_url.clone(),
        campaign: candidate.campaign,
        source_query: Some(candidate.source_query.clone()),
        region: candidate.region.clone(),
        raw_snippet: Some(candidate.raw_snippet.clone()),
        status: LeadStatus::New,
    }
}

/// Stand-in lead for dry runs so downstream phases can still exercise
/// their logic.
fn synthesize_lead(new_lead: &NewLead) -> Lead {
    let now = chrono::Utc::now();
    Lead {
        id: Uuid::new_v4(),
        full_name: new_lead.full_name.clone(),
        first_name: new_lead.first_name.clone(),
        last_name: new_lead.last_name.clone(),
        job_title: new_lead.job_title.clone(),
        organization: new_lead.organization.clone(),
        email: new_lead.email.clone(),
        profile_url: new_lead.profile_url.clone(),
        campaign: new_lead.campaign,
        source_query: new_lead.source_query.clone(),
        region: new_lead.region.clone(),
        status: new_lead.status,
        created_at: now,
        updated_at: now,
    }
}

fn synthesize_draft(draft: &NewDraft) -> DraftRecord {
    DraftRecord {
        id: Uuid::new_v4(),
        lead_id: draft.lead_id,
        campaign: draft.campaign,
        subject: draft.subject.clone(),
        body: draft.body.clone(),
        language: draft.language,
        status: "draft_pending_review".to_string(),
        created_at: chrono::Utc::now(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stores::memory::MemoryStore;
    use crate::types::Contact;

    fn candidate(url: &str, name: Option<&str>) -> CandidateLead {
        CandidateLead {
            full_name: name.map(str::to_string),
            job_title: Some("Lab Director".to_string()),
            organization: Some("Hospital X".to_string()),
            email: None,
            profile_url: url.to_string(),
            campaign: Campaign::DirectB2b,
            source_query: "test query".to_string(),
            region: Some("Argentina".to_string()),
            raw_snippet: "snippet".to_string(),
        }
    }

    fn registry(store: Arc<MemoryStore>) -> LeadRegistry {
        LeadRegistry::new(store.clone(), store)
    }

    #[tokio::test]
    async fn inserts_valid_candidates_and_splits_names() {
        let store = Arc::new(MemoryStore::new());
        let outcome = registry(store.clone())
            .register_batch(vec![candidate(
                "https://www.linkedin.com/in/maria-garcia-lopez",
                Some("Maria Garcia Lopez"),
            )])
            .await;

        assert_eq!(outcome.stats.inserted, 1);
        assert_eq!(outcome.leads.len(), 1);
        let lead = &outcome.leads[0];
        assert_eq!(lead.first_name.as_deref(), Some("Maria"));
        assert_eq!(lead.last_name.as_deref(), Some("Garcia Lopez"));
        assert_eq!(store.lead_count(), 1);
    }

    #[tokio::test]
    async fn invalid_profile_url_counts_as_error() {
        let store = Arc::new(MemoryStore::new());
        let outcome = registry(store.clone())
            .register_batch(vec![
                candidate("https://example.com/in/jane", Some("Jane Doe")),
                candidate("not a url", Some("John Doe")),
            ])
            .await;

        assert_eq!(
            outcome.stats,
            RegistryStats {
                processed: 2,
                inserted: 0,
                duplicates: 0,
                errors: 2
            }
        );
        assert_eq!(store.lead_count(), 0);
    }

    #[tokio::test]
    async fn rerunning_a_batch_only_yields_duplicates() {
        let store = Arc::new(MemoryStore::new());
        let registry = registry(store.clone());
        let batch = vec![candidate(
            "https://www.linkedin.com/in/jane-doe",
            Some("Jane Doe"),
        )];

        let first = registry.register_batch(batch.clone()).await;
        assert_eq!(first.stats.inserted, 1);

        let second = registry.register_batch(batch).await;
        assert_eq!(second.stats.inserted, 0);
        assert_eq!(second.stats.duplicates, 1);
        assert_eq!(store.lead_count(), 1);
    }

    #[tokio::test]
    async fn duplicate_within_one_batch_is_caught() {
        let store = Arc::new(MemoryStore::new());
        let outcome = registry(store.clone())
            .register_batch(vec![
                candidate("https://www.linkedin.com/in/jane-doe", Some("Jane Doe")),
                candidate("https://www.linkedin.com/in/jane-doe", Some("Jane Doe")),
            ])
            .await;

        assert_eq!(outcome.stats.inserted, 1);
        assert_eq!(outcome.stats.duplicates, 1);
    }

    #[tokio::test]
    async fn known_contact_by_email_is_a_duplicate() {
        let store = Arc::new(MemoryStore::new().with_contact(Contact {
            id: Uuid::new_v4(),
            first_name: None,
            last_name: None,
            email: Some("jane@clinic.org".to_string()),
        }));

        let mut c = candidate("https://www.linkedin.com/in/jane-doe", Some("Jane Doe"));
        c.email = Some("jane@clinic.org".to_string());

        let outcome = registry(store.clone()).register_batch(vec![c]).await;
        assert_eq!(outcome.stats.duplicates, 1);
        assert_eq!(store.lead_count(), 0);
    }

    #[tokio::test]
    async fn known_contact_by_name_is_a_duplicate() {
        let store = Arc::new(MemoryStore::new().with_contact(Contact {
            id: Uuid::new_v4(),
            first_name: Some("Jane".to_string()),
            last_name: Some("Doe".to_string()),
            email: None,
        }));

        let outcome = registry(store.clone())
            .register_batch(vec![candidate(
                "https://www.linkedin.com/in/jane-doe",
                Some("jane doe"),
            )])
            .await;
        assert_eq!(outcome.stats.duplicates, 1);
    }

    #[tokio::test]
    async fn dry_run_writes_nothing_but_reports_inserts() {
        let store = Arc::new(MemoryStore::new());
        let registry = registry(store.clone()).with_dry_run(true);

        let outcome = registry
            .register_batch(vec![candidate(
                "https://www.linkedin.com/in/jane-doe",
                Some("Jane Doe"),
            )])
            .await;
        assert_eq!(outcome.stats.inserted, 1);
        assert_eq!(outcome.leads.len(), 1);
        assert_eq!(store.lead_count(), 0);

        let lead = &outcome.leads[0];
        assert!(registry.record_email(lead, "jane@clinic.org").await);
        registry.mark_draft_generated(lead).await.unwrap();
        assert_eq!(store.drafts().len(), 0);
    }

    #[test]
    fn split_name_variants() {
        assert_eq!(split_name("Jane Doe"), Some(("Jane", "Doe")));
        assert_eq!(split_name("Maria Garcia Lopez"), Some(("Maria", "Garcia Lopez")));
        assert_eq!(split_name("Cher"), None);
        assert_eq!(split_name("  "), None);
    }
}
