//! In-memory store for tests and dry runs without a database.

use async_trait::async_trait;
use chrono::Utc;
use std::sync::RwLock;
use uuid::Uuid;

use crate::campaigns::Campaign;
use crate::error::{StoreError, StoreResult};
use crate::traits::store::{ContactDirectory, LeadStore};
use crate::types::{Contact, DraftRecord, Lead, LeadStatus, NewDraft, NewLead};

/// `LeadStore` + `ContactDirectory` over plain vectors.
///
/// Insertion order doubles as creation order, so "oldest first" is just
/// iteration order. Enforces the same profile-URL uniqueness the
/// database schema does.
#[derive(Default)]
pub struct MemoryStore {
    leads: RwLock<Vec<Lead>>,
    drafts: RwLock<Vec<DraftRecord>>,
    contacts: RwLock<Vec<Contact>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a pre-existing contact.
    pub fn with_contact(self, contact: Contact) -> Self {
        self.contacts.write().unwrap().push(contact);
        self
    }

    /// Number of stored leads.
    pub fn lead_count(&self) -> usize {
        self.leads.read().unwrap().len()
    }

    /// Snapshot of stored drafts.
    pub fn drafts(&self) -> Vec<DraftRecord> {
        self.drafts.read().unwrap().clone()
    }

    /// Look up a stored lead by id.
    pub fn get_lead(&self, id: Uuid) -> Option<Lead> {
        self.leads.read().unwrap().iter().find(|l| l.id == id).cloned()
    }
}

#[async_trait]
impl LeadStore for MemoryStore {
    async fn insert_lead(&self, lead: &NewLead) -> StoreResult<Lead> {
        let mut leads = self.leads.write().unwrap();
        if leads.iter().any(|l| l.profile_url == lead.profile_url) {
            return Err(StoreError::UniqueViolation {
                key: lead.profile_url.clone(),
            });
        }

        let now = Utc::now();
        let stored = Lead {
            id: Uuid::new_v4(),
            full_name: lead.full_name.clone(),
            first_name: lead.first_name.clone(),
            last_name: lead.last_name.clone(),
            job_title: lead.job_title.clone(),
            organization: lead.organization.clone(),
            email: lead.email.clone(),
            profile_url: lead.profile_url.clone(),
            campaign: lead.campaign,
            source_query: lead.source_query.clone(),
            region: lead.region.clone(),
            status: lead.status,
            created_at: now,
            updated_at: now,
        };
        leads.push(stored.clone());
        Ok(stored)
    }

    async fn lead_exists(&self, profile_url: &str) -> StoreResult<bool> {
        Ok(self
            .leads
            .read()
            .unwrap()
            .iter()
            .any(|l| l.profile_url == profile_url))
    }

    async fn leads_with_status(
        &self,
        status: LeadStatus,
        campaign: Option<Campaign>,
    ) -> StoreResult<Vec<Lead>> {
        Ok(self
            .leads
            .read()
            .unwrap()
            .iter()
            .filter(|l| l.status == status)
            .filter(|l| campaign.is_none_or(|c| l.campaign == c))
            .cloned()
            .collect())
    }

    async fn leads_missing_email(&self, campaign: Option<Campaign>) -> StoreResult<Vec<Lead>> {
        Ok(self
            .leads
            .read()
            .unwrap()
            .iter()
            .filter(|l| l.email.is_none() && l.status != LeadStatus::Ignored)
            .filter(|l| campaign.is_none_or(|c| l.campaign == c))
            .cloned()
            .collect())
    }

    async fn set_status(&self, id: Uuid, status: LeadStatus) -> StoreResult<()> {
        let mut leads = self.leads.write().unwrap();
        let lead = leads
            .iter_mut()
            .find(|l| l.id == id)
            .ok_or(StoreError::LeadNotFound { id })?;
        lead.status = status;
        lead.updated_at = Utc::now();
        Ok(())
    }

    async fn set_email(&self, id: Uuid, email: &str) -> StoreResult<()> {
        let mut leads = self.leads.write().unwrap();
        let lead = leads
            .iter_mut()
            .find(|l| l.id == id)
            .ok_or(StoreError::LeadNotFound { id })?;
        lead.email = Some(email.to_string());
        lead.updated_at = Utc::now();
        Ok(())
    }

    async fn insert_draft(&self, draft: &NewDraft) -> StoreResult<DraftRecord> {
        let record = DraftRecord {
            id: Uuid::new_v4(),
            lead_id: draft.lead_id,
            campaign: draft.campaign,
            subject: draft.subject.clone(),
            body: draft.body.clone(),
            language: draft.language,
            status: "draft_pending_review".to_string(),
            created_at: Utc::now(),
        };
        self.drafts.write().unwrap().push(record.clone());
        Ok(record)
    }
}

#[async_trait]
impl ContactDirectory for MemoryStore {
    async fn contact_by_email(&self, email: &str) -> StoreResult<Option<Contact>> {
        Ok(self
            .contacts
            .read()
            .unwrap()
            .iter()
            .find(|c| {
                c.email
                    .as_deref()
                    .is_some_and(|e| e.eq_ignore_ascii_case(email))
            })
            .cloned())
    }

    async fn contact_by_name(&self, first: &str, last: &str) -> StoreResult<Option<Contact>> {
        Ok(self
            .contacts
            .read()
            .unwrap()
            .iter()
            .find(|c| {
                c.first_name
                    .as_deref()
                    .is_some_and(|f| f.eq_ignore_ascii_case(first))
                    && c.last_name
                        .as_deref()
                        .is_some_and(|l| l.eq_ignore_ascii_case(last))
            })
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_lead(url: &str) -> NewLead {
        NewLead {
            full_name: Some("Jane Doe".to_string()),
            first_name: Some("Jane".to_string()),
            last_name: Some("Doe".to_string()),
            job_title: None,
            organization: None,
            email: None,
            profile_url: url.to_string(),
            campaign: Campaign::DirectB2b,
            source_query: None,
            region: None,
            raw_snippet: None,
            status: LeadStatus::New,
        }
    }

    #[tokio::test]
    async fn duplicate_profile_url_is_a_unique_violation() {
        let store = MemoryStore::new();
        let url = "https://www.linkedin.com/in/jane-doe";
        store.insert_lead(&new_lead(url)).await.unwrap();

        let err = store.insert_lead(&new_lead(url)).await.unwrap_err();
        assert!(matches!(err, StoreError::UniqueViolation { .. }));
        assert_eq!(store.lead_count(), 1);
    }

    #[tokio::test]
    async fn status_queries_respect_campaign_scope() {
        let store = MemoryStore::new();
        let a = store
            .insert_lead(&new_lead("https://www.linkedin.com/in/a"))
            .await
            .unwrap();
        let mut pharma = new_lead("https://www.linkedin.com/in/b");
        pharma.campaign = Campaign::Pharma;
        store.insert_lead(&pharma).await.unwrap();

        let scoped = store
            .leads_with_status(LeadStatus::New, Some(Campaign::DirectB2b))
            .await
            .unwrap();
        assert_eq!(scoped.len(), 1);
        assert_eq!(scoped[0].id, a.id);

        let all = store.leads_with_status(LeadStatus::New, None).await.unwrap();
        assert_eq!(all.len(), 2);
    }

    #[tokio::test]
    async fn missing_email_excludes_ignored_leads() {
        let store = MemoryStore::new();
        let a = store
            .insert_lead(&new_lead("https://www.linkedin.com/in/a"))
            .await
            .unwrap();
        store
            .insert_lead(&new_lead("https://www.linkedin.com/in/b"))
            .await
            .unwrap();
        store.set_status(a.id, LeadStatus::Ignored).await.unwrap();

        let missing = store.leads_missing_email(None).await.unwrap();
        assert_eq!(missing.len(), 1);
        assert_ne!(missing[0].id, a.id);
    }

    #[tokio::test]
    async fn set_email_stamps_updated_at() {
        let store = MemoryStore::new();
        let lead = store
            .insert_lead(&new_lead("https://www.linkedin.com/in/a"))
            .await
            .unwrap();
        store.set_email(lead.id, "jane@clinic.org").await.unwrap();

        let stored = store.get_lead(lead.id).unwrap();
        assert_eq!(stored.email.as_deref(), Some("jane@clinic.org"));
        assert!(stored.updated_at >= lead.updated_at);
    }

    #[tokio::test]
    async fn unknown_lead_id_is_not_found() {
        let store = MemoryStore::new();
        let err = store
            .set_status(Uuid::new_v4(), LeadStatus::Ignored)
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::LeadNotFound { .. }));
    }

    #[tokio::test]
    async fn contact_lookups_are_case_insensitive() {
        let store = MemoryStore::new().with_contact(Contact {
            id: Uuid::new_v4(),
            first_name: Some("Jane".to_string()),
            last_name: Some("Doe".to_string()),
            email: Some("Jane.Doe@clinic.org".to_string()),
        });

        assert!(store
            .contact_by_email("jane.doe@CLINIC.org")
            .await
            .unwrap()
            .is_some());
        assert!(store.contact_by_name("jane", "DOE").await.unwrap().is_some());
        assert!(store.contact_by_name("john", "doe").await.unwrap().is_none());
    }
}
