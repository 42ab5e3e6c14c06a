//! Drafting collaborator trait.
//!
//! The pipeline selects which leads get a draft and records the result;
//! how the subject/body pair is produced is the composer's business.
//! Nothing behind this trait may send anything.

use async_trait::async_trait;
use std::sync::Mutex;
use uuid::Uuid;

use crate::error::{DraftError, DraftResult};
use crate::types::{Lead, Language, MessageDraft};

/// Produces a message draft for a lead.
#[async_trait]
pub trait DraftComposer: Send + Sync {
    /// Compose a subject/body pair for the lead, or fail.
    async fn compose(&self, lead: &Lead) -> DraftResult<MessageDraft>;
}

/// Scriptable composer for pipeline tests.
///
/// Returns a fixed draft for every lead; individual leads can be marked
/// to fail so the status-advance-only-on-success path is testable.
#[derive(Default)]
pub struct MockComposer {
    failing: Mutex<Vec<Uuid>>,
    composed: Mutex<Vec<Uuid>>,
}

impl MockComposer {
    /// Create a composer that succeeds for every lead.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a lead id as failing.
    pub fn fail_for(self, lead_id: Uuid) -> Self {
        self.failing.lock().unwrap().push(lead_id);
        self
    }

    /// Lead ids composed so far.
    pub fn composed(&self) -> Vec<Uuid> {
        self.composed.lock().unwrap().clone()
    }
}

#[async_trait]
impl DraftComposer for MockComposer {
    async fn compose(&self, lead: &Lead) -> DraftResult<MessageDraft> {
        if self.failing.lock().unwrap().contains(&lead.id) {
            return Err(DraftError::Composer("scripted failure".into()));
        }
        self.composed.lock().unwrap().push(lead.id);
        Ok(MessageDraft {
            subject: format!("Hello {}", lead.full_name.as_deref().unwrap_or("[NOMBRE]")),
            body: "mock body".to_string(),
            language: Language::En,
        })
    }
}
