//! Message draft records.
//!
//! Drafts are terminal artifacts: they are persisted with
//! `draft_pending_review` status and wait for a human. Nothing in this
//! crate sends anything.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::campaigns::Campaign;

/// Output language of a composed draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Language {
    #[serde(rename = "en")]
    En,
    #[serde(rename = "es")]
    Es,
    #[serde(rename = "pt")]
    Pt,
}

impl Language {
    /// The persisted language tag.
    pub fn as_tag(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Es => "es",
            Language::Pt => "pt",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_tag())
    }
}

/// A composed subject/body pair, not yet persisted.
#[derive(Debug, Clone)]
pub struct MessageDraft {
    pub subject: String,
    pub body: String,
    pub language: Language,
}

/// A draft ready for insertion.
#[derive(Debug, Clone)]
pub struct NewDraft {
    pub lead_id: Uuid,
    pub campaign: Campaign,
    pub subject: String,
    pub body: String,
    pub language: Language,
}

impl NewDraft {
    /// Build an insertable draft from a composed message.
    pub fn from_message(lead_id: Uuid, campaign: Campaign, draft: &MessageDraft) -> Self {
        Self {
            lead_id,
            campaign,
            subject: draft.subject.clone(),
            body: draft.body.clone(),
            language: draft.language,
        }
    }
}

/// A persisted draft awaiting human review.
#[derive(Debug, Clone)]
pub struct DraftRecord {
    pub id: Uuid,
    pub lead_id: Uuid,
    pub campaign: Campaign,
    pub subject: String,
    pub body: String,
    pub language: Language,

    /// Always `draft_pending_review`; sends happen outside this system.
    pub status: String,

    pub created_at: DateTime<Utc>,
}
