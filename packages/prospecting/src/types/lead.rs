//! Lead and contact records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::campaigns::Campaign;

/// Lifecycle status of a persisted lead.
///
/// `New` leads await draft generation; `Ignored` is set administratively
/// (never by this pipeline) and excludes the lead from enrichment scans.
/// These three values are the only valid persisted states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LeadStatus {
    #[serde(rename = "new")]
    New,
    #[serde(rename = "draft_generated")]
    DraftGenerated,
    #[serde(rename = "ignored")]
    Ignored,
}

impl LeadStatus {
    /// The persisted string value.
    pub fn as_str(&self) -> &'static str {
        match self {
            LeadStatus::New => "new",
            LeadStatus::DraftGenerated => "draft_generated",
            LeadStatus::Ignored => "ignored",
        }
    }

    /// Parse a persisted status value.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "new" => Some(LeadStatus::New),
            "draft_generated" => Some(LeadStatus::DraftGenerated),
            "ignored" => Some(LeadStatus::Ignored),
            _ => None,
        }
    }
}

impl fmt::Display for LeadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A candidate contact produced by the search phase.
///
/// Ephemeral until it survives registry validation and dedup. Every
/// field except `profile_url` is best-effort: missing data stays `None`
/// and the drafting layer substitutes visible placeholders.
#[derive(Debug, Clone)]
pub struct CandidateLead {
    pub full_name: Option<String>,
    pub job_title: Option<String>,
    pub organization: Option<String>,
    pub email: Option<String>,

    /// Canonicalized profile URL. The primary dedup key.
    pub profile_url: String,

    pub campaign: Campaign,

    /// The query string that produced this candidate.
    pub source_query: String,

    /// Region inferred from the source query.
    pub region: Option<String>,

    /// Raw snippet text, kept for review context.
    pub raw_snippet: String,
}

/// A lead ready for insertion (no store-assigned fields yet).
#[derive(Debug, Clone)]
pub struct NewLead {
    pub full_name: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub job_title: Option<String>,
    pub organization: Option<String>,
    pub email: Option<String>,
    pub profile_url: String,
    pub campaign: Campaign,
    pub source_query: Option<String>,
    pub region: Option<String>,
    pub raw_snippet: Option<String>,
    pub status: LeadStatus,
}

/// A persisted, deduplicated lead awaiting draft generation and review.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lead {
    /// Store-assigned id.
    pub id: Uuid,
    pub full_name: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub job_title: Option<String>,
    pub organization: Option<String>,
    pub email: Option<String>,

    /// Unique across all leads for the lifetime of the store.
    pub profile_url: String,

    pub campaign: Campaign,
    pub source_query: Option<String>,
    pub region: Option<String>,
    pub status: LeadStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A pre-existing relationship record, used only as a dedup oracle.
///
/// Contacts are never created by this pipeline; they are matched by
/// exact email first, else by case-insensitive (first, last) name pair.
#[derive(Debug, Clone)]
pub struct Contact {
    pub id: Uuid,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
}
