//! Domain types for the prospecting pipeline.

pub mod draft;
pub mod lead;
pub mod search;

pub use draft::{DraftRecord, Language, MessageDraft, NewDraft};
pub use lead::{CandidateLead, Contact, Lead, LeadStatus, NewLead};
pub use search::SearchHit;
