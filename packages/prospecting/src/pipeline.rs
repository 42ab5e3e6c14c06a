//! The growth pipeline: search, enrich, draft.
//!
//! Phases run strictly in sequence and share one search budget. Every
//! phase degrades per-item: a failed candidate, lead, or draft is
//! logged and skipped, and the run always ends with a summary.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use tracing::{info, warn};

use crate::campaigns::Campaign;
use crate::registry::LeadRegistry;
use crate::search::prospect::ProspectSearcher;
use crate::traits::composer::DraftComposer;
use crate::traits::searcher::SearchProvider;
use crate::types::NewDraft;

/// Which phases a run executes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Discovery and registration only.
    Search,
    /// Email enrichment only.
    Enrich,
    /// Draft generation only.
    Draft,
    /// All three phases in order.
    Full,
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "search" => Ok(Mode::Search),
            "enrich" => Ok(Mode::Enrich),
            "draft" => Ok(Mode::Draft),
            "full" => Ok(Mode::Full),
            other => Err(format!("unknown mode: {other}")),
        }
    }
}

/// One campaign or all of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CampaignSelection {
    One(Campaign),
    All,
}

impl CampaignSelection {
    /// Campaigns to iterate, in fixed order.
    pub fn campaigns(&self) -> Vec<Campaign> {
        match self {
            CampaignSelection::One(c) => vec![*c],
            CampaignSelection::All => Campaign::all().to_vec(),
        }
    }

    /// Store-query scope: `None` means unscoped.
    pub fn filter(&self) -> Option<Campaign> {
        match self {
            CampaignSelection::One(c) => Some(*c),
            CampaignSelection::All => None,
        }
    }
}

impl FromStr for CampaignSelection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("all") {
            Ok(CampaignSelection::All)
        } else {
            s.parse().map(CampaignSelection::One)
        }
    }
}

/// Counters reported at the end of a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub leads_found: u32,
    pub leads_inserted: u32,
    pub leads_enriched: u32,
    pub drafts_created: u32,
    pub searches_used: u32,
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} found, {} inserted, {} enriched, {} drafts, {} searches used",
            self.leads_found,
            self.leads_inserted,
            self.leads_enriched,
            self.drafts_created,
            self.searches_used
        )
    }
}

/// Orchestrates the phases over a searcher, a registry, and a composer.
pub struct Pipeline<P: SearchProvider> {
    searcher: ProspectSearcher<P>,
    registry: LeadRegistry,
    composer: Arc<dyn DraftComposer>,
}

impl<P: SearchProvider> Pipeline<P> {
    pub fn new(
        searcher: ProspectSearcher<P>,
        registry: LeadRegistry,
        composer: Arc<dyn DraftComposer>,
    ) -> Self {
        Self {
            searcher,
            registry,
            composer,
        }
    }

    /// Run the selected phases. Never fails; problems are logged and
    /// reflected in the summary counters.
    pub async fn run(&self, mode: Mode, selection: CampaignSelection) -> RunSummary {
        let mut summary = RunSummary::default();

        if matches!(mode, Mode::Search | Mode::Full) {
            self.search_phase(selection, &mut summary).await;
        }
        if matches!(mode, Mode::Enrich | Mode::Full) {
            self.enrich_phase(selection, &mut summary).await;
        }
        if matches!(mode, Mode::Draft | Mode::Full) {
            self.draft_phase(selection, &mut summary).await;
        }

        summary.searches_used = self.searcher.searches_done();
        info!(summary = %summary, "run complete");
        summary
    }

    async fn search_phase(&self, selection: CampaignSelection, summary: &mut RunSummary) {
        for campaign in selection.campaigns() {
            if self.searcher.budget_exhausted() {
                info!(campaign = %campaign, "budget exhausted, skipping remaining campaigns");
                break;
            }

            let candidates = self.searcher.search_campaign(campaign).await;
            summary.leads_found += candidates.len() as u32;

            let outcome = self.registry.register_batch(candidates).await;
            summary.leads_inserted += outcome.stats.inserted;
        }
    }

    async fn enrich_phase(&self, selection: CampaignSelection, summary: &mut RunSummary) {
        let leads = self.registry.leads_missing_email(selection.filter()).await;
        info!(count = leads.len(), "leads missing email");

        for lead in leads {
            if self.searcher.budget_exhausted() {
                info!("budget exhausted, stopping enrichment");
                break;
            }

            let Some(name) = lead.full_name.as_deref() else {
                continue;
            };

            let email = self
                .searcher
                .search_email_for_contact(name, lead.organization.as_deref())
                .await;

            if let Some(email) = email {
                if self.registry.record_email(&lead, &email).await {
                    summary.leads_enriched += 1;
                }
            }
        }
    }

    async fn draft_phase(&self, selection: CampaignSelection, summary: &mut RunSummary) {
        let leads = self.registry.leads_needing_drafts(selection.filter()).await;
        info!(count = leads.len(), "leads needing drafts");

        for lead in leads {
            let draft = match self.composer.compose(&lead).await {
                Ok(draft) => draft,
                Err(e) => {
                    warn!(lead_id = %lead.id, error = %e, "draft composition failed");
                    continue;
                }
            };

            let new_draft = NewDraft::from_message(lead.id, lead.campaign, &draft);
            match self.registry.record_draft(&new_draft).await {
                Ok(_) => {
                    summary.drafts_created += 1;
                    // Status advances only once the draft is safely stored.
                    if let Err(e) = self.registry.mark_draft_generated(&lead).await {
                        warn!(lead_id = %lead.id, error = %e, "failed to advance lead status");
                    }
                }
                Err(e) => {
                    warn!(lead_id = %lead.id, error = %e, "failed to store draft");
                }
            }
        }
    }
}
