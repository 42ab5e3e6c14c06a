//! Prospect discovery across a campaign's query list.

use tracing::{debug, info};

use crate::campaigns::{self, Campaign};
use crate::extract;
use crate::search::rate_limited::RateLimitedSearcher;
use crate::traits::searcher::SearchProvider;
use crate::types::{CandidateLead, SearchHit};

/// How many results to request per query.
const RESULTS_PER_QUERY: usize = 10;

/// Drives the rate-limited searcher over campaign query lists and turns
/// surviving hits into candidate leads.
pub struct ProspectSearcher<P: SearchProvider> {
    searcher: RateLimitedSearcher<P>,
}

impl<P: SearchProvider> ProspectSearcher<P> {
    /// Create a searcher over a rate-limited provider.
    pub fn new(searcher: RateLimitedSearcher<P>) -> Self {
        Self { searcher }
    }

    /// Searches consumed from the shared budget so far.
    pub fn searches_done(&self) -> u32 {
        self.searcher.budget().spent()
    }

    /// Whether the shared budget has run out.
    pub fn budget_exhausted(&self) -> bool {
        self.searcher.budget().is_exhausted()
    }

    /// Execute every query of a campaign, in order, while budget remains.
    ///
    /// Hits whose URL is not a canonical profile URL are dropped. Budget
    /// exhaustion stops the loop cleanly; it is not an error.
    pub async fn search_campaign(&self, campaign: Campaign) -> Vec<CandidateLead> {
        let config = campaigns::config(campaign);
        info!(campaign = %campaign, name = config.display_name, "starting campaign search");
        let mut found = Vec::new();

        for query in config.search_queries {
            let Some(hits) = self.searcher.search(query, RESULTS_PER_QUERY).await else {
                info!(campaign = %campaign, "search budget exhausted, stopping campaign");
                break;
            };

            let before = found.len();
            for hit in &hits {
                if let Some(candidate) = self.candidate_from_hit(hit, campaign, query) {
                    debug!(
                        name = candidate.full_name.as_deref().unwrap_or("?"),
                        url = candidate.profile_url.as_str(),
                        "candidate found"
                    );
                    found.push(candidate);
                }
            }
            info!(
                campaign = %campaign,
                query,
                profiles = found.len() - before,
                "query complete"
            );
        }

        info!(
            campaign = %campaign,
            candidates = found.len(),
            searches = self.searches_done(),
            "campaign search complete"
        );
        found
    }

    /// Run targeted query variants to find a person's email.
    ///
    /// Returns the first email found in any result's combined
    /// title+snippet, or `None` when the variants (or the budget) run
    /// out.
    pub async fn search_email_for_contact(
        &self,
        name: &str,
        organization: Option<&str>,
    ) -> Option<String> {
        let queries = extract::build_email_search_queries(name, organization);

        for query in queries {
            let hits = self.searcher.search(&query, RESULTS_PER_QUERY).await?;
            for hit in hits {
                if let Some(email) = extract::extract_emails(&hit.combined_text()).into_iter().next()
                {
                    info!(name, email = email.as_str(), "email found");
                    return Some(email);
                }
            }
        }
        None
    }

    fn candidate_from_hit(
        &self,
        hit: &SearchHit,
        campaign: Campaign,
        query: &str,
    ) -> Option<CandidateLead> {
        let slug = extract::parse_profile_slug(&hit.url)?;

        let parsed = extract::parse_result_title(&hit.title);
        let full_name = parsed
            .name
            .unwrap_or_else(|| extract::infer_name_from_slug(&slug));

        // Titles get truncated by the search engine; the snippet often
        // carries the full text.
        let job_title = parsed.job_title.map(|jt| {
            extract::extend_job_title_from_snippet(&jt, &hit.snippet).unwrap_or(jt)
        });

        let email = extract::extract_emails(&hit.combined_text())
            .into_iter()
            .next();

        Some(CandidateLead {
            full_name: Some(full_name),
            job_title,
            organization: parsed.organization,
            email,
            profile_url: format!("https://www.linkedin.com/in/{slug}"),
            campaign,
            source_query: query.to_string(),
            region: extract::infer_region(query).map(str::to_string),
            raw_snippet: hit.snippet.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::budget::RunBudget;
    use crate::search::rate_limited::PacingConfig;
    use crate::traits::searcher::MockSearchProvider;
    use std::sync::Arc;

    fn prospect(
        provider: MockSearchProvider,
        limit: u32,
    ) -> ProspectSearcher<MockSearchProvider> {
        ProspectSearcher::new(
            RateLimitedSearcher::new(provider, Arc::new(RunBudget::new(limit)))
                .with_pacing(PacingConfig::zero()),
        )
    }

    fn first_query(campaign: Campaign) -> &'static str {
        campaigns::config(campaign).search_queries[0]
    }

    #[tokio::test]
    async fn builds_candidates_from_profile_hits() {
        let query = first_query(Campaign::DirectB2b);
        let provider = MockSearchProvider::new().with_hits(
            query,
            vec![
                SearchHit::new(
                    "https://www.linkedin.com/in/jane-doe-1a2b3c4d",
                    "Jane Doe - Chief of Pathology - Hospital X | LinkedIn",
                    "Chief of Pathology and Lab Medicine · Hospital X. Buenos Aires.",
                ),
                // Non-profile URL must be dropped
                SearchHit::new("https://hospital-x.org/staff", "Our staff", ""),
            ],
        );

        let candidates = prospect(provider, 20)
            .search_campaign(Campaign::DirectB2b)
            .await;
        assert_eq!(candidates.len(), 1);
        let c = &candidates[0];
        assert_eq!(c.full_name.as_deref(), Some("Jane Doe"));
        assert_eq!(
            c.job_title.as_deref(),
            Some("Chief of Pathology and Lab Medicine")
        );
        assert_eq!(c.organization.as_deref(), Some("Hospital X"));
        assert_eq!(c.profile_url, "https://www.linkedin.com/in/jane-doe-1a2b3c4d");
        assert_eq!(c.region.as_deref(), Some("Argentina"));
        assert_eq!(c.campaign, Campaign::DirectB2b);
        assert_eq!(c.source_query, query);
    }

    #[tokio::test]
    async fn name_falls_back_to_slug_inference() {
        let query = first_query(Campaign::Pharma);
        let provider = MockSearchProvider::new().with_hits(
            query,
            vec![SearchHit::new(
                "https://linkedin.com/in/john-smith-9f8e7a",
                "",
                "",
            )],
        );

        let candidates = prospect(provider, 20).search_campaign(Campaign::Pharma).await;
        assert_eq!(candidates[0].full_name.as_deref(), Some("John Smith"));
    }

    #[tokio::test]
    async fn budget_bounds_query_count() {
        // More queries in the campaign than budget allows
        let provider = MockSearchProvider::new();
        let searcher = prospect(provider, 3);
        let candidates = searcher.search_campaign(Campaign::DirectB2b).await;
        assert!(candidates.is_empty());
        assert_eq!(searcher.searches_done(), 3);
    }

    #[tokio::test]
    async fn email_search_returns_first_email() {
        let queries = extract::build_email_search_queries("Jane Doe", Some("Hospital X"));
        let provider = MockSearchProvider::new().with_hits(
            &queries[0],
            vec![SearchHit::new(
                "https://hospital-x.org/contact",
                "Contact",
                "Reach Jane at jane.doe@hospital-x.org for referrals.",
            )],
        );

        let searcher = prospect(provider, 20);
        let email = searcher
            .search_email_for_contact("Jane Doe", Some("Hospital X"))
            .await;
        assert_eq!(email.as_deref(), Some("jane.doe@hospital-x.org"));
        assert_eq!(searcher.searches_done(), 1);
    }

    #[tokio::test]
    async fn email_search_gives_up_with_budget() {
        let provider = MockSearchProvider::new();
        let searcher = prospect(provider, 1);
        let email = searcher.search_email_for_contact("Jane Doe", None).await;
        assert_eq!(email, None);
        assert_eq!(searcher.searches_done(), 1);
    }
}
