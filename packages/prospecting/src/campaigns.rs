//! Campaign definitions and their search query tables.
//!
//! A campaign is one of a closed set of outbound-targeting strategies.
//! Keeping the set as an enum (rather than string tags) means a new
//! campaign cannot be introduced without a matching code path, and the
//! per-campaign tables below are checked for exhaustiveness at compile
//! time.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the fixed outbound-targeting strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Campaign {
    /// Direct sales to reference centers and diagnostic labs
    #[serde(rename = "DIRECT_B2B")]
    DirectB2b,
    /// Pharma partnerships: companion diagnostics and clinical trials
    #[serde(rename = "PHARMA")]
    Pharma,
    /// Editors, KOLs, and content partnerships
    #[serde(rename = "INFLUENCER")]
    Influencer,
    /// Conference speakers and organizers
    #[serde(rename = "EVENTS")]
    Events,
}

impl Campaign {
    /// All campaigns, in pipeline iteration order.
    pub fn all() -> [Campaign; 4] {
        [
            Campaign::DirectB2b,
            Campaign::Pharma,
            Campaign::Influencer,
            Campaign::Events,
        ]
    }

    /// The persisted tag for this campaign.
    pub fn as_str(&self) -> &'static str {
        match self {
            Campaign::DirectB2b => "DIRECT_B2B",
            Campaign::Pharma => "PHARMA",
            Campaign::Influencer => "INFLUENCER",
            Campaign::Events => "EVENTS",
        }
    }
}

impl fmt::Display for Campaign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Campaign {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "DIRECT_B2B" => Ok(Campaign::DirectB2b),
            "PHARMA" => Ok(Campaign::Pharma),
            "INFLUENCER" => Ok(Campaign::Influencer),
            "EVENTS" => Ok(Campaign::Events),
            other => Err(format!("unknown campaign: {other}")),
        }
    }
}

/// Static configuration for one campaign.
#[derive(Debug, Clone, Copy)]
pub struct CampaignConfig {
    /// Human-readable name for logs and summaries.
    pub display_name: &'static str,

    /// Ordered search queries executed by the search phase.
    pub search_queries: &'static [&'static str],
}

/// Look up the configuration table for a campaign.
pub fn config(campaign: Campaign) -> &'static CampaignConfig {
    match campaign {
        Campaign::DirectB2b => &DIRECT_B2B,
        Campaign::Pharma => &PHARMA,
        Campaign::Influencer => &INFLUENCER,
        Campaign::Events => &EVENTS,
    }
}

static DIRECT_B2B: CampaignConfig = CampaignConfig {
    display_name: "Direct B2B — Reference Centers & Labs",
    search_queries: &[
        // LatAm — English titles
        "site:linkedin.com/in \"Medical Director\" OR \"Chief of Pathology\" OR \"Laboratory Director\" pathology Argentina OR Brazil",
        "site:linkedin.com/in \"Head of Pathology\" OR \"Lab Director\" OR \"Pathology Manager\" laboratory Argentina OR Brazil OR Colombia",
        // LatAm — Spanish titles
        "site:linkedin.com/in \"Director Médico\" OR \"Jefe de Patología\" patología oncología Argentina OR Brasil",
        "site:linkedin.com/in \"Director de Laboratorio\" OR \"Jefe de Laboratorio\" diagnóstico Argentina OR Colombia OR México",
        "site:linkedin.com/in \"Medical Director\" OR \"Lab Director\" pathology Peru OR Chile OR Mexico OR Colombia",
        // Africa — English titles
        "site:linkedin.com/in \"Head of Pathology\" OR \"Lab Director\" diagnostic laboratory \"South Africa\" OR Nigeria",
        "site:linkedin.com/in \"Medical Director\" OR \"Chief Pathologist\" OR \"Laboratory Manager\" Kenya OR Ghana OR Ethiopia OR Tanzania",
        // Reference institutions globally
        "site:linkedin.com/in pathology OR histopathology \"reference laboratory\" OR \"reference center\" director OR manager",
    ],
};

static PHARMA: CampaignConfig = CampaignConfig {
    display_name: "Pharma Partnerships — CDx & Clinical Trials",
    search_queries: &[
        "site:linkedin.com/in \"Business Development\" OR \"Oncology Lead\" OR \"Clinical Trial Manager\" AstraZeneca OR \"Daiichi Sankyo\" HER2 OR \"digital pathology\"",
        "site:linkedin.com/in \"Business Development\" OR \"Oncology\" OR \"Diagnostics\" Roche OR Novartis OR Pfizer \"companion diagnostic\" OR \"digital pathology\"",
        "site:linkedin.com/in \"Oncology\" OR \"Clinical Development\" OR \"Biomarker\" Merck OR \"Bristol-Myers\" OR Lilly OR Gilead pathology OR diagnostics",
        "site:linkedin.com/in \"R&D Director\" OR \"Biomarker\" OR \"Head of Companion Diagnostics\" pharma oncology \"companion diagnostic\" OR CDx",
        "site:linkedin.com/in \"Medical Science Liaison\" OR \"Clinical Operations\" oncology pharma \"digital pathology\" OR \"AI diagnostics\"",
        "site:linkedin.com/in \"Clinical Trial\" OR \"Pathology Services\" OR \"Central Lab\" ICON OR Covance OR LabCorp oncology OR pathology",
        "site:linkedin.com/in \"Director Médico\" OR \"Clinical Research\" pharma oncology \"Latin America\" OR LATAM OR Argentina OR Brazil",
    ],
};

static INFLUENCER: CampaignConfig = CampaignConfig {
    display_name: "Influencers & Thought Leadership",
    search_queries: &[
        "site:linkedin.com/in \"Editor\" OR \"Founder\" OR \"Author\" \"digital pathology\" OR \"AI in healthcare\" OR \"computational pathology\"",
        "site:linkedin.com/in \"thought leader\" OR \"keynote speaker\" OR \"blogger\" pathology AI oncology diagnostics",
        "site:linkedin.com/in \"podcast host\" OR \"content creator\" \"digital health\" OR \"health tech\" OR \"medtech\" pathology",
        "site:linkedin.com/in \"Professor\" OR \"Researcher\" \"computational pathology\" OR \"digital pathology\" publications OR research",
        "site:linkedin.com/in \"newsletter\" OR \"Substack\" \"pathology\" OR \"diagnostics\" OR \"precision medicine\"",
        "site:linkedin.com/in \"Analyst\" OR \"Consultant\" \"digital pathology\" OR \"precision medicine\" market OR trends",
    ],
};

static EVENTS: CampaignConfig = CampaignConfig {
    display_name: "Events & Conferences",
    search_queries: &[
        "site:linkedin.com/in \"Speaker\" OR \"Organizer\" OR \"Chair\" \"pathology congress\" OR \"oncology symposium\" OR \"USCAP\" 2025 OR 2026",
        "site:linkedin.com/in \"Speaker\" OR \"Panelist\" \"European Congress of Pathology\" OR \"ECP\" OR \"ESP\" pathology 2025 OR 2026",
        "site:linkedin.com/in \"Program Director\" OR \"Scientific Committee\" \"digital pathology\" OR \"pathology conference\"",
        "site:linkedin.com/in \"Speaker\" OR \"Panelist\" \"FIFARMA\" OR \"digital pathology congress\" OR \"congreso patología\"",
        "site:linkedin.com/in \"Speaker\" OR \"Organizer\" \"African\" OR \"Africa\" pathology OR diagnostics conference OR congress",
        "site:linkedin.com/in \"Speaker\" OR \"Chair\" OR \"Moderator\" \"oncology summit\" OR \"ASCO\" OR \"ESMO\" \"digital pathology\" OR biomarker",
    ],
};
