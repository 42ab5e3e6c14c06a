//! `growth` — run the prospecting pipeline from the command line.
//!
//! Reads `SEARCH_API_KEY` and `DATABASE_URL` from the environment (or a
//! `.env` file). A dry run without `DATABASE_URL` falls back to the
//! in-memory store so the pipeline can be exercised end to end with no
//! database.

use anyhow::{bail, Context, Result};
use clap::Parser;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use prospecting::{
    CampaignSelection, ContactDirectory, LeadRegistry, LeadStore, MemoryStore, Mode, Pipeline,
    PostgresStore, ProspectSearcher, RateLimitedSearcher, RunBudget, SerperProvider,
    TemplateComposer,
};

#[derive(Parser)]
#[command(name = "growth", version, about = "Lead discovery and outreach drafting")]
struct Cli {
    /// Campaign to run (direct_b2b, pharma, influencer, events) or "all"
    #[arg(long, default_value = "all")]
    campaign: CampaignSelection,

    /// Phases to execute: search, enrich, draft, or full
    #[arg(long, default_value = "full")]
    mode: Mode,

    /// Log intended writes instead of persisting them
    #[arg(long)]
    dry_run: bool,

    /// Maximum external search calls for this run
    #[arg(long, default_value_t = 20)]
    max_searches: u32,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let api_key =
        std::env::var("SEARCH_API_KEY").context("SEARCH_API_KEY must be set")?;

    let (store, contacts): (Arc<dyn LeadStore>, Arc<dyn ContactDirectory>) =
        match std::env::var("DATABASE_URL") {
            Ok(url) => {
                let store = Arc::new(
                    PostgresStore::new(&url)
                        .await
                        .context("failed to connect to database")?,
                );
                (store.clone(), store)
            }
            Err(_) if cli.dry_run => {
                info!("no DATABASE_URL set, dry run uses the in-memory store");
                let store = Arc::new(MemoryStore::new());
                (store.clone(), store)
            }
            Err(_) => bail!("DATABASE_URL must be set (or pass --dry-run)"),
        };

    let budget = Arc::new(RunBudget::new(cli.max_searches));
    let searcher = ProspectSearcher::new(RateLimitedSearcher::new(
        SerperProvider::new(api_key),
        budget,
    ));
    let registry = LeadRegistry::new(store, contacts).with_dry_run(cli.dry_run);
    let pipeline = Pipeline::new(searcher, registry, Arc::new(TemplateComposer::new()));

    let summary = pipeline.run(cli.mode, cli.campaign).await;
    println!("{summary}");

    Ok(())
}
