//! One-shot fetch of bills or vote analyses, printed as JSON.
#![deny(
    clippy::expect_used,
    clippy::panic,
    clippy::todo,
    clippy::unimplemented,
    clippy::unwrap_used
)]
#![allow(clippy::print_stdout)]

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use legisview_api::{
    config::Config,
    congress::{Chamber, HttpCongressClient},
    dashboard::{BillQuery, Dashboard},
};
use lv_records::{
    listing::parse_party_filter, BillFilter, BillNumber, BillStatus, BillTypeFilter, Party,
};
use tracing_subscriber::EnvFilter;

/// Fetch normalized Congress.gov data.
///
/// Connection settings come from `config.yaml` and `LV_*` environment
/// variables, as for the server.
#[derive(Parser, Debug)]
#[command(name = "lv-fetch", version, about)]
struct Cli {
    /// Congress number (defaults to the configured congress).
    #[arg(long, global = true)]
    congress: Option<u32>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// List one page of bills with overview figures.
    Bills(BillsArgs),
    /// Analyze the recorded votes on one bill.
    Votes {
        /// Bill number such as HR3076 or s5.
        bill: BillNumber,
    },
    /// Show subjects, actions and text versions for one bill.
    Detail {
        /// Bill number such as HR3076 or s5.
        bill: BillNumber,
    },
}

#[derive(clap::Args, Debug)]
struct BillsArgs {
    /// House or Senate.
    #[arg(long)]
    chamber: Option<Chamber>,

    /// hr, s, hjres or sjres.
    #[arg(long)]
    bill_type: Option<BillTypeFilter>,

    /// D or R sponsor party.
    #[arg(long, value_parser = parse_party_filter)]
    party: Option<Party>,

    /// introduced, passed-house, passed-senate, became-law or failed.
    #[arg(long)]
    status: Option<BillStatus>,

    #[arg(long)]
    limit: Option<u32>,

    #[arg(long, default_value_t = 0)]
    offset: u32,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::load().map_err(|e| anyhow::anyhow!("{e}"))?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.logging.level))
        .with_writer(std::io::stderr)
        .init();

    let http = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.congress_api.timeout_secs))
        .build()?;
    let dashboard = Dashboard::new(
        Arc::new(HttpCongressClient::with_client(
            http,
            &config.congress_api.base_url,
            &config.congress_api.api_key,
        )),
        config.classifier.thresholds(),
        config.congress_api.page_size,
    );
    let congress = cli.congress.unwrap_or(config.defaults.congress);

    let output = match cli.command {
        Commands::Bills(args) => {
            let query = BillQuery {
                congress,
                chamber: args.chamber.unwrap_or(config.defaults.chamber),
                filter: BillFilter {
                    bill_type: args.bill_type,
                    party: args.party,
                    status: args.status,
                },
                limit: args.limit,
                offset: args.offset,
            };
            let page = dashboard
                .list_bills(&query)
                .await
                .context("fetching bill list")?;
            serde_json::to_string_pretty(&page)?
        }
        Commands::Votes { bill } => {
            serde_json::to_string_pretty(&dashboard.vote_analysis(congress, &bill).await)?
        }
        Commands::Detail { bill } => {
            serde_json::to_string_pretty(&dashboard.bill_detail(congress, &bill).await)?
        }
    };

    println!("{output}");
    Ok(())
}
