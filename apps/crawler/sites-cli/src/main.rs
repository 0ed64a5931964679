use clap::{Parser, Subcommand};
use core_config::tracing::{init_tracing, install_color_eyre};
use database::mongodb::{MongoConnectionManager, check_health_detailed};
use domain_crawler::{CrawlerStore, MongoSiteRepository, PageCountStrategy, SiteService};
use std::sync::Arc;
use tracing::info;

mod config;

use config::Config;

/// Inspect the crawler database
#[derive(Debug, Parser)]
#[command(name = "crawler-sites", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print every tracked site with its page count, largest first, as JSON
    Sites {
        /// `live` counts url_states per site, `estimate` uses the stored estimate
        #[arg(long, default_value_t = PageCountStrategy::Live)]
        page_count: PageCountStrategy,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },
    /// Connect and report server health
    Ping,
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    let cli = Cli::parse();

    // Missing MONGODB_URI stops here, before any connection exists
    let config = Config::from_env()?;

    init_tracing(&config.environment);

    let manager = Arc::new(MongoConnectionManager::from_config(
        config.mongodb.clone(),
        config.reuse_across_reloads(),
    ));

    match cli.command {
        Command::Sites { page_count, pretty } => {
            let store = CrawlerStore::new(Arc::clone(&manager));
            let service = SiteService::new(MongoSiteRepository::new(store), page_count);

            let sites = service.get_all_sites().await?;
            info!(count = sites.len(), strategy = %page_count, "Loaded site summaries");

            let output = if pretty {
                serde_json::to_string_pretty(&sites)?
            } else {
                serde_json::to_string(&sites)?
            };
            println!("{}", output);
        }
        Command::Ping => {
            let client = manager.client().await?;
            let status = check_health_detailed(&client).await;

            if !status.healthy {
                eyre::bail!(
                    "MongoDB at {} is unhealthy: {}",
                    config.mongodb.redacted_url(),
                    status.message.unwrap_or_default()
                );
            }
            println!(
                "MongoDB at {} is healthy ({}ms)",
                config.mongodb.redacted_url(),
                status.response_time_ms
            );
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_sites_defaults_to_live_counts() {
        let cli = Cli::try_parse_from(["crawler-sites", "sites"]).unwrap();
        match cli.command {
            Command::Sites { page_count, pretty } => {
                assert_eq!(page_count, PageCountStrategy::Live);
                assert!(!pretty);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_sites_accepts_estimate() {
        let cli =
            Cli::try_parse_from(["crawler-sites", "sites", "--page-count", "estimate", "--pretty"])
                .unwrap();
        assert!(matches!(
            cli.command,
            Command::Sites {
                page_count: PageCountStrategy::Estimate,
                pretty: true
            }
        ));
    }

    #[test]
    fn test_sites_rejects_unknown_strategy() {
        assert!(Cli::try_parse_from(["crawler-sites", "sites", "--page-count", "guess"]).is_err());
    }
}
