//! update-contributors - refresh the site's contributor list
//!
//! Fetches contributor counts for the VWAD repositories from the GitHub API
//! and writes them to `data/contributors.json` (or the given path).
//!
//! Exit codes:
//!   0 - Success
//!   1 - Any error (invalid arguments, HTTP failure, write failure)

use anyhow::Result;
use tracing::{debug, error, info};
use vwad_site_tools::cli::ContributorsArgs;
use vwad_site_tools::config::FetchConfig;
use vwad_site_tools::contributors::update;
use vwad_site_tools::logging::init_logging;

#[tokio::main]
async fn main() -> Result<()> {
    let args = ContributorsArgs::parse_args();

    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    init_logging(args.log_level());

    info!("update-contributors v{}", env!("CARGO_PKG_VERSION"));
    debug!("Output file: {}", args.output.display());

    if let Err(e) = run(args).await {
        error!("Update failed: {:#}", e);
        eprintln!("\nError: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}

/// Fetch, merge and write. Nothing is written if any request fails.
async fn run(args: ContributorsArgs) -> Result<()> {
    let mut config = FetchConfig::default();
    config.merge_with_args(&args);

    update(&config, &args.output).await?;
    Ok(())
}
