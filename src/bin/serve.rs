//! serve - preview the site locally with its custom 404 page
//!
//! Usage: serve [PORT]   (default 8000)

use anyhow::{Context, Result};
use tracing::error;
use vwad_site_tools::cli::ServeArgs;
use vwad_site_tools::config::ServeConfig;
use vwad_site_tools::logging::init_logging;
use vwad_site_tools::server::PreviewServer;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = ServeArgs::parse_args();

    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    init_logging(args.log_level());

    if let Err(e) = run(&args).await {
        error!("Server failed: {:#}", e);
        eprintln!("\nError: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}

/// Serve until Ctrl-C. Requests are handled one at a time on a blocking
/// thread while this task waits for the signal.
async fn run(args: &ServeArgs) -> Result<()> {
    let config = ServeConfig::from_args(args)?;
    let server = PreviewServer::bind(&config)?;
    let port = server.local_addr().map_or(config.port, |addr| addr.port());

    println!(
        "Serving at http://localhost:{}/ (404 -> {})",
        port, config.fallback_page
    );

    let shutdown = server.shutdown_handle();
    let mut worker = tokio::task::spawn_blocking(move || server.run());

    tokio::select! {
        signal = tokio::signal::ctrl_c() => {
            signal.context("Failed to listen for Ctrl-C")?;
            shutdown.shutdown();
            (&mut worker).await.context("Server thread panicked")?;
        }
        finished = &mut worker => {
            finished.context("Server thread panicked")?;
        }
    }

    println!("\nStopped.");
    Ok(())
}
