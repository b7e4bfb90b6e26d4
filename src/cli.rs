//! Command-line interface argument parsing.
//!
//! This module handles argument parsing for both binaries using clap,
//! including validation and default values.

use crate::config::{DEFAULT_OUTPUT, DEFAULT_PORT};
use clap::Parser;
use std::net::IpAddr;
use std::path::PathBuf;

/// Fetch GitHub contributors and write data/contributors.json
///
/// Contribution counts are summed across the VWAD repositories. Bots and
/// the project authors are left out.
///
/// Examples:
///   update-contributors
///   update-contributors site/data/contributors.json
///   GITHUB_TOKEN=ghp_xxx update-contributors
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct ContributorsArgs {
    /// Path to the JSON file to write
    #[arg(default_value = DEFAULT_OUTPUT, value_name = "OUTPUT_FILE")]
    pub output: PathBuf,

    /// GitHub token used as a bearer token
    ///
    /// Without a token the requests are unauthenticated and subject to
    /// GitHub's lower rate limit.
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true, value_name = "TOKEN")]
    pub token: Option<String>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (minimal output)
    #[arg(short, long)]
    pub quiet: bool,
}

impl ContributorsArgs {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// The token, treating an empty value as unset.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref().filter(|t| !t.trim().is_empty())
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        if self.output.as_os_str().is_empty() {
            return Err("Output file path must not be empty".to_string());
        }

        if self.output.is_dir() {
            return Err(format!(
                "Output path is a directory: {}",
                self.output.display()
            ));
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        log_level(self.verbose, self.quiet)
    }
}

/// Serve the site with a custom 404 page
///
/// Files are served from the current directory (or --directory). Any
/// not-found response is replaced by the contents of 404.html when that
/// file exists.
///
/// Examples:
///   serve
///   serve 8080
///   serve 8080 --bind 127.0.0.1 --directory ./site
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(default_value_t = DEFAULT_PORT, value_name = "PORT")]
    pub port: u16,

    /// Address to bind (all interfaces by default)
    #[arg(long, default_value = "0.0.0.0", value_name = "ADDR")]
    pub bind: IpAddr,

    /// Directory to serve (defaults to the current directory)
    #[arg(short, long, value_name = "DIR")]
    pub directory: Option<PathBuf>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (minimal output)
    #[arg(short, long)]
    pub quiet: bool,
}

impl ServeArgs {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        if let Some(ref dir) = self.directory {
            if !dir.exists() {
                return Err(format!("Directory does not exist: {}", dir.display()));
            }
            if !dir.is_dir() {
                return Err(format!("Path is not a directory: {}", dir.display()));
            }
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        log_level(self.verbose, self.quiet)
    }
}

fn log_level(verbose: bool, quiet: bool) -> tracing::Level {
    if quiet {
        tracing::Level::ERROR
    } else if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    }
}
