//! Configuration for both tools.
//!
//! The repository list and the login exclusion list are fixed for the site;
//! everything else is filled in from command-line arguments.

use crate::cli::{ContributorsArgs, ServeArgs};
use anyhow::{Context, Result};
use std::net::IpAddr;
use std::path::PathBuf;

/// GitHub contributor endpoints, fetched in this order.
pub const CONTRIBUTOR_URLS: [&str; 3] = [
    "https://api.github.com/repos/OWASP/OWASP-VWAD/contributors",
    "https://api.github.com/repos/OWASP/www-project-vulnerable-web-applications-directory/contributors",
    "https://api.github.com/repos/owasp-vwad/owasp-vwad.github.io/contributors",
];

/// Logins never listed as contributors.
pub const EXCLUDED_LOGINS: [&str; 9] = [
    // Bots
    "vwadbot",
    "dependabot[bot]",
    "owasp-nest[bot]",
    "github-actions[bot]",
    "Copilot",
    "OWASPFoundation",
    // Authors
    "kingthorin",
    "psiinon",
    "raulsiles",
];

/// Default location of the generated contributors file.
pub const DEFAULT_OUTPUT: &str = "data/contributors.json";

/// Per-request timeout for the GitHub API.
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Default port of the preview server.
pub const DEFAULT_PORT: u16 = 8000;

/// Page served in place of the default not-found response.
pub const FALLBACK_PAGE: &str = "404.html";

/// Settings for one contributor fetch run.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Contributor endpoints, fetched sequentially.
    pub urls: Vec<String>,

    /// Logins dropped from the result.
    pub excluded: Vec<String>,

    /// Request timeout in seconds.
    pub timeout_seconds: u64,

    /// Bearer token; `None` means unauthenticated requests.
    pub token: Option<String>,

    /// `User-Agent` header (required by the GitHub API).
    pub user_agent: String,

    /// Show a progress bar while fetching.
    pub show_progress: bool,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            urls: CONTRIBUTOR_URLS.iter().map(|u| u.to_string()).collect(),
            excluded: EXCLUDED_LOGINS.iter().map(|l| l.to_string()).collect(),
            timeout_seconds: REQUEST_TIMEOUT_SECS,
            token: None,
            user_agent: default_user_agent(),
            show_progress: true,
        }
    }
}

fn default_user_agent() -> String {
    format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
}

impl FetchConfig {
    /// Apply CLI arguments on top of the fixed defaults.
    ///
    /// Only the token and progress display come from the command line; the
    /// endpoint list and exclusions cannot be changed at runtime.
    pub fn merge_with_args(&mut self, args: &ContributorsArgs) {
        self.token = args.token().map(String::from);
        self.show_progress = !args.quiet;
    }

    /// Whether `login` is on the exclusion list.
    pub fn is_excluded(&self, login: &str) -> bool {
        self.excluded.iter().any(|l| l == login)
    }
}

/// Settings for the preview server.
#[derive(Debug, Clone)]
pub struct ServeConfig {
    /// Address to bind.
    pub bind: IpAddr,

    /// Port to bind.
    pub port: u16,

    /// Directory served as the site root (absolute, canonical).
    pub root: PathBuf,

    /// File name (relative to `root`) of the not-found page.
    pub fallback_page: String,
}

impl ServeConfig {
    /// Build from CLI arguments, resolving the root directory once.
    pub fn from_args(args: &ServeArgs) -> Result<Self> {
        let dir = match args.directory {
            Some(ref dir) => dir.clone(),
            None => std::env::current_dir().context("Failed to read current directory")?,
        };

        let root = std::fs::canonicalize(&dir)
            .with_context(|| format!("Failed to resolve directory: {}", dir.display()))?;

        Ok(Self {
            bind: args.bind,
            port: args.port,
            root,
            fallback_page: FALLBACK_PAGE.to_string(),
        })
    }

    /// Path of the not-found page.
    pub fn fallback_path(&self) -> PathBuf {
        self.root.join(&self.fallback_page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;

    #[test]
    fn test_default_fetch_config() {
        let config = FetchConfig::default();
        assert_eq!(config.urls.len(), 3);
        assert_eq!(config.timeout_seconds, 30);
        assert!(config.token.is_none());
        assert!(config.user_agent.starts_with("vwad-site-tools/"));
    }

    #[test]
    fn test_exclusion_is_case_sensitive() {
        let config = FetchConfig::default();
        assert!(config.is_excluded("dependabot[bot]"));
        assert!(config.is_excluded("Copilot"));
        assert!(!config.is_excluded("copilot"));
        assert!(!config.is_excluded("alice"));
    }

    #[test]
    fn test_merge_token_from_args() {
        let args = ContributorsArgs {
            output: PathBuf::from(DEFAULT_OUTPUT),
            token: Some("secret".to_string()),
            verbose: false,
            quiet: true,
        };
        let mut config = FetchConfig::default();
        config.merge_with_args(&args);
        assert_eq!(config.token.as_deref(), Some("secret"));
        assert!(!config.show_progress);
    }

    #[test]
    fn test_serve_config_resolves_root() {
        let dir = tempfile::tempdir().unwrap();
        let args = ServeArgs {
            port: 9000,
            bind: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            directory: Some(dir.path().to_path_buf()),
            verbose: false,
            quiet: false,
        };
        let config = ServeConfig::from_args(&args).unwrap();
        assert!(config.root.is_absolute());
        assert_eq!(config.port, 9000);
        assert_eq!(
            config.fallback_path(),
            std::fs::canonicalize(dir.path()).unwrap().join("404.html")
        );
    }

    #[test]
    fn test_serve_config_missing_directory() {
        let args = ServeArgs {
            port: DEFAULT_PORT,
            bind: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            directory: Some(PathBuf::from("/definitely/not/here")),
            verbose: false,
            quiet: false,
        };
        assert!(ServeConfig::from_args(&args).is_err());
    }
}
