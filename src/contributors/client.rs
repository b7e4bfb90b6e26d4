//! GitHub contributors API client.
//!
//! Requests are sent one endpoint at a time. Only the first page of each
//! contributor list is read, so very large repositories are truncated to
//! whatever GitHub returns by default.

use crate::config::FetchConfig;
use crate::contributors::aggregator::{aggregate, shared_logins};
use crate::error::FetchError;
use crate::models::{ContributorTotal, GitHubContributor};
use indicatif::{ProgressBar, ProgressStyle};
use reqwest::header::{ACCEPT, AUTHORIZATION};
use std::time::Duration;
use tracing::{debug, info};

const GITHUB_JSON: &str = "application/vnd.github+json";

/// Client for the contributor endpoints in a [`FetchConfig`].
pub struct ContributorClient {
    config: FetchConfig,
    http_client: reqwest::Client,
}

impl ContributorClient {
    /// Create a client with the configured timeout and user agent.
    pub fn new(config: FetchConfig) -> Result<Self, FetchError> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(FetchError::Client)?;

        Ok(Self {
            config,
            http_client,
        })
    }

    /// Fetch every endpoint and merge the results.
    ///
    /// The first failing endpoint aborts the whole fetch.
    pub async fn fetch_all(&self) -> Result<Vec<ContributorTotal>, FetchError> {
        let progress = self.progress_bar();
        let mut batches = Vec::with_capacity(self.config.urls.len());

        for url in &self.config.urls {
            progress.set_message(repo_slug(url).to_string());

            let batch = match self.fetch_page(url).await {
                Ok(batch) => batch,
                Err(e) => {
                    progress.abandon();
                    return Err(e);
                }
            };

            info!("{}: {} contributors", repo_slug(url), batch.len());
            batches.push(batch);
            progress.inc(1);
        }

        progress.finish_and_clear();

        debug!(
            "{} logins appear in more than one repository",
            shared_logins(&batches)
        );

        Ok(aggregate(batches, |login| self.config.is_excluded(login)))
    }

    /// Fetch a single contributor list.
    pub async fn fetch_page(&self, url: &str) -> Result<Vec<GitHubContributor>, FetchError> {
        debug!("GET {}", url);

        let mut request = self.http_client.get(url).header(ACCEPT, GITHUB_JSON);
        if let Some(ref token) = self.config.token {
            request = request.header(AUTHORIZATION, format!("Bearer {}", token));
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout {
                    url: url.to_string(),
                    seconds: self.config.timeout_seconds,
                }
            } else {
                FetchError::Request {
                    url: url.to_string(),
                    source: e,
                }
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status,
            });
        }

        response
            .json::<Vec<GitHubContributor>>()
            .await
            .map_err(|e| FetchError::Decode {
                url: url.to_string(),
                source: e,
            })
    }

    fn progress_bar(&self) -> ProgressBar {
        if !self.config.show_progress {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new(self.config.urls.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        pb
    }
}

/// Fetch and merge contributors for the given configuration.
pub async fn fetch_contributors(config: &FetchConfig) -> Result<Vec<ContributorTotal>, FetchError> {
    if config.token.is_some() {
        info!("Fetching contributors (authenticated)");
    } else {
        info!("Fetching contributors (unauthenticated)");
    }

    let client = ContributorClient::new(config.clone())?;
    client.fetch_all().await
}

/// `owner/repo` part of a contributors endpoint, for display.
fn repo_slug(url: &str) -> &str {
    let path = url.split_once("/repos/").map_or(url, |(_, rest)| rest);
    path.strip_suffix("/contributors").unwrap_or(path)
}
