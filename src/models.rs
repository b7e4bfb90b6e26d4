//! Data models for contributor statistics.
//!
//! This module contains the wire type returned by the GitHub contributors
//! endpoint and the structures written to `contributors.json`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Timestamp format of the `updated` field (second precision, literal `Z`).
pub const UPDATED_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// One entry of a `GET /repos/{owner}/{repo}/contributors` response.
///
/// GitHub sends many more fields per user; only these two are read.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GitHubContributor {
    pub login: String,
    pub contributions: u64,
}

/// Total contribution count for one login across every source repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributorTotal {
    pub login: String,
    pub contributions: u64,
}

impl ContributorTotal {
    pub fn new(login: impl Into<String>, contributions: u64) -> Self {
        Self {
            login: login.into(),
            contributions,
        }
    }
}

/// The document persisted as `contributors.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributorsFile {
    /// UTC time of the run, formatted with [`UPDATED_FORMAT`].
    pub updated: String,
    /// Contributors in the order produced by the aggregator.
    pub contributors: Vec<ContributorTotal>,
}

impl ContributorsFile {
    /// Build the document stamped with the given time.
    pub fn new(updated: DateTime<Utc>, contributors: Vec<ContributorTotal>) -> Self {
        Self {
            updated: updated.format(UPDATED_FORMAT).to_string(),
            contributors,
        }
    }

    /// Build the document stamped with the current time.
    pub fn now(contributors: Vec<ContributorTotal>) -> Self {
        Self::new(Utc::now(), contributors)
    }
}
