//! Full refresh of the contributors file.

use crate::config::FetchConfig;
use crate::contributors::client::fetch_contributors;
use crate::contributors::writer::write_json;
use crate::models::ContributorsFile;
use anyhow::Result;
use std::path::Path;
use tracing::info;

/// Printed when no token is configured.
pub const MISSING_TOKEN_WARNING: &str =
    "Warning: GITHUB_TOKEN not set. Using unauthenticated requests.";

/// The warning to show for `config`, if any.
pub fn missing_token_warning(config: &FetchConfig) -> Option<&'static str> {
    match config.token {
        Some(_) => None,
        None => Some(MISSING_TOKEN_WARNING),
    }
}

/// Fetch every source, then write `output`.
///
/// The file is only touched once all fetches succeeded; on error neither
/// the file nor its parent directories are created or changed.
pub async fn update(config: &FetchConfig, output: &Path) -> Result<ContributorsFile> {
    if let Some(warning) = missing_token_warning(config) {
        eprintln!("{}", warning);
    }

    let contributors = fetch_contributors(config).await?;
    info!("{} contributors after merging", contributors.len());

    write_json(output, contributors)
}
