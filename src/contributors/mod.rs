//! Contributor statistics for the site.
//!
//! Fetches the contributor lists of the VWAD repositories, merges them into
//! one ranking and writes it as `contributors.json`.

pub mod aggregator;
pub mod client;
pub mod update;
pub mod writer;

#[cfg(test)]
mod testing;

pub use aggregator::*;
pub use client::{fetch_contributors, ContributorClient};
pub use update::{missing_token_warning, update};
pub use writer::{render_json, write_json};
