//! VWAD site tools
//!
//! Support utilities for the OWASP Vulnerable Web Applications Directory
//! static site:
//!
//! - [`contributors`]: pulls contributor statistics from the GitHub API for
//!   the project's repositories and writes `data/contributors.json`.
//! - [`server`]: a local preview server that serves the site from disk and
//!   answers every not-found request with the site's own `404.html`.

pub mod cli;
pub mod config;
pub mod contributors;
pub mod error;
pub mod logging;
pub mod models;
pub mod server;
