//! Contributor merging and ranking.
//!
//! Counts for the same login are summed across every source repository.

use crate::models::{ContributorTotal, GitHubContributor};
use std::cmp::Ordering;
use std::collections::HashMap;

/// Merge contributor batches into a sorted list of totals.
///
/// Entries for which `is_excluded` returns true are skipped.
pub fn aggregate<I, F>(batches: I, is_excluded: F) -> Vec<ContributorTotal>
where
    I: IntoIterator<Item = Vec<GitHubContributor>>,
    F: Fn(&str) -> bool,
{
    let mut totals: HashMap<String, u64> = HashMap::new();

    for batch in batches {
        for user in batch {
            if is_excluded(&user.login) {
                continue;
            }
            *totals.entry(user.login).or_default() += user.contributions;
        }
    }

    let mut ranked: Vec<ContributorTotal> = totals
        .into_iter()
        .map(|(login, contributions)| ContributorTotal::new(login, contributions))
        .collect();

    sort_contributors(&mut ranked);
    ranked
}

/// Sort by contributions (highest first), then login ignoring case.
///
/// Logins equal up to case fall back to a byte comparison so the order
/// never depends on hash iteration.
pub fn sort_contributors(contributors: &mut [ContributorTotal]) {
    contributors.sort_by(compare_contributors);
}

fn compare_contributors(a: &ContributorTotal, b: &ContributorTotal) -> Ordering {
    b.contributions
        .cmp(&a.contributions)
        .then_with(|| a.login.to_lowercase().cmp(&b.login.to_lowercase()))
        .then_with(|| a.login.cmp(&b.login))
}

/// Number of logins that appear in more than one batch.
pub fn shared_logins(batches: &[Vec<GitHubContributor>]) -> usize {
    let mut seen: HashMap<&str, usize> = HashMap::new();

    for batch in batches {
        for user in batch {
            *seen.entry(user.login.as_str()).or_default() += 1;
        }
    }

    seen.values().filter(|count| **count > 1).count()
}
