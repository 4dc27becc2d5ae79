//! Reviewer suggestions for the latest commit.
//!
//! Every path the HEAD commit deletes, renames or modifies is blamed as it
//! stood in the parent commit. Each blamed line credits its author, unless
//! that author wrote or committed HEAD itself. Candidates are ranked by the
//! number of lines credited to them.

pub mod analyzer;
mod report;

use std::path::Path;

use tracing::debug;

use crate::error::ReviewError;
use crate::git::GitRepo;
use analyzer::{ExclusionSet, RankedReviewer, ReviewerTally, aggregate};
use report::print_report;

/// How many handles the short-list shows.
pub const REVIEWERS_COUNT: usize = 4;

/// Run the whole pipeline on the repository at `path` and print the report.
pub fn run(path: &Path, find_renames: bool) -> Result<(), ReviewError> {
    let ranked = suggest(path, find_renames)?;
    print_report(&ranked, REVIEWERS_COUNT)?;
    Ok(())
}

/// Rank candidate reviewers for HEAD of the repository at `path`.
pub fn suggest(path: &Path, find_renames: bool) -> Result<Vec<RankedReviewer>, ReviewError> {
    let git_repo = GitRepo::open(path)?;
    debug!(
        branch = git_repo.branch().as_deref().unwrap_or("detached"),
        "current branch"
    );

    let pair = git_repo.head_commits()?;
    debug!(
        commit = %pair.head,
        author = %pair.author.name,
        email = %pair.author.email,
        "HEAD commit"
    );
    if pair.committer.email != pair.author.email {
        debug!(
            committer = %pair.committer.name,
            email = %pair.committer.email,
            "committed by someone else"
        );
    }

    let excluded = ExclusionSet::for_commit(&pair.author, &pair.committer);
    debug!(emails = excluded.len(), "excluded from reviewers");

    let entries = git_repo.changes(&pair, find_renames)?;
    debug!(count = entries.len(), "diff entries");

    let mut tally = ReviewerTally::new(excluded);
    aggregate(&entries, &mut tally, |rel_path| {
        git_repo.blame_at(rel_path, pair.parent)
    })?;
    if tally.is_empty() {
        debug!("no previous owners outside the commit's own author");
    }

    Ok(tally.rank())
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
