use std::collections::{HashMap, HashSet};
use std::path::Path;

use tracing::debug;

use crate::error::ReviewError;
use crate::git::{BlameSpan, ChangeEntry, ChangeKind, Identity};

/// Emails whose lines never count towards anyone's weight: the author of
/// the commit under review and its committer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExclusionSet {
    emails: HashSet<String>,
}

impl ExclusionSet {
    pub fn for_commit(author: &Identity, committer: &Identity) -> Self {
        let emails = HashSet::from([author.email.clone(), committer.email.clone()]);
        Self { emails }
    }

    pub fn contains(&self, email: &str) -> bool {
        self.emails.contains(email)
    }

    pub fn len(&self) -> usize {
        self.emails.len()
    }
}

/// A candidate reviewer and the number of lines credited to them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedReviewer {
    pub email: String,
    pub weight: u64,
}

impl RankedReviewer {
    /// `@` plus the part of the email before the first `@`, or the whole
    /// email when it has none.
    pub fn handle(&self) -> String {
        let local = self
            .email
            .split_once('@')
            .map_or(self.email.as_str(), |(local, _)| local);
        format!("@{local}")
    }
}

/// Per-email line counts. Excluded emails and zero weights never make it
/// into the map.
#[derive(Debug, Clone)]
pub struct ReviewerTally {
    excluded: ExclusionSet,
    weights: HashMap<String, u64>,
}

impl ReviewerTally {
    pub fn new(excluded: ExclusionSet) -> Self {
        Self {
            excluded,
            weights: HashMap::new(),
        }
    }

    /// Add `lines` to `email`, inserting it on first sight.
    pub fn credit(&mut self, email: &str, lines: u64) {
        if lines == 0 || self.excluded.contains(email) {
            return;
        }
        *self.weights.entry(email.to_string()).or_insert(0) += lines;
    }

    pub fn credit_blame(&mut self, spans: &[BlameSpan]) {
        for span in spans {
            self.credit(&span.email, span.lines as u64);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Heaviest first; equal weights fall back to email order so repeated
    /// runs print the same list.
    pub fn rank(&self) -> Vec<RankedReviewer> {
        let mut ranked: Vec<RankedReviewer> = self
            .weights
            .iter()
            .map(|(email, weight)| RankedReviewer {
                email: email.clone(),
                weight: *weight,
            })
            .collect();
        ranked.sort_by(|a, b| b.weight.cmp(&a.weight).then_with(|| a.email.cmp(&b.email)));
        ranked
    }
}

/// Credit the previous owners of every changed path. `blame` returns the
/// spans of a path as it was before the commit; the first failure aborts.
///
/// Added files have no previous owners. Copies are deliberately not
/// credited, while renames are.
pub fn aggregate<F>(
    entries: &[ChangeEntry],
    tally: &mut ReviewerTally,
    mut blame: F,
) -> Result<(), ReviewError>
where
    F: FnMut(&Path) -> Result<Vec<BlameSpan>, ReviewError>,
{
    for entry in entries {
        debug!(
            kind = entry.kind.label(),
            old = %entry.old_path.display(),
            new = %entry.new_path.display(),
            "diff entry"
        );
        match entry.kind {
            ChangeKind::Add | ChangeKind::Copy => {}
            ChangeKind::Delete | ChangeKind::Rename | ChangeKind::Modify => {
                let spans = blame(&entry.old_path)?;
                tally.credit_blame(&spans);
            }
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "analyzer_test.rs"]
mod tests;
