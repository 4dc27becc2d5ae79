//! Thin layer over `git2`: resolves HEAD and its parent, diffs their
//! trees and blames paths as of a given commit.

use std::path::{Path, PathBuf};

use git2::{
    BlameOptions, Delta, DiffFindOptions, DiffOptions, FileMode, Oid, Repository, Signature,
};
use tracing::debug;

use crate::error::ReviewError;

pub struct GitRepo {
    repo: Repository,
}

/// Name and email taken from commit metadata. The email is the key used
/// everywhere else; it is compared exactly, case included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub name: String,
    pub email: String,
}

impl Identity {
    fn from_signature(sig: &Signature<'_>) -> Self {
        Self {
            name: String::from_utf8_lossy(sig.name_bytes()).into_owned(),
            email: String::from_utf8_lossy(sig.email_bytes()).into_owned(),
        }
    }
}

/// The commit under review, its first parent and the HEAD identities.
pub struct CommitPair {
    pub head: Oid,
    pub parent: Oid,
    pub author: Identity,
    pub committer: Identity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Add,
    Delete,
    Copy,
    Rename,
    Modify,
}

impl ChangeKind {
    pub fn label(&self) -> &'static str {
        match self {
            ChangeKind::Add => "ADD",
            ChangeKind::Delete => "DELETE",
            ChangeKind::Copy => "COPY",
            ChangeKind::Rename => "RENAME",
            ChangeKind::Modify => "MODIFY",
        }
    }

    fn from_delta(delta: Delta) -> Option<Self> {
        match delta {
            Delta::Added => Some(ChangeKind::Add),
            Delta::Deleted => Some(ChangeKind::Delete),
            Delta::Modified | Delta::Typechange => Some(ChangeKind::Modify),
            Delta::Renamed => Some(ChangeKind::Rename),
            Delta::Copied => Some(ChangeKind::Copy),
            _ => None,
        }
    }
}

/// One path that differs between the parent tree and the HEAD tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeEntry {
    pub old_path: PathBuf,
    pub new_path: PathBuf,
    pub kind: ChangeKind,
}

/// A run of consecutive lines last touched by the same author.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlameSpan {
    pub email: String,
    pub lines: usize,
}

impl GitRepo {
    /// Open the repository rooted at `path`. Parent directories are not
    /// searched.
    pub fn open(path: &Path) -> Result<Self, ReviewError> {
        let repo = Repository::open(path).map_err(|source| ReviewError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(git_dir = %repo.path().display(), "opened repository");
        Ok(Self { repo })
    }

    /// Short name of the checked out branch, `None` when HEAD is detached
    /// or unborn.
    pub fn branch(&self) -> Option<String> {
        let head = self.repo.head().ok()?;
        if !head.is_branch() {
            return None;
        }
        head.shorthand().map(str::to_string)
    }

    /// Resolve HEAD and its first parent. Merge commits only look at
    /// parent 0.
    pub fn head_commits(&self) -> Result<CommitPair, ReviewError> {
        let head = self
            .repo
            .head()
            .and_then(|r| r.peel_to_commit())
            .map_err(|source| ReviewError::Resolution {
                reference: "HEAD",
                source,
            })?;
        let parent = head.parent(0).map_err(|source| ReviewError::Resolution {
            reference: "HEAD^",
            source,
        })?;

        Ok(CommitPair {
            head: head.id(),
            parent: parent.id(),
            author: Identity::from_signature(&head.author()),
            committer: Identity::from_signature(&head.committer()),
        })
    }

    /// Changed paths between the parent tree and the HEAD tree, in the
    /// order libgit2 reports them. Paths that were submodules in the parent
    /// have no lines to blame and are left out.
    pub fn changes(
        &self,
        pair: &CommitPair,
        find_renames: bool,
    ) -> Result<Vec<ChangeEntry>, ReviewError> {
        let old_tree = self
            .repo
            .find_commit(pair.parent)
            .and_then(|c| c.tree())
            .map_err(ReviewError::Diff)?;
        let new_tree = self
            .repo
            .find_commit(pair.head)
            .and_then(|c| c.tree())
            .map_err(ReviewError::Diff)?;

        let mut opts = DiffOptions::new();
        opts.include_typechange(true);
        let mut diff = self
            .repo
            .diff_tree_to_tree(Some(&old_tree), Some(&new_tree), Some(&mut opts))
            .map_err(ReviewError::Diff)?;

        if find_renames {
            let mut find = DiffFindOptions::new();
            find.renames(true).copies(true);
            diff.find_similar(Some(&mut find))
                .map_err(ReviewError::Diff)?;
        }

        let entries = diff
            .deltas()
            .filter_map(|delta| {
                let kind = ChangeKind::from_delta(delta.status())?;
                if matches!(delta.old_file().mode(), FileMode::Commit) {
                    debug!(path = ?delta.old_file().path(), "skipping submodule");
                    return None;
                }
                let old_path = delta.old_file().path().or(delta.new_file().path())?;
                let new_path = delta.new_file().path().unwrap_or(old_path);
                Some(ChangeEntry {
                    old_path: old_path.to_path_buf(),
                    new_path: new_path.to_path_buf(),
                    kind,
                })
            })
            .collect();
        Ok(entries)
    }

    /// Blame `rel_path` as it exists in `commit`. `rel_path` is relative to
    /// the repository root.
    pub fn blame_at(&self, rel_path: &Path, commit: Oid) -> Result<Vec<BlameSpan>, ReviewError> {
        let mut opts = BlameOptions::new();
        opts.newest_commit(commit);
        let blame = self
            .repo
            .blame_file(rel_path, Some(&mut opts))
            .map_err(|source| ReviewError::Blame {
                path: rel_path.to_path_buf(),
                source,
            })?;

        let spans = blame
            .iter()
            .map(|hunk| BlameSpan {
                email: Identity::from_signature(&hunk.final_signature()).email,
                lines: hunk.lines_in_hunk(),
            })
            .collect();
        Ok(spans)
    }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
