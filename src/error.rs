//! Error type shared by every stage of the reviewer pipeline.
//!
//! Every failure is fatal: the run aborts and no partial report is printed.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReviewError {
    /// The target directory is not a git repository.
    #[error("not a git repository: {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: git2::Error,
    },

    /// HEAD or its first parent could not be resolved to a commit.
    #[error("cannot resolve {reference}: {source}")]
    Resolution {
        reference: &'static str,
        #[source]
        source: git2::Error,
    },

    /// Computing the tree diff between the parent and HEAD failed.
    #[error("cannot diff HEAD against its parent: {0}")]
    Diff(#[source] git2::Error),

    /// Blame failed for one of the changed paths.
    #[error("blame {}: {source}", .path.display())]
    Blame {
        path: PathBuf,
        #[source]
        source: git2::Error,
    },

    #[error("cannot write report: {0}")]
    Output(#[from] io::Error),
}
