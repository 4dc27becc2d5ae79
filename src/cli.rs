//! CLI argument definitions for the `git-reviewers` command.
//!
//! Installed on `PATH`, the binary also runs as `git reviewers`.
use std::path::PathBuf;

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "git-reviewers",
    version,
    about = "Suggest reviewers for the latest commit",
    long_about = "\
Suggest reviewers for the latest commit.

Every file that HEAD deletes, renames or modifies is blamed as it stood in
HEAD's first parent. Each line credits the author who last touched it,
except the author and committer of HEAD itself. Candidates are listed by
credited lines, heaviest first, followed by the top 4 as @handles.

Added and copied files credit nobody.

Examples:
  git-reviewers                   # repository in the current directory
  git-reviewers path/to/repo      # another repository
  git-reviewers --no-renames      # treat renames as delete + add
  git-reviewers -v                # trace each step on stderr"
)]
pub struct Cli {
    /// Repository root to inspect (default: current directory)
    pub path: Option<PathBuf>,

    /// Do not detect renames and copies; they show up as a delete plus an add
    #[arg(long)]
    pub no_renames: bool,

    /// Log each pipeline step to stderr
    #[arg(short, long)]
    pub verbose: bool,
}
