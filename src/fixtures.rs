//! Throwaway git repositories for tests.

use std::fs;
use std::path::Path;

use git2::{IndexEntry, IndexTime, Oid, Repository, Signature, Time};

pub fn create_test_repo() -> (tempfile::TempDir, Repository) {
    let dir = tempfile::tempdir().unwrap();
    let repo = Repository::init(dir.path()).unwrap();
    (dir, repo)
}

fn signature(email: &str, epoch: i64) -> Signature<'static> {
    let name = email.split('@').next().unwrap_or(email);
    Signature::new(name, email, &Time::new(epoch, 0)).unwrap()
}

/// Commit on HEAD with distinct author and committer emails. `files` are
/// written and staged, `removed` are deleted and unstaged.
pub fn commit_with(
    repo: &Repository,
    author: &str,
    committer: &str,
    files: &[(&str, &str)],
    removed: &[&str],
    message: &str,
) -> Oid {
    commit_onto(repo, author, committer, files, removed, &[], message)
}

/// Merge commit on HEAD: HEAD stays the first parent, `other` the second.
pub fn commit_merge(
    repo: &Repository,
    email: &str,
    other: Oid,
    files: &[(&str, &str)],
    message: &str,
) -> Oid {
    commit_onto(repo, email, email, files, &[], &[other], message)
}

/// Stage a submodule entry (gitlink) at `path` pointing to `target`.
pub fn stage_gitlink(repo: &Repository, path: &str, target: Oid) {
    let mut index = repo.index().unwrap();
    index
        .add(&IndexEntry {
            ctime: IndexTime::new(0, 0),
            mtime: IndexTime::new(0, 0),
            dev: 0,
            ino: 0,
            mode: 0o160000,
            uid: 0,
            gid: 0,
            file_size: 0,
            id: target,
            flags: 0,
            flags_extended: 0,
            path: path.as_bytes().to_vec(),
        })
        .unwrap();
    index.write().unwrap();
}

/// Replace the file at `path` with a symlink to `target` and stage it.
#[cfg(unix)]
pub fn stage_symlink(repo: &Repository, path: &str, target: &str) {
    let full_path = repo.workdir().unwrap().join(path);
    fs::remove_file(&full_path).unwrap();
    std::os::unix::fs::symlink(target, &full_path).unwrap();
    let mut index = repo.index().unwrap();
    index.add_path(Path::new(path)).unwrap();
    index.write().unwrap();
}

fn commit_onto(
    repo: &Repository,
    author: &str,
    committer: &str,
    files: &[(&str, &str)],
    removed: &[&str],
    other_parents: &[Oid],
    message: &str,
) -> Oid {
    let workdir = repo.workdir().unwrap().to_path_buf();
    let mut index = repo.index().unwrap();

    for (path, content) in files {
        let full_path = workdir.join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&full_path, content).unwrap();
        index.add_path(Path::new(path)).unwrap();
    }
    for path in removed {
        fs::remove_file(workdir.join(path)).unwrap();
        index.remove_path(Path::new(path)).unwrap();
    }

    index.write().unwrap();
    let tree_oid = index.write_tree().unwrap();
    let tree = repo.find_tree(tree_oid).unwrap();

    let parent = repo.head().ok().and_then(|h| h.peel_to_commit().ok());
    let others: Vec<git2::Commit> = other_parents
        .iter()
        .map(|oid| repo.find_commit(*oid).unwrap())
        .collect();
    let parents: Vec<&git2::Commit> = parent.iter().chain(others.iter()).collect();
    // Keep commit times strictly increasing along the chain.
    let epoch = parent
        .as_ref()
        .map_or(1_700_000_000, |c| c.time().seconds() + 60);

    repo.commit(
        Some("HEAD"),
        &signature(author, epoch),
        &signature(committer, epoch),
        message,
        &tree,
        &parents,
    )
    .unwrap()
}

/// Commit on HEAD where author and committer are the same person.
pub fn commit_as(
    repo: &Repository,
    email: &str,
    files: &[(&str, &str)],
    removed: &[&str],
    message: &str,
) -> Oid {
    commit_with(repo, email, email, files, removed, message)
}
