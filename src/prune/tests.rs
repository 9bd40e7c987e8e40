use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use proptest::prelude::*;
use tempfile::TempDir;

use super::config::Prune;
use super::*;
use crate::repository::InvalidNamePolicy;

// Helper functions

fn repository(file_names: &[&str]) -> Repository {
    let mut repo = Repository::new();
    for name in file_names {
        repo.add(Artifact::parse(name).unwrap());
    }
    repo.finalize();
    repo
}

/// Deleter that records what it was asked to delete and fails for chosen
/// file names.
#[derive(Default)]
struct Recorder {
    seen: Vec<String>,
    fail_on: Vec<String>,
}

impl Deleter for Recorder {
    fn delete(&mut self, artifact: &Artifact) -> Result<u64> {
        let name = artifact.file_name();
        self.seen.push(name.clone());
        if self.fail_on.contains(&name) {
            return Err(RepoError::DeletionError {
                path: artifact.path.clone(),
                source: io::Error::new(io::ErrorKind::PermissionDenied, "locked"),
            });
        }
        Ok(1)
    }
}

fn write_repo(dir: &Path, file_names: &[&str]) {
    for name in file_names {
        let path = dir.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, vec![b'x'; 10]).unwrap();
    }
}

fn remaining(dir: &Path) -> Vec<PathBuf> {
    let mut names: Vec<_> = fs::read_dir(dir)
        .unwrap()
        .map(|e| PathBuf::from(e.unwrap().file_name()))
        .collect();
    names.sort();
    names
}

// Selection tests

#[test]
fn test_keep_one_across_architectures() {
    let repo = repository(&[
        "foo-1.0-1-x86_64.pkg.tar.xz",
        "foo-1.1-1-x86_64.pkg.tar.xz",
        "foo-1.0-1-any.pkg.tar.xz",
    ]);

    let mut recorder = Recorder::default();
    let report = prune(&repo, 1, &mut recorder).unwrap();

    assert_eq!(recorder.seen, vec!["foo-1.0-1-x86_64.pkg.tar.xz"]);
    assert_eq!(report.groups, 2);
    assert_eq!(report.kept, 2);
    assert_eq!(report.removed_count(), 1);
    assert!(!report.has_failures());
}

#[test]
fn test_keep_zero_deletes_sole_member() {
    let repo = repository(&["foo-1.0-1-any.pkg.tar.xz"]);

    let mut recorder = Recorder::default();
    let report = prune(&repo, 0, &mut recorder).unwrap();

    assert_eq!(recorder.seen, vec!["foo-1.0-1-any.pkg.tar.xz"]);
    assert_eq!(report.kept, 0);
}

#[test]
fn test_keep_larger_than_group() {
    let repo = repository(&["foo-1.0-1-any.pkg.tar.xz", "foo-1.1-1-any.pkg.tar.xz"]);

    let mut recorder = Recorder::default();
    let report = prune(&repo, 5, &mut recorder).unwrap();

    assert!(recorder.seen.is_empty());
    assert!(report.records.is_empty());
    assert_eq!(report.kept, 2);
}

#[test]
fn test_deletion_order_is_deterministic() {
    let repo = repository(&[
        "zlib-1.3-1-x86_64.pkg.tar.zst",
        "bash-5.2-1-x86_64.pkg.tar.zst",
        "zlib-1.2-1-x86_64.pkg.tar.zst",
        "bash-5.1-1-x86_64.pkg.tar.zst",
        "zlib-1.1-1-x86_64.pkg.tar.zst",
        "bash-5.0-1-x86_64.pkg.tar.zst",
        "bash-5.2-2-x86_64.pkg.tar.zst",
    ]);

    let mut recorder = Recorder::default();
    prune(&repo, 1, &mut recorder).unwrap();

    assert_eq!(
        recorder.seen,
        vec![
            "bash-5.2-1-x86_64.pkg.tar.zst",
            "bash-5.1-1-x86_64.pkg.tar.zst",
            "bash-5.0-1-x86_64.pkg.tar.zst",
            "zlib-1.2-1-x86_64.pkg.tar.zst",
            "zlib-1.1-1-x86_64.pkg.tar.zst",
        ]
    );
}

#[test]
fn test_failures_do_not_stop_other_deletions() {
    let repo = repository(&[
        "foo-1-1-any.pkg.tar.xz",
        "foo-2-1-any.pkg.tar.xz",
        "foo-3-1-any.pkg.tar.xz",
        "bar-1-1-any.pkg.tar.xz",
        "bar-2-1-any.pkg.tar.xz",
    ]);

    let mut recorder = Recorder {
        fail_on: vec!["bar-1-1-any.pkg.tar.xz".to_string()],
        ..Recorder::default()
    };
    let report = prune(&repo, 1, &mut recorder).unwrap();

    assert_eq!(recorder.seen.len(), 3);
    assert_eq!(report.failure_count(), 1);
    assert_eq!(report.removed_count(), 2);
    assert_eq!(report.bytes_freed(), 2);

    let failed = report.failures().next().unwrap();
    assert_eq!(failed.artifact.name, "bar");
    assert!(matches!(
        failed.outcome,
        DeletionOutcome::Failed(RepoError::DeletionError { .. })
    ));
}

#[test]
fn test_prune_requires_finalized_repository() {
    let mut repo = Repository::new();
    repo.add(Artifact::parse("foo-1.0-1-any.pkg.tar.xz").unwrap());

    let mut recorder = Recorder::default();
    let result = prune(&repo, 1, &mut recorder);
    assert!(matches!(result, Err(RepoError::NotFinalized)));
    assert!(recorder.seen.is_empty());
}

#[test]
fn test_closure_deleter() {
    let repo = repository(&["foo-1-1-any.pkg.tar.xz", "foo-2-1-any.pkg.tar.xz"]);

    let mut deleted = Vec::new();
    let report = prune(&repo, 1, &mut |artifact: &Artifact| -> Result<u64> {
        deleted.push(artifact.version.clone());
        Ok(42)
    })
    .unwrap();

    assert_eq!(deleted, vec!["1-1"]);
    assert_eq!(report.bytes_freed(), 42);
}

proptest! {
    #[test]
    fn test_retention_invariant(
        group_sizes in prop::collection::vec(1usize..8, 1..6),
        keep in 0usize..10,
    ) {
        let mut repo = Repository::new();
        for (group, size) in group_sizes.iter().enumerate() {
            for release in 1..=*size {
                repo.add(Artifact::parse(&format!("pkg{group}-1.0-{release}-any.pkg.tar.xz")).unwrap());
            }
        }
        repo.finalize();

        let mut recorder = Recorder::default();
        let report = prune(&repo, keep, &mut recorder).unwrap();

        let expected: usize = group_sizes.iter().map(|size| size.saturating_sub(keep)).sum();
        prop_assert_eq!(report.records.len(), expected);
        prop_assert_eq!(report.kept + report.records.len(), repo.artifact_count());

        // The `keep` newest releases (highest pkgrel) never appear.
        for record in &report.records {
            let group: usize = record.artifact.name[3..].parse().unwrap();
            let release: usize = record.artifact.version[4..].parse().unwrap();
            prop_assert!(release + keep <= group_sizes[group]);
        }
    }
}

// End-to-end tests against a temporary directory

#[test]
fn test_perform_prune_removes_superseded_files() {
    let temp_dir = TempDir::new().unwrap();
    write_repo(
        temp_dir.path(),
        &[
            "foo-1.0-1-x86_64.pkg.tar.xz",
            "foo-1.0-1-x86_64.pkg.tar.xz.sig",
            "foo-1.1-1-x86_64.pkg.tar.xz",
            "foo-1.0-1-any.pkg.tar.xz",
            "bad.pkg.tar.xz",
        ],
    );

    let summary = Prune::builder()
        .root(temp_dir.path())
        .keep(1)
        .quiet(true)
        .build()
        .perform_prune()
        .unwrap();

    assert_eq!(summary.report.removed_count(), 1);
    assert_eq!(summary.report.bytes_freed(), 20);
    assert_eq!(summary.rejected.len(), 1);
    assert_eq!(
        remaining(temp_dir.path()),
        vec![
            PathBuf::from("bad.pkg.tar.xz"),
            PathBuf::from("foo-1.0-1-any.pkg.tar.xz"),
            PathBuf::from("foo-1.1-1-x86_64.pkg.tar.xz"),
        ]
    );
}

#[test]
fn test_perform_prune_dry_run_keeps_everything() {
    let temp_dir = TempDir::new().unwrap();
    let files = ["foo-1.0-1-any.pkg.tar.zst", "foo-1.1-1-any.pkg.tar.zst"];
    write_repo(temp_dir.path(), &files);

    let summary = Prune::builder()
        .root(temp_dir.path())
        .dry_run(true)
        .quiet(true)
        .build()
        .perform_prune()
        .unwrap();

    assert!(summary.dry_run);
    assert_eq!(summary.report.removed_count(), 1);
    assert_eq!(remaining(temp_dir.path()).len(), 2);
}

#[test]
fn test_perform_prune_abort_policy() {
    let temp_dir = TempDir::new().unwrap();
    write_repo(
        temp_dir.path(),
        &[
            "foo-1.0-1-any.pkg.tar.zst",
            "foo-1.1-1-any.pkg.tar.zst",
            "foo-1.2-1-ppc64.pkg.tar.zst",
        ],
    );

    let result = Prune::builder()
        .root(temp_dir.path())
        .on_invalid(InvalidNamePolicy::Abort)
        .quiet(true)
        .build()
        .perform_prune();

    assert!(matches!(result, Err(RepoError::UnknownArchitecture { .. })));
    // Nothing is deleted when the scan aborts
    assert_eq!(remaining(temp_dir.path()).len(), 3);
}

#[test]
fn test_perform_prune_missing_root() {
    let temp_dir = TempDir::new().unwrap();
    let result = Prune::builder()
        .root(temp_dir.path().join("missing"))
        .quiet(true)
        .build()
        .perform_prune();

    assert!(matches!(result, Err(RepoError::RootNotFound(_))));
}

#[test]
fn test_prune_config_builder() {
    let config = Prune::builder().build();
    assert_eq!(config.root(), Path::new(config::DEFAULT_REPO_DIR));
    assert_eq!(config.keep(), config::DEFAULT_KEEP);
    assert!(!config.dry_run());
    assert!(config.signatures());
    assert_eq!(config.on_invalid(), InvalidNamePolicy::Skip);

    let config = Prune::builder()
        .root("/srv/repo")
        .keep(3)
        .dry_run(true)
        .signatures(false)
        .on_invalid(InvalidNamePolicy::Abort)
        .verbose(2)
        .build();
    assert_eq!(config.root(), Path::new("/srv/repo"));
    assert_eq!(config.keep(), 3);
    assert!(config.dry_run());
    assert!(!config.signatures());
    assert_eq!(config.on_invalid(), InvalidNamePolicy::Abort);
    assert_eq!(config.verbose(), 2);
}
