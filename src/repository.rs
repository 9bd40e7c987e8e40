//! In-memory model of a package repository.
//!
//! Package files are grouped by `(name, arch)`. Each group is sorted newest
//! first once [`Repository::finalize`] runs; group order is only meaningful
//! after that point.
//!
//! ```
//! use repoclean::artifact::Artifact;
//! use repoclean::repository::Repository;
//!
//! let mut repo = Repository::new();
//! repo.add(Artifact::parse("foo-1.0-1-x86_64.pkg.tar.xz")?);
//! repo.add(Artifact::parse("foo-1.1-1-x86_64.pkg.tar.xz")?);
//! repo.finalize();
//!
//! let group = repo.groups().next().unwrap();
//! assert_eq!(group.newest().version, "1.1-1");
//! # Ok::<(), repoclean::error::RepoError>(())
//! ```

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use clap::ValueEnum;

use crate::artifact::{Artifact, GroupKey};
use crate::discovery::discover_package_files;
use crate::error::{RepoError, Result};
use crate::logging::Logger;
use crate::version::vercmp;


/// All builds of one package for one architecture.
#[derive(Debug, Clone)]
pub struct ArtifactGroup {
    key: GroupKey,
    members: Vec<Artifact>,
}

impl ArtifactGroup {
    fn new(first: Artifact) -> Self {
        Self {
            key: first.key(),
            members: vec![first],
        }
    }

    /// The `(name, arch)` key shared by every member
    pub fn key(&self) -> &GroupKey {
        &self.key
    }

    /// Members, newest first once the repository is finalized
    pub fn members(&self) -> &[Artifact] {
        &self.members
    }

    /// The newest build
    pub fn newest(&self) -> &Artifact {
        &self.members[0]
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// The `keep` newest members.
    pub fn retained(&self, keep: usize) -> &[Artifact] {
        &self.members[..keep.min(self.members.len())]
    }

    /// Every member beyond the `keep` newest.
    pub fn superseded(&self, keep: usize) -> &[Artifact] {
        &self.members[keep.min(self.members.len())..]
    }

    /// Stable insertion sort, newest first.
    ///
    /// `vercmp` is not transitive for versions built from separators
    /// (`1 <= .a <= .` but `1 > .`), which `slice::sort_by` may answer with
    /// a panic. Insertion only ever compares neighbours, so it always
    /// terminates and leaves every adjacent pair non-increasing. Equal
    /// versions keep discovery order.
    fn sort(&mut self) {
        for i in 1..self.members.len() {
            let mut j = i;
            while j > 0
                && vercmp(&self.members[j].version, &self.members[j - 1].version)
                    == Ordering::Greater
            {
                self.members.swap(j - 1, j);
                j -= 1;
            }
        }
    }
}

/// Every package group found under a repository root.
#[derive(Debug, Default, Clone)]
pub struct Repository {
    groups: BTreeMap<GroupKey, ArtifactGroup>,
    finalized: bool,
}

impl Repository {
    /// Create an empty repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an artifact into its `(name, arch)` group.
    ///
    /// Adding invalidates any previous [`finalize`](Self::finalize).
    pub fn add(&mut self, artifact: Artifact) {
        self.finalized = false;
        match self.groups.get_mut(&artifact.key()) {
            Some(group) => group.members.push(artifact),
            None => {
                let group = ArtifactGroup::new(artifact);
                self.groups.insert(group.key.clone(), group);
            }
        }
    }

    /// Sort every group newest first. Safe to call more than once.
    pub fn finalize(&mut self) {
        if self.finalized {
            return;
        }
        for group in self.groups.values_mut() {
            group.sort();
        }
        self.finalized = true;
    }

    /// Whether groups are sorted and no artifact was added since.
    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    /// Iterate over groups in key order. Call again to restart.
    pub fn groups(&self) -> impl Iterator<Item = &ArtifactGroup> + '_ {
        self.groups.values()
    }

    /// Look up one group
    pub fn group(&self, key: &GroupKey) -> Option<&ArtifactGroup> {
        self.groups.get(key)
    }

    /// Number of groups
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Total number of artifacts across all groups
    pub fn artifact_count(&self) -> usize {
        self.groups.values().map(ArtifactGroup::len).sum()
    }
}

/// What to do with a package file whose name cannot be parsed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum InvalidNamePolicy {
    /// Report the file and leave it out of every group
    #[default]
    Skip,
    /// Stop the run with the parse error
    Abort,
}

/// A package file left out of the repository because its name did not
/// parse.
#[derive(Debug)]
pub struct Rejection {
    pub path: PathBuf,
    pub error: RepoError,
}

/// Result of scanning a repository directory.
#[derive(Debug)]
pub struct Scan {
    /// Finalized repository
    pub repository: Repository,
    /// Files that were skipped under [`InvalidNamePolicy::Skip`]
    pub rejected: Vec<Rejection>,
}

/// Walk `root`, parse every package file and build a finalized repository.
///
/// # Errors
///
/// - [`RepoError::RootNotFound`] / [`RepoError::TraversalError`] if the
///   directory cannot be walked
/// - the parse error of the first bad file under
///   [`InvalidNamePolicy::Abort`]
pub fn scan(root: &Path, policy: InvalidNamePolicy, log: &Logger) -> Result<Scan> {
    let mut repository = Repository::new();
    let mut rejected = Vec::new();

    log.verbose(1, format!("Scanning {}", root.display()));

    for path in discover_package_files(root)? {
        let path = path?;
        match Artifact::from_path(&path) {
            Ok(artifact) => {
                log.verbose(3, format!("  Found {artifact}"));
                repository.add(artifact);
            }
            Err(error) if policy == InvalidNamePolicy::Skip => {
                log.warn(format!("Skipping {}: {error}", path.display()));
                rejected.push(Rejection { path, error });
            }
            Err(error) => return Err(error),
        }
    }

    repository.finalize();

    log.verbose(
        1,
        format!(
            "Found {} package file(s) in {} group(s)",
            repository.artifact_count(),
            repository.len()
        ),
    );

    Ok(Scan {
        repository,
        rejected,
    })
}
