//! Retention pruning for package repositories.
//!
//! For every `(name, arch)` group the `keep` newest builds stay and the rest
//! are handed to a [`Deleter`].
//!
//! # Features
//!
//! - Version-aware retention: "newest" follows pacman's version ordering
//! - Per-architecture groups: an architecture with fewer releases never
//!   loses its last build to another architecture's newer ones
//! - Failure isolation: a file that cannot be removed does not stop the
//!   rest of the run
//! - Signature cleanup: detached `.sig` files go together with their package
//! - Dry run: report what would be removed without touching anything
//!
//! # Example
//!
//! ```no_run
//! use repoclean::prune::config::Prune;
//!
//! let config = Prune::builder()
//!     .root("/srv/repo/x86_64")
//!     .keep(2)
//!     .dry_run(true)
//!     .build();
//!
//! let summary = config.perform_prune()?;
//! println!("Would free {} bytes", summary.report.bytes_freed());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod config;
mod deleter;
mod size;
#[cfg(test)]
mod tests;

pub use deleter::{Deleter, DryRunDeleter, FsDeleter};
pub use size::format_size;

use crate::artifact::Artifact;
use crate::error::{RepoError, Result};
use crate::repository::Repository;

/// Outcome of one deletion attempt.
#[derive(Debug)]
pub enum DeletionOutcome {
    /// The file (and its signature) was removed, or would be in a dry run
    Removed {
        /// Bytes reclaimed
        bytes: u64,
    },
    /// The deleter failed; with [`FsDeleter`] the package is still on disk
    Failed(RepoError),
}

/// One artifact selected for removal and what happened to it.
#[derive(Debug)]
pub struct DeletionRecord {
    pub artifact: Artifact,
    pub outcome: DeletionOutcome,
}

impl DeletionRecord {
    pub fn is_failure(&self) -> bool {
        matches!(self.outcome, DeletionOutcome::Failed(_))
    }
}

/// Everything a prune pass did.
#[derive(Debug, Default)]
pub struct PruneReport {
    /// Number of groups visited
    pub groups: usize,
    /// Number of artifacts kept
    pub kept: usize,
    /// Every deletion attempt, in the order it was made
    pub records: Vec<DeletionRecord>,
}

impl PruneReport {
    /// Records that were removed
    pub fn removed(&self) -> impl Iterator<Item = &DeletionRecord> + '_ {
        self.records.iter().filter(|r| !r.is_failure())
    }

    /// Records that failed
    pub fn failures(&self) -> impl Iterator<Item = &DeletionRecord> + '_ {
        self.records.iter().filter(|r| r.is_failure())
    }

    pub fn removed_count(&self) -> usize {
        self.removed().count()
    }

    pub fn failure_count(&self) -> usize {
        self.failures().count()
    }

    pub fn has_failures(&self) -> bool {
        self.records.iter().any(DeletionRecord::is_failure)
    }

    /// Total bytes reclaimed by successful deletions
    pub fn bytes_freed(&self) -> u64 {
        self.records
            .iter()
            .map(|r| match r.outcome {
                DeletionOutcome::Removed { bytes } => bytes,
                DeletionOutcome::Failed(_) => 0,
            })
            .sum()
    }
}

/// Remove every build beyond the `keep` newest in each group.
///
/// Groups are visited in key order and victims within a group newest
/// first, so the deleter sees a deterministic sequence. `keep == 0` removes
/// every artifact in the repository. A failed deletion is recorded and the
/// run continues.
///
/// # Errors
///
/// Returns [`RepoError::NotFinalized`] if `repository` has unsorted groups.
pub fn prune<D: Deleter + ?Sized>(
    repository: &Repository,
    keep: usize,
    deleter: &mut D,
) -> Result<PruneReport> {
    if !repository.is_finalized() {
        return Err(RepoError::NotFinalized);
    }

    let mut report = PruneReport::default();

    for group in repository.groups() {
        report.groups += 1;
        report.kept += group.retained(keep).len();

        for artifact in group.superseded(keep) {
            let outcome = match deleter.delete(artifact) {
                Ok(bytes) => DeletionOutcome::Removed { bytes },
                Err(err) => DeletionOutcome::Failed(err),
            };
            report.records.push(DeletionRecord {
                artifact: artifact.clone(),
                outcome,
            });
        }
    }

    Ok(report)
}
