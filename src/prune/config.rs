use std::path::{Path, PathBuf};

use super::deleter::{Deleter, DryRunDeleter, FsDeleter};
use super::size::format_size;
use super::{DeletionOutcome, PruneReport, prune};
use crate::error::{RepoError, Result};
use crate::logging::Logger;
use crate::repository::{InvalidNamePolicy, Rejection, scan};

/// Default package repository location.
pub const DEFAULT_REPO_DIR: &str = "/var/lib/pkgrepo";

/// Default number of builds kept per package and architecture.
pub const DEFAULT_KEEP: usize = 1;

/// Prune configuration
#[derive(Debug, Clone)]
pub struct Prune {
    /// Repository directory to clean
    root: PathBuf,
    /// Builds kept per `(name, arch)` group
    keep: usize,
    /// Dry run mode - don't actually delete anything
    dry_run: bool,
    /// Remove detached `.sig` files together with their package
    signatures: bool,
    /// What to do with unparseable package file names
    on_invalid: InvalidNamePolicy,
    /// Verbosity level for output
    verbose: u8,
    /// Suppress informational logging when true
    quiet: bool,
}

impl Prune {
    /// Creates a new builder for [`Prune`]
    pub fn builder() -> PruneBuilder {
        PruneBuilder::default()
    }

    /// Get the repository directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Get the number of builds kept per group
    pub fn keep(&self) -> usize {
        self.keep
    }

    /// Check if dry run mode is enabled
    pub fn dry_run(&self) -> bool {
        self.dry_run
    }

    /// Check if signatures are removed with their package
    pub fn signatures(&self) -> bool {
        self.signatures
    }

    /// Get the invalid-name policy
    pub fn on_invalid(&self) -> InvalidNamePolicy {
        self.on_invalid
    }

    /// Get the verbosity level
    pub fn verbose(&self) -> u8 {
        self.verbose
    }

    /// Check if quiet mode is enabled
    pub fn quiet(&self) -> bool {
        self.quiet
    }

    /// Scan the repository and prune it.
    ///
    /// 1. Walks the repository and groups every package file by name and
    ///    architecture, applying the invalid-name policy
    /// 2. Sorts every group newest first
    /// 3. Removes everything beyond the `keep` newest builds of each group,
    ///    or only measures it in dry-run mode
    ///
    /// Deletion failures are reported in the returned summary rather than
    /// as an error, so a single locked file never blocks the rest of the
    /// cleanup.
    ///
    /// # Errors
    ///
    /// Fails if the repository cannot be walked, or on the first invalid
    /// file name under [`InvalidNamePolicy::Abort`].
    pub fn perform_prune(&self) -> Result<PruneSummary> {
        if self.dry_run() {
            self.perform_prune_with(&mut DryRunDeleter::new(self.signatures()))
        } else {
            self.perform_prune_with(&mut FsDeleter::new(self.signatures()))
        }
    }

    /// Same as [`perform_prune`](Self::perform_prune) with a custom deleter.
    pub fn perform_prune_with<D: Deleter + ?Sized>(
        &self,
        deleter: &mut D,
    ) -> Result<PruneSummary> {
        let log = Logger::new(self.verbose(), self.quiet());

        if log.level() > 0 {
            log.info(format!("Pruning {:?}", self.root()));
            log.info(format!("  Keeping {} build(s) per package", self.keep()));
            if self.dry_run() {
                log.info("  Dry run: nothing will be deleted");
            }
        }
        if self.keep() == 0 {
            log.warn("--keep 0 removes every package file in the repository");
        }

        let scan = scan(self.root(), self.on_invalid(), &log)?;
        let report = prune(&scan.repository, self.keep(), deleter)?;

        for record in &report.records {
            match &record.outcome {
                DeletionOutcome::Removed { bytes } => log.verbose(
                    2,
                    format!(
                        "  {} {} ({})",
                        if self.dry_run() { "Would remove" } else { "Removed" },
                        record.artifact.path.display(),
                        format_size(*bytes)
                    ),
                ),
                DeletionOutcome::Failed(err) => {
                    log.error(describe(err));
                }
            }
        }

        Ok(PruneSummary {
            dry_run: self.dry_run(),
            rejected: scan.rejected,
            report,
        })
    }
}

impl Default for Prune {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// Builder for [`Prune`]
#[derive(Debug, Default)]
pub struct PruneBuilder {
    root: Option<PathBuf>,
    keep: Option<usize>,
    dry_run: bool,
    leave_signatures: bool,
    on_invalid: InvalidNamePolicy,
    verbose: u8,
    quiet: bool,
}

impl PruneBuilder {
    /// Set the repository directory
    pub fn root(mut self, dir: impl Into<PathBuf>) -> Self {
        self.root = Some(dir.into());
        self
    }

    /// Set the number of builds kept per group
    pub fn keep(mut self, keep: usize) -> Self {
        self.keep = Some(keep);
        self
    }

    /// Enable dry run mode
    pub fn dry_run(mut self, enabled: bool) -> Self {
        self.dry_run = enabled;
        self
    }

    /// Remove detached signatures together with their package (default)
    pub fn signatures(mut self, enabled: bool) -> Self {
        self.leave_signatures = !enabled;
        self
    }

    /// Set the invalid-name policy
    pub fn on_invalid(mut self, policy: InvalidNamePolicy) -> Self {
        self.on_invalid = policy;
        self
    }

    /// Set the verbosity level
    pub fn verbose(mut self, level: u8) -> Self {
        self.verbose = level;
        self
    }

    /// Enable or disable quiet mode
    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    /// Build the [`Prune`]
    pub fn build(self) -> Prune {
        Prune {
            root: self.root.unwrap_or_else(|| PathBuf::from(DEFAULT_REPO_DIR)),
            keep: self.keep.unwrap_or(DEFAULT_KEEP),
            dry_run: self.dry_run,
            signatures: !self.leave_signatures,
            on_invalid: self.on_invalid,
            verbose: self.verbose,
            quiet: self.quiet,
        }
    }
}

/// Result of a prune run
#[derive(Debug)]
pub struct PruneSummary {
    /// Whether files were only measured
    pub dry_run: bool,
    /// Package files skipped because their names did not parse
    pub rejected: Vec<Rejection>,
    /// What the pruner did
    pub report: PruneReport,
}

impl PruneSummary {
    /// Print the end-of-run summary.
    pub fn log(&self, log: &Logger) {
        let verb = if self.dry_run { "Would delete" } else { "Deleted" };
        log.info(format!(
            "Kept {} package file(s) in {} group(s)",
            self.report.kept, self.report.groups
        ));
        log.info(format!(
            "{verb} {} package file(s), {}",
            self.report.removed_count(),
            format_size(self.report.bytes_freed())
        ));
        if self.report.has_failures() {
            log.info(format!(
                "Failed to delete {} package file(s)",
                self.report.failure_count()
            ));
        }
        if !self.rejected.is_empty() {
            log.info(format!(
                "Skipped {} file(s) with unrecognized names",
                self.rejected.len()
            ));
        }
    }
}

/// The error message followed by its cause, if any.
fn describe(err: &RepoError) -> String {
    match std::error::Error::source(err) {
        Some(source) => format!("{err}: {source}"),
        None => err.to_string(),
    }
}
