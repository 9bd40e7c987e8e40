//! Prune command.

use crate::error::{RepoError, Result};
use crate::logging::Logger;
use crate::prune::config::Prune;

/// Execute the prune command.
///
/// Prints the run summary and fails with [`RepoError::PruneFailed`] if any
/// deletion failed, so the process exits non-zero.
pub fn prune(config: &Prune) -> Result<()> {
    let log = Logger::new(config.verbose(), config.quiet());

    let summary = config.perform_prune()?;
    summary.log(&log);

    if summary.report.has_failures() {
        return Err(RepoError::PruneFailed {
            failed: summary.report.failure_count(),
        });
    }

    Ok(())
}
