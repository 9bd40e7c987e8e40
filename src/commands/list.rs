//! List command.

use std::path::Path;

use crate::error::Result;
use crate::logging::Logger;
use crate::repository::{InvalidNamePolicy, Repository, scan};

/// Executes the list command: print every group newest first.
pub fn list(
    root: &Path,
    keep: usize,
    on_invalid: InvalidNamePolicy,
    verbose: u8,
    quiet: bool,
) -> Result<()> {
    let log = Logger::new(verbose, quiet);
    let scan = scan(root, on_invalid, &log)?;

    print!("{}", render_listing(&scan.repository, keep));

    if !scan.rejected.is_empty() {
        log.info(format!(
            "Skipped {} file(s) with unrecognized names",
            scan.rejected.len()
        ));
    }

    Ok(())
}

/// Render one block per group: the group key, then one line per build with
/// `keep` or `drop` in front.
pub fn render_listing(repository: &Repository, keep: usize) -> String {
    let mut out = String::new();

    for group in repository.groups() {
        out.push_str(&format!("{}\n", group.key()));
        for artifact in group.retained(keep) {
            out.push_str(&format!("  keep  {}\n", artifact.version));
        }
        for artifact in group.superseded(keep) {
            out.push_str(&format!("  drop  {}\n", artifact.version));
        }
    }

    out
}
