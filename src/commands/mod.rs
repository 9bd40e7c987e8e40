//! Implementation of repoclean subcommands.
//!
//! `mod.rs` is a thin dispatcher; command logic lives in dedicated modules
//! (`prune`, `list`, `vercmp`).

use crate::cli::{Cli, Commands};
use crate::error::Result;
use crate::prune::config::Prune;

pub(crate) mod list;
pub(crate) mod prune;
pub(crate) mod vercmp;

pub use list::{list, render_listing};
pub use prune::prune;
pub use vercmp::{vercmp, vercmp_output};


/// Execute commands based on the parsed CLI arguments.
pub fn execute(cli: &Cli) -> Result<()> {
    let quiet = cli.global_opts().quiet();
    let verbose = if quiet {
        0
    } else {
        cli.global_opts().verbose()
    };
    let repo = cli.global_opts().repo();

    match cli.command() {
        Commands::Prune {
            keep,
            dry_run,
            on_invalid,
            leave_signatures,
        } => prune(
            &Prune::builder()
                .root(repo)
                .keep(*keep)
                .dry_run(*dry_run)
                .on_invalid(*on_invalid)
                .signatures(!*leave_signatures)
                .verbose(verbose)
                .quiet(quiet)
                .build(),
        ),
        Commands::List { keep, on_invalid } => list(repo, *keep, *on_invalid, verbose, quiet),
        Commands::Vercmp { first, second } => vercmp(first, second),
    }
}
