//! # repoclean CLI
//!
//! Removes superseded package builds from a package repository.
//!
//! ## Commands
//!
//! - **prune**: delete every build beyond the newest `--keep` per package
//! - **list**: show which builds a prune would keep and drop
//! - **vercmp**: compare two package versions
//!
//! ## Environment Variables
//!
//! - `REPOCLEAN_REPO`: repository directory (default: /var/lib/pkgrepo)
//! - `REPOCLEAN_KEEP`: builds to keep per package (default: 1)
//! - `REPOCLEAN_VERBOSE`: enable verbose output
//! - `REPOCLEAN_QUIET`: silence all output except errors

use std::io::IsTerminal;

use clap::Parser;
use repoclean::cli::Cli;

fn main() -> miette::Result<()> {
    miette::set_panic_hook();

    // Plain output for logs and CI, unicode for terminals
    if std::io::stderr().is_terminal() {
        miette::set_hook(Box::new(|_| {
            Box::new(
                miette::GraphicalReportHandler::new()
                    .with_theme(miette::GraphicalTheme::unicode_nocolor())
                    .with_context_lines(3),
            )
        }))?;
    } else {
        miette::set_hook(Box::new(|_| {
            Box::new(
                miette::GraphicalReportHandler::new()
                    .with_theme(miette::GraphicalTheme::none())
                    .with_context_lines(0),
            )
        }))?;
    }

    let cli = Cli::parse();

    repoclean::commands::execute(&cli).map_err(Into::into)
}
