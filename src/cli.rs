//! Command-line interface definitions for repoclean.
//!
//! This module defines the CLI structure using clap, including all subcommands
//! and their arguments. The main entry point is the [`Cli`] struct.
//!
//! # Example
//!
//! ```no_run
//! use clap::Parser;
//! use repoclean::cli::{Cli, Commands};
//!
//! let cli = Cli::parse();
//!
//! match cli.command() {
//!     Commands::Prune { keep, .. } => println!("Keeping {keep} build(s)"),
//!     _ => {}
//! }
//! ```

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use crate::error::{RepoError, Result};
use crate::prune::config::{DEFAULT_KEEP, DEFAULT_REPO_DIR};
use crate::repository::InvalidNamePolicy;

#[cfg(test)]
mod tests;

/// Main command-line interface for repoclean.
///
/// Global options select the repository and the output verbosity; the
/// subcommand picks the operation.
#[derive(Debug, Parser)]
#[command(
    name = "repoclean",
    bin_name = "repoclean",
    author,
    version,
    about = "Remove superseded package builds from a package repository",
    long_about = None,
    propagate_version = true
)]
pub struct Cli {
    #[command(flatten)]
    global_opts: GlobalOpts,

    #[command(subcommand)]
    command: Commands,
}

/// Options shared by every subcommand.
#[derive(Debug, Parser)]
pub struct GlobalOpts {
    /// Repository directory
    #[arg(
        long,
        global = true,
        default_value = DEFAULT_REPO_DIR,
        env = "REPOCLEAN_REPO"
    )]
    repo: PathBuf,

    /// Enable verbose output (use multiple times for more verbosity)
    #[arg(short, long, global = true, action = clap::ArgAction::Count, env = "REPOCLEAN_VERBOSE")]
    verbose: u8,

    /// Silence all output except for errors
    #[arg(
        short,
        long,
        global = true,
        conflicts_with = "verbose",
        env = "REPOCLEAN_QUIET"
    )]
    quiet: bool,
}

impl GlobalOpts {
    /// Get the repository directory
    pub fn repo(&self) -> &Path {
        &self.repo
    }

    /// Get the verbose level
    pub fn verbose(&self) -> u8 {
        self.verbose
    }

    /// Check if quiet mode is enabled
    pub fn quiet(&self) -> bool {
        self.quiet
    }
}

impl Cli {
    /// Get the global options
    pub fn global_opts(&self) -> &GlobalOpts {
        &self.global_opts
    }

    /// Get the command
    pub fn command(&self) -> &Commands {
        &self.command
    }

    /// Create a builder for programmatic construction
    pub fn builder() -> CliBuilder {
        CliBuilder::default()
    }
}

/// Builder for [`Cli`]
#[derive(Debug, Default)]
pub struct CliBuilder {
    repo: Option<PathBuf>,
    verbose: u8,
    quiet: bool,
    command: Option<Commands>,
}

impl CliBuilder {
    /// Set the repository directory
    pub fn repo(mut self, dir: impl Into<PathBuf>) -> Self {
        self.repo = Some(dir.into());
        self
    }

    /// Set the verbose level
    pub fn verbose(mut self, level: u8) -> Self {
        self.verbose = level;
        self
    }

    /// Enable quiet mode
    pub fn quiet(mut self, enabled: bool) -> Self {
        self.quiet = enabled;
        self
    }

    /// Set the command
    pub fn command(mut self, command: Commands) -> Self {
        self.command = Some(command);
        self
    }

    /// Build the Cli instance
    pub fn build(self) -> Result<Cli> {
        let command = self
            .command
            .ok_or_else(|| RepoError::ConfigError("Command is required".to_string()))?;

        Ok(Cli {
            global_opts: GlobalOpts {
                repo: self.repo.unwrap_or_else(|| PathBuf::from(DEFAULT_REPO_DIR)),
                verbose: self.verbose,
                quiet: self.quiet,
            },
            command,
        })
    }
}

/// Available repoclean subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Delete superseded package builds
    ///
    /// Groups every package file by package name and architecture, sorts
    /// each group by version and deletes everything beyond the newest
    /// `--keep` builds. Detached signatures are deleted with their package.
    ///
    /// Files whose names cannot be parsed are reported and left alone,
    /// unless `--on-invalid abort` is given. The command exits with an
    /// error if any deletion failed.
    Prune {
        /// Number of builds to keep per package and architecture (0 deletes
        /// everything)
        #[arg(long, default_value_t = DEFAULT_KEEP, env = "REPOCLEAN_KEEP")]
        keep: usize,

        /// Show what would be deleted without actually deleting
        #[arg(long, env = "REPOCLEAN_DRY_RUN")]
        dry_run: bool,

        /// What to do with package files whose names cannot be parsed
        #[arg(long, value_enum, default_value_t, env = "REPOCLEAN_ON_INVALID")]
        on_invalid: InvalidNamePolicy,

        /// Keep detached .sig files of deleted packages
        #[arg(long, env = "REPOCLEAN_LEAVE_SIGNATURES")]
        leave_signatures: bool,
    },

    /// List package groups and the builds a prune would keep
    ///
    /// Prints every package/architecture group newest first, marking the
    /// builds that `prune --keep` would remove.
    List {
        /// Number of builds to keep per package and architecture
        #[arg(long, default_value_t = DEFAULT_KEEP, env = "REPOCLEAN_KEEP")]
        keep: usize,

        /// What to do with package files whose names cannot be parsed
        #[arg(long, value_enum, default_value_t, env = "REPOCLEAN_ON_INVALID")]
        on_invalid: InvalidNamePolicy,
    },

    /// Compare two package versions
    ///
    /// Prints -1, 0 or 1 when the first version is older than, equal to or
    /// newer than the second.
    Vercmp {
        /// First version, e.g. 1:2.0-1
        #[arg(allow_hyphen_values = true)]
        first: String,

        /// Second version
        #[arg(allow_hyphen_values = true)]
        second: String,
    },
}
