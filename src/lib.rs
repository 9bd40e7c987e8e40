//! # repoclean
//!
//! Removes superseded package builds from a pacman-style package repository,
//! keeping the newest N builds of every package and architecture.
//!
//! ## Overview
//!
//! Repository maintainers accumulate a new `.pkg.tar.*` file for every build
//! they publish. repoclean walks the repository directory, parses each
//! package file name into name, version and architecture, orders each
//! package's builds with pacman's version comparison and deletes everything
//! beyond the builds to keep.
//!
//! ## Key Features
//!
//! - **pacman version ordering**: epochs, pkgrel and pre-release suffixes
//!   (`1.0rc1 < 1.0 < 1.0.1`) compare exactly like `vercmp`
//! - **Per-architecture retention**: `x86_64` and `any` builds of the same
//!   package are pruned independently
//! - **Strict file names**: unknown architectures or malformed names are
//!   reported, never guessed
//! - **Failure isolation**: one undeletable file does not block the rest
//! - **Signature cleanup**: detached `.sig` files are removed with their
//!   package
//!
//! ## Architecture
//!
//! - [`version`]: pacman version comparison
//! - [`artifact`]: package file name parsing
//! - [`repository`]: grouping, sorting and repository scanning
//! - [`prune`]: retention policy and deleters
//! - [`cli`]: command-line interface definitions using clap
//! - [`commands`]: implementation of the subcommands
//! - [`error`]: error types with thiserror + miette
//!
//! ## Usage
//!
//! ```bash
//! # Keep the two newest builds of every package
//! repoclean --repo /srv/repo/x86_64 prune --keep 2
//!
//! # See what would go
//! repoclean --repo /srv/repo/x86_64 list --keep 2
//! repoclean --repo /srv/repo/x86_64 prune --keep 2 --dry-run -vv
//! ```
//!
//! ## Library Usage
//!
//! ```no_run
//! use repoclean::logging::Logger;
//! use repoclean::prune::{FsDeleter, prune};
//! use repoclean::repository::{InvalidNamePolicy, scan};
//!
//! let log = Logger::new(1, false);
//! let scan = scan("/srv/repo".as_ref(), InvalidNamePolicy::Skip, &log)?;
//! let report = prune(&scan.repository, 2, &mut FsDeleter::default())?;
//! println!("{} files removed", report.removed_count());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod artifact;
pub mod cli;
pub mod commands;
pub mod error;
pub mod logging;
pub mod prune;
pub mod repository;
pub mod version;

// Internal modules
mod discovery;
