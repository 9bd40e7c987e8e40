//! Error types for repoclean.
//!
//! This module defines all error types used throughout repoclean, using
//! a combination of `thiserror` for ergonomic error definitions and `miette`
//! for rich diagnostic output.
//!
//! # Error Handling Strategy
//!
//! - All errors are variants of [`RepoError`]
//! - Parse errors ([`RepoError::MalformedName`],
//!   [`RepoError::UnknownArchitecture`]) are local to one file; the caller
//!   chooses whether they abort the run
//! - Traversal errors are fatal, deletion errors are collected per file
//! - Errors are automatically converted to `miette::Result` for CLI output
//!
//! # Example
//!
//! ```
//! use repoclean::artifact::Artifact;
//! use repoclean::error::RepoError;
//!
//! let err = Artifact::parse("bad.tar.xz").unwrap_err();
//! assert!(matches!(err, RepoError::MalformedName { .. }));
//! ```

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Error types that can occur in repoclean operations
#[derive(Error, Debug, Diagnostic)]
pub enum RepoError {
    /// A package file name cannot be split into name, version, release and
    /// architecture fields.
    ///
    /// Raised when the base name has too few hyphen-separated fields or one
    /// of them is empty. The file takes no part in any retention group.
    #[error("Malformed package file name '{name}'")]
    #[diagnostic(
        code(repoclean::parse::malformed_name),
        help("Package files must be named '<name>-<pkgver>-<pkgrel>-<arch>.pkg.tar[.<ext>]'.")
    )]
    MalformedName {
        /// The offending base name
        name: String,
    },

    /// The trailing `<arch>.<format>` token is not in the recognized table.
    ///
    /// Unknown tokens are never mapped to a fallback architecture, since
    /// merging unrelated architectures into one group would corrupt the
    /// retention decision.
    #[error("Unknown architecture '{token}' in package file name '{name}'")]
    #[diagnostic(
        code(repoclean::parse::unknown_architecture),
        help(
            "Recognized architectures are any, i686, x86_64, armv6h, armv7h and aarch64, \
             followed by a .pkg.tar format suffix."
        )
    )]
    UnknownArchitecture {
        /// The offending base name
        name: String,
        /// The architecture-and-format token that failed to match
        token: String,
    },

    /// The repository root does not exist or is not a directory.
    #[error("Repository directory '{0}' not found")]
    #[diagnostic(
        code(repoclean::scan::root_not_found),
        help("Pass an existing package repository directory with --repo.")
    )]
    RootNotFound(
        /// The root that was requested
        PathBuf,
    ),

    /// Walking the repository directory failed.
    ///
    /// Fatal: once the walk fails the set of artifacts can no longer be
    /// enumerated reliably, so nothing is pruned.
    #[error("Failed to traverse '{path}'")]
    #[diagnostic(
        code(repoclean::scan::traversal_error),
        help("Check the permissions of the repository directory and try again.")
    )]
    TraversalError {
        /// The path being visited when the walk failed
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// A package file selected for removal could not be deleted.
    ///
    /// Recorded per file; the remaining deletions still run.
    #[error("Failed to delete '{path}'")]
    #[diagnostic(
        code(repoclean::prune::deletion_error),
        help("Ensure you have write permissions for the repository directory.")
    )]
    DeletionError {
        /// The file that could not be removed
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Pruning was requested on a repository whose groups are not sorted.
    #[error("Repository must be finalized before pruning")]
    #[diagnostic(
        code(repoclean::prune::not_finalized),
        help("Call Repository::finalize() after the last add().")
    )]
    NotFinalized,

    /// One or more deletions failed during a prune run.
    #[error("{failed} package file(s) could not be deleted")]
    #[diagnostic(
        code(repoclean::prune::failed),
        help("See the messages above for the files that were left behind.")
    )]
    PruneFailed {
        /// Number of failed deletions
        failed: usize,
    },

    /// Invalid or incomplete configuration.
    #[error("Configuration error: {0}")]
    #[diagnostic(
        code(repoclean::config::error),
        help("Check the required configuration parameters.")
    )]
    ConfigError(
        /// Description of the configuration error
        String,
    ),
}

impl RepoError {
    /// Whether this error concerns a single file name rather than the run.
    pub fn is_parse_error(&self) -> bool {
        matches!(
            self,
            RepoError::MalformedName { .. } | RepoError::UnknownArchitecture { .. }
        )
    }
}

/// Type alias for Results in this crate
pub type Result<T> = std::result::Result<T, RepoError>;
