use std::fs;
use std::path::{Path, PathBuf};

use crate::artifact::Artifact;
use crate::error::{RepoError, Result};

/// Removes one package file selected by the pruner.
pub trait Deleter {
    /// Delete `artifact` and return the number of bytes reclaimed.
    fn delete(&mut self, artifact: &Artifact) -> Result<u64>;
}

impl<F> Deleter for F
where
    F: FnMut(&Artifact) -> Result<u64>,
{
    fn delete(&mut self, artifact: &Artifact) -> Result<u64> {
        self(artifact)
    }
}

/// Deletes package files from disk.
///
/// A detached signature `<file>.sig` next to the package is removed too
/// unless signatures are left in place. A missing signature is fine; a
/// signature that exists but cannot be removed fails the deletion. The
/// signature goes first: after a failed deletion the package is always
/// still on disk.
#[derive(Debug, Clone)]
pub struct FsDeleter {
    signatures: bool,
}

impl FsDeleter {
    pub fn new(signatures: bool) -> Self {
        Self { signatures }
    }
}

impl Default for FsDeleter {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Deleter for FsDeleter {
    fn delete(&mut self, artifact: &Artifact) -> Result<u64> {
        // Fail on a missing package before touching its signature.
        file_size(&artifact.path)?;

        let mut bytes = 0;
        if self.signatures {
            let signature = signature_path(&artifact.path);
            if fs::symlink_metadata(&signature).is_ok() {
                bytes += remove_file(&signature)?;
            }
        }

        Ok(bytes + remove_file(&artifact.path)?)
    }
}

/// Measures what [`FsDeleter`] would reclaim without removing anything.
#[derive(Debug, Clone)]
pub struct DryRunDeleter {
    signatures: bool,
}

impl DryRunDeleter {
    pub fn new(signatures: bool) -> Self {
        Self { signatures }
    }
}

impl Default for DryRunDeleter {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Deleter for DryRunDeleter {
    fn delete(&mut self, artifact: &Artifact) -> Result<u64> {
        let mut bytes = file_size(&artifact.path)?;

        if self.signatures {
            bytes += fs::metadata(signature_path(&artifact.path))
                .map(|m| m.len())
                .unwrap_or(0);
        }

        Ok(bytes)
    }
}

/// `foo.pkg.tar.zst` -> `foo.pkg.tar.zst.sig`
pub(crate) fn signature_path(path: &Path) -> PathBuf {
    let mut signature = path.as_os_str().to_owned();
    signature.push(".sig");
    PathBuf::from(signature)
}

fn file_size(path: &Path) -> Result<u64> {
    fs::symlink_metadata(path)
        .map(|m| m.len())
        .map_err(|source| RepoError::DeletionError {
            path: path.to_path_buf(),
            source,
        })
}

fn remove_file(path: &Path) -> Result<u64> {
    let size = file_size(path)?;
    fs::remove_file(path).map_err(|source| RepoError::DeletionError {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(size)
}
