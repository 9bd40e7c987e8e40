use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::artifact::PackageFormat;
use crate::error::{RepoError, Result};

/// Discovers package files below the repository root.
///
/// The walk is recursive and sorted by file name so that repeated runs over
/// an unchanged directory see files in the same order. Only regular files
/// ending in a package archive suffix (`.tar` plus any package compression,
/// `.pkg` optional) are yielded; directories, signatures, repository
/// databases and symbolic links (such as the `repo.db` link next to
/// `repo.db.tar.gz`) are skipped.
///
/// # Arguments
///
/// * `root` - The repository directory
///
/// # Returns
///
/// A lazy iterator of candidate paths. Each item is an error if the walk
/// fails part-way through.
///
/// # Errors
///
/// Returns [`RepoError::RootNotFound`] if `root` is not a directory.
pub(crate) fn discover_package_files(
    root: &Path,
) -> Result<impl Iterator<Item = Result<PathBuf>> + use<>> {
    if !root.is_dir() {
        return Err(RepoError::RootNotFound(root.to_path_buf()));
    }

    let walker = WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter();

    let fallback = root.to_path_buf();
    Ok(walker.filter_map(move |entry| match entry {
        Ok(entry) => {
            if entry.file_type().is_file() && is_package_file(entry.path()) {
                Some(Ok(entry.into_path()))
            } else {
                None
            }
        }
        Err(err) => {
            let path = err
                .path()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| fallback.clone());
            Some(Err(RepoError::TraversalError {
                path,
                source: err.into(),
            }))
        }
    }))
}

/// Repository databases share the archive suffixes but are never packages.
const DATABASE_MARKERS: &[&str] = &[".db.tar", ".files.tar"];

/// Check whether a file looks like a package archive.
///
/// Any `.tar` archive in one of the package compressions qualifies, with or
/// without the `.pkg` marker, so that misnamed archives reach the parser and
/// get reported instead of vanishing from the run.
fn is_package_file(path: &Path) -> bool {
    let Some(name) = path.file_name().and_then(|name| name.to_str()) else {
        return false;
    };

    if DATABASE_MARKERS.iter().any(|marker| name.contains(marker)) {
        return false;
    }

    PackageFormat::ALL
        .into_iter()
        .any(|format| name.ends_with(format.archive_suffix()))
}
