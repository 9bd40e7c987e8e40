//! Package file names.
//!
//! A package file is named `<name>-<pkgver>-<pkgrel>-<arch><format>`, for
//! example `python-requests-2.31.0-1-any.pkg.tar.zst`. The name may itself
//! contain hyphens, so the fields are taken from the right.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::Regex;

use crate::error::{RepoError, Result};

/// Target architecture of a package build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Arch {
    /// Architecture independent
    Any,
    /// 32-bit x86 (`i686`)
    X86,
    /// 64-bit x86
    X86_64,
    /// ARMv6 hard float
    Armv6h,
    /// ARMv7 hard float
    Armv7h,
    /// 64-bit ARM
    Aarch64,
}

impl Arch {
    /// Every recognized architecture.
    pub const ALL: [Arch; 6] = [
        Arch::Any,
        Arch::X86,
        Arch::X86_64,
        Arch::Armv6h,
        Arch::Armv7h,
        Arch::Aarch64,
    ];

    /// The literal used in package file names.
    pub fn as_str(self) -> &'static str {
        match self {
            Arch::Any => "any",
            Arch::X86 => "i686",
            Arch::X86_64 => "x86_64",
            Arch::Armv6h => "armv6h",
            Arch::Armv7h => "armv7h",
            Arch::Aarch64 => "aarch64",
        }
    }

    /// Look up a file name literal.
    pub fn from_literal(literal: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|arch| arch.as_str() == literal)
    }
}

impl fmt::Display for Arch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// On-disk format of a package file, identified by its suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PackageFormat {
    Tar,
    Xz,
    Zstd,
    Gzip,
    Bzip2,
    Lz4,
    Lrzip,
    Lzop,
    Compress,
}

impl PackageFormat {
    /// Every recognized format.
    pub const ALL: [PackageFormat; 9] = [
        PackageFormat::Tar,
        PackageFormat::Xz,
        PackageFormat::Zstd,
        PackageFormat::Gzip,
        PackageFormat::Bzip2,
        PackageFormat::Lz4,
        PackageFormat::Lrzip,
        PackageFormat::Lzop,
        PackageFormat::Compress,
    ];

    /// File name suffix, including the leading dot.
    pub fn suffix(self) -> &'static str {
        match self {
            PackageFormat::Tar => ".pkg.tar",
            PackageFormat::Xz => ".pkg.tar.xz",
            PackageFormat::Zstd => ".pkg.tar.zst",
            PackageFormat::Gzip => ".pkg.tar.gz",
            PackageFormat::Bzip2 => ".pkg.tar.bz2",
            PackageFormat::Lz4 => ".pkg.tar.lz4",
            PackageFormat::Lrzip => ".pkg.tar.lrz",
            PackageFormat::Lzop => ".pkg.tar.lzo",
            PackageFormat::Compress => ".pkg.tar.Z",
        }
    }

    /// The archive part of the suffix, without `.pkg` (`.tar.xz`).
    pub fn archive_suffix(self) -> &'static str {
        &self.suffix()[".pkg".len()..]
    }

    /// Look up an exact suffix.
    pub fn from_suffix(suffix: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|format| format.suffix() == suffix)
    }

    /// Find the format a file name ends with.
    pub fn detect(file_name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|format| file_name.ends_with(format.suffix()))
    }
}

/// Retention group key: builds of the same package for the same
/// architecture.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GroupKey {
    pub name: String,
    pub arch: Arch,
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.arch)
    }
}

/// A single package file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    /// Location on disk
    pub path: PathBuf,
    /// Package name
    pub name: String,
    /// `pkgver-pkgrel`, possibly with an epoch prefix
    pub version: String,
    /// Target architecture
    pub arch: Arch,
    /// File format
    pub format: PackageFormat,
}

impl Artifact {
    /// Parse a package file base name.
    ///
    /// The returned artifact's path is the base name itself; use
    /// [`Artifact::from_path`] for files found on disk.
    ///
    /// # Errors
    ///
    /// - [`RepoError::MalformedName`] if the name cannot supply a non-empty
    ///   name, version, release and architecture token
    /// - [`RepoError::UnknownArchitecture`] if the trailing token is not a
    ///   known `<arch><format>` combination
    pub fn parse(base_name: &str) -> Result<Self> {
        static PACKAGE_NAME_RE: OnceLock<Regex> = OnceLock::new();

        let re = PACKAGE_NAME_RE.get_or_init(|| {
            // Greedy name, then three hyphen-free fields: equivalent to
            // splitting on the last three hyphens.
            Regex::new(r"^(?P<name>.+)-(?P<pkgver>[^-]+)-(?P<pkgrel>[^-]+)-(?P<token>[^-]+)$")
                .expect("package name regex should compile")
        });

        let captures = re
            .captures(base_name)
            .ok_or_else(|| RepoError::MalformedName {
                name: base_name.to_string(),
            })?;

        let name = &captures["name"];
        if name.starts_with('-') || name.ends_with('-') || name.contains("--") {
            return Err(RepoError::MalformedName {
                name: base_name.to_string(),
            });
        }

        let token = &captures["token"];
        let (arch, format) = parse_token(token).ok_or_else(|| RepoError::UnknownArchitecture {
            name: base_name.to_string(),
            token: token.to_string(),
        })?;

        Ok(Self {
            path: PathBuf::from(base_name),
            name: name.to_string(),
            version: format!("{}-{}", &captures["pkgver"], &captures["pkgrel"]),
            arch,
            format,
        })
    }

    /// Parse the file name of `path`, keeping `path` as the artifact's
    /// location.
    pub fn from_path(path: &Path) -> Result<Self> {
        let base_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| RepoError::MalformedName {
                name: path.display().to_string(),
            })?;

        let mut artifact = Self::parse(base_name)?;
        artifact.path = path.to_path_buf();
        Ok(artifact)
    }

    /// The retention group this artifact belongs to.
    pub fn key(&self) -> GroupKey {
        GroupKey {
            name: self.name.clone(),
            arch: self.arch,
        }
    }

    /// The canonical file name, `name-version-arch` plus the format suffix.
    pub fn file_name(&self) -> String {
        format!("{self}{}", self.format.suffix())
    }
}

impl fmt::Display for Artifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.name, self.version, self.arch)
    }
}

/// Split `x86_64.pkg.tar.xz` into its architecture and format.
fn parse_token(token: &str) -> Option<(Arch, PackageFormat)> {
    let dot = token.find('.')?;
    let arch = Arch::from_literal(&token[..dot])?;
    let format = PackageFormat::from_suffix(&token[dot..])?;
    Some((arch, format))
}
