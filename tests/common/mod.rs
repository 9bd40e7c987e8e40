#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use assert_fs::TempDir;

/// A throwaway package repository on disk.
pub struct TestRepo {
    dir: TempDir,
}

impl TestRepo {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    /// Create a repository holding one small file per name.
    pub fn with_packages(names: &[&str]) -> Self {
        let repo = Self::new();
        for name in names {
            repo.add_package(name);
        }
        repo
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn dir(&self) -> &TempDir {
        &self.dir
    }

    /// Write a package file; its size is the length of its name.
    pub fn add_package(&self, name: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, name.as_bytes()).unwrap();
        path
    }

    /// Write a detached signature next to a package file.
    pub fn add_signature(&self, name: &str) -> PathBuf {
        self.add_package(&format!("{name}.sig"))
    }

    pub fn exists(&self, name: &str) -> bool {
        self.dir.path().join(name).exists()
    }

    /// Names of every regular file in the repository, sorted.
    pub fn files(&self) -> Vec<String> {
        let mut names: Vec<String> = walkdir::WalkDir::new(self.dir.path())
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .map(|entry| {
                entry
                    .path()
                    .strip_prefix(self.dir.path())
                    .unwrap()
                    .to_string_lossy()
                    .into_owned()
            })
            .collect();
        names.sort();
        names
    }
}
