//! Filesystem primitives shared by the mappers.
//!
//! Every listing is sorted byte-lexicographically by file name before use, so
//! run indices and copy order never depend on filesystem enumeration order.

use crate::prelude::*;
use itertools::Itertools;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// One directory entry, with the metadata the mappers branch on.
#[derive(Debug, Clone)]
pub struct Entry {
    pub name: String,
    pub path: PathBuf,
    pub is_dir: bool,
}

impl Entry {
    pub fn is_file(&self) -> bool {
        !self.is_dir
    }

    pub fn name_lower(&self) -> String {
        self.name.to_lowercase()
    }
}

/// List the immediate children of `dir`, sorted by name.
pub fn sorted_entries(dir: &Path) -> Result<Vec<Entry>> {
    let read_dir =
        fs::read_dir(dir).with_context(|| format!("Failed to read directory {}", dir.display()))?;

    let entries = read_dir
        .map(|entry| -> Result<Entry> {
            let entry = entry?;
            let path = entry.path();
            Ok(Entry {
                name: entry.file_name().to_string_lossy().into_owned(),
                is_dir: path.is_dir(),
                path,
            })
        })
        .collect::<Result<Vec<_>>>()?
        .into_iter()
        .sorted_by(|a, b| a.name.cmp(&b.name))
        .collect();

    Ok(entries)
}

/// Sorted subdirectories of `dir`; empty when `dir` does not exist.
pub fn sorted_subdirs(dir: &Path) -> Result<Vec<Entry>> {
    if !dir.exists() {
        return Ok(vec![]);
    }
    Ok(sorted_entries(dir)?
        .into_iter()
        .filter(|e| e.is_dir)
        .collect())
}

/// Copy a single file into `dest_dir`, creating the directory chain first.
/// An existing file of the same name is overwritten.
pub fn copy_file_into(src: &Path, dest_dir: &Path) -> Result<()> {
    fs::create_dir_all(dest_dir)
        .with_context(|| format!("Failed to create {}", dest_dir.display()))?;

    let file_name = src
        .file_name()
        .ok_or_else(|| anyhow!("Source path {} has no file name", src.display()))?;
    let dest = dest_dir.join(file_name);
    fs::copy(src, &dest)
        .with_context(|| format!("Failed to copy {} to {}", src.display(), dest.display()))?;
    Ok(())
}

/// Recursively copy `src` into `dest`, merging with pre-existing content.
/// Same-named files are overwritten, never diffed.
pub fn copy_dir_merge(src: &Path, dest: &Path) -> Result<()> {
    fs::create_dir_all(dest).with_context(|| format!("Failed to create {}", dest.display()))?;

    for entry in sorted_entries(src)? {
        let target = dest.join(&entry.name);
        if entry.is_dir {
            copy_dir_merge(&entry.path, &target)?;
        } else {
            fs::copy(&entry.path, &target).with_context(|| {
                format!(
                    "Failed to copy {} to {}",
                    entry.path.display(),
                    target.display()
                )
            })?;
        }
    }
    Ok(())
}

/// Copy every regular file under `src_root` (any depth) directly into
/// `dest_dir`, discarding the directory structure.
pub fn flatten_copy(src_root: &Path, dest_dir: &Path) -> Result<()> {
    fs::create_dir_all(dest_dir)
        .with_context(|| format!("Failed to create {}", dest_dir.display()))?;

    let mut files: Vec<PathBuf> = WalkDir::new(src_root)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .collect();
    files.sort();

    for file in files {
        copy_file_into(&file, dest_dir)?;
    }
    Ok(())
}
