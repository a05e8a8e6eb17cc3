use super::helpers::{Entry, copy_file_into, sorted_entries};
use super::naming::run_dir_name;
use crate::prelude::*;
use std::path::Path;

/// Raw folder names probed for platform-profiling artifacts, applied in this
/// order against the same destination. A later candidate may overwrite files
/// of an earlier one; that collision is accepted.
const CANDIDATE_DIRS: [&str; 2] = ["PlatformProfile", "Host-pp"];

/// Layout of one candidate folder, decided once per folder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformLayout {
    /// At least one subdirectory: subdirectories become `run1..runN` in
    /// sorted order. Wins over loose files sitting next to the subdirectories.
    RunPerSubdir,
    /// Only regular files: copied flat into `PlatformProfiler/`.
    Flat,
    Empty,
}

pub fn classify_layout(entries: &[Entry]) -> PlatformLayout {
    if entries.iter().any(|e| e.is_dir) {
        PlatformLayout::RunPerSubdir
    } else if entries.iter().any(|e| e.is_file()) {
        PlatformLayout::Flat
    } else {
        PlatformLayout::Empty
    }
}

/// Copy platform-profiling artifacts into one SUT's `PlatformProfiler/`.
///
/// The platform profile is shared: callers invoke this once per SUT with the
/// same source, replicating the artifacts under every SUT.
pub fn map_platform_profiles(source_dir: &Path, dest_dir: &Path) -> Result<()> {
    for candidate in CANDIDATE_DIRS {
        let candidate_path = source_dir.join(candidate);
        if !candidate_path.exists() {
            continue;
        }

        let entries = sorted_entries(&candidate_path)?;
        match classify_layout(&entries) {
            PlatformLayout::RunPerSubdir => {
                let subdirs = entries.iter().filter(|e| e.is_dir);
                for (run_index, subdir) in subdirs.enumerate() {
                    let run_dir = dest_dir.join(run_dir_name(run_index + 1));
                    for file in sorted_entries(&subdir.path)?.iter().filter(|e| e.is_file()) {
                        copy_file_into(&file.path, &run_dir)?;
                    }
                }
            }
            PlatformLayout::Flat => {
                for file in entries.iter().filter(|e| e.is_file()) {
                    copy_file_into(&file.path, dest_dir)?;
                }
            }
            PlatformLayout::Empty => {}
        }
        debug!("Mapped platform profiles from {candidate}");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn flat_files_copy_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let pp = dir.path().join("PlatformProfile");
        fs::create_dir(&pp).unwrap();
        fs::write(pp.join("a.txt"), b"a").unwrap();
        fs::write(pp.join("b.txt"), b"b").unwrap();

        let dest = dir.path().join("PlatformProfiler");
        map_platform_profiles(dir.path(), &dest).unwrap();

        assert!(dest.join("a.txt").is_file());
        assert!(dest.join("b.txt").is_file());
    }

    #[test]
    fn subdirs_become_sorted_runs() {
        let dir = tempfile::tempdir().unwrap();
        let pp = dir.path().join("PlatformProfile");
        fs::create_dir_all(pp.join("pp2")).unwrap();
        fs::create_dir_all(pp.join("pp1")).unwrap();
        fs::write(pp.join("pp2/second.txt"), b"2").unwrap();
        fs::write(pp.join("pp1/first.txt"), b"1").unwrap();

        let dest = dir.path().join("PlatformProfiler");
        map_platform_profiles(dir.path(), &dest).unwrap();

        assert!(dest.join("run1/first.txt").is_file());
        assert!(dest.join("run2/second.txt").is_file());
    }

    #[test]
    fn run_layout_wins_over_loose_files() {
        let dir = tempfile::tempdir().unwrap();
        let pp = dir.path().join("PlatformProfile");
        fs::create_dir_all(pp.join("pp1")).unwrap();
        fs::write(pp.join("pp1/inner.txt"), b"").unwrap();
        fs::write(pp.join("loose.txt"), b"").unwrap();

        let dest = dir.path().join("PlatformProfiler");
        map_platform_profiles(dir.path(), &dest).unwrap();

        assert!(dest.join("run1/inner.txt").is_file());
        assert!(!dest.join("loose.txt").exists());
    }

    #[test]
    fn both_candidates_apply_to_the_same_destination() {
        let dir = tempfile::tempdir().unwrap();
        let first = dir.path().join("PlatformProfile");
        let second = dir.path().join("Host-pp");
        fs::create_dir(&first).unwrap();
        fs::create_dir(&second).unwrap();
        fs::write(first.join("shared.txt"), b"first").unwrap();
        fs::write(second.join("shared.txt"), b"second").unwrap();
        fs::write(second.join("only-host.txt"), b"").unwrap();

        let dest = dir.path().join("PlatformProfiler");
        map_platform_profiles(dir.path(), &dest).unwrap();

        // Last writer wins on the name collision.
        assert_eq!(fs::read(dest.join("shared.txt")).unwrap(), b"second");
        assert!(dest.join("only-host.txt").is_file());
    }

    #[test]
    fn layout_classification_is_explicit() {
        let file = Entry {
            name: "f".into(),
            path: "f".into(),
            is_dir: false,
        };
        let dir = Entry {
            name: "d".into(),
            path: "d".into(),
            is_dir: true,
        };

        assert_eq!(classify_layout(&[]), PlatformLayout::Empty);
        assert_eq!(classify_layout(&[file.clone()]), PlatformLayout::Flat);
        assert_eq!(classify_layout(&[dir.clone()]), PlatformLayout::RunPerSubdir);
        assert_eq!(classify_layout(&[file, dir]), PlatformLayout::RunPerSubdir);
    }
}
