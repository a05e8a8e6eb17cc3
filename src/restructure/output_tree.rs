use crate::prelude::*;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// The three artifact categories of the canonical layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    PlatformProfiler,
    WorkloadProfiler,
    Results,
}

impl Category {
    pub const ALL: [Category; 3] = [
        Category::PlatformProfiler,
        Category::WorkloadProfiler,
        Category::Results,
    ];

    pub fn dir_name(self) -> &'static str {
        match self {
            Category::PlatformProfiler => "PlatformProfiler",
            Category::WorkloadProfiler => "WorkloadProfiler",
            Category::Results => "Results",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}

/// The canonical output tree under construction.
///
/// Allocated once per invocation from an externally generated identifier. The
/// whole `SUT{x}/{PlatformProfiler,WorkloadProfiler,Results}` skeleton is
/// created eagerly, so the directories exist even when a mapper finds nothing
/// to put in them.
pub struct OutputTree {
    root: PathBuf,
}

impl OutputTree {
    pub fn allocate(target_dir: &Path, output_id: &str, sut_ids: &[&str]) -> Result<Self> {
        let root = target_dir.join(output_id);
        if root.exists() {
            bail!(
                "Output root {} already exists; each invocation needs a fresh identifier",
                root.display()
            );
        }

        for sut_id in sut_ids {
            for category in Category::ALL {
                let dir = root.join(sut_id).join(category.dir_name());
                fs::create_dir_all(&dir)
                    .with_context(|| format!("Failed to create {}", dir.display()))?;
            }
        }
        debug!("Allocated output root {}", root.display());

        Ok(OutputTree { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn sut_root(&self, sut_id: &str) -> PathBuf {
        self.root.join(sut_id)
    }

    pub fn category_dir(&self, sut_id: &str, category: Category) -> PathBuf {
        self.sut_root(sut_id).join(category.dir_name())
    }
}
