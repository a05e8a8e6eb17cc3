use super::helpers::sorted_entries;
use super::naming::digit_key;
use crate::prelude::*;
use std::path::Path;

/// One system-under-test discovered in the source tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sut {
    /// The folder name as found in the source tree.
    pub raw_name: String,
    /// Canonical output identifier, always `SUT` + the raw remainder.
    pub canonical_id: String,
    /// Digit characters of the raw name, used to pair with `wp-*` folders.
    pub numeric_key: String,
}

impl Sut {
    /// Normalize a raw folder name into a SUT, or `None` when the name does
    /// not carry a `vm`/`sut` prefix. Matching is prefix-only and
    /// case-insensitive; the remainder keeps its original casing.
    pub fn from_raw(raw_name: &str) -> Option<Self> {
        let lower = raw_name.to_lowercase();
        let remainder = if lower.starts_with("vm") {
            &raw_name["vm".len()..]
        } else if lower.starts_with("sut") {
            &raw_name["sut".len()..]
        } else {
            return None;
        };

        Some(Sut {
            raw_name: raw_name.to_string(),
            canonical_id: format!("SUT{remainder}"),
            numeric_key: digit_key(raw_name),
        })
    }

    /// The synthetic SUT used for single-system sources.
    pub fn synthetic() -> Self {
        Sut {
            raw_name: String::new(),
            canonical_id: "SUT1".to_string(),
            numeric_key: "1".to_string(),
        }
    }
}

/// Which of the two raw-tree conventions the source follows.
pub enum Topology {
    /// At least one top-level `vm*`/`sut*` folder; one pipeline pass per SUT.
    MultiSystem(Vec<Sut>),
    /// Flat `Logs`/`PlatformProfile`/`WorkloadProfiler` convention.
    SingleSystem,
}

/// Inspect the immediate children of the source tree and classify it.
///
/// SUTs are returned in lexicographic order of their raw folder names so the
/// whole pipeline is deterministic regardless of filesystem enumeration order.
pub fn classify(source_dir: &Path) -> Result<Topology> {
    let entries = sorted_entries(source_dir)
        .with_context(|| format!("Failed to list source tree {}", source_dir.display()))?;

    let suts: Vec<Sut> = entries
        .iter()
        .filter(|entry| entry.is_dir)
        .filter_map(|entry| Sut::from_raw(&entry.name))
        .collect();

    if suts.is_empty() {
        Ok(Topology::SingleSystem)
    } else {
        Ok(Topology::MultiSystem(suts))
    }
}
