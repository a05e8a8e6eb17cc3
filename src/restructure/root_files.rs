use super::helpers::{copy_file_into, sorted_entries};
use super::naming::DEFAULT_ITERATION;
use super::output_tree::OutputTree;
use crate::prelude::*;
use std::path::Path;

/// Manually captured result file routed to the SUT root in single-system mode.
const MANUAL_RESULT_FILE: &str = "epyc_manual_result.json";

/// Multi-system: every regular file at the source root is copied into the
/// root of every SUT directory. This is an intentional broadcast; the file
/// is shared context (host inventory, notes) rather than per-SUT output.
pub fn broadcast_to_suts(source_dir: &Path, tree: &OutputTree, sut_ids: &[&str]) -> Result<()> {
    for entry in sorted_entries(source_dir)? {
        if entry.is_dir {
            continue;
        }
        for sut_id in sut_ids {
            copy_file_into(&entry.path, &tree.sut_root(sut_id))?;
        }
    }
    Ok(())
}

/// Single-system: the manual-result file goes to the SUT root; every other
/// root-level `.json`/`.txt` file goes into `Results/run1/iteration1/instance1`
/// unconditionally, even when more runs were detected elsewhere.
pub fn route_single_system(source_dir: &Path, sut_root: &Path, results_dir: &Path) -> Result<()> {
    let overflow_dest = results_dir
        .join("run1")
        .join(DEFAULT_ITERATION)
        .join("instance1");

    for entry in sorted_entries(source_dir)? {
        if entry.is_dir {
            continue;
        }

        let lower = entry.name_lower();
        if lower == MANUAL_RESULT_FILE {
            copy_file_into(&entry.path, sut_root)?;
        } else if lower.ends_with(".json") || lower.ends_with(".txt") {
            copy_file_into(&entry.path, &overflow_dest)?;
        }
    }
    Ok(())
}
