use super::config::ReplicationPolicy;
use super::helpers::{Entry, copy_file_into, flatten_copy, sorted_entries};
use super::naming::{DEFAULT_ITERATION, run_dir_name};
use super::topology::Sut;
use super::{Issue, RunReport};
use crate::archive;
use crate::prelude::*;
use std::fs;
use std::path::Path;

const TAR_GZ_SUFFIX: &str = ".tar.gz";

/// Multi-system mapping: pair the SUT with its `wp-*` folder and lay its JSON
/// captures out as runs.
///
/// The folder is the first top-level directory (lexicographically) whose
/// lowercased name starts with `wp-` and ends with the SUT's numeric key.
/// Each `.json` file, in sorted order, takes the next run index. When the
/// folder carries `iteration*` subfolders the file is replicated into every
/// one of them; otherwise it lands in `iteration1`.
pub fn map_workload_profiles(source_dir: &Path, sut: &Sut, dest_dir: &Path) -> Result<()> {
    let Some(wp_folder) = find_wp_folder(source_dir, &sut.numeric_key)? else {
        debug!("No workload profiler folder for {}", sut.canonical_id);
        return Ok(());
    };

    let entries = sorted_entries(&wp_folder.path)?;
    let iterations: Vec<&Entry> = entries
        .iter()
        .filter(|e| e.is_dir && e.name_lower().starts_with("iteration"))
        .collect();
    let json_files = entries
        .iter()
        .filter(|e| e.is_file() && e.name_lower().ends_with(".json"));

    for (index, file) in json_files.enumerate() {
        let run_dir = dest_dir.join(run_dir_name(index + 1));
        if iterations.is_empty() {
            copy_file_into(&file.path, &run_dir.join(DEFAULT_ITERATION))?;
        } else {
            // Full replication: the capture goes into every iteration slot.
            for iteration in &iterations {
                copy_file_into(&file.path, &run_dir.join(&iteration.name))?;
            }
        }
    }

    Ok(())
}

fn find_wp_folder(source_dir: &Path, numeric_key: &str) -> Result<Option<Entry>> {
    let key = numeric_key.to_lowercase();
    Ok(sorted_entries(source_dir)?.into_iter().find(|e| {
        let lower = e.name_lower();
        e.is_dir && lower.starts_with("wp-") && lower.ends_with(&key)
    }))
}

/// Single-system mapping from the flat `WorkloadProfiler` source folder.
///
/// `logs_run_count` is the number of run subfolders found under `Logs`; the
/// shared policy replicates across that many slots (minimum one), the
/// per-artifact policy ignores it.
pub fn map_single_system(
    wp_src: &Path,
    dest_dir: &Path,
    policy: ReplicationPolicy,
    logs_run_count: usize,
    report: &mut RunReport,
) -> Result<()> {
    if !wp_src.is_dir() {
        return Ok(());
    }

    match policy {
        ReplicationPolicy::Shared => {
            replicate_shared(wp_src, dest_dir, logs_run_count.max(1), report)
        }
        ReplicationPolicy::PerArtifact => replicate_per_artifact(wp_src, dest_dir, report),
    }
}

fn replicate_shared(
    wp_src: &Path,
    dest_dir: &Path,
    run_count: usize,
    report: &mut RunReport,
) -> Result<()> {
    let entries = sorted_entries(wp_src)?;
    let Some(artifact) = entries.iter().find(|e| {
        let lower = e.name_lower();
        e.is_file() && (lower.ends_with(".json") || lower.ends_with(TAR_GZ_SUFFIX))
    }) else {
        debug!("No workload profiler artifact found under {}", wp_src.display());
        return Ok(());
    };

    info!(
        "Replicating workload artifact {:?} across {run_count} run(s)",
        artifact.name
    );

    if artifact.name_lower().ends_with(TAR_GZ_SUFFIX) {
        // Extract once into a scratch directory; the source tree stays
        // untouched and the scratch is removed on drop regardless of outcome.
        let scratch = tempfile::tempdir().context("Failed to create extraction scratch dir")?;
        if let Err(err) = archive::extract_tar_gz(&artifact.path, scratch.path()) {
            report.record(Issue::ArchiveExtraction {
                archive: artifact.path.clone(),
                reason: format!("{err:#}"),
            });
            return Ok(());
        }
        for run_index in 1..=run_count {
            let dest = dest_dir.join(run_dir_name(run_index)).join(DEFAULT_ITERATION);
            flatten_copy(scratch.path(), &dest)?;
        }
    } else {
        for run_index in 1..=run_count {
            let dest = dest_dir.join(run_dir_name(run_index)).join(DEFAULT_ITERATION);
            copy_file_into(&artifact.path, &dest)?;
        }
    }

    Ok(())
}

/// Each loose file or archive consumes the next run slot, in sorted order.
/// A failed extraction still consumes its slot, leaving the run empty.
fn replicate_per_artifact(wp_src: &Path, dest_dir: &Path, report: &mut RunReport) -> Result<()> {
    let mut run_index = 1;

    for entry in sorted_entries(wp_src)? {
        let dest = dest_dir.join(run_dir_name(run_index)).join(DEFAULT_ITERATION);

        if entry.name_lower().ends_with(TAR_GZ_SUFFIX) {
            fs::create_dir_all(&dest)
                .with_context(|| format!("Failed to create {}", dest.display()))?;
            let scratch = tempfile::tempdir().context("Failed to create extraction scratch dir")?;
            match archive::extract_tar_gz(&entry.path, scratch.path()) {
                Ok(()) => flatten_copy(scratch.path(), &dest)?,
                Err(err) => report.record(Issue::ArchiveExtraction {
                    archive: entry.path.clone(),
                    reason: format!("{err:#}"),
                }),
            }
            run_index += 1;
        } else if entry.is_file() {
            copy_file_into(&entry.path, &dest)?;
            run_index += 1;
        }
    }

    Ok(())
}
