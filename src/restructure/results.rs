use super::helpers::{Entry, copy_dir_merge, copy_file_into, sorted_entries};
use super::naming::{DEFAULT_ITERATION, InstanceTag, instance_dir_name, instance_tag, run_dir_name};
use super::{Issue, RunReport};
use crate::prelude::*;
use std::path::Path;

/// Subfolder whose contents substitute for a run directory's own contents in
/// the no-iterations state.
const BENCHMARK_LOG_DIR: &str = "BenchmarkLog";

/// Walk the raw run directories in order and derive the canonical
/// `run{n}/iteration{x}/instance{m}` structure under `results_dir`.
///
/// Run indices are dense and 1-based; callers pass only directories, so files
/// sitting between run folders never consume an index.
pub fn reconcile_runs(
    run_dirs: &[Entry],
    results_dir: &Path,
    report: &mut RunReport,
) -> Result<()> {
    for (index, run_dir) in run_dirs.iter().enumerate() {
        let run_dest = results_dir.join(run_dir_name(index + 1));
        reconcile_run(&run_dir.path, &run_dest, report)?;
    }
    Ok(())
}

/// Decide the run directory's state once, then map its contents.
fn reconcile_run(run_path: &Path, run_dest: &Path, report: &mut RunReport) -> Result<()> {
    let entries = sorted_entries(run_path)?;
    let iterations: Vec<&Entry> = entries
        .iter()
        .filter(|e| e.is_dir && e.name_lower().starts_with("iteration"))
        .collect();

    if iterations.is_empty() {
        reconcile_without_iterations(&entries, run_dest, report)
    } else {
        for iteration in iterations {
            reconcile_iteration(iteration, &run_dest.join(&iteration.name), report)?;
        }
        Ok(())
    }
}

fn reconcile_iteration(iteration: &Entry, iter_dest: &Path, report: &mut RunReport) -> Result<()> {
    let entries = sorted_entries(&iteration.path)?;
    let instances: Vec<&Entry> = entries.iter().filter(|e| e.is_dir).collect();

    if instances.is_empty() {
        // No pre-existing instance folders: every file gets routed by the
        // instance number encoded in its name.
        for entry in &entries {
            place_file_by_instance(entry, iter_dest, report)?;
        }
    } else {
        // Pre-existing instance folders are copied as-is, merging into any
        // destination content. Loose files next to them are not mapped.
        for instance in instances {
            copy_dir_merge(&instance.path, &iter_dest.join(&instance.name))?;
        }
    }

    Ok(())
}

/// No iteration subfolders: `BenchmarkLog` contents substitute for the run
/// directory's own when present, and everything lands under a synthesized
/// `iteration1`. Directories are not copied in this state; the gap is kept
/// from the legacy layout and surfaced in the completion report.
fn reconcile_without_iterations(
    entries: &[Entry],
    run_dest: &Path,
    report: &mut RunReport,
) -> Result<()> {
    let items = match entries
        .iter()
        .find(|e| e.is_dir && e.name == BENCHMARK_LOG_DIR)
    {
        Some(benchmark_log) => sorted_entries(&benchmark_log.path)?,
        None => entries.to_vec(),
    };

    let iter_dest = run_dest.join(DEFAULT_ITERATION);
    for entry in &items {
        if entry.is_file() {
            place_file_by_instance(entry, &iter_dest, report)?;
        } else {
            report.record(Issue::SkippedRunSubdirectory {
                path: entry.path.clone(),
            });
        }
    }

    Ok(())
}

/// Route one entry into its instance slot. Files go to `instance{m}` where
/// `m` comes from the `log-run` marker, defaulting to 1; a directory goes
/// wholesale into `instance1/<name>`, never instance-numbered.
fn place_file_by_instance(entry: &Entry, iter_dest: &Path, report: &mut RunReport) -> Result<()> {
    if entry.is_dir {
        return copy_dir_merge(&entry.path, &iter_dest.join("instance1").join(&entry.name));
    }

    let instance = match instance_tag(&entry.name) {
        InstanceTag::Parsed(number) => number,
        InstanceTag::Unparseable => {
            report.record(Issue::DefaultedInstanceNumber {
                file_name: entry.name.clone(),
            });
            1
        }
        InstanceTag::Absent => {
            trace!("No instance marker in {:?}, using instance1", entry.name);
            1
        }
    };

    copy_file_into(&entry.path, &iter_dest.join(instance_dir_name(instance)))
}
