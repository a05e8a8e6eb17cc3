//! The classification-and-remapping engine.
//!
//! Inspects a raw benchmark-output tree, decides which of the two source
//! topologies it follows, and copies every relevant artifact to its canonical
//! `SUT{x}/{PlatformProfiler,WorkloadProfiler,Results}` destination under a
//! freshly allocated output root. The source tree is only ever read from.

pub mod config;
mod helpers;
pub mod naming;
mod output_tree;
mod platform;
mod results;
mod root_files;
pub mod topology;
mod workload;

pub use config::{Config, ReplicationPolicy};
pub use output_tree::{Category, OutputTree};
pub use topology::{Sut, Topology};

use crate::prelude::*;
use helpers::{Entry, sorted_subdirs};
use itertools::Itertools;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Raw folder holding result runs in single-system mode.
const LOGS_DIR: &str = "Logs";
/// Raw folder holding workload profiler artifacts in single-system mode.
const WP_DIR: &str = "WorkloadProfiler";

/// A recoverable event the engine worked around instead of aborting.
///
/// Filesystem write failures are never issues; they propagate as fatal
/// errors. Everything here leaves the invocation complete but partial.
#[derive(Debug, Error)]
pub enum Issue {
    #[error("could not extract {}: {reason}", .archive.display())]
    ArchiveExtraction { archive: PathBuf, reason: String },
    #[error("instance number in {file_name:?} is unparseable, defaulted to instance1")]
    DefaultedInstanceNumber { file_name: String },
    #[error("directory {} sits in a run without iterations and was not copied", .path.display())]
    SkippedRunSubdirectory { path: PathBuf },
}

/// Collects recoverable issues as the pipelines run.
#[derive(Default)]
pub struct RunReport {
    issues: Vec<Issue>,
}

impl RunReport {
    pub(crate) fn record(&mut self, issue: Issue) {
        match &issue {
            Issue::ArchiveExtraction { .. } => warn!("{issue}"),
            Issue::DefaultedInstanceNumber { .. } | Issue::SkippedRunSubdirectory { .. } => {
                debug!("{issue}")
            }
        }
        self.issues.push(issue);
    }

    fn into_issues(self) -> Vec<Issue> {
        self.issues
    }
}

/// What one invocation produced.
pub struct Outcome {
    pub output_root: PathBuf,
    /// Canonical SUT identifiers, deduplicated (two raw names may merge).
    pub suts: Vec<String>,
    pub issues: Vec<Issue>,
}

/// Run the engine once: classify the source tree, allocate the output root,
/// and execute the matching pipeline.
pub fn run(config: &Config) -> Result<Outcome> {
    debug!("Inspecting source tree {}", config.source_dir.display());
    let mut report = RunReport::default();

    let (tree, sut_ids) = match topology::classify(&config.source_dir)? {
        Topology::MultiSystem(suts) => {
            info!("Detected {} system-under-test folder(s)", suts.len());
            run_multi_system(config, &suts, &mut report)?
        }
        Topology::SingleSystem => {
            info!("No vm/sut folders detected, structuring as a single system");
            run_single_system(config, &mut report)?
        }
    };

    Ok(Outcome {
        output_root: tree.root().to_path_buf(),
        suts: sut_ids,
        issues: report.into_issues(),
    })
}

fn run_multi_system(
    config: &Config,
    suts: &[Sut],
    report: &mut RunReport,
) -> Result<(OutputTree, Vec<String>)> {
    let ids: Vec<&str> = suts.iter().map(|s| s.canonical_id.as_str()).collect();
    let tree = OutputTree::allocate(&config.target_dir, &config.output_id, &ids)?;

    for sut in suts {
        start_group!(format!("Mapping {}", sut.canonical_id));

        platform::map_platform_profiles(
            &config.source_dir,
            &tree.category_dir(&sut.canonical_id, Category::PlatformProfiler),
        )?;
        workload::map_workload_profiles(
            &config.source_dir,
            sut,
            &tree.category_dir(&sut.canonical_id, Category::WorkloadProfiler),
        )?;

        let run_dirs = sorted_subdirs(&config.source_dir.join(&sut.raw_name))?;
        results::reconcile_runs(
            &run_dirs,
            &tree.category_dir(&sut.canonical_id, Category::Results),
            report,
        )?;

        end_group!();
    }

    root_files::broadcast_to_suts(&config.source_dir, &tree, &ids)?;

    let unique_ids = ids.iter().map(|id| id.to_string()).unique().collect();
    Ok((tree, unique_ids))
}

fn run_single_system(config: &Config, report: &mut RunReport) -> Result<(OutputTree, Vec<String>)> {
    let sut = Sut::synthetic();
    let tree = OutputTree::allocate(
        &config.target_dir,
        &config.output_id,
        &[sut.canonical_id.as_str()],
    )?;

    start_group!(format!("Mapping {}", sut.canonical_id));

    platform::map_platform_profiles(
        &config.source_dir,
        &tree.category_dir(&sut.canonical_id, Category::PlatformProfiler),
    )?;

    let logs_dir = config.source_dir.join(LOGS_DIR);
    let log_runs = sorted_subdirs(&logs_dir)?;

    workload::map_single_system(
        &config.source_dir.join(WP_DIR),
        &tree.category_dir(&sut.canonical_id, Category::WorkloadProfiler),
        config.wp_policy,
        log_runs.len(),
        report,
    )?;

    let results_dir = tree.category_dir(&sut.canonical_id, Category::Results);
    if logs_dir.is_dir() {
        if log_runs.is_empty() {
            // Logs itself holds the loose artifacts of the single run.
            let logs_as_run = logs_run_entry(&logs_dir);
            results::reconcile_runs(&[logs_as_run], &results_dir, report)?;
        } else {
            results::reconcile_runs(&log_runs, &results_dir, report)?;
        }
    }

    root_files::route_single_system(
        &config.source_dir,
        &tree.sut_root(&sut.canonical_id),
        &results_dir,
    )?;

    end_group!();

    Ok((tree, vec![sut.canonical_id]))
}

fn logs_run_entry(logs_dir: &Path) -> Entry {
    Entry {
        name: LOGS_DIR.to_string(),
        path: logs_dir.to_path_buf(),
        is_dir: true,
    }
}
