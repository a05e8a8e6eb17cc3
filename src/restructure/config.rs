use clap::ValueEnum;
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// How single-system workload profiler artifacts map onto result runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReplicationPolicy {
    /// One artifact, replicated into `iteration1` of every run slot derived
    /// from the `Logs` folder.
    Shared,
    /// Each artifact consumes the next sequential run slot, independent of
    /// the `Logs`-derived run count.
    PerArtifact,
}

impl fmt::Display for ReplicationPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReplicationPolicy::Shared => write!(f, "shared"),
            ReplicationPolicy::PerArtifact => write!(f, "per-artifact"),
        }
    }
}

/// Engine configuration for one invocation.
#[derive(Debug, Clone)]
pub struct Config {
    /// Raw source tree; only ever read from.
    pub source_dir: PathBuf,
    /// Directory that receives the canonical output root.
    pub target_dir: PathBuf,
    /// Externally allocated name of the output root; must not pre-exist
    /// under `target_dir`.
    pub output_id: String,
    pub wp_policy: ReplicationPolicy,
}
