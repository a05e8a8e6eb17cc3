use crate::local_logger::init_local_logger;
use crate::prelude::*;
use crate::restructure::{self, Config, Outcome, ReplicationPolicy};
use clap::Parser;
use console::style;
use serde::Serialize;
use std::path::{Path, PathBuf};
use uuid::Uuid;

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Normalize raw benchmark output trees into the canonical SUT layout"
)]
pub struct Cli {
    /// Path to the raw, unstructured benchmark output
    pub source_dir: PathBuf,

    /// Directory receiving the canonical output root
    pub target_dir: PathBuf,

    /// Replication policy for single-system workload profiler artifacts
    #[arg(long, value_enum, default_value_t = ReplicationPolicy::Shared)]
    pub wp_policy: ReplicationPolicy,

    /// Use a fixed output root name instead of a generated one
    #[arg(long, env = "RESTRUCTURE_OUTPUT_ID")]
    pub output_id: Option<String>,

    /// Emit a machine-readable completion event on stdout
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FinishedEvent<'a> {
    event: &'static str,
    output_root: String,
    wp_policy: ReplicationPolicy,
    suts: &'a [String],
    issues: Vec<String>,
}

pub fn run() -> Result<()> {
    init_local_logger()?;
    let cli = Cli::parse();

    let output_id = match cli.output_id {
        Some(id) => id,
        None => fresh_output_id(&cli.target_dir),
    };

    let config = Config {
        source_dir: cli.source_dir,
        target_dir: cli.target_dir,
        output_id,
        wp_policy: cli.wp_policy,
    };

    let outcome = restructure::run(&config)?;
    report_outcome(&outcome, config.wp_policy, cli.json)?;

    Ok(())
}

/// Allocate a collision-free identifier for the output root. UUIDv4
/// collisions are improbable, but the loop makes the precondition explicit.
fn fresh_output_id(target_dir: &Path) -> String {
    loop {
        let id = Uuid::new_v4().to_string();
        if !target_dir.join(&id).exists() {
            return id;
        }
    }
}

fn report_outcome(
    outcome: &Outcome,
    wp_policy: ReplicationPolicy,
    output_json: bool,
) -> Result<()> {
    info!(
        "Canonical tree for {} system(s) written to {}",
        outcome.suts.len(),
        style(outcome.output_root.display()).bold()
    );

    if !outcome.issues.is_empty() {
        warn!(
            "Completed with {} recoverable issue(s):",
            outcome.issues.len()
        );
        for issue in &outcome.issues {
            warn!("  {issue}");
        }
    }

    if output_json {
        let event = FinishedEvent {
            event: "restructure_finished",
            output_root: outcome.output_root.display().to_string(),
            wp_policy,
            suts: &outcome.suts,
            issues: outcome.issues.iter().map(ToString::to_string).collect(),
        };
        log_json!(serde_json::to_string(&event)?);
    }

    Ok(())
}
