use lazy_static::lazy_static;
use regex::Regex;

pub const DEFAULT_ITERATION: &str = "iteration1";

const LOG_RUN_MARKER: &str = "log-run";

lazy_static! {
    /// Digits immediately following `log-run` encode the instance number,
    /// bounded by the next `-` (or the end of the digit run).
    static ref LOG_RUN_INSTANCE: Regex = Regex::new(r"log-run(\d+)").unwrap();
}

/// Result of probing a result file name for an encoded instance number.
///
/// Callers that fall back to instance 1 on `Unparseable` record the fallback;
/// `Absent` is the designed default for plain files and is only traced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstanceTag {
    Parsed(u32),
    /// The `log-run` marker is present but the digits are missing or do not
    /// form a valid number.
    Unparseable,
    /// No `log-run` marker in the name.
    Absent,
}

pub fn instance_tag(file_name: &str) -> InstanceTag {
    if !file_name.contains(LOG_RUN_MARKER) {
        return InstanceTag::Absent;
    }
    match LOG_RUN_INSTANCE
        .captures(file_name)
        .and_then(|captures| captures[1].parse().ok())
    {
        Some(number) => InstanceTag::Parsed(number),
        None => InstanceTag::Unparseable,
    }
}

/// Concatenation of every digit character of `name`, in order.
///
/// This is the numeric matching key pairing a SUT folder with its workload
/// profiler folder, e.g. `VM12` -> `"12"`.
pub fn digit_key(name: &str) -> String {
    name.chars().filter(char::is_ascii_digit).collect()
}

pub fn run_dir_name(index: usize) -> String {
    format!("run{index}")
}

pub fn instance_dir_name(index: u32) -> String {
    format!("instance{index}")
}
