//! Structured log events carried over dedicated `log` targets.
//!
//! Group events drive the console renderer in [`crate::local_logger`]: a group
//! opens a titled section (with a spinner on TTYs) and `end_group!` closes it.
//! JSON events bypass styling entirely and go to stdout verbatim.

use log::Record;

pub const GROUP_START_TARGET: &str = "restructure::group::start";
pub const GROUP_START_OPENED_TARGET: &str = "restructure::group::start_opened";
pub const GROUP_END_TARGET: &str = "restructure::group::end";
pub const JSON_EVENT_TARGET: &str = "restructure::json";

#[macro_export]
macro_rules! start_group {
    ($name:expr) => {
        log::info!(target: $crate::logger::GROUP_START_TARGET, "{}", $name);
    };
}

/// Same as [`start_group!`], but the renderer keeps the group output expanded
/// instead of collapsing it behind a spinner.
#[macro_export]
macro_rules! start_opened_group {
    ($name:expr) => {
        log::info!(target: $crate::logger::GROUP_START_OPENED_TARGET, "{}", $name);
    };
}

#[macro_export]
macro_rules! end_group {
    () => {
        log::info!(target: $crate::logger::GROUP_END_TARGET, "");
    };
}

#[macro_export]
macro_rules! log_json {
    ($payload:expr) => {
        log::info!(target: $crate::logger::JSON_EVENT_TARGET, "{}", $payload);
    };
}

pub enum GroupEvent {
    Start(String),
    StartOpened(String),
    End,
}

pub fn get_group_event(record: &Record) -> Option<GroupEvent> {
    match record.target() {
        t if t == GROUP_START_TARGET => Some(GroupEvent::Start(record.args().to_string())),
        t if t == GROUP_START_OPENED_TARGET => {
            Some(GroupEvent::StartOpened(record.args().to_string()))
        }
        t if t == GROUP_END_TARGET => Some(GroupEvent::End),
        _ => None,
    }
}

pub struct JsonEvent(pub String);

pub fn get_json_event(record: &Record) -> Option<JsonEvent> {
    (record.target() == JSON_EVENT_TARGET).then(|| JsonEvent(record.args().to_string()))
}
