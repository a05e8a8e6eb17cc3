#![allow(unused_imports)]

pub use crate::{end_group, log_json, start_group, start_opened_group};
pub use anyhow::{Context, Error, Result, anyhow, bail};
pub use log::{debug, error, info, trace, warn};
