//! Logging utilities
//!
//! Thin helpers over the `log` facade. Nothing is emitted until the host
//! installs a logger (`console_log` in the browser, `env_logger` natively).

#![allow(unused)]

const TARGET: &str = "lottery";

/// Log an info message
#[inline(always)]
pub fn info(msg: &str) {
    log::info!(target: TARGET, "{msg}");
}

/// Log a warning message
#[inline(always)]
pub fn warn(msg: &str) {
    log::warn!(target: TARGET, "{msg}");
}

/// Log an error message
#[inline(always)]
pub fn error(msg: &str) {
    log::error!(target: TARGET, "{msg}");
}

/// Log a debug message with a label
#[inline(always)]
pub fn debug(label: &str, msg: &str) {
    log::debug!(target: TARGET, "[{label}] {msg}");
}

/// Log machine state summary
#[inline(always)]
pub fn state_summary(
    coins: u32,
    repeat_rate: f64,
    collection_size: usize,
    total_items: u32,
    is_spinning: bool,
) {
    log::debug!(
        target: TARGET,
        "[STATE] coins={coins} repeat_rate={repeat_rate:.2}% collection={collection_size}/{total_items} spinning={is_spinning}"
    );
}

/// Log an action being performed
#[inline(always)]
pub fn action(name: &str, details: &str) {
    log::info!(target: TARGET, "[ACTION] {name}: {details}");
}

/// Log action result
#[inline(always)]
pub fn result(success: bool, msg: &str) {
    if success {
        log::info!(target: TARGET, "[OK] {msg}");
    } else {
        log::warn!(target: TARGET, "[FAILED] {msg}");
    }
}
