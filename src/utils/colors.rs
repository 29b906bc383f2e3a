/// ANSI color helper utilities for terminal output.
use crate::models::reconciled::ReconcileStatus;

pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";

pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";

pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";
pub const MAGENTA: &str = "\x1b[35m";

/// Worklist color: done → green, pending → yellow, extra visit → magenta.
pub fn color_for_status(status: ReconcileStatus) -> &'static str {
    match status {
        ReconcileStatus::Matched => GREEN,
        ReconcileStatus::Pending => YELLOW,
        ReconcileStatus::Unplanned => MAGENTA,
    }
}

/// Planned/actual balance: shortfall → red, surplus → magenta, even → green.
pub fn color_for_balance(planned: usize, actual: usize) -> &'static str {
    match actual.cmp(&planned) {
        std::cmp::Ordering::Less => RED,
        std::cmp::Ordering::Greater => MAGENTA,
        std::cmp::Ordering::Equal => GREEN,
    }
}

/// Grey out empty placeholders (`""`, `--`, `--:--`).
pub fn colorize_optional(value: &str) -> String {
    let v = value.trim();
    if v.is_empty() || v == "--" || v == "--:--" {
        format!("{GREY}{value}{RESET}")
    } else {
        value.to_string()
    }
}

pub fn paint(color: &str, value: &str) -> String {
    format!("{color}{value}{RESET}")
}
