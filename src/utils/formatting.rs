//! Formatting utilities used for CLI and export outputs.

pub fn mins2readable(mins: i64, short: bool) -> String {
    let abs_m = mins.abs();
    let hours = abs_m / 60;
    let minutes = abs_m % 60;
    let sign = if mins < 0 { "-" } else { "" };

    if short {
        format!("{}{:02}:{:02}", sign, hours, minutes)
    } else {
        format!("{}{:02}h {:02}m", sign, hours, minutes)
    }
}

/// Placeholder for a service type that can no longer be resolved.
pub const UNKNOWN_SERVICE: &str = "(unknown service)";

pub fn service_label(name: Option<&str>) -> &str {
    name.filter(|n| !n.trim().is_empty()).unwrap_or(UNKNOWN_SERVICE)
}
