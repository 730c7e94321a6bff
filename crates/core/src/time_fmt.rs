// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::time::Duration;

/// Format a duration as `"1d 2h 3m 4s 5ms"`, omitting zero units.
///
/// A zero duration formats as `"0ms"`.
pub fn format_duration(duration: Duration) -> String {
    let total_ms = duration.as_millis();
    let units: [(u128, &str); 5] = [
        (total_ms / 86_400_000, "d"),
        (total_ms / 3_600_000 % 24, "h"),
        (total_ms / 60_000 % 60, "m"),
        (total_ms / 1000 % 60, "s"),
        (total_ms % 1000, "ms"),
    ];
    let parts: Vec<String> = units
        .iter()
        .filter(|(value, _)| *value > 0)
        .map(|(value, unit)| format!("{value}{unit}"))
        .collect();
    if parts.is_empty() {
        "0ms".to_string()
    } else {
        parts.join(" ")
    }
}

#[cfg(test)]
#[path = "time_fmt_tests.rs"]
mod tests;
