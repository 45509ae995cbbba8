// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::time::Duration;

/// Compact elapsed time: `850ms`, `12.3s`, `4m7s`.
pub fn format_duration(d: Duration) -> String {
    if d < Duration::from_secs(1) {
        return format!("{}ms", d.as_millis());
    }
    if d < Duration::from_secs(60) {
        return format!("{:.1}s", d.as_secs_f64());
    }
    let secs = d.as_secs();
    format!("{}m{}s", secs / 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[yare::parameterized(
        zero          = { Duration::ZERO,                "0ms" },
        millis        = { Duration::from_millis(850),    "850ms" },
        one_second    = { Duration::from_secs(1),        "1.0s" },
        fractional    = { Duration::from_millis(12_340), "12.3s" },
        one_minute    = { Duration::from_secs(60),       "1m0s" },
        minutes       = { Duration::from_secs(247),      "4m7s" },
        over_an_hour  = { Duration::from_secs(3_725),    "62m5s" },
    )]
    fn formats(d: Duration, expected: &str) {
        assert_eq!(format_duration(d), expected);
    }
}
