// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `--test-timeout` values: `250ms`, `90s`, `5m`, `1h`, or plain seconds.

use std::time::Duration;

/// Parse a duration argument. `0` (in any unit) means no timeout.
pub fn parse_duration(s: &str) -> Result<Duration, String> {
    let s = s.trim();
    let split = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    let (digits, unit) = s.split_at(split);
    if digits.is_empty() {
        return Err(format!("invalid duration '{s}': expected a number"));
    }
    let n: u64 = digits.parse().map_err(|e| format!("invalid duration '{s}': {e}"))?;
    let secs = |mult: u64| {
        n.checked_mul(mult)
            .map(Duration::from_secs)
            .ok_or_else(|| format!("invalid duration '{s}': too large"))
    };
    match unit {
        "ms" => Ok(Duration::from_millis(n)),
        "" | "s" => secs(1),
        "m" => secs(60),
        "h" => secs(3600),
        other => Err(format!("invalid duration '{s}': unknown unit '{other}'")),
    }
}

/// Zero disables the timeout.
pub fn timeout_of(d: Duration) -> Option<Duration> {
    (!d.is_zero()).then_some(d)
}
