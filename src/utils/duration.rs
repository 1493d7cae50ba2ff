//! Human friendly durations used by the reminder settings ("2h", "10m", "1h30m").

use crate::errors::{AppError, AppResult};
use regex::Regex;
use std::sync::LazyLock;
use std::time::Duration;

static DURATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:(\d+)h)?(?:(\d+)m)?(?:(\d+)s)?$").expect("duration regex is valid")
});

/// Parse `90s`, `10m`, `2h`, `1h30m` or a bare number of seconds.
/// Zero durations are rejected.
pub fn parse_duration(input: &str) -> AppResult<Duration> {
    let s = input.trim().to_ascii_lowercase();
    let invalid = || AppError::InvalidDuration(input.to_string());

    let secs = if let Ok(n) = s.parse::<u64>() {
        n
    } else {
        let caps = DURATION_RE.captures(&s).ok_or_else(invalid)?;
        if caps.iter().skip(1).all(|c| c.is_none()) {
            return Err(invalid());
        }

        let mut total: u64 = 0;
        for (group, unit) in [(1, 3600u64), (2, 60), (3, 1)] {
            if let Some(m) = caps.get(group) {
                let n: u64 = m.as_str().parse().map_err(|_| invalid())?;
                total = n
                    .checked_mul(unit)
                    .and_then(|v| v.checked_add(total))
                    .ok_or_else(invalid)?;
            }
        }
        total
    };

    if secs == 0 {
        return Err(AppError::InvalidDuration(format!(
            "{input} (must be greater than zero)"
        )));
    }

    Ok(Duration::from_secs(secs))
}

/// Render a duration the same way it is written in the config file.
pub fn format_duration(d: Duration) -> String {
    let total = d.as_secs();
    let (h, m, s) = (total / 3600, (total % 3600) / 60, total % 60);

    let mut out = String::new();
    if h > 0 {
        out.push_str(&format!("{h}h"));
    }
    if m > 0 {
        out.push_str(&format!("{m}m"));
    }
    if s > 0 || out.is_empty() {
        out.push_str(&format!("{s}s"));
    }
    out
}
