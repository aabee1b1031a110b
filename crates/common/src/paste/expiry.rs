use chrono::{DateTime, Utc};

const SECONDS_PER_DAY: i64 = 60 * 60 * 24;

/// Render a Unix timestamp for display
pub fn format_timestamp(seconds: u64) -> String {
    i64::try_from(seconds)
        .ok()
        .and_then(|s| DateTime::<Utc>::from_timestamp(s, 0))
        .map(|dt| dt.format("%B %-d, %Y %H:%M UTC").to_string())
        .unwrap_or_else(|| seconds.to_string())
}

/// Human-readable expiry for a paste, relative to `now`
///
/// Days are rounded up: anything still live within the next 24 hours reads
/// as "Expires in 1 day".
pub fn expiry_status(expiration_time: u64, now: DateTime<Utc>) -> String {
    if expiration_time == 0 {
        return "Never expires".to_string();
    }

    let remaining = i64::try_from(expiration_time)
        .unwrap_or(i64::MAX)
        .saturating_sub(now.timestamp());
    let days = if remaining > 0 {
        (remaining + SECONDS_PER_DAY - 1) / SECONDS_PER_DAY
    } else {
        0
    };

    match days {
        d if d > 30 => format!("Expires on {}", format_timestamp(expiration_time)),
        1 => "Expires in 1 day".to_string(),
        d if d > 0 => format!("Expires in {} days", d),
        _ => "Expired".to_string(),
    }
}
