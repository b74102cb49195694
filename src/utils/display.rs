//! Human-readable formatting helpers

const UNITS: [&str; 4] = ["KB", "MB", "GB", "TB"];

// Anything at or above this would print as "1024.0" with one decimal
const ROLLOVER: f64 = 1023.95;

/// Render a byte count the way the download list shows it ("12.3 MB")
pub fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        return format!("{} B", bytes);
    }

    let mut value = bytes as f64 / 1024.0;
    let mut unit = 0;
    while value >= ROLLOVER && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    format!("{:.1} {}", value, UNITS[unit])
}
