//! Human-readable byte sizes (SI units), both directions.

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
#[error("invalid size {0:?}: expected a value like 3MB or 512kB")]
pub struct ParseBytesError(pub String);

const UNITS: [&str; 5] = ["B", "kB", "MB", "GB", "TB"];

/// Formats a byte count with SI units, e.g. `3500000` -> `"3.5 MB"`.
pub fn format_bytes(bytes: u64) -> String {
    if bytes < 1000 {
        return format!("{} B", bytes);
    }
    let mut value = bytes as f64;
    let mut unit = 0;
    // 999.5 already rounds to a displayed 1000, so it belongs to the
    // next unit.
    while value >= 999.5 && unit < UNITS.len() - 1 {
        value /= 1000.0;
        unit += 1;
    }
    if value >= 10.0 {
        format!("{:.0} {}", value, UNITS[unit])
    } else {
        format!("{:.1} {}", value, UNITS[unit])
    }
}

/// Parses a human size like `3MB`, `512 kB` or `1024` into bytes.
///
/// Unit letters are case-insensitive; `KiB`-style binary suffixes are
/// accepted with 1024 multipliers.
pub fn parse_bytes(input: &str) -> Result<u64, ParseBytesError> {
    let trimmed = input.trim();
    let split = trimmed
        .find(|c: char| !(c.is_ascii_digit() || c == '.'))
        .unwrap_or(trimmed.len());
    let (number, suffix) = trimmed.split_at(split);

    let value: f64 = number
        .parse()
        .map_err(|_| ParseBytesError(input.to_string()))?;

    let multiplier: f64 = match suffix.trim().to_ascii_lowercase().as_str() {
        "" | "b" => 1.0,
        "k" | "kb" => 1e3,
        "m" | "mb" => 1e6,
        "g" | "gb" => 1e9,
        "t" | "tb" => 1e12,
        "ki" | "kib" => 1024.0,
        "mi" | "mib" => 1024.0 * 1024.0,
        "gi" | "gib" => 1024.0 * 1024.0 * 1024.0,
        "ti" | "tib" => 1024.0f64.powi(4),
        _ => return Err(ParseBytesError(input.to_string())),
    };

    Ok((value * multiplier).round() as u64)
}
