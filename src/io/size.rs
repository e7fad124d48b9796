//! Human-readable byte sizes for the size ceiling option and messages

use crate::io::error::{Result, invalid_parameter};

const UNITS: [(char, u64); 4] = [
    ('K', 1 << 10),
    ('M', 1 << 20),
    ('G', 1 << 30),
    ('T', 1 << 40),
];

/// Parse a size such as `500K`, `1.5M`, `800kb`, `2GiB` or `123456`
///
/// Units are binary (`K` = 1024 bytes) and case-insensitive. A trailing `B`
/// or `iB` is accepted. Fractions are rounded down to whole bytes.
///
/// # Errors
///
/// Returns an error if the string is empty, malformed, negative, zero or overflows
pub fn parse_size(input: &str) -> Result<u64> {
    let trimmed = input.trim();
    let upper = trimmed.to_ascii_uppercase();
    let without_bytes = upper
        .strip_suffix("IB")
        .or_else(|| upper.strip_suffix('B'))
        .unwrap_or(&upper);

    let (number, multiplier) = match without_bytes.chars().last() {
        Some(unit) if unit.is_ascii_alphabetic() => {
            let multiplier = UNITS
                .iter()
                .find(|(symbol, _)| *symbol == unit)
                .map(|(_, multiplier)| *multiplier)
                .ok_or_else(|| {
                    invalid_parameter("size", &input, &format!("unknown unit '{unit}'"))
                })?;
            let number = without_bytes.strip_suffix(unit).unwrap_or(without_bytes);
            (number, multiplier)
        }
        _ => (without_bytes, 1),
    };

    // "KB" alone strips to "K", which must still carry a number
    let number = number.trim();
    if number.is_empty() {
        return Err(invalid_parameter("size", &input, &"missing number"));
    }

    let bytes = if number.contains('.') {
        let value: f64 = number
            .parse()
            .map_err(|e| invalid_parameter("size", &input, &e))?;
        if !value.is_finite() || value < 0.0 {
            return Err(invalid_parameter(
                "size",
                &input,
                &"must be a positive number",
            ));
        }
        let bytes = (value * multiplier as f64).floor();
        if bytes > u64::MAX as f64 {
            return Err(invalid_parameter("size", &input, &"too large"));
        }
        bytes as u64
    } else {
        let value: u64 = number
            .parse()
            .map_err(|e| invalid_parameter("size", &input, &e))?;
        value
            .checked_mul(multiplier)
            .ok_or_else(|| invalid_parameter("size", &input, &"too large"))?
    };

    if bytes == 0 {
        return Err(invalid_parameter(
            "size",
            &input,
            &"must be greater than zero",
        ));
    }

    Ok(bytes)
}

/// Format a byte count with one decimal in the largest fitting binary unit
pub fn format_size(bytes: u64) -> String {
    UNITS
        .iter()
        .rev()
        .find(|(_, multiplier)| bytes >= *multiplier)
        .map_or_else(
            || format!("{bytes} B"),
            |(symbol, multiplier)| format!("{:.1} {symbol}iB", bytes as f64 / *multiplier as f64),
        )
}
