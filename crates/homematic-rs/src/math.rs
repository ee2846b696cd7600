// crates/homematic-rs/src/math.rs

//! Lenient numeric parsing for values that arrive as text.
//!
//! Device descriptions and RPC callers hand over numbers as strings in
//! several notations. These helpers never fail: anything unparsable reads
//! as zero, which is what the conversion engine expects.

/// Parses a "0x..." hex or decimal string into an `i64`.
///
/// Hex input is read as an unsigned bit pattern, so `"0xFFFFFFFF"` is
/// 4294967295. Surrounding whitespace is ignored. Returns 0 on failure.
pub fn get_number64(s: &str) -> i64 {
    let trimmed = s.trim();
    if let Some(hex_str) = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
    {
        return u64::from_str_radix(hex_str, 16)
            .map(|v| v as i64)
            .unwrap_or(0);
    }
    if let Ok(v) = trimmed.parse::<i64>() {
        return v;
    }
    // Accept "12.0" style input by truncating a decimal representation.
    trimmed
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .map_or(0, |v| v as i64)
}

/// Parses a "0x..." hex or decimal string into an `i32`.
///
/// Hex input wraps into the 32-bit range, so `"0xFFFFFFFF"` is -1.
pub fn get_number(s: &str) -> i32 {
    get_number64(s) as i32
}

/// Parses an unsigned decimal or hex string, wrapping into `i32`.
pub fn get_unsigned_number(s: &str) -> i32 {
    let trimmed = s.trim();
    if let Some(hex_str) = trimmed.strip_prefix("0x") {
        return u32::from_str_radix(hex_str, 16).map(|v| v as i32).unwrap_or(0);
    }
    trimmed.parse::<u32>().map(|v| v as i32).unwrap_or(0)
}

/// Parses a decimal string into an `f64`. Returns 0.0 on failure.
pub fn get_double(s: &str) -> f64 {
    let trimmed = s.trim();
    match trimmed.parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => get_number64(trimmed) as f64,
    }
}

/// Returns true if `s` parses as a decimal or "0x..." hex number.
pub fn is_number(s: &str) -> bool {
    let trimmed = s.trim();
    if let Some(hex_str) = trimmed.strip_prefix("0x") {
        return !hex_str.is_empty() && u64::from_str_radix(hex_str, 16).is_ok();
    }
    trimmed.parse::<f64>().is_ok_and(f64::is_finite)
}
