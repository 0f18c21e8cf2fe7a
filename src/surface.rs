//! Helpers for text-based control points (sysfs-style attributes).

use num_traits::Num;

use crate::ValidationError;

/// Parses a brightness attribute value.
///
/// Accepts decimal, `0x`-prefixed hex and `0`-prefixed octal like the kernel's
/// unsigned integer parser, with surrounding whitespace (a trailing newline
/// from `echo` in particular). A leading `-` is allowed so the caller can clamp
/// negative requests to zero instead of rejecting them.
pub fn parse_brightness(input: &str) -> Result<i64, ValidationError> {
    let input = input.trim();
    let (negative, digits) = match input.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, input.strip_prefix('+').unwrap_or(input)),
    };

    let (radix, digits) = if let Some(hex) = digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"))
    {
        (16, hex)
    } else if digits.len() > 1 && digits.starts_with('0') {
        (8, &digits[1..])
    } else {
        (10, digits)
    };

    // from_str_radix would accept a second sign
    if digits.is_empty() || digits.starts_with(|c| c == '+' || c == '-') {
        return Err(ValidationError::InvalidValue);
    }

    let value = <i64 as Num>::from_str_radix(digits, radix)
        .map_err(|_| ValidationError::InvalidValue)?;
    Ok(if negative { -value } else { value })
}
