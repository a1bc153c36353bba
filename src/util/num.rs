/// Largest integer value exactly representable as an `f64` (`2^53 - 1`).
pub const MAX_SAFE_U64_INT: u64 = 9_007_199_254_740_991;

/// Converts a `usize` count or position to `f64`.
///
/// Collection sizes never get near `2^53`, so the conversion saturates instead
/// of failing.
#[allow(clippy::cast_precision_loss)]
#[must_use]
pub fn usize_to_f64(value: usize) -> f64 {
    u64::try_from(value).map_or(MAX_SAFE_U64_INT as f64, |v| v.min(MAX_SAFE_U64_INT) as f64)
}

/// Returns the value as an `i64` when it is finite, integral and inside the
/// range where every integer is exactly representable.
///
/// This is the test used at the I/O boundary to decide whether a number is
/// rendered as an integer.
///
/// ## Example
/// ```
/// use lyric::util::num::exact_integer;
///
/// assert_eq!(exact_integer(12.0), Some(12));
/// assert_eq!(exact_integer(-3.0), Some(-3));
/// assert_eq!(exact_integer(0.5), None);
/// assert_eq!(exact_integer(f64::NAN), None);
/// ```
#[allow(clippy::cast_possible_truncation)]
#[allow(clippy::cast_precision_loss)]
#[must_use]
pub fn exact_integer(value: f64) -> Option<i64> {
    if !value.is_finite() || value.fract() != 0.0 {
        return None;
    }
    if value.abs() > MAX_SAFE_U64_INT as f64 {
        return None;
    }
    Some(value as i64)
}

/// Converts an `f64` to a `usize` position if it is a non-negative integer.
///
/// ## Errors
/// Returns `Err(error)` for negative, fractional or non-finite values.
pub fn f64_to_usize_checked<E>(value: f64, error: E) -> Result<usize, E> {
    match exact_integer(value) {
        Some(n) if n >= 0 => usize::try_from(n).map_err(|_| error),
        _ => Err(error),
    }
}

/// Converts an `f64` to a `u32` code point candidate.
///
/// ## Errors
/// Returns `Err(error)` if the value is fractional, negative or larger than
/// `u32::MAX`.
pub fn f64_to_u32_checked<E>(value: f64, error: E) -> Result<u32, E> {
    match exact_integer(value) {
        Some(n) => u32::try_from(n).map_err(|_| error),
        None => Err(error),
    }
}

/// Renders a number the way the language prints it: exact integers without a
/// fractional part, everything else with Rust's shortest round-trip format.
///
/// ## Example
/// ```
/// use lyric::util::num::format_number;
///
/// assert_eq!(format_number(3644.0), "3644");
/// assert_eq!(format_number(3.14), "3.14");
/// assert_eq!(format_number(-0.5), "-0.5");
/// ```
#[must_use]
pub fn format_number(value: f64) -> String {
    exact_integer(value).map_or_else(|| format!("{value}"), |n| n.to_string())
}
