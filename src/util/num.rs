/// Converts an integer to the nearest `f64`.
///
/// Integers beyond `2^53` lose precision, exactly as they do in any mixed
/// int/float arithmetic.
///
/// ## Example
/// ```
/// use scenev::util::num::int_to_float;
///
/// assert_eq!(int_to_float(42), 42.0);
/// assert_eq!(int_to_float(-3), -3.0);
/// ```
#[allow(clippy::cast_precision_loss)]
#[must_use]
pub const fn int_to_float(value: i64) -> f64 {
    value as f64
}

/// Converts a signed index into a `usize`, rejecting negative values.
///
/// ## Example
/// ```
/// use scenev::util::num::index_to_usize;
///
/// assert_eq!(index_to_usize(3), Some(3));
/// assert_eq!(index_to_usize(-1), None);
/// ```
#[must_use]
pub fn index_to_usize(index: i64) -> Option<usize> {
    usize::try_from(index).ok()
}
