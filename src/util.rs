/// Numeric conversion helpers.
///
/// This module provides the conversions between integer and floating-point
/// types used by the value model: int → float promotion for mixed arithmetic
/// and index conversion for string indexing. Conversions that can fail return
/// an `Option` instead of wrapping or truncating silently.
pub mod num;
