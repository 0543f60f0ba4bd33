use std::{cmp::Ordering, fmt};

use crate::{ast::NumberLiteral, error::RuntimeErrorKind, util::num::int_to_float};

/// A numeric value: a 64-bit integer or a 64-bit float.
///
/// Mixed operations promote the integer side to float. Integer `+`, `-` and
/// `*` are checked and fail with [`RuntimeErrorKind::Overflow`] instead of
/// wrapping.
#[derive(Debug, Clone, Copy)]
pub enum Number {
    /// A 64-bit signed integer.
    Int(i64),
    /// A 64-bit float.
    Float(f64),
}

impl Number {
    /// Returns the value as an `f64`, promoting integers.
    #[must_use]
    pub const fn as_f64(self) -> f64 {
        match self {
            Self::Int(n) => int_to_float(n),
            Self::Float(x) => x,
        }
    }

    /// Returns `true` for integer zero and for both float zeros.
    #[must_use]
    pub fn is_zero(self) -> bool {
        match self {
            Self::Int(n) => n == 0,
            Self::Float(x) => x == 0.0,
        }
    }

    /// Truthiness: every number except zero is true.
    #[must_use]
    pub fn is_true(self) -> bool {
        !self.is_zero()
    }

    /// `self + rhs`
    ///
    /// # Errors
    /// [`RuntimeErrorKind::Overflow`] if two integers overflow.
    pub fn checked_add(self, rhs: Self) -> Result<Self, RuntimeErrorKind> {
        self.checked(rhs, i64::checked_add, |a, b| a + b)
    }

    /// `self - rhs`
    ///
    /// # Errors
    /// [`RuntimeErrorKind::Overflow`] if two integers overflow.
    pub fn checked_sub(self, rhs: Self) -> Result<Self, RuntimeErrorKind> {
        self.checked(rhs, i64::checked_sub, |a, b| a - b)
    }

    /// `self * rhs`
    ///
    /// # Errors
    /// [`RuntimeErrorKind::Overflow`] if two integers overflow.
    pub fn checked_mul(self, rhs: Self) -> Result<Self, RuntimeErrorKind> {
        self.checked(rhs, i64::checked_mul, |a, b| a * b)
    }

    /// `self / rhs`, always producing a float.
    ///
    /// # Errors
    /// [`RuntimeErrorKind::DivisionByZero`] if `rhs` is zero.
    ///
    /// # Example
    /// ```
    /// use scenev::interpreter::value::number::Number;
    ///
    /// let q = Number::Int(7).checked_div(Number::Int(2)).unwrap();
    /// assert_eq!(q.to_string(), "3.5");
    /// assert!(Number::Int(1).checked_div(Number::Float(0.0)).is_err());
    /// ```
    pub fn checked_div(self, rhs: Self) -> Result<Self, RuntimeErrorKind> {
        if rhs.is_zero() {
            return Err(RuntimeErrorKind::DivisionByZero);
        }
        Ok(Self::Float(self.as_f64() / rhs.as_f64()))
    }

    /// `self ** rhs`, always producing a float.
    #[must_use]
    pub fn power(self, rhs: Self) -> Self {
        Self::Float(self.as_f64().powf(rhs.as_f64()))
    }

    /// Arithmetic negation.
    ///
    /// # Errors
    /// [`RuntimeErrorKind::Overflow`] when negating `i64::MIN`.
    pub fn checked_neg(self) -> Result<Self, RuntimeErrorKind> {
        self.checked_mul(Self::Int(-1))
    }

    /// Numeric ordering. Integers compare exactly; anything involving a float
    /// compares as floats, so `NaN` is unordered.
    #[must_use]
    pub fn compare(self, rhs: Self) -> Option<Ordering> {
        match (self, rhs) {
            (Self::Int(a), Self::Int(b)) => Some(a.cmp(&b)),
            (a, b) => a.as_f64().partial_cmp(&b.as_f64()),
        }
    }

    fn checked(self,
               rhs: Self,
               int_op: fn(i64, i64) -> Option<i64>,
               float_op: fn(f64, f64) -> f64)
               -> Result<Self, RuntimeErrorKind> {
        match (self, rhs) {
            (Self::Int(a), Self::Int(b)) => int_op(a, b).map(Self::Int)
                                                        .ok_or(RuntimeErrorKind::Overflow),
            (a, b) => Ok(Self::Float(float_op(a.as_f64(), b.as_f64()))),
        }
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        self.compare(*other) == Some(Ordering::Equal)
    }
}

impl From<NumberLiteral> for Number {
    fn from(literal: NumberLiteral) -> Self {
        match literal {
            NumberLiteral::Int(n) => Self::Int(n),
            NumberLiteral::Float(x) => Self::Float(x),
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(n) => write!(f, "{n}"),
            Self::Float(x) => write!(f, "{x}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_arithmetic_stays_integer() {
        assert!(matches!(Number::Int(2).checked_add(Number::Int(3)), Ok(Number::Int(5))));
        assert!(matches!(Number::Int(2).checked_mul(Number::Int(-4)), Ok(Number::Int(-8))));
    }

    #[test]
    fn mixed_arithmetic_promotes() {
        assert!(matches!(Number::Int(1).checked_add(Number::Float(0.5)), Ok(Number::Float(x)) if x == 1.5));
    }

    #[test]
    fn overflow_is_reported() {
        assert_eq!(Number::Int(i64::MAX).checked_add(Number::Int(1)), Err(RuntimeErrorKind::Overflow));
        assert_eq!(Number::Int(i64::MIN).checked_neg(), Err(RuntimeErrorKind::Overflow));
    }

    #[test]
    fn division_and_power_are_float() {
        assert!(matches!(Number::Int(6).checked_div(Number::Int(3)), Ok(Number::Float(x)) if x == 2.0));
        assert!(matches!(Number::Int(2).power(Number::Int(3)), Number::Float(x) if x == 8.0));
        assert_eq!(Number::Int(1).checked_div(Number::Int(0)), Err(RuntimeErrorKind::DivisionByZero));
    }

    #[test]
    fn equality_crosses_kinds() {
        assert_eq!(Number::Int(1), Number::Float(1.0));
        assert_ne!(Number::Float(f64::NAN), Number::Float(f64::NAN));
    }

    #[test]
    fn display() {
        assert_eq!(Number::Int(-7).to_string(), "-7");
        assert_eq!(Number::Float(2.0).to_string(), "2");
        assert_eq!(Number::Float(0.25).to_string(), "0.25");
    }
}
