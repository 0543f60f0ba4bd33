use std::cmp::Ordering;

use crate::{
    ast::{BinaryOperator, UnaryOperator},
    error::{RuntimeError, RuntimeErrorKind},
    interpreter::{
        evaluator::core::EvalResult,
        value::{
            core::{Data, Value},
            number::Number,
        },
    },
    span::Span,
    util::num::index_to_usize,
};

impl Value {
    /// Applies a binary operator to `self` (left) and `rhs` (right).
    ///
    /// The result spans both operands and belongs to the left operand's frame.
    ///
    /// # Parameters
    /// - `op`: The operator to apply.
    /// - `rhs`: The right operand.
    ///
    /// # Returns
    /// - `Ok(Value)`: The result of the operation.
    /// - `Err(RuntimeError)`: `IllegalOperation` when the operand types do not
    ///   support `op`, `DivisionByZero` (pointing at `rhs`), `Overflow`, or
    ///   `IndexOutOfRange` for string indexing.
    ///
    /// # Example
    /// ```
    /// use scenev::{ast::BinaryOperator, interpreter::value::core::Value, span::Span};
    ///
    /// let a = Value::int(2, Span::synthetic("2"));
    /// let b = Value::float(0.5, Span::synthetic("0.5"));
    /// assert_eq!(a.binary(BinaryOperator::Mul, &b).unwrap().to_string(), "1");
    /// ```
    pub fn binary(&self, op: BinaryOperator, rhs: &Self) -> EvalResult<Self> {
        match (&self.data, &rhs.data) {
            (Data::Number(a), Data::Number(b)) => self.numeric(op, *a, *b, rhs),
            (Data::String(a), Data::String(b)) => match op {
                BinaryOperator::Add => {
                    let joined = format!("{a}{b}");
                    Ok(self.result(Data::String(joined.into()), rhs))
                },
                BinaryOperator::Equal => Ok(self.result(truth(a == b), rhs)),
                BinaryOperator::NotEqual => Ok(self.result(truth(a != b), rhs)),
                _ => Err(self.illegal(op, rhs)),
            },
            (Data::String(s), Data::Number(Number::Int(index))) if op == BinaryOperator::Div => {
                self.char_at(s, *index, rhs)
            },
            _ => Err(self.illegal(op, rhs)),
        }
    }

    /// Applies a prefix operator.
    ///
    /// `+` returns the number unchanged, `-` multiplies it by `-1` and `not`
    /// inverts its truthiness. All three accept numbers only.
    ///
    /// # Errors
    /// `IllegalOperation` for non-numeric operands, `Overflow` when negating
    /// the smallest integer.
    pub fn unary(&self, op: UnaryOperator) -> EvalResult<Self> {
        let Some(n) = self.as_number() else {
            let details = format!("unary '{op}' is not supported for {}", self.type_name());
            return Err(self.error(RuntimeErrorKind::IllegalOperation(details)));
        };
        let data = match op {
            UnaryOperator::Plus => Data::Number(n),
            UnaryOperator::Negate => Data::Number(n.checked_neg().map_err(|kind| self.error(kind))?),
            UnaryOperator::Not => truth(!n.is_true()),
        };
        let mut result = self.clone();
        result.data = data;
        Ok(result)
    }

    fn numeric(&self, op: BinaryOperator, a: Number, b: Number, rhs: &Self) -> EvalResult<Self> {
        use BinaryOperator::{
            Add, And, Div, Equal, Greater, GreaterEqual, Less, LessEqual, Mul, NotEqual, Or, Pow,
            Sub,
        };

        let overflow = |kind: RuntimeErrorKind| self.spanning(kind, rhs);
        let data = match op {
            Add => Data::Number(a.checked_add(b).map_err(overflow)?),
            Sub => Data::Number(a.checked_sub(b).map_err(overflow)?),
            Mul => Data::Number(a.checked_mul(b).map_err(overflow)?),
            Div => Data::Number(a.checked_div(b).map_err(|kind| rhs.error(kind))?),
            Pow => Data::Number(a.power(b)),
            Equal => truth(a.compare(b) == Some(Ordering::Equal)),
            NotEqual => truth(a.compare(b) != Some(Ordering::Equal)),
            Less => truth(a.compare(b) == Some(Ordering::Less)),
            Greater => truth(a.compare(b) == Some(Ordering::Greater)),
            LessEqual => truth(matches!(a.compare(b), Some(Ordering::Less | Ordering::Equal))),
            GreaterEqual => {
                truth(matches!(a.compare(b), Some(Ordering::Greater | Ordering::Equal)))
            },
            And => truth(a.is_true() && b.is_true()),
            Or => truth(a.is_true() || b.is_true()),
        };
        Ok(self.result(data, rhs))
    }

    fn char_at(&self, s: &str, index: i64, rhs: &Self) -> EvalResult<Self> {
        index_to_usize(index).and_then(|i| s.chars().nth(i))
                             .map(|ch| self.result(Data::String(ch.to_string().into()), rhs))
                             .ok_or_else(|| {
                                 let len = s.chars().count();
                                 rhs.error(RuntimeErrorKind::IndexOutOfRange { index, len })
                             })
    }

    fn result(&self, data: Data, rhs: &Self) -> Self {
        let mut value = Self::new(data, Span::merge(&self.span, &rhs.span));
        if let Some(ctx) = self.context() {
            value = value.with_context(&ctx);
        }
        value
    }

    fn spanning(&self, kind: RuntimeErrorKind, rhs: &Self) -> RuntimeError {
        RuntimeError::new(kind, Span::merge(&self.span, &rhs.span), self.context())
    }

    fn illegal(&self, op: BinaryOperator, rhs: &Self) -> RuntimeError {
        let details = format!("'{op}' is not supported between {} and {}",
                              self.type_name(),
                              rhs.type_name());
        self.spanning(RuntimeErrorKind::IllegalOperation(details), rhs)
    }
}

fn truth(value: bool) -> Data {
    Data::Number(Number::Int(i64::from(value)))
}
