use std::rc::Rc;

use crate::{
    ast::{Expr, UnaryOperator},
    interpreter::{evaluator::core::EvalResult, scope::Context, value::core::Value},
    span::Span,
};

impl Context {
    /// Evaluates a unary operation.
    ///
    /// `-` multiplies the operand by `-1`, `not` inverts its truthiness and
    /// `+` leaves it unchanged. The result is restamped with the span of the
    /// whole operation.
    ///
    /// # Parameters
    /// - `op`: Unary operator to apply.
    /// - `operand`: Operand expression.
    /// - `span`: Span of the operation.
    pub(crate) fn eval_unary_op(self: &Rc<Self>,
                                op: UnaryOperator,
                                operand: &Expr,
                                span: &Span)
                                -> EvalResult<Value> {
        let value = self.eval_value(operand)?;
        let result = value.unary(op).map_err(|e| e.or_context(self))?;
        Ok(self.stamp(result, span))
    }
}
