use std::rc::Rc;

use crate::{
    ast::{BinaryOperator, Expr},
    interpreter::{evaluator::core::EvalResult, scope::Context, value::core::Value},
    span::Span,
};

impl Context {
    /// Evaluates a binary operation.
    ///
    /// Both operands are always evaluated, left first; `and` and `or` do not
    /// short-circuit. The operator semantics live on [`Value::binary`].
    ///
    /// # Parameters
    /// - `left`: Left-hand operand.
    /// - `op`: Operator to apply.
    /// - `right`: Right-hand operand.
    /// - `span`: Span of the whole operation, given to the result.
    ///
    /// # Returns
    /// The operator's result.
    pub(crate) fn eval_binary_op(self: &Rc<Self>,
                                 left: &Expr,
                                 op: BinaryOperator,
                                 right: &Expr,
                                 span: &Span)
                                 -> EvalResult<Value> {
        let lhs = self.eval_value(left)?;
        let rhs = self.eval_value(right)?;

        let result = lhs.binary(op, &rhs).map_err(|e| e.or_context(self))?;
        Ok(self.stamp(result, span))
    }
}
