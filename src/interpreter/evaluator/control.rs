use std::{cmp::Ordering, rc::Rc};

use crate::{
    ast::{Expr, ForExprContext, IfCase},
    error::RuntimeErrorKind,
    interpreter::{
        evaluator::core::EvalResult,
        scope::Context,
        value::{core::Value, number::Number},
    },
    span::Span,
};

impl Context {
    /// Evaluates an `if`/`elif`/`else` chain.
    ///
    /// Conditions are tested in order. The body of the first truthy one is
    /// evaluated and its result returned; later arms are never touched. With
    /// no match the `else` body runs, or the expression yields nothing.
    pub(crate) fn eval_if(self: &Rc<Self>,
                          cases: &[IfCase],
                          else_body: Option<&Expr>)
                          -> EvalResult<Option<Value>> {
        for case in cases {
            if self.eval_condition(&case.condition)? {
                return self.eval(&case.body);
            }
        }
        else_body.map_or(Ok(None), |body| self.eval(body))
    }

    /// Evaluates a counting `for` loop.
    ///
    /// Start, end and step are evaluated once, before the first iteration.
    /// The loop variable is written into this frame before every bound
    /// check, so once the loop ends it holds the first value that failed the
    /// check. With a non-negative step the loop runs while the variable is
    /// below `end`; with a negative step, while it is above.
    ///
    /// No child frame is created: the loop variable and anything the body
    /// assigns stay bound after the loop.
    ///
    /// # Parameters
    /// - `context`: Loop header and body.
    /// - `span`: Span of the whole loop, given to the loop variable's values.
    pub(crate) fn eval_for(self: &Rc<Self>,
                           context: &ForExprContext,
                           span: &Span)
                           -> EvalResult<()> {
        let start = self.eval_number(&context.start)?;
        let end = self.eval_number(&context.end)?;
        let step = match &context.step {
            Some(step) => self.eval_number(step)?,
            None => Number::Int(1),
        };

        let ascending = step.compare(Number::Int(0)) != Some(Ordering::Less);
        let mut current = start;
        let mut iterations = 0_u64;

        loop {
            self.define(&context.var, self.stamp(Value::number(current, span.clone()), span));

            let keep_going = if ascending {
                current.compare(end) == Some(Ordering::Less)
            } else {
                current.compare(end) == Some(Ordering::Greater)
            };
            if !keep_going {
                break;
            }

            self.eval(&context.body)?;
            iterations += 1;
            current = current.checked_add(step).map_err(|kind| self.raise(kind, span))?;
        }

        log::debug!("for loop over '{}' ran {iterations} iteration(s)", context.var);
        Ok(())
    }

    /// Evaluates a `while` loop in this frame.
    pub(crate) fn eval_while(self: &Rc<Self>, condition: &Expr, body: &Expr) -> EvalResult<()> {
        let mut iterations = 0_u64;
        while self.eval_condition(condition)? {
            self.eval(body)?;
            iterations += 1;
        }
        log::debug!("while loop ran {iterations} iteration(s)");
        Ok(())
    }

    fn eval_condition(self: &Rc<Self>, condition: &Expr) -> EvalResult<bool> {
        self.eval_value(condition)?
            .is_true()
            .map_err(|e| e.or_context(self))
    }

    fn eval_number(self: &Rc<Self>, expr: &Expr) -> EvalResult<Number> {
        let value = self.eval_value(expr)?;
        value.as_number().ok_or_else(|| {
                             let details =
                                 format!("for loop bounds must be numbers, found {}",
                                         value.type_name());
                             self.raise(RuntimeErrorKind::IllegalOperation(details), expr.span())
                         })
    }
}
