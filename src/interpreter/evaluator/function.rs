use std::rc::Rc;

use crate::{
    ast::{Expr, FunctionDef},
    error::RuntimeErrorKind,
    interpreter::{
        evaluator::core::EvalResult,
        scope::Context,
        value::{
            core::{Data, Value},
            function::Function,
        },
    },
    span::Span,
};

impl Context {
    /// Evaluates a function definition.
    ///
    /// Builds a function value closing over this frame. A named function is
    /// also bound in this frame's scope. The value is returned either way, so
    /// `fn` can be used inline.
    pub(crate) fn eval_function_def(self: &Rc<Self>, def: &Rc<FunctionDef>, span: &Span) -> Value {
        let function = Function::new(Rc::clone(def), Rc::clone(self));
        let value = self.stamp(Value::function(function, span.clone()), span);
        if let Some(name) = &def.name {
            self.define(name, value.clone());
        }
        value
    }

    /// Evaluates a call expression.
    ///
    /// The callee is evaluated first, then every argument from left to right.
    /// The first failure aborts the call.
    ///
    /// # Parameters
    /// - `callee`: Expression producing the function.
    /// - `arguments`: Argument expressions.
    /// - `span`: Span of the call, used as the new frame's call site.
    ///
    /// # Returns
    /// The value of the function body, if it produced one.
    ///
    /// # Errors
    /// - `NotCallable` if the callee is not a function.
    /// - `ArityMismatch` if the argument count differs from the parameter
    ///   count.
    /// - Anything raised while evaluating the callee, arguments or body.
    pub(crate) fn eval_call(self: &Rc<Self>,
                            callee: &Expr,
                            arguments: &[Expr],
                            span: &Span)
                            -> EvalResult<Option<Value>> {
        let target = self.eval_value(callee)?;
        let Data::Function(function) = &target.data else {
            return Err(self.raise(RuntimeErrorKind::NotCallable(target.type_name().to_string()),
                                  callee.span()));
        };

        let args = arguments.iter()
                            .map(|arg| self.eval_value(arg))
                            .collect::<EvalResult<Vec<_>>>()?;

        let result = function.execute(args, self, span)?;
        Ok(result.map(|value| self.stamp(value, span)))
    }
}

impl Function {
    /// Runs the function body.
    ///
    /// A fresh frame is created as a child of the frame the function was
    /// *defined* in, named after the function and entered from `call_site`.
    /// Each argument is bound to its parameter in that frame, then the body is
    /// evaluated there.
    ///
    /// # Parameters
    /// - `args`: Evaluated arguments, in parameter order.
    /// - `caller`: The frame the call happens in.
    /// - `call_site`: Span of the call expression.
    ///
    /// # Returns
    /// Whatever the body yields.
    ///
    /// # Errors
    /// `ArityMismatch`, raised in the caller's frame, when `args` does not
    /// match the parameter list. Errors from the body are returned unchanged.
    pub fn execute(&self,
                   args: Vec<Value>,
                   caller: &Rc<Context>,
                   call_site: &Span)
                   -> EvalResult<Option<Value>> {
        self.check_arity(args.len())
            .map_err(|kind| caller.raise(kind, call_site))?;

        log::debug!("calling {} with {} argument(s)", self.name(), args.len());

        let frame = Context::child(&self.defining, self.name(), call_site.clone());
        for (param, arg) in self.def.params.iter().zip(args) {
            frame.define(param, arg.with_context(&frame));
        }

        frame.eval(&self.def.body)
    }
}
