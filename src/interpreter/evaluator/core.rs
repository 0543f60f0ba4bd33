use std::rc::Rc;

use crate::{
    ast::Expr,
    error::{RuntimeError, RuntimeErrorKind},
    interpreter::{scope::Context, value::core::Value},
    span::Span,
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// `RuntimeError` describing the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// Most expressions that may be under evaluation at once in one session.
///
/// Every nested expression counts, including those in the bodies of
/// functions still running, so deep recursion fails with `StackOverflow`
/// instead of exhausting the native stack.
pub const MAX_EVAL_DEPTH: usize = 4000;

impl Context {
    /// Evaluates an expression in this frame.
    ///
    /// This is the main entry point for expression evaluation. The first
    /// error raised anywhere in the tree aborts the whole evaluation and is
    /// returned unchanged.
    ///
    /// The session's depth counter is restored on return, whether the
    /// evaluation succeeded or not, so the frame stays usable after a
    /// `StackOverflow`.
    ///
    /// # Parameters
    /// - `expr`: Expression to evaluate.
    ///
    /// # Returns
    /// `Some(Value)` for expressions that produce a value, or `None` for
    /// assignments, loops and an `if` with no matching arm.
    ///
    /// # Example
    /// ```
    /// use std::rc::Rc;
    ///
    /// use scenev::{
    ///     interpreter::{lexer::tokenize, parser::core::parse, scope::Context},
    ///     span::Source,
    /// };
    ///
    /// let context = Context::root("<program>");
    /// let tokens = tokenize(&Rc::new(Source::new("<stdin>", "2 + 3 * 4"))).unwrap();
    /// let expr = parse(&tokens).unwrap();
    ///
    /// let value = context.eval(&expr).unwrap().unwrap();
    /// assert_eq!(value.to_string(), "14");
    /// ```
    pub fn eval(self: &Rc<Self>, expr: &Expr) -> EvalResult<Option<Value>> {
        let depth = self.eval_depth.get();
        if depth >= MAX_EVAL_DEPTH {
            return Err(self.raise(RuntimeErrorKind::StackOverflow(MAX_EVAL_DEPTH), expr.span()));
        }
        self.eval_depth.set(depth + 1);
        let result = self.eval_node(expr);
        self.eval_depth.set(depth);
        result
    }

    fn eval_node(self: &Rc<Self>, expr: &Expr) -> EvalResult<Option<Value>> {
        match expr {
            Expr::Number { value, span } => {
                Ok(Some(self.stamp(Value::number((*value).into(), span.clone()), span)))
            },
            Expr::String { value, span } => {
                Ok(Some(self.stamp(Value::string(Rc::clone(value), span.clone()), span)))
            },
            Expr::VarAccess { name, span } => self.eval_variable(name, span).map(Some),
            Expr::VarAssign { name, value, .. } => {
                self.eval_assignment(name, value)?;
                Ok(None)
            },
            Expr::BinaryOp { left,
                             op,
                             right,
                             span, } => self.eval_binary_op(left, *op, right, span).map(Some),
            Expr::UnaryOp { op, operand, span } => {
                self.eval_unary_op(*op, operand, span).map(Some)
            },
            Expr::If { cases, else_body, .. } => self.eval_if(cases, else_body.as_deref()),
            Expr::For { context, span } => {
                self.eval_for(context, span)?;
                Ok(None)
            },
            Expr::While { condition, body, .. } => {
                self.eval_while(condition, body)?;
                Ok(None)
            },
            Expr::FuncDef { def, span } => Ok(Some(self.eval_function_def(def, span))),
            Expr::Call { callee,
                         arguments,
                         span, } => self.eval_call(callee, arguments, span),
        }
    }

    /// Evaluates an expression that must produce a value.
    ///
    /// # Errors
    /// `MissingValue` pointing at `expr` if it yields nothing, plus anything
    /// [`Context::eval`] can raise.
    pub fn eval_value(self: &Rc<Self>, expr: &Expr) -> EvalResult<Value> {
        self.eval(expr)?
            .ok_or_else(|| self.raise(RuntimeErrorKind::MissingValue, expr.span()))
    }

    /// Resolves a variable through the frame chain.
    ///
    /// The stored value is handed out as a copy restamped with the reading
    /// expression's span and this frame.
    fn eval_variable(self: &Rc<Self>, name: &str, span: &Span) -> EvalResult<Value> {
        self.lookup(name)
            .map(|value| self.stamp(value, span))
            .ok_or_else(|| self.raise(RuntimeErrorKind::UndefinedVariable(name.to_string()), span))
    }

    /// Binds `name` in this frame's own scope, shadowing any outer binding.
    fn eval_assignment(self: &Rc<Self>, name: &str, value: &Expr) -> EvalResult<()> {
        let value = self.eval_value(value)?;
        self.define(name, value.with_context(self));
        Ok(())
    }

    /// Returns `value` pointing at `span` and owned by this frame.
    #[must_use]
    pub fn stamp(self: &Rc<Self>, value: Value, span: &Span) -> Value {
        value.with_position(span.clone()).with_context(self)
    }

    /// Builds an error raised in this frame at `span`.
    #[must_use]
    pub fn raise(self: &Rc<Self>, kind: RuntimeErrorKind, span: &Span) -> RuntimeError {
        RuntimeError::new(kind, span.clone(), Some(Rc::clone(self)))
    }
}
