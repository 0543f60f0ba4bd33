use std::{fmt, rc::Rc};

use crate::span::Span;

/// A numeric literal exactly as it appeared in the source.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumberLiteral {
    /// A 64-bit signed integer literal.
    Int(i64),
    /// A 64-bit floating-point literal.
    Float(f64),
}

/// An abstract syntax tree (AST) node representing an expression.
///
/// The language has no statements: assignments, loops and function
/// definitions are all expressions. Every variant records the span running
/// from the start of its first token to the end of its last one. Nodes are
/// never mutated after the parser builds them.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A numeric literal.
    Number {
        /// The constant value.
        value: NumberLiteral,
        /// Location in the source code.
        span:  Span,
    },
    /// A string literal, escapes already decoded.
    String {
        /// The decoded text.
        value: Rc<str>,
        /// Location in the source code.
        span:  Span,
    },
    /// Reference to a variable by name.
    VarAccess {
        /// Name of the variable.
        name: String,
        /// Location in the source code.
        span: Span,
    },
    /// `var name = value`
    VarAssign {
        /// Name of the variable.
        name:  String,
        /// The expression whose value is bound.
        value: Box<Self>,
        /// Location in the source code.
        span:  Span,
    },
    /// A binary operation such as `a + b` or `a and b`.
    BinaryOp {
        /// Left operand.
        left:  Box<Self>,
        /// The operator.
        op:    BinaryOperator,
        /// Right operand.
        right: Box<Self>,
        /// Location in the source code.
        span:  Span,
    },
    /// A prefix operation such as `-x` or `not x`.
    UnaryOp {
        /// The operator.
        op:      UnaryOperator,
        /// The operand expression.
        operand: Box<Self>,
        /// Location in the source code.
        span:    Span,
    },
    /// `if c { a } elif d { b } else { e }`
    If {
        /// Condition/body pairs in declaration order. Never empty.
        cases:     Vec<IfCase>,
        /// Body evaluated when no case matched.
        else_body: Option<Box<Self>>,
        /// Location in the source code.
        span:      Span,
    },
    /// `for name = start in end -> step { body }`
    For {
        /// Loop header and body.
        context: ForExprContext,
        /// Location in the source code.
        span:    Span,
    },
    /// `while condition { body }`
    While {
        /// Loop condition.
        condition: Box<Self>,
        /// Loop body.
        body:      Box<Self>,
        /// Location in the source code.
        span:      Span,
    },
    /// `fn name(params) { body }`
    FuncDef {
        /// Shared definition, captured by every function value built from it.
        def:  Rc<FunctionDef>,
        /// Location in the source code.
        span: Span,
    },
    /// `callee(args)`
    Call {
        /// The expression producing the function to call.
        callee:    Box<Self>,
        /// Argument expressions, evaluated left to right.
        arguments: Vec<Self>,
        /// Location in the source code.
        span:      Span,
    },
}

impl Expr {
    /// Gets the source span of `self`.
    #[must_use]
    pub const fn span(&self) -> &Span {
        match self {
            Self::Number { span, .. }
            | Self::String { span, .. }
            | Self::VarAccess { span, .. }
            | Self::VarAssign { span, .. }
            | Self::BinaryOp { span, .. }
            | Self::UnaryOp { span, .. }
            | Self::If { span, .. }
            | Self::For { span, .. }
            | Self::While { span, .. }
            | Self::FuncDef { span, .. }
            | Self::Call { span, .. } => span,
        }
    }
}

/// One `if`/`elif` arm.
#[derive(Debug, Clone, PartialEq)]
pub struct IfCase {
    /// Condition tested for truthiness.
    pub condition: Expr,
    /// Body evaluated when the condition holds.
    pub body:      Expr,
}

/// Header and body of a `for` expression.
#[derive(Debug, Clone, PartialEq)]
pub struct ForExprContext {
    /// The loop variable name.
    pub var:   String,
    /// Initial value of the loop variable.
    pub start: Box<Expr>,
    /// Inclusive bound of the loop variable.
    pub end:   Box<Expr>,
    /// Increment per iteration; `1` when absent.
    pub step:  Option<Box<Expr>>,
    /// The expression evaluated once per iteration.
    pub body:  Box<Expr>,
}

/// A user-defined function, named or anonymous.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDef {
    /// The name of the function, if one was given.
    pub name:   Option<String>,
    /// The parameter names, in order.
    pub params: Vec<String>,
    /// The body expression evaluated when the function is called.
    pub body:   Expr,
}

/// Represents a binary operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BinaryOperator {
    /// Addition or string concatenation (`+`)
    Add,
    /// Subtraction (`-`)
    Sub,
    /// Multiplication (`*`)
    Mul,
    /// Division or string indexing (`/`)
    Div,
    /// Exponentiation (`**`)
    Pow,
    /// Equal to (`==`)
    Equal,
    /// Not equal to (`!=`)
    NotEqual,
    /// Less than (`<`)
    Less,
    /// Greater than (`>`)
    Greater,
    /// Less than or equal (`<=`)
    LessEqual,
    /// Greater than or equal (`>=`)
    GreaterEqual,
    /// Logical and (`and`)
    And,
    /// Logical or (`or`)
    Or,
}

/// Represents a unary operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum UnaryOperator {
    /// Unary plus (`+x`), leaves the operand unchanged.
    Plus,
    /// Arithmetic negation (`-x`).
    Negate,
    /// Logical NOT (`not x`).
    Not,
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use BinaryOperator::{
            Add, And, Div, Equal, Greater, GreaterEqual, Less, LessEqual, Mul, NotEqual, Or, Pow,
            Sub,
        };
        let operator = match self {
            Add => "+",
            Sub => "-",
            Mul => "*",
            Div => "/",
            Pow => "**",
            Equal => "==",
            NotEqual => "!=",
            Less => "<",
            Greater => ">",
            LessEqual => "<=",
            GreaterEqual => ">=",
            And => "and",
            Or => "or",
        };
        write!(f, "{operator}")
    }
}

impl fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let operator = match self {
            Self::Plus => "+",
            Self::Negate => "-",
            Self::Not => "not",
        };
        write!(f, "{operator}")
    }
}
