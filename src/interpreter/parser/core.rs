use crate::{
    ast::Expr,
    error::ParseError,
    interpreter::{
        lexer::{Keyword, Token, TokenKind},
        parser::{
            binary::parse_logical,
            utils::{expect_identifier, or_expected},
        },
    },
    span::Span,
};

pub type ParseResult<T> = Result<T, ParseError>;

/// Reported when a top-level expression cannot even begin.
pub(in crate::interpreter::parser) const EXPECTED_EXPRESSION: &str =
    "Expected 'var', 'not', int, float, string, identifier, '+', '-', '(', 'if', 'for', 'while' \
     or 'fn'";

/// Reported when no atom can start at the current token.
pub(in crate::interpreter::parser) const EXPECTED_ATOM: &str =
    "Expected int, float, string, identifier, '+', '-', '(', 'if', 'for', 'while' or 'fn'";

/// Reported when a complete expression is followed by more tokens.
pub(in crate::interpreter::parser) const EXPECTED_OPERATOR: &str =
    "Expected '+', '-', '*', '/', '**', comparison, 'and' or 'or'";

/// Reported when operators, brackets or blocks nest deeper than
/// [`MAX_NESTING`].
pub(in crate::interpreter::parser) const NESTED_TOO_DEEPLY: &str =
    "Expression is nested too deeply";

/// Deepest expression tree the parser builds.
///
/// Every sub-expression, prefix operator, folded binary operator and call
/// suffix counts as one level.
pub const MAX_NESTING: usize = 256;

/// A cursor over a token slice.
///
/// The slice always ends with [`TokenKind::EndOfInput`]; the cursor never
/// moves past it, so [`TokenStream::peek`] always has a token to return. The
/// cursor position doubles as the advancement counter the parser uses to
/// arbitrate between error messages.
#[derive(Debug, Clone)]
pub struct TokenStream<'a> {
    tokens: &'a [Token],
    eof:    &'a Token,
    index:  usize,
    depth:  usize,
}

impl<'a> TokenStream<'a> {
    /// Creates a cursor over `tokens`, or `None` if the slice is empty.
    #[must_use]
    pub fn new(tokens: &'a [Token]) -> Option<Self> {
        let eof = tokens.last()?;
        Some(Self { tokens,
                    eof,
                    index: 0,
                    depth: 0 })
    }

    /// The current token.
    #[must_use]
    pub fn peek(&self) -> &'a Token {
        self.tokens.get(self.index).unwrap_or(self.eof)
    }

    /// The kind of the current token.
    #[must_use]
    pub fn kind(&self) -> &'a TokenKind {
        &self.peek().kind
    }

    /// Number of tokens consumed so far.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Returns `true` once only the end-of-input token remains.
    #[must_use]
    pub fn at_end(&self) -> bool {
        matches!(self.kind(), TokenKind::EndOfInput)
    }

    /// Consumes and returns the current token.
    pub fn advance(&mut self) -> &'a Token {
        let token = self.peek();
        if !self.at_end() {
            self.index += 1;
        }
        token
    }

    /// Consumes the current token if it is `kind`.
    pub fn eat(&mut self, kind: &TokenKind) -> Option<&'a Token> {
        (self.kind() == kind).then(|| self.advance())
    }

    /// Consumes the current token if it is `keyword`.
    pub fn eat_keyword(&mut self, keyword: Keyword) -> Option<&'a Token> {
        self.kind().is_keyword(keyword).then(|| self.advance())
    }

    /// Consumes the current token if it is `kind`, failing with `message`
    /// otherwise.
    pub fn expect(&mut self, kind: &TokenKind, message: &str) -> ParseResult<&'a Token> {
        self.eat(kind).ok_or_else(|| self.error(message))
    }

    /// Consumes the current token if it is `keyword`, failing with `message`
    /// otherwise.
    pub fn expect_keyword(&mut self, keyword: Keyword, message: &str) -> ParseResult<&'a Token> {
        self.eat_keyword(keyword).ok_or_else(|| self.error(message))
    }

    /// Enters one more level of nesting.
    ///
    /// # Errors
    /// "Expression is nested too deeply" at the current token once
    /// [`MAX_NESTING`] levels are open. A failed parse is abandoned, so the
    /// depth is not restored on that path.
    pub fn descend(&mut self) -> ParseResult<()> {
        if self.depth >= MAX_NESTING {
            return Err(self.error(NESTED_TOO_DEEPLY));
        }
        self.depth += 1;
        Ok(())
    }

    /// Leaves `levels` levels entered with [`TokenStream::descend`].
    pub fn ascend(&mut self, levels: usize) {
        self.depth = self.depth.saturating_sub(levels);
    }

    /// A syntax error pointing at the current token.
    #[must_use]
    pub fn error(&self, message: &str) -> ParseError {
        ParseError::new(message, self.peek().span.clone())
    }
}

/// Parses a complete input into a single expression.
///
/// The whole token stream must be consumed. Anything left over after the
/// expression, up to the end-of-input token, is reported as one error
/// spanning all the leftover tokens.
///
/// # Parameters
/// - `tokens`: Output of [`crate::interpreter::lexer::tokenize`].
///
/// # Returns
/// The root of the expression tree.
///
/// # Example
/// ```
/// use std::rc::Rc;
///
/// use scenev::{
///     interpreter::{lexer::tokenize, parser::core::parse},
///     span::Source,
/// };
///
/// let tokens = tokenize(&Rc::new(Source::new("<stdin>", "1 + 2 * 3"))).unwrap();
/// assert!(parse(&tokens).is_ok());
///
/// let tokens = tokenize(&Rc::new(Source::new("<stdin>", "1 2"))).unwrap();
/// assert!(parse(&tokens).is_err());
/// ```
pub fn parse(tokens: &[Token]) -> ParseResult<Expr> {
    let Some(mut stream) = TokenStream::new(tokens) else {
        return Err(ParseError::new(EXPECTED_EXPRESSION, Span::synthetic("")));
    };
    log::trace!("parsing {} tokens", tokens.len());

    let expr = parse_expression(&mut stream)?;

    if !stream.at_end() {
        let first = stream.advance();
        let mut last = first;
        while !stream.at_end() {
            last = stream.advance();
        }
        return Err(ParseError::new(EXPECTED_OPERATOR, Span::merge(&first.span, &last.span)));
    }

    Ok(expr)
}

/// Parses a full expression.
///
/// This is the lowest precedence level: either a `var` assignment or a
/// logical expression.
///
/// Grammar: `expression := "var" IDENTIFIER "=" expression | logical`
///
/// # Parameters
/// - `tokens`: Token stream positioned at the first token of the expression.
///
/// # Returns
/// The parsed expression node.
pub fn parse_expression(tokens: &mut TokenStream<'_>) -> ParseResult<Expr> {
    tokens.descend()?;
    let expr = parse_assignment(tokens)?;
    tokens.ascend(1);
    Ok(expr)
}

fn parse_assignment(tokens: &mut TokenStream<'_>) -> ParseResult<Expr> {
    let entry = tokens.index();

    if let Some(var) = tokens.eat_keyword(Keyword::Var) {
        let name = expect_identifier(tokens)?;
        tokens.expect(&TokenKind::Eq, "Expected '='")?;
        let value = parse_expression(tokens)?;
        let span = Span::merge(&var.span, value.span());
        return Ok(Expr::VarAssign { name,
                                    value: Box::new(value),
                                    span });
    }

    let result = parse_logical(tokens);
    or_expected(tokens, entry, result, EXPECTED_EXPRESSION)
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::*;
    use crate::{
        ast::{BinaryOperator, NumberLiteral, UnaryOperator},
        interpreter::lexer::tokenize,
        span::Source,
    };

    fn parse_str(text: &str) -> ParseResult<Expr> {
        let tokens = tokenize(&Rc::new(Source::new("<test>", text))).unwrap();
        parse(&tokens)
    }

    fn message(text: &str) -> String {
        parse_str(text).unwrap_err().message
    }

    /// Renders the tree in a compact prefix form for structural assertions.
    fn shape(expr: &Expr) -> String {
        match expr {
            Expr::Number { value: NumberLiteral::Int(n), .. } => n.to_string(),
            Expr::Number { value: NumberLiteral::Float(x), .. } => format!("{x:?}"),
            Expr::String { value, .. } => format!("{value:?}"),
            Expr::VarAccess { name, .. } => name.clone(),
            Expr::VarAssign { name, value, .. } => format!("(var {name} {})", shape(value)),
            Expr::BinaryOp { left, op, right, .. } => {
                format!("({op} {} {})", shape(left), shape(right))
            },
            Expr::UnaryOp { op, operand, .. } => format!("({op} {})", shape(operand)),
            Expr::Call { callee, arguments, .. } => {
                let args: Vec<_> = arguments.iter().map(shape).collect();
                format!("(call {} [{}])", shape(callee), args.join(" "))
            },
            Expr::If { cases, else_body, .. } => {
                let mut out = String::from("(if");
                for case in cases {
                    out.push_str(&format!(" {} {}", shape(&case.condition), shape(&case.body)));
                }
                if let Some(body) = else_body {
                    out.push_str(&format!(" else {}", shape(body)));
                }
                out.push(')');
                out
            },
            Expr::For { context, .. } => format!("(for {} {} {} {} {})",
                                                 context.var,
                                                 shape(&context.start),
                                                 shape(&context.end),
                                                 context.step.as_deref().map_or("_".into(), shape),
                                                 shape(&context.body)),
            Expr::While { condition, body, .. } => {
                format!("(while {} {})", shape(condition), shape(body))
            },
            Expr::FuncDef { def, .. } => format!("(fn {} [{}] {})",
                                                 def.name.as_deref().unwrap_or("_"),
                                                 def.params.join(" "),
                                                 shape(&def.body)),
        }
    }

    fn parses_to(text: &str, expected: &str) {
        assert_eq!(shape(&parse_str(text).unwrap()), expected, "source: {text}");
    }

    #[test]
    fn precedence_ladder() {
        parses_to("2+3*4", "(+ 2 (* 3 4))");
        parses_to("(2+3)*4", "(* (+ 2 3) 4)");
        parses_to("1 < 2 and 3 >= 4 or 0", "(or (and (< 1 2) (>= 3 4)) 0)");
        parses_to("-2 ** 2", "(- (** 2 2))");
    }

    #[test]
    fn power_folds_left() {
        parses_to("2**3**2", "(** (** 2 3) 2)");
        parses_to("2 ** -1", "(** 2 (- 1))");
    }

    #[test]
    fn not_binds_at_comparison_level() {
        parses_to("not 1 == 2", "(not (== 1 2))");
        parses_to("1 + not 0", "(+ 1 (not 0))");
    }

    #[test]
    fn var_assignment_nests() {
        parses_to("var a = var b = 3", "(var a (var b 3))");
    }

    #[test]
    fn calls_and_functions() {
        parses_to("f()", "(call f [])");
        parses_to("add(1, 2 * 3)", "(call add [1 (* 2 3)])");
        parses_to("adder(3)(4)", "(call (call adder [3]) [4])");
        parses_to("fn add(a, b) { a + b }", "(fn add [a b] (+ a b))");
        parses_to("fn (x) { x }", "(fn _ [x] x)");
    }

    #[test]
    fn control_flow() {
        parses_to("if x { 1 } elif y { 2 } else { 3 }", "(if x 1 y 2 else 3)");
        parses_to("if x { 1 }", "(if x 1)");
        parses_to("for i = 0 in 10 -> 2 { i }", "(for i 0 10 2 i)");
        parses_to("for i = 0 in 3 { i }", "(for i 0 3 _ i)");
        parses_to("while x < 3 { var x = x + 1 }", "(while (< x 3) (var x (+ x 1)))");
    }

    #[test]
    fn unclosed_group_reports_missing_paren() {
        assert_eq!(message("(1+"), "Expected ')'");
        assert_eq!(message("(1"), "Expected ')'");
        assert_eq!(message("f(1,"), "Expected ')'");
        assert_eq!(message("while 1 { 2 +"), "Expected '}'");
        assert_eq!(message("("), "Expected ')'");
    }

    #[test]
    fn unclosed_group_keeps_specific_inner_message() {
        assert_eq!(message("(if 1 { 2 +"), "Expected '}'");
        assert_eq!(message("(var x"), "Expected '='");
        assert_eq!(message("f(var"), "Expected identifier");
        assert_eq!(message("fn f(a,"), "Expected identifier");
    }

    /// Runs `test` on a thread with the stack the interpreter is meant to
    /// run on.
    fn with_interpreter_stack(test: impl FnOnce() + Send + 'static) {
        std::thread::Builder::new().stack_size(crate::STACK_SIZE)
                                   .spawn(test)
                                   .unwrap()
                                   .join()
                                   .unwrap();
    }

    #[test]
    fn nesting_is_limited() {
        with_interpreter_stack(|| {
            let deep = format!("{}1{}", "(".repeat(50_000), ")".repeat(50_000));
            assert_eq!(message(&deep), NESTED_TOO_DEEPLY);
            assert_eq!(message(&"-".repeat(50_000)), NESTED_TOO_DEEPLY);
            assert_eq!(message(&"not ".repeat(50_000)), NESTED_TOO_DEEPLY);
            assert_eq!(message(&format!("f{}", "()".repeat(50_000))), NESTED_TOO_DEEPLY);
            assert_eq!(message(&vec!["1"; 50_000].join(" + ")), NESTED_TOO_DEEPLY);
        });
    }

    #[test]
    fn nesting_below_the_limit_parses() {
        with_interpreter_stack(|| {
            let depth = MAX_NESTING / 4;
            let nested = format!("{}1{}", "(".repeat(depth), ")".repeat(depth));
            parses_to(&nested, "1");
            let sum = vec!["1"; MAX_NESTING / 2].join(" + ");
            assert!(parse_str(&sum).is_ok());
            let siblings = vec!["(1)"; 4 * MAX_NESTING].join(", ");
            assert!(parse_str(&format!("f({siblings})")).is_ok());
        });
    }

    #[test]
    fn progress_keeps_inner_message() {
        assert!(message("1 + )").starts_with("Expected int, float"));
        assert_eq!(message("var 1"), "Expected identifier");
        assert_eq!(message("var x 1"), "Expected '='");
        assert_eq!(message("for i = 0 to 3 { i }"), "Expected 'in'");
        assert_eq!(message("if 1 2"), "Expected '{'");
    }

    #[test]
    fn empty_input_reports_generic_message() {
        assert_eq!(message(""), EXPECTED_EXPRESSION);
        assert_eq!(message(")"), EXPECTED_EXPRESSION);
    }

    #[test]
    fn leftover_tokens_are_one_error() {
        let err = parse_str("1 2 3").unwrap_err();
        assert_eq!(err.message, EXPECTED_OPERATOR);
        assert_eq!(err.span.text(), "2 3");
    }

    #[test]
    fn node_spans_cover_source() {
        let expr = parse_str("  foo(1, 2)  ").unwrap();
        assert_eq!(expr.span().text(), "foo(1, 2)");
        let expr = parse_str("if 1 { 2 } else { 3 }").unwrap();
        assert_eq!(expr.span().text(), "if 1 { 2 } else { 3 }");
        let expr = parse_str("-x").unwrap();
        assert!(matches!(expr, Expr::UnaryOp { op: UnaryOperator::Negate, .. }));
        let expr = parse_str("a / b").unwrap();
        assert!(matches!(expr, Expr::BinaryOp { op: BinaryOperator::Div, .. }));
    }
}
