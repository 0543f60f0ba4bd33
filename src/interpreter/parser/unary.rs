use std::rc::Rc;

use crate::{
    ast::{Expr, NumberLiteral, UnaryOperator},
    interpreter::{
        lexer::{Keyword, TokenKind},
        parser::{
            binary::parse_power,
            control::{parse_for, parse_function, parse_if, parse_while},
            core::{EXPECTED_ATOM, ParseResult, TokenStream, parse_expression},
            utils::{parse_comma_separated, parse_enclosed},
        },
    },
    span::Span,
};

/// Parses prefix operators.
///
/// `+`, `-` and `not` may be stacked (`- - x`, `not -x`); each applies to the
/// unary expression after it.
///
/// The rule is: `unary := ("+" | "-" | "not") unary | power`
///
/// # Parameters
/// - `tokens`: Token stream positioned at the operator or operand.
///
/// # Returns
/// An `Expr::UnaryOp`, or the power-level expression when no prefix is
/// present.
pub fn parse_unary(tokens: &mut TokenStream<'_>) -> ParseResult<Expr> {
    let op = match tokens.kind() {
        TokenKind::Plus => UnaryOperator::Plus,
        TokenKind::Minus => UnaryOperator::Negate,
        TokenKind::Keyword(Keyword::Not) => UnaryOperator::Not,
        _ => return parse_power(tokens),
    };
    prefixed(tokens, op, parse_unary)
}

/// Parses the right operand of `**`: a call with optional `+`/`-` prefixes.
///
/// The rule is: `signed_call := ("+" | "-") signed_call | call`
pub fn parse_signed_call(tokens: &mut TokenStream<'_>) -> ParseResult<Expr> {
    let op = match tokens.kind() {
        TokenKind::Plus => UnaryOperator::Plus,
        TokenKind::Minus => UnaryOperator::Negate,
        _ => return parse_call(tokens),
    };
    prefixed(tokens, op, parse_signed_call)
}

fn prefixed(tokens: &mut TokenStream<'_>,
            op: UnaryOperator,
            operand: fn(&mut TokenStream<'_>) -> ParseResult<Expr>)
            -> ParseResult<Expr> {
    let op_token = tokens.advance();
    tokens.descend()?;
    let operand = operand(tokens)?;
    tokens.ascend(1);
    let span = Span::merge(&op_token.span, operand.span());
    Ok(Expr::UnaryOp { op,
                       operand: Box::new(operand),
                       span })
}

/// Parses an atom followed by any number of call suffixes.
///
/// `f(1)(2)` calls the result of `f(1)` with `2`.
///
/// The rule is: `call := atom ("(" [expression ("," expression)*] ")")*`
pub fn parse_call(tokens: &mut TokenStream<'_>) -> ParseResult<Expr> {
    let mut callee = parse_atom(tokens)?;
    let mut suffixes = 0;

    while tokens.eat(&TokenKind::LParen).is_some() {
        tokens.descend()?;
        suffixes += 1;
        let (arguments, close) = parse_comma_separated(tokens, parse_expression)?;
        let span = Span::merge(callee.span(), &close.span);
        callee = Expr::Call { callee: Box::new(callee),
                              arguments,
                              span };
    }

    tokens.ascend(suffixes);
    Ok(callee)
}

/// Parses an atom: a literal, a name, a parenthesised expression or one of
/// the keyword-introduced forms.
///
/// The rule is:
/// `atom := INT | FLOAT | STRING | IDENTIFIER | "(" expression ")" | if | for | while | fn`
pub fn parse_atom(tokens: &mut TokenStream<'_>) -> ParseResult<Expr> {
    let token = tokens.peek();
    let span = token.span.clone();

    let expr = match &token.kind {
        TokenKind::Int(n) => Expr::Number { value: NumberLiteral::Int(*n),
                                            span },
        TokenKind::Float(x) => Expr::Number { value: NumberLiteral::Float(*x),
                                              span },
        TokenKind::Str(s) => Expr::String { value: Rc::from(s.as_str()),
                                            span },
        TokenKind::Identifier(name) => Expr::VarAccess { name: name.clone(),
                                                         span },
        TokenKind::LParen => {
            tokens.advance();
            let (inner, _) = parse_enclosed(tokens, &TokenKind::RParen, "Expected ')'")?;
            return Ok(inner);
        },
        TokenKind::Keyword(Keyword::If) => return parse_if(tokens),
        TokenKind::Keyword(Keyword::For) => return parse_for(tokens),
        TokenKind::Keyword(Keyword::While) => return parse_while(tokens),
        TokenKind::Keyword(Keyword::Fn) => return parse_function(tokens),
        _ => return Err(tokens.error(EXPECTED_ATOM)),
    };

    tokens.advance();
    Ok(expr)
}
