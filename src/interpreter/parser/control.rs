use std::rc::Rc;

use crate::{
    ast::{Expr, ForExprContext, FunctionDef, IfCase},
    interpreter::{
        lexer::{Keyword, TokenKind},
        parser::{
            core::{ParseResult, TokenStream, parse_expression},
            utils::{expect_identifier, parse_block, parse_comma_separated},
        },
    },
    span::Span,
};

/// Parses an `if` expression with any number of `elif` arms and an optional
/// `else`.
///
/// Syntax:
/// ```text
///     if <condition> { <expr> }
///     elif <condition> { <expr> }
///     else { <expr> }
/// ```
///
/// # Parameters
/// - `tokens`: Token stream positioned at the `if` keyword.
///
/// # Returns
/// An `Expr::If` node spanning from `if` to the last closing brace.
///
/// # Errors
/// "Expected '{'" or "Expected '}'" around any body, and any error from the
/// conditions or bodies themselves.
pub fn parse_if(tokens: &mut TokenStream<'_>) -> ParseResult<Expr> {
    let if_token = tokens.expect_keyword(Keyword::If, "Expected 'if'")?;

    let mut cases = Vec::new();
    let condition = parse_expression(tokens)?;
    let (body, mut close) = parse_block(tokens)?;
    cases.push(IfCase { condition, body });

    while tokens.eat_keyword(Keyword::Elif).is_some() {
        let condition = parse_expression(tokens)?;
        let (body, elif_close) = parse_block(tokens)?;
        cases.push(IfCase { condition, body });
        close = elif_close;
    }

    let mut else_body = None;
    if tokens.eat_keyword(Keyword::Else).is_some() {
        let (body, else_close) = parse_block(tokens)?;
        else_body = Some(Box::new(body));
        close = else_close;
    }

    Ok(Expr::If { cases,
                  else_body,
                  span: Span::merge(&if_token.span, &close.span) })
}

/// Parses a counting loop.
///
/// Syntax: `for <name> = <start> in <end> [-> <step>] { <body> }`
///
/// The bound is exclusive and the step defaults to `1` at evaluation time.
///
/// # Parameters
/// - `tokens`: Token stream positioned at the `for` keyword.
///
/// # Returns
/// An `Expr::For` node.
pub fn parse_for(tokens: &mut TokenStream<'_>) -> ParseResult<Expr> {
    let for_token = tokens.expect_keyword(Keyword::For, "Expected 'for'")?;
    let var = expect_identifier(tokens)?;
    tokens.expect(&TokenKind::Eq, "Expected '='")?;
    let start = parse_expression(tokens)?;
    tokens.expect_keyword(Keyword::In, "Expected 'in'")?;
    let end = parse_expression(tokens)?;

    let step = match tokens.eat(&TokenKind::Arrow) {
        Some(_) => Some(Box::new(parse_expression(tokens)?)),
        None => None,
    };

    let (body, close) = parse_block(tokens)?;

    Ok(Expr::For { context: ForExprContext { var,
                                             start: Box::new(start),
                                             end: Box::new(end),
                                             step,
                                             body: Box::new(body) },
                   span:    Span::merge(&for_token.span, &close.span), })
}

/// Parses a `while <condition> { <body> }` loop.
pub fn parse_while(tokens: &mut TokenStream<'_>) -> ParseResult<Expr> {
    let while_token = tokens.expect_keyword(Keyword::While, "Expected 'while'")?;
    let condition = parse_expression(tokens)?;
    let (body, close) = parse_block(tokens)?;

    Ok(Expr::While { condition: Box::new(condition),
                     body:      Box::new(body),
                     span:      Span::merge(&while_token.span, &close.span), })
}

/// Parses a function definition.
///
/// Syntax: `fn [<name>] ( [<param> (, <param>)*] ) { <body> }`
///
/// The name is optional; an anonymous function is only reachable through the
/// value the expression produces.
///
/// # Parameters
/// - `tokens`: Token stream positioned at the `fn` keyword.
///
/// # Returns
/// An `Expr::FuncDef` node holding a shared [`FunctionDef`].
pub fn parse_function(tokens: &mut TokenStream<'_>) -> ParseResult<Expr> {
    let fn_token = tokens.expect_keyword(Keyword::Fn, "Expected 'fn'")?;

    let name = match tokens.kind() {
        TokenKind::Identifier(name) => {
            tokens.advance();
            Some(name.clone())
        },
        _ => None,
    };

    let open_message = if name.is_some() { "Expected '('" } else { "Expected identifier or '('" };
    tokens.expect(&TokenKind::LParen, open_message)?;
    let (params, _) = parse_comma_separated(tokens, expect_identifier)?;
    let (body, close) = parse_block(tokens)?;

    log::trace!("parsed function {} with {} parameter(s)",
                name.as_deref().unwrap_or("<anonymous>"),
                params.len());

    Ok(Expr::FuncDef { def:  Rc::new(FunctionDef { name, params, body }),
                       span: Span::merge(&fn_token.span, &close.span), })
}
