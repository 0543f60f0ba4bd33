use crate::{
    ast::Expr,
    error::ParseError,
    interpreter::{
        lexer::{Token, TokenKind},
        parser::core::{
            EXPECTED_ATOM, EXPECTED_EXPRESSION, ParseResult, TokenStream, parse_expression,
        },
    },
};

/// Chooses between a sub-rule's error and the enclosing rule's message.
///
/// If the sub-rule failed without the enclosing rule having consumed any
/// token since `entry`, the more general `message` is reported at the
/// current token. Otherwise the sub-rule made progress and its own, more
/// specific error stands.
///
/// # Parameters
/// - `tokens`: The token stream, positioned where the sub-rule stopped.
/// - `entry`: Stream index recorded when the enclosing rule started.
/// - `result`: The sub-rule's outcome.
/// - `message`: The enclosing rule's "Expected ..." message.
pub(in crate::interpreter::parser) fn or_expected<T>(tokens: &TokenStream<'_>,
                                                     entry: usize,
                                                     result: ParseResult<T>,
                                                     message: &str)
                                                     -> ParseResult<T> {
    result.map_err(|err| if tokens.index() == entry { tokens.error(message) } else { err })
}

/// Returns `true` if `err` only says that an operand was missing where the
/// input ended.
///
/// Inside a group this is better reported as the missing closing delimiter.
/// Any more specific failure, such as `(var x` lacking its `=`, is kept.
fn missing_operand_at_end(tokens: &TokenStream<'_>, err: &ParseError) -> bool {
    tokens.at_end() && (err.message == EXPECTED_ATOM || err.message == EXPECTED_EXPRESSION)
}

/// Parses an expression that must be followed by `closing`.
///
/// If the inner expression stops at the end of input for want of an
/// operand, the missing closing delimiter is reported instead, so `(1+`
/// reads "Expected ')'".
///
/// # Returns
/// The inner expression and the closing token.
pub(in crate::interpreter::parser) fn parse_enclosed<'a>(tokens: &mut TokenStream<'a>,
                                                         closing: &TokenKind,
                                                         message: &str)
                                                         -> ParseResult<(Expr, &'a Token)> {
    let inner = match parse_expression(tokens) {
        Err(err) if missing_operand_at_end(tokens, &err) => return Err(tokens.error(message)),
        result => result?,
    };
    let close = tokens.expect(closing, message)?;
    Ok((inner, close))
}

/// Parses a `{ expr }` body.
///
/// # Returns
/// The body expression and the closing `}` token.
pub(in crate::interpreter::parser) fn parse_block<'a>(tokens: &mut TokenStream<'a>)
                                                      -> ParseResult<(Expr, &'a Token)> {
    tokens.expect(&TokenKind::LBrace, "Expected '{'")?;
    parse_enclosed(tokens, &TokenKind::RBrace, "Expected '}'")
}

/// Parses a comma-separated list of items up to and including `)`.
///
/// This utility is shared by parameter lists and call arguments. An
/// immediately encountered `)` produces an empty list. An item left without
/// an operand at the end of input reports the missing `)`.
///
/// Grammar (simplified): `list := [item ("," item)*] ")"`
///
/// # Parameters
/// - `tokens`: Token stream positioned just after the opening `(`.
/// - `parse_item`: Function used to parse each list element.
///
/// # Returns
/// The parsed items and the closing `)` token.
pub(in crate::interpreter::parser) fn parse_comma_separated<'a, T>(
    tokens: &mut TokenStream<'a>,
    parse_item: impl Fn(&mut TokenStream<'a>) -> ParseResult<T>)
    -> ParseResult<(Vec<T>, &'a Token)> {
    let mut items = Vec::new();
    if let Some(close) = tokens.eat(&TokenKind::RParen) {
        return Ok((items, close));
    }
    loop {
        match parse_item(tokens) {
            Ok(item) => items.push(item),
            Err(err) if missing_operand_at_end(tokens, &err) => {
                return Err(tokens.error("Expected ')'"));
            },
            Err(err) => return Err(err),
        }
        if tokens.eat(&TokenKind::Comma).is_some() {
            continue;
        }
        let close = tokens.expect(&TokenKind::RParen, "Expected ',' or ')'")?;
        return Ok((items, close));
    }
}

/// Parses a plain identifier and returns its name.
///
/// # Errors
/// "Expected identifier" if the current token is anything else, including a
/// keyword.
pub(in crate::interpreter::parser) fn expect_identifier(tokens: &mut TokenStream<'_>)
                                                        -> ParseResult<String> {
    match tokens.kind() {
        TokenKind::Identifier(name) => {
            tokens.advance();
            Ok(name.clone())
        },
        _ => Err(tokens.error("Expected identifier")),
    }
}
