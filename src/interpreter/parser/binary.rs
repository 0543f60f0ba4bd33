use crate::{
    ast::{BinaryOperator, Expr, UnaryOperator},
    interpreter::{
        lexer::{Keyword, TokenKind},
        parser::{
            core::{ParseResult, TokenStream},
            unary::{parse_call, parse_signed_call, parse_unary},
        },
    },
    span::Span,
};

/// A parsing function for one precedence level.
type Rule = fn(&mut TokenStream<'_>) -> ParseResult<Expr>;

/// Parses logical expressions.
///
/// `and` and `or` share one precedence level and fold left to right.
///
/// The rule is: `logical := comparison (("and" | "or") comparison)*`
pub fn parse_logical(tokens: &mut TokenStream<'_>) -> ParseResult<Expr> {
    parse_binary_level(tokens, parse_comparison, &[BinaryOperator::And, BinaryOperator::Or], None)
}

/// Parses comparison expressions, or a `not` applied to one.
///
/// The rule is:
/// `comparison := "not" comparison | additive (("==" | "!=" | "<" | ">" | "<=" | ">=") additive)*`
pub fn parse_comparison(tokens: &mut TokenStream<'_>) -> ParseResult<Expr> {
    use BinaryOperator::{Equal, Greater, GreaterEqual, Less, LessEqual, NotEqual};

    if let Some(not) = tokens.eat_keyword(Keyword::Not) {
        tokens.descend()?;
        let operand = parse_comparison(tokens)?;
        tokens.ascend(1);
        let span = Span::merge(&not.span, operand.span());
        return Ok(Expr::UnaryOp { op: UnaryOperator::Not,
                                  operand: Box::new(operand),
                                  span });
    }
    parse_binary_level(tokens,
                       parse_additive,
                       &[Equal, NotEqual, Less, Greater, LessEqual, GreaterEqual],
                       None)
}

/// Parses addition and subtraction expressions.
///
/// The rule is: `additive := multiplicative (("+" | "-") multiplicative)*`
pub fn parse_additive(tokens: &mut TokenStream<'_>) -> ParseResult<Expr> {
    parse_binary_level(tokens,
                       parse_multiplicative,
                       &[BinaryOperator::Add, BinaryOperator::Sub],
                       None)
}

/// Parses multiplication and division expressions.
///
/// The rule is: `multiplicative := unary (("*" | "/") unary)*`
pub fn parse_multiplicative(tokens: &mut TokenStream<'_>) -> ParseResult<Expr> {
    parse_binary_level(tokens, parse_unary, &[BinaryOperator::Mul, BinaryOperator::Div], None)
}

/// Parses exponentiation.
///
/// Power folds to the left, so `2 ** 3 ** 2` is `(2 ** 3) ** 2`. The right
/// operand may carry prefix signs, which makes `2 ** -1` valid.
///
/// The rule is: `power := call ("**" signed_call)*`
pub fn parse_power(tokens: &mut TokenStream<'_>) -> ParseResult<Expr> {
    parse_binary_level(tokens, parse_call, &[BinaryOperator::Pow], Some(parse_signed_call))
}

/// The generic left-folding loop shared by every binary precedence level.
///
/// Parses one operand with `operand`, then, while the current token is one
/// of `operators`, consumes it, parses the right operand with `right` (or
/// `operand` again) and folds both into a [`Expr::BinaryOp`]. Each fold
/// deepens the tree by one level.
///
/// # Parameters
/// - `tokens`: Token stream positioned at the first operand.
/// - `operand`: Rule for the next tighter precedence level.
/// - `operators`: Operators accepted at this level.
/// - `right`: Rule for right operands, when it differs from `operand`.
///
/// # Returns
/// A left-associative tree of binary operations.
fn parse_binary_level(tokens: &mut TokenStream<'_>,
                      operand: Rule,
                      operators: &[BinaryOperator],
                      right: Option<Rule>)
                      -> ParseResult<Expr> {
    let right_rule = right.unwrap_or(operand);
    let mut left = operand(tokens)?;
    let mut folds = 0;

    while let Some(op) = token_to_binary_operator(tokens.kind())
          && operators.contains(&op)
    {
        tokens.advance();
        tokens.descend()?;
        folds += 1;
        let right = right_rule(tokens)?;
        let span = Span::merge(left.span(), right.span());
        left = Expr::BinaryOp { left: Box::new(left),
                                op,
                                right: Box::new(right),
                                span };
    }

    tokens.ascend(folds);
    Ok(left)
}

/// Maps a token to the binary operator it spells, if any.
#[must_use]
pub const fn token_to_binary_operator(kind: &TokenKind) -> Option<BinaryOperator> {
    use BinaryOperator::{
        Add, And, Div, Equal, Greater, GreaterEqual, Less, LessEqual, Mul, NotEqual, Or, Pow, Sub,
    };
    Some(match kind {
        TokenKind::Plus => Add,
        TokenKind::Minus => Sub,
        TokenKind::Mul => Mul,
        TokenKind::Div => Div,
        TokenKind::Pow => Pow,
        TokenKind::EqEq => Equal,
        TokenKind::NotEq => NotEqual,
        TokenKind::Lt => Less,
        TokenKind::Gt => Greater,
        TokenKind::LtEq => LessEqual,
        TokenKind::GtEq => GreaterEqual,
        TokenKind::Keyword(Keyword::And) => And,
        TokenKind::Keyword(Keyword::Or) => Or,
        _ => return None,
    })
}
