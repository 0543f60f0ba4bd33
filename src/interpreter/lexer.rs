use std::{fmt, rc::Rc};

use logos::Logos;

use crate::{
    error::{LexError, LexErrorKind, LexResult},
    span::{Position, Source, Span},
};

/// Reserved words of the language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    /// `var`
    Var,
    /// `and`
    And,
    /// `or`
    Or,
    /// `not`
    Not,
    /// `if`
    If,
    /// `elif`
    Elif,
    /// `else`
    Else,
    /// `fn`
    Fn,
    /// `while`
    While,
    /// `for`
    For,
    /// `in`
    In,
}

impl Keyword {
    /// Looks up the keyword spelled by `word`, if any.
    ///
    /// # Example
    /// ```
    /// use scenev::interpreter::lexer::Keyword;
    ///
    /// assert_eq!(Keyword::from_word("elif"), Some(Keyword::Elif));
    /// assert_eq!(Keyword::from_word("elsewhere"), None);
    /// ```
    #[must_use]
    pub fn from_word(word: &str) -> Option<Self> {
        Some(match word {
            "var" => Self::Var,
            "and" => Self::And,
            "or" => Self::Or,
            "not" => Self::Not,
            "if" => Self::If,
            "elif" => Self::Elif,
            "else" => Self::Else,
            "fn" => Self::Fn,
            "while" => Self::While,
            "for" => Self::For,
            "in" => Self::In,
            _ => return None,
        })
    }

    /// The source spelling of the keyword.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Var => "var",
            Self::And => "and",
            Self::Or => "or",
            Self::Not => "not",
            Self::If => "if",
            Self::Elif => "elif",
            Self::Else => "else",
            Self::Fn => "fn",
            Self::While => "while",
            Self::For => "for",
            Self::In => "in",
        }
    }
}

/// The kind of a lexical token, together with its literal value.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    /// Integer literal such as `42`.
    Int(i64),
    /// Floating-point literal such as `3.5` or `2.`.
    Float(f64),
    /// String literal with escapes already decoded.
    Str(String),
    /// Variable or function name.
    Identifier(String),
    /// Reserved word.
    Keyword(Keyword),
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Mul,
    /// `/`
    Div,
    /// `**`
    Pow,
    /// `=`
    Eq,
    /// `==`
    EqEq,
    /// `!=`
    NotEq,
    /// `<`
    Lt,
    /// `>`
    Gt,
    /// `<=`
    LtEq,
    /// `>=`
    GtEq,
    /// `->`
    Arrow,
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `{`
    LBrace,
    /// `}`
    RBrace,
    /// `,`
    Comma,
    /// End of the token stream. Always the last token.
    EndOfInput,
}

impl TokenKind {
    /// Returns `true` if this token is the given keyword.
    #[must_use]
    pub fn is_keyword(&self, keyword: Keyword) -> bool {
        matches!(self, Self::Keyword(k) if *k == keyword)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(n) => write!(f, "INT:{n}"),
            Self::Float(x) => write!(f, "FLOAT:{x}"),
            Self::Str(s) => write!(f, "STRING:{s:?}"),
            Self::Identifier(name) => write!(f, "IDENTIFIER:{name}"),
            Self::Keyword(k) => write!(f, "KEYWORD:{}", k.as_str()),
            Self::Plus => write!(f, "'+'"),
            Self::Minus => write!(f, "'-'"),
            Self::Mul => write!(f, "'*'"),
            Self::Div => write!(f, "'/'"),
            Self::Pow => write!(f, "'**'"),
            Self::Eq => write!(f, "'='"),
            Self::EqEq => write!(f, "'=='"),
            Self::NotEq => write!(f, "'!='"),
            Self::Lt => write!(f, "'<'"),
            Self::Gt => write!(f, "'>'"),
            Self::LtEq => write!(f, "'<='"),
            Self::GtEq => write!(f, "'>='"),
            Self::Arrow => write!(f, "'->'"),
            Self::LParen => write!(f, "'('"),
            Self::RParen => write!(f, "')'"),
            Self::LBrace => write!(f, "'{{'"),
            Self::RBrace => write!(f, "'}}'"),
            Self::Comma => write!(f, "','"),
            Self::EndOfInput => write!(f, "end of input"),
        }
    }
}

/// A lexical token: its kind (with literal value) and where it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// What was scanned.
    pub kind: TokenKind,
    /// Where it was scanned.
    pub span: Span,
}

/// Failure reported by the raw scanner before positions are attached.
#[derive(Debug, Clone, PartialEq, Default)]
enum ScanFault {
    #[default]
    Illegal,
    NumberTooLarge,
}

/// Raw lexemes recognised by the scanner.
///
/// Keywords are not separated from identifiers here; the word is classified
/// when the [`Token`] is built.
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(error = ScanFault)]
#[logos(skip r"[ \t\r\n]+")]
enum Lexeme {
    #[regex(r"[0-9]+\.[0-9]*", |lex| lex.slice().parse::<f64>().map_err(|_| ScanFault::Illegal))]
    Float(f64),
    #[regex(r"[0-9]+", |lex| lex.slice().parse::<i64>().map_err(|_| ScanFault::NumberTooLarge))]
    Int(i64),
    #[regex(r"[a-zA-Z][a-zA-Z0-9_]*", |lex| lex.slice().to_string())]
    Word(String),
    #[regex(r#""([^"\\]|\\.)*""#, |lex| decode_string(lex.slice()))]
    Str(String),
    #[regex(r#""([^"\\]|\\.)*\\?"#)]
    UnterminatedStr,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Mul,
    #[token("/")]
    Div,
    #[token("**")]
    Pow,
    #[token("=")]
    Eq,
    #[token("==")]
    EqEq,
    #[token("!=")]
    NotEq,
    #[token("!")]
    Bang,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token("<=")]
    LtEq,
    #[token(">=")]
    GtEq,
    #[token("->")]
    Arrow,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token(",")]
    Comma,
}

/// Decodes the body of a quoted string literal.
///
/// `\n` becomes a newline and `\t` a tab. Any other escaped character is
/// dropped: `"a\qb"` decodes to `ab`.
fn decode_string(quoted: &str) -> String {
    let body = &quoted[1..quoted.len() - 1];
    let mut decoded = String::with_capacity(body.len());
    let mut chars = body.chars();

    while let Some(ch) = chars.next() {
        if ch == '\\' {
            match chars.next() {
                Some('n') => decoded.push('\n'),
                Some('t') => decoded.push('\t'),
                _ => {},
            }
        } else {
            decoded.push(ch);
        }
    }

    decoded
}

/// Scans `source` into a token sequence ending in [`TokenKind::EndOfInput`].
///
/// Lexing stops at the first character that cannot start a token.
///
/// # Errors
/// - `IllegalCharacter` for characters outside the token set.
/// - `ExpectedCharacter` for `!` without a following `=`.
/// - `UnterminatedString` for a string literal without its closing quote.
/// - `InvalidNumber` for an integer literal that does not fit in 64 bits.
///
/// # Example
/// ```
/// use std::rc::Rc;
///
/// use scenev::{
///     interpreter::lexer::{TokenKind, tokenize},
///     span::Source,
/// };
///
/// let tokens = tokenize(&Rc::new(Source::new("<stdin>", "12+3.5*2"))).unwrap();
/// let kinds: Vec<_> = tokens.into_iter().map(|t| t.kind).collect();
///
/// assert_eq!(kinds,
///            vec![TokenKind::Int(12),
///                 TokenKind::Plus,
///                 TokenKind::Float(3.5),
///                 TokenKind::Mul,
///                 TokenKind::Int(2),
///                 TokenKind::EndOfInput]);
/// ```
pub fn tokenize(source: &Rc<Source>) -> LexResult<Vec<Token>> {
    let text = source.text.as_str();
    let mut lexer = Lexeme::lexer(text);
    let mut tokens = Vec::new();
    let mut cursor = Cursor::new(text);

    while let Some(result) = lexer.next() {
        let range = lexer.span();
        let start = cursor.seek(range.start);
        let end = cursor.seek(range.end);
        let span = Span::new(Rc::clone(source), start, end);

        let lexeme = match result {
            Ok(lexeme) => lexeme,
            Err(ScanFault::NumberTooLarge) => {
                return Err(LexError::new(LexErrorKind::InvalidNumber(lexer.slice().to_string()),
                                         span));
            },
            Err(ScanFault::Illegal) => {
                let ch = lexer.slice().chars().next().unwrap_or('\0');
                let end = start.advance(ch);
                return Err(LexError::new(LexErrorKind::IllegalCharacter(ch),
                                         Span::new(Rc::clone(source), start, end)));
            },
        };

        let kind = match lexeme {
            Lexeme::Float(x) => TokenKind::Float(x),
            Lexeme::Int(n) => TokenKind::Int(n),
            Lexeme::Word(word) => match Keyword::from_word(&word) {
                Some(keyword) => TokenKind::Keyword(keyword),
                None => TokenKind::Identifier(word),
            },
            Lexeme::Str(s) => TokenKind::Str(s),
            Lexeme::UnterminatedStr => {
                let at = Span::new(Rc::clone(source), end, end);
                return Err(LexError::new(LexErrorKind::UnterminatedString, at));
            },
            Lexeme::Bang => {
                return Err(LexError::new(LexErrorKind::ExpectedCharacter { expected: '=',
                                                                           after:    '!', },
                                         span));
            },
            Lexeme::Plus => TokenKind::Plus,
            Lexeme::Minus => TokenKind::Minus,
            Lexeme::Mul => TokenKind::Mul,
            Lexeme::Div => TokenKind::Div,
            Lexeme::Pow => TokenKind::Pow,
            Lexeme::Eq => TokenKind::Eq,
            Lexeme::EqEq => TokenKind::EqEq,
            Lexeme::NotEq => TokenKind::NotEq,
            Lexeme::Lt => TokenKind::Lt,
            Lexeme::Gt => TokenKind::Gt,
            Lexeme::LtEq => TokenKind::LtEq,
            Lexeme::GtEq => TokenKind::GtEq,
            Lexeme::Arrow => TokenKind::Arrow,
            Lexeme::LParen => TokenKind::LParen,
            Lexeme::RParen => TokenKind::RParen,
            Lexeme::LBrace => TokenKind::LBrace,
            Lexeme::RBrace => TokenKind::RBrace,
            Lexeme::Comma => TokenKind::Comma,
        };

        tokens.push(Token { kind, span });
    }

    let end = cursor.seek(text.len());
    tokens.push(Token { kind: TokenKind::EndOfInput,
                        span: Span::new(Rc::clone(source), end, end), });

    log::trace!("lexed {} tokens from {}", tokens.len(), source.name);

    Ok(tokens)
}

/// Tracks line and column while the scanner moves forward through the text.
struct Cursor<'a> {
    text:     &'a str,
    position: Position,
}

impl<'a> Cursor<'a> {
    const fn new(text: &'a str) -> Self {
        Self { text,
               position: Position::start() }
    }

    /// Moves the cursor forward to byte `offset` and returns its position.
    ///
    /// Offsets never move backwards because lexemes arrive in order.
    fn seek(&mut self, offset: usize) -> Position {
        if offset > self.position.offset {
            let skipped = self.text.get(self.position.offset..offset).unwrap_or("");
            self.position = skipped.chars().fold(self.position, Position::advance);
        }
        self.position
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(text: &str) -> Vec<TokenKind> {
        tokenize(&Rc::new(Source::new("<test>", text))).unwrap()
                                                       .into_iter()
                                                       .map(|t| t.kind)
                                                       .collect()
    }

    fn lex_error(text: &str) -> LexError {
        tokenize(&Rc::new(Source::new("<test>", text))).unwrap_err()
    }

    #[test]
    fn arithmetic_tokens() {
        assert_eq!(kinds("12+3.5*2"),
                   vec![TokenKind::Int(12),
                        TokenKind::Plus,
                        TokenKind::Float(3.5),
                        TokenKind::Mul,
                        TokenKind::Int(2),
                        TokenKind::EndOfInput]);
    }

    #[test]
    fn compound_operators() {
        assert_eq!(kinds("** * -> - == = <= < >= > !="),
                   vec![TokenKind::Pow,
                        TokenKind::Mul,
                        TokenKind::Arrow,
                        TokenKind::Minus,
                        TokenKind::EqEq,
                        TokenKind::Eq,
                        TokenKind::LtEq,
                        TokenKind::Lt,
                        TokenKind::GtEq,
                        TokenKind::Gt,
                        TokenKind::NotEq,
                        TokenKind::EndOfInput]);
    }

    #[test]
    fn keywords_and_identifiers() {
        assert_eq!(kinds("var variable fn in_range"),
                   vec![TokenKind::Keyword(Keyword::Var),
                        TokenKind::Identifier("variable".into()),
                        TokenKind::Keyword(Keyword::Fn),
                        TokenKind::Identifier("in_range".into()),
                        TokenKind::EndOfInput]);
    }

    #[test]
    fn second_dot_ends_number() {
        let err = lex_error("1.2.3");
        assert_eq!(err.kind, LexErrorKind::IllegalCharacter('.'));
        assert_eq!(err.span.start.column, 4);
    }

    #[test]
    fn trailing_dot_is_float() {
        assert_eq!(kinds("7."), vec![TokenKind::Float(7.0), TokenKind::EndOfInput]);
    }

    #[test]
    fn string_escapes() {
        assert_eq!(kinds(r#""a\tb\nc\qd""#),
                   vec![TokenKind::Str("a\tb\ncd".into()), TokenKind::EndOfInput]);
    }

    #[test]
    fn bang_requires_equals() {
        let err = lex_error("1 ! 2");
        assert_eq!(err.kind,
                   LexErrorKind::ExpectedCharacter { expected: '=',
                                                     after:    '!', });
        assert_eq!(err.span.start.column, 3);
    }

    #[test]
    fn illegal_character_span() {
        let err = lex_error("3 + $");
        assert_eq!(err.kind, LexErrorKind::IllegalCharacter('$'));
        assert_eq!(err.span.start.column, 5);
        assert_eq!(err.span.end.column, 6);
    }

    #[test]
    fn unterminated_string() {
        let err = lex_error("\"abc");
        assert_eq!(err.kind, LexErrorKind::UnterminatedString);
        assert_eq!(err.span.start.column, 5);
        assert_eq!(err.to_string(), "Expected Character: '\"' to close the string literal");
    }

    #[test]
    fn oversized_integer() {
        let err = lex_error("99999999999999999999");
        assert!(matches!(err.kind, LexErrorKind::InvalidNumber(_)));
    }

    #[test]
    fn token_positions() {
        let tokens = tokenize(&Rc::new(Source::new("<test>", "ab  cd"))).unwrap();
        assert_eq!(tokens[1].span.start.column, 5);
        assert_eq!(tokens[1].span.end.column, 7);
        assert_eq!(tokens[2].kind, TokenKind::EndOfInput);
        assert!(tokens[2].span.is_empty());
    }
}
