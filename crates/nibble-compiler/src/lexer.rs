//! Lexer for the assembly source.
//!
//! Produces span-based tokens without storing text; text is sliced from the
//! source only when needed.
//!
//! ## Error handling
//!
//! Lexing never fails, but it stops at the first error. A character no rule
//! accepts becomes a final `Unexpected` token. A quote that never closes
//! becomes a final `UnterminatedStr` token covering the rest of the input.

use logos::Logos;
use std::ops::Range;

use nibble_bytecode::Opcode;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    #[regex(r"[ \t\r\n\f]+")]
    Whitespace,

    /// `name.`: call by name. Longer than `Name` so the suffix form wins
    /// over a following `.name`.
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*\.")]
    CallName,

    /// `.name`: call by name, written prefix.
    #[regex(r"\.[A-Za-z_][A-Za-z0-9_]*")]
    PrefixCall,

    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Name,

    #[regex(r"[0-9]+")]
    Number,

    /// Single-quoted string; a backslash takes the next character verbatim.
    #[regex(r"'(?:[^'\\]|\\(?:.|\n))*'")]
    Str,

    #[token("+")]
    Plus,

    #[token("-")]
    Minus,

    #[token("*")]
    Star,

    #[token("$")]
    Dollar,

    #[token("=")]
    Equals,

    #[token("?")]
    Question,

    #[token("!")]
    Bang,

    #[token(",")]
    Comma,

    #[token(":")]
    Colon,

    #[token(".")]
    Dot,

    #[token("@")]
    At,

    #[token("[")]
    BracketOpen,

    #[token("]")]
    BracketClose,

    #[token("<")]
    AngleOpen,

    #[token(">")]
    AngleClose,

    /// `%`: duplicate the top of stack.
    #[token("%")]
    Percent,

    /// A character outside the source alphabet. Not produced by Logos.
    Unexpected,

    /// A quote without a closing quote. Not produced by Logos.
    UnterminatedStr,
}

impl TokenKind {
    #[inline]
    pub fn is_trivia(self) -> bool {
        self == Self::Whitespace
    }

    /// Opcode of a single-character operator. `%` is not included: it
    /// expands to more than one nibble.
    pub fn opcode(self) -> Option<Opcode> {
        let op = match self {
            Self::Plus => Opcode::Add,
            Self::Minus => Opcode::Sub,
            Self::Star => Opcode::Mul,
            Self::Dollar => Opcode::Index,
            Self::Equals => Opcode::Load,
            Self::Question => Opcode::Push,
            Self::Bang => Opcode::Drop,
            Self::Comma => Opcode::Swap,
            Self::Colon => Opcode::Define,
            Self::Dot => Opcode::Call,
            Self::At => Opcode::Return,
            Self::BracketOpen => Opcode::OpenA,
            Self::BracketClose => Opcode::CloseA,
            Self::AngleOpen => Opcode::OpenB,
            Self::AngleClose => Opcode::CloseB,
            _ => return None,
        };
        Some(op)
    }
}

/// Zero-copy token: kind + byte span, text retrieved via [`token_text`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Range<usize>,
}

impl Token {
    #[inline]
    pub fn new(kind: TokenKind, span: Range<usize>) -> Self {
        Self { kind, span }
    }
}

/// Tokenizes source into a vector of span-based tokens.
pub fn lex(source: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut lexer = TokenKind::lexer(source);

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        match result {
            Ok(kind) => tokens.push(Token::new(kind, span)),
            Err(()) if source[span.start..].starts_with('\'') => {
                tokens.push(Token::new(
                    TokenKind::UnterminatedStr,
                    span.start..source.len(),
                ));
                break;
            }
            Err(()) => {
                let width = source[span.start..]
                    .chars()
                    .next()
                    .map_or(1, char::len_utf8);
                tokens.push(Token::new(
                    TokenKind::Unexpected,
                    span.start..span.start + width,
                ));
                break;
            }
        }
    }

    tokens
}

/// Retrieves the text slice for a token. O(1) slice into source.
#[inline]
pub fn token_text<'src>(source: &'src str, token: &Token) -> &'src str {
    &source[token.span.clone()]
}
