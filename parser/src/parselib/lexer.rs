//! The scanner turns IPPcode23 source text into a sequence of
//! classified tokens.
//!
//! Scanning happens in two layers.  The "lower" lexer (generated by
//! Logos) splits the text into words and newlines, discarding
//! whitespace and comments.  The [`Scanner`] then classifies each
//! word.  Classification depends on position: the first word of a
//! line is where an opcode belongs, so a mnemonic is only recognised
//! there.  Elsewhere, `JUMP MOVE` is a jump to a label named `MOVE`.
//!
//! The scanner checks variable names (so the validator need not) but
//! leaves the finer rules for labels and constants to the validator.
use std::fmt::{self, Display, Formatter};

use tracing::{event, Level};

use base::prelude::{Opcode, TypeName};

use super::operand::Variable;
use super::types::{LineNumber, ParseFailure};

mod lower;
pub(crate) mod rx;

use lower::{Lexeme, LowerLexer};

/// The header which must begin every program.  Case is not
/// significant.
pub const HEADER: &str = ".IPPcode23";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    Header,
    Opcode(Opcode),
    Variable(Variable),
    /// A constant lexeme such as `int@5`, not yet checked.
    Constant(String),
    /// A label lexeme, not yet checked.
    Label(String),
    TypeName(TypeName),
    EndOfStream,
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        match self {
            TokenKind::Header => f.write_str(HEADER),
            TokenKind::Opcode(op) => op.fmt(f),
            TokenKind::Variable(v) => v.fmt(f),
            TokenKind::Constant(text) | TokenKind::Label(text) => f.write_str(text),
            TokenKind::TypeName(t) => t.fmt(f),
            TokenKind::EndOfStream => f.write_str("end of input"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    /// The line on which the token appears.  For `EndOfStream`, this
    /// is the last line of the input.
    pub line: LineNumber,
}

impl Token {
    #[must_use]
    pub fn is_end(&self) -> bool {
        self.kind == TokenKind::EndOfStream
    }
}

/// Classify a single word of input.
fn classify(word: &str, first_on_line: bool, line: LineNumber) -> Result<TokenKind, ParseFailure> {
    if word.eq_ignore_ascii_case(HEADER) {
        return Ok(TokenKind::Header);
    }
    if first_on_line {
        if let Ok(opcode) = word.parse::<Opcode>() {
            return Ok(TokenKind::Opcode(opcode));
        }
    }
    if word.contains('@') {
        return match Variable::from_lexeme(word) {
            Some(Ok(var)) => Ok(TokenKind::Variable(var)),
            // Where an opcode belongs, the validator reports the
            // missing opcode instead.
            Some(Err(_)) if first_on_line => Ok(TokenKind::Label(word.to_string())),
            Some(Err(name)) => Err(ParseFailure::Lexical {
                line,
                msg: format!("'{name}' is not a valid variable name (in '{word}')"),
            }),
            None => Ok(TokenKind::Constant(word.to_string())),
        };
    }
    match word.parse::<TypeName>() {
        Ok(t) => Ok(TokenKind::TypeName(t)),
        Err(_) => Ok(TokenKind::Label(word.to_string())),
    }
}

/// Produces tokens on demand.  The token sequence always ends with
/// a single `EndOfStream` token; once that has been produced, the
/// scanner keeps producing `EndOfStream`.
#[derive(Debug, Clone)]
pub struct Scanner<'a> {
    lower: LowerLexer<'a>,
    line: LineNumber,
    at_line_start: bool,
    finished: bool,
}

impl<'a> Scanner<'a> {
    #[must_use]
    pub fn new(input: &'a str) -> Scanner<'a> {
        Scanner {
            lower: LowerLexer::new(input),
            line: 1,
            at_line_start: true,
            finished: false,
        }
    }

    /// Fetch the next token.
    ///
    /// # Errors
    ///
    /// Returns [`ParseFailure::Lexical`] when the input contains
    /// text which cannot be part of any token.
    pub fn next_token(&mut self) -> Result<Token, ParseFailure> {
        if self.finished {
            return Ok(self.end_of_stream());
        }
        loop {
            match self.lower.next() {
                Lexeme::EndOfInput => {
                    self.finished = true;
                    event!(Level::TRACE, "end of input at line {}", self.line);
                    return Ok(self.end_of_stream());
                }
                Lexeme::Newline => {
                    self.line += 1;
                    self.at_line_start = true;
                }
                Lexeme::Word(word) => {
                    let first_on_line = std::mem::replace(&mut self.at_line_start, false);
                    let kind = classify(word, first_on_line, self.line)?;
                    event!(
                        Level::TRACE,
                        "line {}, offset {:?}: {kind:?}",
                        self.line,
                        self.lower.span()
                    );
                    return Ok(Token {
                        kind,
                        line: self.line,
                    });
                }
                Lexeme::Err(ch) => {
                    return Err(ParseFailure::Lexical {
                        line: self.line,
                        msg: format!("invalid character {ch:?}"),
                    });
                }
            }
        }
    }

    fn end_of_stream(&self) -> Token {
        Token {
            kind: TokenKind::EndOfStream,
            line: self.line,
        }
    }
}

/// Iteration stops after the `EndOfStream` token, or after the first
/// error.
impl Iterator for Scanner<'_> {
    type Item = Result<Token, ParseFailure>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let result = self.next_token();
        if result.is_err() {
            self.finished = true;
        }
        Some(result)
    }
}
