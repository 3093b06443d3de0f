//! A "lower" lexer which splits the input into words, and which
//! takes care of line breaks, whitespace and comments.  The words
//! it produces are classified by the scanner in the parent module.
use std::ops::Range;

use logos::Logos;

/// `InnerToken` is the result of the Logos-generated scanner.  Only
/// `Newline` and `Word` are interesting to the caller.
#[derive(Debug, Logos, PartialEq, Clone, Copy)]
pub(super) enum InnerToken {
    #[token("\n")]
    Newline,

    /// A comment runs from `#` to the end of the line (but does not
    /// include the newline itself).
    #[regex("#[^\n]*")]
    Comment,

    #[regex(r"[ \t\r\x0C]+")]
    Spaces,

    /// Anything else which is not a control character.
    #[regex(r"[^ \t\r\x0C\n#\x00-\x08\x0B\x0E-\x1F\x7F]+")]
    Word,
}

/// This is the output of `LowerLexer`.
#[derive(Debug, PartialEq, Eq)]
pub(super) enum Lexeme<'a> {
    EndOfInput,
    Newline,
    Word(&'a str),
    /// A character which cannot appear anywhere in a program.
    Err(char),
}

/// `LowerLexer` uses a Logos-generated scanner to identify words,
/// and skips whitespace and comments.
#[derive(Debug, Clone)]
pub(super) struct LowerLexer<'a> {
    inner: logos::Lexer<'a, InnerToken>,
}

impl<'a> LowerLexer<'a> {
    pub(super) fn new(input: &'a str) -> LowerLexer<'a> {
        LowerLexer {
            inner: InnerToken::lexer(input),
        }
    }

    pub(super) fn span(&self) -> Range<usize> {
        self.inner.span()
    }

    pub(super) fn next(&mut self) -> Lexeme<'a> {
        loop {
            match self.inner.next() {
                None => {
                    return Lexeme::EndOfInput;
                }
                Some(Err(())) => match self.inner.slice().chars().next() {
                    Some(ch) => {
                        return Lexeme::Err(ch);
                    }
                    None => {
                        panic!("LowerLexer::next(): got error on zero-length content");
                    }
                },
                Some(Ok(InnerToken::Comment | InnerToken::Spaces)) => {
                    // Skip.
                }
                Some(Ok(InnerToken::Newline)) => {
                    return Lexeme::Newline;
                }
                Some(Ok(InnerToken::Word)) => {
                    return Lexeme::Word(self.inner.slice());
                }
            }
        }
    }
}

#[test]
fn test_comments_are_ignored() {
    let input = "MOVE # a comment with MOVE GF@x in it\n";
    let mut lex = LowerLexer::new(input);
    assert_eq!(lex.next(), Lexeme::Word("MOVE"));
    assert_eq!(lex.next(), Lexeme::Newline);
    assert_eq!(lex.next(), Lexeme::EndOfInput);
}

#[test]
fn test_comment_ends_a_word() {
    let mut lex = LowerLexer::new("string@abc#def");
    assert_eq!(lex.next(), Lexeme::Word("string@abc"));
    assert_eq!(lex.next(), Lexeme::EndOfInput);
}

#[test]
fn test_span() {
    let input = "XZ\t Y";
    let mut lex = LowerLexer::new(input);
    assert_eq!(lex.next(), Lexeme::Word("XZ"));
    assert_eq!(&input[lex.span()], "XZ");
    assert_eq!(lex.next(), Lexeme::Word("Y"));
    assert_eq!(&input[lex.span()], "Y");
}

#[test]
fn test_crlf_line_endings() {
    let mut lex = LowerLexer::new("A\r\nB");
    assert_eq!(lex.next(), Lexeme::Word("A"));
    assert_eq!(lex.next(), Lexeme::Newline);
    assert_eq!(lex.next(), Lexeme::Word("B"));
    assert_eq!(lex.next(), Lexeme::EndOfInput);
}

#[test]
fn test_control_character_is_rejected() {
    let mut lex = LowerLexer::new("A \u{7} B");
    assert_eq!(lex.next(), Lexeme::Word("A"));
    assert_eq!(lex.next(), Lexeme::Err('\u{7}'));
}

#[test]
fn test_non_ascii_text_is_part_of_a_word() {
    let mut lex = LowerLexer::new("string@žluťoučký");
    assert_eq!(lex.next(), Lexeme::Word("string@žluťoučký"));
    assert_eq!(lex.next(), Lexeme::EndOfInput);
}
