//! The validator checks that the token stream forms a valid
//! IPPcode23 program, and feeds each validated instruction to the
//! document builder.
//!
//! A program is the header followed by any number of instructions,
//! one per line.  Each instruction is an opcode followed by exactly
//! the operands its [`Signature`](base::prelude::Signature) calls
//! for, all on the opcode's line.  The first problem found ends the
//! run.
use tracing::{event, Level};

use base::prelude::{Opcode, OperandKind};

use super::document::{Document, DocumentBuilder, LANGUAGE};
use super::lexer::{Scanner, Token, TokenKind, HEADER};
use super::operand::{is_identifier, Constant, Operand};
use super::types::{LineNumber, ParseFailure};

#[cfg(test)]
mod tests;

/// What the validator expects to see next.
#[derive(Debug)]
enum State {
    ExpectHeader,
    ExpectOpcodeOrEnd(DocumentBuilder),
    Finished(Document),
}

/// Validates one program.  A `Validator` is used for exactly one
/// run.
#[derive(Debug)]
pub struct Validator<'a> {
    scanner: Scanner<'a>,
    /// The number of instructions validated so far.
    order: usize,
    /// Seeing the end of an instruction means reading the token
    /// after it.  That token is kept here until the next instruction
    /// is examined.
    pending: Option<Token>,
}

impl<'a> Validator<'a> {
    #[must_use]
    pub fn new(source: &'a str) -> Validator<'a> {
        Validator {
            scanner: Scanner::new(source),
            order: 0,
            pending: None,
        }
    }

    /// Validate the whole program and return its document.
    ///
    /// # Errors
    ///
    /// Returns the first lexical, header, opcode or syntax failure
    /// found in the program.
    pub fn run(mut self) -> Result<Document, ParseFailure> {
        let mut state = State::ExpectHeader;
        loop {
            state = match state {
                State::ExpectHeader => State::ExpectOpcodeOrEnd(self.expect_header()?),
                State::ExpectOpcodeOrEnd(mut builder) => {
                    if self.expect_instruction(&mut builder)? {
                        State::ExpectOpcodeOrEnd(builder)
                    } else {
                        event!(
                            Level::DEBUG,
                            "end of program after {} instructions",
                            self.order
                        );
                        State::Finished(builder.finish())
                    }
                }
                State::Finished(document) => {
                    return Ok(document);
                }
            };
        }
    }

    fn next_token(&mut self) -> Result<Token, ParseFailure> {
        match self.pending.take() {
            Some(token) => Ok(token),
            None => self.scanner.next_token(),
        }
    }

    fn expect_header(&mut self) -> Result<DocumentBuilder, ParseFailure> {
        let token = self.next_token()?;
        match token.kind {
            TokenKind::Header => {
                let next = self.scanner.next_token()?;
                if next.line == token.line && !next.is_end() {
                    return Err(ParseFailure::Header {
                        line: Some(token.line),
                        msg: format!("unexpected '{}' after {HEADER}", next.kind),
                    });
                }
                self.pending = Some(next);
                event!(Level::DEBUG, "found header on line {}", token.line);
                Ok(DocumentBuilder::begin(LANGUAGE))
            }
            TokenKind::EndOfStream => Err(ParseFailure::Header {
                line: None,
                msg: format!("the program is empty; it should start with {HEADER}"),
            }),
            other => Err(ParseFailure::Header {
                line: Some(token.line),
                msg: format!("expected {HEADER} but found '{other}'"),
            }),
        }
    }

    /// Validate one instruction and append it to `builder`.  Returns
    /// `false` at the end of the program.
    fn expect_instruction(&mut self, builder: &mut DocumentBuilder) -> Result<bool, ParseFailure> {
        let token = self.next_token()?;
        let line = token.line;
        let opcode = match token.kind {
            TokenKind::EndOfStream => {
                return Ok(false);
            }
            TokenKind::Opcode(opcode) => opcode,
            other => {
                return Err(ParseFailure::Opcode {
                    line,
                    found: other.to_string(),
                });
            }
        };

        let expected: &[OperandKind] = opcode.operands();
        let mut operands: Vec<Operand> = Vec::with_capacity(expected.len());
        for (position, kind) in expected.iter().enumerate().map(|(i, k)| (i + 1, *k)) {
            let token = self.scanner.next_token()?;
            if token.line != line || token.is_end() {
                return Err(ParseFailure::Syntax {
                    line,
                    opcode,
                    msg: format!(
                        "expected {} operands but found only {}",
                        expected.len(),
                        position - 1
                    ),
                });
            }
            operands.push(expect_operand(opcode, line, position, kind, token.kind)?);
        }

        let next = self.scanner.next_token()?;
        if next.line == line && !next.is_end() {
            return Err(ParseFailure::Syntax {
                line,
                opcode,
                msg: format!(
                    "expected {} operands but found more, starting with '{}'",
                    expected.len(),
                    next.kind
                ),
            });
        }
        self.pending = Some(next);

        self.order += 1;
        event!(
            Level::DEBUG,
            "line {line}: instruction {} is {opcode} with {} operands",
            self.order,
            operands.len()
        );
        builder.append_instruction(self.order, opcode, &operands);
        Ok(true)
    }
}

/// Check that the operand at `position` (counting from 1) has the
/// kind the opcode requires.
fn expect_operand(
    opcode: Opcode,
    line: LineNumber,
    position: usize,
    kind: OperandKind,
    found: TokenKind,
) -> Result<Operand, ParseFailure> {
    let fail = |msg: String| ParseFailure::Syntax { line, opcode, msg };
    match (kind, found) {
        (OperandKind::Var | OperandKind::Symb, TokenKind::Variable(var)) => {
            Ok(Operand::Variable(var))
        }
        (OperandKind::Symb, TokenKind::Constant(text)) => Constant::parse(&text)
            .map(Operand::Constant)
            .map_err(|msg| fail(format!("operand {position}: {msg}"))),
        (OperandKind::Label, TokenKind::Label(text)) => {
            if is_identifier(&text) {
                Ok(Operand::Label(text))
            } else {
                Err(fail(format!(
                    "operand {position}: '{text}' is not a valid label name"
                )))
            }
        }
        // Type keywords are also valid label names.
        (OperandKind::Label, TokenKind::TypeName(t)) => Ok(Operand::Label(t.to_string())),
        (OperandKind::Type, TokenKind::TypeName(t)) => Ok(Operand::Type(t)),
        (kind, found) => Err(fail(format!(
            "operand {position} should be a {kind} but found '{found}'"
        ))),
    }
}

/// Validate a whole program.
///
/// # Errors
///
/// See [`Validator::run`].
pub fn validate(source: &str) -> Result<Document, ParseFailure> {
    Validator::new(source).run()
}
