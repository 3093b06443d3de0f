use std::error::Error;
use std::fmt::{self, Display, Formatter};
use std::io::Error as IoError;
use std::path::PathBuf;

use base::prelude::Opcode;

/// Lines are counted from 1.
pub type LineNumber = usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IoAction {
    Read,
    Write,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IoTarget {
    File(PathBuf),
    Stdin,
    Stdout,
}

impl Display for IoTarget {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        match self {
            IoTarget::File(path) => write!(f, "file {}", path.display()),
            IoTarget::Stdin => f.write_str("standard input"),
            IoTarget::Stdout => f.write_str("standard output"),
        }
    }
}

#[derive(Debug)]
pub struct IoFailed {
    pub action: IoAction,
    pub target: IoTarget,
    pub error: IoError,
}

impl Display for IoFailed {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        let IoFailed {
            action,
            target,
            error,
        } = self;
        let verb = match action {
            IoAction::Read => "reading from",
            IoAction::Write => "writing to",
        };
        write!(f, "I/O error {verb} {target}: {error}")
    }
}

/// The reasons a run of the parser can fail.  The first failure
/// stops the run; there is no recovery.
#[derive(Debug)]
pub enum ParseFailure {
    /// Some input text could not be classified as any kind of token.
    Lexical { line: LineNumber, msg: String },
    /// The `.IPPcode23` header is missing, misplaced or malformed.
    Header {
        line: Option<LineNumber>,
        msg: String,
    },
    /// An instruction does not start with a known opcode.
    Opcode { line: LineNumber, found: String },
    /// The operands of an instruction do not fit its signature.
    Syntax {
        line: LineNumber,
        opcode: Opcode,
        msg: String,
    },
    Io(IoFailed),
}

/// Process exit status codes for each kind of outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    Success = 0,
    BadInvocation = 10,
    InputUnavailable = 11,
    OutputUnavailable = 12,
    BadHeader = 21,
    BadOpcode = 22,
    LexicalOrSyntax = 23,
    /// Something went wrong which is not the fault of the input.
    InternalError = 99,
}

impl ExitStatus {
    #[must_use]
    pub fn code(self) -> i32 {
        self as i32
    }
}

impl ParseFailure {
    #[must_use]
    pub fn exit_status(&self) -> ExitStatus {
        match self {
            ParseFailure::Header { .. } => ExitStatus::BadHeader,
            ParseFailure::Opcode { .. } => ExitStatus::BadOpcode,
            ParseFailure::Lexical { .. } | ParseFailure::Syntax { .. } => {
                ExitStatus::LexicalOrSyntax
            }
            ParseFailure::Io(IoFailed {
                action: IoAction::Read,
                ..
            }) => ExitStatus::InputUnavailable,
            ParseFailure::Io(IoFailed {
                action: IoAction::Write,
                ..
            }) => ExitStatus::OutputUnavailable,
        }
    }

    /// The line at which the failure was detected, if it has one.
    #[must_use]
    pub fn line(&self) -> Option<LineNumber> {
        match self {
            ParseFailure::Lexical { line, .. }
            | ParseFailure::Opcode { line, .. }
            | ParseFailure::Syntax { line, .. } => Some(*line),
            ParseFailure::Header { line, .. } => *line,
            ParseFailure::Io(_) => None,
        }
    }
}

impl Display for ParseFailure {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        match self {
            ParseFailure::Lexical { line, msg } => {
                write!(f, "line {line}: lexical error: {msg}")
            }
            ParseFailure::Header {
                line: Some(line),
                msg,
            } => {
                write!(f, "line {line}: bad header: {msg}")
            }
            ParseFailure::Header { line: None, msg } => {
                write!(f, "bad header: {msg}")
            }
            ParseFailure::Opcode { line, found } => {
                write!(f, "line {line}: expected an opcode but found '{found}'")
            }
            ParseFailure::Syntax { line, opcode, msg } => {
                write!(f, "line {line}: in {opcode} instruction: {msg}")
            }
            ParseFailure::Io(e) => e.fmt(f),
        }
    }
}

impl Error for ParseFailure {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ParseFailure::Io(IoFailed { error, .. }) => Some(error),
            _ => None,
        }
    }
}
