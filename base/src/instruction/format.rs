/// Text representations of opcodes and the other keywords of the
/// language.
use std::error::Error;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use super::{Frame, Opcode, OperandKind, TypeName};

/// Signals that some text is not one of the keywords we were looking
/// for.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct UnknownKeyword {
    /// What kind of keyword we were trying to recognise
    /// ("opcode", "frame" and so on).
    pub expected: &'static str,
    pub text: String,
}

impl Display for UnknownKeyword {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "'{}' is not a valid {}", self.text, self.expected)
    }
}

impl Error for UnknownKeyword {}

/// Convert an opcode to its (upper case) mnemonic.
impl Display for Opcode {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        use Opcode::*;
        f.write_str(match self {
            Move => "MOVE",
            CreateFrame => "CREATEFRAME",
            PushFrame => "PUSHFRAME",
            PopFrame => "POPFRAME",
            DefVar => "DEFVAR",
            Call => "CALL",
            Return => "RETURN",
            PushS => "PUSHS",
            PopS => "POPS",
            Add => "ADD",
            Sub => "SUB",
            Mul => "MUL",
            IDiv => "IDIV",
            Lt => "LT",
            Gt => "GT",
            Eq => "EQ",
            And => "AND",
            Or => "OR",
            Not => "NOT",
            Int2Char => "INT2CHAR",
            Stri2Int => "STRI2INT",
            Read => "READ",
            Write => "WRITE",
            Concat => "CONCAT",
            StrLen => "STRLEN",
            GetChar => "GETCHAR",
            SetChar => "SETCHAR",
            Type => "TYPE",
            Label => "LABEL",
            Jump => "JUMP",
            JumpIfEq => "JUMPIFEQ",
            JumpIfNeq => "JUMPIFNEQ",
            Exit => "EXIT",
            DPrint => "DPRINT",
            Break => "BREAK",
        })
    }
}

/// Mnemonics are not case-sensitive; `move`, `Move` and `MOVE` are
/// the same opcode.
impl FromStr for Opcode {
    type Err = UnknownKeyword;

    fn from_str(s: &str) -> Result<Opcode, UnknownKeyword> {
        Opcode::ALL
            .iter()
            .find(|op| op.to_string().eq_ignore_ascii_case(s))
            .copied()
            .ok_or_else(|| UnknownKeyword {
                expected: "opcode",
                text: s.to_string(),
            })
    }
}

impl Display for Frame {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        f.write_str(match self {
            Frame::Global => "GF",
            Frame::Local => "LF",
            Frame::Temporary => "TF",
        })
    }
}

/// Frame names are case-sensitive.
impl FromStr for Frame {
    type Err = UnknownKeyword;

    fn from_str(s: &str) -> Result<Frame, UnknownKeyword> {
        match s {
            "GF" => Ok(Frame::Global),
            "LF" => Ok(Frame::Local),
            "TF" => Ok(Frame::Temporary),
            _ => Err(UnknownKeyword {
                expected: "frame",
                text: s.to_string(),
            }),
        }
    }
}

impl Display for TypeName {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        f.write_str(match self {
            TypeName::Int => "int",
            TypeName::Bool => "bool",
            TypeName::String => "string",
        })
    }
}

impl FromStr for TypeName {
    type Err = UnknownKeyword;

    fn from_str(s: &str) -> Result<TypeName, UnknownKeyword> {
        match s {
            "int" => Ok(TypeName::Int),
            "bool" => Ok(TypeName::Bool),
            "string" => Ok(TypeName::String),
            _ => Err(UnknownKeyword {
                expected: "type name",
                text: s.to_string(),
            }),
        }
    }
}

/// Describe the operand kind in the terms used by diagnostics.
impl Display for OperandKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        f.write_str(match self {
            OperandKind::Var => "variable",
            OperandKind::Symb => "symbol (variable or constant)",
            OperandKind::Label => "label",
            OperandKind::Type => "type name",
        })
    }
}
