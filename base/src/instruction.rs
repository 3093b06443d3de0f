//! Symbolic representation of IPPcode23 instructions.
//!
//! An IPPcode23 program is a sequence of lines, each holding one
//! instruction: an opcode mnemonic followed by zero to three
//! operands.  The shape of those operands is fixed per opcode and is
//! described here by [`Signature`].  Every opcode maps to exactly one
//! of the eight signatures, and that mapping is an exhaustive `match`
//! so that adding an opcode without deciding its signature is a
//! compile error.
//!
//! Operands come in four kinds (see [`OperandKind`]).  A "symbol" is
//! an operand which may be either a variable or a constant.

#[cfg(test)]
use test_strategy::Arbitrary;

mod format;

pub use format::UnknownKeyword;

/// An IPPcode23 instruction mnemonic.
///
/// The enumeration order follows the order in which the language
/// reference lists the instructions, with the debugging instructions
/// last.
#[cfg_attr(test, derive(Arbitrary))]
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash)]
pub enum Opcode {
    // Frames and function calls.
    Move,
    CreateFrame,
    PushFrame,
    PopFrame,
    DefVar,
    Call,
    Return,

    // Data stack.
    PushS,
    PopS,

    // Arithmetic, relational, boolean and conversion instructions.
    Add,
    Sub,
    Mul,
    IDiv,
    Lt,
    Gt,
    Eq,
    And,
    Or,
    Not,
    Int2Char,
    Stri2Int,

    // Input and output.
    Read,
    Write,

    // Strings.
    Concat,
    StrLen,
    GetChar,
    SetChar,

    // Types.
    Type,

    // Program flow control.
    Label,
    Jump,
    JumpIfEq,
    JumpIfNeq,
    Exit,

    // Debugging.
    DPrint,
    Break,
}

impl Opcode {
    /// All opcodes, in declaration order.
    pub const ALL: [Opcode; 35] = [
        Opcode::Move,
        Opcode::CreateFrame,
        Opcode::PushFrame,
        Opcode::PopFrame,
        Opcode::DefVar,
        Opcode::Call,
        Opcode::Return,
        Opcode::PushS,
        Opcode::PopS,
        Opcode::Add,
        Opcode::Sub,
        Opcode::Mul,
        Opcode::IDiv,
        Opcode::Lt,
        Opcode::Gt,
        Opcode::Eq,
        Opcode::And,
        Opcode::Or,
        Opcode::Not,
        Opcode::Int2Char,
        Opcode::Stri2Int,
        Opcode::Read,
        Opcode::Write,
        Opcode::Concat,
        Opcode::StrLen,
        Opcode::GetChar,
        Opcode::SetChar,
        Opcode::Type,
        Opcode::Label,
        Opcode::Jump,
        Opcode::JumpIfEq,
        Opcode::JumpIfNeq,
        Opcode::Exit,
        Opcode::DPrint,
        Opcode::Break,
    ];

    /// The operand shape this opcode requires.
    #[must_use]
    pub fn signature(&self) -> Signature {
        use Opcode::*;
        match self {
            CreateFrame | PushFrame | PopFrame | Return | Break => Signature::Nullary,
            DefVar | PopS => Signature::Var,
            PushS | Write | Exit | DPrint => Signature::Symb,
            Call | Label | Jump => Signature::Label,
            Move | Int2Char | StrLen | Type | Not => Signature::VarSymb,
            Read => Signature::VarType,
            Add | Sub | Mul | IDiv | Lt | Gt | Eq | And | Or | Stri2Int | Concat | GetChar
            | SetChar => Signature::VarSymbSymb,
            JumpIfEq | JumpIfNeq => Signature::LabelSymbSymb,
        }
    }

    /// Convenience for `self.signature().operands()`.
    #[must_use]
    pub fn operands(&self) -> &'static [OperandKind] {
        self.signature().operands()
    }
}

/// The kind of an operand expected at some position of an
/// instruction.
#[cfg_attr(test, derive(Arbitrary))]
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum OperandKind {
    /// A frame-qualified variable such as `GF@counter`.
    Var,
    /// Either a variable or a typed constant such as `int@42`.
    Symb,
    /// A label name.
    Label,
    /// One of the type keywords `int`, `bool`, `string`.
    Type,
}

/// The eight operand shapes of the IPPcode23 instruction set.
#[cfg_attr(test, derive(Arbitrary))]
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Signature {
    Nullary,
    Var,
    Symb,
    Label,
    VarSymb,
    VarType,
    VarSymbSymb,
    LabelSymbSymb,
}

impl Signature {
    #[must_use]
    pub fn operands(&self) -> &'static [OperandKind] {
        use OperandKind as K;
        match self {
            Signature::Nullary => &[],
            Signature::Var => &[K::Var],
            Signature::Symb => &[K::Symb],
            Signature::Label => &[K::Label],
            Signature::VarSymb => &[K::Var, K::Symb],
            Signature::VarType => &[K::Var, K::Type],
            Signature::VarSymbSymb => &[K::Var, K::Symb, K::Symb],
            Signature::LabelSymbSymb => &[K::Label, K::Symb, K::Symb],
        }
    }

    #[must_use]
    pub fn arity(&self) -> usize {
        self.operands().len()
    }
}

/// The memory frame a variable lives in.
#[cfg_attr(test, derive(Arbitrary))]
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Frame {
    /// `GF`, the global frame.
    Global,
    /// `LF`, the top of the local frame stack.
    Local,
    /// `TF`, the temporary frame.
    Temporary,
}

/// The type keywords accepted as the second operand of `READ`.
#[cfg_attr(test, derive(Arbitrary))]
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TypeName {
    Int,
    Bool,
    String,
}
