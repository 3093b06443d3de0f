//! The prelude exports the types most users of the base crate need.
pub use super::instruction::{
    Frame, Opcode, OperandKind, Signature, TypeName, UnknownKeyword,
};
