//! The `base` crate defines the IPPcode23 instruction set: opcodes,
//! their operand signatures, and the keywords (frames, type names)
//! which operands are built from.  Tools which read or write
//! IPPcode23 depend on this crate for a single, shared description
//! of the language.

pub mod instruction;
pub mod prelude;
