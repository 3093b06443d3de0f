//! A front end for the IPPcode23 language.  It checks that a program
//! is lexically and syntactically valid and converts it to the
//! standard XML representation.
#![deny(unreachable_pub)]
#![deny(unsafe_code)]
#![warn(clippy::must_use_candidate)]
#![warn(clippy::manual_string_new)]
#![warn(clippy::semicolon_if_nothing_returned)]
#![warn(clippy::return_self_not_must_use)]
#![warn(clippy::wildcard_imports)]
#![warn(clippy::clone_on_ref_ptr)]
#![warn(clippy::match_same_arms)]
#![warn(clippy::missing_errors_doc)]
#![warn(clippy::items_after_statements)]
#![warn(clippy::explicit_iter_loop)]
#![warn(clippy::pedantic)]
#![allow(clippy::manual_assert)] // fix soon
#![allow(clippy::needless_pass_by_value)] // fix soon

mod document;
mod driver;
mod lexer;
mod operand;
mod types;
mod validator;

pub use document::{
    escape, Argument, ArgumentType, Document, DocumentBuilder, Instruction, LANGUAGE,
};
pub use driver::*;
pub use lexer::{Scanner, Token, TokenKind, HEADER};
pub use operand::{Constant, Operand, Variable};
pub use types::{ExitStatus, IoAction, IoFailed, IoTarget, LineNumber, ParseFailure};
pub use validator::{validate, Validator};
