//! The XML representation of a validated program.
//!
//! The document is built up one instruction at a time by a
//! [`DocumentBuilder`], and only becomes a [`Document`] once the
//! whole program has been validated.  There is no way to remove or
//! change an instruction once it has been appended.
use std::fmt::{self, Display, Formatter, Write as _};
use std::io::{self, Write};

use base::prelude::Opcode;

use super::operand::{Constant, Operand};

/// The value of the `language` attribute of the root element.
pub const LANGUAGE: &str = "IPPcode23";

/// Replace the characters `&`, `<` and `>` with XML entities.
///
/// Each input character is examined exactly once, so the result of
/// escaping text which contains `&amp;` is `&amp;amp;`; callers must
/// escape any given value only once.
#[must_use]
pub fn escape(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            other => result.push(other),
        }
    }
    result
}

/// The `type` attribute of an argument element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgumentType {
    Var,
    Int,
    Bool,
    String,
    Nil,
    Label,
    Type,
}

impl Display for ArgumentType {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        f.write_str(match self {
            ArgumentType::Var => "var",
            ArgumentType::Int => "int",
            ArgumentType::Bool => "bool",
            ArgumentType::String => "string",
            ArgumentType::Nil => "nil",
            ArgumentType::Label => "label",
            ArgumentType::Type => "type",
        })
    }
}

/// One operand, ready for output.  The text is already escaped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Argument {
    pub kind: ArgumentType,
    pub text: String,
}

impl From<&Operand> for Argument {
    fn from(operand: &Operand) -> Argument {
        let (kind, text) = match operand {
            Operand::Variable(var) => (ArgumentType::Var, escape(&var.to_string())),
            Operand::Label(label) => (ArgumentType::Label, escape(label)),
            Operand::Type(t) => (ArgumentType::Type, t.to_string()),
            Operand::Constant(Constant::String(body)) => (ArgumentType::String, escape(body)),
            Operand::Constant(Constant::Int(digits)) => (ArgumentType::Int, digits.clone()),
            Operand::Constant(Constant::Bool(b)) => (ArgumentType::Bool, b.to_string()),
            Operand::Constant(Constant::Nil) => (ArgumentType::Nil, "nil".to_string()),
        };
        Argument { kind, text }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    /// Instructions are numbered from 1.
    pub order: usize,
    pub opcode: Opcode,
    pub arguments: Vec<Argument>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    language: String,
    instructions: Vec<Instruction>,
}

impl Document {
    #[must_use]
    pub fn language(&self) -> &str {
        &self.language
    }

    #[must_use]
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Write the XML text of the document.
    ///
    /// # Errors
    ///
    /// Fails only if writing to `writer` fails.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writer.write_all(self.to_string().as_bytes())?;
        writer.flush()
    }
}

impl Display for Document {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        f.write_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n")?;
        writeln!(f, "<program language=\"{}\">", self.language)?;
        for inst in &self.instructions {
            writeln!(
                f,
                "\t<instruction order=\"{}\" opcode=\"{}\">",
                inst.order, inst.opcode
            )?;
            for (i, arg) in inst.arguments.iter().enumerate().map(|(i, a)| (i + 1, a)) {
                writeln!(f, "\t\t<arg{i} type=\"{}\">{}</arg{i}>", arg.kind, arg.text)?;
            }
            f.write_str("\t</instruction>\n")?;
        }
        f.write_str("</program>")?;
        f.write_char('\n')
    }
}

/// Accumulates instructions for a [`Document`].
#[derive(Debug)]
pub struct DocumentBuilder {
    doc: Document,
}

impl DocumentBuilder {
    #[must_use]
    pub fn begin(language: &str) -> DocumentBuilder {
        DocumentBuilder {
            doc: Document {
                language: language.to_string(),
                instructions: Vec::new(),
            },
        }
    }

    /// Append an instruction.  Each instruction's `order` must be one
    /// greater than that of the previous one (and the first must be
    /// 1).
    ///
    /// # Panics
    ///
    /// Panics if `order` is out of sequence.
    pub fn append_instruction(&mut self, order: usize, opcode: Opcode, operands: &[Operand]) {
        let expected = self.doc.instructions.len() + 1;
        if order != expected {
            panic!("instruction {opcode} was given order {order} but should have been {expected}");
        }
        self.doc.instructions.push(Instruction {
            order,
            opcode,
            arguments: operands.iter().map(Argument::from).collect(),
        });
    }

    #[must_use]
    pub fn finish(self) -> Document {
        self.doc
    }
}
