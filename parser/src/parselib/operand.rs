//! Operands of IPPcode23 instructions, and the rules which decide
//! whether a piece of text is a well-formed operand.
use std::fmt::{self, Display, Formatter};

use base::prelude::{Frame, TypeName};

use super::lexer::rx::{BOOL_BODY, IDENTIFIER, INT_BODY, STRING_BODY};

/// Returns true when `name` is acceptable as a label or as the name
/// part of a variable.
pub(crate) fn is_identifier(name: &str) -> bool {
    IDENTIFIER.is_match(name)
}

/// A reference to a variable, such as `LF@counter`.
///
/// Values of this type are only created by the scanner, which has
/// already checked that the name is an identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variable {
    frame: Frame,
    name: String,
}

impl Variable {
    /// Split a lexeme such as `GF@x` into frame and name.  Returns
    /// `None` if the text before the first `@` is not a frame name,
    /// and `Some(Err(name))` if it is, but the remainder is not a
    /// valid identifier.
    pub(crate) fn from_lexeme(lexeme: &str) -> Option<Result<Variable, &str>> {
        let (prefix, name) = lexeme.split_once('@')?;
        let frame: Frame = prefix.parse().ok()?;
        if is_identifier(name) {
            Some(Ok(Variable {
                frame,
                name: name.to_string(),
            }))
        } else {
            Some(Err(name))
        }
    }

    #[must_use]
    pub fn frame(&self) -> Frame {
        self.frame
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Display for Variable {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{}@{}", self.frame, self.name)
    }
}

/// A typed constant such as `int@-7` or `string@hello\032world`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Constant {
    /// The digits (and optional sign) exactly as written.
    Int(String),
    Bool(bool),
    /// The string body, with its escape sequences left as written.
    String(String),
    Nil,
}

impl Constant {
    /// Decide the type and value of a constant lexeme.  The type
    /// prefixes are tried in the order int, string, bool, nil.
    pub(crate) fn parse(lexeme: &str) -> Result<Constant, String> {
        if let Some(body) = lexeme.strip_prefix("int@") {
            if INT_BODY.is_match(body) {
                return Ok(Constant::Int(body.to_string()));
            }
            return Err(format!("'{body}' is not a decimal integer"));
        }
        if let Some(body) = lexeme.strip_prefix("string@") {
            if STRING_BODY.is_match(body) {
                return Ok(Constant::String(body.to_string()));
            }
            return Err(format!(
                "in string constant '{body}', each backslash must start a three-digit escape sequence"
            ));
        }
        if let Some(body) = lexeme.strip_prefix("bool@") {
            if BOOL_BODY.is_match(body) {
                return Ok(Constant::Bool(body == "true"));
            }
            return Err(format!("'{body}' is not a boolean (true or false)"));
        }
        if let Some(body) = lexeme.strip_prefix("nil@") {
            if body == "nil" {
                return Ok(Constant::Nil);
            }
            return Err(format!("the only nil constant is nil@nil, not nil@{body}"));
        }
        Err(format!("'{lexeme}' is neither a variable nor a constant"))
    }
}

/// A validated operand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operand {
    Variable(Variable),
    Constant(Constant),
    Label(String),
    Type(TypeName),
}
