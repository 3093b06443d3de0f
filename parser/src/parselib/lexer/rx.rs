//! Regular expressions describing the textual forms of IPPcode23
//! operands.  They are compiled on first use.
use std::{ops::Deref, sync::OnceLock};

use regex::Regex;

pub(crate) struct LazyRegex {
    once: OnceLock<Regex>,
    pattern: &'static str,
}

impl LazyRegex {
    pub(crate) const fn new(pattern: &'static str) -> Self {
        LazyRegex {
            once: OnceLock::new(),
            pattern,
        }
    }
}

impl Deref for LazyRegex {
    type Target = Regex;

    fn deref(&self) -> &Regex {
        self.once.get_or_init(|| match Regex::new(self.pattern) {
            Ok(r) => r,
            Err(e) => {
                panic!("'{}' is not a valid regular expression: {e}", self.pattern,);
            }
        })
    }
}

/// Names of variables and labels.  Digits are allowed, but not as
/// the first character.
pub(crate) static IDENTIFIER: LazyRegex =
    LazyRegex::new(r"^[A-Za-z_\-$&%*!?][A-Za-z0-9_\-$&%*!?]*$");

/// The body of an `int@` constant.
pub(crate) static INT_BODY: LazyRegex = LazyRegex::new(r"^[+-]?[0-9]+$");

/// The body of a `string@` constant.  A backslash may only appear
/// as the start of a three-digit decimal escape sequence.
pub(crate) static STRING_BODY: LazyRegex = LazyRegex::new(r"^(?:[^\\]|\\[0-9]{3})*$");

/// The body of a `bool@` constant.
pub(crate) static BOOL_BODY: LazyRegex = LazyRegex::new(r"^(?:true|false)$");

#[test]
fn test_identifier_pattern() {
    for good in ["x", "_tmp", "a1", "$", "&&", "-x-", "%", "*p", "!?", "Loop_2"] {
        assert!(IDENTIFIER.is_match(good), "{good} should be an identifier");
    }
    for bad in ["", "1a", "a b", "a@b", "a.b", "<x>", "š"] {
        assert!(!IDENTIFIER.is_match(bad), "{bad} should not be an identifier");
    }
}

#[test]
fn test_string_body_pattern() {
    assert!(STRING_BODY.is_match(""));
    assert!(STRING_BODY.is_match("hello"));
    assert!(STRING_BODY.is_match(r"a\032b"));
    assert!(STRING_BODY.is_match(r"\0123"));
    assert!(!STRING_BODY.is_match(r"bad\esc"));
    assert!(!STRING_BODY.is_match(r"\12"));
    assert!(!STRING_BODY.is_match("\\"));
}
