use proptest::prelude::{any, Strategy};
use proptest::sample::select;
use test_strategy::proptest;

use base::prelude::{Opcode, OperandKind};

use super::super::document::{Argument, ArgumentType, Document};
use super::*;

fn validate_successfully(input: &str) -> Document {
    match validate(input) {
        Ok(doc) => doc,
        Err(e) => panic!("validation of {input:?} should have succeeded, but: {e}"),
    }
}

fn validation_failure(input: &str) -> ParseFailure {
    match validate(input) {
        Ok(doc) => panic!("validation of {input:?} should have failed, but produced {doc:?}"),
        Err(e) => e,
    }
}

fn arg(kind: ArgumentType, text: &str) -> Argument {
    Argument {
        kind,
        text: text.to_string(),
    }
}

/// Some text which is acceptable as an operand of the given kind.
fn sample_operand(kind: OperandKind) -> &'static str {
    match kind {
        OperandKind::Var => "GF@v",
        OperandKind::Symb => "int@1",
        OperandKind::Label => "target",
        OperandKind::Type => "int",
    }
}

fn instruction_line(opcode: Opcode, operand_count: usize) -> String {
    let mut line = opcode.to_string();
    let kinds = opcode.operands();
    for i in 0..operand_count {
        line.push(' ');
        // Beyond the end of the signature, any operand will do.
        line.push_str(sample_operand(kinds.get(i).copied().unwrap_or(OperandKind::Symb)));
    }
    line
}

#[test]
fn test_move_between_variables() {
    let doc = validate_successfully(".IPPcode23\nMOVE GF@x GF@y");
    assert_eq!(doc.language(), "IPPcode23");
    let insts = doc.instructions();
    assert_eq!(insts.len(), 1);
    assert_eq!(insts[0].order, 1);
    assert_eq!(insts[0].opcode, Opcode::Move);
    assert_eq!(
        insts[0].arguments,
        vec![
            arg(ArgumentType::Var, "GF@x"),
            arg(ArgumentType::Var, "GF@y")
        ]
    );
}

#[test]
fn test_string_constant_is_escaped() {
    let doc = validate_successfully(".IPPcode23\nPUSHS string@a&b");
    assert_eq!(
        doc.instructions()[0].arguments,
        vec![arg(ArgumentType::String, "a&amp;b")]
    );
}

#[test]
fn test_missing_header() {
    assert!(matches!(
        validation_failure("MOVE GF@x GF@y"),
        ParseFailure::Header { line: Some(1), .. }
    ));
}

#[test]
fn test_empty_program_has_no_header() {
    assert!(matches!(
        validation_failure(""),
        ParseFailure::Header { line: None, .. }
    ));
    assert!(matches!(
        validation_failure("# only a comment\n"),
        ParseFailure::Header { line: None, .. }
    ));
}

#[test]
fn test_unknown_opcode() {
    match validation_failure(".IPPcode23\nFOO") {
        ParseFailure::Opcode { line: 2, found } => {
            assert_eq!(found, "FOO");
        }
        other => panic!("expected an opcode failure, got {other:?}"),
    }
}

#[test]
fn test_too_few_operands() {
    match validation_failure(".IPPcode23\nADD GF@x GF@y") {
        ParseFailure::Syntax {
            line: 2,
            opcode: Opcode::Add,
            msg,
        } => {
            assert!(msg.contains("expected 3 operands"), "message was {msg}");
        }
        other => panic!("expected a syntax failure, got {other:?}"),
    }
}

#[test]
fn test_bad_string_escape() {
    assert!(matches!(
        validation_failure(".IPPcode23\nPUSHS string@bad\\esc"),
        ParseFailure::Syntax {
            opcode: Opcode::PushS,
            ..
        }
    ));
}

#[test]
fn test_too_many_operands() {
    assert!(matches!(
        validation_failure(".IPPcode23\nMOVE GF@x GF@y GF@z"),
        ParseFailure::Syntax {
            line: 2,
            opcode: Opcode::Move,
            ..
        }
    ));
    assert!(matches!(
        validation_failure(".IPPcode23\nBREAK int@1"),
        ParseFailure::Syntax {
            opcode: Opcode::Break,
            ..
        }
    ));
}

#[test]
fn test_operands_must_be_on_the_opcode_line() {
    assert!(matches!(
        validation_failure(".IPPcode23\nMOVE GF@x\nGF@y"),
        ParseFailure::Syntax {
            line: 2,
            opcode: Opcode::Move,
            ..
        }
    ));
}

#[test]
fn test_operand_on_a_line_of_its_own() {
    assert!(matches!(
        validation_failure(".IPPcode23\nBREAK\nGF@y"),
        ParseFailure::Opcode { line: 3, .. }
    ));
}

#[test]
fn test_header_must_come_first() {
    assert!(matches!(
        validation_failure("BREAK\n.IPPcode23\n"),
        ParseFailure::Header { line: Some(1), .. }
    ));
}

#[test]
fn test_header_must_be_alone_on_its_line() {
    assert!(matches!(
        validation_failure(".IPPcode23 BREAK\n"),
        ParseFailure::Header { line: Some(1), .. }
    ));
}

#[test]
fn test_second_header_instead_of_opcode() {
    assert!(matches!(
        validation_failure(".IPPcode23\n.IPPcode23\n"),
        ParseFailure::Opcode { line: 2, .. }
    ));
}

#[test]
fn test_second_header_as_operand() {
    assert!(matches!(
        validation_failure(".IPPcode23\nWRITE .IPPcode23\n"),
        ParseFailure::Syntax {
            opcode: Opcode::Write,
            ..
        }
    ));
}

#[test]
fn test_header_only() {
    let doc = validate_successfully(".IPPcode23");
    assert!(doc.instructions().is_empty());
}

#[test]
fn test_comments_and_blank_lines() {
    let doc = validate_successfully(concat!(
        "# leading comment\n",
        "\n",
        ".IPPcode23 # header comment\n",
        "DEFVAR GF@counter   # declare\n",
        "\n",
        "   MOVE GF@counter int@0\n",
        "# trailing comment",
    ));
    let orders: Vec<usize> = doc.instructions().iter().map(|i| i.order).collect();
    assert_eq!(orders, vec![1, 2]);
}

#[test]
fn test_wrong_operand_kind() {
    assert!(matches!(
        validation_failure(".IPPcode23\nDEFVAR int@1"),
        ParseFailure::Syntax {
            opcode: Opcode::DefVar,
            ..
        }
    ));
    assert!(matches!(
        validation_failure(".IPPcode23\nREAD GF@x nil"),
        ParseFailure::Syntax {
            opcode: Opcode::Read,
            ..
        }
    ));
    assert!(matches!(
        validation_failure(".IPPcode23\nJUMP GF@x"),
        ParseFailure::Syntax {
            opcode: Opcode::Jump,
            ..
        }
    ));
}

#[test]
fn test_invalid_label() {
    assert!(matches!(
        validation_failure(".IPPcode23\nLABEL 1st"),
        ParseFailure::Syntax {
            opcode: Opcode::Label,
            ..
        }
    ));
    assert!(matches!(
        validation_failure(".IPPcode23\nJUMPIFEQ 1st GF@a GF@b"),
        ParseFailure::Syntax {
            opcode: Opcode::JumpIfEq,
            ..
        }
    ));
}

#[test]
fn test_label_grammar_is_the_same_everywhere() {
    // Labels accepted by LABEL are also accepted by JUMPIFEQ and
    // JUMPIFNEQ.
    for label in ["!done", "a?b", "_x", "loop-1", "*star", "&and"] {
        validate_successfully(&format!(
            ".IPPcode23\nLABEL {label}\nJUMPIFNEQ {label} int@1 int@2\nCALL {label}"
        ));
    }
}

#[test]
fn test_label_with_special_characters_is_escaped() {
    let doc = validate_successfully(".IPPcode23\nCALL &fn");
    assert_eq!(
        doc.instructions()[0].arguments,
        vec![arg(ArgumentType::Label, "&amp;fn")]
    );
}

#[test]
fn test_read_and_jumps() {
    let doc = validate_successfully(concat!(
        ".IPPcode23\n",
        "READ LF@in string\n",
        "JUMPIFEQ end LF@in nil@nil\n",
        "WRITE bool@true\n",
        "EXIT int@-3\n",
        "LABEL end\n",
    ));
    let insts = doc.instructions();
    assert_eq!(insts.len(), 5);
    assert_eq!(
        insts[0].arguments,
        vec![
            arg(ArgumentType::Var, "LF@in"),
            arg(ArgumentType::Type, "string")
        ]
    );
    assert_eq!(
        insts[1].arguments,
        vec![
            arg(ArgumentType::Label, "end"),
            arg(ArgumentType::Var, "LF@in"),
            arg(ArgumentType::Nil, "nil")
        ]
    );
    assert_eq!(insts[2].arguments, vec![arg(ArgumentType::Bool, "true")]);
    assert_eq!(insts[3].arguments, vec![arg(ArgumentType::Int, "-3")]);
}

#[test]
fn test_undefined_labels_are_accepted() {
    validate_successfully(".IPPcode23\nJUMP nowhere\n");
}

#[test]
fn test_mnemonics_are_normalised_to_upper_case() {
    let doc = validate_successfully(".ippcode23\ncreateframe\nPushFrame");
    let opcodes: Vec<String> = doc
        .instructions()
        .iter()
        .map(|i| i.opcode.to_string())
        .collect();
    assert_eq!(opcodes, vec!["CREATEFRAME", "PUSHFRAME"]);
}

#[test]
fn test_every_opcode_accepts_exactly_its_signature() {
    for opcode in Opcode::ALL {
        let arity = opcode.signature().arity();
        let good = format!(".IPPcode23\n{}\n", instruction_line(opcode, arity));
        let doc = validate_successfully(&good);
        assert_eq!(doc.instructions()[0].arguments.len(), arity);

        let too_many = format!(".IPPcode23\n{}\n", instruction_line(opcode, arity + 1));
        assert!(
            matches!(validation_failure(&too_many), ParseFailure::Syntax { .. }),
            "{too_many:?} should be rejected"
        );

        if arity > 0 {
            let too_few = format!(".IPPcode23\n{}\n", instruction_line(opcode, arity - 1));
            assert!(
                matches!(validation_failure(&too_few), ParseFailure::Syntax { .. }),
                "{too_few:?} should be rejected"
            );
        }
    }
}

fn program_lines() -> impl Strategy<Value = Vec<(Opcode, bool)>> {
    proptest::collection::vec((select(Opcode::ALL.to_vec()), any::<bool>()), 0..40)
}

#[proptest]
fn orders_are_contiguous(#[strategy(program_lines())] lines: Vec<(Opcode, bool)>) {
    let mut program = String::from(".IPPcode23\n");
    for (opcode, with_padding) in &lines {
        if *with_padding {
            program.push_str("\n# padding\n");
        }
        program.push_str(&instruction_line(*opcode, opcode.signature().arity()));
        program.push('\n');
    }
    let doc = validate_successfully(&program);
    let insts = doc.instructions();
    assert_eq!(insts.len(), lines.len());
    for (i, (inst, (opcode, _))) in insts.iter().zip(lines.iter()).enumerate() {
        assert_eq!(inst.order, i + 1);
        assert_eq!(inst.opcode, *opcode);
        assert_eq!(inst.arguments.len(), opcode.signature().arity());
    }
}

#[test]
fn test_type_keywords_are_valid_labels() {
    for label in ["int", "bool", "string"] {
        let doc = validate_successfully(&format!(
            ".IPPcode23\nLABEL {label}\nJUMP {label}\nCALL {label}\nJUMPIFEQ {label} int@1 int@1\n"
        ));
        for inst in doc.instructions() {
            assert_eq!(inst.arguments[0], arg(ArgumentType::Label, label));
        }
    }
}

#[test]
fn test_type_keyword_is_still_a_type_for_read() {
    let doc = validate_successfully(".IPPcode23\nREAD GF@x bool\n");
    assert_eq!(
        doc.instructions()[0].arguments[1],
        arg(ArgumentType::Type, "bool")
    );
}

#[test]
fn test_invalid_variable_instead_of_opcode() {
    match validation_failure(".IPPcode23\nGF@1x") {
        ParseFailure::Opcode { line: 2, found } => assert_eq!(found, "GF@1x"),
        other => panic!("expected an opcode failure, got {other:?}"),
    }
}
