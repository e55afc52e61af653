//! Integration tests for the vsvm assembler.
//!
//! Tests cover:
//! - The sample programs in tests/programs (assemble, execute)
//! - Roundtrip properties (disassemble → assemble)
//! - Error cases (unknown opcode, missing operands, labels)

use std::path::{Path, PathBuf};
use vsvm_assembler::{assemble, disassemble, AsmError};
use vsvm_common::{Opcode, Program};
use vsvm_vm::{run_with_tracer, HaltReason, Recorder, RuntimeError, VmConfig};

// ---- Test helpers ----

fn sample(name: &str) -> String {
    let path: PathBuf = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../../tests/programs")
        .join(name);
    std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("cannot read {}: {e}", path.display()))
}

/// Assemble and execute, returning the final stack and printed values.
fn assemble_execute(text: &str) -> (Vec<i32>, Vec<i32>) {
    let program = assemble(text).unwrap_or_else(|e| panic!("assembly failed: {e}"));
    let mut recorder = Recorder::new();
    let outcome = run_with_tracer(&program, VmConfig::default(), &mut recorder)
        .unwrap_or_else(|e| panic!("execution failed: {e}"));
    (outcome.stack, recorder.printed)
}

// ---- Sample programs ----

#[test]
fn sample_add() {
    let (stack, printed) = assemble_execute(&sample("add.vsa"));
    assert_eq!(stack, vec![7]);
    assert_eq!(printed, vec![7]);
}

#[test]
fn sample_branch() {
    let program = assemble(&sample("branch.vsa")).unwrap();
    // The label resolves to the word address of the second path.
    assert_eq!(
        program.words,
        vec![1, 5, 1, 5, 7, 9, 10, 1, 0, 15, 1, 1, 15]
    );
    let (stack, _) = assemble_execute(&sample("branch.vsa"));
    assert_eq!(stack, vec![1]);
}

#[test]
fn sample_factorial() {
    let (stack, printed) = assemble_execute(&sample("factorial.vsa"));
    assert_eq!(stack, vec![120]);
    assert_eq!(printed, vec![120]);
}

#[test]
fn sample_countdown() {
    let (stack, printed) = assemble_execute(&sample("countdown.vsa"));
    assert_eq!(stack, vec![0]);
    assert_eq!(printed, vec![3, 2, 1]);
}

#[test]
fn sample_bad_opcode_faults() {
    let program = assemble(&sample("bad_opcode.vsa")).unwrap();
    let result = run_with_tracer(&program, VmConfig::default(), &mut Recorder::new());
    assert_eq!(result, Err(RuntimeError::UnknownOpcode { at: 2, value: 99 }));
}

#[test]
fn samples_roundtrip_through_disassembly() {
    for name in [
        "add.vsa",
        "branch.vsa",
        "factorial.vsa",
        "countdown.vsa",
        "bad_opcode.vsa",
    ] {
        let program = assemble(&sample(name)).unwrap();
        let reassembled = assemble(&disassemble(&program)).unwrap();
        assert_eq!(program, reassembled, "roundtrip failed for {name}");
    }
}

// ---- Text format ----

#[test]
fn mnemonics_are_case_insensitive() {
    let upper = assemble("ICONST 1\nPRINT\nHALT\n").unwrap();
    let lower = assemble("iconst 1\nprint\nhalt\n").unwrap();
    assert_eq!(upper, lower);
}

#[test]
fn labels_are_case_sensitive() {
    let err = assemble("Top: HALT\nBRT top\n").unwrap_err();
    assert!(matches!(err, AsmError::UndefinedLabel { line: 2, .. }));
}

#[test]
fn running_off_the_end_of_assembled_text() {
    let program = assemble("ICONST 1\nICONST 2\n").unwrap();
    let outcome = run_with_tracer(&program, VmConfig::default(), &mut Recorder::new()).unwrap();
    assert_eq!(outcome.reason, HaltReason::EndOfProgram);
    assert_eq!(outcome.stack, vec![1, 2]);
}

#[test]
fn all_opcodes_roundtrip() {
    let mut words = Vec::new();
    for opcode in vsvm_common::opcode::ALL_OPCODES {
        words.push(opcode as i32);
        for operand in 0..opcode.operand_count() {
            words.push(operand as i32 - 1);
        }
    }
    let program = Program::new(words);
    let text = disassemble(&program);
    assert_eq!(text.lines().count(), 15);
    assert_eq!(assemble(&text).unwrap(), program);
}

#[test]
fn disassembly_lists_operands() {
    let program = assemble(&sample("factorial.vsa")).unwrap();
    let text = disassemble(&program);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "ICONST 5");
    assert_eq!(lines[1], "CALL 7 1");
    assert_eq!(lines[4], "LOAD -3");
    assert_eq!(lines[7], "BRF 17");
    assert_eq!(lines.last(), Some(&"RET"));
}

// ---- Errors ----

#[test]
fn error_unknown_opcode() {
    let err = assemble("FOOBAR\n").unwrap_err();
    assert!(matches!(err, AsmError::UnknownOpcode { line: 1, .. }));
}

#[test]
fn error_missing_operand() {
    let err = assemble("ICONST\n").unwrap_err();
    assert_eq!(
        err,
        AsmError::MissingArgument {
            line: 1,
            opcode: Opcode::Iconst.mnemonic(),
            expected: 1
        }
    );
}

#[test]
fn error_extra_operand() {
    let err = assemble("IADD 1\n").unwrap_err();
    assert!(matches!(err, AsmError::UnexpectedToken { line: 1, .. }));
}

#[test]
fn error_number_too_large_for_word() {
    let err = assemble("ICONST 4294967296\n").unwrap_err();
    assert!(matches!(err, AsmError::InvalidNumber { line: 1, .. }));
}
