//! vsvm assembler: text ↔ word stream translation.
//!
//! The assembler is a mechanical translation with two conveniences: label
//! definitions (`name:`) usable as any operand, and `.word N` for raw words.
//!
//! # Usage
//!
//! ```
//! use vsvm_assembler::{assemble, disassemble};
//!
//! let text = "ICONST 3\nICONST 4\nIADD\nHALT\n";
//! let program = assemble(text).unwrap();
//! assert_eq!(program.words, vec![1, 3, 1, 4, 2, 15]);
//! assert_eq!(disassemble(&program), text);
//! ```
//!
//! # Roundtrip Guarantee
//!
//! `assemble(disassemble(program)) == program` holds for every word stream.
//! The disassembler emits numeric targets; labels do not survive.

pub mod error;

mod disassembler;
mod lexer;
mod parser;

pub use error::AsmError;

use lexer::tokenize_line;
use parser::{parse_line, Operand, Statement};
use std::collections::HashMap;
use vsvm_common::Program;

/// Assemble text into a program.
///
/// Labels may be referenced before they are defined. Returns the first
/// error encountered.
pub fn assemble(text: &str) -> Result<Program, AsmError> {
    let mut labels: HashMap<String, usize> = HashMap::new();
    let mut statements = Vec::new();
    let mut address = 0;

    for (idx, line) in text.lines().enumerate() {
        let line_num = idx + 1;
        let tokens = tokenize_line(line, line_num)?;
        let parsed = parse_line(&tokens, line_num)?;

        for label in parsed.labels {
            if labels.contains_key(&label) {
                return Err(AsmError::DuplicateLabel {
                    line: line_num,
                    label,
                });
            }
            labels.insert(label, address);
        }

        if let Some(statement) = parsed.statement {
            address += statement.width();
            statements.push((line_num, statement));
        }
    }

    let mut words = Vec::with_capacity(address);
    for (line_num, statement) in &statements {
        match statement {
            Statement::Instruction { opcode, operands } => {
                words.push(*opcode as i32);
                for operand in operands {
                    words.push(resolve(operand, &labels, *line_num)?);
                }
            }
            Statement::Word(operand) => words.push(resolve(operand, &labels, *line_num)?),
        }
    }

    Ok(Program::new(words))
}

/// Disassemble a program into canonical assembly text.
///
/// The output is flat text: one instruction per line, no indentation,
/// no labels.
pub fn disassemble(program: &Program) -> String {
    disassembler::disassemble(program)
}

fn resolve(
    operand: &Operand,
    labels: &HashMap<String, usize>,
    line: usize,
) -> Result<i32, AsmError> {
    match operand {
        Operand::Number(n) => Ok(*n),
        Operand::Label(label) => {
            let address = labels.get(label).ok_or_else(|| AsmError::UndefinedLabel {
                line,
                label: label.clone(),
            })?;
            i32::try_from(*address).map_err(|_| AsmError::InvalidNumber {
                line,
                token: address.to_string(),
            })
        }
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Any word stream, valid or not, survives disassembly.
        #[test]
        fn disassemble_assemble_roundtrip(words in prop::collection::vec(-2i32..20, 0..48)) {
            let program = Program::new(words);
            let text = disassemble(&program);
            prop_assert_eq!(assemble(&text).unwrap(), program);
        }
    }
}
