//! Disassembler: word stream → canonical assembly text.
//!
//! Output format is flat text, one instruction per line, no labels, no
//! comments. Words that cannot start an instruction, and instructions cut
//! short by the end of the stream, are emitted as `.word` lines.

use vsvm_common::{Opcode, Program};

/// Disassemble a program into canonical assembly text.
///
/// The output is guaranteed to reassemble to an identical word stream
/// (`assemble(disassemble(program)) == program`).
pub fn disassemble(program: &Program) -> String {
    let words = &program.words;
    let mut out = String::new();
    let mut i = 0;

    while i < words.len() {
        let word = words[i];
        match Opcode::try_from(word) {
            Ok(opcode) if i + opcode.width() <= words.len() => {
                out.push_str(opcode.mnemonic());
                for operand in &words[i + 1..i + opcode.width()] {
                    out.push(' ');
                    out.push_str(&operand.to_string());
                }
                i += opcode.width();
            }
            _ => {
                out.push_str(&format!(".word {word}"));
                i += 1;
            }
        }
        out.push('\n');
    }

    out
}
