//! Parser for vsvm assembly tokens → statements.
//!
//! Each line holds any number of label definitions followed by at most one
//! statement. Operands stay symbolic here; labels are resolved once the
//! whole text has been sized.

use crate::error::AsmError;
use crate::lexer::Token;
use vsvm_common::Opcode;

/// An operand word before label resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Operand {
    Number(i32),
    Label(String),
}

/// Something that emits words.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Statement {
    /// An opcode with exactly `opcode.operand_count()` operands.
    Instruction {
        opcode: Opcode,
        operands: Vec<Operand>,
    },
    /// `.word N`: one raw word.
    Word(Operand),
}

impl Statement {
    /// Words this statement occupies in the output.
    pub(crate) fn width(&self) -> usize {
        match self {
            Statement::Instruction { opcode, .. } => opcode.width(),
            Statement::Word(_) => 1,
        }
    }
}

/// Result of parsing a single assembly line.
#[derive(Debug, Default, PartialEq, Eq)]
pub(crate) struct ParsedLine {
    /// Labels defined on this line, bound to the address of the statement
    /// (or of whatever follows, for a label-only line).
    pub labels: Vec<String>,
    pub statement: Option<Statement>,
}

/// Parse a sequence of tokens from a single line.
pub(crate) fn parse_line(tokens: &[Token], line_num: usize) -> Result<ParsedLine, AsmError> {
    let mut parsed = ParsedLine::default();
    let mut rest = tokens;

    while let Some((Token::Label(name), tail)) = rest.split_first() {
        parsed.labels.push(name.clone());
        rest = tail;
    }

    let Some((head, args)) = rest.split_first() else {
        return Ok(parsed);
    };

    let statement = match head {
        Token::Ident(mnemonic) => {
            let opcode = Opcode::from_mnemonic(&mnemonic.to_uppercase()).ok_or_else(|| {
                AsmError::UnknownOpcode {
                    line: line_num,
                    token: mnemonic.clone(),
                }
            })?;
            let expected = opcode.operand_count();
            let operands = (0..expected)
                .map(|idx| expect_operand(args, idx, line_num, opcode.mnemonic(), expected))
                .collect::<Result<Vec<_>, _>>()?;
            expect_end(&args[expected..], line_num)?;
            Statement::Instruction { opcode, operands }
        }
        Token::Directive(name) if name == "word" => {
            let operand = expect_operand(args, 0, line_num, ".word", 1)?;
            expect_end(&args[1..], line_num)?;
            Statement::Word(operand)
        }
        Token::Directive(name) => {
            return Err(AsmError::UnknownOpcode {
                line: line_num,
                token: format!(".{name}"),
            })
        }
        other => {
            return Err(AsmError::UnexpectedToken {
                line: line_num,
                token: token_text(other),
            })
        }
    };

    parsed.statement = Some(statement);
    Ok(parsed)
}

/// Extract the operand at position `idx`, checking that numbers fit a word.
fn expect_operand(
    args: &[Token],
    idx: usize,
    line: usize,
    opcode: &'static str,
    expected: usize,
) -> Result<Operand, AsmError> {
    match args.get(idx) {
        Some(Token::Number(n)) => i32::try_from(*n)
            .map(Operand::Number)
            .map_err(|_| AsmError::InvalidNumber {
                line,
                token: n.to_string(),
            }),
        Some(Token::Ident(label)) => Ok(Operand::Label(label.clone())),
        Some(other) => Err(AsmError::UnexpectedToken {
            line,
            token: token_text(other),
        }),
        None => Err(AsmError::MissingArgument {
            line,
            opcode,
            expected,
        }),
    }
}

/// Check that there are no extra tokens.
fn expect_end(remaining: &[Token], line: usize) -> Result<(), AsmError> {
    if let Some(tok) = remaining.first() {
        return Err(AsmError::UnexpectedToken {
            line,
            token: token_text(tok),
        });
    }
    Ok(())
}

fn token_text(token: &Token) -> String {
    match token {
        Token::Ident(s) => s.clone(),
        Token::Number(n) => n.to_string(),
        Token::Label(s) => format!("{s}:"),
        Token::Directive(s) => format!(".{s}"),
    }
}
