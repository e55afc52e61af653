//! Tokenizer for vsvm assembly text.

use crate::error::AsmError;

/// A single token from an assembly line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Token {
    /// An identifier: opcode mnemonic or label reference, as written.
    Ident(String),
    /// A numeric literal (decimal or hex, optionally signed).
    Number(i64),
    /// A label definition (`name:`), without the colon.
    Label(String),
    /// A directive (`.word`), lowercased, without the dot.
    Directive(String),
}

/// Tokenize a single line of assembly text.
///
/// Returns an empty Vec for blank lines and comment-only lines.
/// Comments start with `;` and extend to end of line.
pub(crate) fn tokenize_line(line: &str, line_num: usize) -> Result<Vec<Token>, AsmError> {
    // Strip comment
    let line = match line.find(';') {
        Some(pos) => &line[..pos],
        None => line,
    };

    let mut tokens = Vec::new();
    for word in line.split_whitespace() {
        let token = if is_numeric(word) {
            Token::Number(parse_number(word).ok_or_else(|| AsmError::InvalidNumber {
                line: line_num,
                token: word.to_string(),
            })?)
        } else if let Some(name) = word.strip_suffix(':') {
            if name.is_empty() {
                return Err(AsmError::UnexpectedToken {
                    line: line_num,
                    token: word.to_string(),
                });
            }
            Token::Label(name.to_string())
        } else if let Some(name) = word.strip_prefix('.') {
            Token::Directive(name.to_lowercase())
        } else {
            Token::Ident(word.to_string())
        };
        tokens.push(token);
    }

    Ok(tokens)
}

/// A word is numeric if it starts with a digit, after an optional sign.
fn is_numeric(word: &str) -> bool {
    let unsigned = word.strip_prefix(['-', '+']).unwrap_or(word);
    unsigned.as_bytes().first().is_some_and(|b| b.is_ascii_digit())
}

fn parse_number(word: &str) -> Option<i64> {
    let (negative, unsigned) = match word.as_bytes().first() {
        Some(b'-') => (true, &word[1..]),
        Some(b'+') => (false, &word[1..]),
        _ => (false, word),
    };

    let magnitude = if let Some(hex) = unsigned
        .strip_prefix("0x")
        .or_else(|| unsigned.strip_prefix("0X"))
    {
        i64::from_str_radix(hex, 16).ok()?
    } else {
        unsigned.parse::<i64>().ok()?
    };

    Some(if negative { -magnitude } else { magnitude })
}
