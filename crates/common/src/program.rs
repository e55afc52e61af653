//! Program representation for vsvm instruction streams.
//!
//! A program is a flat sequence of 32-bit words. Binary files (.vsb) are raw
//! concatenations of little-endian words with no header.

use crate::error::DecodeError;

/// Bytes per encoded word.
pub const WORD_SIZE: usize = 4;

/// A vsvm program: opcodes and immediate operands in one untagged stream.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Program {
    /// The instruction stream.
    pub words: Vec<i32>,
}

impl Program {
    /// Create a new program from raw words.
    pub fn new(words: Vec<i32>) -> Self {
        Self { words }
    }

    /// Checked access to the word at `index`.
    pub fn word(&self, index: usize) -> Option<i32> {
        self.words.get(index).copied()
    }

    /// Encode the entire program to bytes.
    pub fn encode(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.words.len() * WORD_SIZE);
        for word in &self.words {
            bytes.extend_from_slice(&word.to_le_bytes());
        }
        bytes
    }

    /// Decode a byte slice into a program.
    ///
    /// Opcodes are not validated here: operand words are indistinguishable
    /// from opcodes without walking the stream, so invalid opcodes surface
    /// when they are executed.
    pub fn decode(bytes: &[u8]) -> Result<Self, DecodeError> {
        if bytes.len() % WORD_SIZE != 0 {
            return Err(DecodeError::InvalidLength(bytes.len()));
        }

        let words = bytes
            .chunks_exact(WORD_SIZE)
            .map(|chunk| i32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
            .collect();

        Ok(Self { words })
    }

    /// Number of words in the program.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Returns true if the program has no words.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl From<Vec<i32>> for Program {
    fn from(words: Vec<i32>) -> Self {
        Self::new(words)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::opcode::Opcode;

    #[test]
    fn empty_program() {
        let program = Program::new(vec![]);
        assert!(program.is_empty());
        assert_eq!(program.len(), 0);
        assert_eq!(program.encode(), Vec::<u8>::new());
    }

    #[test]
    fn encode_is_little_endian() {
        let program = Program::new(vec![Opcode::Iconst as i32, -2]);
        assert_eq!(program.encode(), vec![1, 0, 0, 0, 0xFE, 0xFF, 0xFF, 0xFF]);
    }

    #[test]
    fn decode_invalid_length() {
        assert_eq!(Program::decode(&[0; 7]), Err(DecodeError::InvalidLength(7)));
        assert_eq!(Program::decode(&[0; 13]), Err(DecodeError::InvalidLength(13)));
    }

    #[test]
    fn decode_keeps_unknown_words() {
        let bytes = [0x63, 0, 0, 0, 15, 0, 0, 0];
        let program = Program::decode(&bytes).unwrap();
        assert_eq!(program.words, vec![99, Opcode::Halt as i32]);
    }

    #[test]
    fn checked_word_access() {
        let program = Program::new(vec![Opcode::Halt as i32]);
        assert_eq!(program.word(0), Some(15));
        assert_eq!(program.word(1), None);
    }
}
