//! Text forms of a [`BitVec`].
//!
//! A bitstring is a run of `'0'`/`'1'` characters in index order, e.g.
//! `"10010110"`. The line dump writes one such character per line and is the
//! format external file-based drivers exchange bit vectors in.

use std::fmt;
use std::io::{BufRead, Write};
use std::str::FromStr;

use thiserror::Error;

use crate::bit::standard_types::bit_char;
use crate::{BitVec, BitVecError, Bitwise, BitwiseMut};

#[derive(Debug, Error)]
pub enum BitStringError {
    #[error("invalid bit character {found:?} at position {position}")]
    InvalidCharacter { position: usize, found: char },
    #[error("expected {expected} bit lines, found {found}")]
    Truncated { expected: usize, found: usize },
    #[error(transparent)]
    Allocation(#[from] BitVecError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

fn bit_from_char(position: usize, character: char) -> Result<bool, BitStringError> {
    match character {
        '0' => Ok(false),
        '1' => Ok(true),
        found => Err(BitStringError::InvalidCharacter { position, found }),
    }
}

impl fmt::Display for BitVec {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: String = self.iter().map(bit_char).collect();
        formatter.pad(&rendered)
    }
}

impl FromStr for BitVec {
    type Err = BitStringError;

    fn from_str(bitstring: &str) -> Result<Self, Self::Err> {
        let mut vector = BitVec::zeros(bitstring.chars().count());
        for (position, character) in bitstring.chars().enumerate() {
            vector.assign_index(position, bit_from_char(position, character)?);
        }
        Ok(vector)
    }
}

/// Writes `bits` one character per line.
///
/// # Errors
///
/// Propagates any error from `writer`.
pub fn write_bit_lines(bits: &BitVec, mut writer: impl Write) -> Result<(), BitStringError> {
    for index in 0..bits.len() {
        writeln!(writer, "{}", bit_char(bits.index(index)))?;
    }
    writer.flush()?;
    Ok(())
}

/// Reads `bit_count` bits written by [`write_bit_lines`].
///
/// Only the first character of each line is significant; lines past
/// `bit_count` are ignored.
///
/// # Errors
///
/// Fails on I/O errors, when the vector cannot be allocated, on a line that does not start with `'0'` or `'1'`,
/// and when fewer than `bit_count` lines are available.
pub fn read_bit_lines(reader: impl BufRead, bit_count: usize) -> Result<BitVec, BitStringError> {
    let mut vector = BitVec::try_zeros(bit_count)?;
    let mut found = 0;
    for line in reader.lines().take(bit_count) {
        let line = line?;
        let character = line.chars().next().unwrap_or('\n');
        vector.assign_index(found, bit_from_char(found, character)?);
        found += 1;
    }
    if found < bit_count {
        return Err(BitStringError::Truncated {
            expected: bit_count,
            found,
        });
    }
    Ok(vector)
}
