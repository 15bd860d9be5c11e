//! In-place rotation of a subrange of bits.
//!
//! A right rotation by `r` of a length-`L` subrange equals a left rotation by
//! `(-r) mod L`, so every request is first reduced to a left amount in
//! `[0, L)` by [`canonical_left_amount`] and only left rotations are
//! implemented. All algorithms here work through [`BitwiseMut`] and never
//! allocate.

mod juggling;
mod reversal;
mod stepwise;

use std::str::FromStr;

use derive_more::Display;
use thiserror::Error;

use crate::BitwiseMut;

/// Strategy used to carry out a canonical left rotation.
#[derive(Clone, Copy, Debug, Default, Display, PartialEq, Eq, Hash)]
pub enum RotationAlgorithm {
    /// Three in-place reversals; `O(length)` bit operations.
    #[default]
    #[display("reversal")]
    Reversal,
    /// `gcd(length, amount)` independent cycles; `O(length)` bit operations.
    #[display("juggling")]
    Juggling,
    /// Repeated single-bit left rotation; `O(length * amount)`.
    #[display("stepwise")]
    Stepwise,
}

impl RotationAlgorithm {
    pub const ALL: [RotationAlgorithm; 3] = [
        RotationAlgorithm::Reversal,
        RotationAlgorithm::Juggling,
        RotationAlgorithm::Stepwise,
    ];

    /// Rotates `[bit_offset, bit_offset + bit_length)` left by `bit_left_amount`.
    ///
    /// Requires `0 < bit_left_amount < bit_length` and an in-range subrange.
    fn rotate_left<Bits>(self, bits: &mut Bits, bit_offset: usize, bit_length: usize, bit_left_amount: usize)
    where
        Bits: BitwiseMut + ?Sized,
    {
        debug_assert!(0 < bit_left_amount && bit_left_amount < bit_length);
        match self {
            RotationAlgorithm::Reversal => reversal::rotate_left(bits, bit_offset, bit_length, bit_left_amount),
            RotationAlgorithm::Juggling => juggling::rotate_left(bits, bit_offset, bit_length, bit_left_amount),
            RotationAlgorithm::Stepwise => stepwise::rotate_left(bits, bit_offset, bit_length, bit_left_amount),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown rotation algorithm {0:?}; expected one of reversal, juggling, stepwise")]
pub struct RotationAlgorithmParseError(String);

impl FromStr for RotationAlgorithm {
    type Err = RotationAlgorithmParseError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        RotationAlgorithm::ALL
            .into_iter()
            .find(|algorithm| algorithm.to_string().eq_ignore_ascii_case(name.trim()))
            .ok_or_else(|| RotationAlgorithmParseError(name.to_owned()))
    }
}

/// Converts a signed right rotation into the equivalent left rotation.
///
/// The result is the mathematical modulo `(-bit_right_amount) mod bit_length`,
/// always in `[0, bit_length)` regardless of the sign of the amount.
///
/// # Panics
///
/// Panics if `bit_length` is zero.
///
/// ```
/// use bitpack::rotation::canonical_left_amount;
///
/// assert_eq!(canonical_left_amount(8, 1), 7);
/// assert_eq!(canonical_left_amount(8, -1), 1);
/// assert_eq!(canonical_left_amount(8, -17), 1);
/// assert_eq!(canonical_left_amount(8, 16), 0);
/// ```
#[must_use]
pub fn canonical_left_amount(bit_length: usize, bit_right_amount: isize) -> usize {
    assert!(bit_length > 0, "cannot canonicalize a rotation of an empty range");
    let magnitude = bit_right_amount.unsigned_abs() % bit_length;
    if bit_right_amount < 0 {
        magnitude
    } else {
        (bit_length - magnitude) % bit_length
    }
}

/// Rotates `[bit_offset, bit_offset + bit_length)` of `bits` right by
/// `bit_right_amount` using the default [`RotationAlgorithm`].
///
/// Negative amounts rotate left and amounts larger than the range wrap.
/// Bits outside the range are never written.
///
/// # Panics
///
/// Panics if `bit_offset + bit_length` exceeds `bits.bit_len()`.
pub fn rotate<Bits>(bits: &mut Bits, bit_offset: usize, bit_length: usize, bit_right_amount: isize)
where
    Bits: BitwiseMut + ?Sized,
{
    rotate_with(RotationAlgorithm::default(), bits, bit_offset, bit_length, bit_right_amount);
}

/// Same as [`rotate`] with an explicit algorithm.
///
/// # Panics
///
/// Panics if `bit_offset + bit_length` exceeds `bits.bit_len()`.
pub fn rotate_with<Bits>(
    algorithm: RotationAlgorithm,
    bits: &mut Bits,
    bit_offset: usize,
    bit_length: usize,
    bit_right_amount: isize,
) where
    Bits: BitwiseMut + ?Sized,
{
    let total = bits.bit_len();
    assert!(
        bit_offset
            .checked_add(bit_length)
            .is_some_and(|end| end <= total),
        "rotation range {bit_offset}+{bit_length} exceeds bit length {total}"
    );
    if bit_length == 0 {
        return;
    }
    let bit_left_amount = canonical_left_amount(bit_length, bit_right_amount);
    if bit_left_amount == 0 {
        return;
    }
    algorithm.rotate_left(bits, bit_offset, bit_length, bit_left_amount);
}
