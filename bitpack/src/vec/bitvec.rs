use std::fmt;

use rand::RngCore;
use thiserror::Error;

use crate::bit::standard_types::{block_and_bit_index, block_count};
use crate::rotation;
use crate::{BitLength, Bitwise, BitwiseMut};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BitVecError {
    #[error("could not allocate storage for {bit_count} bits")]
    Allocation { bit_count: usize },
}

/// A fixed-length, packed sequence of bits.
///
/// Bits are stored eight to a byte. The length is chosen at construction and
/// never changes; there is no resize or clone. The storage is
/// released when the vector is dropped.
///
/// # Construction
///
/// ```
/// use bitpack::{BitVec, Bitwise, BitwiseMut};
///
/// let mut v = BitVec::zeros(10);
/// v.assign_index(3, true);
/// assert!(v.index(3));
/// assert_eq!(v.len(), 10);
///
/// let parsed: BitVec = "10010110".parse().unwrap();
/// assert_eq!(parsed.to_string(), "10010110");
/// ```
///
/// # Rotation
///
/// ```
/// use bitpack::BitVec;
///
/// let mut v: BitVec = "10010110".parse().unwrap();
/// v.rotate(0, 8, -1);
/// assert_eq!(v.to_string(), "00101101");
/// ```
#[must_use]
#[derive(PartialEq, Eq, Hash)]
pub struct BitVec {
    bytes: Vec<u8>,
    bit_length: usize,
}

impl BitVec {
    /// Creates a vector of `bit_count` zero bits.
    ///
    /// Aborts the process if the allocation fails, like any `Vec`; use
    /// [`try_zeros`](BitVec::try_zeros) when the size comes from outside.
    pub fn zeros(bit_count: usize) -> BitVec {
        BitVec {
            bytes: vec![0; block_count::<u8>(bit_count)],
            bit_length: bit_count,
        }
    }

    /// Creates a vector of `bit_count` zero bits, reporting allocation
    /// failure instead of aborting.
    ///
    /// # Errors
    ///
    /// Returns [`BitVecError::Allocation`] when the backing buffer cannot be
    /// reserved.
    pub fn try_zeros(bit_count: usize) -> Result<BitVec, BitVecError> {
        let byte_count = block_count::<u8>(bit_count);
        let mut bytes = Vec::new();
        bytes
            .try_reserve_exact(byte_count)
            .map_err(|_| BitVecError::Allocation { bit_count })?;
        bytes.resize(byte_count, 0);
        Ok(BitVec {
            bytes,
            bit_length: bit_count,
        })
    }

    /// Returns the number of bits in the vector.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bit_length
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bit_length == 0
    }

    /// Size of the backing buffer in bytes, `ceil(len / 8)`.
    #[must_use]
    pub fn byte_len(&self) -> usize {
        self.bytes.len()
    }

    /// The packed storage. Padding bits past [`len`](BitVec::len) are zero.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Overwrites every bit with bytes drawn from `random_number_generator`.
    ///
    /// The fill covers exactly the backing buffer; padding bits in the last
    /// byte are cleared afterwards. Seeding the generator identically
    /// reproduces identical content.
    pub fn randomize(&mut self, random_number_generator: &mut impl RngCore) {
        random_number_generator.fill_bytes(&mut self.bytes);
        self.clear_padding();
    }

    /// Rotates `[bit_offset, bit_offset + bit_length)` right by
    /// `bit_right_amount` places; negative amounts rotate left.
    ///
    /// # Panics
    ///
    /// Panics if the subrange extends past the end of the vector.
    pub fn rotate(&mut self, bit_offset: usize, bit_length: usize, bit_right_amount: isize) {
        rotation::rotate(self, bit_offset, bit_length, bit_right_amount);
    }

    /// Returns an iterator over the bits in index order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = bool> + '_ {
        (0..self.bit_length).map(|index| self.index(index))
    }

    fn clear_padding(&mut self) {
        let used = self.bit_length % u8::BLOCK_BIT_LEN;
        if used != 0 {
            if let Some(last) = self.bytes.last_mut() {
                *last &= (1u8 << used) - 1;
            }
        }
    }

    #[inline]
    fn check_index(&self, index: usize) {
        assert!(
            index < self.bit_length,
            "bit index {index} out of range for BitVec of length {}",
            self.bit_length
        );
    }
}

impl BitLength for BitVec {
    #[inline]
    fn bit_len(&self) -> usize {
        self.bit_length
    }
    const BLOCK_BIT_LEN: usize = u8::BLOCK_BIT_LEN;
}

impl Bitwise for BitVec {
    #[inline]
    fn index(&self, index: usize) -> bool {
        self.check_index(index);
        let (byte_index, bit_index) = block_and_bit_index::<u8>(index);
        self.bytes[byte_index].index(bit_index)
    }

    #[inline]
    fn weight(&self) -> usize {
        self.bytes.iter().map(Bitwise::weight).sum()
    }

    #[inline]
    fn is_zero(&self) -> bool {
        self.bytes.iter().all(Bitwise::is_zero)
    }
}

impl BitwiseMut for BitVec {
    #[inline]
    fn assign_index(&mut self, index: usize, to: bool) {
        self.check_index(index);
        let (byte_index, bit_index) = block_and_bit_index::<u8>(index);
        self.bytes[byte_index].assign_index(bit_index, to);
    }

    #[inline]
    fn negate_index(&mut self, index: usize) {
        self.check_index(index);
        let (byte_index, bit_index) = block_and_bit_index::<u8>(index);
        self.bytes[byte_index].negate_index(bit_index);
    }
}

impl FromIterator<bool> for BitVec {
    fn from_iter<Bits: IntoIterator<Item = bool>>(iterator: Bits) -> Self {
        let bits: Vec<bool> = iterator.into_iter().collect();
        let mut vector = BitVec::zeros(bits.len());
        for (index, bit) in bits.into_iter().enumerate() {
            if bit {
                vector.assign_index(index, true);
            }
        }
        vector
    }
}

impl fmt::Debug for BitVec {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("BitVec")
            .field("len", &self.bit_length)
            .field("bits", &format_args!("{self}"))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn zeros_has_requested_length() {
        for length in [0, 1, 7, 8, 9, 64, 65] {
            let v = BitVec::zeros(length);
            assert_eq!(v.len(), length);
            assert_eq!(v.byte_len(), length.div_ceil(8));
            assert!(v.is_zero());
        }
    }

    #[test]
    fn empty_vector_has_no_storage() {
        let v = BitVec::try_zeros(0).expect("zero-length allocation");
        assert!(v.is_empty());
        assert_eq!(v.byte_len(), 0);
    }

    #[test]
    fn try_zeros_reports_impossible_allocation() {
        let result = BitVec::try_zeros(usize::MAX);
        assert_eq!(result.unwrap_err(), BitVecError::Allocation { bit_count: usize::MAX });
    }

    #[test]
    fn bit_zero_is_least_significant_bit_of_first_byte() {
        let mut v = BitVec::zeros(16);
        v.assign_index(0, true);
        v.assign_index(9, true);
        assert_eq!(v.as_bytes(), &[0b0000_0001, 0b0000_0010]);
    }

    #[test]
    fn assign_leaves_neighbours_untouched() {
        let mut v: BitVec = [true; 12].into_iter().collect();
        v.assign_index(5, false);
        let bits: Vec<bool> = v.iter().collect();
        let expected: Vec<bool> = (0..12).map(|index| index != 5).collect();
        assert_eq!(bits, expected);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn index_past_end_panics() {
        let v = BitVec::zeros(8);
        let _ = v.index(8);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn assign_into_padding_panics() {
        let mut v = BitVec::zeros(5);
        v.assign_index(6, true);
    }

    #[test]
    fn randomize_is_seed_deterministic() {
        let mut first = BitVec::zeros(1000);
        let mut second = BitVec::zeros(1000);
        first.randomize(&mut StdRng::seed_from_u64(6172));
        second.randomize(&mut StdRng::seed_from_u64(6172));
        assert_eq!(first, second);
        assert!(!first.is_zero());
    }

    #[test]
    fn randomize_clears_padding() {
        let mut v = BitVec::zeros(13);
        v.randomize(&mut StdRng::seed_from_u64(1));
        assert_eq!(v.as_bytes()[1] & 0b1110_0000, 0);
        assert_eq!(v.weight(), v.iter().filter(|bit| *bit).count());
    }
}
