use crate::BitLength;

// Common helper for calculating block and bit indices
#[inline]
#[must_use]
pub fn block_and_bit_index<T: BitLength>(index: usize) -> (usize, usize) {
    let block_index = index / T::BLOCK_BIT_LEN;
    let bit_index = index % T::BLOCK_BIT_LEN;
    (block_index, bit_index)
}

/// Number of `T` blocks needed to hold `bit_count` bits.
#[inline]
#[must_use]
pub fn block_count<T: BitLength>(bit_count: usize) -> usize {
    bit_count.div_ceil(T::BLOCK_BIT_LEN)
}

#[inline]
#[must_use]
pub fn bit_char(bit: bool) -> char {
    if bit {
        '1'
    } else {
        '0'
    }
}
