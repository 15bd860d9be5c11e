use crate::{BitLength, Bitwise, BitwiseMut};

// Bit 0 of a byte is its least-significant bit.
#[inline]
const fn bitmask(bit_index: usize) -> u8 {
    1 << (bit_index % 8)
}

impl BitLength for u8 {
    #[inline]
    fn bit_len(&self) -> usize {
        8
    }
    const BLOCK_BIT_LEN: usize = 8;
}

impl Bitwise for u8 {
    #[inline]
    fn index(&self, index: usize) -> bool {
        assert!(index < 8, "bit index {index} out of range for u8");
        self & bitmask(index) != 0
    }

    #[inline]
    fn weight(&self) -> usize {
        self.count_ones() as usize
    }

    #[inline]
    fn is_zero(&self) -> bool {
        *self == 0
    }
}

impl BitwiseMut for u8 {
    #[inline]
    fn assign_index(&mut self, index: usize, to: bool) {
        assert!(index < 8, "bit index {index} out of range for u8");
        // Single read, single write of the containing byte.
        *self = (*self & !bitmask(index)) | (u8::from(to) << index);
    }

    #[inline]
    fn negate_index(&mut self, index: usize) {
        assert!(index < 8, "bit index {index} out of range for u8");
        *self ^= bitmask(index);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn least_significant_bit_is_index_zero() {
        let byte = 0b0000_0001u8;
        assert!(byte.index(0));
        assert!(!byte.index(7));
    }

    #[test]
    fn assign_touches_one_bit() {
        let mut byte = 0b1010_1010u8;
        byte.assign_index(0, true);
        assert_eq!(byte, 0b1010_1011);
        byte.assign_index(7, false);
        assert_eq!(byte, 0b0010_1011);
        byte.assign_index(1, true);
        assert_eq!(byte, 0b0010_1011);
    }

    #[test]
    fn negate_flips() {
        let mut byte = 0u8;
        byte.negate_index(3);
        assert_eq!(byte, 0b0000_1000);
        byte.negate_index(3);
        assert_eq!(byte, 0);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn index_past_width_panics() {
        let _ = 0u8.index(8);
    }
}
