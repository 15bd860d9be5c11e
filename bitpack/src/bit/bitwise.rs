/// Number of addressable bits in a container.
///
/// `BLOCK_BIT_LEN` is the width of the unit the container stores bits in;
/// a packed byte container reports 8, a `[bool]` reports 1.
pub trait BitLength {
    fn bit_len(&self) -> usize;
    const BLOCK_BIT_LEN: usize;
}

/// Read access to individual bits.
///
/// See also [`BitwiseMut`].
pub trait Bitwise: BitLength {
    /// Returns the bit at `index`.
    ///
    /// # Panics
    ///
    /// Implementations panic when `index >= self.bit_len()`.
    fn index(&self, index: usize) -> bool;

    #[inline]
    fn weight(&self) -> usize {
        (0..self.bit_len()).filter(|&index| self.index(index)).count()
    }

    #[inline]
    fn is_zero(&self) -> bool {
        self.weight() == 0
    }
}

/// Write access to individual bits.
///
/// Every mutation is expressed through [`assign_index`](BitwiseMut::assign_index),
/// so algorithms written against this trait never touch the storage directly.
pub trait BitwiseMut: Bitwise {
    fn assign_index(&mut self, index: usize, to: bool);

    #[inline]
    fn negate_index(&mut self, index: usize) {
        let bit = self.index(index);
        self.assign_index(index, !bit);
    }

    #[inline]
    fn swap_indices(&mut self, left: usize, right: usize) {
        let left_bit = self.index(left);
        let right_bit = self.index(right);
        if left_bit != right_bit {
            self.assign_index(left, right_bit);
            self.assign_index(right, left_bit);
        }
    }
}
