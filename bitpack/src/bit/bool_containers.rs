use crate::{BitLength, Bitwise, BitwiseMut};

// Bit traits for [bool] and Vec<bool>

impl BitLength for [bool] {
    #[inline]
    fn bit_len(&self) -> usize {
        self.len()
    }
    const BLOCK_BIT_LEN: usize = 1;
}

impl BitLength for Vec<bool> {
    #[inline]
    fn bit_len(&self) -> usize {
        self.len()
    }
    const BLOCK_BIT_LEN: usize = 1;
}

impl Bitwise for [bool] {
    #[inline]
    fn index(&self, index: usize) -> bool {
        self[index]
    }

    #[inline]
    fn weight(&self) -> usize {
        self.iter().filter(|bit| **bit).count()
    }
}

impl BitwiseMut for [bool] {
    #[inline]
    fn assign_index(&mut self, index: usize, to: bool) {
        self[index] = to;
    }

    #[inline]
    fn negate_index(&mut self, index: usize) {
        self[index] ^= true;
    }

    #[inline]
    fn swap_indices(&mut self, left: usize, right: usize) {
        self.swap(left, right);
    }
}

impl Bitwise for Vec<bool> {
    #[inline]
    fn index(&self, index: usize) -> bool {
        self.as_slice().index(index)
    }

    #[inline]
    fn weight(&self) -> usize {
        self.as_slice().weight()
    }
}

impl BitwiseMut for Vec<bool> {
    #[inline]
    fn assign_index(&mut self, index: usize, to: bool) {
        self.as_mut_slice().assign_index(index, to);
    }

    #[inline]
    fn negate_index(&mut self, index: usize) {
        self.as_mut_slice().negate_index(index);
    }

    #[inline]
    fn swap_indices(&mut self, left: usize, right: usize) {
        self.as_mut_slice().swap_indices(left, right);
    }
}
