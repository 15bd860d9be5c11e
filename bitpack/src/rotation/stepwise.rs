use crate::BitwiseMut;

// Saves the first bit, shifts the rest of the range down by one and puts the
// saved bit at the end.
fn rotate_left_one<Bits>(bits: &mut Bits, bit_offset: usize, bit_length: usize)
where
    Bits: BitwiseMut + ?Sized,
{
    let first_bit = bits.index(bit_offset);
    let last = bit_offset + bit_length - 1;
    for index in bit_offset..last {
        let next = bits.index(index + 1);
        bits.assign_index(index, next);
    }
    bits.assign_index(last, first_bit);
}

pub(super) fn rotate_left<Bits>(bits: &mut Bits, bit_offset: usize, bit_length: usize, bit_left_amount: usize)
where
    Bits: BitwiseMut + ?Sized,
{
    for _ in 0..bit_left_amount {
        rotate_left_one(bits, bit_offset, bit_length);
    }
}
