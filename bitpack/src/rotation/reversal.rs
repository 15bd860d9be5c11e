use crate::BitwiseMut;

/// Reverses `[start, end)` in place.
fn reverse<Bits>(bits: &mut Bits, start: usize, end: usize)
where
    Bits: BitwiseMut + ?Sized,
{
    if end <= start {
        return;
    }
    let (mut low, mut high) = (start, end - 1);
    while low < high {
        bits.swap_indices(low, high);
        low += 1;
        high -= 1;
    }
}

// rotate_left(ab) = reverse(reverse(a) reverse(b))
pub(super) fn rotate_left<Bits>(bits: &mut Bits, bit_offset: usize, bit_length: usize, bit_left_amount: usize)
where
    Bits: BitwiseMut + ?Sized,
{
    let split = bit_offset + bit_left_amount;
    let end = bit_offset + bit_length;
    reverse(bits, bit_offset, split);
    reverse(bits, split, end);
    reverse(bits, bit_offset, end);
}
