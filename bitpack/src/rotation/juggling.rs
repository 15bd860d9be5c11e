use crate::BitwiseMut;

fn gcd(mut left: usize, mut right: usize) -> usize {
    while right != 0 {
        (left, right) = (right, left % right);
    }
    left
}

// Each of the gcd(length, amount) cycles starts at a leader and pulls every
// position from `amount` places ahead, wrapping within the range.
pub(super) fn rotate_left<Bits>(bits: &mut Bits, bit_offset: usize, bit_length: usize, bit_left_amount: usize)
where
    Bits: BitwiseMut + ?Sized,
{
    for leader in 0..gcd(bit_length, bit_left_amount) {
        let saved = bits.index(bit_offset + leader);
        let mut current = leader;
        loop {
            let mut next = current + bit_left_amount;
            if next >= bit_length {
                next -= bit_length;
            }
            if next == leader {
                break;
            }
            let bit = bits.index(bit_offset + next);
            bits.assign_index(bit_offset + current, bit);
            current = next;
        }
        bits.assign_index(bit_offset + current, saved);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gcd_small_values() {
        assert_eq!(gcd(12, 8), 4);
        assert_eq!(gcd(7, 3), 1);
        assert_eq!(gcd(5, 0), 5);
    }
}
