mod bitvec;
mod text;

pub use bitvec::{BitVec, BitVecError};
pub use text::{read_bit_lines, write_bit_lines, BitStringError};
