//! Packed bit vectors with arbitrary in-place subrange rotation.
//!
//! [`BitVec`] stores bits eight to a byte. [`rotation`] rotates any subrange
//! left or right by any amount without allocating, using only the
//! [`Bitwise`]/[`BitwiseMut`] accessors, so the same code runs on a
//! `Vec<bool>` reference model.

pub mod bit;
pub use bit::{BitLength, Bitwise, BitwiseMut};

pub mod vec;
pub use vec::{read_bit_lines, write_bit_lines, BitStringError, BitVec, BitVecError};

pub mod rotation;
pub use rotation::{rotate, rotate_with, RotationAlgorithm};
