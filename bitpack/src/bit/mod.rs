pub use bitwise::{BitLength, Bitwise, BitwiseMut};

pub mod bitwise;
pub mod bool_containers;
pub mod standard_types;
pub mod unsigned_integers;
