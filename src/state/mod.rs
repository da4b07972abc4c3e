//! Architectural machine-state primitives.

/// General-purpose register bank, HI/LO, and the program counter.
pub mod registers;

pub use registers::{RegisterFile, GENERAL_REGISTER_COUNT, RETURN_ADDRESS_REGISTER};
