//! Single-step execution core for a MIPS-like 32-bit architecture.
//!
//! The crate models one machine instance: 32 general-purpose registers with
//! a hardwired zero register, HI/LO accumulators, a program counter, and a
//! fixed-capacity little-endian byte-addressable memory. [`Emulator::step`]
//! fetches the word at the program counter, advances the counter by one
//! word, then decodes and executes the instruction. Arithmetic overflow and
//! satisfied trap conditions surface as [`StepOutcome::Trap`]; `break`
//! surfaces its encoded payload as [`StepOutcome::Break`]; malformed
//! instruction words and out-of-range accesses surface as [`CoreError`].

/// Fault taxonomy and the per-step outcome contract.
pub mod fault;
pub use fault::{CoreError, StepOutcome};

/// Instruction-word bit layout, operation tables, and word packers.
pub mod encoding;
pub use encoding::{
    classify_function, classify_opcode, encode_i, encode_r, Function, ImmediateOpcode,
    FUNCTION_TABLE, FUNCT_FIELD_MASK, IMMEDIATE_FIELD_MASK, OPCODE_SHIFT, OPCODE_TABLE, RD_SHIFT,
    REGISTER_FIELD_MASK, RS_SHIFT, RT_SHIFT, SHAMT_SHIFT,
};

/// Instruction decode with field extraction.
pub mod decoder;
pub use decoder::{Decoder, ITypeFields, Instruction, RTypeFields};

/// Architectural machine-state primitives.
pub mod state;
pub use state::{RegisterFile, GENERAL_REGISTER_COUNT, RETURN_ADDRESS_REGISTER};

/// Byte-addressable memory with little-endian word access.
pub mod memory;
pub use memory::{Memory, WORD_ACCESS_BYTES};

/// Instruction execution unit.
pub mod execute;
pub use execute::execute_instruction;

/// Emulator facade and step controller.
pub mod emulator;
pub use emulator::Emulator;

#[cfg(test)]
use proptest as _;
#[cfg(test)]
use rstest as _;
