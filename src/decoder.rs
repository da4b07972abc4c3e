//! Raw instruction-word field extraction.
//!
//! Decoding is pure field extraction: opcode 0 selects the R-type layout and
//! every nonzero opcode selects the I-type layout. No validation happens
//! here; unsupported opcode/function combinations are rejected by the
//! execution unit, where the closed operation tables live.

#![allow(clippy::cast_possible_truncation)]

use crate::encoding::{
    FUNCT_FIELD_MASK, IMMEDIATE_FIELD_MASK, OPCODE_SHIFT, RD_SHIFT, REGISTER_FIELD_MASK, RS_SHIFT,
    RT_SHIFT, SHAMT_SHIFT,
};

/// Fields of an R-type instruction word (opcode 0).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct RTypeFields {
    /// Source register index (5 bits).
    pub rs: u8,
    /// Target register index (5 bits).
    pub rt: u8,
    /// Destination register index (5 bits).
    pub rd: u8,
    /// Shift amount (5 bits).
    pub shamt: u8,
    /// Function code selecting the operation (6 bits).
    pub funct: u8,
}

/// Fields of an I-type instruction word (nonzero opcode).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct ITypeFields {
    /// Opcode selecting the operation (6 bits, nonzero).
    pub opcode: u8,
    /// Source register index (5 bits).
    pub rs: u8,
    /// Target (destination) register index (5 bits).
    pub rt: u8,
    /// 16-bit immediate operand, extension decided per operation.
    pub immediate: u16,
}

/// A decoded instruction word, tagged by layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum Instruction {
    /// R-type layout selected by opcode 0.
    Register(RTypeFields),
    /// I-type layout selected by a nonzero opcode.
    Immediate(ITypeFields),
}

/// Instruction decoder for the 32-bit instruction word format.
pub struct Decoder;

impl Decoder {
    /// Extracts the fields of a raw 32-bit instruction word.
    #[must_use]
    pub const fn decode(word: u32) -> Instruction {
        let opcode = (word >> OPCODE_SHIFT) as u8;
        if opcode == 0 {
            Instruction::Register(RTypeFields {
                rs: ((word >> RS_SHIFT) & REGISTER_FIELD_MASK) as u8,
                rt: ((word >> RT_SHIFT) & REGISTER_FIELD_MASK) as u8,
                rd: ((word >> RD_SHIFT) & REGISTER_FIELD_MASK) as u8,
                shamt: ((word >> SHAMT_SHIFT) & REGISTER_FIELD_MASK) as u8,
                funct: (word & FUNCT_FIELD_MASK) as u8,
            })
        } else {
            Instruction::Immediate(ITypeFields {
                opcode,
                rs: ((word >> RS_SHIFT) & REGISTER_FIELD_MASK) as u8,
                rt: ((word >> RT_SHIFT) & REGISTER_FIELD_MASK) as u8,
                immediate: (word & IMMEDIATE_FIELD_MASK) as u16,
            })
        }
    }
}
