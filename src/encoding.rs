//! Instruction-word bit layout and the closed operation tables.
//!
//! The packers [`encode_r`] and [`encode_i`] define the word format produced
//! by external encoders (assemblers, program generators). The core never
//! calls them during execution; they exist so collaborators and tests build
//! words the decoder is specified against.

#![allow(clippy::cast_lossless)]

/// Shift of the 6-bit opcode field within an instruction word.
pub const OPCODE_SHIFT: u32 = 26;
/// Shift of the 5-bit source register field.
pub const RS_SHIFT: u32 = 21;
/// Shift of the 5-bit target register field.
pub const RT_SHIFT: u32 = 16;
/// Shift of the 5-bit destination register field (R-type only).
pub const RD_SHIFT: u32 = 11;
/// Shift of the 5-bit shift-amount field (R-type only).
pub const SHAMT_SHIFT: u32 = 6;
/// Mask for a 5-bit register or shift-amount field.
pub const REGISTER_FIELD_MASK: u32 = 0x1F;
/// Mask for a 6-bit opcode or function-code field.
pub const FUNCT_FIELD_MASK: u32 = 0x3F;
/// Mask for the 16-bit immediate field (I-type only).
pub const IMMEDIATE_FIELD_MASK: u32 = 0xFFFF;

/// R-type operations, disambiguated by the function code under opcode 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum Function {
    Sll,
    Srl,
    Sra,
    Sllv,
    Srlv,
    Srav,
    Jr,
    Jalr,
    Movz,
    Movn,
    Break,
    Mfhi,
    Mthi,
    Mflo,
    Mtlo,
    Mult,
    Multu,
    Div,
    Divu,
    Add,
    Addu,
    Sub,
    Subu,
    And,
    Or,
    Xor,
    Nor,
    Slt,
    Sltu,
    Tge,
    Tgeu,
    Tlt,
    Tltu,
    Teq,
    Tne,
}

/// Single source-of-truth table of assigned R-type function codes.
///
/// Any function code not present here is unsupported by definition.
pub const FUNCTION_TABLE: &[(u8, Function)] = &[
    (0, Function::Sll),
    (2, Function::Srl),
    (3, Function::Sra),
    (4, Function::Sllv),
    (6, Function::Srlv),
    (7, Function::Srav),
    (8, Function::Jr),
    (9, Function::Jalr),
    (10, Function::Movz),
    (11, Function::Movn),
    (13, Function::Break),
    (16, Function::Mfhi),
    (17, Function::Mthi),
    (18, Function::Mflo),
    (19, Function::Mtlo),
    (24, Function::Mult),
    (25, Function::Multu),
    (26, Function::Div),
    (27, Function::Divu),
    (32, Function::Add),
    (33, Function::Addu),
    (34, Function::Sub),
    (35, Function::Subu),
    (36, Function::And),
    (37, Function::Or),
    (38, Function::Xor),
    (39, Function::Nor),
    (42, Function::Slt),
    (43, Function::Sltu),
    (48, Function::Tge),
    (49, Function::Tgeu),
    (50, Function::Tlt),
    (51, Function::Tltu),
    (52, Function::Teq),
    (54, Function::Tne),
];

/// I-type operations, selected directly by nonzero opcodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum ImmediateOpcode {
    Addi,
    Addiu,
    Slti,
    Sltiu,
    Andi,
    Ori,
    Xori,
    Lui,
}

/// Single source-of-truth table of assigned I-type opcodes.
pub const OPCODE_TABLE: &[(u8, ImmediateOpcode)] = &[
    (8, ImmediateOpcode::Addi),
    (9, ImmediateOpcode::Addiu),
    (10, ImmediateOpcode::Slti),
    (11, ImmediateOpcode::Sltiu),
    (12, ImmediateOpcode::Andi),
    (13, ImmediateOpcode::Ori),
    (14, ImmediateOpcode::Xori),
    (15, ImmediateOpcode::Lui),
];

/// Returns the assigned R-type operation for a function code.
///
/// `None` means the code is unsupported.
#[must_use]
pub fn classify_function(funct: u8) -> Option<Function> {
    FUNCTION_TABLE
        .iter()
        .find_map(|(code, function)| (*code == funct).then_some(*function))
}

/// Returns the assigned I-type operation for a nonzero opcode.
///
/// `None` means the opcode is unsupported.
#[must_use]
pub fn classify_opcode(opcode: u8) -> Option<ImmediateOpcode> {
    OPCODE_TABLE
        .iter()
        .find_map(|(code, operation)| (*code == opcode).then_some(*operation))
}

/// Packs an R-type instruction word from its fields.
///
/// Layout: `opcode(6) | rs(5) | rt(5) | rd(5) | shamt(5) | funct(6)`,
/// most-significant field first. Oversized inputs are masked to field width.
#[must_use]
pub const fn encode_r(opcode: u8, rd: u8, rs: u8, rt: u8, shamt: u8, funct: u8) -> u32 {
    ((opcode as u32 & FUNCT_FIELD_MASK) << OPCODE_SHIFT)
        | ((rs as u32 & REGISTER_FIELD_MASK) << RS_SHIFT)
        | ((rt as u32 & REGISTER_FIELD_MASK) << RT_SHIFT)
        | ((rd as u32 & REGISTER_FIELD_MASK) << RD_SHIFT)
        | ((shamt as u32 & REGISTER_FIELD_MASK) << SHAMT_SHIFT)
        | (funct as u32 & FUNCT_FIELD_MASK)
}

/// Packs an I-type instruction word from its fields.
///
/// Layout: `opcode(6) | rs(5) | rt(5) | immediate(16)`.
#[must_use]
pub const fn encode_i(opcode: u8, rt: u8, rs: u8, immediate: u16) -> u32 {
    ((opcode as u32 & FUNCT_FIELD_MASK) << OPCODE_SHIFT)
        | ((rs as u32 & REGISTER_FIELD_MASK) << RS_SHIFT)
        | ((rt as u32 & REGISTER_FIELD_MASK) << RT_SHIFT)
        | (immediate as u32)
}
