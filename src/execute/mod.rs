//! Execution unit: operation dispatch and ALU semantics.
//!
//! All arithmetic works on 32-bit two's-complement bit patterns; "signed"
//! operations reinterpret the pattern as `i32`, "unsigned" as `u32`.
//! Multiply and divide compute in explicit 64-bit intermediates and split
//! the result across HI and LO. A trapping instruction performs no
//! destination write: the only observable effect is the trap outcome.

#![allow(
    clippy::cast_lossless,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss
)]

use crate::decoder::{ITypeFields, Instruction, RTypeFields};
use crate::encoding::{classify_function, classify_opcode, Function, ImmediateOpcode};
use crate::fault::{CoreError, StepOutcome};
use crate::state::registers::RETURN_ADDRESS_REGISTER;
use crate::state::RegisterFile;

/// Variable shift amounts use only the low 5 bits of the amount register.
const SHIFT_AMOUNT_MASK: u32 = 0x1F;

#[derive(Clone, Copy)]
enum ShiftOp {
    LeftLogical,
    RightLogical,
    RightArithmetic,
}

#[derive(Clone, Copy)]
enum TrapCondition {
    GreaterEqual,
    GreaterEqualUnsigned,
    LessThan,
    LessThanUnsigned,
    Equal,
    NotEqual,
}

#[derive(Clone, Copy)]
enum Signedness {
    Signed,
    Unsigned,
}

/// Executes one decoded instruction against the register file.
///
/// The program counter has already been advanced past the instruction, so
/// control transfers simply overwrite it (no delay slot).
///
/// # Errors
///
/// Returns [`CoreError::UnsupportedFunction`] or
/// [`CoreError::UnsupportedOpcode`] when the instruction classifies outside
/// the supported operation tables. No register state is modified in that
/// case.
pub fn execute_instruction(
    instruction: Instruction,
    regs: &mut RegisterFile,
) -> Result<StepOutcome, CoreError> {
    match instruction {
        Instruction::Register(fields) => execute_register(fields, regs),
        Instruction::Immediate(fields) => execute_immediate(fields, regs),
    }
}

fn execute_register(
    fields: RTypeFields,
    regs: &mut RegisterFile,
) -> Result<StepOutcome, CoreError> {
    let Some(function) = classify_function(fields.funct) else {
        return Err(CoreError::UnsupportedFunction {
            funct: fields.funct,
        });
    };

    let outcome = match function {
        Function::Sll => shift(regs, fields, ShiftOp::LeftLogical, u32::from(fields.shamt)),
        Function::Srl => shift(regs, fields, ShiftOp::RightLogical, u32::from(fields.shamt)),
        Function::Sra => shift(
            regs,
            fields,
            ShiftOp::RightArithmetic,
            u32::from(fields.shamt),
        ),
        Function::Sllv => {
            let amount = regs.gpr(fields.rs) & SHIFT_AMOUNT_MASK;
            shift(regs, fields, ShiftOp::LeftLogical, amount)
        }
        Function::Srlv => {
            let amount = regs.gpr(fields.rs) & SHIFT_AMOUNT_MASK;
            shift(regs, fields, ShiftOp::RightLogical, amount)
        }
        Function::Srav => {
            let amount = regs.gpr(fields.rs) & SHIFT_AMOUNT_MASK;
            shift(regs, fields, ShiftOp::RightArithmetic, amount)
        }
        Function::Jr => {
            regs.set_pc(regs.gpr(fields.rs));
            StepOutcome::Retired
        }
        Function::Jalr => {
            // Links into r31 unconditionally; the encoded rd field is
            // ignored. The already-advanced program counter is the address
            // of the following instruction.
            regs.set_gpr(RETURN_ADDRESS_REGISTER, regs.pc());
            regs.set_pc(regs.gpr(fields.rs));
            StepOutcome::Retired
        }
        Function::Movz => {
            if regs.gpr(fields.rt) == 0 {
                regs.set_gpr(fields.rd, regs.gpr(fields.rs));
            }
            StepOutcome::Retired
        }
        Function::Movn => {
            if regs.gpr(fields.rt) != 0 {
                regs.set_gpr(fields.rd, regs.gpr(fields.rs));
            }
            StepOutcome::Retired
        }
        Function::Break => StepOutcome::Break {
            code: break_code(fields),
        },
        Function::Mfhi => {
            regs.set_gpr(fields.rd, regs.hi());
            StepOutcome::Retired
        }
        Function::Mthi => {
            regs.set_hi(regs.gpr(fields.rs));
            StepOutcome::Retired
        }
        Function::Mflo => {
            regs.set_gpr(fields.rd, regs.lo());
            StepOutcome::Retired
        }
        Function::Mtlo => {
            regs.set_lo(regs.gpr(fields.rs));
            StepOutcome::Retired
        }
        Function::Mult => multiply(regs, fields, Signedness::Signed),
        Function::Multu => multiply(regs, fields, Signedness::Unsigned),
        Function::Div => divide(regs, fields, Signedness::Signed),
        Function::Divu => divide(regs, fields, Signedness::Unsigned),
        Function::Add => {
            let (lhs, rhs) = (regs.gpr(fields.rs), regs.gpr(fields.rt));
            add_checked(regs, fields.rd, lhs, rhs)
        }
        Function::Addu => {
            let sum = regs.gpr(fields.rs).wrapping_add(regs.gpr(fields.rt));
            regs.set_gpr(fields.rd, sum);
            StepOutcome::Retired
        }
        Function::Sub => {
            let (lhs, rhs) = (regs.gpr(fields.rs), regs.gpr(fields.rt));
            sub_checked(regs, fields.rd, lhs, rhs)
        }
        Function::Subu => {
            let difference = regs.gpr(fields.rs).wrapping_sub(regs.gpr(fields.rt));
            regs.set_gpr(fields.rd, difference);
            StepOutcome::Retired
        }
        Function::And => {
            regs.set_gpr(fields.rd, regs.gpr(fields.rs) & regs.gpr(fields.rt));
            StepOutcome::Retired
        }
        Function::Or => {
            regs.set_gpr(fields.rd, regs.gpr(fields.rs) | regs.gpr(fields.rt));
            StepOutcome::Retired
        }
        Function::Xor => {
            regs.set_gpr(fields.rd, regs.gpr(fields.rs) ^ regs.gpr(fields.rt));
            StepOutcome::Retired
        }
        Function::Nor => {
            regs.set_gpr(fields.rd, !(regs.gpr(fields.rs) | regs.gpr(fields.rt)));
            StepOutcome::Retired
        }
        Function::Slt => {
            let less = (regs.gpr(fields.rs) as i32) < (regs.gpr(fields.rt) as i32);
            regs.set_gpr(fields.rd, u32::from(less));
            StepOutcome::Retired
        }
        Function::Sltu => {
            let less = regs.gpr(fields.rs) < regs.gpr(fields.rt);
            regs.set_gpr(fields.rd, u32::from(less));
            StepOutcome::Retired
        }
        Function::Tge => conditional_trap(regs, fields, TrapCondition::GreaterEqual),
        Function::Tgeu => conditional_trap(regs, fields, TrapCondition::GreaterEqualUnsigned),
        Function::Tlt => conditional_trap(regs, fields, TrapCondition::LessThan),
        Function::Tltu => conditional_trap(regs, fields, TrapCondition::LessThanUnsigned),
        Function::Teq => conditional_trap(regs, fields, TrapCondition::Equal),
        Function::Tne => conditional_trap(regs, fields, TrapCondition::NotEqual),
    };

    Ok(outcome)
}

fn execute_immediate(
    fields: ITypeFields,
    regs: &mut RegisterFile,
) -> Result<StepOutcome, CoreError> {
    let Some(operation) = classify_opcode(fields.opcode) else {
        return Err(CoreError::UnsupportedOpcode {
            opcode: fields.opcode,
        });
    };

    let source = regs.gpr(fields.rs);
    let sign_extended = fields.immediate as i16 as i32 as u32;
    let zero_extended = u32::from(fields.immediate);

    let outcome = match operation {
        ImmediateOpcode::Addi => add_checked(regs, fields.rt, source, sign_extended),
        ImmediateOpcode::Addiu => {
            regs.set_gpr(fields.rt, source.wrapping_add(sign_extended));
            StepOutcome::Retired
        }
        ImmediateOpcode::Slti => {
            let less = (source as i32) < (sign_extended as i32);
            regs.set_gpr(fields.rt, u32::from(less));
            StepOutcome::Retired
        }
        ImmediateOpcode::Sltiu => {
            // Unsigned compare against the sign-extended immediate.
            regs.set_gpr(fields.rt, u32::from(source < sign_extended));
            StepOutcome::Retired
        }
        ImmediateOpcode::Andi => {
            regs.set_gpr(fields.rt, source & zero_extended);
            StepOutcome::Retired
        }
        ImmediateOpcode::Ori => {
            regs.set_gpr(fields.rt, source | zero_extended);
            StepOutcome::Retired
        }
        ImmediateOpcode::Xori => {
            regs.set_gpr(fields.rt, source ^ zero_extended);
            StepOutcome::Retired
        }
        ImmediateOpcode::Lui => {
            // Upper half from the immediate, lower half from the source
            // register's low 16 bits.
            regs.set_gpr(fields.rt, (zero_extended << 16) | (source & 0xFFFF));
            StepOutcome::Retired
        }
    };

    Ok(outcome)
}

const fn shift(
    regs: &mut RegisterFile,
    fields: RTypeFields,
    op: ShiftOp,
    amount: u32,
) -> StepOutcome {
    let value = regs.gpr(fields.rt);
    let shifted = match op {
        ShiftOp::LeftLogical => value << amount,
        ShiftOp::RightLogical => value >> amount,
        ShiftOp::RightArithmetic => ((value as i32) >> amount) as u32,
    };
    regs.set_gpr(fields.rd, shifted);
    StepOutcome::Retired
}

fn add_checked(regs: &mut RegisterFile, destination: u8, lhs: u32, rhs: u32) -> StepOutcome {
    (lhs as i32).checked_add(rhs as i32).map_or(
        StepOutcome::Trap,
        |sum| {
            regs.set_gpr(destination, sum as u32);
            StepOutcome::Retired
        },
    )
}

fn sub_checked(regs: &mut RegisterFile, destination: u8, lhs: u32, rhs: u32) -> StepOutcome {
    (lhs as i32).checked_sub(rhs as i32).map_or(
        StepOutcome::Trap,
        |difference| {
            regs.set_gpr(destination, difference as u32);
            StepOutcome::Retired
        },
    )
}

fn multiply(regs: &mut RegisterFile, fields: RTypeFields, sign: Signedness) -> StepOutcome {
    let lhs = regs.gpr(fields.rs);
    let rhs = regs.gpr(fields.rt);
    let product = match sign {
        Signedness::Signed => (i64::from(lhs as i32) * i64::from(rhs as i32)) as u64,
        Signedness::Unsigned => u64::from(lhs) * u64::from(rhs),
    };
    regs.set_hi((product >> 32) as u32);
    regs.set_lo(product as u32);
    StepOutcome::Retired
}

fn divide(regs: &mut RegisterFile, fields: RTypeFields, sign: Signedness) -> StepOutcome {
    let dividend = regs.gpr(fields.rs);
    let divisor = regs.gpr(fields.rt);
    // A zero divisor has no defined quotient; HI and LO are left unchanged.
    if divisor == 0 {
        return StepOutcome::Retired;
    }

    match sign {
        Signedness::Signed => {
            let dividend = dividend as i32;
            let divisor = divisor as i32;
            regs.set_lo(dividend.wrapping_div(divisor) as u32);
            regs.set_hi(dividend.wrapping_rem(divisor) as u32);
        }
        Signedness::Unsigned => {
            regs.set_lo(dividend / divisor);
            regs.set_hi(dividend % divisor);
        }
    }
    StepOutcome::Retired
}

const fn conditional_trap(
    regs: &RegisterFile,
    fields: RTypeFields,
    condition: TrapCondition,
) -> StepOutcome {
    let lhs = regs.gpr(fields.rs);
    let rhs = regs.gpr(fields.rt);
    let satisfied = match condition {
        TrapCondition::GreaterEqual => (lhs as i32) >= (rhs as i32),
        TrapCondition::GreaterEqualUnsigned => lhs >= rhs,
        TrapCondition::LessThan => (lhs as i32) < (rhs as i32),
        TrapCondition::LessThanUnsigned => lhs < rhs,
        TrapCondition::Equal => lhs == rhs,
        TrapCondition::NotEqual => lhs != rhs,
    };
    if satisfied {
        StepOutcome::Trap
    } else {
        StepOutcome::Retired
    }
}

const fn break_code(fields: RTypeFields) -> u32 {
    ((fields.rs as u32) << 16) | fields.shamt as u32
}
