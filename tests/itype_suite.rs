//! Immediate-format (I-type) execution semantics.

#![allow(clippy::pedantic, clippy::nursery)]

use mips32_core::{encode_i, Emulator, StepOutcome};
use proptest::prelude::*;
use rstest::rstest;
#[cfg(feature = "serde")]
use serde as _;
use thiserror as _;

const MEMORY_BYTES: usize = 256;

const OPCODE_ADDI: u8 = 8;
const OPCODE_ADDIU: u8 = 9;
const OPCODE_SLTI: u8 = 10;
const OPCODE_SLTIU: u8 = 11;
const OPCODE_ANDI: u8 = 12;
const OPCODE_ORI: u8 = 13;
const OPCODE_XORI: u8 = 14;
const OPCODE_LUI: u8 = 15;

fn single_step(word: u32, presets: &[(u8, u32)]) -> (Emulator, StepOutcome) {
    let mut vm = Emulator::with_program(MEMORY_BYTES, &[word]).expect("program fits");
    for (index, value) in presets {
        vm.set_register(*index, *value).expect("register in range");
    }
    let outcome = vm.step().expect("supported instruction");
    (vm, outcome)
}

#[test]
fn addi_sign_extends_its_immediate() {
    // 100 + (-16)
    let (vm, outcome) = single_step(encode_i(OPCODE_ADDI, 2, 1, 0xFFF0), &[(1, 100)]);
    assert_eq!(outcome, StepOutcome::Retired);
    assert_eq!(vm.get_register(2), Ok(84));
}

#[rstest]
#[case::positive_overflow(0x7FFF_FFFF, 1)]
#[case::negative_overflow(0x8000_0000, 0xFFFF)] // + (-1)
fn addi_overflow_traps_without_writing(#[case] source: u32, #[case] immediate: u16) {
    let (vm, outcome) = single_step(
        encode_i(OPCODE_ADDI, 2, 1, immediate),
        &[(1, source), (2, 0xAAAA_AAAA)],
    );
    assert_eq!(outcome, StepOutcome::Trap);
    assert_eq!(vm.get_register(2), Ok(0xAAAA_AAAA));
    assert_eq!(vm.pc(), 4);
}

#[test]
fn addiu_wraps_where_addi_traps() {
    let (vm, outcome) = single_step(encode_i(OPCODE_ADDIU, 2, 1, 1), &[(1, 0x7FFF_FFFF)]);
    assert_eq!(outcome, StepOutcome::Retired);
    assert_eq!(vm.get_register(2), Ok(0x8000_0000));

    // 0 + (-1) wraps through zero
    let (vm, outcome) = single_step(encode_i(OPCODE_ADDIU, 2, 1, 0xFFFF), &[]);
    assert_eq!(outcome, StepOutcome::Retired);
    assert_eq!(vm.get_register(2), Ok(0xFFFF_FFFF));
}

#[rstest]
#[case::negative_source(0xFFFF_FFFF, 1, 1)] // -1 < 1
#[case::positive_source(1, 0xFFFF, 0)] // 1 < -1 is false
#[case::both_negative(0xFFFF_FFE0, 0xFFF0, 1)] // -32 < -16
#[case::equal(0xFFFF_FFF0, 0xFFF0, 0)] // -16 < -16 is false
fn slti_compares_as_signed(#[case] source: u32, #[case] immediate: u16, #[case] expected: u32) {
    let (vm, outcome) = single_step(encode_i(OPCODE_SLTI, 2, 1, immediate), &[(1, source)]);
    assert_eq!(outcome, StepOutcome::Retired);
    assert_eq!(vm.get_register(2), Ok(expected));
}

#[rstest]
#[case::small_source_below_extended_immediate(5, 0xFFFF, 1)]
#[case::just_below(0xFFFF_FFFE, 0xFFFF, 1)]
#[case::equal(0xFFFF_FFFF, 0xFFFF, 0)]
#[case::positive_immediate(5, 0x0004, 0)]
fn sltiu_compares_unsigned_against_the_sign_extended_immediate(
    #[case] source: u32,
    #[case] immediate: u16,
    #[case] expected: u32,
) {
    let (vm, outcome) = single_step(encode_i(OPCODE_SLTIU, 2, 1, immediate), &[(1, source)]);
    assert_eq!(outcome, StepOutcome::Retired);
    assert_eq!(vm.get_register(2), Ok(expected));
}

#[rstest]
#[case::andi(OPCODE_ANDI, 0x0000_8888)]
#[case::ori(OPCODE_ORI, 0xCCCC_EEEE)]
#[case::xori(OPCODE_XORI, 0xCCCC_6666)]
fn bitwise_immediates_zero_extend(#[case] opcode: u8, #[case] expected: u32) {
    let (vm, outcome) = single_step(
        encode_i(opcode, 2, 1, 0xAAAA),
        &[(1, 0xCCCC_CCCC)],
    );
    assert_eq!(outcome, StepOutcome::Retired);
    assert_eq!(vm.get_register(2), Ok(expected));
}

#[test]
fn lui_merges_the_source_low_half_under_the_immediate() {
    let (vm, outcome) = single_step(encode_i(OPCODE_LUI, 2, 1, 0xAAAA), &[(1, 0xCCCC_CCCC)]);
    assert_eq!(outcome, StepOutcome::Retired);
    assert_eq!(vm.get_register(2), Ok(0xAAAA_CCCC));
}

#[test]
fn lui_from_register_zero_loads_a_bare_upper_half() {
    let (vm, outcome) = single_step(encode_i(OPCODE_LUI, 2, 0, 0xAAAA), &[]);
    assert_eq!(outcome, StepOutcome::Retired);
    assert_eq!(vm.get_register(2), Ok(0xAAAA_0000));
}

proptest! {
    #[test]
    fn addiu_is_wrapping_addition_of_the_extended_immediate(
        source in any::<u32>(),
        immediate in any::<u16>(),
    ) {
        let (vm, outcome) = single_step(encode_i(OPCODE_ADDIU, 2, 1, immediate), &[(1, source)]);
        prop_assert_eq!(outcome, StepOutcome::Retired);
        let extended = immediate as i16 as i32 as u32;
        prop_assert_eq!(vm.get_register(2), Ok(source.wrapping_add(extended)));
    }

    #[test]
    fn andi_result_never_exceeds_sixteen_bits(
        source in any::<u32>(),
        immediate in any::<u16>(),
    ) {
        let (vm, _) = single_step(encode_i(OPCODE_ANDI, 2, 1, immediate), &[(1, source)]);
        let result = vm.get_register(2).unwrap();
        prop_assert_eq!(result, source & u32::from(immediate));
        prop_assert!(result <= 0xFFFF);
    }
}
