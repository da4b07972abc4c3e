//! Emulator facade: construction, external accessors, and the step
//! controller.

use crate::decoder::Decoder;
use crate::execute::execute_instruction;
use crate::fault::{CoreError, StepOutcome};
use crate::memory::{Memory, WORD_ACCESS_BYTES};
use crate::state::{RegisterFile, GENERAL_REGISTER_COUNT};

/// A single-stepped machine instance owning its register file and memory.
///
/// Each call to [`Emulator::step`] runs exactly one fetch-decode-execute
/// cycle. The emulator has no concept of halting: callers decide whether to
/// keep stepping based on the returned outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct Emulator {
    registers: RegisterFile,
    memory: Memory,
}

impl Emulator {
    /// Creates an emulator with zeroed registers and `capacity` bytes of
    /// zeroed memory.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            registers: RegisterFile::default(),
            memory: Memory::new(capacity),
        }
    }

    /// Creates an emulator with `program` loaded at address 0, one
    /// little-endian word per 4 bytes.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::ProgramTooLarge`] when the program does not fit
    /// in `capacity` bytes.
    pub fn with_program(capacity: usize, program: &[u32]) -> Result<Self, CoreError> {
        Ok(Self {
            registers: RegisterFile::default(),
            memory: Memory::with_program(capacity, program)?,
        })
    }

    /// Reads general-purpose register `index`. Index 0 always reads 0.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::RegisterOutOfRange`] when `index >= 32`.
    pub fn get_register(&self, index: u8) -> Result<u32, CoreError> {
        Self::check_register_index(index)?;
        Ok(self.registers.gpr(index))
    }

    /// Writes general-purpose register `index`. Writes to index 0 are
    /// silently discarded.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::RegisterOutOfRange`] when `index >= 32`.
    pub fn set_register(&mut self, index: u8, value: u32) -> Result<(), CoreError> {
        Self::check_register_index(index)?;
        self.registers.set_gpr(index, value);
        Ok(())
    }

    /// Reads the byte at `addr`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::AddressOutOfRange`] for addresses outside the
    /// memory capacity.
    pub fn load_byte(&self, addr: u32) -> Result<u8, CoreError> {
        self.memory.load_byte(addr)
    }

    /// Writes `value` to the byte at `addr`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::AddressOutOfRange`] for addresses outside the
    /// memory capacity.
    pub fn store_byte(&mut self, value: u8, addr: u32) -> Result<(), CoreError> {
        self.memory.store_byte(value, addr)
    }

    /// Reads the little-endian 32-bit word at `addr`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::AddressOutOfRange`] when any byte of the word
    /// span is outside the memory capacity.
    pub fn load_word(&self, addr: u32) -> Result<u32, CoreError> {
        self.memory.load_word(addr)
    }

    /// Writes `value` as a little-endian 32-bit word at `addr`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::AddressOutOfRange`] when any byte of the word
    /// span is outside the memory capacity.
    pub fn store_word(&mut self, value: u32, addr: u32) -> Result<(), CoreError> {
        self.memory.store_word(value, addr)
    }

    /// Returns the current program counter (a byte address into memory).
    #[must_use]
    pub const fn pc(&self) -> u32 {
        self.registers.pc()
    }

    /// Returns the fixed memory capacity in bytes.
    #[must_use]
    pub const fn memory_capacity(&self) -> usize {
        self.memory.capacity()
    }

    /// Runs one fetch-decode-execute cycle.
    ///
    /// The word at the program counter is fetched, the program counter is
    /// advanced by one word width *before* execution (control transfers
    /// overwrite it; there is no delay slot), and the decoded instruction is
    /// executed.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::AddressOutOfRange`] when the program counter
    /// points outside memory, or the execution unit's unsupported-operation
    /// errors. Traps are not errors; see [`StepOutcome`].
    pub fn step(&mut self) -> Result<StepOutcome, CoreError> {
        let pc = self.registers.pc();
        let word = self.memory.load_word(pc)?;
        self.registers
            .set_pc(pc.wrapping_add(u32::from(WORD_ACCESS_BYTES)));

        let instruction = Decoder::decode(word);
        execute_instruction(instruction, &mut self.registers)
    }

    fn check_register_index(index: u8) -> Result<(), CoreError> {
        if usize::from(index) < GENERAL_REGISTER_COUNT {
            Ok(())
        } else {
            Err(CoreError::RegisterOutOfRange { index })
        }
    }
}
