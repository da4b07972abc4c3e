/// Number of architecturally visible general-purpose registers.
pub const GENERAL_REGISTER_COUNT: usize = 32;

/// Link target written by `jalr`, regardless of the encoded destination.
pub const RETURN_ADDRESS_REGISTER: u8 = 31;

/// Full architectural register state: 32 general-purpose registers, the
/// HI/LO accumulator pair, and the program counter.
///
/// Register 0 is hardwired to zero: writes to it are discarded and its
/// stored cell is never mutated. HI, LO, and the program counter are
/// reachable only through the execution unit and the step controller, not
/// through the indexed register interface.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct RegisterFile {
    gpr: [u32; GENERAL_REGISTER_COUNT],
    hi: u32,
    lo: u32,
    pc: u32,
}

impl Default for RegisterFile {
    fn default() -> Self {
        Self {
            gpr: [0; GENERAL_REGISTER_COUNT],
            hi: 0,
            lo: 0,
            pc: 0,
        }
    }
}

impl RegisterFile {
    /// Reads a general-purpose register. Index 0 always reads 0.
    ///
    /// Callers guarantee `index < 32`; decoded 5-bit fields satisfy this by
    /// construction and the external surface bounds-checks first.
    #[must_use]
    pub(crate) const fn gpr(&self, index: u8) -> u32 {
        self.gpr[index as usize]
    }

    /// Writes a general-purpose register. Writes to index 0 are discarded.
    pub(crate) const fn set_gpr(&mut self, index: u8, value: u32) {
        if index != 0 {
            self.gpr[index as usize] = value;
        }
    }

    /// Reads the HI accumulator register.
    #[must_use]
    pub(crate) const fn hi(&self) -> u32 {
        self.hi
    }

    /// Writes the HI accumulator register.
    pub(crate) const fn set_hi(&mut self, value: u32) {
        self.hi = value;
    }

    /// Reads the LO accumulator register.
    #[must_use]
    pub(crate) const fn lo(&self) -> u32 {
        self.lo
    }

    /// Writes the LO accumulator register.
    pub(crate) const fn set_lo(&mut self, value: u32) {
        self.lo = value;
    }

    /// Reads the program counter.
    #[must_use]
    pub(crate) const fn pc(&self) -> u32 {
        self.pc
    }

    /// Writes the program counter.
    pub(crate) const fn set_pc(&mut self, value: u32) {
        self.pc = value;
    }
}

#[cfg(test)]
mod tests {
    use super::{RegisterFile, GENERAL_REGISTER_COUNT, RETURN_ADDRESS_REGISTER};

    #[test]
    fn registers_default_to_zero() {
        let regs = RegisterFile::default();
        for index in 0..GENERAL_REGISTER_COUNT {
            assert_eq!(regs.gpr(u8::try_from(index).expect("index fits")), 0);
        }
        assert_eq!(regs.hi(), 0);
        assert_eq!(regs.lo(), 0);
        assert_eq!(regs.pc(), 0);
    }

    #[test]
    fn register_zero_discards_writes() {
        let mut regs = RegisterFile::default();
        regs.set_gpr(0, 0xDEAD_BEEF);
        assert_eq!(regs.gpr(0), 0);
    }

    #[test]
    fn each_register_is_tracked_independently() {
        let mut regs = RegisterFile::default();
        for index in 1..32_u8 {
            regs.set_gpr(index, 0x1000 + u32::from(index));
        }
        for index in 1..32_u8 {
            assert_eq!(regs.gpr(index), 0x1000 + u32::from(index));
        }
        assert_eq!(regs.gpr(0), 0);
    }

    #[test]
    fn accumulators_and_pc_are_independent_of_the_bank() {
        let mut regs = RegisterFile::default();
        regs.set_hi(0x1111_1111);
        regs.set_lo(0x2222_2222);
        regs.set_pc(0x44);
        regs.set_gpr(RETURN_ADDRESS_REGISTER, 0x3333_3333);

        assert_eq!(regs.hi(), 0x1111_1111);
        assert_eq!(regs.lo(), 0x2222_2222);
        assert_eq!(regs.pc(), 0x44);
        assert_eq!(regs.gpr(RETURN_ADDRESS_REGISTER), 0x3333_3333);
    }
}
