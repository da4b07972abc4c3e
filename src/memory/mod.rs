//! Fixed-capacity byte-addressable memory with little-endian word access.
//!
//! Every access validates that its full byte span lies inside the capacity
//! chosen at construction; violations surface as
//! [`CoreError::AddressOutOfRange`] and leave memory untouched. Word
//! accesses have no alignment requirement: a word is the four consecutive
//! bytes starting at the given address, lowest-addressed byte least
//! significant.

use crate::fault::CoreError;

/// Byte width of one 32-bit word access (and of one instruction fetch).
pub const WORD_ACCESS_BYTES: u8 = 4;

/// Zero-initialized byte array of fixed capacity.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct Memory {
    bytes: Box<[u8]>,
}

impl Memory {
    /// Allocates a zeroed memory of `capacity` bytes.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            bytes: vec![0; capacity].into_boxed_slice(),
        }
    }

    /// Allocates a zeroed memory and loads `program` at consecutive
    /// 4-byte-aligned addresses starting at 0, one little-endian word each.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::ProgramTooLarge`] when the program does not fit
    /// in `capacity` bytes.
    pub fn with_program(capacity: usize, program: &[u32]) -> Result<Self, CoreError> {
        let footprint = program
            .len()
            .checked_mul(usize::from(WORD_ACCESS_BYTES))
            .unwrap_or(usize::MAX);
        if footprint > capacity {
            return Err(CoreError::ProgramTooLarge {
                words: program.len(),
                capacity,
            });
        }

        let mut memory = Self::new(capacity);
        for (slot, word) in memory
            .bytes
            .chunks_exact_mut(usize::from(WORD_ACCESS_BYTES))
            .zip(program)
        {
            slot.copy_from_slice(&word.to_le_bytes());
        }
        Ok(memory)
    }

    /// Returns the fixed capacity in bytes.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.bytes.len()
    }

    /// Reads the byte at `addr`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::AddressOutOfRange`] when `addr` is outside the
    /// capacity.
    pub fn load_byte(&self, addr: u32) -> Result<u8, CoreError> {
        let start = self.span_start(addr, 1)?;
        Ok(self.bytes[start])
    }

    /// Writes `value` to the byte at `addr`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::AddressOutOfRange`] when `addr` is outside the
    /// capacity.
    pub fn store_byte(&mut self, value: u8, addr: u32) -> Result<(), CoreError> {
        let start = self.span_start(addr, 1)?;
        self.bytes[start] = value;
        Ok(())
    }

    /// Reads the little-endian 32-bit word at `addr..addr + 4`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::AddressOutOfRange`] when any byte of the span is
    /// outside the capacity.
    pub fn load_word(&self, addr: u32) -> Result<u32, CoreError> {
        let start = self.span_start(addr, WORD_ACCESS_BYTES)?;
        Ok(u32::from_le_bytes([
            self.bytes[start],
            self.bytes[start + 1],
            self.bytes[start + 2],
            self.bytes[start + 3],
        ]))
    }

    /// Writes `value` as a little-endian word to `addr..addr + 4`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::AddressOutOfRange`] when any byte of the span is
    /// outside the capacity.
    pub fn store_word(&mut self, value: u32, addr: u32) -> Result<(), CoreError> {
        let start = self.span_start(addr, WORD_ACCESS_BYTES)?;
        self.bytes[start..start + usize::from(WORD_ACCESS_BYTES)]
            .copy_from_slice(&value.to_le_bytes());
        Ok(())
    }

    fn span_start(&self, addr: u32, len: u8) -> Result<usize, CoreError> {
        let out_of_range = CoreError::AddressOutOfRange {
            addr,
            len,
            capacity: self.bytes.len(),
        };
        let start = usize::try_from(addr).map_err(|_| out_of_range)?;
        let end = start.checked_add(usize::from(len)).ok_or(out_of_range)?;
        if end > self.bytes.len() {
            return Err(out_of_range);
        }
        Ok(start)
    }
}

#[cfg(test)]
mod tests {
    use super::{Memory, WORD_ACCESS_BYTES};
    use crate::fault::CoreError;

    #[test]
    fn fresh_memory_is_zeroed_to_capacity() {
        let memory = Memory::new(128);
        assert_eq!(memory.capacity(), 128);
        for addr in 0..128 {
            assert_eq!(memory.load_byte(addr), Ok(0));
        }
    }

    #[test]
    fn byte_round_trip_at_every_address() {
        let mut memory = Memory::new(128);
        for addr in 0..128 {
            memory.store_byte(0xFF, addr).expect("in range");
            assert_eq!(memory.load_byte(addr), Ok(0xFF));
        }
    }

    #[test]
    fn words_are_stored_little_endian() {
        let mut memory = Memory::new(16);
        memory.store_word(0x0102_0304, 0).expect("in range");
        assert_eq!(memory.load_byte(0), Ok(0x04));
        assert_eq!(memory.load_byte(1), Ok(0x03));
        assert_eq!(memory.load_byte(2), Ok(0x02));
        assert_eq!(memory.load_byte(3), Ok(0x01));
        assert_eq!(memory.load_word(0), Ok(0x0102_0304));
    }

    #[test]
    fn unaligned_word_access_is_supported() {
        let mut memory = Memory::new(16);
        memory.store_word(0xAABB_CCDD, 1).expect("in range");
        assert_eq!(memory.load_word(1), Ok(0xAABB_CCDD));
        assert_eq!(memory.load_byte(0), Ok(0));
        assert_eq!(memory.load_byte(1), Ok(0xDD));
    }

    #[test]
    fn out_of_range_accesses_are_rejected() {
        let mut memory = Memory::new(128);
        assert_eq!(
            memory.load_byte(128),
            Err(CoreError::AddressOutOfRange {
                addr: 128,
                len: 1,
                capacity: 128,
            })
        );
        assert_eq!(
            memory.store_word(0, 125),
            Err(CoreError::AddressOutOfRange {
                addr: 125,
                len: WORD_ACCESS_BYTES,
                capacity: 128,
            })
        );
        // the last full word span is fine
        assert_eq!(memory.store_word(0x5555_5555, 124), Ok(()));
        assert_eq!(
            memory.load_word(u32::MAX),
            Err(CoreError::AddressOutOfRange {
                addr: u32::MAX,
                len: WORD_ACCESS_BYTES,
                capacity: 128,
            })
        );
    }

    #[test]
    fn program_words_land_at_consecutive_aligned_addresses() {
        let program = [0x01, 0x02, 0x03, 0x04, 0x0F];
        let memory = Memory::with_program(128, &program).expect("program fits");
        for (index, word) in program.iter().enumerate() {
            let addr = u32::try_from(index * 4).expect("address fits");
            assert_eq!(memory.load_word(addr), Ok(*word));
        }
        for addr in 20..128 {
            assert_eq!(memory.load_byte(addr), Ok(0));
        }
    }

    #[test]
    fn oversized_program_is_rejected() {
        let program = [0_u32; 33];
        assert_eq!(
            Memory::with_program(128, &program),
            Err(CoreError::ProgramTooLarge {
                words: 33,
                capacity: 128,
            })
        );
        assert!(Memory::with_program(128, &[0_u32; 32]).is_ok());
    }
}
