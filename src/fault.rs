use thiserror::Error;

/// Errors surfaced by the external accessors and by [`crate::Emulator::step`].
///
/// These report programming errors in the driving host or in the supplied
/// instruction stream. Architectural traps are not errors: a trap is the
/// [`StepOutcome::Trap`] value of a *successful* step, and the core remains
/// steppable afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum CoreError {
    /// I-type opcode outside the supported set.
    #[error("unsupported opcode {opcode:#04x}")]
    UnsupportedOpcode {
        /// Raw 6-bit opcode field of the offending word.
        opcode: u8,
    },
    /// R-type function code outside the supported set.
    #[error("unsupported function code {funct:#04x}")]
    UnsupportedFunction {
        /// Raw 6-bit function code field of the offending word.
        funct: u8,
    },
    /// Memory access whose byte span falls outside `[0, capacity)`.
    #[error("address {addr:#010x} (+{len} bytes) outside memory of {capacity} bytes")]
    AddressOutOfRange {
        /// First byte address of the rejected access.
        addr: u32,
        /// Width of the rejected access in bytes.
        len: u8,
        /// Capacity of the memory the access was issued against.
        capacity: usize,
    },
    /// General-purpose register index outside `[0, 31]`.
    #[error("register index {index} out of range")]
    RegisterOutOfRange {
        /// The rejected register index.
        index: u8,
    },
    /// Initial program does not fit in the requested memory capacity.
    #[error("program of {words} words does not fit in {capacity} bytes")]
    ProgramTooLarge {
        /// Number of 32-bit words in the rejected program.
        words: usize,
        /// Requested memory capacity in bytes.
        capacity: usize,
    },
}

/// Result of one completed fetch-decode-execute step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum StepOutcome {
    /// Instruction retired with no exceptional condition.
    Retired,
    /// Arithmetic overflow in `add`/`addi`/`sub`, or a satisfied
    /// conditional-trap instruction. The destination register was not
    /// written.
    Trap,
    /// A `break` instruction retired; the payload is returned verbatim for
    /// caller interpretation.
    Break {
        /// Diagnostic payload packed from the instruction's fields.
        code: u32,
    },
}

impl StepOutcome {
    /// Flattens the outcome into the raw result-code contract: `0` for
    /// normal completion, `1` for a trap, and the diagnostic payload for
    /// `break`.
    #[must_use]
    pub const fn code(self) -> u32 {
        match self {
            Self::Retired => 0,
            Self::Trap => 1,
            Self::Break { code } => code,
        }
    }

    /// Returns `true` for the arithmetic/conditional trap outcome.
    #[must_use]
    pub const fn is_trap(self) -> bool {
        matches!(self, Self::Trap)
    }
}
