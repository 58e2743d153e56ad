// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! Error type for the Chip-8 VM

use thiserror::Error;

/// Result type, equivalent to [std::result::Result]<T, [enum@Error]>
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the Chip-8 VM.
///
/// Every variant aborts the cycle that raised it. The driver decides what happens next.
#[derive(Debug, Error)]
pub enum Error {
    /// The word at pc is not part of the base instruction set
    #[error("opcode {word:04x} not recognized")]
    UnknownOpcode {
        /// The offending word
        word: u16,
    },
    /// Tried to touch memory outside `0x000..=0xfff`
    #[error("address {addr:04x} is out of bounds")]
    OutOfBounds {
        /// The first address which fell outside of memory
        addr: usize,
    },
    /// Tried to call a subroutine with all 16 stack slots in use
    #[error("stack overflow: call depth exceeds 16")]
    StackOverflow,
    /// Tried to return with an empty stack
    #[error("stack underflow: return with no caller")]
    StackUnderflow,
    /// The ROM doesn't fit in program memory
    #[error("rom is {len} bytes, but only {max} bytes fit in program memory")]
    RomTooLarge {
        /// Length of the rejected ROM
        len: usize,
        /// Size of the program region
        max: usize,
    },
    /// Tried to get/set an out-of-bounds register
    #[error("tried to access register v{reg:X} which does not exist")]
    InvalidRegister {
        /// The offending register
        reg: usize,
    },
    /// Error originated in [std::io]
    #[error(transparent)]
    IoError(#[from] std::io::Error),
}
