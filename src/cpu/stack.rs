// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! The call stack, which lives in the [Stack](Region::Stack) region of [Mem]

use super::Adr;
use crate::{
    error::{Error, Result},
    mem::{Mem, Region},
};

/// Number of return addresses the stack can hold
pub const DEPTH: usize = 16;

/// The stack pointer of the Chip-8's call stack.
///
/// Entries are stored big-endian in [Mem], growing upward from `0xea0`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CallStack {
    sp: Adr,
}

impl Default for CallStack {
    fn default() -> Self {
        CallStack { sp: Self::BASE }
    }
}

impl CallStack {
    const BASE: Adr = Region::Stack.range().start as Adr;
    const LIMIT: Adr = Self::BASE + 2 * DEPTH as Adr;

    /// Gets the stack pointer
    pub fn sp(&self) -> Adr {
        self.sp
    }

    /// Gets the number of return addresses on the stack
    pub fn depth(&self) -> usize {
        (self.sp - Self::BASE) as usize / 2
    }

    /// Returns true if there's nothing to return to
    pub fn is_empty(&self) -> bool {
        self.sp == Self::BASE
    }

    /// Pushes a return address.
    /// If the stack is full, returns [Error::StackOverflow]
    /// # Examples
    /// ```rust
    /// # use chip8_vm::*;
    /// let (mut stack, mut mem) = (CallStack::default(), Mem::new());
    /// stack.push(&mut mem, 0x234).unwrap();
    /// assert_eq!(0xea2, stack.sp());
    /// assert_eq!(0x234, mem.read_word(0xea0).unwrap());
    /// ```
    pub fn push(&mut self, mem: &mut Mem, addr: Adr) -> Result<()> {
        if self.sp >= Self::LIMIT {
            return Err(Error::StackOverflow);
        }
        mem.write_word(self.sp as usize, addr)?;
        self.sp += 2;
        Ok(())
    }

    /// Pops the most recent return address.
    /// If the stack is empty, returns [Error::StackUnderflow]
    pub fn pop(&mut self, mem: &Mem) -> Result<Adr> {
        if self.is_empty() {
            return Err(Error::StackUnderflow);
        }
        let addr = mem.read_word(self.sp as usize - 2)?;
        self.sp -= 2;
        Ok(addr)
    }
}
