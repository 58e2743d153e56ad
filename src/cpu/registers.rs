// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! The CPU-visible register file, and the two 60Hz timers

use super::{Adr, Reg};
use crate::error::{Error, Result};

/// Where programs are loaded, and where execution begins
pub const START: Adr = 0x200;

/// Represents the Chip-8's registers
///
/// vF doubles as the flag register for carry, borrow, shift-out, and sprite collision.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Registers {
    pub(super) v: [u8; 16],
    pub(super) i: Adr,
    pub(super) pc: Adr,
    pub(super) delay: u8,
    pub(super) sound: u8,
}

impl Default for Registers {
    fn default() -> Self {
        Registers {
            v: [0; 16],
            i: 0,
            pc: START,
            delay: 0,
            sound: 0,
        }
    }
}

impl Registers {
    /// Gets a general purpose register.
    /// If the register doesn't exist, returns [Error::InvalidRegister]
    pub fn v(&self, reg: Reg) -> Result<u8> {
        self.v
            .get(reg)
            .copied()
            .ok_or(Error::InvalidRegister { reg })
    }

    /// Sets a general purpose register.
    /// If the register doesn't exist, returns [Error::InvalidRegister]
    /// # Examples
    /// ```rust
    /// # use chip8_vm::*;
    /// let mut reg = Registers::default();
    /// reg.set_v(0x4, 0x41).unwrap();
    /// assert_eq!(0x41, reg.v(0x4).unwrap());
    /// assert!(reg.set_v(0x10, 0).is_err());
    /// ```
    pub fn set_v(&mut self, reg: Reg, value: u8) -> Result<()> {
        let gpr = self
            .v
            .get_mut(reg)
            .ok_or(Error::InvalidRegister { reg })?;
        *gpr = value;
        Ok(())
    }

    /// Gets a slice of all the general purpose registers
    pub fn v_all(&self) -> &[u8] {
        self.v.as_slice()
    }

    /// Gets the I register
    pub fn i(&self) -> Adr {
        self.i
    }

    /// Sets the I register
    pub fn set_i(&mut self, i: Adr) {
        self.i = i;
    }

    /// Gets the program counter
    pub fn pc(&self) -> Adr {
        self.pc
    }

    /// Sets the program counter, truncated to 12 bits
    pub fn set_pc(&mut self, pc: Adr) {
        self.pc = pc & 0xfff;
    }

    /// Gets the delay timer
    pub fn delay(&self) -> u8 {
        self.delay
    }

    /// Gets the sound timer
    pub fn sound(&self) -> u8 {
        self.sound
    }

    /// Counts both timers down by one, stopping at zero.
    ///
    /// Call this at 60Hz, regardless of how many instructions are being run.
    /// # Examples
    /// ```rust
    /// # use chip8_vm::*;
    /// let mut reg = Registers::default();
    /// reg.tick_timers();
    /// assert_eq!((0, 0), (reg.delay(), reg.sound()));
    /// ```
    pub fn tick_timers(&mut self) {
        self.delay = self.delay.saturating_sub(1);
        self.sound = self.sound.saturating_sub(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_0x200() {
        let reg = Registers::default();
        assert_eq!(0x200, reg.pc());
        assert_eq!(0, reg.i());
        assert_eq!(&[0; 16], reg.v_all());
    }

    #[test]
    fn invalid_register() {
        let mut reg = Registers::default();
        let before = reg.clone();
        assert!(matches!(
            reg.set_v(0x21345134, 0xff),
            Err(Error::InvalidRegister { reg: 0x21345134 })
        ));
        assert!(reg.v(16).is_err());
        assert_eq!(before, reg);
    }

    #[test]
    fn timers_count_down_independently() {
        let mut reg = Registers {
            delay: 3,
            sound: 1,
            ..Default::default()
        };
        reg.tick_timers();
        assert_eq!((2, 0), (reg.delay(), reg.sound()));
        reg.tick_timers();
        reg.tick_timers();
        reg.tick_timers();
        assert_eq!((0, 0), (reg.delay(), reg.sound()));
    }

    #[test]
    fn pc_is_twelve_bits() {
        let mut reg = Registers::default();
        reg.set_pc(0x1234);
        assert_eq!(0x234, reg.pc());
    }
}
