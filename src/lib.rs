// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! This crate implements the core of a Chip-8 virtual machine: memory, registers,
//! the call stack, and the 35 instructions which operate on them.
//!
//! Everything outside the machine (windows, audio, keyboards, files, wall clocks)
//! belongs to the driver. The driver calls [Chip8::step] once per CPU cycle with a
//! fresh [Keys] snapshot, calls [Chip8::tick_timers] at 60Hz (see [TimerClock]),
//! and reads [Chip8::framebuffer_bytes] whenever it wants to draw.

pub mod clock;
pub mod cpu;
pub mod error;
pub mod mem;

pub use clock::TimerClock;
pub use cpu::{
    flags::Flags,
    instruction::{
        disassembler::{Dis, Disassembler},
        Insn,
    },
    quirks::Quirks,
    registers::Registers,
    stack::CallStack,
    Keys, SideEffects, CPU,
};
pub use error::{Error, Result};
pub use mem::{screen::ScreenView, Mem, Region, Region::*};

/// A whole Chip-8: the [CPU] and the [Mem] it runs on
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Chip8 {
    /// Registers, stack pointer, and flags
    pub cpu: CPU,
    /// Font, program, stack, and screen
    pub mem: Mem,
}

impl Default for Chip8 {
    fn default() -> Self {
        Self::new(Flags::default())
    }
}

impl Chip8 {
    /// Creates a new Chip-8 with the font loaded, and pc at `0x200`
    pub fn new(flags: Flags) -> Self {
        let mut ch8 = Chip8 {
            cpu: CPU::new(flags, Dis::default()),
            mem: Mem::new(),
        };
        ch8.load_font();
        ch8
    }

    /// Copies a ROM into program memory at `0x200`, clearing whatever was there.
    ///
    /// Returns [Error::RomTooLarge] (and changes nothing) if the ROM won't fit.
    /// # Examples
    /// ```rust
    /// # use chip8_vm::*;
    /// let mut ch8 = Chip8::default();
    /// ch8.load_rom(&[0x60, 0x05]).unwrap();
    /// assert_eq!(0x6005, ch8.mem.read_word(0x200).unwrap());
    /// assert!(ch8.load_rom(&[0; 0xca1]).is_err());
    /// ```
    pub fn load_rom(&mut self, rom: &[u8]) -> Result<&mut Self> {
        let max = Program.range().len();
        if rom.len() > max {
            return Err(Error::RomTooLarge {
                len: rom.len(),
                max,
            });
        }
        self.mem.clear_region(Program).load_region(Program, rom)?;
        Ok(self)
    }

    /// Copies the built-in font to `0x000..0x050`
    pub fn load_font(&mut self) -> &mut Self {
        self.mem.load_charset();
        self
    }

    /// Runs one CPU cycle. See [CPU::step]
    pub fn step(&mut self, keys: &Keys) -> Result<SideEffects> {
        self.cpu.step(&mut self.mem, keys)
    }

    /// Runs up to `steps` CPU cycles with the same [Keys], stopping early
    /// if the CPU starts waiting for a key.
    ///
    /// The returned [SideEffects] are merged across every cycle that ran.
    pub fn multistep(&mut self, keys: &Keys, steps: usize) -> Result<SideEffects> {
        let mut effects = SideEffects::default();
        for _ in 0..steps {
            effects = effects.merge(self.step(keys)?);
            if effects.awaiting_key {
                break;
            }
        }
        Ok(effects)
    }

    /// Counts the delay and sound timers down by one. Call at 60Hz.
    pub fn tick_timers(&mut self) {
        self.cpu.tick_timers();
    }

    /// Gets the 256 bytes of screen memory, for rendering
    pub fn framebuffer_bytes(&self) -> &[u8] {
        self.mem.framebuffer()
    }

    /// Resets the CPU, and clears the screen and stack. The ROM and font stay put.
    pub fn reset(&mut self) {
        self.cpu.reset();
        self.mem.clear_region(Stack).clear_region(Screen);
    }
}

/// Common imports for the Chip-8 VM
pub mod prelude {
    pub use super::*;
}
