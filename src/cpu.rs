// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! Decodes and runs instructions


pub mod behavior;
pub mod flags;
pub mod instruction;
pub mod quirks;
pub mod registers;
pub mod stack;

use self::{
    flags::Flags,
    instruction::{
        disassembler::{Dis, Disassembler},
        Insn,
    },
    quirks::Quirks,
    registers::Registers,
    stack::CallStack,
};
use crate::{
    error::{Error, Result},
    mem::Mem,
};
use imperative_rs::InstructionSet;
use std::fmt::Debug;

type Reg = usize;
type Adr = u16;
type Nib = u8;

/// A snapshot of the 16 hex keys, indexed by key value. `true` is held.
pub type Keys = [bool; 16];

/// Things the driver should know about after a [CPU::step]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct SideEffects {
    /// The screen was modified (`00e0` or `Dxyn`)
    pub redraw: bool,
    /// The CPU is waiting on `Fx0a`, and needs a key to make progress
    pub awaiting_key: bool,
}

impl SideEffects {
    /// Merges the effects of two steps
    pub fn merge(self, other: SideEffects) -> SideEffects {
        SideEffects {
            redraw: self.redraw || other.redraw,
            awaiting_key: other.awaiting_key,
        }
    }
}

/// Represents the internal state of the CPU interpreter
#[derive(Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CPU {
    /// Flags that control how the CPU behaves, but which aren't inherent to the
    /// chip-8. Includes [Quirks], debug mode, and the keypause state.
    pub flags: Flags,
    reg: Registers,
    stack: CallStack,
    // Execution data
    cycle: usize,
    #[cfg_attr(feature = "serde", serde(skip))]
    disassembler: Dis,
}

// public interface
impl CPU {
    /// Constructs a new CPU, taking all configurable parameters
    /// # Examples
    /// ```rust
    /// # use chip8_vm::*;
    /// let cpu = CPU::new(Flags::default(), Dis::default());
    /// assert_eq!(0x200, cpu.pc());
    /// ```
    pub fn new(flags: Flags, disassembler: Dis) -> Self {
        CPU {
            flags,
            disassembler,
            ..Default::default()
        }
    }

    /// Gets the [Registers]
    pub fn registers(&self) -> &Registers {
        &self.reg
    }

    /// Gets the [Registers] mutably, for drivers and debuggers
    pub fn registers_mut(&mut self) -> &mut Registers {
        &mut self.reg
    }

    /// Gets the [CallStack]
    pub fn stack(&self) -> &CallStack {
        &self.stack
    }

    /// Sets a general purpose register in the CPU.
    /// If the register doesn't exist, returns [Error::InvalidRegister]
    /// # Examples
    /// ```rust
    /// # use chip8_vm::*;
    /// // Create a new CPU, and set v4 to 0x41
    /// let mut cpu = CPU::default();
    /// cpu.set_v(0x4, 0x41).unwrap();
    /// assert_eq!(0x41, cpu.v()[4]);
    /// ```
    pub fn set_v(&mut self, reg: Reg, value: u8) -> Result<()> {
        self.reg.set_v(reg, value)
    }

    /// Gets a slice of the entire general purpose registers
    pub fn v(&self) -> &[u8] {
        self.reg.v_all()
    }

    /// Gets the program counter
    pub fn pc(&self) -> Adr {
        self.reg.pc()
    }

    /// Gets the I register
    pub fn i(&self) -> Adr {
        self.reg.i()
    }

    /// Gets the value in the Sound Timer register
    pub fn sound(&self) -> u8 {
        self.reg.sound()
    }

    /// Gets the value in the Delay Timer register
    pub fn delay(&self) -> u8 {
        self.reg.delay()
    }

    /// Returns true while the sound timer is running, and a tone should play
    pub fn sound_active(&self) -> bool {
        self.reg.sound() > 0
    }

    /// Gets the number of instructions the CPU has executed
    pub fn cycle(&self) -> usize {
        self.cycle
    }

    /// Counts the delay and sound timers down by one.
    ///
    /// The driver should call this at 60Hz, independent of [CPU::step].
    pub fn tick_timers(&mut self) {
        self.reg.tick_timers();
    }

    /// Resets the CPU.
    ///
    /// Touches the registers, timers, stack pointer, keypause and cycle count.
    ///
    /// Does not touch [Quirks], debug, pause, or memory.
    pub fn reset(&mut self) {
        self.flags.keypause = None;
        self.reg = Registers::default();
        self.stack = CallStack::default();
        self.cycle = 0;
    }

    /// Executes a single instruction, or polls for a key if `Fx0a` is pending.
    ///
    /// On error, pc is left pointing at the offending instruction,
    /// and nothing else has been modified.
    ///
    /// Returns [Error::UnknownOpcode] if the instruction at `pc` is not part of Chip-8.
    /// # Examples
    /// ```rust
    /// # use chip8_vm::*;
    /// let mut cpu = CPU::default();
    /// let mut mem = Mem::new();
    /// mem.load_region(Program, &[
    ///     0x00, 0xe0, // cls
    ///     0x12, 0x02, // jump 0x202 (pc)
    /// ]).unwrap();
    /// let effects = cpu.step(&mut mem, &[false; 16])
    ///     .expect("0x00e0 (cls) should be a valid opcode.");
    /// assert!(effects.redraw);
    /// assert_eq!(0x202, cpu.pc());
    /// assert_eq!(1, cpu.cycle());
    /// ```
    /// Returns [Error::UnknownOpcode] if the instruction is not implemented.
    /// ```rust
    /// # use chip8_vm::*;
    /// let mut cpu = CPU::default();
    /// let mut mem = Mem::new();
    /// mem.load_region(Program, &[0xff, 0xff]).unwrap();
    /// cpu.step(&mut mem, &[false; 16])
    ///     .expect_err("Should return Error::UnknownOpcode { 0xffff }");
    /// assert_eq!(0x200, cpu.pc());
    /// ```
    pub fn step(&mut self, mem: &mut Mem, keys: &Keys) -> Result<SideEffects> {
        // Do nothing if paused
        if self.flags.pause {
            return Ok(SideEffects::default());
        }
        if let Some(x) = self.flags.keypause {
            return self.poll_key(x, keys);
        }
        let pc = self.reg.pc;
        // fetch opcode
        let word = mem.read_word(pc as usize)?;

        // Print opcode disassembly:
        if self.flags.debug && log::log_enabled!(log::Level::Debug) {
            log::debug!(
                "{:3} {:03x}: {:<36}",
                self.cycle,
                pc,
                self.disassembler.once(word)
            );
        }

        // decode opcode
        let (_, insn) =
            Insn::decode(&word.to_be_bytes()).map_err(|_| Error::UnknownOpcode { word })?;
        self.reg.pc = pc + 2;
        match self.execute(mem, keys, insn) {
            Ok(effects) => {
                self.cycle += 1;
                Ok(effects)
            }
            Err(e) => {
                self.reg.pc = pc;
                Err(e)
            }
        }
    }

    /// Finishes an `Fx0a` once any key is held, taking the lowest-numbered one
    ///
    /// Returns [Error::InvalidRegister] if the waiting register doesn't exist
    fn poll_key(&mut self, x: Reg, keys: &Keys) -> Result<SideEffects> {
        Ok(match keys.iter().position(|&held| held) {
            Some(key) => {
                self.reg.set_v(x, key as u8)?;
                self.flags.keypause = None;
                SideEffects::default()
            }
            None => SideEffects {
                awaiting_key: true,
                ..Default::default()
            },
        })
    }

    /// Dumps the current state of all CPU registers, and the cycle count
    /// # Examples
    /// ```rust
    /// # use chip8_vm::*;
    /// let cpu = CPU::default();
    /// println!("{}", cpu.dump());
    /// ```
    /// outputs
    /// ```text
    /// PC: 0200, SP: 0ea0, I: 0000
    /// v0: 00 v1: 00 v2: 00 v3: 00
    /// v4: 00 v5: 00 v6: 00 v7: 00
    /// v8: 00 v9: 00 vA: 00 vB: 00
    /// vC: 00 vD: 00 vE: 00 vF: 00
    /// DLY: 0, SND: 0, CYC:      0
    /// ```
    pub fn dump(&self) -> String {
        format!(
            "PC: {:04x}, SP: {:04x}, I: {:04x}\n{}DLY: {}, SND: {}, CYC: {:6}",
            self.reg.pc,
            self.stack.sp(),
            self.reg.i,
            self.reg
                .v
                .into_iter()
                .enumerate()
                .map(|(i, gpr)| {
                    format!(
                        "v{i:X}: {gpr:02x}{}",
                        match i % 4 {
                            3 => "\n",
                            _ => " ",
                        }
                    )
                })
                .collect::<String>(),
            self.reg.delay,
            self.reg.sound,
            self.cycle,
        )
    }
}

impl Debug for CPU {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CPU")
            .field("flags", &self.flags)
            .field("reg", &self.reg)
            .field("stack", &self.stack)
            .field("cycle", &self.cycle)
            .finish_non_exhaustive()
    }
}

impl Default for CPU {
    /// Constructs a new CPU with sane defaults
    ///
    /// | value  | default | description
    /// |--------|---------|------------
    /// | pc     |`0x0200` | Start of program memory
    /// | sp     |`0x0ea0` | Bottom of the stack
    /// | debug  | `false` | Live disassembly off
    fn default() -> Self {
        CPU {
            flags: Flags::default(),
            reg: Registers::default(),
            stack: CallStack::default(),
            cycle: 0,
            disassembler: Dis::default(),
        }
    }
}
