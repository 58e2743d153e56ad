// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)
#![allow(clippy::bad_bit_mask)]
//! Decodes 16-bit words into [Insn]s, and prints them as mnemonics

pub mod disassembler;

use imperative_rs::InstructionSet;
use std::fmt::Display;

#[allow(non_camel_case_types, non_snake_case, missing_docs)]
#[derive(Clone, Copy, Debug, InstructionSet, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
/// One variant per base Chip-8 opcode.
///
/// Field letters follow the opcode strings: `x`/`y` name registers, `A` is a
/// 12-bit address, `B` an immediate byte, and `n` a nibble.
pub enum Insn {
    /// `00e0`: zero the framebuffer
    #[opcode = "0x00e0"]
    cls,
    /// `00ee`: pop a return address into pc. Underflows on an empty stack
    #[opcode = "0x00ee"]
    ret,
    /// `1aaa`: pc = a
    #[opcode = "0x1AAA"]
    jmp { A: u16 },
    /// `2aaa`: push the address after this one, then pc = a. Overflows past 16 calls
    #[opcode = "0x2AAA"]
    call { A: u16 },
    /// `3xbb`: skip if vX == b
    #[opcode = "0x3xBB"]
    seb { B: u8, x: usize },
    /// `4xbb`: skip if vX != b
    #[opcode = "0x4xBB"]
    sneb { B: u8, x: usize },
    /// `5xy0`: skip if vX == vY
    #[opcode = "0x5xy0"]
    se { y: usize, x: usize },
    /// `6xbb`: vX = b
    #[opcode = "0x6xBB"]
    movb { B: u8, x: usize },
    /// `7xbb`: vX += b, wrapping. vF is untouched
    #[opcode = "0x7xBB"]
    addb { B: u8, x: usize },
    /// `8xy0`: vX = vY
    #[opcode = "0x8xy0"]
    mov { y: usize, x: usize },
    /// `8xy1`: vX |= vY
    #[opcode = "0x8xy1"]
    or { y: usize, x: usize },
    /// `8xy2`: vX &= vY
    #[opcode = "0x8xy2"]
    and { y: usize, x: usize },
    /// `8xy3`: vX ^= vY
    #[opcode = "0x8xy3"]
    xor { y: usize, x: usize },
    /// `8xy4`: vX += vY, vF = carry
    #[opcode = "0x8xy4"]
    add { y: usize, x: usize },
    /// `8xy5`: vX -= vY, vF = no borrow
    #[opcode = "0x8xy5"]
    sub { y: usize, x: usize },
    /// `8xy6`: vX >>= 1, vF = the bit shifted out. vY is ignored
    #[opcode = "0x8xy6"]
    shr { y: usize, x: usize },
    /// `8xy7`: vX = vY - vX, vF = no borrow
    #[opcode = "0x8xy7"]
    bsub { y: usize, x: usize },
    /// `8xyE`: vX <<= 1, vF = the bit shifted out. vY is ignored
    #[opcode = "0x8xye"]
    shl { y: usize, x: usize },
    /// `9xy0`: skip if vX != vY
    #[opcode = "0x9xy0"]
    sne { y: usize, x: usize },
    /// `Aaaa`: I = a
    #[opcode = "0xaAAA"]
    movI { A: u16 },
    /// `Baaa`: pc = a + v0. Out of bounds past `0xfff`
    #[opcode = "0xbAAA"]
    jmpr { A: u16 },
    /// `Cxbb`: vX = random byte & b
    #[opcode = "0xcxBB"]
    rand { B: u8, x: usize },
    /// `Dxyn`: xor an n-row sprite from I onto the screen at (vX, vY), vF = collision
    #[opcode = "0xdxyn"]
    draw { y: usize, x: usize, n: u8 },
    /// `Ex9E`: skip if the key in the low nibble of vX is held
    #[opcode = "0xex9e"]
    sek { x: usize },
    /// `ExA1`: skip if the key in the low nibble of vX is not held
    #[opcode = "0xexa1"]
    snek { x: usize },
    /// `Fx07`: vX = delay timer
    #[opcode = "0xfx07"]
    getdt { x: usize },
    /// `Fx0A`: block until a key is held, then vX = that key
    #[opcode = "0xfx0a"]
    waitk { x: usize },
    /// `Fx15`: delay timer = vX
    #[opcode = "0xfx15"]
    setdt { x: usize },
    /// `Fx18`: sound timer = vX
    #[opcode = "0xfx18"]
    movst { x: usize },
    /// `Fx1E`: I += vX, kept to 12 bits, vF = overflow
    #[opcode = "0xfx1e"]
    addI { x: usize },
    /// `Fx29`: I = address of the font glyph for vX
    #[opcode = "0xfx29"]
    font { x: usize },
    /// `Fx33`: write vX as three decimal digits to I, I+1, I+2
    #[opcode = "0xfx33"]
    bcd { x: usize },
    /// `Fx55`: copy v0..=vX to memory at I. I is unchanged
    #[opcode = "0xfx55"]
    dmao { x: usize },
    /// `Fx65`: copy memory at I into v0..=vX. I is unchanged
    #[opcode = "0xfx65"]
    dmai { x: usize },
}

impl Display for Insn {
    #[rustfmt::skip]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Insn::cls               => write!(f, "cls    "),
            Insn::ret               => write!(f, "ret    "),
            Insn::jmp { A }         => write!(f, "jmp    {A:03x}"),
            Insn::call { A }        => write!(f, "call   {A:03x}"),
            Insn::seb { B, x }      => write!(f, "se     #{B:02x}, v{x:X}"),
            Insn::sneb { B, x }     => write!(f, "sne    #{B:02x}, v{x:X}"),
            Insn::se { y, x }       => write!(f, "se     v{y:X}, v{x:X}"),
            Insn::movb { B, x }     => write!(f, "mov    #{B:02x}, v{x:X}"),
            Insn::addb { B, x }     => write!(f, "add    #{B:02x}, v{x:X}"),
            Insn::mov { y, x }      => write!(f, "mov    v{y:X}, v{x:X}"),
            Insn::or { y, x }       => write!(f, "or     v{y:X}, v{x:X}"),
            Insn::and { y, x }      => write!(f, "and    v{y:X}, v{x:X}"),
            Insn::xor { y, x }      => write!(f, "xor    v{y:X}, v{x:X}"),
            Insn::add { y, x }      => write!(f, "add    v{y:X}, v{x:X}"),
            Insn::sub { y, x }      => write!(f, "sub    v{y:X}, v{x:X}"),
            Insn::shr { y: _, x }   => write!(f, "shr    v{x:X}"),
            Insn::bsub { y, x }     => write!(f, "bsub   v{y:X}, v{x:X}"),
            Insn::shl { y: _, x }   => write!(f, "shl    v{x:X}"),
            Insn::sne { y, x }      => write!(f, "sne    v{y:X}, v{x:X}"),
            Insn::movI { A }        => write!(f, "mov    ${A:03x}, I"),
            Insn::jmpr { A }        => write!(f, "jmp    ${A:03x}+v0"),
            Insn::rand { B, x }     => write!(f, "rand   #{B:02x}, v{x:X}"),
            Insn::draw { y, x, n }  => write!(f, "draw   #{n:x}, v{x:X}, v{y:X}"),
            Insn::sek { x }         => write!(f, "sek    v{x:X}"),
            Insn::snek { x }        => write!(f, "snek   v{x:X}"),
            Insn::getdt { x }       => write!(f, "mov    DT, v{x:X}"),
            Insn::waitk { x }       => write!(f, "waitk  v{x:X}"),
            Insn::setdt { x }       => write!(f, "mov    v{x:X}, DT"),
            Insn::movst { x }       => write!(f, "mov    v{x:X}, ST"),
            Insn::addI { x }        => write!(f, "add    v{x:X}, I"),
            Insn::font { x }        => write!(f, "font   v{x:X}, I"),
            Insn::bcd { x }         => write!(f, "bcd    v{x:X}, &I"),
            Insn::dmao { x }        => write!(f, "dmao   v{x:X}"),
            Insn::dmai { x }        => write!(f, "dmai   v{x:X}"),
        }
    }
}
