// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! The [Mem] represents the Chip-8's 4 KiB of memory
//!
//! Contains some handy utils for reading and writing, all of which are bounds-checked.

pub mod screen;

use crate::error::{Error, Result};
use std::{
    fmt::{Display, Formatter},
    ops::Range,
    slice::SliceIndex,
};

/// Total addressable memory, in bytes
pub const MEMORY_SIZE: usize = 0x1000;

/// The built-in hex digit glyphs, 5 bytes per digit `0..=F`
#[rustfmt::skip]
pub const CHARSET: [u8; 80] = [
    0xf0, 0x90, 0x90, 0x90, 0xf0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xf0, 0x10, 0xf0, 0x80, 0xf0, // 2
    0xf0, 0x10, 0xf0, 0x10, 0xf0, // 3
    0x90, 0x90, 0xf0, 0x10, 0x10, // 4
    0xf0, 0x80, 0xf0, 0x10, 0xf0, // 5
    0xf0, 0x80, 0xf0, 0x90, 0xf0, // 6
    0xf0, 0x10, 0x20, 0x40, 0x40, // 7
    0xf0, 0x90, 0xf0, 0x90, 0xf0, // 8
    0xf0, 0x90, 0xf0, 0x10, 0xf0, // 9
    0xf0, 0x90, 0xf0, 0x90, 0x90, // A
    0xe0, 0x90, 0xe0, 0x90, 0xe0, // B
    0xf0, 0x80, 0x80, 0x80, 0xf0, // C
    0xe0, 0x90, 0x90, 0x90, 0xe0, // D
    0xf0, 0x80, 0xf0, 0x80, 0xf0, // E
    0xf0, 0x80, 0xf0, 0x80, 0x80, // F
];

/// Represents a named region in memory
///
/// | Region  | Range         |
/// |---------|---------------|
/// | Charset | `000..200`    |
/// | Program | `200..ea0`    |
/// | Stack   | `ea0..f00`    |
/// | Screen  | `f00..1000`   |
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Region {
    /// Interpreter-reserved space. The font lives at the bottom of it.
    Charset,
    /// Program memory
    Program,
    /// Stack space
    Stack,
    /// Screen buffer
    Screen,
}

impl Region {
    /// Gets the range of addresses covered by this [Region]
    /// # Examples
    /// ```rust
    /// # use chip8_vm::*;
    /// assert_eq!(0x200..0xea0, Program.range());
    /// assert_eq!(0x100, Screen.range().len());
    /// ```
    pub const fn range(self) -> Range<usize> {
        match self {
            Region::Charset => 0x000..0x200,
            Region::Program => 0x200..0xea0,
            Region::Stack => 0xea0..0xf00,
            Region::Screen => 0xf00..0x1000,
        }
    }
}

impl Display for Region {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Region::Charset => "Charset",
                Region::Program => "Program",
                Region::Stack => "Stack",
                Region::Screen => "Screen",
            }
        )
    }
}

/// Stores the Chip-8's memory, and knows where each [Region] lives
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Mem {
    memory: Vec<u8>,
}

impl Default for Mem {
    fn default() -> Self {
        Mem {
            memory: vec![0; MEMORY_SIZE],
        }
    }
}

impl Mem {
    /// Constructs a new, zeroed [Mem]
    /// # Examples
    /// ```rust
    /// # use chip8_vm::*;
    /// let mem = Mem::new();
    /// assert_eq!(0x1000, mem.len());
    /// ```
    pub fn new() -> Self {
        Mem::default()
    }

    /// Gets the length of the backing memory
    pub fn len(&self) -> usize {
        self.memory.len()
    }

    /// Returns true if the backing memory contains no elements
    pub fn is_empty(&self) -> bool {
        self.memory.is_empty()
    }

    /// Gets a slice of memory, like [slice::get]
    #[inline(always)]
    pub fn get<I>(&self, index: I) -> Option<&<I as SliceIndex<[u8]>>::Output>
    where
        I: SliceIndex<[u8]>,
    {
        self.memory.get(index)
    }

    /// Gets a mutable slice of memory, like [slice::get_mut]
    #[inline(always)]
    pub fn get_mut<I>(&mut self, index: I) -> Option<&mut <I as SliceIndex<[u8]>>::Output>
    where
        I: SliceIndex<[u8]>,
    {
        self.memory.get_mut(index)
    }

    /// Turns `addr..addr+len` into a range, if the whole thing is in memory.
    ///
    /// On failure, reports the first address that fell off the end.
    fn bounds(&self, addr: usize, len: usize) -> Result<Range<usize>> {
        match addr.checked_add(len) {
            Some(end) if end <= self.len() => Ok(addr..end),
            _ => Err(Error::OutOfBounds {
                addr: addr.max(self.len()),
            }),
        }
    }

    /// Reads a single byte
    /// # Examples
    /// ```rust
    /// # use chip8_vm::*;
    /// let mem = Mem::new();
    /// assert_eq!(0, mem.read_byte(0xfff).unwrap());
    /// assert!(mem.read_byte(0x1000).is_err());
    /// ```
    pub fn read_byte(&self, addr: usize) -> Result<u8> {
        self.memory
            .get(addr)
            .copied()
            .ok_or(Error::OutOfBounds { addr })
    }

    /// Writes a single byte
    pub fn write_byte(&mut self, addr: usize, data: u8) -> Result<()> {
        let byte = self
            .memory
            .get_mut(addr)
            .ok_or(Error::OutOfBounds { addr })?;
        *byte = data;
        Ok(())
    }

    /// Reads a big-endian word from `addr..addr + 2`
    /// # Examples
    /// ```rust
    /// # use chip8_vm::*;
    /// let mut mem = Mem::new();
    /// mem.write_range(0x200, &[0x12, 0x34]).unwrap();
    /// assert_eq!(0x1234, mem.read_word(0x200).unwrap());
    /// ```
    pub fn read_word(&self, addr: usize) -> Result<u16> {
        let range = self.bounds(addr, 2)?;
        let bytes = &self.memory[range];
        Ok(u16::from_be_bytes([bytes[0], bytes[1]]))
    }

    /// Writes a big-endian word to `addr..addr + 2`
    pub fn write_word(&mut self, addr: usize, data: u16) -> Result<()> {
        self.write_range(addr, &data.to_be_bytes())
    }

    /// Reads `len` bytes starting at `addr`
    pub fn read_range(&self, addr: usize, len: usize) -> Result<&[u8]> {
        let range = self.bounds(addr, len)?;
        Ok(&self.memory[range])
    }

    /// Copies `data` into memory starting at `addr`.
    ///
    /// Nothing is written unless all of `data` fits.
    pub fn write_range(&mut self, addr: usize, data: &[u8]) -> Result<()> {
        let range = self.bounds(addr, data.len())?;
        self.memory[range].copy_from_slice(data);
        Ok(())
    }

    /// Gets a slice of a named [Region] of memory
    /// # Examples
    /// ```rust
    /// # use chip8_vm::*;
    /// let mem = Mem::new();
    /// assert!(mem.get_region(Screen).iter().all(|&byte| byte == 0));
    /// ```
    #[inline(always)]
    pub fn get_region(&self, name: Region) -> &[u8] {
        &self.memory[name.range()]
    }

    /// Gets a mutable slice of a named [Region] of memory
    #[inline(always)]
    pub fn get_region_mut(&mut self, name: Region) -> &mut [u8] {
        &mut self.memory[name.range()]
    }

    /// Fills a [Region] with zeroes
    pub fn clear_region(&mut self, name: Region) -> &mut Self {
        self.get_region_mut(name).fill(0);
        self
    }

    /// Loads data into the start of a named [Region]
    ///
    /// Returns [Error::RomTooLarge] if the data won't fit.
    /// # Examples
    /// ```rust
    /// # use chip8_vm::*;
    /// let mut mem = Mem::new();
    /// mem.load_region(Program, b"Hello, world!").unwrap();
    /// assert_eq!(b"Hello", &mem.get_region(Program)[..5]);
    /// assert!(mem.load_region(Charset, &[0; 0x201]).is_err());
    /// ```
    pub fn load_region(&mut self, name: Region, data: &[u8]) -> Result<&mut Self> {
        let region = self.get_region_mut(name);
        if data.len() > region.len() {
            return Err(Error::RomTooLarge {
                len: data.len(),
                max: region.len(),
            });
        }
        region[..data.len()].copy_from_slice(data);
        Ok(self)
    }

    /// Copies the [CHARSET] into the bottom of memory
    pub fn load_charset(&mut self) -> &mut Self {
        self.memory[..CHARSET.len()].copy_from_slice(&CHARSET);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn regions_tile_memory() {
        let regions = [Region::Charset, Region::Program, Region::Stack, Region::Screen];
        assert_eq!(0, regions[0].range().start);
        for pair in regions.windows(2) {
            assert_eq!(pair[0].range().end, pair[1].range().start);
        }
        assert_eq!(MEMORY_SIZE, regions[3].range().end);
    }

    #[test]
    fn out_of_bounds_reports_first_bad_address() {
        let mut mem = Mem::new();
        assert!(matches!(
            mem.read_word(0xfff),
            Err(Error::OutOfBounds { addr: 0x1000 })
        ));
        assert!(matches!(
            mem.write_byte(0x1234, 0),
            Err(Error::OutOfBounds { addr: 0x1234 })
        ));
        assert!(matches!(
            mem.read_range(usize::MAX, 2),
            Err(Error::OutOfBounds { .. })
        ));
    }

    #[test]
    fn partial_write_is_rejected_whole() {
        let mut mem = Mem::new();
        mem.write_range(0xffe, &[1, 2, 3])
            .expect_err("3 bytes don't fit at 0xffe");
        assert_eq!(&[0, 0], mem.read_range(0xffe, 2).unwrap());
    }

    #[test]
    fn load_program_fits_exactly() {
        let mut mem = Mem::new();
        let rom = vec![0xa5; 0xe9f - 0x200 + 1];
        mem.load_region(Region::Program, &rom).unwrap();
        assert_eq!(0xa5, mem.read_byte(0xe9f).unwrap());
        assert_eq!(0x00, mem.read_byte(0xea0).unwrap());
        let too_big = vec![0; rom.len() + 1];
        assert!(matches!(
            mem.load_region(Region::Program, &too_big),
            Err(Error::RomTooLarge { len: 0xca1, max: 0xca0 })
        ));
    }

    #[test]
    fn charset() {
        let mut mem = Mem::new();
        mem.load_charset();
        assert_eq!(&CHARSET, mem.read_range(0, 80).unwrap());
        // glyph for F
        assert_eq!(&[0xf0, 0x80, 0xf0, 0x80, 0x80], mem.read_range(75, 5).unwrap());
    }

    #[test]
    fn clear_region_leaves_neighbours() {
        let mut mem = Mem::new();
        mem.get_region_mut(Region::Stack).fill(0xff);
        mem.get_region_mut(Region::Screen).fill(0xff);
        mem.clear_region(Region::Screen);
        assert!(mem.get_region(Region::Screen).iter().all(|&b| b == 0));
        assert!(mem.get_region(Region::Stack).iter().all(|&b| b == 0xff));
    }
}
