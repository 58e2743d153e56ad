// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! Pixel-level access to the [Screen](Region::Screen) region of [Mem]
//!
//! The screen is 64x32 at 1bpp, row-major, 8 bytes per row, MSB leftmost.

use super::{Mem, Region};
use std::fmt::{Display, Formatter};

/// Width of the screen, in pixels
pub const WIDTH: usize = 64;
/// Height of the screen, in pixels
pub const HEIGHT: usize = 32;

impl Mem {
    /// Gets the raw screen bytes, for rendering
    pub fn framebuffer(&self) -> &[u8] {
        self.get_region(Region::Screen)
    }

    /// Finds the byte and bit which back pixel (x, y)
    #[inline(always)]
    fn pixel_at(x: usize, y: usize) -> Option<(usize, u8)> {
        if x >= WIDTH || y >= HEIGHT {
            return None;
        }
        Some((
            Region::Screen.range().start + y * WIDTH / 8 + x / 8,
            0x80 >> (x % 8),
        ))
    }

    /// Gets the state of pixel (x, y), or [None] if it's off-screen
    /// # Examples
    /// ```rust
    /// # use chip8_vm::*;
    /// let mem = Mem::new();
    /// assert_eq!(Some(false), mem.get_pixel(63, 31));
    /// assert_eq!(None, mem.get_pixel(64, 0));
    /// ```
    pub fn get_pixel(&self, x: usize, y: usize) -> Option<bool> {
        let (addr, mask) = Self::pixel_at(x, y)?;
        Some(self.memory[addr] & mask != 0)
    }

    /// Flips pixel (x, y), returning its *previous* state, or [None] if it's off-screen
    /// # Examples
    /// ```rust
    /// # use chip8_vm::*;
    /// let mut mem = Mem::new();
    /// assert_eq!(Some(false), mem.toggle_pixel(9, 1));
    /// assert_eq!(0x40, mem.framebuffer()[9]);
    /// assert_eq!(Some(true), mem.toggle_pixel(9, 1));
    /// assert_eq!(0x00, mem.framebuffer()[9]);
    /// ```
    pub fn toggle_pixel(&mut self, x: usize, y: usize) -> Option<bool> {
        let (addr, mask) = Self::pixel_at(x, y)?;
        let byte = &mut self.memory[addr];
        let previous = *byte & mask != 0;
        *byte ^= mask;
        Some(previous)
    }

    /// Clears the screen memory to 0
    pub fn clear_screen(&mut self) -> &mut Self {
        self.clear_region(Region::Screen)
    }

    /// Gets a [ScreenView], which displays the screen using box characters
    pub fn screen(&self) -> ScreenView<'_> {
        ScreenView(self.framebuffer())
    }
}

/// Displays a 64x32 framebuffer with one character per pixel
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScreenView<'a>(&'a [u8]);

impl Display for ScreenView<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for (row, line) in self.0.chunks(WIDTH / 8).enumerate() {
            write!(f, "{row:02}|")?;
            for byte in line {
                write!(
                    f,
                    "{}",
                    format!("{byte:08b}").replace('0', " ").replace('1', "█")
                )?;
            }
            writeln!(f, "|")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_every_pixel() {
        let mut mem = Mem::new();
        for y in 0..HEIGHT {
            for x in 0..WIDTH {
                assert_eq!(Some(false), mem.toggle_pixel(x, y));
                assert_eq!(Some(true), mem.get_pixel(x, y));
            }
        }
        assert!(mem.framebuffer().iter().all(|&byte| byte == 0xff));
        mem.clear_screen();
        assert!(mem.framebuffer().iter().all(|&byte| byte == 0));
    }

    #[test]
    fn row_major_layout() {
        let mut mem = Mem::new();
        mem.toggle_pixel(0, 1);
        mem.toggle_pixel(63, 31);
        assert_eq!(0x80, mem.read_byte(0xf08).unwrap());
        assert_eq!(0x01, mem.read_byte(0xfff).unwrap());
    }

    #[test]
    fn off_screen_does_nothing() {
        let mut mem = Mem::new();
        let before = mem.clone();
        assert_eq!(None, mem.toggle_pixel(64, 0));
        assert_eq!(None, mem.toggle_pixel(0, 32));
        assert_eq!(before, mem);
    }

    #[test]
    fn screen_view_has_one_line_per_row() {
        let mut mem = Mem::new();
        mem.toggle_pixel(2, 0);
        let view = mem.screen().to_string();
        assert_eq!(HEIGHT, view.lines().count());
        assert!(view.lines().next().unwrap().starts_with("00|  █ "));
    }
}
