// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! Prints a linear disassembly of a Chip-8 ROM, as loaded at `0x200`

use chip8_vm::{Dis, Disassembler, Program, Result};
use gumdrop::*;
use owo_colors::OwoColorize;
use std::{fs::read, path::PathBuf};

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Options, Hash)]
struct Arguments {
    #[options(help = "Show help text")]
    help: bool,
    #[options(help = "Load a ROM to disassemble", free, required)]
    pub file: PathBuf,
    #[options(help = "Start disassembling at offset...")]
    pub offset: usize,
}

fn main() -> Result<()> {
    let options = Arguments::parse_args_default_or_exit();
    let contents = read(&options.file)?;
    let disassembler = Dis::default();
    let start = Program.range().start + options.offset;
    let body = contents.get(options.offset..).unwrap_or_default();
    for (addr, pair) in body.chunks_exact(2).enumerate() {
        let word = u16::from_be_bytes([pair[0], pair[1]]);
        println!(
            "{}",
            format_args!(
                "{:03x}: {} {:04x}",
                start + 2 * addr,
                disassembler.once(word),
                word.bright_black(),
            )
        );
    }
    Ok(())
}
