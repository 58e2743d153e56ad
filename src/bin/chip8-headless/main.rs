// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! Runs a Chip-8 ROM with no window and no keyboard, then prints the screen.
//!
//! Each frame runs `--ipf` instructions, then ticks the timers once.
//! Set `RUST_LOG=debug` together with `--debug` to trace every instruction.

use chip8_vm::*;
use gumdrop::*;
use owo_colors::OwoColorize;
use std::{fs::read, path::PathBuf};

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Options, Hash)]
struct Arguments {
    #[options(help = "Load a ROM to run.", required, free)]
    pub file: PathBuf,
    #[options(help = "Print this help message.")]
    help: bool,
    #[options(help = "Enable debug mode at startup.")]
    pub debug: bool,
    #[options(help = "Wrap sprites around the edges of the screen.")]
    pub wrap: bool,
    #[options(help = "Stop after this many instructions.", default = "1000")]
    pub cycles: usize,
    #[options(help = "Set the instructions-per-frame rate.", default = "10")]
    pub ipf: usize,
}

fn main() -> Result<()> {
    env_logger::builder().format_timestamp(None).init();
    let options = Arguments::parse_args_default_or_exit();

    let mut ch8 = Chip8::new(Flags {
        debug: options.debug,
        quirks: options.wrap.into(),
        ..Default::default()
    });
    ch8.load_rom(&read(&options.file)?)?;
    log::info!("loaded {}", options.file.display());

    let keys: Keys = [false; 16];
    let ipf = options.ipf.max(1);
    let mut remaining = options.cycles;
    while remaining > 0 {
        let steps = ipf.min(remaining);
        match ch8.multistep(&keys, steps) {
            Ok(effects) if effects.awaiting_key => {
                log::info!("waiting for a key at {:03x}, stopping", ch8.cpu.pc());
                break;
            }
            Ok(_) => ch8.tick_timers(),
            Err(e) => {
                eprintln!("{}", e.bold().red());
                break;
            }
        }
        remaining -= steps;
    }

    println!("{}", ch8.mem.screen());
    println!("{}", ch8.cpu.dump());
    Ok(())
}
