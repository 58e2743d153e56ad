// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! Testing methods on the VM's public structs
use chip8_vm::prelude::*;
use std::{collections::hash_map::DefaultHasher, hash::Hash};

#[test]
fn chip8() {
    let ch8 = Chip8::default(); // Default
    let ch82 = ch8.clone(); // Clone
    assert_eq!(ch8, ch82); // PartialEq
    println!("{ch8:?}"); // Debug
}

#[test]
fn chip8_has_font_and_starts_at_0x200() {
    let ch8 = Chip8::default();
    assert_eq!(&mem::CHARSET, ch8.mem.read_range(0, 80).unwrap());
    assert_eq!(0x200, ch8.cpu.pc());
    assert_eq!(0, ch8.cpu.delay());
    assert_eq!(0, ch8.cpu.sound());
}

#[test]
fn rom_too_large_changes_nothing() {
    let mut ch8 = Chip8::default();
    ch8.load_rom(&[0x12, 0x00]).unwrap();
    let before = ch8.clone();
    assert!(matches!(
        ch8.load_rom(&vec![0; 0xe9f - 0x200 + 2]),
        Err(Error::RomTooLarge { .. })
    ));
    assert_eq!(before, ch8);
    ch8.load_rom(&vec![0; 0xe9f - 0x200 + 1]).unwrap();
}

#[test]
fn load_rom_clears_old_program() {
    let mut ch8 = Chip8::default();
    ch8.load_rom(&[0xaa; 16]).unwrap();
    ch8.load_rom(&[0x12, 0x00]).unwrap();
    assert_eq!(&[0x12, 0x00, 0x00], ch8.mem.read_range(0x200, 3).unwrap());
}

#[test]
fn reset_keeps_rom_and_font() {
    let mut ch8 = Chip8::default();
    // mov #05, v0; font v0, I; draw #5, v0, v0; call 200
    ch8.load_rom(&[0x60, 0x05, 0xf0, 0x29, 0xd0, 0x05, 0x22, 0x00])
        .unwrap();
    ch8.multistep(&[false; 16], 4).unwrap();
    ch8.reset();
    assert_eq!(0x200, ch8.cpu.pc());
    assert_eq!(&[0u8; 256], ch8.framebuffer_bytes());
    assert!(ch8.mem.get_region(Stack).iter().all(|&byte| byte == 0));
    assert_eq!(0x6005, ch8.mem.read_word(0x200).unwrap());
    assert_eq!(&mem::CHARSET, ch8.mem.read_range(0, 80).unwrap());
}

#[test]
fn error() {
    for error in [
        Error::UnknownOpcode { word: 0x1234 },
        Error::OutOfBounds { addr: 0x1000 },
        Error::StackOverflow,
        Error::StackUnderflow,
        Error::RomTooLarge {
            len: 0xd00,
            max: 0xca0,
        },
        Error::InvalidRegister { reg: 0x10 },
    ] {
        println!("{error} {error:?}");
    }
    assert_eq!(
        "opcode 1234 not recognized",
        Error::UnknownOpcode { word: 0x1234 }.to_string()
    );
}

mod region {
    use super::*;
    #[test]
    fn copy() {
        let r1 = Screen;
        let r2 = r1;
        assert_eq!(r1, r2);
    }
    #[test]
    fn display() {
        assert_eq!("CharsetProgramStackScreen", format!("{Charset}{Program}{Stack}{Screen}"));
    }
    #[test]
    fn ord() {
        assert_eq!(Screen, Charset.max(Program).max(Screen).max(Stack));
        assert!(Charset < Program && Program < Stack && Stack < Screen);
    }
    #[test]
    fn hash() {
        let mut hasher = DefaultHasher::new();
        Stack.hash(&mut hasher);
        println!("{hasher:?}");
    }
}

mod quirks {
    use super::*;
    #[test]
    fn from_bool() {
        assert_eq!(Quirks { screen_wrap: true }, Quirks::from(true));
        assert_eq!(Quirks::default(), Quirks::from(false));
    }
}

mod dis {
    use super::*;
    use imperative_rs::InstructionSet;
    #[test]
    fn every_valid_word_disassembles() {
        let dis = Dis::default();
        for word in 0..=0xffffu16 {
            let text = dis.once(word);
            let valid = Insn::decode(&word.to_be_bytes()).is_ok();
            assert_eq!(!valid, text.contains("inval"), "{word:04x}: {text}");
        }
    }
    #[test]
    fn mnemonics() {
        let (_, insn) = Insn::decode(&[0xd1, 0x2f]).unwrap();
        assert_eq!(Insn::draw { y: 2, x: 1, n: 0xf }, insn);
        assert_eq!("draw   #f, v1, v2", insn.to_string());
        let (_, insn) = Insn::decode(&[0xa2, 0x34]).unwrap();
        assert_eq!("mov    $234, I", insn.to_string());
    }
}

#[test]
fn screen_view() {
    let mut ch8 = Chip8::default();
    ch8.mem.toggle_pixel(0, 0);
    let screen = ch8.mem.screen().to_string();
    assert!(screen.starts_with("00|█"));
}

#[cfg(feature = "serde")]
mod serde_support {
    use super::*;

    fn assert_serde<T: serde::Serialize + for<'de> serde::Deserialize<'de>>() {}

    #[test]
    fn machine_state_is_serializable() {
        assert_serde::<Chip8>();
        assert_serde::<CPU>();
        assert_serde::<Mem>();
        assert_serde::<Insn>();
    }
}
