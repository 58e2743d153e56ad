// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! Exercises the instruction decode logic.
use super::*;

const INDX: &[u8; 16] = b"\0\x01\x02\x03\x04\x05\x06\x07\x08\x09\x0a\x0b\x0c\x0d\x0e\x0f";

/// runs one arbitrary operation on a brand new CPU
/// returns the CPU for inspection
fn run_single_op(op: &[u8]) -> CPU {
    let (mut cpu, mut mem) = setup_environment();
    mem.load_region(Program, op).unwrap();
    cpu.reg.v = *INDX;
    cpu.reg.i = 0x300;
    cpu.step(&mut mem, &NO_KEYS).unwrap(); // will panic if unimplemented
    cpu
}

#[rustfmt::skip]
mod sys {
    use super::*;
    #[test]                 fn cls()   { run_single_op(b"\x00\xe0"); }
    #[test] #[should_panic] fn ret()   { run_single_op(b"\x00\xee"); }
    #[test] #[should_panic] fn u0420() { run_single_op(b"\x04\x20"); }
}
#[rustfmt::skip]
mod jump {
    use super::*;
    #[test] fn aligned()   { assert_eq!(0x230, run_single_op(b"\x12\x30").pc()); }
    #[test] fn unaligned() { assert_eq!(0x231, run_single_op(b"\x12\x31").pc()); }
}
#[rustfmt::skip]
mod call {
    use super::*;
    #[test] fn aligned()   { assert_eq!(0x230, run_single_op(b"\x22\x30").pc()); }
    #[test] fn unaligned() { assert_eq!(0x231, run_single_op(b"\x22\x31").pc()); }
    #[test] fn pushes()    { assert_eq!(1, run_single_op(b"\x22\x30").stack().depth()); }
}
#[rustfmt::skip]
mod seb {
    use super::*;
    #[test] fn skip()    { assert_eq!(0x204, run_single_op(b"\x30\x00").pc()); }
    #[test] fn no_skip() { assert_eq!(0x202, run_single_op(b"\x30\x01").pc()); }
}
#[rustfmt::skip]
mod sneb {
    use super::*;
    #[test] fn skip()   { assert_eq!(0x204, run_single_op(b"\x40\x01").pc()); }
    #[test] fn noskip() { assert_eq!(0x202, run_single_op(b"\x40\x00").pc()); }
}
#[rustfmt::skip]
mod se {
    use super::*;
    #[test] fn skip()   { assert_eq!(0x204, run_single_op(b"\x50\x00").pc()); }
    #[test] fn noskip() { assert_eq!(0x202, run_single_op(b"\x50\x10").pc()); }
    #[test] #[should_panic] fn u5001() { run_single_op(b"\x50\x01"); }
}
#[rustfmt::skip]
mod movb {
    use super::*;
    #[test] fn mov() { assert_eq!(0xa5, run_single_op(b"\x6e\xa5").v()[0xe]); }
}
#[rustfmt::skip]
mod addb {
    use super::*;
    #[test] fn add()  { assert_eq!(0x0e + 0x10, run_single_op(b"\x7e\x10").v()[0xe]); }
    #[test] fn wrap() { assert_eq!(0x0d, run_single_op(b"\x7e\xff").v()[0xe]); }
}
#[rustfmt::skip]
mod alu {
    use super::*;
    #[test] fn mov()  { assert_eq!(0x7, run_single_op(b"\x83\x70").v()[0x3]); }
    #[test] fn or()   { assert_eq!(0x3 | 0x4, run_single_op(b"\x83\x41").v()[0x3]); }
    #[test] fn and()  { assert_eq!(0x3 & 0x6, run_single_op(b"\x83\x62").v()[0x3]); }
    #[test] fn xor()  { assert_eq!(0x3 ^ 0x5, run_single_op(b"\x83\x53").v()[0x3]); }
    #[test] fn add()  { assert_eq!([0x3 + 0x5, 0], { let c = run_single_op(b"\x83\x54"); [c.v()[0x3], c.v()[0xf]] }); }
    #[test] fn sub()  { assert_eq!([0x5 - 0x3, 1], { let c = run_single_op(b"\x85\x35"); [c.v()[0x5], c.v()[0xf]] }); }
    #[test] fn shr()  { assert_eq!([0x3 >> 1, 1], { let c = run_single_op(b"\x83\x06"); [c.v()[0x3], c.v()[0xf]] }); }
    #[test] fn bsub() { assert_eq!([0xfe, 0], { let c = run_single_op(b"\x83\x17"); [c.v()[0x3], c.v()[0xf]] }); }
    #[test] fn shl()  { assert_eq!([0x3 << 1, 0], { let c = run_single_op(b"\x83\x0e"); [c.v()[0x3], c.v()[0xf]] }); }
}
#[rustfmt::skip]
mod sne {
    use super::*;
    #[test] fn skip()   { assert_eq!(0x204, run_single_op(b"\x90\x10").pc()); }
    #[test] fn noskip() { assert_eq!(0x202, run_single_op(b"\x90\x00").pc()); }
}
#[rustfmt::skip]
mod movi {
    use super::*;
    #[test] fn mov() { assert_eq!(0x123, run_single_op(b"\xa1\x23").i()); }
}
#[rustfmt::skip]
mod jmpr {
    use super::*;
    // v0 is 0
    #[test] fn jump() { assert_eq!(0x345, run_single_op(b"\xb3\x45").pc()); }
}
#[rustfmt::skip]
mod rand {
    use super::*;
    #[test] fn masked() { assert_eq!(0, run_single_op(b"\xc5\x00").v()[0x5]); }
}
#[rustfmt::skip]
mod draw {
    use super::*;
    #[test] fn draw() { run_single_op(b"\xd1\x25"); }
}
#[rustfmt::skip]
mod keys {
    use super::*;
    #[test] fn sek()  { assert_eq!(0x202, run_single_op(b"\xe1\x9e").pc()); }
    #[test] fn snek() { assert_eq!(0x204, run_single_op(b"\xe1\xa1").pc()); }
}
#[rustfmt::skip]
mod io {
    use super::*;
    #[test] fn getdt() { assert_eq!(0, run_single_op(b"\xf5\x07").v()[0x5]); }
    #[test] fn waitk() { assert_eq!(Some(0x5), run_single_op(b"\xf5\x0a").flags.keypause); }
    #[test] fn setdt() { assert_eq!(0x5, run_single_op(b"\xf5\x15").delay()); }
    #[test] fn movst() { assert_eq!(0x5, run_single_op(b"\xf5\x18").sound()); }
    #[test] fn addi()  { assert_eq!(0x305, run_single_op(b"\xf5\x1e").i()); }
    #[test] fn font()  { assert_eq!(0x19, run_single_op(b"\xf5\x29").i()); }
    #[test] fn bcd()   { run_single_op(b"\xfa\x33"); }
    #[test] fn dmao()  { assert_eq!(0x300, run_single_op(b"\xff\x55").i()); }
    #[test] fn dmai()  { assert_eq!(0x300, run_single_op(b"\xff\x65").i()); }
}
