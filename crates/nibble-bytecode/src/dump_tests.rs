use nibble_core::{Colors, Interner};

use crate::{Bytecode, BytecodeBuilder, Opcode, RESERVED_NAMES, dump};

fn names(extra: &[&str]) -> Interner {
    let mut interner = Interner::new();
    for name in RESERVED_NAMES.iter().chain(extra) {
        interner.intern(name).unwrap();
    }
    interner
}

/// `dbl: 2 + : 3 dbl.` with `dbl` interned as id 4.
fn doubling_program() -> Bytecode {
    let mut b = BytecodeBuilder::new();
    b.literal(4);
    b.op(Opcode::Define);
    b.literal(2);
    b.op(Opcode::Add);
    b.op(Opcode::Define);
    b.literal(3);
    b.literal(4);
    b.op(Opcode::Call);
    b.finish()
}

#[test]
fn listing_with_names() {
    let code = doubling_program();
    let names = names(&["dbl"]);

    insta::assert_snapshot!(dump(&code, Some(&names), Colors::OFF), @r"
    0000  #  lit 4  ; dbl
    0003  :  define
    0004  #  lit 2
    0007  +  add
    0008  :  define
    0009  #  lit 3
    0012  #  lit 4  ; dbl
    0015  .  call
    ");
}

#[test]
fn listing_without_names() {
    let code = doubling_program();

    insta::assert_snapshot!(dump(&code, None, Colors::OFF), @r"
    0000  #  lit 4
    0003  :  define
    0004  #  lit 2
    0007  +  add
    0008  :  define
    0009  #  lit 3
    0012  #  lit 4
    0015  .  call
    ");
}

#[test]
fn every_opcode() {
    let code = Bytecode::from_nibbles([
        0x1, 0x2, 0x3, 0x4, 0x5, 0x6, 0x7, 0x8, 0xB, 0xC, 0xD, 0xE, 0xF,
    ]);

    insta::assert_snapshot!(dump(&code, None, Colors::OFF), @r"
    0000  +  add
    0001  -  sub
    0002  *  mul
    0003  $  index
    0004  =  load
    0005  ?  push
    0006  !  drop
    0007  ,  swap
    0008  @  return
    0009  [  open_a
    0010  ]  close_a
    0011  <  open_b
    0012  >  close_b
    ");
}

#[test]
fn builtin_call_is_named() {
    let mut b = BytecodeBuilder::new();
    b.literal(0);
    b.op(Opcode::Call);
    let code = b.finish();

    insta::assert_snapshot!(dump(&code, Some(&names(&[])), Colors::OFF), @r"
    0000  #  lit 0  ; top
    0003  .  call
    ");
}

#[test]
fn malformed_literal_ends_listing() {
    let code = Bytecode::from_nibbles([0x7, 0x0, 0x1, 0xC, 0x1, 0x1]);

    insta::assert_snapshot!(dump(&code, None, Colors::OFF), @r"
    0000  !  drop
    0001  #  lit  ; invalid literal digit 0xC at nibble 3
    ");
}

#[test]
fn colored_listing_wraps_fields() {
    let code = Bytecode::from_nibbles([0x1]);
    let out = dump(&code, None, Colors::ON);
    assert_eq!(out, "\x1b[2m0000\x1b[0m  +  \x1b[34madd\x1b[0m\n");
}

#[test]
fn empty_code() {
    assert_eq!(dump(&Bytecode::default(), None, Colors::OFF), "");
}
