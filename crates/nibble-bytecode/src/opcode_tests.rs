use crate::{Builtin, ENTRY_ID, ENTRY_NAME, Opcode, RESERVED_NAMES};

#[test]
fn nibble_roundtrip() {
    for n in 0..16u8 {
        assert_eq!(Opcode::from_nibble(n).nibble(), n);
    }
}

#[test]
fn from_nibble_ignores_high_bits() {
    assert_eq!(Opcode::from_nibble(0x31), Opcode::Add);
    assert_eq!(Opcode::from_nibble(0xFF), Opcode::CloseB);
}

#[test]
fn operator_table() {
    let table: String = (0..16u8).map(|n| Opcode::from_nibble(n).symbol()).collect();
    assert_eq!(table, "#+-*$=?!,:.@[]<>");
}

#[test]
fn mnemonics_are_distinct() {
    let mut seen: Vec<&str> = (0..16u8)
        .map(|n| Opcode::from_nibble(n).mnemonic())
        .collect();
    seen.sort_unstable();
    seen.dedup();
    assert_eq!(seen.len(), 16);
    assert_eq!(Opcode::OpenB.to_string(), "open_b");
}

#[test]
fn bracket_partners() {
    assert_eq!(Opcode::OpenA.bracket_partner(), Some(Opcode::CloseA));
    assert_eq!(Opcode::CloseA.bracket_partner(), Some(Opcode::OpenA));
    assert_eq!(Opcode::OpenB.bracket_partner(), Some(Opcode::CloseB));
    assert_eq!(Opcode::CloseB.bracket_partner(), Some(Opcode::OpenB));
    assert_eq!(Opcode::Call.bracket_partner(), None);
}

#[test]
fn builtin_ids_follow_reserved_names() {
    for b in Builtin::ALL {
        assert_eq!(Builtin::from_id(b.id()), Some(b));
        assert_eq!(RESERVED_NAMES[b.id() as usize], b.name());
    }
    assert_eq!(Builtin::from_id(ENTRY_ID), None);
    assert_eq!(Builtin::from_id(-1), None);
    assert_eq!(RESERVED_NAMES[ENTRY_ID as usize], ENTRY_NAME);
    assert_eq!(Builtin::Halt.to_string(), "hlt");
}
