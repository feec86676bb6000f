use nibble_bytecode::{Bytecode, CodeRange, Opcode};

use super::branch::{BranchCache, Resolved};

const OPEN_A: u8 = 0xC;
const CLOSE_A: u8 = 0xD;
const OPEN_B: u8 = 0xE;
const CLOSE_B: u8 = 0xF;
const ADD: u8 = 0x1;
const DROP: u8 = 0x7;

fn resolved(target: usize, cached: bool) -> Option<Resolved> {
    Some(Resolved { target, cached })
}

#[test]
fn forward_lands_past_close() {
    let code = Bytecode::from_nibbles([OPEN_A, ADD, CLOSE_A, DROP]);
    let mut cache = BranchCache::new(true);

    let r = cache.resolve(&code, 0, Opcode::OpenA, code.full_range());
    assert_eq!(r, resolved(3, false));
}

#[test]
fn backward_lands_past_open() {
    let code = Bytecode::from_nibbles([OPEN_A, ADD, CLOSE_A, DROP]);
    let mut cache = BranchCache::new(true);

    let r = cache.resolve(&code, 2, Opcode::CloseA, code.full_range());
    assert_eq!(r, resolved(1, false));
}

#[test]
fn second_resolution_is_cached() {
    let code = Bytecode::from_nibbles([OPEN_A, ADD, CLOSE_A]);
    let mut cache = BranchCache::new(true);
    let range = code.full_range();

    assert_eq!(cache.resolve(&code, 0, Opcode::OpenA, range), resolved(3, false));
    assert_eq!(cache.resolve(&code, 0, Opcode::OpenA, range), resolved(3, true));
    assert_eq!(cache.len(), 1);
}

#[test]
fn open_and_close_are_cached_separately() {
    let code = Bytecode::from_nibbles([OPEN_A, ADD, CLOSE_A]);
    let mut cache = BranchCache::new(true);
    let range = code.full_range();

    cache.resolve(&code, 0, Opcode::OpenA, range);
    assert_eq!(cache.resolve(&code, 2, Opcode::CloseA, range), resolved(1, false));
    assert_eq!(cache.len(), 2);
}

#[test]
fn disabled_cache_always_scans() {
    let code = Bytecode::from_nibbles([OPEN_A, CLOSE_A]);
    let mut cache = BranchCache::new(false);
    let range = code.full_range();

    assert_eq!(cache.resolve(&code, 0, Opcode::OpenA, range), resolved(2, false));
    assert_eq!(cache.resolve(&code, 0, Opcode::OpenA, range), resolved(2, false));
    assert!(cache.is_empty());
}

#[test]
fn nesting() {
    let code = Bytecode::from_nibbles([OPEN_A, OPEN_A, CLOSE_A, CLOSE_A]);
    let mut cache = BranchCache::new(true);
    let range = code.full_range();

    assert_eq!(cache.resolve(&code, 0, Opcode::OpenA, range), resolved(4, false));
    assert_eq!(cache.resolve(&code, 1, Opcode::OpenA, range), resolved(3, false));
    assert_eq!(cache.resolve(&code, 2, Opcode::CloseA, range), resolved(2, false));
    assert_eq!(cache.resolve(&code, 3, Opcode::CloseA, range), resolved(1, false));
}

#[test]
fn families_are_independent() {
    let code = Bytecode::from_nibbles([OPEN_A, OPEN_B, CLOSE_A, CLOSE_B]);
    let mut cache = BranchCache::new(true);
    let range = code.full_range();

    assert_eq!(cache.resolve(&code, 0, Opcode::OpenA, range), resolved(3, false));
    assert_eq!(cache.resolve(&code, 1, Opcode::OpenB, range), resolved(4, false));
    assert_eq!(cache.resolve(&code, 3, Opcode::CloseB, range), resolved(2, false));
}

#[test]
fn backward_scan_includes_range_start() {
    let code = Bytecode::from_nibbles([DROP, DROP, OPEN_A, ADD, CLOSE_A]);
    let mut cache = BranchCache::new(true);

    let r = cache.resolve(&code, 4, Opcode::CloseA, CodeRange::new(2, 5));
    assert_eq!(r, resolved(3, false));
}

#[test]
fn scans_stop_at_range_bounds() {
    let code = Bytecode::from_nibbles([OPEN_A, ADD, CLOSE_A, OPEN_A, CLOSE_A]);
    let mut cache = BranchCache::new(true);

    assert_eq!(cache.resolve(&code, 0, Opcode::OpenA, CodeRange::new(0, 2)), None);
    assert_eq!(cache.resolve(&code, 4, Opcode::CloseA, CodeRange::new(4, 5)), None);
    assert!(cache.is_empty());
}

#[test]
fn unmatched() {
    let code = Bytecode::from_nibbles([ADD, OPEN_A, ADD]);
    let mut cache = BranchCache::new(true);

    assert_eq!(cache.resolve(&code, 1, Opcode::OpenA, code.full_range()), None);
}

#[test]
fn non_bracket_does_not_resolve() {
    let code = Bytecode::from_nibbles([ADD, CLOSE_A]);
    let mut cache = BranchCache::new(true);

    assert_eq!(cache.resolve(&code, 0, Opcode::Add, code.full_range()), None);
}
