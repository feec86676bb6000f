use indoc::indoc;
use nibble_bytecode::{Bytecode, BytecodeBuilder, Opcode};
use nibble_core::ErrorKind;

use crate::{AssembleError, Assembler};

fn asm(source: &str) -> Bytecode {
    Assembler::new().assemble(source).unwrap()
}

fn hex(source: &str) -> String {
    format!("{:?}", asm(source))
}

fn err(source: &str) -> AssembleError {
    Assembler::new().assemble(source).unwrap_err()
}

#[test]
fn arithmetic() {
    assert_eq!(hex("3 4 +"), "Bytecode(03A04A1)");
    assert_eq!(asm("3 4 +").as_bytes(), &[0x30, 0x0A, 0xA4, 0x01]);
}

#[test]
fn whitespace_is_insignificant() {
    assert_eq!(asm("3 4 +"), asm("3\n\t4+"));
}

#[test]
fn numerals() {
    assert_eq!(hex("0"), "Bytecode(00A)");
    assert_eq!(hex("1"), "Bytecode(0B)");
    assert_eq!(hex("0100"), "Bytecode(000B)");
    assert_eq!(hex("42"), "Bytecode(042A)");
}

#[test]
fn long_numeral_is_encoded_verbatim() {
    let code = asm("123456789012345678901234567890");
    // opcode + 29 digits + terminator
    assert_eq!(code.len(), 31);
}

#[test]
fn every_operator() {
    assert_eq!(hex("+-*$=?!,:.@[]<>"), "Bytecode(123456789ABCDEF)");
}

#[test]
fn dup_sugar() {
    assert_eq!(hex("%"), "Bytecode(0A4)");
}

#[test]
fn definition_and_call() {
    // dbl is the first free id, 4
    assert_eq!(hex("dbl: % + : 3 dbl."), "Bytecode(04A90A41903A04AA)");
}

#[test]
fn reserved_names() {
    assert_eq!(hex("top."), "Bytecode(00AA)");
    assert_eq!(hex("say."), "Bytecode(0BA)");
    assert_eq!(hex("hlt."), "Bytecode(02AA)");
    assert_eq!(hex("_entry"), "Bytecode(03A)");
}

#[test]
fn bare_name_pushes_id() {
    let mut code = BytecodeBuilder::new();
    code.literal(4);
    assert_eq!(asm("x"), code.finish());
}

#[test]
fn prefix_and_suffix_call_agree() {
    assert_eq!(asm("'Hi'.say"), asm("'Hi' say."));
}

#[test]
fn suffix_call_wins() {
    // a is called, b is pushed
    assert_eq!(hex("a.b"), "Bytecode(04AA05A)");
}

#[test]
fn bare_dot_calls_stack_top() {
    assert_eq!(hex("0."), "Bytecode(00AA)");
}

#[test]
fn string() {
    // 0, 'H' = 72, 'i' = 105
    assert_eq!(hex("'Hi'"), "Bytecode(00A072A005B)");
}

#[test]
fn string_escapes() {
    let mut expected = BytecodeBuilder::new();
    for v in [0, u64::from(b'\''), u64::from(b'\\')] {
        expected.literal(v);
    }
    assert_eq!(asm(r"'\'\\'"), expected.finish());
}

#[test]
fn empty_string_is_marker_only() {
    assert_eq!(hex("''"), "Bytecode(00A)");
}

#[test]
fn symbols_persist_across_assemblies() {
    let mut asm = Assembler::new();
    asm.assemble("foo").unwrap();
    let code = asm.assemble("bar foo").unwrap();

    assert_eq!(format!("{code:?}"), "Bytecode(05A04A)");
    assert_eq!(asm.names().try_resolve_id(4), Some("foo"));
    assert_eq!(asm.names().try_resolve_id(5), Some("bar"));
}

#[test]
fn fragments_concatenate() {
    let mut asm = Assembler::new();
    let mut joined = BytecodeBuilder::new();
    asm.assemble_into("dbl: % + :", &mut joined).unwrap();
    asm.assemble_into(" 3 dbl.", &mut joined).unwrap();

    assert_eq!(joined.finish(), Assembler::new().assemble("dbl: % + : 3 dbl.").unwrap());
}

#[test]
fn multi_line_program() {
    let source = indoc! {"
        sq: % * :
        4 sq.
        top.
    "};
    let code = asm(source);
    assert_eq!(code.opcode_at(0), Some(Opcode::Literal));
    assert_eq!(code.opcode_at(code.len() - 1), Some(Opcode::Call));
}

#[test]
fn unexpected_char() {
    let e = err("3 # 4");
    assert_eq!(e, AssembleError::UnexpectedChar { ch: '#', span: 2..3 });
    assert_eq!(e.kind(), ErrorKind::Syntax);
    assert_eq!(e.to_string(), "unexpected character '#'");
}

#[test]
fn unterminated_string() {
    let e = err("1 'abc");
    assert_eq!(e, AssembleError::UnterminatedString { span: 2..6 });
    assert_eq!(e.kind(), ErrorKind::Syntax);
}

#[test]
fn name_length_limit() {
    let ok = "a".repeat(255);
    assert!(Assembler::new().assemble(&ok).is_ok());

    let long = "a".repeat(256);
    let e = err(&format!("{long}."));
    assert_eq!(
        e,
        AssembleError::NameTooLong {
            len: 256,
            max: 255,
            span: 0..256
        }
    );
    assert_eq!(e.kind(), ErrorKind::Syntax);
}

#[test]
fn symbol_table_full() {
    let mut asm = Assembler::with_capacity_limit(5);
    let e = asm.assemble("x y").unwrap_err();

    assert_eq!(e, AssembleError::SymbolTableFull { capacity: 5, span: 2..3 });
    assert_eq!(e.kind(), ErrorKind::Capacity);
    // known names still resolve
    assert!(asm.assemble("x top.").is_ok());
}

#[test]
fn prefix_call_span_excludes_dot() {
    let mut asm = Assembler::with_capacity_limit(4);
    let e = asm.assemble(" .abc").unwrap_err();
    assert_eq!(e.span(), 2..5);
}
