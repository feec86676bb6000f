use crate::{AssembleError, Assembler};

fn fail(source: &str) -> AssembleError {
    Assembler::new().assemble(source).unwrap_err()
}

#[test]
fn without_source_prints_kind_and_message() {
    let e = fail("3 # 4");
    assert_eq!(e.printer().render(), "syntax error: unexpected character '#'");
}

#[test]
fn snippet_points_at_offending_char() {
    let source = "3 4 +\n5 # 6";
    let e = fail(source);
    let out = e.printer().source(source).path("prog.nb").render();

    assert!(out.contains("error: unexpected character '#'"), "{out}");
    assert!(out.contains("prog.nb:2:3"), "{out}");
    assert!(out.contains("5 # 6"), "{out}");
    assert!(out.contains('^'), "{out}");
}

#[test]
fn unterminated_string_snippet() {
    let source = "'abc";
    let e = fail(source);
    let out = e.printer().source(source).render();

    assert!(out.contains("error: unterminated string"), "{out}");
    assert!(out.contains("^^^^"), "{out}");
}

#[test]
fn plain_output_has_no_escapes() {
    let source = "#";
    let e = fail(source);
    let out = e.printer().source(source).colored(false).render();
    assert!(!out.contains('\x1b'), "{out}");

    let colored = e.printer().source(source).colored(true).render();
    assert!(colored.contains('\x1b'), "{colored}");
}
