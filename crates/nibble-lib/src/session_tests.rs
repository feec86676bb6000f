use indoc::indoc;

use crate::{
    Colors, Error, ErrorKind, FuelLimits, NoopTracer, PrintTracer, RuntimeError, Session,
    Termination, dump,
};

fn run(source: &str) -> (crate::Result<crate::Outcome>, String) {
    let mut out = Vec::new();
    let result = Session::new().run(source, &mut out);
    (result, String::from_utf8(out).unwrap())
}

#[test]
fn hello() {
    let (result, out) = run("'Hello, world!' say.");
    let outcome = result.unwrap();

    assert_eq!(out, "Hello, world!\n");
    assert_eq!(outcome.termination, Termination::Completed);
    assert!(outcome.state.stack.is_empty());
}

#[test]
fn program_with_functions_and_loops() {
    let source = indoc! {"
        sq: % * :
        sum: 0 , = 1 [ ? sq. + ] :
        3 sum.
        top.
    "};
    // 3² + 2² + 1² + 0²
    let (result, out) = run(source);
    let outcome = result.unwrap();

    assert_eq!(outcome.state.stack, vec![14]);
    assert_eq!(out, "top: 14\n");
}

#[test]
fn names_persist_between_runs() {
    let mut session = Session::new();
    let mut out = Vec::new();

    session.run("sq: % * :", &mut out).unwrap();
    let id = session.names().get("sq").unwrap().as_u32();
    assert_eq!(id, 4);

    // a new run does not see the old definition, but the id is stable
    let err = session.run("5 sq.", &mut out).unwrap_err();
    assert!(matches!(
        err,
        Error::Runtime(ref f) if matches!(f.error, RuntimeError::UnknownBuiltin { id: 4, .. })
    ));
    assert_eq!(session.names().get("sq").unwrap().as_u32(), id);
}

#[test]
fn assemble_error() {
    let (result, out) = run("1 2 # 3");
    let err = result.unwrap_err();

    assert!(matches!(err, Error::Assemble(_)));
    assert_eq!(err.kind(), ErrorKind::Syntax);
    assert!(err.state().is_none());
    assert_eq!(err.to_string(), "unexpected character '#'");
    assert_eq!(out, "");
}

#[test]
fn unterminated_string_is_syntax_error() {
    let (result, _) = run("'oops say.");
    assert_eq!(result.unwrap_err().kind(), ErrorKind::Syntax);
}

#[test]
fn runtime_error_keeps_state_and_output() {
    let (result, out) = run("7 top. 3= 1 2 + ! ! !");
    let err = result.unwrap_err();

    assert_eq!(out, "top: 7\n");
    assert_eq!(err.kind(), ErrorKind::Runtime);
    let state = err.state().unwrap();
    assert_eq!(state.register, 3);
    assert!(state.stack.is_empty());
}

#[test]
fn structural_error() {
    let (result, _) = run("0[");
    assert_eq!(result.unwrap_err().kind(), ErrorKind::Structural);
}

#[test]
fn limits_apply_to_every_run() {
    let mut session = Session::new().limits(FuelLimits::new().exec_fuel(50));
    let mut out = Vec::new();

    for _ in 0..2 {
        let err = session.run("1[1=]", &mut out).unwrap_err();
        assert!(matches!(
            err,
            Error::Runtime(ref f) if matches!(f.error, RuntimeError::ExecFuelExhausted(50))
        ));
    }
}

#[test]
fn uncached_session_matches_cached() {
    let source = "0 99=1[1+] 2=1<3+>";
    let mut out = Vec::new();

    let cached = Session::new().run(source, &mut out).unwrap();
    let uncached = Session::new()
        .cache_branches(false)
        .run(source, &mut out)
        .unwrap();
    assert_eq!(cached, uncached);
    assert_eq!(cached.state.stack, vec![109]);
}

#[test]
fn trace_with_session_names() {
    let mut session = Session::new();
    let code = session.compile("one: 1 : one.").unwrap();
    let mut tracer = PrintTracer::new(Colors::OFF).names(session.names());
    let mut out = Vec::new();

    session.execute(&code, &mut out, &mut tracer).unwrap();

    insta::assert_snapshot!(tracer.render(), @r"
    0000  #  lit 4
    0003  :  define
            define one [4..6)
    0007  #  lit 4
    0010  .  call
            call one [4..6)
    0004  #  lit 1
            return → 0011
            return (top level)
    ");
}

#[test]
fn dump_with_session_names() {
    let mut session = Session::new();
    let code = session.compile("one: 1 : one.").unwrap();

    insta::assert_snapshot!(dump(&code, Some(session.names()), Colors::OFF), @r"
    0000  #  lit 4  ; one
    0003  :  define
    0004  #  lit 1  ; say
    0006  :  define
    0007  #  lit 4  ; one
    0010  .  call
    ");
}

#[test]
fn run_with_noop_tracer() {
    let mut out = Vec::new();
    let outcome = Session::new()
        .run_with("2 3 *", &mut out, &mut NoopTracer)
        .unwrap();
    assert_eq!(outcome.state.stack, vec![6]);
}
